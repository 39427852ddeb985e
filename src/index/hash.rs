use std::cmp::Ordering;
use std::collections::HashMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::genome::{Genome, GenomePosition};
use super::profile::{SeedProfile, INDEX_FORMAT_VERSION};

/// 种子 hash 索引：桶 hash -> 预排序的基因组位置列表。
///
/// 每个桶内的位置按比较键序列（种子位点 `hash_weight..seed_weight`
/// 处的基因组符号，逐位字典序）升序存放。这一排序是 narrowing
/// 二分正确性的前置条件；构建端与比对端共享同一 `SeedProfile`，
/// 并通过 `version` 字段做格式校验。
#[derive(Debug, Serialize, Deserialize)]
pub struct SeedIndex {
    pub version: u32,
    pub profile: SeedProfile,
    pub buckets: HashMap<u32, Vec<GenomePosition>>,
}

impl SeedIndex {
    /// 扫描基因组构建索引。只收录完整种子跨度落在染色体内的
    /// 位置，保证 narrowing 的所有比较都不越界。
    pub fn build(genome: &Genome, profile: SeedProfile) -> Self {
        let seed_span = profile.seed_span();
        let mut buckets: HashMap<u32, Vec<GenomePosition>> = HashMap::new();

        for (ci, chrom) in genome.chroms.iter().enumerate() {
            if chrom.len() < seed_span {
                continue;
            }
            for offset in 0..=(chrom.len() - seed_span) {
                let hash = profile.seed_hash(&chrom.seq[offset..]);
                buckets.entry(hash).or_default().push(GenomePosition {
                    chrom_id: ci as u32,
                    offset: offset as u32,
                });
            }
        }

        for positions in buckets.values_mut() {
            sort_bucket(positions, genome, &profile);
        }

        Self { version: INDEX_FORMAT_VERSION, profile, buckets }
    }

    /// 取出桶；不存在即 "此处无候选"。平均 O(1)。
    #[inline]
    pub fn bucket(&self, hash: u32) -> Option<&[GenomePosition]> {
        self.buckets.get(&hash).map(Vec::as_slice)
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let mut f = std::fs::File::create(path)?;
        bincode::serialize_into(&mut f, self)?;
        Ok(())
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let f = std::fs::File::open(path)?;
        let idx: Self = bincode::deserialize_from(f)?;
        if idx.version != INDEX_FORMAT_VERSION {
            anyhow::bail!(
                "index format version {} does not match supported version {}",
                idx.version,
                INDEX_FORMAT_VERSION
            );
        }
        Ok(idx)
    }
}

/// 桶内排序：比较键为 hash 之后各种子位点处的基因组符号。
/// 桶内条目的被 hash 位点符号必然相同，因此从 hash_weight 起比较即可。
fn sort_bucket(positions: &mut [GenomePosition], genome: &Genome, profile: &SeedProfile) {
    positions.sort_by(|a, b| compare_keys(*a, *b, genome, profile));
}

fn compare_keys(
    a: GenomePosition,
    b: GenomePosition,
    genome: &Genome,
    profile: &SeedProfile,
) -> Ordering {
    for p in profile.hash_weight..profile.seed_weight {
        let delta = SeedProfile::seed_offset(p);
        let ord = genome.symbol_at(a, delta).cmp(&genome.symbol_at(b, delta));
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}
