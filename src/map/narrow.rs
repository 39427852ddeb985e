use crate::index::genome::{Genome, GenomePosition};
use crate::index::profile::SeedProfile;

/// 在 [lo, hi) 内找第一个「位点 delta 处符号 >= sym」的下标。
fn lower_bound(
    positions: &[GenomePosition],
    genome: &Genome,
    mut lo: usize,
    mut hi: usize,
    delta: u32,
    sym: u8,
) -> usize {
    while lo < hi {
        let mid = (lo + hi) / 2;
        if genome.symbol_at(positions[mid], delta) >= sym {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}

/// 在 [lo, hi) 内找第一个「位点 delta 处符号 > sym」的下标。
fn upper_bound(
    positions: &[GenomePosition],
    genome: &Genome,
    mut lo: usize,
    mut hi: usize,
    delta: u32,
    sym: u8,
) -> usize {
    while lo < hi {
        let mid = (lo + hi) / 2;
        if genome.symbol_at(positions[mid], delta) > sym {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}

/// 候选区间收缩：在一个预排序桶内，用 hash 之后的各比较位点
/// 逐位二分，收缩出与种子逐位点相符的极小连续带 [lo, hi)。
///
/// 每一步都在上一步的区间内搜索（从不重置）；一旦区间为空立即
/// 返回 None。排序前置条件成立时，返回的带恰好包含桶内所有在
/// 全部比较位点上匹配的条目。代价 O(比较位点数 × log 桶大小)。
pub fn narrow_region(
    seed: &[u8],
    positions: &[GenomePosition],
    genome: &Genome,
    profile: &SeedProfile,
    seed_weight: u32,
) -> Option<(usize, usize)> {
    if positions.is_empty() {
        return None;
    }
    let mut lo = 0usize;
    let mut hi = positions.len();
    for p in profile.hash_weight..seed_weight {
        let delta = SeedProfile::seed_offset(p);
        let sym = seed[delta as usize];
        lo = lower_bound(positions, genome, lo, hi, delta, sym);
        hi = upper_bound(positions, genome, lo, hi, delta, sym);
        if lo >= hi {
            return None;
        }
    }
    Some((lo, hi))
}
