use crate::index::genome::{Genome, GenomePosition};

/// 单次 read/链尝试的最优比对记录，跨所有种子相位累积演化。
///
/// `mismatch` 在一次比对过程中单调不增；`times` 仅在出现
/// 新的不同位置并列当前最优时递增。`times == 0` 表示未比对上，
/// `times > 1` 表示多处并列（ambiguous read）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestMatch {
    pub chrom_id: u32,
    pub offset: u32,
    /// 并列当前最优错配数的不同位置个数
    pub times: u32,
    /// 当前最优错配数，初始为允许的错配上限
    pub mismatch: u32,
}

impl BestMatch {
    pub fn new(max_mismatches: u32) -> Self {
        Self { chrom_id: 0, offset: 0, times: 0, mismatch: max_mismatches }
    }

    #[inline]
    pub fn is_mapped(&self) -> bool {
        self.times > 0
    }

    #[inline]
    pub fn is_ambiguous(&self) -> bool {
        self.times > 1
    }
}

/// 全长比对计数错配，一旦超过 limit 立即中止。
/// 分支限界的阈值是「当前最优」而非固定预算，不可替换。
#[inline]
fn count_mismatches(read: &[u8], chrom_seq: &[u8], start: usize, limit: u32) -> u32 {
    let mut n = 0u32;
    for (p, &b) in read.iter().enumerate() {
        if chrom_seq[start + p] != b {
            n += 1;
            if n > limit {
                break;
            }
        }
    }
    n
}

/// 对收缩后区间内的每个候选做延伸验证并更新最优记录。
///
/// 候选的比对起点为「存储偏移 - 当前相位」；起点下溢（候选太靠
/// 染色体开头）或 read 越过染色体末端（必须严格落在内部）的候选
/// 直接跳过。更新规则（跨相位持续累积）：
/// - 错配数 < 当前最优：整体替换，times 重置为 1；
/// - 错配数 == 当前最优且位置不同：覆盖记录位置并 times += 1
///   （保留"后见者胜"的并列策略）；
/// - 其余：不变。
/// 候选必须按区间内升序枚举，并列结果才可复现。
pub(crate) fn extend_candidates(
    read: &[u8],
    genome: &Genome,
    bucket: &[GenomePosition],
    region: (usize, usize),
    phase: u32,
    mut best: BestMatch,
) -> BestMatch {
    let read_len = read.len();
    for &cand in &bucket[region.0..region.1] {
        if cand.offset < phase {
            continue;
        }
        let start = cand.offset - phase;
        let chrom = genome.chrom(cand.chrom_id);
        if start as usize + read_len >= chrom.len() {
            continue;
        }

        let num_of_mismatch = count_mismatches(read, &chrom.seq, start as usize, best.mismatch);

        if num_of_mismatch < best.mismatch {
            best = BestMatch {
                chrom_id: cand.chrom_id,
                offset: start,
                times: 1,
                mismatch: num_of_mismatch,
            };
        } else if num_of_mismatch == best.mismatch
            && (best.chrom_id != cand.chrom_id || best.offset != start)
        {
            best.chrom_id = cand.chrom_id;
            best.offset = start;
            best.times += 1;
        }
    }
    best
}
