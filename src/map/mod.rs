use rayon::prelude::*;

use crate::index::genome::Genome;
use crate::index::hash::SeedIndex;
use crate::index::profile::SeedProfile;
use crate::util::dna;

pub mod extend;
pub mod narrow;

pub use extend::BestMatch;

/// 每个 read 尝试的种子相位数上限（相位 = 种子在 read 上的起始偏移）。
/// 实际相位数不超过 read 长度 − hash 宽度 + 1。
pub const SEED_PHASES: usize = 7;

/// 单端单链比对：对 read 依次尝试各相位种子，
/// 查桶 → 区间收缩 → 延伸验证，把最优记录当作折叠累加器
/// 穿过整个相位循环后返回。
///
/// read 为 ASCII 碱基序列，内部按 genome.mode 做转换后参与比较。
/// read 短于 hash 宽度时不查表，原样返回（视为未比对上）。
/// `seed_length` 是 narrowing 的比较深度（种子位点数），
/// 会被夹到索引的 seed_weight 以及当前相位下 read 能容纳的位点数。
/// 相位必须升序枚举：并列策略依赖枚举次序。
pub fn map_single_end(
    read: &[u8],
    genome: &Genome,
    index: &SeedIndex,
    seed_length: u32,
    mut best: BestMatch,
) -> BestMatch {
    let profile = &index.profile;
    let read_len = read.len();
    if read_len < profile.hash_span() {
        return best;
    }

    let converted = dna::convert_seq(read, genome.mode);
    let phases = SEED_PHASES.min(read_len - profile.hash_span() + 1);

    for phase in 0..phases {
        let seed = &converted[phase..];
        let Some(bucket) = index.bucket(profile.seed_hash(seed)) else {
            continue;
        };

        let weight = seed_length
            .min(profile.seed_weight)
            .min(SeedProfile::weight_for_span(seed.len()));
        let Some(region) = narrow::narrow_region(seed, bucket, genome, profile, weight) else {
            continue;
        };

        best = extend::extend_candidates(&converted, genome, bucket, region, phase as u32, best);
    }
    best
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
}

/// 一个 read 两条链尝试后的综合结果。
/// `strand` 仅在 `best.is_mapped()` 时有意义；两条链都未命中时保持默认的 Forward。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadMapping {
    pub strand: Strand,
    pub best: BestMatch,
}

/// 单 read 驱动：正链尝试后，用反向互补 read 继续同一个累加器
/// 做反链尝试，最优与并列计数跨两条链累积。最终记录若在反链
/// 尝试中被改写，则结果判为反链。
pub fn map_read(
    read: &[u8],
    genome: &Genome,
    index: &SeedIndex,
    seed_length: u32,
    max_mismatches: u32,
) -> ReadMapping {
    let forward = map_single_end(read, genome, index, seed_length, BestMatch::new(max_mismatches));

    let rc = dna::revcomp(read);
    let best = map_single_end(&rc, genome, index, seed_length, forward);

    let strand = if best == forward { Strand::Forward } else { Strand::Reverse };
    ReadMapping { strand, best }
}

/// 批量并行比对。Genome 与 SeedIndex 只读共享，
/// 每个 read 的 BestMatch 状态彼此独立，read 间无顺序约束。
pub fn map_batch(
    reads: &[Vec<u8>],
    genome: &Genome,
    index: &SeedIndex,
    seed_length: u32,
    max_mismatches: u32,
) -> Vec<ReadMapping> {
    reads
        .par_iter()
        .map(|read| map_read(read, genome, index, seed_length, max_mismatches))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::dna::Conversion;

    fn build<S: AsRef<[u8]>>(seqs: &[(&str, S)], profile: SeedProfile) -> (Genome, SeedIndex) {
        let genome = Genome::build(seqs, Conversion::CToT);
        let index = SeedIndex::build(&genome, profile);
        (genome, index)
    }

    fn make_reference(len: usize, seed: u32) -> Vec<u8> {
        let bases = [b'A', b'C', b'G', b'T'];
        let mut seq = Vec::with_capacity(len);
        let mut x = seed;
        for _ in 0..len {
            x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            seq.push(bases[(x >> 16) as usize % 4]);
        }
        seq
    }

    #[test]
    fn exact_read_maps_at_origin() {
        // 基因组 ACGTACGTTT，read ACGTACGT，相位 0 精确命中
        let profile = SeedProfile::new(2, 4); // hash_span 2, seed_span 6
        let (genome, index) = build(&[("chr0", b"ACGTACGTTT")], profile);
        let best = map_single_end(b"ACGTACGT", &genome, &index, 4, BestMatch::new(6));
        assert_eq!(best.chrom_id, 0);
        assert_eq!(best.offset, 0);
        assert_eq!(best.times, 1);
        assert_eq!(best.mismatch, 0);
    }

    #[test]
    fn mapping_is_idempotent() {
        let profile = SeedProfile::new(4, 6);
        let reference = make_reference(400, 11);
        let (genome, index) = build(&[("chr0", &reference[..])], profile);
        let read = reference[37..87].to_vec();
        let a = map_single_end(&read, &genome, &index, 6, BestMatch::new(6));
        let b = map_single_end(&read, &genome, &index, 6, BestMatch::new(6));
        assert_eq!(a, b);
        assert!(a.is_mapped());
    }

    #[test]
    fn read_shorter_than_hash_span_is_unmapped() {
        let profile = SeedProfile::new(4, 6); // hash_span 6
        let (genome, index) = build(&[("chr0", b"ACGTACGTACGTACGT")], profile);
        let best = map_single_end(b"ACGTA", &genome, &index, 6, BestMatch::new(6));
        assert!(!best.is_mapped());
        assert_eq!(best.mismatch, 6); // 哨兵未被触碰
    }

    #[test]
    fn read_of_exactly_hash_span_maps_via_single_phase() {
        let profile = SeedProfile::new(4, 6); // hash_span 6
        let (genome, index) = build(&[("chr0", b"AGTGGTAATTGGCCAATTGG")], profile);
        let best = map_single_end(b"AGTGGT", &genome, &index, 6, BestMatch::new(3));
        assert!(best.is_mapped());
        assert_eq!(best.offset, 0);
        assert_eq!(best.mismatch, 0);
    }

    #[test]
    fn two_equidistant_positions_are_reported_ambiguous() {
        let profile = SeedProfile::new(4, 6); // hash_span 6, seed_span 10
        let (genome, index) = build(&[("chr0", b"ACGTACGGGGACGTACGGGG")], profile);
        let best = map_single_end(b"ACGTAC", &genome, &index, 6, BestMatch::new(2));
        assert_eq!(best.mismatch, 0);
        assert_eq!(best.times, 2);
        // 后见者胜：记录的是第二个位置
        assert_eq!(best.offset, 10);
    }

    #[test]
    fn planted_mismatches_within_budget_are_found() {
        // read 取自基因组窗口并在相位 0 种子覆盖之外种入 2 个错配，
        // 相位 0 的种子干净，比对必须报出错配数 <= 2
        let profile = SeedProfile::new(4, 6); // 相位 0 比较位点最远到偏移 9
        let reference = make_reference(400, 99);
        let (genome, index) = build(&[("chr0", &reference[..])], profile);

        let origin = 120usize;
        let mut read = reference[origin..origin + 40].to_vec();
        for &i in &[17usize, 31] {
            // 换成转换空间下必然不同的碱基（避开 C/T 折叠）
            read[i] = if read[i] == b'A' { b'G' } else { b'A' };
        }

        let best = map_single_end(&read, &genome, &index, 6, BestMatch::new(6));
        assert!(best.is_mapped());
        assert!(best.mismatch <= 2);
    }

    #[test]
    fn unmethylated_read_maps_against_genomic_c() {
        // 基因组含 C，亚硫酸氢盐处理后 read 在同一位置读作 T：
        // 转换空间下两者等价，0 错配
        let profile = SeedProfile::new(4, 6);
        let (genome, index) = build(&[("chr0", b"AACGTCGGGGTTAAGGTTAA")], profile);
        let best = map_single_end(b"AATGTTGGGG", &genome, &index, 6, BestMatch::new(2));
        assert!(best.is_mapped());
        assert_eq!(best.offset, 0);
        assert_eq!(best.mismatch, 0);
    }

    #[test]
    fn g_to_a_wildcard_mode_maps_a_substituted_read() {
        // 通配模式下 read 中的 G 全部读作 A：转换空间内仍 0 错配
        let profile = SeedProfile::new(4, 6);
        let reference = make_reference(300, 77);
        let genome = Genome::build(&[("chr0", &reference[..])], Conversion::GToA);
        let index = SeedIndex::build(&genome, profile);

        let mut read = reference[100..130].to_vec();
        for b in &mut read {
            if *b == b'G' {
                *b = b'A';
            }
        }
        let best = map_single_end(&read, &genome, &index, 6, BestMatch::new(4));
        assert!(best.is_mapped());
        assert_eq!(best.offset, 100);
        assert_eq!(best.mismatch, 0);
    }

    #[test]
    fn later_phase_rescues_read_with_corrupted_head() {
        // 首碱基损坏：相位 0 的桶查不到，相位 1 的种子仍然干净
        let profile = SeedProfile::new(4, 6);
        let reference = make_reference(300, 5);
        let (genome, index) = build(&[("chr0", &reference[..])], profile);

        let origin = 57usize;
        let mut read = reference[origin - 1..origin + 29].to_vec();
        read[0] = if read[0] == b'A' { b'G' } else { b'A' };

        let best = map_single_end(&read, &genome, &index, 6, BestMatch::new(6));
        assert!(best.is_mapped());
        assert!(best.mismatch <= 1);
    }

    #[test]
    fn phase_underflow_at_chromosome_start_is_silent() {
        // read 去掉首碱基后恰好等于染色体开头：相位 1 命中的候选
        // 存储偏移为 0，起点下溢，必须静默跳过而不是 panic
        let profile = SeedProfile::new(4, 6);
        let reference = b"TGGTAGTTGAATTGGAATTGGAAG";
        let (genome, index) = build(&[("chr0", reference)], profile);
        let mut read = vec![b'A'];
        read.extend_from_slice(&reference[..9]);
        let best = map_single_end(&read, &genome, &index, 6, BestMatch::new(1));
        assert!(!best.is_mapped());
    }

    #[test]
    fn reverse_complement_read_is_detected() {
        let profile = SeedProfile::new(4, 6);
        let reference = make_reference(400, 21);
        let (genome, index) = build(&[("chr0", &reference[..])], profile);

        let window = reference[200..240].to_vec();
        let read = dna::revcomp(&window);
        let mapping = map_read(&read, &genome, &index, 6, 4);
        assert!(mapping.best.is_mapped());
        assert_eq!(mapping.strand, Strand::Reverse);
        assert_eq!(mapping.best.offset, 200);
        assert_eq!(mapping.best.mismatch, 0);
    }

    #[test]
    fn unmapped_read_keeps_default_forward_strand() {
        let profile = SeedProfile::new(4, 6);
        let (genome, index) = build(&[("chr0", b"AAAAAAAAAAAAAAAAAAAA")], profile);
        let mapping = map_read(b"GCGCGCGCGCGCGCGC", &genome, &index, 6, 0);
        assert!(!mapping.best.is_mapped());
        assert_eq!(mapping.strand, Strand::Forward);
    }

    #[test]
    fn batch_mapping_matches_sequential() {
        let profile = SeedProfile::new(4, 6);
        let reference = make_reference(600, 33);
        let (genome, index) = build(&[("chr0", &reference[..])], profile);

        let reads: Vec<Vec<u8>> = (0..20)
            .map(|i| reference[i * 25..i * 25 + 36].to_vec())
            .collect();
        let parallel = map_batch(&reads, &genome, &index, 6, 4);
        let sequential: Vec<ReadMapping> = reads
            .iter()
            .map(|r| map_read(r, &genome, &index, 6, 4))
            .collect();
        assert_eq!(parallel, sequential);
        assert!(parallel.iter().all(|m| m.best.is_mapped()));
    }
}
