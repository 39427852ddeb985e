use serde::{Deserialize, Serialize};

use crate::util::dna;

/// 索引文件格式版本，加载时校验。
/// 种子布局或符号序任何一侧变化都必须递增此值。
pub const INDEX_FORMAT_VERSION: u32 = 1;

/// 种子布局契约：索引构建端与比对端共享的不可变配置。
///
/// 种子采用周期为 4 的 `1100` 间隔模式：第 i 个种子位点落在
/// read 偏移 `(i/2)*4 + i%2` 处。前 `hash_weight` 个位点折叠进桶
/// hash；`hash_weight..seed_weight` 的位点构成桶内排序键，也是
/// narrowing 的逐位比较序列。两侧布局不一致会静默破坏 narrowing
/// 的正确性，因此该结构体随索引一起序列化并做版本校验。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedProfile {
    /// 参与桶 hash 的种子位点数（<= 13，保证 hash 值落在 u32 内）
    pub hash_weight: u32,
    /// narrowing 最多比较到的种子位点总数
    pub seed_weight: u32,
}

impl Default for SeedProfile {
    fn default() -> Self {
        Self::new(12, 26)
    }
}

impl SeedProfile {
    pub fn new(hash_weight: u32, seed_weight: u32) -> Self {
        assert!(hash_weight > 0 && hash_weight <= 13, "hash_weight must be in 1..=13");
        assert!(seed_weight >= hash_weight, "seed_weight must cover the hashed positions");
        Self { hash_weight, seed_weight }
    }

    /// 第 i 个种子位点在 read（或基因组窗口）中的偏移。
    #[inline]
    pub fn seed_offset(i: u32) -> u32 {
        (i / 2) * 4 + (i % 2)
    }

    /// 前 weight 个种子位点覆盖的前缀宽度。
    #[inline]
    fn span(weight: u32) -> usize {
        if weight == 0 {
            0
        } else {
            Self::seed_offset(weight - 1) as usize + 1
        }
    }

    /// hash 覆盖的 read 前缀宽度（规格中的 "hash width"）。
    #[inline]
    pub fn hash_span(&self) -> usize {
        Self::span(self.hash_weight)
    }

    /// 完整种子覆盖的前缀宽度。
    #[inline]
    pub fn seed_span(&self) -> usize {
        Self::span(self.seed_weight)
    }

    /// 宽度为 span 的窗口能容纳的种子位点数。
    #[inline]
    pub fn weight_for_span(span: usize) -> u32 {
        ((span / 4) * 2 + (span % 4).min(2)) as u32
    }

    /// 对种子前缀计算确定性 hash：前 hash_weight 个位点的
    /// 符号按 SIGMA 进制折叠。调用方保证 seed 至少覆盖 hash_span。
    #[inline]
    pub fn seed_hash(&self, seed: &[u8]) -> u32 {
        let mut h = 0u32;
        for i in 0..self.hash_weight {
            h = h * dna::SIGMA as u32 + u32::from(seed[Self::seed_offset(i) as usize]);
        }
        h
    }
}
