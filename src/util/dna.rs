use serde::{Deserialize, Serialize};

pub const SIGMA: usize = 5; // {0:A, 1:C, 2:G, 3:T, 4:N}

/// N 的编码：哨兵值，与任何真实碱基都不相等，
/// 因此含 N 的位置在 hash 与比较中永远不会假匹配。
pub const BASE_N: u8 = 4;

#[inline]
pub fn encode(b: u8) -> u8 {
    match b.to_ascii_uppercase() {
        b'A' => 0,
        b'C' => 1,
        b'G' => 2,
        b'T' | b'U' => 3,
        _ => BASE_N, // map others to N
    }
}

#[inline]
pub fn decode(a: u8) -> u8 {
    match a {
        0 => b'A',
        1 => b'C',
        2 => b'G',
        3 => b'T',
        _ => b'N',
    }
}

/// 亚硫酸氢盐转换模式。
///
/// 索引构建端与比对端必须使用同一模式（版本化契约的一部分）：
/// - `CToT`：未甲基化的 C 测序后读作 T，read 与基因组中的 C 一律折叠为 T。
/// - `GToA`：互补链通配模式，G 折叠为 A。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Conversion {
    CToT,
    GToA,
}

impl Conversion {
    /// 对单个编码符号施加转换；N 保持哨兵值不变。
    #[inline]
    pub fn apply(self, code: u8) -> u8 {
        match self {
            Conversion::CToT if code == 1 => 3,
            Conversion::GToA if code == 2 => 0,
            _ => code,
        }
    }
}

/// 将 ASCII 序列编码并施加转换，返回派生副本（原序列不变）。
pub fn convert_seq(seq: &[u8], mode: Conversion) -> Vec<u8> {
    seq.iter().map(|&b| mode.apply(encode(b))).collect()
}

#[inline]
pub fn complement(base: u8) -> u8 {
    match base.to_ascii_uppercase() {
        b'A' => b'T',
        b'C' => b'G',
        b'G' => b'C',
        b'T' | b'U' => b'A',
        _ => b'N',
    }
}

/// 反向互补，供调用方产生反链尝试的 read。
pub fn revcomp(seq: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(seq.len());
    for &b in seq.iter().rev() {
        out.push(complement(b));
    }
    out
}
