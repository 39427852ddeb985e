use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::util::dna::{self, Conversion};

/// 单条染色体：编码并施加过转换的符号缓冲区，载入后只读。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chromosome {
    pub name: String,
    /// 转换空间下的符号编码（非 ASCII）
    pub seq: Vec<u8>,
}

impl Chromosome {
    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
}

/// 基因组中的一个候选位置。值类型，桶内按比较键序列预排序存放。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenomePosition {
    pub chrom_id: u32,
    pub offset: u32,
}

/// 基因组存储：按染色体编号索引的只读缓冲区集合。
///
/// 序列在构建时编码并施加亚硫酸氢盐转换；`mode` 一并记录，
/// 比对端用同一模式转换 read（两侧模式不一致属于契约违反）。
#[derive(Debug, Serialize, Deserialize)]
pub struct Genome {
    pub mode: Conversion,
    pub chroms: Vec<Chromosome>,
}

impl Genome {
    /// 从 (名称, ASCII 序列) 记录构建；构建完成后不再修改。
    pub fn build<S: AsRef<[u8]>>(records: &[(&str, S)], mode: Conversion) -> Self {
        let chroms = records
            .iter()
            .map(|(name, seq)| Chromosome {
                name: (*name).to_string(),
                seq: dna::convert_seq(seq.as_ref(), mode),
            })
            .collect();
        Self { mode, chroms }
    }

    #[inline]
    pub fn chrom(&self, chrom_id: u32) -> &Chromosome {
        &self.chroms[chrom_id as usize]
    }

    /// 候选位置向后偏移 delta 处的符号。
    /// 前置条件：delta 落在索引保证的种子覆盖范围内。
    #[inline]
    pub fn symbol_at(&self, pos: GenomePosition, delta: u32) -> u8 {
        self.chrom(pos.chrom_id).seq[(pos.offset + delta) as usize]
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let mut f = std::fs::File::create(path)?;
        bincode::serialize_into(&mut f, self)?;
        Ok(())
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let f = std::fs::File::open(path)?;
        let g: Self = bincode::deserialize_from(f)?;
        Ok(g)
    }
}
