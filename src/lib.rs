//! # bsmap-rust
//!
//! Rust 版亚硫酸氢盐测序（BS-seq）read 比对核心。
//!
//! 本 crate 提供基于种子 hash 索引的甲基化测序比对功能，包括：
//!
//! - **核苷酸转换**：C→T（或互补的 G→A 通配模式）in-silico 转换，N 编码为独立哨兵
//! - **种子索引**：间隔种子 hash 桶 + 比较键预排序（构建端与比对端共享版本化布局契约）
//! - **区间收缩**：预排序桶内的逐位二分收缩（binary-search narrowing）
//! - **延伸选优**：错配计数 + 分支限界剪枝 + 最优/并列记录
//!
//! ## 快速示例
//!
//! ```rust
//! use bsmap_rust::index::genome::Genome;
//! use bsmap_rust::index::hash::SeedIndex;
//! use bsmap_rust::index::profile::SeedProfile;
//! use bsmap_rust::map::{map_single_end, BestMatch};
//! use bsmap_rust::util::dna::Conversion;
//!
//! // 构建基因组与种子索引（两侧使用同一转换模式与种子布局）
//! let genome = Genome::build(&[("chr1", b"ACGTACGTTT")], Conversion::CToT);
//! let index = SeedIndex::build(&genome, SeedProfile::new(2, 4));
//!
//! // 单端比对：最优记录作为折叠累加器穿过种子相位循环
//! let best = map_single_end(b"ACGTACGT", &genome, &index, 4, BestMatch::new(6));
//! assert!(best.is_mapped());
//! assert_eq!((best.chrom_id, best.offset, best.times, best.mismatch), (0, 0, 1, 0));
//! ```
//!
//! ## 模块说明
//!
//! - [`util`] — 核苷酸编码 / 亚硫酸氢盐转换 / 反向互补
//! - [`index`] — 基因组存储、种子布局契约与 hash 桶索引构建
//! - [`map`] — 区间收缩、延伸选优与单端 / 批量比对编排

pub mod index;
pub mod map;
pub mod util;
