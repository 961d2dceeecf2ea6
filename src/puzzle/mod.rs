//! # 像素拼图模块（puzzle）
//!
//! ## 设计思路
//!
//! 把一张图拆成 N 块碎片：每块隐藏约 `W×H / N` 个随机像素（置为全透明），
//! 其余像素与原图一致。每个像素恰好在一块碎片中被隐藏，
//! 因此 N ≥ 2 时把所有碎片按任意顺序叠加都能还原原图。
//!
//! - `partition`：下标洗牌与分段（`PartitionIndex`）
//! - `codec`：碎片生成与 source-over 叠加
//! - `service`：文件级操作（`MagicService::disassemble` / `assemble`）

mod codec;
mod partition;
mod service;

pub use codec::{assemble, composite_over, disassemble, disassemble_with_rng, mask_piece};
pub use partition::{PartitionIndex, seeded_rng};
pub use service::{AssembleOutput, PuzzleOutput};
