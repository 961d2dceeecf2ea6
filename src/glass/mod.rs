//! # 透明度映射模块（glass）
//!
//! ## 设计思路
//!
//! 将每个像素的透明度“搬走”：图片保留 RGB、透明度统一置 0，
//! 原透明度按游程压缩为映射文本单独保存。两者合并即可无损还原。
//!
//! ```text
//! |R|G|B|A| |R|G|B|A|          |R|G|B|0| |R|G|B|0|
//! |R|G|B|A| |R|G|B|A|   ──→    |R|G|B|0| |R|G|B|0|   +   A[n]A[n]...
//! ```
//!
//! - `alpha_map`：游程记录、文本格式化与解析
//! - `codec`：拆分 / 合并
//! - `service`：文件级操作（`MagicService::glassify` / `clearify`）

mod alpha_map;
mod codec;
mod service;

pub use alpha_map::{AlphaMap, AlphaRun, deformat, format};
pub use codec::{combine, split};
pub use service::GlassOutput;
