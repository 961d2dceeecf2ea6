//! # 字节彩虹模块（rainbow）
//!
//! ## 设计思路
//!
//! 文件的每个字节依次落入一个 RGB 通道，而不是一个字节占满整个像素：
//!
//! ```text
//! 是这样：                      不是这样：
//! |1|2|3| |4|5|6| |7|8|9|      |1|1|1| |2|2|2| |3|3|3|
//! ```
//!
//! 写入前先做 Base64 编码，让长度对齐、内容落在可打印字节范围内；
//! 还原时展开像素、去掉末尾 0 填充、Base64 解码。
//!
//! - `layout`：由补齐长度推导宽高与宽高比
//! - `codec`：编码 / 解码
//! - `service`：文件级操作（`MagicService::rainbow` / `extract`）

mod codec;
mod layout;
mod service;

pub use codec::{decode, encode};
pub use layout::{CHANNELS, GridLayout, aspect_ratio, base64_len, height, padded_len, width};
pub use service::RainbowOutput;
