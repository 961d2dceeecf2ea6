//! # 图片读写模块（image_handler）
//!
//! ## 设计思路
//!
//! 三条变换链路只在内存中的 `PixelGrid` 上工作，图片文件的读写统一收口到这里，
//! 并按职责拆分为多个子模块：
//!
//! - `handler`：编排读取/写入流程（`ImageHandler`）
//! - `loader`：存在性与体积校验、读取原始字节
//! - `pipeline`：解码、像素限制、通道转换与 PNG 编码
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 调用链
//!
//! ```text
//! load_grid(path, mode)
//!    ├─ loader.rs（存在性 + 体积校验 + 读取）
//!    └─ pipeline.rs（格式识别 + 像素限制 + 解码 + 通道转换）
//!
//! save_grid(grid, path)
//!    ├─ pipeline.rs（PNG 编码）
//!    └─ storage::write_atomic（临时文件 + 重命名）
//! ```

mod config;
mod error;
mod handler;
mod loader;
mod pipeline;
mod source;

pub use config::{ImageConfig, PngProfile};
pub use error::ImageError;
pub use handler::ImageHandler;
