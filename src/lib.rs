//! # magics — 可逆的图片/字节网格变换
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    CLI (main.rs, clap)                   │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↓ Result<T, AppError>
//! ┌───────┴──────────────────────────────────────────────────┐
//! │  service ──── MagicService（文件级入口，持有协作方）     │
//! │  │                                                       │
//! │  ├─ glass ──────── 透明度 → 游程映射（split / combine）   │
//! │  ├─ puzzle ─────── 像素下标划分 → N 块碎片 / 叠加还原    │
//! │  ├─ rainbow ────── 字节 → Base64 → RGB 网格 / 还原       │
//! │  │                                                       │
//! │  ├─ grid            PixelGrid（三条链路共用的像素模型）   │
//! │  ├─ image_handler   图片文件读写（image crate）           │
//! │  ├─ storage         原子写入、输出路径、碎片目录          │
//! │  ├─ identifier      产物标识生成                          │
//! │  ├─ settings        JSON 设置文件                         │
//! │  └─ error           AppError（统一错误类型）              │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`glass`] | 剥离/恢复逐像素透明度，游程映射的格式化与解析 |
//! | [`puzzle`] | 按可复现的随机排列拆分碎片，source-over 叠加还原 |
//! | [`rainbow`] | 任意文件字节与 RGB 图片之间的互转，画布尺寸推导 |
//! | [`grid`] | 行优先像素网格 `PixelGrid` |
//! | [`image_handler`] | 路径 → `PixelGrid`，`PixelGrid` → PNG |
//! | [`service`] | `MagicService`：三条链路的文件级操作 |
//! | [`storage`] | 临时文件 + 重命名写入、输出目录解析、碎片发现 |
//! | [`identifier`] | `IdGenerator` 能力与随机实现 |
//! | [`settings`] | 设置文件读写与默认值回退 |
//! | [`error`] | 统一错误类型 `AppError` |
//!
//! 三条链路互不依赖，核心算法只处理内存中的数据，
//! 文件读写全部经由 `image_handler` 与 `storage`。

pub mod error;
pub mod glass;
pub mod grid;
pub mod identifier;
pub mod image_handler;
pub mod puzzle;
pub mod rainbow;
pub mod service;
pub mod settings;
pub mod storage;

pub use error::AppError;
pub use grid::{ChannelMode, PixelGrid};
pub use service::MagicService;
