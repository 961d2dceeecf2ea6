//! # 中间数据模型
//!
//! ## 设计思路
//!
//! 将“已加载但未解码的字节”与解码后的 `PixelGrid` 解耦，
//! 加载阶段只关心文件与体积，解码阶段只关心格式与像素。

/// 加载阶段输出：原始图片字节与来源路径。
pub(crate) struct RawImageData {
    /// 原始图片字节。
    pub(crate) bytes: Vec<u8>,
    /// 来源路径（用于日志与诊断）。
    pub(crate) source_hint: String,
}
