//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `AppError` 枚举，三条变换链路（glass / puzzle / rainbow）
//! 的所有公开操作统一返回 `Result<T, AppError>`。
//!
//! 错误按“数据形态”分类而非按来源分类：输入缺失、解码失败、长度不一致、
//! 拼图参数错误。这些错误都是确定性的，调用侧无需重试。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `ImageError` 提供手写 `From` 转换：缺失/解码类错误折叠到对应的
//!   领域分支，其余保留为 `AppError::Image`。
//! - `std::io::Error` 通过 `#[from]` 自动上转。

use crate::image_handler::ImageError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 源文件或目录不存在
    #[error("输入不存在: {0}")]
    InputNotFound(String),

    /// 图片、透明度映射文本或 Base64 数据无法解析
    #[error("解码失败: {0}")]
    Decode(String),

    /// 数据长度与目标网格不一致
    #[error("长度不一致: 期望 {expected}，实际 {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// 拼图参数或碎片集合不合法
    #[error("拼图错误: {0}")]
    Partition(String),

    /// 其余图片编解码错误（编码、资源限制等）
    #[error("{0}")]
    Image(ImageError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 设置文件读写失败
    #[error("设置错误: {0}")]
    Settings(String),
}

impl From<ImageError> for AppError {
    fn from(error: ImageError) -> Self {
        match error {
            ImageError::NotFound(path) => AppError::InputNotFound(path),
            ImageError::Decode(msg) | ImageError::InvalidFormat(msg) => AppError::Decode(msg),
            other => AppError::Image(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_not_found_maps_to_input_not_found() {
        let err: AppError = ImageError::NotFound("a.png".to_string()).into();
        assert!(matches!(err, AppError::InputNotFound(ref p) if p == "a.png"));
    }

    #[test]
    fn image_decode_and_format_map_to_decode() {
        let err: AppError = ImageError::Decode("bad".to_string()).into();
        assert!(matches!(err, AppError::Decode(_)));

        let err: AppError = ImageError::InvalidFormat("bad".to_string()).into();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[test]
    fn other_image_errors_are_kept() {
        let err: AppError = ImageError::ResourceLimit("too big".to_string()).into();
        assert!(matches!(err, AppError::Image(ImageError::ResourceLimit(_))));
    }

    #[test]
    fn length_mismatch_message_names_both_sides() {
        let err = AppError::LengthMismatch { expected: 4, actual: 3 };
        let text = err.to_string();
        assert!(text.contains('4'));
        assert!(text.contains('3'));
    }
}
