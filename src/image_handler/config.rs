//! # 配置模块
//!
//! ## 设计思路
//!
//! 将图片读写的“可调策略”集中到 `ImageConfig`：读取阶段的体积与像素上限，
//! 写入阶段的 PNG 压缩档位。
//!
//! ## 实现思路
//!
//! - `Default` 提供可直接使用的平衡配置。
//! - `PngProfile` 负责档位字符串解析与反向输出。
//! - `png_options` 将档位映射到 `image` crate 的压缩参数。
//!
//! 所有档位都是无损的，只影响输出体积与编码耗时。

use image::codecs::png::{CompressionType, FilterType};

use super::ImageError;

/// 图片读写配置。
#[derive(Debug, Clone)]
pub struct ImageConfig {
    /// 读取源文件时允许的最大文件体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// PNG 输出压缩档位。
    pub png_profile: PngProfile,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_file_size: 64 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
            png_profile: PngProfile::Balanced,
        }
    }
}

/// PNG 压缩档位。
///
/// - `Fast`：优先编码速度
/// - `Balanced`：体积与速度平衡
/// - `Best`：优先输出体积
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngProfile {
    Fast,
    Balanced,
    Best,
}

impl PngProfile {
    /// 从外部字符串解析档位。
    ///
    /// # 示例
    /// ```rust
    /// use magics::image_handler::PngProfile;
    ///
    /// let p = PngProfile::from_str("best")?;
    /// assert_eq!(p.as_str(), "best");
    /// # Ok::<(), magics::image_handler::ImageError>(())
    /// ```
    pub fn from_str(profile: &str) -> Result<Self, ImageError> {
        match profile.trim().to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "balanced" => Ok(Self::Balanced),
            "best" => Ok(Self::Best),
            other => Err(ImageError::InvalidFormat(format!(
                "未知压缩档位：{}（可选：fast / balanced / best）",
                other
            ))),
        }
    }

    /// 将档位输出为稳定字符串，供设置文件持久化。
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Best => "best",
        }
    }

    /// 档位对应的 PNG 压缩参数。
    pub(crate) fn png_options(self) -> (CompressionType, FilterType) {
        match self {
            Self::Fast => (CompressionType::Fast, FilterType::NoFilter),
            Self::Balanced => (CompressionType::Default, FilterType::Adaptive),
            Self::Best => (CompressionType::Best, FilterType::Adaptive),
        }
    }
}
