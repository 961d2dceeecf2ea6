//! # 解码与编码流水线模块
//!
//! ## 设计思路
//!
//! 将“字节 ↔ 图像 ↔ PixelGrid”的过程集中管理，并在关键节点增加资源上限控制。
//! 优先做尺寸检查，再进行完整解码，降低异常输入触发高内存开销的风险。
//!
//! ## 实现思路
//!
//! 解码：
//! 1. 猜测格式并读取 header 尺寸
//! 2. 按像素上限快速拒绝
//! 3. 完整解码
//! 4. 转换到目标通道模式，并校验字节长度一致性
//!
//! 编码：统一输出无损 PNG，压缩参数由 `PngProfile` 决定。

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, GenericImageView, ImageEncoder};
use std::io::Cursor;

use super::source::RawImageData;
use super::{ImageConfig, ImageError, ImageHandler};
use crate::grid::{ChannelMode, PixelGrid};

impl ImageHandler {
    /// 将原始字节解码为指定通道模式的像素网格。
    pub(super) fn decode_to_grid(
        &self,
        raw: RawImageData,
        mode: ChannelMode,
        config: &ImageConfig,
    ) -> Result<PixelGrid, ImageError> {
        image::guess_format(&raw.bytes)
            .map_err(|e| ImageError::InvalidFormat(format!("不支持的图片格式：{}", e)))?;

        let (header_width, header_height) = Self::inspect_dimensions_from_memory(&raw.bytes)?;
        self.validate_pixel_limits(config, header_width, header_height)?;

        let decoded = image::load_from_memory(&raw.bytes)
            .map_err(|e| ImageError::Decode(format!("图片解码失败：{}", e)))?;

        let (width, height) = decoded.dimensions();
        self.validate_pixel_limits(config, width, height)?;

        let bytes = match mode {
            ChannelMode::Rgb => decoded.to_rgb8().into_raw(),
            ChannelMode::Rgba => decoded.to_rgba8().into_raw(),
        };

        let grid = PixelGrid::from_raw(width, height, mode, bytes)
            .map_err(|_| ImageError::Decode("解码后像素数据长度异常".to_string()))?;

        log::debug!(
            "✅ 图片解码成功 - 来源: {} 尺寸: {}x{} 模式: {:?}",
            raw.source_hint,
            width,
            height,
            mode
        );

        Ok(grid)
    }

    /// 将像素网格编码为 PNG 字节。
    pub(super) fn encode_png(
        &self,
        grid: &PixelGrid,
        config: &ImageConfig,
    ) -> Result<Vec<u8>, ImageError> {
        let color = match grid.mode() {
            ChannelMode::Rgb => ExtendedColorType::Rgb8,
            ChannelMode::Rgba => ExtendedColorType::Rgba8,
        };
        let (compression, filter) = config.png_profile.png_options();

        let mut bytes = Vec::new();
        PngEncoder::new_with_quality(&mut bytes, compression, filter)
            .write_image(grid.as_raw(), grid.width(), grid.height(), color)
            .map_err(|e| ImageError::Encode(format!("PNG 编码失败：{}", e)))?;

        Ok(bytes)
    }

    /// 仅通过内存中的图片头信息读取宽高。
    ///
    /// 用于在完整解码前做像素限制检查。
    fn inspect_dimensions_from_memory(bytes: &[u8]) -> Result<(u32, u32), ImageError> {
        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| ImageError::InvalidFormat(format!("无法识别图片格式：{}", e)))?;

        reader
            .into_dimensions()
            .map_err(|e| ImageError::Decode(format!("无法读取图片尺寸：{}", e)))
    }

    /// 校验像素数量是否超过配置上限。
    fn validate_pixel_limits(
        &self,
        config: &ImageConfig,
        width: u32,
        height: u32,
    ) -> Result<(), ImageError> {
        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| ImageError::ResourceLimit("图片像素数溢出".to_string()))?;

        if pixels > config.max_decoded_pixels {
            return Err(ImageError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, config.max_decoded_pixels
            )));
        }

        Ok(())
    }
}
