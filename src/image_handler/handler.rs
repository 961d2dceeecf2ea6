//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `ImageHandler` 是三条变换链路与图片文件之间唯一的接触面，只暴露两件事：
//! 1. 读取：路径 → 指定通道模式的 `PixelGrid`
//! 2. 写入：`PixelGrid` → 无损 PNG 文件（原子替换）
//!
//! ## 实现思路
//!
//! - 加载与解码分别由 `loader` / `pipeline` 子模块实现（`impl ImageHandler` 分散在各文件）。
//! - 写入先在内存中完成编码，再交给 `storage::write_atomic`，避免留下半写文件。
//! - 记录 `load/decode/encode/write` 阶段耗时，便于性能诊断。

use std::path::Path;
use std::time::Instant;

use super::{ImageConfig, ImageError};
use crate::grid::{ChannelMode, PixelGrid};
use crate::storage;

/// 图片读写处理器。
#[derive(Debug, Clone, Default)]
pub struct ImageHandler {
    pub(super) config: ImageConfig,
}

impl ImageHandler {
    /// 根据配置创建处理器。
    ///
    /// # 示例
    /// ```rust
    /// use magics::image_handler::{ImageConfig, ImageHandler};
    ///
    /// let handler = ImageHandler::new(ImageConfig::default());
    /// assert_eq!(handler.config().max_decoded_pixels, 40_000_000);
    /// ```
    pub fn new(config: ImageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ImageConfig {
        &self.config
    }

    /// 读取图片文件并转换为指定通道模式。
    pub fn load_grid(&self, path: &Path, mode: ChannelMode) -> Result<PixelGrid, ImageError> {
        let load_start = Instant::now();
        let raw = self.load_from_file(path, &self.config)?;
        let load_elapsed = load_start.elapsed();

        let decode_start = Instant::now();
        let grid = self.decode_to_grid(raw, mode, &self.config)?;
        let decode_elapsed = decode_start.elapsed();

        log::info!(
            "🖼️ 已读取图片 {} - {}x{} load={}ms decode={}ms",
            path.display(),
            grid.width(),
            grid.height(),
            load_elapsed.as_millis(),
            decode_elapsed.as_millis()
        );

        Ok(grid)
    }

    /// 将像素网格写为 PNG 文件。
    pub fn save_grid(&self, grid: &PixelGrid, path: &Path) -> Result<(), ImageError> {
        let encode_start = Instant::now();
        let bytes = self.encode_png(grid, &self.config)?;
        let encode_elapsed = encode_start.elapsed();

        let write_start = Instant::now();
        storage::write_atomic(path, &bytes)
            .map_err(|e| ImageError::FileSystem(format!("写入图片失败：{}", e)))?;
        let write_elapsed = write_start.elapsed();

        log::info!(
            "💾 已写入图片 {} - {}x{} {} 字节 encode={}ms write={}ms",
            path.display(),
            grid.width(),
            grid.height(),
            bytes.len(),
            encode_elapsed.as_millis(),
            write_elapsed.as_millis()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn unique_temp_dir() -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock error")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("magics-image-handler-test-{nanos}"));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn save_and_load_rgba_roundtrip() {
        let dir = unique_temp_dir();
        let path = dir.join("grid.png");
        let data: Vec<u8> = (0..4 * 6).map(|i| (i * 11) as u8).collect();
        let grid = PixelGrid::from_raw(3, 2, ChannelMode::Rgba, data).unwrap();

        let handler = ImageHandler::default();
        handler.save_grid(&grid, &path).expect("save grid");
        let loaded = handler.load_grid(&path, ChannelMode::Rgba).expect("load grid");

        assert_eq!(loaded, grid);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = unique_temp_dir();
        let handler = ImageHandler::default();
        let err = handler
            .load_grid(&dir.join("missing.png"), ChannelMode::Rgb)
            .unwrap_err();

        assert!(matches!(err, ImageError::NotFound(_)));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn load_non_image_is_rejected() {
        let dir = unique_temp_dir();
        let path = dir.join("not-an-image.png");
        std::fs::write(&path, b"definitely not a png").expect("write file");

        let err = ImageHandler::default()
            .load_grid(&path, ChannelMode::Rgba)
            .unwrap_err();
        assert!(matches!(
            err,
            ImageError::InvalidFormat(_) | ImageError::Decode(_)
        ));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn pixel_limit_rejects_large_image() {
        let dir = unique_temp_dir();
        let path = dir.join("big.png");
        let grid = PixelGrid::new(10, 10, ChannelMode::Rgb);
        ImageHandler::default().save_grid(&grid, &path).expect("save grid");

        let handler = ImageHandler::new(ImageConfig {
            max_decoded_pixels: 99,
            ..ImageConfig::default()
        });
        let err = handler.load_grid(&path, ChannelMode::Rgb).unwrap_err();

        assert!(matches!(err, ImageError::ResourceLimit(_)));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn file_size_limit_rejects_before_decode() {
        let dir = unique_temp_dir();
        let path = dir.join("small.png");
        let grid = PixelGrid::new(4, 4, ChannelMode::Rgb);
        ImageHandler::default().save_grid(&grid, &path).expect("save grid");

        let handler = ImageHandler::new(ImageConfig {
            max_file_size: 8,
            ..ImageConfig::default()
        });
        let err = handler.load_grid(&path, ChannelMode::Rgb).unwrap_err();

        assert!(matches!(err, ImageError::ResourceLimit(_)));
        let _ = std::fs::remove_dir_all(dir);
    }
}
