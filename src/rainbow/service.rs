//! 字节彩虹图的文件级操作。

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::{GridLayout, decode, encode};
use crate::error::AppError;
use crate::grid::ChannelMode;
use crate::image_handler::ImageError;
use crate::service::MagicService;
use crate::storage;

/// `rainbow` 的产物。
#[derive(Debug, Clone)]
pub struct RainbowOutput {
    pub path: PathBuf,
    pub layout: GridLayout,
    /// 原文件字节数。
    pub payload_len: usize,
    pub elapsed: Duration,
}

impl MagicService {
    /// 将任意文件编码为 RGB 图片；默认输出 `<去掉扩展名的输入>.png`。
    pub fn rainbow(&self, file: &Path, output: Option<&Path>) -> Result<RainbowOutput, AppError> {
        let start = Instant::now();

        if !file.is_file() {
            return Err(AppError::InputNotFound(file.display().to_string()));
        }

        let max_file_size = self.images.config().max_file_size;
        let size = std::fs::metadata(file)?.len();
        if size > max_file_size {
            return Err(ImageError::ResourceLimit(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）",
                size as f64 / 1024.0 / 1024.0,
                max_file_size as f64 / 1024.0 / 1024.0
            ))
            .into());
        }

        let payload = std::fs::read(file)?;
        let layout = GridLayout::for_payload_len(payload.len())?;
        let grid = encode(&payload)?;

        let path = match output {
            Some(path) => path.to_path_buf(),
            None => {
                let default = storage::default_rainbow_output(file);
                match (&self.output_dir, default.file_name()) {
                    (Some(dir), Some(name)) => dir.join(name),
                    _ => default,
                }
            }
        };
        if path == file {
            log::warn!("⚠️ 输出路径与输入相同，将覆盖输入文件: {}", path.display());
        }

        self.images.save_grid(&grid, &path)?;

        let elapsed = start.elapsed();
        let (ratio_w, ratio_h) = layout.aspect_ratio();
        log::info!(
            "🌈 rainbow 完成 - {} ({} 字节) -> {} {}x{} ({}:{}) slack={} total={}ms",
            file.display(),
            payload.len(),
            path.display(),
            layout.width,
            layout.height,
            ratio_w,
            ratio_h,
            layout.slack_pixels(),
            elapsed.as_millis()
        );

        Ok(RainbowOutput {
            path,
            layout,
            payload_len: payload.len(),
            elapsed,
        })
    }

    /// 从彩虹图中还原原文件，返回写入的字节数。
    pub fn extract(&self, image: &Path, output: &Path) -> Result<usize, AppError> {
        let start = Instant::now();

        let grid = self.images.load_grid(image, ChannelMode::Rgb)?;
        let payload = decode(&grid)?;
        storage::write_atomic(output, &payload)?;

        log::info!(
            "🌈 extract 完成 - {} -> {} ({} 字节) total={}ms",
            image.display(),
            output.display(),
            payload.len(),
            start.elapsed().as_millis()
        );

        Ok(payload.len())
    }
}
