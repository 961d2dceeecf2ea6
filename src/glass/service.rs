//! 透明度映射的文件级操作。

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::{AlphaMap, combine, split};
use crate::error::AppError;
use crate::grid::ChannelMode;
use crate::service::MagicService;
use crate::storage;

/// `glassify` 的产物。
#[derive(Debug, Clone)]
pub struct GlassOutput {
    pub id: String,
    /// 透明度全为 0 的图片 `<id>.png`。
    pub image_path: PathBuf,
    /// 透明度映射文件 `<id>.map`。
    pub map_path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// 映射中的游程数。
    pub runs: usize,
    pub elapsed: Duration,
}

impl MagicService {
    /// 剥离图片透明度：输出透明图片与映射文件。
    pub fn glassify(&self, image: &Path) -> Result<GlassOutput, AppError> {
        let start = Instant::now();
        let id = self.ids.generate_id();

        let grid = self.images.load_grid(image, ChannelMode::Rgba)?;
        let (glass, map) = split(&grid);

        let dir = self.output_dir_for(image);
        let image_path = dir.join(format!("{id}.png"));
        let map_path = dir.join(format!("{id}.map"));

        storage::write_atomic(&map_path, map.to_string().as_bytes())?;
        self.images.save_grid(&glass, &image_path)?;

        let elapsed = start.elapsed();
        log::info!(
            "🪟 glassify 完成 - id={} {}x{} runs={} total={}ms",
            id,
            grid.width(),
            grid.height(),
            map.runs().len(),
            elapsed.as_millis()
        );

        Ok(GlassOutput {
            id,
            image_path,
            map_path,
            width: grid.width(),
            height: grid.height(),
            runs: map.runs().len(),
            elapsed,
        })
    }

    /// 按映射文件恢复透明度；未指定输出路径时覆盖输入图片。
    pub fn clearify(
        &self,
        image: &Path,
        map_file: &Path,
        output: Option<&Path>,
    ) -> Result<PathBuf, AppError> {
        let start = Instant::now();

        if !map_file.exists() {
            return Err(AppError::InputNotFound(map_file.display().to_string()));
        }
        let text = String::from_utf8(std::fs::read(map_file)?).map_err(|e| {
            AppError::Decode(format!("透明度映射不是有效的 UTF-8 文本：{}", e))
        })?;
        let map = AlphaMap::parse(&text)?;

        let grid = self.images.load_grid(image, ChannelMode::Rgba)?;
        let restored = combine(&grid, &map)?;

        let output = output.map_or_else(|| image.to_path_buf(), Path::to_path_buf);
        self.images.save_grid(&restored, &output)?;

        log::info!(
            "🪟 clearify 完成 - {} -> {} total={}ms",
            image.display(),
            output.display(),
            start.elapsed().as_millis()
        );

        Ok(output)
    }
}
