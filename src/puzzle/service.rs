//! 拼图的文件级操作。
//!
//! 碎片目录布局：
//!
//! ```text
//! <目录>/2d8aa42a0347c2d66cc86a0138dc9664/
//!     1.png   <-- 碎片 1
//!     2.png   <-- 碎片 2
//!     ...
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::partition::{PartitionIndex, seeded_rng};
use super::{composite_over, mask_piece};
use crate::error::AppError;
use crate::grid::{ChannelMode, PixelGrid};
use crate::service::MagicService;
use crate::storage;

/// `disassemble` 的产物。
#[derive(Debug, Clone)]
pub struct PuzzleOutput {
    pub id: String,
    /// 碎片目录 `<目录>/<id>`。
    pub dir: PathBuf,
    /// 按编号排列的碎片路径。
    pub pieces: Vec<PathBuf>,
    pub elapsed: Duration,
}

/// `assemble` 的产物。
#[derive(Debug, Clone)]
pub struct AssembleOutput {
    pub id: String,
    pub path: PathBuf,
    /// 参与拼合的碎片数量。
    pub pieces: usize,
    pub elapsed: Duration,
}

impl MagicService {
    /// 将图片拆分为 `pieces` 块碎片，写入新的碎片目录。
    ///
    /// 碎片逐块生成、逐块写出，内存中只保留源图与当前碎片。
    pub fn disassemble(
        &self,
        image: &Path,
        pieces: usize,
        seed: Option<u64>,
    ) -> Result<PuzzleOutput, AppError> {
        let start = Instant::now();
        let id = self.ids.generate_id();

        let grid = self.images.load_grid(image, ChannelMode::Rgba)?;
        let index = PartitionIndex::new(grid.pixel_count(), pieces, &mut seeded_rng(seed))?;
        if pieces == 1 {
            log::warn!("碎片数量为 1：唯一碎片将完全透明");
        }

        let base = self.output_dir_for(image);
        let staging = storage::create_staging_dir(&base, &id)?;
        let names = match self.write_pieces(&grid, &index, &staging) {
            Ok(names) => names,
            Err(err) => {
                log::error!("❌ 碎片写入失败，清理暂存目录: {}", staging.display());
                storage::discard_dir(&staging);
                return Err(err);
            }
        };
        let dir = storage::publish_dir(&staging, &base, &id)?;
        let paths: Vec<PathBuf> = names.iter().map(|name| dir.join(name)).collect();

        let elapsed = start.elapsed();
        log::info!(
            "🧩 disassemble 完成 - id={} {}x{} pieces={} per_slice={} seeded={} total={}ms",
            id,
            grid.width(),
            grid.height(),
            pieces,
            index.per_slice(),
            seed.is_some(),
            elapsed.as_millis()
        );

        Ok(PuzzleOutput {
            id,
            dir,
            pieces: paths,
            elapsed,
        })
    }

    /// 逐块生成并写出碎片，返回文件名列表。
    fn write_pieces(
        &self,
        grid: &PixelGrid,
        index: &PartitionIndex,
        dir: &Path,
    ) -> Result<Vec<String>, AppError> {
        let mut names = Vec::with_capacity(index.pieces());
        for (m, hidden) in index.slices().enumerate() {
            let piece = mask_piece(grid, hidden);
            let name = storage::piece_file_name(m);
            self.images.save_grid(&piece, &dir.join(&name))?;
            names.push(name);
        }
        Ok(names)
    }

    /// 按编号升序叠加目录中的碎片；未指定输出路径时写到 `<id>.png`。
    pub fn assemble(&self, dir: &Path, output: Option<&Path>) -> Result<AssembleOutput, AppError> {
        let start = Instant::now();

        if !dir.is_dir() {
            return Err(AppError::InputNotFound(dir.display().to_string()));
        }

        let paths = storage::discover_pieces(dir)?;
        if paths.is_empty() {
            return Err(AppError::Partition(format!(
                "目录中没有碎片文件：{}",
                dir.display()
            )));
        }

        let mut canvas: Option<PixelGrid> = None;
        for path in &paths {
            let piece = self.images.load_grid(path, ChannelMode::Rgba)?;
            let canvas = canvas.get_or_insert_with(|| {
                PixelGrid::new(piece.width(), piece.height(), ChannelMode::Rgba)
            });
            composite_over(canvas, &piece).map_err(|err| match err {
                AppError::Partition(msg) => {
                    AppError::Partition(format!("{}：{}", path.display(), msg))
                }
                other => other,
            })?;
        }
        let canvas = canvas.ok_or_else(|| AppError::Partition("没有可拼合的碎片".to_string()))?;

        let id = self.ids.generate_id();
        let path = match output {
            Some(path) => path.to_path_buf(),
            None => self.output_dir_for(dir).join(format!("{id}.png")),
        };
        self.images.save_grid(&canvas, &path)?;

        let elapsed = start.elapsed();
        log::info!(
            "🧩 assemble 完成 - id={} pieces={} -> {} total={}ms",
            id,
            paths.len(),
            path.display(),
            elapsed.as_millis()
        );

        Ok(AssembleOutput {
            id,
            path,
            pieces: paths.len(),
            elapsed,
        })
    }
}
