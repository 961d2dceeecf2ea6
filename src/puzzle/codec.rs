//! 拆分为碎片、按顺序叠加还原。

use rand::Rng;

use super::partition::{PartitionIndex, seeded_rng};
use crate::error::AppError;
use crate::grid::{ChannelMode, PixelGrid};

/// 拆分为 `pieces` 块碎片；给定种子时结果可复现。
pub fn disassemble(
    grid: &PixelGrid,
    pieces: usize,
    seed: Option<u64>,
) -> Result<Vec<PixelGrid>, AppError> {
    disassemble_with_rng(grid, pieces, &mut seeded_rng(seed))
}

/// 使用调用方提供的随机源拆分。
///
/// `pieces == 1` 时唯一的碎片完全透明，拼合结果也完全透明。
pub fn disassemble_with_rng<R: Rng + ?Sized>(
    grid: &PixelGrid,
    pieces: usize,
    rng: &mut R,
) -> Result<Vec<PixelGrid>, AppError> {
    let index = PartitionIndex::new(grid.pixel_count(), pieces, rng)?;
    if pieces == 1 {
        log::warn!("碎片数量为 1：唯一碎片将完全透明");
    }

    let source = grid.to_rgba();
    Ok(index
        .slices()
        .map(|hidden| mask_piece(&source, hidden))
        .collect())
}

/// 复制源图，并把 `hidden` 中的像素整体置为 `(0, 0, 0, 0)`。
pub fn mask_piece(source: &PixelGrid, hidden: &[usize]) -> PixelGrid {
    let mut piece = source.to_rgba();
    for &index in hidden {
        piece.pixel_mut(index).fill(0);
    }
    piece
}

/// 从透明画布开始，按给定顺序逐块叠加。
pub fn assemble(pieces: &[PixelGrid]) -> Result<PixelGrid, AppError> {
    let first = pieces
        .first()
        .ok_or_else(|| AppError::Partition("没有可拼合的碎片".to_string()))?;

    let mut canvas = PixelGrid::new(first.width(), first.height(), ChannelMode::Rgba);
    for piece in pieces {
        composite_over(&mut canvas, piece)?;
    }

    Ok(canvas)
}

/// source-over 叠加：不透明像素覆盖，透明像素保持画布不变。
///
/// `canvas` 必须是 RGBA；尺寸不一致时返回 `Partition` 错误。
pub fn composite_over(canvas: &mut PixelGrid, piece: &PixelGrid) -> Result<(), AppError> {
    if !canvas.same_dimensions(piece) {
        return Err(AppError::Partition(format!(
            "碎片尺寸 {}x{} 与画布 {}x{} 不一致",
            piece.width(),
            piece.height(),
            canvas.width(),
            canvas.height()
        )));
    }
    if canvas.mode() != ChannelMode::Rgba {
        return Err(AppError::Partition("画布必须为 RGBA".to_string()));
    }

    for (index, dst) in canvas.pixels_mut().enumerate() {
        blend_pixel(dst, &piece.pixel(index)[..3], piece.alpha(index));
    }

    Ok(())
}

fn blend_pixel(dst: &mut [u8], rgb: &[u8], alpha: u8) {
    match alpha {
        0 => {}
        u8::MAX => {
            dst[..3].copy_from_slice(rgb);
            dst[3] = u8::MAX;
        }
        _ => {
            let sa = alpha as u32;
            let da = dst[3] as u32;
            // 结果透明度 × 255
            let out = sa * 255 + da * (255 - sa);
            for (d, &s) in dst[..3].iter_mut().zip(rgb) {
                let v = s as u32 * sa * 255 + *d as u32 * da * (255 - sa);
                *d = ((v + out / 2) / out) as u8;
            }
            dst[3] = ((out + 127) / 255) as u8;
        }
    }
}
