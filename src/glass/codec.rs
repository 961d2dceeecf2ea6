//! 透明度拆分与合并。

use crate::error::AppError;
use crate::grid::{ChannelMode, PixelGrid};

use super::AlphaMap;

/// 拆分：输出透明度全为 0 的 RGBA 网格，以及原透明度的游程映射。
///
/// RGB 输入视为完全不透明，映射中每个值均为 255。
pub fn split(grid: &PixelGrid) -> (PixelGrid, AlphaMap) {
    let mut glass = PixelGrid::new(grid.width(), grid.height(), ChannelMode::Rgba);
    let mut alphas = Vec::with_capacity(grid.pixel_count());

    for (index, (dst, src)) in glass.pixels_mut().zip(grid.pixels()).enumerate() {
        dst[..3].copy_from_slice(&src[..3]);
        alphas.push(grid.alpha(index));
    }

    (glass, AlphaMap::from_values(&alphas))
}

/// 合并：按映射恢复每个像素的透明度，RGB 通道保持不变。
///
/// 映射展开长度必须等于 `W×H`。
pub fn combine(grid: &PixelGrid, map: &AlphaMap) -> Result<PixelGrid, AppError> {
    let expected = grid.pixel_count();
    let total = map.total_len();
    if total != expected as u64 {
        return Err(AppError::LengthMismatch {
            expected,
            actual: usize::try_from(total).unwrap_or(usize::MAX),
        });
    }

    let mut restored = grid.to_rgba();
    for (px, alpha) in restored.pixels_mut().zip(map.expand()?) {
        px[3] = alpha;
    }

    Ok(restored)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rgba() -> PixelGrid {
        PixelGrid::from_raw(
            3,
            1,
            ChannelMode::Rgba,
            vec![10, 20, 30, 255, 40, 50, 60, 255, 70, 80, 90, 0],
        )
        .unwrap()
    }

    #[test]
    fn split_zeroes_alpha_and_keeps_colors() {
        let (glass, map) = split(&sample_rgba());
        assert_eq!(
            glass.as_raw(),
            &[10, 20, 30, 0, 40, 50, 60, 0, 70, 80, 90, 0]
        );
        assert_eq!(map.to_string(), "255[2]0[1]");
    }

    #[test]
    fn combine_restores_original() {
        let original = sample_rgba();
        let (glass, map) = split(&original);
        assert_eq!(combine(&glass, &map).unwrap(), original);
    }

    #[test]
    fn split_rgb_grid_records_opaque_alpha() {
        let rgb = PixelGrid::from_raw(2, 1, ChannelMode::Rgb, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let (_, map) = split(&rgb);
        assert_eq!(map.to_string(), "255[2]");
    }

    #[test]
    fn combine_accepts_rgb_grid() {
        let rgb = PixelGrid::from_raw(2, 1, ChannelMode::Rgb, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let map = AlphaMap::parse("9[1]8[1]").unwrap();
        let restored = combine(&rgb, &map).unwrap();
        assert_eq!(restored.as_raw(), &[1, 2, 3, 9, 4, 5, 6, 8]);
    }

    #[test]
    fn combine_rejects_short_map() {
        let (glass, _) = split(&sample_rgba());
        let map = AlphaMap::parse("255[2]").unwrap();
        assert!(matches!(
            combine(&glass, &map),
            Err(AppError::LengthMismatch { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn combine_rejects_long_map() {
        let (glass, _) = split(&sample_rgba());
        let map = AlphaMap::parse("255[4]").unwrap();
        assert!(matches!(
            combine(&glass, &map),
            Err(AppError::LengthMismatch { expected: 3, actual: 4 })
        ));
    }
}
