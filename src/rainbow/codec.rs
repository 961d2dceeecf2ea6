//! 字节流 ↔ RGB 像素网格。

use base64::{Engine as _, engine::general_purpose};

use super::layout::{GridLayout, padded_len};
use crate::error::AppError;
use crate::grid::{ChannelMode, PixelGrid};

/// 编码：Base64 → 补零到 3 的倍数 → 按行优先每 3 字节填一个 RGB 像素。
///
/// 画布多出的像素槽位全部填 0。
pub fn encode(bytes: &[u8]) -> Result<PixelGrid, AppError> {
    let mut text = general_purpose::STANDARD.encode(bytes).into_bytes();
    let layout = GridLayout::from_padded_len(padded_len(text.len()))?;

    text.resize(layout.pixel_slots() * 3, 0);
    PixelGrid::from_raw(layout.width, layout.height, ChannelMode::Rgb, text)
}

/// 解码：按行优先展开 R、G、B，去掉末尾的 0 字节后做 Base64 解码。
///
/// 0 不属于 Base64 字母表，末尾的 0 只可能来自补齐或填充像素。
/// RGBA 网格会先丢弃透明度通道。
pub fn decode(grid: &PixelGrid) -> Result<Vec<u8>, AppError> {
    let mut data = match grid.mode() {
        ChannelMode::Rgb => grid.as_raw().to_vec(),
        ChannelMode::Rgba => grid.to_rgb().into_raw(),
    };

    let end = data.iter().rposition(|&b| b != 0).map_or(0, |p| p + 1);
    data.truncate(end);

    general_purpose::STANDARD
        .decode(&data)
        .map_err(|e| AppError::Decode(format!("Base64 解码失败：{}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_are_packed_three_per_pixel() {
        // "abc" -> "YWJj" -> 补齐为 6 字节 -> 2 个像素
        let grid = encode(b"abc").unwrap();
        assert_eq!((grid.width(), grid.height()), (1, 2));
        assert_eq!(grid.as_raw(), b"YWJj\0\0");
    }

    #[test]
    fn exact_fit_roundtrip() {
        // 225 字节 -> 300 字节 Base64 -> 10 x 10，无填充像素
        let payload: Vec<u8> = (0..225u32).map(|i| (i * 31 % 256) as u8).collect();
        let grid = encode(&payload).unwrap();
        assert_eq!((grid.width(), grid.height()), (10, 10));
        assert_eq!(decode(&grid).unwrap(), payload);
    }

    #[test]
    fn slack_pixels_are_zero_and_ignored() {
        // 13 字节 -> 20 字节 Base64 -> 补齐 21 -> 7 像素 -> 2 x 4
        let payload = b"hello, world!";
        let grid = encode(payload).unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 4));
        assert_eq!(grid.pixel(7), &[0, 0, 0]);
        assert_eq!(decode(&grid).unwrap(), payload.to_vec());
    }

    #[test]
    fn empty_payload_roundtrip() {
        let grid = encode(&[]).unwrap();
        assert_eq!((grid.width(), grid.height()), (1, 1));
        assert!(decode(&grid).unwrap().is_empty());
    }

    #[test]
    fn rgba_grid_decodes_ignoring_alpha() {
        let payload = b"rgba";
        let grid = encode(payload).unwrap().to_rgba();
        assert_eq!(decode(&grid).unwrap(), payload.to_vec());
    }

    #[test]
    fn corrupted_grid_is_decode_error() {
        let grid = PixelGrid::from_raw(1, 2, ChannelMode::Rgb, b"Y!J*\x01\x02".to_vec()).unwrap();
        assert!(matches!(decode(&grid), Err(AppError::Decode(_))));
    }
}
