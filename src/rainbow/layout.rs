//! # 网格尺寸推导
//!
//! 宽高只由补齐后的字节数 `padded_len` 决定：
//!
//! ```text
//! pixels = padded_len / 3
//! width  = floor(sqrt(pixels))
//! height = ceil(pixels / width)
//! ```
//!
//! 得到近似正方形的画布。`width * height` 可能略大于 `pixels`，
//! 多出的像素槽位用 0 填充。`padded_len == 0` 时取 1×1。

use crate::error::AppError;

/// 每个像素承载的字节数（R、G、B）。
pub const CHANNELS: usize = 3;

/// 右侧补零到 3 的倍数后的长度。
pub fn padded_len(len: usize) -> usize {
    len.div_ceil(CHANNELS) * CHANNELS
}

/// Base64（带填充）编码后的长度。
pub fn base64_len(payload_len: usize) -> usize {
    payload_len.div_ceil(3) * 4
}

fn pixel_num(padded_len: usize) -> usize {
    padded_len.div_ceil(CHANNELS)
}

pub fn width(padded_len: usize) -> usize {
    pixel_num(padded_len).isqrt().max(1)
}

pub fn height(padded_len: usize) -> usize {
    pixel_num(padded_len).div_ceil(width(padded_len)).max(1)
}

/// 宽高比，按最大公约数约分。
pub fn aspect_ratio(padded_len: usize) -> (usize, usize) {
    let (w, h) = (width(padded_len), height(padded_len));
    let g = gcd(w, h);
    (w / g, h / g)
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// 一次编码使用的画布布局。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub padded_len: usize,
    pub width: u32,
    pub height: u32,
}

impl GridLayout {
    pub fn from_padded_len(padded_len: usize) -> Result<Self, AppError> {
        let to_u32 = |v: usize| {
            u32::try_from(v)
                .map_err(|_| AppError::Decode(format!("画布尺寸超出范围：{}", v)))
        };

        Ok(Self {
            padded_len,
            width: to_u32(width(padded_len))?,
            height: to_u32(height(padded_len))?,
        })
    }

    /// 原始数据长度为 `payload_len` 时的布局。
    pub fn for_payload_len(payload_len: usize) -> Result<Self, AppError> {
        Self::from_padded_len(padded_len(base64_len(payload_len)))
    }

    /// 画布像素槽位总数。
    pub fn pixel_slots(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// 由于向上取整多出的填充像素数。
    pub fn slack_pixels(&self) -> usize {
        self.pixel_slots() - pixel_num(self.padded_len)
    }

    pub fn aspect_ratio(&self) -> (usize, usize) {
        aspect_ratio(self.padded_len)
    }
}
