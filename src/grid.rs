//! # 像素网格模块
//!
//! ## 设计思路
//!
//! 三条变换链路共用同一个抽象：定宽像素元组组成的扁平序列。
//! `PixelGrid` 以单个 `Vec<u8>` 持有全部通道数据，按行优先排列，
//! 像素下标 `index = y * width + x`。
//!
//! 网格由当前变换独占，不跨操作共享。

use crate::error::AppError;

/// 像素通道模式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMode {
    Rgb,
    Rgba,
}

impl ChannelMode {
    /// 每个像素的通道数。
    pub const fn channels(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// 行优先的像素网格。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    mode: ChannelMode,
    data: Vec<u8>,
}

impl PixelGrid {
    /// 创建全零网格（RGBA 模式下即全透明）。
    pub fn new(width: u32, height: u32, mode: ChannelMode) -> Self {
        let len = width as usize * height as usize * mode.channels();
        Self {
            width,
            height,
            mode,
            data: vec![0; len],
        }
    }

    /// 由原始通道字节构建网格，长度必须恰好为 `width * height * channels`。
    pub fn from_raw(
        width: u32,
        height: u32,
        mode: ChannelMode,
        data: Vec<u8>,
    ) -> Result<Self, AppError> {
        let expected = width as usize * height as usize * mode.channels();
        if data.len() != expected {
            return Err(AppError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            mode,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mode(&self) -> ChannelMode {
        self.mode
    }

    /// 像素总数 `W×H`。
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// 取第 `index` 个像素的通道切片。
    ///
    /// 下标越界时 panic，与切片索引语义一致。
    pub fn pixel(&self, index: usize) -> &[u8] {
        let c = self.mode.channels();
        &self.data[index * c..(index + 1) * c]
    }

    pub fn pixel_mut(&mut self, index: usize) -> &mut [u8] {
        let c = self.mode.channels();
        &mut self.data[index * c..(index + 1) * c]
    }

    /// 按行优先顺序遍历像素。
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.mode.channels())
    }

    pub fn pixels_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        let c = self.mode.channels();
        self.data.chunks_exact_mut(c)
    }

    /// 第 `index` 个像素的透明度；RGB 网格视为完全不透明。
    pub fn alpha(&self, index: usize) -> u8 {
        match self.mode {
            ChannelMode::Rgb => u8::MAX,
            ChannelMode::Rgba => self.data[index * 4 + 3],
        }
    }

    /// 两个网格宽高是否一致（不比较通道模式）。
    pub fn same_dimensions(&self, other: &PixelGrid) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// 转换为 RGBA；RGB 像素补 `alpha = 255`。
    pub fn to_rgba(&self) -> PixelGrid {
        match self.mode {
            ChannelMode::Rgba => self.clone(),
            ChannelMode::Rgb => {
                let mut data = Vec::with_capacity(self.pixel_count() * 4);
                for px in self.pixels() {
                    data.extend_from_slice(px);
                    data.push(u8::MAX);
                }
                PixelGrid {
                    width: self.width,
                    height: self.height,
                    mode: ChannelMode::Rgba,
                    data,
                }
            }
        }
    }

    /// 转换为 RGB；丢弃透明度通道。
    pub fn to_rgb(&self) -> PixelGrid {
        match self.mode {
            ChannelMode::Rgb => self.clone(),
            ChannelMode::Rgba => {
                let mut data = Vec::with_capacity(self.pixel_count() * 3);
                for px in self.pixels() {
                    data.extend_from_slice(&px[..3]);
                }
                PixelGrid {
                    width: self.width,
                    height: self.height,
                    mode: ChannelMode::Rgb,
                    data,
                }
            }
        }
    }
}
