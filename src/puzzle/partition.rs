//! # 像素下标划分
//!
//! ## 设计思路
//!
//! 只划分“下标空间”，不复制像素：对 `[0, W×H)` 做一次洗牌，
//! 再按 `per_slice = ceil(W×H / N)` 切成 N 段，第 m 段即第 m 块碎片要隐藏的像素。
//! 各段互不重叠、并集为全集；最后一段可能不足 `per_slice`（N > W×H 时甚至为空）。
//!
//! ## 实现思路
//!
//! 随机源由调用方显式传入：给定种子时使用 `StdRng::seed_from_u64`，
//! 同一种子得到同一排列；未给种子时使用操作系统熵初始化。

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::AppError;

/// 打乱后的像素下标排列及其分段规则。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionIndex {
    order: Vec<usize>,
    pieces: usize,
    per_slice: usize,
}

impl PartitionIndex {
    /// 用给定随机源打乱 `[0, pixel_count)` 并划分为 `pieces` 段。
    pub fn new<R: Rng + ?Sized>(
        pixel_count: usize,
        pieces: usize,
        rng: &mut R,
    ) -> Result<Self, AppError> {
        if pieces == 0 {
            return Err(AppError::Partition("碎片数量至少为 1".to_string()));
        }

        let mut order: Vec<usize> = (0..pixel_count).collect();
        order.shuffle(rng);

        Ok(Self {
            order,
            pieces,
            per_slice: pixel_count.div_ceil(pieces),
        })
    }

    pub fn pieces(&self) -> usize {
        self.pieces
    }

    pub fn per_slice(&self) -> usize {
        self.per_slice
    }

    /// 完整排列。
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// 第 `piece` 块要隐藏的像素下标，超出范围的部分被截断。
    pub fn slice(&self, piece: usize) -> &[usize] {
        let len = self.order.len();
        let start = self.per_slice.saturating_mul(piece).min(len);
        let end = self.per_slice.saturating_mul(piece + 1).min(len);
        &self.order[start..end]
    }

    /// 按碎片顺序遍历全部分段。
    pub fn slices(&self) -> impl Iterator<Item = &[usize]> + '_ {
        (0..self.pieces).map(move |piece| self.slice(piece))
    }
}

/// 按可选种子构建随机源。
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
