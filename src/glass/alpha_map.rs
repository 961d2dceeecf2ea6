//! # 透明度映射（AlphaMap）
//!
//! ## 设计思路
//!
//! 将逐像素的透明度序列按游程压缩为 `(value, count)` 记录序列，
//! 文本形式为 `value[count]` 首尾相接，无分隔符：
//!
//! ```text
//! [255, 255, 255, 142, 90, 10, 24, 24, 0, 0, 5]
//!   ↓
//! 255[3]142[1]90[1]10[1]24[2]0[2]5[1]
//! ```
//!
//! ## 实现思路
//!
//! - 内存中始终使用结构化的 `AlphaRun` 序列，文本只在读写文件时出现。
//! - 解析器逐个匹配 `digits[digits]` 记录，并要求记录之间紧密相连，
//!   任何多余字符、越界数值或零长度游程都会被拒绝。

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::AppError;

/// 单条记录：`value[count]`。
static RUN_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]+)\[([0-9]+)\]").unwrap());

/// 连续 `count` 个相同的透明度值。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlphaRun {
    pub value: u8,
    pub count: u64,
}

/// 按原始像素顺序排列的游程序列。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlphaMap {
    runs: Vec<AlphaRun>,
}

impl AlphaMap {
    /// 从左到右扫描，合并相邻的相同值。
    pub fn from_values(values: &[u8]) -> Self {
        let mut runs: Vec<AlphaRun> = Vec::new();

        for &value in values {
            match runs.last_mut() {
                Some(run) if run.value == value => run.count += 1,
                _ => runs.push(AlphaRun { value, count: 1 }),
            }
        }

        Self { runs }
    }

    pub fn runs(&self) -> &[AlphaRun] {
        &self.runs
    }

    /// 展开后的总长度（溢出时饱和到 `u64::MAX`）。
    pub fn total_len(&self) -> u64 {
        self.runs
            .iter()
            .fold(0u64, |acc, run| acc.saturating_add(run.count))
    }

    /// 展开为逐像素的透明度序列。
    ///
    /// 总长度超出可分配范围时返回 `Decode` 错误。
    pub fn expand(&self) -> Result<Vec<u8>, AppError> {
        let total = self.total_len();
        let len = usize::try_from(total)
            .map_err(|_| AppError::Decode(format!("透明度映射展开长度过大：{}", total)))?;

        let mut values = Vec::new();
        values
            .try_reserve_exact(len)
            .map_err(|e| AppError::Decode(format!("透明度映射展开长度过大：{} ({})", total, e)))?;
        for run in &self.runs {
            values.extend(std::iter::repeat_n(run.value, run.count as usize));
        }
        Ok(values)
    }

    /// 解析 `value[count]...` 文本。
    pub fn parse(text: &str) -> Result<Self, AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::Decode("透明度映射为空".to_string()));
        }

        let mut runs = Vec::new();
        let mut cursor = 0;

        for caps in RUN_TOKEN.captures_iter(text) {
            let (Some(whole), Some(value), Some(count)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };

            if whole.start() != cursor {
                return Err(AppError::Decode(format!(
                    "透明度映射第 {} 字节处存在无法识别的内容：{:?}",
                    cursor,
                    &text[cursor..whole.start()]
                )));
            }

            let value = value.as_str().parse::<u8>().map_err(|_| {
                AppError::Decode(format!("透明度值越界（0~255）：{}", value.as_str()))
            })?;
            let count = count.as_str().parse::<u64>().map_err(|_| {
                AppError::Decode(format!("游程长度无法解析：{}", count.as_str()))
            })?;
            if count == 0 {
                return Err(AppError::Decode(format!(
                    "游程长度必须为正数：{}",
                    whole.as_str()
                )));
            }

            runs.push(AlphaRun { value, count });
            cursor = whole.end();
        }

        if cursor != text.len() {
            return Err(AppError::Decode(format!(
                "透明度映射第 {} 字节处存在无法识别的内容：{:?}",
                cursor,
                &text[cursor..]
            )));
        }

        Ok(Self { runs })
    }
}

impl fmt::Display for AlphaMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for run in &self.runs {
            write!(f, "{}[{}]", run.value, run.count)?;
        }
        Ok(())
    }
}

impl FromStr for AlphaMap {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// 将透明度序列直接格式化为映射文本。
pub fn format(values: &[u8]) -> String {
    AlphaMap::from_values(values).to_string()
}

/// 将映射文本直接还原为透明度序列。
pub fn deformat(text: &str) -> Result<Vec<u8>, AppError> {
    AlphaMap::parse(text)?.expand()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLAG: [u8; 11] = [255, 255, 255, 142, 90, 10, 24, 24, 0, 0, 5];
    const FLAG_TEXT: &str = "255[3]142[1]90[1]10[1]24[2]0[2]5[1]";

    #[test]
    fn format_matches_documented_example() {
        assert_eq!(format(&FLAG), FLAG_TEXT);
    }

    #[test]
    fn deformat_matches_documented_example() {
        assert_eq!(deformat(FLAG_TEXT).unwrap(), FLAG.to_vec());
    }

    #[test]
    fn uniform_values_become_single_run() {
        let map = AlphaMap::from_values(&[7; 100]);
        assert_eq!(map.runs(), &[AlphaRun { value: 7, count: 100 }]);
        assert_eq!(map.to_string(), "7[100]");
    }

    #[test]
    fn parse_accepts_trailing_newline() {
        let map: AlphaMap = "0[4]\n".parse().unwrap();
        assert_eq!(map.total_len(), 4);
    }

    #[test]
    fn parse_rejects_empty() {
        assert!(matches!(AlphaMap::parse("  "), Err(AppError::Decode(_))));
    }

    #[test]
    fn parse_rejects_garbage_between_runs() {
        assert!(matches!(
            AlphaMap::parse("255[3],0[1]"),
            Err(AppError::Decode(_))
        ));
        assert!(matches!(AlphaMap::parse("x255[3]"), Err(AppError::Decode(_))));
        assert!(matches!(AlphaMap::parse("255[3]7"), Err(AppError::Decode(_))));
    }

    #[test]
    fn parse_rejects_out_of_range_value() {
        assert!(matches!(AlphaMap::parse("256[1]"), Err(AppError::Decode(_))));
    }

    #[test]
    fn parse_rejects_zero_count() {
        assert!(matches!(AlphaMap::parse("10[0]"), Err(AppError::Decode(_))));
    }

    #[test]
    fn parse_rejects_overflowing_count() {
        assert!(matches!(
            AlphaMap::parse("1[99999999999999999999999]"),
            Err(AppError::Decode(_))
        ));
    }

    #[test]
    fn huge_count_is_decode_error_not_panic() {
        let text = format!("0[{}]", u64::MAX);
        assert!(AlphaMap::parse(&text).is_ok());
        assert!(matches!(deformat(&text), Err(AppError::Decode(_))));
        assert!(matches!(
            deformat("0[18446744073709551615]1[1]"),
            Err(AppError::Decode(_))
        ));
    }

    #[test]
    fn parse_rejects_non_ascii_digits() {
        // U+0663 ARABIC-INDIC DIGIT THREE
        let err = AlphaMap::parse("\u{663}[1]").unwrap_err();
        assert!(matches!(&err, AppError::Decode(msg) if msg.contains("无法识别")));
        let err = AlphaMap::parse("1[\u{663}]").unwrap_err();
        assert!(matches!(&err, AppError::Decode(msg) if msg.contains("无法识别")));
    }

    #[test]
    fn parse_keeps_unmerged_neighbours_in_order() {
        // 文本中相邻的相同值不会被合并，顺序保持不变
        let map = AlphaMap::parse("3[1]3[2]").unwrap();
        assert_eq!(map.runs().len(), 2);
        assert_eq!(map.expand().unwrap(), vec![3, 3, 3]);
    }
}
