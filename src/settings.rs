//! 应用设置模块
//!
//! # 设计思路
//!
//! 设置以 JSON 文件保存，所有字段都有默认值：文件缺失、损坏或只写了部分字段时，
//! 程序仍以默认配置运行，并记录一条警告。
//!
//! # 实现思路
//!
//! - `AppSettings` 通过 serde 读写，每个字段 `#[serde(default)]`。
//! - `image_config()` 将字符串形式的压缩档位解析为 `ImageConfig`。

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::image_handler::{ImageConfig, PngProfile};
use crate::storage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// 产物输出目录；为空时写到输入文件所在目录。
    pub output_dir: Option<PathBuf>,
    /// PNG 压缩档位：fast / balanced / best。
    pub png_profile: String,
    /// 读取源文件时允许的最大体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限。
    pub max_decoded_pixels: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        let image = ImageConfig::default();
        Self {
            output_dir: None,
            png_profile: image.png_profile.as_str().to_string(),
            max_file_size: image.max_file_size,
            max_decoded_pixels: image.max_decoded_pixels,
        }
    }
}

impl AppSettings {
    /// 转换为图片读写配置。
    pub fn image_config(&self) -> Result<ImageConfig, AppError> {
        let png_profile = PngProfile::from_str(&self.png_profile)
            .map_err(|e| AppError::Settings(e.to_string()))?;

        Ok(ImageConfig {
            max_file_size: self.max_file_size,
            max_decoded_pixels: self.max_decoded_pixels,
            png_profile,
        })
    }
}

/// 读取设置文件；缺失或无法解析时回退到默认值。
pub fn load_settings_from_path(path: &Path) -> AppSettings {
    if !path.exists() {
        log::debug!("设置文件不存在，使用默认设置: {}", path.display());
        return AppSettings::default();
    }

    let parsed: Result<AppSettings, String> = fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()));

    match parsed {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!("解析设置文件失败，使用默认设置 ({}): {}", path.display(), err);
            AppSettings::default()
        }
    }
}

/// 以格式化 JSON 写入设置文件。
pub fn save_settings_to_path(path: &Path, settings: &AppSettings) -> Result<(), AppError> {
    let content = serde_json::to_string_pretty(settings)
        .map_err(|e| AppError::Settings(format!("序列化设置失败: {}", e)))?;

    storage::write_atomic(path, content.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn unique_temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock error")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("magics-settings-test-{nanos}"));
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn save_and_load_settings_roundtrip() {
        let dir = unique_temp_dir();
        let path = dir.join("settings.json");
        let settings = AppSettings {
            output_dir: Some(PathBuf::from("/tmp/magics-out")),
            png_profile: "best".to_string(),
            ..AppSettings::default()
        };

        save_settings_to_path(&path, &settings).expect("save settings");
        assert_eq!(load_settings_from_path(&path), settings);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn load_bad_settings_falls_back_to_default() {
        let dir = unique_temp_dir();
        let path = dir.join("settings.json");
        fs::write(&path, "not-json").expect("write invalid settings");

        assert_eq!(load_settings_from_path(&path), AppSettings::default());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn partial_settings_fill_in_defaults() {
        let dir = unique_temp_dir();
        let path = dir.join("settings.json");
        fs::write(&path, r#"{ "png_profile": "fast" }"#).expect("write settings");

        let loaded = load_settings_from_path(&path);
        assert_eq!(loaded.png_profile, "fast");
        assert_eq!(loaded.max_decoded_pixels, AppSettings::default().max_decoded_pixels);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn unknown_profile_is_a_settings_error() {
        let settings = AppSettings {
            png_profile: "ultra".to_string(),
            ..AppSettings::default()
        };
        assert!(matches!(settings.image_config(), Err(AppError::Settings(_))));
    }
}
