//! # 服务入口模块
//!
//! ## 设计思路
//!
//! `MagicService` 持有三条链路共用的协作方：图片读写器、标识生成器、输出目录。
//! 各链路的文件级操作分别在 `glass/service.rs`、`puzzle/service.rs`、
//! `rainbow/service.rs` 中以 `impl MagicService` 的方式补充，
//! 核心算法本身不依赖这里的任何状态。

use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::identifier::{IdGenerator, RandomIdGenerator};
use crate::image_handler::{ImageConfig, ImageHandler};
use crate::settings::AppSettings;
use crate::storage;

/// 文件级变换服务。
pub struct MagicService {
    pub(crate) images: ImageHandler,
    pub(crate) ids: Box<dyn IdGenerator>,
    pub(crate) output_dir: Option<PathBuf>,
}

impl MagicService {
    /// 使用默认配置创建服务，产物写到输入文件所在目录。
    pub fn new(config: ImageConfig) -> Self {
        Self {
            images: ImageHandler::new(config),
            ids: Box::new(RandomIdGenerator),
            output_dir: None,
        }
    }

    /// 根据设置创建服务。
    pub fn from_settings(settings: &AppSettings) -> Result<Self, AppError> {
        let mut service = Self::new(settings.image_config()?);
        service.output_dir = settings.output_dir.clone();
        Ok(service)
    }

    /// 替换标识生成器（测试中用于固定产物名称）。
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn images(&self) -> &ImageHandler {
        &self.images
    }

    /// 输入文件对应的产物目录。
    pub(crate) fn output_dir_for(&self, input: &Path) -> PathBuf {
        storage::resolve_output_dir(self.output_dir.as_deref(), input)
    }
}

impl Default for MagicService {
    fn default() -> Self {
        Self::new(ImageConfig::default())
    }
}
