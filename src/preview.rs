use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Serialize;

use crate::error::Result;
use crate::paths::resolve;
use crate::pose::PoseLibrary;

pub type IconId = u32;

/// 宿主提供的图标加载服务
pub trait IconLoader {
    /// 把图片文件加载为可显示的图标
    fn load(&mut self, path: &Path) -> Result<IconId>;
}

/// 缩略图图标缓存，以规范化后的路径为键
///
/// 生命周期与宿主会话一致
pub struct PreviewCache<L> {
    loader: L,
    icons: HashMap<PathBuf, IconId>,
    placeholder: PathBuf,
    placeholder_icon: Option<IconId>,
}

impl<L: IconLoader> PreviewCache<L> {
    /// `placeholder` 为缩略图缺失时显示的图片
    pub fn new(loader: L, placeholder: impl Into<PathBuf>) -> Self {
        Self { loader, icons: HashMap::new(), placeholder: placeholder.into(), placeholder_icon: None }
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// “没有缩略图”的图标，只加载一次
    pub fn placeholder_icon(&mut self) -> Result<IconId> {
        if let Some(icon) = self.placeholder_icon {
            return Ok(icon);
        }
        let icon = self.loader.load(&self.placeholder)?;
        self.placeholder_icon = Some(icon);
        Ok(icon)
    }

    /// 返回保存的缩略图路径对应的图标
    ///
    /// 文件不存在或加载失败时返回占位图标
    pub fn icon_for(&mut self, stored: &str, base: &Path) -> Result<IconId> {
        let path = resolve(stored, base);
        if let Some(icon) = self.icons.get(&path) {
            return Ok(*icon);
        }
        if !path.is_file() {
            debug!("缩略图不存在: {}", path.display());
            return self.placeholder_icon();
        }
        match self.loader.load(&path) {
            Ok(icon) => {
                self.icons.insert(path, icon);
                Ok(icon)
            }
            Err(e) => {
                warn!("加载缩略图失败 {}: {}", path.display(), e);
                self.placeholder_icon()
            }
        }
    }
}

/// 图标选择器中的一项
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickerEntry {
    /// 姿势的帧号，作为选择器的值
    pub value: String,
    pub label: String,
    pub icon_id: IconId,
    /// 绑定时姿势的位置
    pub index: usize,
}

/// 按姿势顺序生成选择器的所有项，没有缩略图的姿势不会出现
pub fn build_picker_entries<L: IconLoader>(
    library: &PoseLibrary,
    cache: &mut PreviewCache<L>,
    base: &Path,
) -> Result<Vec<PickerEntry>> {
    if library.markers.is_empty() || library.thumbnails.is_empty() {
        return Ok(vec![]);
    }
    library
        .records_in_pose_order()
        .map(|record| -> Result<PickerEntry> {
            Ok(PickerEntry {
                value: record.frame.to_string(),
                label: record.name.clone(),
                icon_id: cache.icon_for(&record.filepath, base)?,
                index: record.index,
            })
        })
        .collect()
}
