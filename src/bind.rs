use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Result, ThumbnailError};
use crate::paths::relative_to;
use crate::pose::{PoseLibrary, PoseSuffix};

/// 绑定一张缩略图的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    /// 新建了缩略图记录
    Created,
    /// 更新了已有的记录
    Updated,
    /// 已有记录且不允许覆盖，没有任何修改
    Kept,
}

/// 把图片绑定到姿势上，负责创建或更新缩略图记录
#[derive(Debug, Clone)]
pub struct Binder {
    suffix: PoseSuffix,
    overwrite_existing: bool,
    relative_base: Option<PathBuf>,
}

impl Binder {
    pub fn new(suffix: PoseSuffix) -> Self {
        Self { suffix, overwrite_existing: true, relative_base: None }
    }

    pub fn overwrite_existing(mut self, overwrite_existing: bool) -> Self {
        self.overwrite_existing = overwrite_existing;
        self
    }

    /// 设置后保存的路径会转换为相对于 `base` 的路径
    pub fn relative_to(mut self, base: Option<PathBuf>) -> Self {
        self.relative_base = base;
        self
    }

    /// 返回记录中保存的路径
    pub fn stored_path(&self, image: &Path) -> String {
        let path = self
            .relative_base
            .as_ref()
            .and_then(|base| relative_to(image, base))
            .unwrap_or_else(|| image.to_path_buf());
        path.to_string_lossy().to_string()
    }

    /// 把图片绑定到位置为 `index` 的姿势上
    ///
    /// 会给姿势名称加上后缀，这是唯一会修改姿势标记的地方
    pub fn bind(&self, library: &mut PoseLibrary, index: usize, image: &Path) -> Result<BindOutcome> {
        let pose = library
            .markers
            .get_mut(index)
            .ok_or_else(|| ThumbnailError::PoseNotFound(format!("位置 {}", index)))?;

        if !self.overwrite_existing && library.thumbnails.find_by_frame(pose.frame).is_some() {
            debug!("姿势 '{}' 已有缩略图，跳过", pose.name);
            return Ok(BindOutcome::Kept);
        }

        let name = self.suffix.clean(&pose.name).to_owned();
        pose.name = self.suffix.apply(&pose.name);
        let frame = pose.frame;

        let filepath = self.stored_path(image);
        let (record, created) = library.thumbnails.find_or_insert(frame);
        record.name = name;
        record.index = index;
        record.frame = frame;
        record.filepath = filepath;
        debug!("姿势 '{}' (帧 {}) 的缩略图: {}", record.name, frame, record.filepath);

        Ok(if created { BindOutcome::Created } else { BindOutcome::Updated })
    }
}
