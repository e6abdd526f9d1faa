use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::bind::{BindOutcome, Binder};
use crate::error::{Result, ThumbnailError};
use crate::matching::{MatchConfiguration, MatchStrategy, Pairing, pair_images};
use crate::pose::{PoseLibrary, PoseSuffix, find_index_by_frame};
use crate::scan::{image_paths, select_images};

/// 一次批量绑定的统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindSummary {
    pub created: usize,
    pub updated: usize,
    /// 已有缩略图且不允许覆盖
    pub kept: usize,
    /// 没有匹配到图片的姿势数量
    pub unmatched: usize,
    /// 匹配到的 (姿势位置, 图片路径)
    pub bindings: Vec<(usize, PathBuf)>,
}

impl BindSummary {
    fn record(&mut self, outcome: BindOutcome) {
        match outcome {
            BindOutcome::Created => self.created += 1,
            BindOutcome::Updated => self.updated += 1,
            BindOutcome::Kept => self.kept += 1,
        }
    }
}

/// “从目录添加缩略图”的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchReport {
    Applied(BindSummary),
    /// 匹配方式尚未实现，姿势库没有任何修改
    NotImplemented(MatchStrategy),
}

/// 姿势缩略图的操作入口
///
/// 所有操作都需要独占姿势库，直到操作完成
#[derive(Debug, Clone)]
pub struct PoseThumbnails {
    suffix: PoseSuffix,
    base_dir: PathBuf,
}

impl PoseThumbnails {
    /// `base_dir` 为姿势库文件所在目录，相对路径以此为起点
    pub fn new(suffix: PoseSuffix, base_dir: impl Into<PathBuf>) -> Self {
        Self { suffix, base_dir: base_dir.into() }
    }

    pub fn suffix(&self) -> &PoseSuffix {
        &self.suffix
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn binder(&self, overwrite_existing: bool, use_relative_path: bool) -> Binder {
        Binder::new(self.suffix.clone())
            .overwrite_existing(overwrite_existing)
            .relative_to(use_relative_path.then(|| self.base_dir.clone()))
    }

    /// 为一个姿势添加或更新缩略图，没有指定位置时使用激活的姿势
    pub fn add_thumbnail(
        &self,
        library: &mut PoseLibrary,
        pose: Option<usize>,
        image: &Path,
        use_relative_path: bool,
    ) -> Result<BindOutcome> {
        let index = match pose {
            Some(index) => index,
            None => {
                library.active_pose().map(|(index, _)| index).ok_or(ThumbnailError::NoActivePose)?
            }
        };
        let outcome = self.binder(true, use_relative_path).bind(library, index, image)?;
        info!("姿势 {} 的缩略图: {}", index, image.display());
        Ok(outcome)
    }

    /// 从目录中为所有姿势匹配并绑定缩略图
    ///
    /// `files` 为用户选择的文件名，为空时扫描整个目录。
    /// 配置错误或目录不存在时不会修改姿势库，单个姿势匹配失败不会中断操作。
    pub fn add_thumbnails_from_dir(
        &self,
        library: &mut PoseLibrary,
        directory: &Path,
        files: &[String],
        config: &MatchConfiguration,
    ) -> Result<MatchReport> {
        config.validate()?;
        let images = image_paths(directory, &select_images(directory, files)?);

        let pairs = match pair_images(&library.markers, &images, config, &self.suffix) {
            Pairing::Pairs(pairs) => pairs,
            Pairing::NotImplemented(strategy) => return Ok(MatchReport::NotImplemented(strategy)),
        };

        let binder = self.binder(config.overwrite_existing, config.use_relative_path);
        let mut summary = BindSummary {
            unmatched: library.markers.len() - pairs.len(),
            ..Default::default()
        };
        for (index, image) in pairs {
            summary.record(binder.bind(library, index, &image)?);
            summary.bindings.push((index, image));
        }
        info!(
            "新增 {} 个缩略图，更新 {} 个，保留 {} 个，{} 个姿势未匹配",
            summary.created, summary.updated, summary.kept, summary.unmatched
        );
        Ok(MatchReport::Applied(summary))
    }
}

/// 根据选择器的值（姿势的帧号）激活对应的姿势，返回姿势当前的位置
pub fn select_pose(library: &mut PoseLibrary, value: &str) -> Result<usize> {
    let frame: i64 =
        value.trim().parse().map_err(|_| ThumbnailError::InvalidPickerValue(value.to_owned()))?;
    let index = find_index_by_frame(&library.markers, frame)
        .ok_or_else(|| ThumbnailError::PoseNotFound(format!("帧 {}", frame)))?;
    library.active = Some(index);
    debug!("激活姿势 '{}' (帧 {})", library.markers[index].name, frame);
    Ok(index)
}
