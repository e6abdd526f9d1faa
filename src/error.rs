use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = ThumbnailError> = std::result::Result<T, E>;

/// 缩略图操作的错误类型
///
/// 匹配失败不属于错误，未匹配的姿势会被跳过并计入报告
#[derive(Debug, Error)]
pub enum ThumbnailError {
    /// 扫描目录不存在
    #[error("目录不存在: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    /// 匹配配置非法，在任何修改之前拒绝
    #[error("无效的配置: {0}")]
    InvalidConfiguration(String),
    /// 找不到指定的姿势
    #[error("找不到姿势: {0}")]
    PoseNotFound(String),
    /// 姿势库没有激活的姿势
    #[error("姿势库中没有激活的姿势")]
    NoActivePose,
    /// 选择器的值不是帧号
    #[error("无效的选择器值: {0:?}")]
    InvalidPickerValue(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
