use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::Result;
use crate::pose::PoseLibrary;

/// 读取姿势库文件
pub fn load(path: impl AsRef<Path>) -> Result<PoseLibrary> {
    let path = path.as_ref();
    debug!("读取姿势库: {}", path.display());
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// 保存姿势库文件，先写入 `<文件名>.tmp` 再重命名
pub fn save(library: &PoseLibrary, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut tmp_file = path.as_os_str().to_owned();
    tmp_file.push(".tmp");
    let tmp_file = PathBuf::from(tmp_file);

    fs::write(&tmp_file, serde_json::to_string_pretty(library)?)?;
    fs::rename(&tmp_file, path)?;
    info!("姿势库已保存: {}", path.display());
    Ok(())
}

/// 姿势库文件所在的目录，保存的相对路径以此为起点
pub fn base_dir(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = std::path::absolute(path.as_ref())?;
    Ok(path.parent().map(Path::to_path_buf).unwrap_or(path))
}
