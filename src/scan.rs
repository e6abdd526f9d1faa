use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::{debug, info};
use regex::Regex;
use walkdir::WalkDir;

use crate::error::{Result, ThumbnailError};

/// 支持的缩略图后缀名
static IMAGE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(png|jpg|jpeg)$").expect("failed to build regex"));

pub fn is_image_file(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .map(|ext| IMAGE_EXTENSION.is_match(&ext.to_string_lossy()))
        == Some(true)
}

/// 列出目录下的所有图片文件名，按字典序排序
///
/// 只扫描一层目录，目录不存在时返回 `DirectoryNotFound`
pub fn list_images(directory: impl AsRef<Path>) -> Result<Vec<String>> {
    let directory = directory.as_ref();
    if !directory.is_dir() {
        return Err(ThumbnailError::DirectoryNotFound(directory.to_path_buf()));
    }

    info!("开始扫描目录: {}", directory.display());
    let mut images = vec![];
    for entry in WalkDir::new(directory).min_depth(1).max_depth(1) {
        // 目录无法读取时报错，而不是当作空目录
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if is_image_file(&name) {
            images.push(name);
        }
    }
    images.sort();
    info!("扫描完成，共 {} 张图片", images.len());

    Ok(images)
}

/// 返回用户选择的图片文件名
///
/// 如果文件列表为空或第一项为空白，则退回到扫描整个目录
pub fn select_images(directory: impl AsRef<Path>, files: &[String]) -> Result<Vec<String>> {
    let directory = directory.as_ref();
    match files.first() {
        Some(first) if !first.trim().is_empty() => {
            if !directory.is_dir() {
                return Err(ThumbnailError::DirectoryNotFound(directory.to_path_buf()));
            }
            let mut images =
                files.iter().filter(|name| is_image_file(name)).cloned().collect::<Vec<_>>();
            images.sort();
            debug!("使用选择的 {} 个文件中的 {} 张图片", files.len(), images.len());
            Ok(images)
        }
        _ => list_images(directory),
    }
}

/// 把文件名拼接为目录下的完整路径
pub fn image_paths(directory: impl AsRef<Path>, images: &[String]) -> Vec<PathBuf> {
    images.iter().map(|name| directory.as_ref().join(name)).collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rstest::*;
    use tempfile::TempDir;

    use super::*;

    #[fixture]
    fn image_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in ["b.jpg", "A.PNG", "c.txt", "d.jpeg", "noext"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("nested.png")).unwrap();
        dir
    }

    #[test]
    fn scanner_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["b.jpg", "A.PNG", "c.txt"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        assert_eq!(list_images(dir.path()).unwrap(), vec!["A.PNG", "b.jpg"]);
    }

    #[rstest]
    fn scanner_skips_directories(image_dir: TempDir) {
        assert_eq!(list_images(image_dir.path()).unwrap(), vec!["A.PNG", "b.jpg", "d.jpeg"]);
    }

    #[test]
    fn empty_directory_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(list_images(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        assert!(matches!(list_images(&missing), Err(ThumbnailError::DirectoryNotFound(p)) if p == missing));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_is_an_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("a.png"), b"").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // root 仍然可以读取，此时没有可测试的错误
        let readable = fs::read_dir(&locked).is_ok();
        let result = list_images(&locked);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if !readable {
            assert!(matches!(result, Err(ThumbnailError::Io(_))));
        }
    }

    #[rstest]
    #[case::empty(vec![])]
    #[case::blank(vec![String::new()])]
    fn blank_selection_scans_directory(image_dir: TempDir, #[case] files: Vec<String>) {
        assert_eq!(select_images(image_dir.path(), &files).unwrap(), vec!["A.PNG", "b.jpg", "d.jpeg"]);
    }

    #[rstest]
    fn explicit_selection_is_filtered(image_dir: TempDir) {
        let files = vec!["z.png".to_owned(), "c.txt".to_owned(), "b.jpg".to_owned()];
        assert_eq!(select_images(image_dir.path(), &files).unwrap(), vec!["b.jpg", "z.png"]);
    }
}
