use std::path::{Component, Path, PathBuf};

/// 按字面处理 `.` 和 `..`，不访问文件系统
pub fn normalize(path: impl AsRef<Path>) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// 返回 `path` 相对于目录 `base` 的路径
///
/// 两者一个是绝对路径一个是相对路径，或者位于不同的盘符时返回 `None`
pub fn relative_to(path: impl AsRef<Path>, base: impl AsRef<Path>) -> Option<PathBuf> {
    let path = normalize(path);
    let base = normalize(base);
    if path.is_absolute() != base.is_absolute() {
        return None;
    }

    let mut path_iter = path.components().peekable();
    let mut base_iter = base.components().peekable();
    while let (Some(a), Some(b)) = (path_iter.peek(), base_iter.peek()) {
        if a != b {
            break;
        }
        path_iter.next();
        base_iter.next();
    }

    let mut relative = PathBuf::new();
    for component in base_iter {
        match component {
            Component::Normal(_) => relative.push(".."),
            // 根目录或盘符不同
            _ => return None,
        }
    }
    for component in path_iter {
        relative.push(component.as_os_str());
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    Some(relative)
}

/// 把保存的缩略图路径解析为实际路径，相对路径以 `base` 为起点
pub fn resolve(stored: impl AsRef<Path>, base: impl AsRef<Path>) -> PathBuf {
    let stored = stored.as_ref();
    if stored.is_absolute() { normalize(stored) } else { normalize(base.as_ref().join(stored)) }
}
