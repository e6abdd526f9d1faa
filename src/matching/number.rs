use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)").expect("failed to build regex"));

/// 带编号的图片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedImage {
    pub number: i64,
    pub image: PathBuf,
}

/// 解析文件名开头的数字，只检查不含目录的文件名
///
/// 文件名不以数字开头，或者数字超出 i64 范围时返回 `None`
pub fn parse_leading_number(path: impl AsRef<Path>) -> Option<i64> {
    let basename = path.as_ref().file_name()?.to_string_lossy();
    let caps = LEADING_NUMBER.captures(&basename)?;
    caps[1].parse().ok()
}

/// 为所有以数字开头的图片提取编号，保持原有顺序
// TODO: 009-pose.jpg 和 00009-pose.jpg 会得到相同的编号，需要决定保留哪一个
pub fn numbered_images(images: &[PathBuf]) -> Vec<NumberedImage> {
    images
        .iter()
        .filter_map(|image| {
            parse_leading_number(image)
                .map(|number| NumberedImage { number, image: image.clone() })
        })
        .collect()
}
