use std::collections::HashMap;
use std::path::PathBuf;

use log::debug;

use crate::pose::{PoseMarker, PoseSuffix};

/// 每个姿势最多保留的候选数量
const MAX_CANDIDATES: usize = 3;

/// 在 `a[alo..ahi]` 和 `b[blo..bhi]` 中寻找最长的公共子串
///
/// 长度相同时返回在 a 中最早开始的，再相同时返回在 b 中最早开始的
fn find_longest_match(
    a: &[char],
    b: &[char],
    (alo, ahi): (usize, usize),
    (blo, bhi): (usize, usize),
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);
    // prev[j] 为以 a[i-1] 和 b[j-1] 结尾的公共子串长度
    let mut prev = vec![0usize; bhi - blo + 1];
    let mut curr = vec![0usize; bhi - blo + 1];
    for i in alo..ahi {
        for j in blo..bhi {
            let col = j - blo + 1;
            curr[col] = if a[i] == b[j] { prev[col - 1] + 1 } else { 0 };
            let k = curr[col];
            if k > best_k {
                best_i = i + 1 - k;
                best_j = j + 1 - k;
                best_k = k;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    (best_i, best_j, best_k)
}

/// 递归查找所有匹配块，返回匹配的字符总数
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut queue = vec![((0, a.len()), (0, b.len()))];
    let mut matched = 0;
    while let Some(((alo, ahi), (blo, bhi))) = queue.pop() {
        let (i, j, k) = find_longest_match(a, b, (alo, ahi), (blo, bhi));
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            queue.push(((alo, i), (blo, j)));
        }
        if i + k < ahi && j + k < bhi {
            queue.push(((i + k, ahi), (j + k, bhi)));
        }
    }
    matched
}

fn ratio_of(matched: usize, total: usize) -> f64 {
    if total == 0 { 1.0 } else { 2.0 * matched as f64 / total as f64 }
}

/// 计算两个字符串的相似度，范围为 0 到 1
///
/// 使用 Ratcliff/Obershelp 算法：2 * 匹配字符数 / 总字符数
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_of(matching_characters(&a, &b), a.len() + b.len())
}

/// 不考虑顺序时相似度的上界
fn quick_ratio(a: &[char], b: &[char]) -> f64 {
    let mut counts: HashMap<char, isize> = HashMap::new();
    for c in b {
        *counts.entry(*c).or_default() += 1;
    }
    let mut matched = 0;
    for c in a {
        let count = counts.entry(*c).or_default();
        if *count > 0 {
            matched += 1;
        }
        *count -= 1;
    }
    ratio_of(matched, a.len() + b.len())
}

/// 只考虑长度时相似度的上界
fn real_quick_ratio(a: &[char], b: &[char]) -> f64 {
    ratio_of(a.len().min(b.len()), a.len() + b.len())
}

/// 返回与 `word` 最相似的至多 `n` 个候选的下标
///
/// 只保留相似度不低于 `threshold` 的候选，按相似度从高到低排序，相同时保持候选顺序
pub fn close_matches<S: AsRef<str>>(
    word: &str,
    possibilities: &[S],
    n: usize,
    threshold: f64,
) -> Vec<usize> {
    let word: Vec<char> = word.chars().collect();
    let mut scored = possibilities
        .iter()
        .enumerate()
        .filter_map(|(idx, possibility)| {
            let possibility: Vec<char> = possibility.as_ref().chars().collect();
            if real_quick_ratio(&possibility, &word) < threshold
                || quick_ratio(&possibility, &word) < threshold
            {
                return None;
            }
            let ratio =
                ratio_of(matching_characters(&possibility, &word), possibility.len() + word.len());
            (ratio >= threshold).then_some((idx, ratio))
        })
        .collect::<Vec<_>>();
    // sort_by 是稳定排序，相似度相同时保持插入顺序
    scored.sort_by(|(_, a), (_, b)| b.total_cmp(a));
    scored.into_iter().take(n).map(|(idx, _)| idx).collect()
}

/// 图片的文件名（不含后缀）到路径的映射，保持插入顺序
///
/// 文件名重复时后出现的路径覆盖先出现的，位置不变
fn stem_table(images: &[PathBuf]) -> (Vec<String>, Vec<PathBuf>) {
    let mut stems: Vec<String> = Vec::with_capacity(images.len());
    let mut paths: Vec<PathBuf> = Vec::with_capacity(images.len());
    for image in images {
        let Some(stem) = image.file_stem() else {
            continue;
        };
        let stem = stem.to_string_lossy().to_string();
        match stems.iter().position(|s| *s == stem) {
            Some(pos) => paths[pos] = image.clone(),
            None => {
                stems.push(stem);
                paths.push(image.clone());
            }
        }
    }
    (stems, paths)
}

/// 根据姿势名称与文件名的相似度匹配缩略图
///
/// `cutoff` 为模糊程度，0 表示完全匹配，1 表示匹配任何文件
pub fn match_by_name(
    markers: &[PoseMarker],
    images: &[PathBuf],
    cutoff: f64,
    suffix: &PoseSuffix,
) -> Vec<(usize, PathBuf)> {
    let (stems, paths) = stem_table(images);
    let threshold = 1.0 - cutoff;
    let mut pairs = vec![];
    for (i, pose) in markers.iter().enumerate() {
        let name = suffix.clean(&pose.name);
        let matches = close_matches(name, &stems, MAX_CANDIDATES, threshold);
        match matches.first() {
            Some(&best) => {
                debug!("姿势 '{}' 匹配到 '{}'", name, stems[best]);
                pairs.push((i, paths[best].clone()));
            }
            None => debug!("姿势 '{}' 没有匹配的图片", name),
        }
    }
    pairs
}
