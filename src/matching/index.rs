use std::collections::VecDeque;
use std::path::PathBuf;

use log::debug;

use super::number::numbered_images;
use crate::pose::PoseMarker;

/// 按顺序一一对应姿势和图片，多余的姿势或图片会被忽略
pub fn match_sequential(markers: &[PoseMarker], images: &[PathBuf]) -> Vec<(usize, PathBuf)> {
    markers.iter().zip(images).enumerate().map(|(i, (_, image))| (i, image.clone())).collect()
}

/// 按文件名开头的编号匹配姿势
///
/// 位置为 `i` 的姿势只有在 `i + start_number` 等于剩余图片中第一张的编号时才会匹配，
/// 匹配成功后该图片被消耗，否则跳过这个姿势
pub fn match_by_number(
    markers: &[PoseMarker],
    images: &[PathBuf],
    start_number: i64,
) -> Vec<(usize, PathBuf)> {
    let mut numbered = VecDeque::from(numbered_images(images));
    if numbered.is_empty() {
        debug!("没有以数字开头的图片");
        return vec![];
    }

    let mut pairs = vec![];
    for (i, pose) in markers.iter().enumerate() {
        let Some(head_number) = numbered.front().map(|head| head.number) else {
            break;
        };
        let wanted = i64::try_from(i).ok().and_then(|i| i.checked_add(start_number));
        if wanted != Some(head_number) {
            debug!("姿势 '{}' 需要编号 {:?}，当前图片编号为 {}", pose.name, wanted, head_number);
            continue;
        }
        if let Some(head) = numbered.pop_front() {
            pairs.push((i, head.image));
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;

    fn poses(n: usize) -> Vec<PoseMarker> {
        (0..n).map(|i| PoseMarker::new(format!("pose{}", i), i as i64 * 10)).collect()
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn sequential_is_bounded_by_shorter_side() {
        let pairs = match_sequential(&poses(3), &paths(&["a.png", "b.png"]));
        assert_eq!(pairs, vec![(0, PathBuf::from("a.png")), (1, PathBuf::from("b.png"))]);

        let pairs = match_sequential(&poses(1), &paths(&["a.png", "b.png"]));
        assert_eq!(pairs, vec![(0, PathBuf::from("a.png"))]);
    }

    #[test]
    fn numbers_are_offset_by_start_number() {
        let pairs = match_by_number(&poses(3), &paths(&["002-a.png", "003-b.png"]), 1);
        assert_eq!(pairs, vec![(1, PathBuf::from("002-a.png")), (2, PathBuf::from("003-b.png"))]);
    }

    #[rstest]
    #[case::zero_based(0, &["0.png", "1.png"], vec![(0, "0.png"), (1, "1.png")])]
    #[case::one_based(1, &["1.png", "2.png"], vec![(0, "1.png"), (1, "2.png")])]
    #[case::negative(-1, &["0.png"], vec![(1, "0.png")])]
    #[case::head_too_low(1, &["0.png", "1.png"], vec![])]
    #[case::too_high(5, &["0.png", "1.png"], vec![])]
    fn start_number_selects_first_pose(
        #[case] start: i64,
        #[case] files: &[&str],
        #[case] expected: Vec<(usize, &str)>,
    ) {
        let pairs = match_by_number(&poses(2), &paths(files), start);
        let expected: Vec<_> = expected.into_iter().map(|(i, p)| (i, PathBuf::from(p))).collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn unnumbered_images_are_ignored() {
        assert!(match_by_number(&poses(3), &paths(&["a.png", "b.png"]), 0).is_empty());
    }

    #[test]
    fn gap_blocks_the_remaining_images() {
        // 编号 5 永远不会被匹配，后面的图片也不会被消耗
        let pairs = match_by_number(&poses(4), &paths(&["1.png", "5.png", "3.png"]), 1);
        assert_eq!(pairs, vec![(0, PathBuf::from("1.png"))]);
    }

    #[test]
    fn duplicate_numbers_consume_first_only() {
        let pairs = match_by_number(&poses(3), &paths(&["1-a.png", "01-b.png", "2.png"]), 1);
        assert_eq!(pairs, vec![(0, PathBuf::from("1-a.png"))]);
    }
}
