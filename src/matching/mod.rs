mod index;
mod name;
mod number;

use std::path::PathBuf;

use clap::ValueEnum;
use log::info;
use serde::{Deserialize, Serialize};

pub use index::*;
pub use name::*;
pub use number::*;

use crate::error::{Result, ThumbnailError};
use crate::pose::{PoseMarker, PoseSuffix};

/// 缩略图与姿势的匹配方式
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStrategy {
    /// 按姿势名称与文件名的相似度匹配
    Name,
    /// 按姿势的顺序匹配，给图片编号会更方便
    Index,
    /// 按姿势的帧号匹配（尚未实现）
    Frame,
}

/// 一次“从目录添加缩略图”操作的配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfiguration {
    pub strategy: MatchStrategy,
    /// 是否覆盖已有的缩略图
    pub overwrite_existing: bool,
    /// 名称匹配的模糊程度，0 为完全匹配，1 为匹配任何文件
    pub cutoff: f64,
    /// 按文件名开头的数字匹配姿势位置
    pub match_by_number: bool,
    /// 匹配第一个姿势的图片编号
    pub start_number: i64,
    /// 保存相对于姿势库文件的路径
    pub use_relative_path: bool,
}

impl Default for MatchConfiguration {
    fn default() -> Self {
        Self {
            strategy: MatchStrategy::Name,
            overwrite_existing: true,
            cutoff: 0.4,
            match_by_number: false,
            start_number: 1,
            use_relative_path: true,
        }
    }
}

impl MatchConfiguration {
    /// 在操作开始前检查配置
    pub fn validate(&self) -> Result<()> {
        if !self.cutoff.is_finite() || !(0.0..=1.0).contains(&self.cutoff) {
            return Err(ThumbnailError::InvalidConfiguration(format!(
                "模糊程度必须在 0 到 1 之间: {}",
                self.cutoff
            )));
        }
        Ok(())
    }
}

/// 匹配结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pairing {
    /// 匹配到的 (姿势位置, 图片路径)，按姿势顺序排列
    Pairs(Vec<(usize, PathBuf)>),
    /// 匹配方式尚未实现，没有做任何事情
    NotImplemented(MatchStrategy),
}

/// 按配置的方式为姿势匹配图片
pub fn pair_images(
    markers: &[PoseMarker],
    images: &[PathBuf],
    config: &MatchConfiguration,
    suffix: &PoseSuffix,
) -> Pairing {
    let pairs = match config.strategy {
        MatchStrategy::Name => match_by_name(markers, images, config.cutoff, suffix),
        MatchStrategy::Index if config.match_by_number => {
            match_by_number(markers, images, config.start_number)
        }
        MatchStrategy::Index => match_sequential(markers, images),
        MatchStrategy::Frame => {
            info!("按帧号匹配尚未实现，跳过");
            return Pairing::NotImplemented(MatchStrategy::Frame);
        }
    };
    info!("{} 个姿势中匹配到 {} 张图片", markers.len(), pairs.len());
    Pairing::Pairs(pairs)
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;

    #[rstest]
    #[case(-0.1)]
    #[case(1.5)]
    #[case(f64::NAN)]
    fn cutoff_out_of_range_is_rejected(#[case] cutoff: f64) {
        let config = MatchConfiguration { cutoff, ..Default::default() };
        assert!(matches!(config.validate(), Err(ThumbnailError::InvalidConfiguration(_))));
    }

    #[rstest]
    #[case(0.0)]
    #[case(0.4)]
    #[case(1.0)]
    fn cutoff_in_range_is_accepted(#[case] cutoff: f64) {
        let config = MatchConfiguration { cutoff, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn frame_strategy_is_a_distinct_no_op() {
        let markers = vec![PoseMarker::new("Wave", 1)];
        let images = vec![PathBuf::from("Wave.png")];
        let suffix = PoseSuffix::new("");

        let config = MatchConfiguration { strategy: MatchStrategy::Frame, ..Default::default() };
        assert_eq!(
            pair_images(&markers, &images, &config, &suffix),
            Pairing::NotImplemented(MatchStrategy::Frame)
        );

        let config = MatchConfiguration { cutoff: 0.0, ..Default::default() };
        assert_eq!(pair_images(&markers, &[], &config, &suffix), Pairing::Pairs(vec![]));
    }

    #[test]
    fn index_strategy_switches_on_match_by_number() {
        let markers = vec![PoseMarker::new("a", 1), PoseMarker::new("b", 2)];
        let images = vec![PathBuf::from("2-x.png"), PathBuf::from("y.png")];
        let suffix = PoseSuffix::new("");

        let config = MatchConfiguration { strategy: MatchStrategy::Index, ..Default::default() };
        assert_eq!(
            pair_images(&markers, &images, &config, &suffix),
            Pairing::Pairs(vec![(0, images[0].clone()), (1, images[1].clone())])
        );

        let config = MatchConfiguration { match_by_number: true, ..config };
        assert_eq!(
            pair_images(&markers, &images, &config, &suffix),
            Pairing::Pairs(vec![(1, images[0].clone())])
        );
    }
}
