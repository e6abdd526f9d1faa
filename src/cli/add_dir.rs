use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::warn;

use crate::cli::SubCommandExtend;
use crate::config::Opts;
use crate::document;
use crate::matching::{MatchConfiguration, MatchStrategy};
use crate::thumbnails::{MatchReport, PoseThumbnails};

#[derive(Parser, Debug, Clone)]
pub struct AddDirCommand {
    /// 姿势库文件路径
    pub library: PathBuf,
    /// 图片所在目录
    pub directory: PathBuf,
    /// 选择的图片文件名，不填则使用目录下的所有图片
    pub files: Vec<String>,
    /// 匹配方式
    #[arg(short, long, value_enum, default_value_t = MatchStrategy::Name)]
    pub match_by: MatchStrategy,
    /// 保留已有的缩略图，不覆盖
    #[arg(long)]
    pub keep_existing: bool,
    /// 名称匹配的模糊程度，0 为完全匹配，1 为匹配任何文件
    #[arg(long, value_name = "FUZZYNESS", default_value_t = 0.4)]
    pub cutoff: f64,
    /// 如果文件名以数字开头，按数字匹配姿势的位置
    #[arg(long)]
    pub match_by_number: bool,
    /// 匹配第一个姿势的图片编号
    #[arg(long, value_name = "N", default_value_t = 1, allow_negative_numbers = true)]
    pub start_number: i64,
    /// 保存绝对路径，而不是相对于姿势库文件的路径
    #[arg(long)]
    pub absolute: bool,
}

impl AddDirCommand {
    pub fn match_config(&self) -> MatchConfiguration {
        MatchConfiguration {
            strategy: self.match_by,
            overwrite_existing: !self.keep_existing,
            cutoff: self.cutoff,
            match_by_number: self.match_by_number,
            start_number: self.start_number,
            use_relative_path: !self.absolute,
        }
    }
}

impl SubCommandExtend for AddDirCommand {
    fn run(&self, opts: &Opts) -> Result<()> {
        let prefs = opts.preferences()?;
        let mut library = document::load(&self.library)?;
        let session = PoseThumbnails::new(prefs.suffix(), document::base_dir(&self.library)?);

        let directory = std::path::absolute(&self.directory)?;
        let report =
            session.add_thumbnails_from_dir(&mut library, &directory, &self.files, &self.match_config())?;

        match report {
            MatchReport::Applied(summary) => {
                for (index, image) in &summary.bindings {
                    println!("{}\t{}\t{}", index, library.markers[*index].name, image.display());
                }
                println!(
                    "created: {}, updated: {}, kept: {}, unmatched: {}",
                    summary.created, summary.updated, summary.kept, summary.unmatched
                );
                document::save(&library, &self.library)?;
            }
            MatchReport::NotImplemented(strategy) => {
                warn!("匹配方式 {:?} 尚未实现，姿势库没有修改", strategy);
                println!("not implemented: {:?}", strategy);
            }
        }
        Ok(())
    }
}
