use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::cli::SubCommandExtend;
use crate::config::Opts;
use crate::document;
use crate::thumbnails::PoseThumbnails;

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// 姿势库文件路径
    pub library: PathBuf,
    /// 缩略图路径
    pub image: PathBuf,
    /// 姿势的位置，不填则使用激活的姿势
    #[arg(short, long, value_name = "INDEX")]
    pub pose: Option<usize>,
    /// 保存绝对路径，而不是相对于姿势库文件的路径
    #[arg(long)]
    pub absolute: bool,
}

impl SubCommandExtend for AddCommand {
    fn run(&self, opts: &Opts) -> Result<()> {
        let prefs = opts.preferences()?;
        let mut library = document::load(&self.library)?;
        let session = PoseThumbnails::new(prefs.suffix(), document::base_dir(&self.library)?);

        let image = std::path::absolute(&self.image)?;
        let outcome = session.add_thumbnail(&mut library, self.pose, &image, !self.absolute)?;
        document::save(&library, &self.library)?;

        println!("[OK] {:?} {}", outcome, image.display());
        Ok(())
    }
}
