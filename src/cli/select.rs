use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::cli::SubCommandExtend;
use crate::config::Opts;
use crate::document;
use crate::thumbnails::select_pose;

#[derive(Parser, Debug, Clone)]
pub struct SelectCommand {
    /// 姿势库文件路径
    pub library: PathBuf,
    /// 选择器的值，即姿势的帧号
    #[arg(allow_negative_numbers = true)]
    pub value: String,
}

impl SubCommandExtend for SelectCommand {
    fn run(&self, _opts: &Opts) -> Result<()> {
        let mut library = document::load(&self.library)?;
        let index = select_pose(&mut library, &self.value)?;
        document::save(&library, &self.library)?;
        println!("{}\t{}", index, library.markers[index].name);
        Ok(())
    }
}
