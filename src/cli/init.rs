use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use log::info;

use crate::cli::SubCommandExtend;
use crate::config::Opts;
use crate::document;
use crate::pose::{PoseLibrary, PoseMarker};

#[derive(Parser, Debug, Clone)]
pub struct InitCommand {
    /// 姿势库文件路径
    pub library: PathBuf,
    /// 姿势，格式为 名称@帧号
    #[arg(value_name = "NAME@FRAME", value_parser = parse_marker, required = true)]
    pub poses: Vec<PoseMarker>,
    /// 如果文件已存在，是否覆盖
    #[arg(long)]
    pub force: bool,
}

impl SubCommandExtend for InitCommand {
    fn run(&self, _opts: &Opts) -> Result<()> {
        if self.library.exists() && !self.force {
            return Err(anyhow!("姿势库文件已存在: {}", self.library.display()));
        }
        let library = PoseLibrary::new(self.poses.clone());
        document::save(&library, &self.library)?;
        info!("创建姿势库，共 {} 个姿势", library.markers.len());
        Ok(())
    }
}

fn parse_marker(s: &str) -> Result<PoseMarker> {
    let (name, frame) = s.rsplit_once('@').ok_or_else(|| anyhow!("无效的姿势: {}", s))?;
    if name.is_empty() {
        return Err(anyhow!("姿势名称不能为空: {}", s));
    }
    Ok(PoseMarker::new(name, frame.parse()?))
}
