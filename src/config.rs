use std::convert::Infallible;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::cli::*;
use crate::error::Result;
use crate::pose::PoseSuffix;

static CONF_DIR: LazyLock<ConfDir> = LazyLock::new(|| {
    let path = ProjectDirs::from("", "posethumbs", "pose-thumbnails")
        .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".pose-thumbnails"));
    ConfDir { path }
});

#[derive(Parser, Debug, Clone)]
#[command(name = "pose-thumbnails", version)]
pub struct Opts {
    #[command(subcommand)]
    pub subcmd: SubCommand,
    /// 配置文件目录
    #[arg(short, long)]
    pub conf_dir: Option<ConfDir>,
    /// 姿势缩略图后缀，覆盖配置文件中的值
    #[arg(short, long, value_name = "SUFFIX")]
    pub suffix: Option<String>,
}

impl Opts {
    pub fn conf_dir(&self) -> ConfDir {
        self.conf_dir.clone().unwrap_or_else(|| CONF_DIR.clone())
    }

    /// 读取配置文件，并应用命令行中的覆盖项
    pub fn preferences(&self) -> Result<Preferences> {
        let mut prefs = Preferences::load(self.conf_dir().prefs())?;
        if let Some(suffix) = &self.suffix {
            prefs.pose_thumbnail_suffix = suffix.clone();
        }
        Ok(prefs)
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum SubCommand {
    /// 创建新的姿势库文件
    Init(InitCommand),
    /// 为一个姿势添加缩略图
    Add(AddCommand),
    /// 从目录中为所有姿势匹配缩略图
    AddDir(AddDirCommand),
    /// 列出图标选择器中的所有项
    Picker(PickerCommand),
    /// 根据选择器的值激活姿势
    Select(SelectCommand),
}

#[derive(Debug, Clone)]
pub struct ConfDir {
    path: PathBuf,
}

impl ConfDir {
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// 返回配置文件的路径
    pub fn prefs(&self) -> PathBuf {
        self.path.join("prefs.json")
    }

    /// 返回“没有缩略图”占位图片的路径
    pub fn placeholder(&self) -> PathBuf {
        self.path.join("no_thumbnail.png")
    }
}

impl FromStr for ConfDir {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self { path: PathBuf::from(s) })
    }
}

/// 用户配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// 已有缩略图的姿势名称后缀
    pub pose_thumbnail_suffix: String,
    /// 图标选择器是否显示名称
    pub show_labels: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self { pose_thumbnail_suffix: " (thumbnail)".to_owned(), show_labels: true }
    }
}

impl Preferences {
    /// 读取配置文件，文件不存在时使用默认配置
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("配置文件不存在，使用默认配置: {}", path.display());
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn suffix(&self) -> PoseSuffix {
        PoseSuffix::new(self.pose_thumbnail_suffix.as_str())
    }
}
