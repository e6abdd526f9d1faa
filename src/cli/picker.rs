use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::cli::SubCommandExtend;
use crate::config::Opts;
use crate::document;
use crate::error;
use crate::preview::{IconId, IconLoader, PickerEntry, PreviewCache, build_picker_entries};

#[derive(Parser, Debug, Clone)]
pub struct PickerCommand {
    /// 姿势库文件路径
    pub library: PathBuf,
    /// 输出格式
    #[arg(long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Table)]
    pub output_format: OutputFormat,
}

/// 命令行下没有真正的图标，按加载顺序分配 ID
#[derive(Debug, Default)]
pub struct SequentialIcons {
    next: IconId,
}

impl IconLoader for SequentialIcons {
    fn load(&mut self, _path: &Path) -> error::Result<IconId> {
        self.next += 1;
        Ok(self.next)
    }
}

impl SubCommandExtend for PickerCommand {
    fn run(&self, opts: &Opts) -> Result<()> {
        let prefs = opts.preferences()?;
        let library = document::load(&self.library)?;
        let mut cache = PreviewCache::new(SequentialIcons::default(), opts.conf_dir().placeholder());

        let entries =
            build_picker_entries(&library, &mut cache, &document::base_dir(&self.library)?)?;
        print_entries(&entries, self.output_format, prefs.show_labels)
    }
}

fn print_entries(entries: &[PickerEntry], format: OutputFormat, show_labels: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(entries)?)
        }
        OutputFormat::Table => {
            for entry in entries {
                if show_labels {
                    println!("{}\t{}\t{}\t{}", entry.value, entry.icon_id, entry.index, entry.label);
                } else {
                    println!("{}\t{}\t{}", entry.value, entry.icon_id, entry.index);
                }
            }
        }
    }
    Ok(())
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Table,
}
