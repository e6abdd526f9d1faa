use clap::Parser;
use log::debug;

use pose_thumbnails::Opts;
use pose_thumbnails::cli::SubCommandExtend;
use pose_thumbnails::config::SubCommand;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let opts = Opts::parse();
    debug!("配置目录: {}", opts.conf_dir().path().display());

    match &opts.subcmd {
        SubCommand::Init(config) => config.run(&opts),
        SubCommand::Add(config) => config.run(&opts),
        SubCommand::AddDir(config) => config.run(&opts),
        SubCommand::Picker(config) => config.run(&opts),
        SubCommand::Select(config) => config.run(&opts),
    }
}
