mod add;
mod add_dir;
mod init;
mod picker;
mod select;

pub use add::*;
pub use add_dir::*;
pub use init::*;
pub use picker::*;
pub use select::*;

use crate::config::Opts;

pub trait SubCommandExtend {
    fn run(&self, opts: &Opts) -> anyhow::Result<()>;
}
