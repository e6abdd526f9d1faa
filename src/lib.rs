pub mod bind;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod matching;
pub mod paths;
pub mod pose;
pub mod preview;
pub mod scan;
pub mod thumbnails;

pub use config::{Opts, Preferences};
pub use error::{Result, ThumbnailError};
pub use thumbnails::{BindSummary, MatchReport, PoseThumbnails, select_pose};
