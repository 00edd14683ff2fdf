mod args;
mod config;

pub use args::{Args, Command, InitArgs, ScoreArgs};
pub use config::{ScoreConfig, ScoreSettings};
