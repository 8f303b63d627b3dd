//! Command-line interface definitions.

mod args;

pub use args::{AnalyzeArgs, Cli, Command, ConfigAction, ModelAction, WatchArgs};
