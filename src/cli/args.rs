//! CLI argument definitions.

use crate::config::{InferenceDevice, OutputFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Wildlife surveillance: animal classification, fire and poaching-zone
/// overlays, from image files or a live camera.
#[derive(Debug, Parser)]
#[command(name = "wilda")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Input image files or directories to analyze.
    pub inputs: Vec<PathBuf>,

    /// Common options for analysis.
    #[command(flatten)]
    pub analyze: AnalyzeArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Manage the classifier model artifact.
    Model {
        /// Model action to perform.
        #[command(subcommand)]
        action: ModelAction,
    },
    /// Run live-camera classification until stopped.
    Watch(WatchArgs),
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Model subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ModelAction {
    /// Download the model artifact if it is not present locally.
    Fetch,
    /// Verify the model and class map files exist and the map loads.
    Check,
    /// Print the local model path.
    Path,
}

/// Arguments for the analyze path.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Path to the ONNX model file (overrides config).
    #[arg(long, env = "WILDA_MODEL_PATH")]
    pub model_path: Option<PathBuf>,

    /// Path to the class map JSON file (overrides config).
    #[arg(long, env = "WILDA_CLASS_MAP")]
    pub class_map: Option<PathBuf>,

    /// Output formats (comma-separated: json,csv).
    #[arg(short, long, value_delimiter = ',', env = "WILDA_FORMAT")]
    pub format: Option<Vec<OutputFormat>>,

    /// Inference device.
    #[arg(long, value_enum, env = "WILDA_DEVICE")]
    pub device: Option<InferenceDevice>,

    /// Skip saving the annotated image.
    #[arg(long)]
    pub no_annotated: bool,

    /// Stop at the first failed input instead of continuing.
    #[arg(long)]
    pub fail_fast: bool,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Arguments for the watch subcommand.
#[derive(Debug, Args)]
pub struct WatchArgs {
    /// V4L2 capture device path.
    #[arg(long, env = "WILDA_CAMERA")]
    pub camera: Option<String>,

    /// Directory annotated frames are published to.
    #[arg(short, long, default_value = "frames")]
    pub output_dir: PathBuf,

    /// Stop after this many frames (default: run until interrupted).
    #[arg(long)]
    pub max_frames: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_plain_inputs() {
        let cli = Cli::try_parse_from(["wilda", "a.png", "b.jpg"]).ok();
        let cli = cli.expect("parse failed");
        assert_eq!(cli.inputs.len(), 2);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parses_watch() {
        let cli =
            Cli::try_parse_from(["wilda", "watch", "--max-frames", "10"]).expect("parse failed");
        match cli.command {
            Some(Command::Watch(args)) => assert_eq!(args.max_frames, Some(10)),
            other => panic!("expected watch command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_quiet_with_verbose() {
        assert!(Cli::try_parse_from(["wilda", "-q", "-v", "a.png"]).is_err());
    }
}
