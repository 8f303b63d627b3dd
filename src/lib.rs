//! Wilda - wildlife surveillance CLI tool.
//!
//! This crate classifies animal species in images or live camera frames
//! using an ONNX model, with placeholder fire and poaching-zone overlays.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod detect;
pub mod error;
pub mod image;
pub mod inference;
pub mod labels;
pub mod live;
pub mod output;
pub mod pipeline;
pub mod provision;

use clap::Parser;
use cli::{AnalyzeArgs, Cli, Command, ConfigAction, ModelAction, WatchArgs};
use config::{Config, load_default_config, save_default_config, validate_config};
use constants::DEFAULT_CAMERA_DEVICE;
use detect::{AlwaysClear, InsetDetector, Overlay};
use crate::image::PreprocessSpec;
use inference::{AnalysisContext, OnnxClassifier};
use labels::ClassMap;
use live::{CameraSource, DirectorySink, FrameLoop, StopSignal};
use pipeline::{ProcessOptions, collect_input_files, process_image};
use std::path::PathBuf;
use tracing::{error, info, warn};

pub use error::{Error, Result};

/// Main entry point for the wilda CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.analyze.verbose, cli.analyze.quiet);

    // Load and validate configuration; startup-time failures halt the
    // process, there is no degraded mode.
    let mut config = load_default_config()?;
    apply_overrides(&mut config, &cli.analyze);
    validate_config(&config)?;

    if let Some(command) = cli.command {
        return handle_command(command, &config);
    }

    if cli.inputs.is_empty() {
        // clap renders usage; mirror its exit code for "nothing to do".
        eprintln!("No inputs provided. Try 'wilda --help'.");
        std::process::exit(2);
    }

    analyze_files(&cli.inputs, &cli.analyze, &config)
}

fn apply_overrides(config: &mut Config, args: &AnalyzeArgs) {
    if let Some(ref path) = args.model_path {
        config.model.path.clone_from(path);
    }
    if let Some(ref path) = args.class_map {
        config.model.class_map.clone_from(path);
    }
    if let Some(ref formats) = args.format {
        config.defaults.formats.clone_from(formats);
    }
    if let Some(device) = args.device {
        config.inference.device = device;
    }
    if args.no_annotated {
        config.defaults.save_annotated = false;
    }
}

/// Provision the model on first use, load the class map and build the
/// analysis context. Created once per process and shared by every
/// classification request.
fn build_context(config: &Config) -> Result<AnalysisContext<OnnxClassifier>> {
    if !config.model.path.exists() {
        let Some(ref url) = config.model.url else {
            return Err(Error::ModelFileNotFound {
                path: config.model.path.clone(),
            });
        };
        provision::ensure_model_blocking(&config.model.path, url, config.model.sha256.as_deref())?;
    }

    info!("Loading class map: {}", config.model.class_map.display());
    let class_map = ClassMap::load(&config.model.class_map)?;
    info!("{} classes loaded", class_map.len());

    info!("Loading model: {}", config.model.path.display());
    let classifier = OnnxClassifier::load(
        &config.model,
        config.inference.device,
        config.inference.intra_threads,
    )?;

    Ok(AnalysisContext::new(
        classifier,
        class_map,
        PreprocessSpec::new(config.model.normalization),
    ))
}

/// Analyze input files with the given options.
fn analyze_files(inputs: &[PathBuf], args: &AnalyzeArgs, config: &Config) -> Result<()> {
    let files = collect_input_files(inputs)?;
    if files.is_empty() {
        return Err(Error::NoValidImageFiles);
    }
    info!("Found {} image file(s) to process", files.len());

    let mut ctx = build_context(config)?;
    let detector = InsetDetector::default();
    let fire = AlwaysClear;
    let opts = ProcessOptions {
        formats: config.defaults.formats.clone(),
        save_annotated: config.defaults.save_annotated,
    };

    let mut processed = 0u32;
    let mut errors = 0u32;

    for file in &files {
        match process_image(file, &mut ctx, &detector, &fire, &opts) {
            Ok(_) => processed += 1,
            Err(e) => {
                error!("Failed to process {}: {}", file.display(), e);
                errors += 1;
                if args.fail_fast {
                    return Err(e);
                }
            }
        }
    }

    info!("Complete: {processed} processed, {errors} errors");
    if errors > 0 {
        warn!("{errors} file(s) had errors");
    }

    Ok(())
}

/// Run the live-camera loop until interrupted or the frame budget runs out.
fn watch(args: &WatchArgs, config: &Config) -> Result<()> {
    let mut ctx = build_context(config)?;
    let mut overlay = Overlay::new(config.overlay.font.as_deref())?;
    let mut sink = DirectorySink::create(&args.output_dir)?;

    let stop = StopSignal::new();
    let handler_stop = stop.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        handler_stop.request_stop();
    }) {
        warn!("Failed to install Ctrl+C handler: {e}");
    }

    let device = args
        .camera
        .clone()
        .unwrap_or_else(|| DEFAULT_CAMERA_DEVICE.to_string());
    info!("Watching {device} (Ctrl+C to stop)");

    let mut frame_loop = FrameLoop::new();
    let summary = frame_loop.run(
        || CameraSource::open(&device),
        &mut ctx,
        &mut overlay,
        &mut sink,
        &stop,
        args.max_frames,
    )?;

    info!(
        "Published {} frame(s) to {}",
        summary.frames,
        args.output_dir.display()
    );
    Ok(())
}

fn handle_command(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action),
        Command::Model { action } => handle_model_command(action, config),
        Command::Watch(args) => watch(&args, config),
    }
}

fn handle_config_command(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = config::config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_default_config(&Config::default())?;
                println!("Created configuration file: {}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config::config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn handle_model_command(action: ModelAction, config: &Config) -> Result<()> {
    match action {
        ModelAction::Fetch => {
            let Some(ref url) = config.model.url else {
                return Err(Error::ModelFileNotFound {
                    path: config.model.path.clone(),
                });
            };
            let path = provision::ensure_model_blocking(
                &config.model.path,
                url,
                config.model.sha256.as_deref(),
            )?;
            println!("Model available at: {}", path.display());
            Ok(())
        }
        ModelAction::Check => {
            if !config.model.path.exists() {
                return Err(Error::ModelFileNotFound {
                    path: config.model.path.clone(),
                });
            }
            let class_map = ClassMap::load(&config.model.class_map)?;
            println!(
                "Model: {} OK\nClass map: {} OK ({} classes)",
                config.model.path.display(),
                config.model.class_map.display(),
                class_map.len()
            );
            Ok(())
        }
        ModelAction::Path => {
            println!("{}", config.model.path.display());
            Ok(())
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // ORT logging is suppressed by default; CPU fallback in auto mode is
    // expected and noisy. Use -v for ORT warnings, -vvv for full trace.
    let filter_str = if quiet {
        "warn,ort=off".to_string()
    } else {
        match verbose {
            0 => "info,ort=off".to_string(),
            1 => "debug,ort=warn".to_string(),
            2 => "trace,ort=info".to_string(),
            _ => "trace".to_string(),
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    fmt().with_env_filter(filter).init();
}
