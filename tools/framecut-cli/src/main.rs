//! Framecut CLI: headless driver for the clip editor.
//!
//! Usage:
//!   framecut replay <SCRIPT>   Replay a scripted editing session
//!   framecut resize            Solve an aspect-locked output size
//!   framecut export            Build and print one export request
//!   framecut config            Show or write the configuration

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};

use framecut_common::config::AppConfig;
use framecut_editor_model::geometry::Resolution;

mod commands;

#[derive(Parser)]
#[command(
    name = "framecut",
    about = "Trim, resize, and export recorded clips",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSONL script of editor events against a simulated clip
    Replay {
        /// Path to the script (one event or host command per line)
        script: PathBuf,

        /// Clip duration (seconds)
        #[arg(long, default_value = "10.0")]
        duration: f64,

        /// Clip frame size
        #[arg(long, default_value = "1920x1080")]
        resolution: Resolution,

        /// Source loaded before the script runs
        #[arg(long, default_value = "file:///tmp/framecut-clip.mp4")]
        src: String,
    },

    /// Solve the companion dimension for an aspect-locked resize
    #[command(group(ArgGroup::new("edit").required(true).args(["width", "height"])))]
    Resize {
        /// Source frame size
        #[arg(long)]
        base: Resolution,

        /// New width
        #[arg(long)]
        width: Option<u32>,

        /// New height
        #[arg(long)]
        height: Option<u32>,
    },

    /// Build one export request and print it
    Export {
        /// Clip frame size
        #[arg(long)]
        resolution: Resolution,

        /// Clip duration (seconds)
        #[arg(long)]
        duration: f64,

        /// Trim in point (seconds)
        #[arg(long = "in")]
        in_point: Option<f64>,

        /// Trim out point (seconds)
        #[arg(long = "out")]
        out_point: Option<f64>,

        /// Output width
        #[arg(long)]
        width: Option<u32>,

        /// Output height
        #[arg(long)]
        height: Option<u32>,

        /// Export at the maximum frame rate instead of 15 fps
        #[arg(long)]
        fps_max: bool,

        /// Output format
        #[arg(long, default_value = "gif")]
        format: String,

        /// Run this plugin instead of the format's default service
        #[arg(long)]
        plugin: Option<String>,

        /// Source path placed in the request
        #[arg(long, default_value = "file:///tmp/framecut-clip.mp4")]
        src: String,
    },

    /// Show the effective configuration
    Config {
        /// Write the default configuration to the standard location
        #[arg(long)]
        write_default: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load();

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    framecut_common::logging::init_logging(&logging)?;

    match cli.command {
        Commands::Replay {
            script,
            duration,
            resolution,
            src,
        } => commands::replay::run(script, duration, resolution, src, &config).await,
        Commands::Resize {
            base,
            width,
            height,
        } => commands::resize::run(base, width, height),
        Commands::Export {
            resolution,
            duration,
            in_point,
            out_point,
            width,
            height,
            fps_max,
            format,
            plugin,
            src,
        } => commands::export::run(
            commands::export::ExportArgs {
                resolution,
                duration,
                in_point,
                out_point,
                width,
                height,
                fps_max,
                format,
                plugin,
                src,
            },
            &config,
        ),
        Commands::Config { write_default } => commands::config::run(write_default, &config),
    }
}
