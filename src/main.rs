//! Mosaic - Entry Point

use clap::Parser;
use mosaic::config::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    CliOverrides, ResolvedConfig,
};
use mosaic::logging::LogTarget;
use mosaic::model::AppError;
use mosaic::simulate::{render_table, simulate, SimulationOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Mosaic - lay out a masonry gallery from a list of item heights
#[derive(Parser, Debug)]
#[command(name = "mosaic")]
#[command(version)]
#[command(about = "Simulate a masonry gallery layout from a JSON array of item heights")]
pub struct Args {
    /// Path to a JSON array of item heights (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Container width in pixels
    #[arg(short, long, default_value = "1200")]
    pub width: u32,

    /// Items revealed per pagination step
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Maximum number of columns
    #[arg(long)]
    pub max_columns: Option<usize>,

    /// Preferred column width in pixels
    #[arg(long)]
    pub column_width: Option<u32>,

    /// Place item i in column i mod columns
    #[arg(long)]
    pub strict: bool,

    /// Enable stream mode, revealing this many items per data request
    #[arg(long)]
    pub stream_chunk: Option<usize>,

    /// Resize the container to this width once everything is laid out
    #[arg(long)]
    pub resize_to: Option<u32>,

    /// Output format
    #[arg(short, long, default_value = "json", value_parser = ["json", "table"])]
    pub format: String,

    /// Write logs to stderr instead of the log file
    #[arg(long)]
    pub log_stderr: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Engine settings given explicitly on the command line.
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            batch_size: self.batch_size,
            max_columns: self.max_columns,
            column_width: self.column_width,
            strict_order: self.strict.then_some(true),
        }
    }
}

/// Resolve configuration: Defaults → Config File → Env Vars → CLI Args.
fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    let config_file = load_config_with_precedence(args.config.clone())?;
    let merged = merge_config(config_file);
    let with_env = apply_env_overrides(merged)?;
    Ok(apply_cli_overrides(with_env, args.overrides()))
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    let target = if args.log_stderr {
        LogTarget::Stderr
    } else {
        LogTarget::File(config.log_file_path.clone())
    };
    mosaic::logging::init(&target, "info")?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let heights = mosaic::source::read_heights(args.file.as_deref())?;

    let mut gallery = config.gallery;
    gallery.stream_mode = args.stream_chunk.is_some();
    let options = SimulationOptions {
        stream_chunk: args.stream_chunk,
        resize_to: args.resize_to,
    };
    let report = simulate(gallery, args.width, &heights, options)?;

    let mut stdout = std::io::stdout().lock();
    if args.format == "table" {
        stdout.write_all(render_table(&report.layout).as_bytes())?;
    } else {
        serde_json::to_writer_pretty(&mut stdout, &report).map_err(std::io::Error::from)?;
        writeln!(stdout)?;
    }
    Ok(())
}
