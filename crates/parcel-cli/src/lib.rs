use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use parcel_core::{BoundaryAction, BoundaryConfig, BoundarySession, GeoPoint, Polygon};
use serde::de::DeserializeOwned;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub mod report;

use report::FieldReport;

#[derive(Debug, Parser)]
#[command(name = "parcel-cli")]
#[command(about = "Land parcel boundary measurement")]
pub struct Cli {
    /// Session configuration file (versioned JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
    Csv,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Measure a closed boundary given as a JSON array of points.
    Measure {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Replay a JSON array of session actions and report the final boundary.
    Replay {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Print CLI version.
    Version,
}

pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    match cli.command {
        Commands::Measure { file, format } => run_measure(&file, format),
        Commands::Replay { file, format } => {
            let config = load_config(cli.config.as_deref())?;
            run_replay(&file, format, config)
        }
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn run_measure(file: &Path, format: OutputFormat) -> Result<()> {
    let points: Vec<GeoPoint> = read_json(file)?;
    let polygon = Polygon::new(points).context("invalid boundary")?;

    emit(&FieldReport::new(&polygon.measure()), format)
}

fn run_replay(file: &Path, format: OutputFormat, config: BoundaryConfig) -> Result<()> {
    let actions: Vec<BoundaryAction> = read_json(file)?;
    let mut session = BoundarySession::with_config(config);

    for (index, action) in actions.into_iter().enumerate() {
        let name = action_name(&action);
        match session.dispatch(action) {
            Ok(update) => log::info!("action {}: {name} -> {}", index + 1, update.state),
            Err(error) => eprintln!("action {} ({name}) refused: {error}", index + 1),
        }
    }

    let Some(result) = session.current_result() else {
        anyhow::bail!("replay finished without a boundary (state: {})", session.state());
    };

    emit(&FieldReport::new(result).with_state(session.state()), format)
}

fn load_config(path: Option<&Path>) -> Result<BoundaryConfig> {
    match path {
        Some(path) => BoundaryConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(BoundaryConfig::default()),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    ensure_file_exists(path)?;

    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("failed to parse {}", path.display()))
}

fn emit(report: &FieldReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => println!("{}", report.to_text()),
        OutputFormat::Csv => report.write_csv(io::stdout().lock()).context("failed to write csv")?,
    }

    Ok(())
}

fn action_name(action: &BoundaryAction) -> &'static str {
    match action {
        BoundaryAction::Start => "start",
        BoundaryAction::Tap { .. } => "tap",
        BoundaryAction::Finish => "finish",
        BoundaryAction::Cancel => "cancel",
        BoundaryAction::EditVertex { .. } => "edit_vertex",
        BoundaryAction::InsertVertex { .. } => "insert_vertex",
        BoundaryAction::RemoveVertex { .. } => "remove_vertex",
        BoundaryAction::Reset => "reset",
    }
}

fn ensure_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("file does not exist: {}", path.display());
    }

    if !path.is_file() {
        anyhow::bail!("path is not a file: {}", path.display());
    }

    Ok(())
}
