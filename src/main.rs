//! csvdoc: Cross-referenced documents from CSV outlines.
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, ValueEnum};
use csvdoc::{config, input, render, Settings};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "csvdoc")]
#[command(about = "Cross-referenced documents from CSV outlines", long_about = None)]
struct Args {
    /// CSV outline to convert
    #[arg(value_name = "CSV")]
    csv: PathBuf,

    /// JSON settings file (defaults to the one named in csvdoc.toml)
    #[arg(long, short = 's')]
    settings: Option<PathBuf>,

    /// Write output to this file instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = Format::Markdown)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Markdown,
    Json,
    Text,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "csvdoc=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let cfg = config::Config::load();

    match run(args, &cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args, cfg: &config::Config) -> csvdoc::Result<()> {
    let settings = load_settings(args.settings.as_deref(), cfg)?;
    let rows = input::read_rows(&args.csv, &settings)?;
    let document = render::Document::build(&rows, &settings, cfg)?;

    let rendered = match args.format {
        Format::Markdown => document.to_markdown(),
        Format::Json => document.to_json()?,
        Format::Text => document.to_plain_text(),
    };

    if let Some(path) = args.output {
        fs::write(&path, rendered)?;
        tracing::info!(path = %path.display(), "wrote document");
    } else {
        print!("{rendered}");
    }
    Ok(())
}

fn load_settings(explicit: Option<&Path>, cfg: &config::Config) -> csvdoc::Result<Settings> {
    if let Some(path) = explicit {
        return Settings::from_json_file(path);
    }
    let default_path = PathBuf::from(&cfg.settings_file);
    if default_path.exists() {
        Settings::from_json_file(&default_path)
    } else {
        tracing::info!(
            path = %default_path.display(),
            "no settings file found, using default settings"
        );
        Ok(Settings::default())
    }
}
