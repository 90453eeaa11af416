//! viewinject command-line interface.
//!
//! Runs the generator over a symbol-table manifest. Logs go to stderr; the
//! summary goes to stdout.

use clap::{Parser, Subcommand, ValueEnum};
use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use viewinject::{BuildReport, GeneratorConfig, Level};

/// Generate view injectors from a symbol-table manifest
#[derive(Debug, Parser)]
#[command(name = "viewinject")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Summary format
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate injector sources into an output directory
    Generate {
        /// Manifest file (.toml or .json)
        #[arg(long, short)]
        manifest: PathBuf,

        /// Output root; packages become subdirectories
        #[arg(long, short)]
        out: PathBuf,

        /// Generator config (TOML)
        #[arg(long, env = "VIEWINJECT_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Validate a manifest and report diagnostics without writing files
    Check {
        /// Manifest file (.toml or .json)
        #[arg(long, short)]
        manifest: PathBuf,

        /// Generator config (TOML)
        #[arg(long, env = "VIEWINJECT_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Generate {
            manifest,
            out,
            config,
        } => load_config(config.as_deref())
            .and_then(|config| viewinject::generate(manifest, out, config)),
        Command::Check { manifest, config } => {
            load_config(config.as_deref()).and_then(|config| viewinject::check(manifest, config))
        }
    };

    match result {
        Ok(report) => {
            if let Err(err) = print_summary(&report, cli.format, &mut io::stdout().lock()) {
                tracing::error!(%err, "failed to write summary");
                return ExitCode::FAILURE;
            }

            if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<GeneratorConfig, viewinject::Error> {
    match path {
        Some(path) => Ok(viewinject::build::load_config(path)?),
        None => Ok(GeneratorConfig::default()),
    }
}

fn print_summary(report: &BuildReport, format: Format, out: &mut impl Write) -> io::Result<()> {
    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)
        }
        Format::Text => {
            for path in &report.written {
                writeln!(out, "wrote {}", path.display())?;
            }
            for diagnostic in report.diagnostics.iter().filter(|d| d.level != Level::Note) {
                writeln!(out, "{diagnostic}")?;
            }
            writeln!(
                out,
                "{} injector(s) generated, {} error(s), {} warning(s)",
                report.generated_count(),
                report.error_count(),
                report.count(Level::Warning)
            )
        }
    }
}
