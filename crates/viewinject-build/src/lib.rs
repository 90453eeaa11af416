//! Filesystem host for viewinject.
//!
//! Loads a symbol-table manifest, runs the processor over it and writes the
//! generated injectors under an output directory. `generate` and `check` are
//! the drivers used by the CLI; `build!` wraps `generate` for build scripts.

mod config;
mod filer;
mod macros;
mod manifest;
mod messager;

pub use config::{load_config, parse_config};
pub use filer::FsFiler;
pub use manifest::{ClassEntry, Manifest, ManifestError, MemberEntry};
pub use messager::TracingMessager;
pub use viewinject_core::config::GeneratorConfig;

use serde::Serialize;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;
use viewinject_core::{
    config::ConfigError,
    host::{
        Diagnostic, Filer, Level, ProcessingEnvironment,
        memory::{MemoryFiler, MemoryRound},
    },
    processor::{InitError, RoundOutcome, ViewInjectProcessor},
    prelude::SourceVersion,
};

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    BuildError(#[from] BuildError),

    #[error(transparent)]
    ManifestError(#[from] ManifestError),
}

///
/// BuildError
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error("failed to read config '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Init(#[from] InitError),

    #[error("OUT_DIR is not set; build! must run from a build script")]
    MissingOutDir,

    #[error("failed to prepare output directory '{}': {source}", .path.display())]
    OutDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("code generation reported {0} error(s)")]
    Diagnostics(usize),
}

///
/// HostEnvironment
///
/// Processing environment backed by a filer of the caller's choice and a
/// tracing messager.
///

#[derive(Debug)]
pub struct HostEnvironment<F> {
    filer: Option<F>,
    messager: Option<TracingMessager>,
    source_version: SourceVersion,
}

impl<F: Filer> HostEnvironment<F> {
    #[must_use]
    pub fn new(filer: F, source_version: SourceVersion) -> Self {
        Self {
            filer: Some(filer),
            messager: Some(TracingMessager::new()),
            source_version,
        }
    }
}

impl<F: Filer> ProcessingEnvironment for HostEnvironment<F> {
    type Filer = F;
    type Messager = TracingMessager;

    fn filer(&mut self) -> Option<F> {
        self.filer.take()
    }

    fn messager(&mut self) -> Option<TracingMessager> {
        self.messager.take()
    }

    fn latest_source_version(&self) -> SourceVersion {
        self.source_version
    }
}

///
/// BuildReport
///

#[derive(Clone, Debug, Serialize)]
pub struct BuildReport {
    pub rounds: Vec<RoundOutcome>,
    pub written: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildReport {
    #[must_use]
    pub fn count(&self, level: Level) -> usize {
        self.diagnostics.iter().filter(|d| d.level == level).count()
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(Level::Error)
    }

    #[must_use]
    pub fn generated_count(&self) -> usize {
        self.rounds.iter().map(|r| r.generated.len()).sum()
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error_count() == 0
    }

    /// Turn reported errors into a hard failure.
    pub fn into_result(self) -> Result<Self, BuildError> {
        match self.error_count() {
            0 => Ok(self),
            n => Err(BuildError::Diagnostics(n)),
        }
    }
}

/// Load `manifest` and write injectors under `out_dir`.
pub fn generate(
    manifest: &Path,
    out_dir: &Path,
    config: GeneratorConfig,
) -> Result<BuildReport, Error> {
    let manifest = Manifest::load(manifest)?;

    generate_manifest(&manifest, out_dir, config)
}

/// Write injectors for an already loaded manifest.
pub fn generate_manifest(
    manifest: &Manifest,
    out_dir: &Path,
    config: GeneratorConfig,
) -> Result<BuildReport, Error> {
    fs::create_dir_all(out_dir).map_err(|source| BuildError::OutDir {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut env = HostEnvironment::new(FsFiler::new(out_dir), manifest.source_version());
    let (filer, report) = run(&mut env, manifest, config)?;

    Ok(BuildReport {
        written: filer.written().to_vec(),
        ..report
    })
}

/// Load `manifest` and run every check without writing anything.
pub fn check(manifest: &Path, config: GeneratorConfig) -> Result<BuildReport, Error> {
    let manifest = Manifest::load(manifest)?;

    check_manifest(&manifest, config)
}

/// Run every check for an already loaded manifest.
pub fn check_manifest(manifest: &Manifest, config: GeneratorConfig) -> Result<BuildReport, Error> {
    let mut env = HostEnvironment::new(MemoryFiler::new(), manifest.source_version());
    let (_, report) = run(&mut env, manifest, config)?;

    Ok(report)
}

/// `OUT_DIR/viewinject`, for build scripts.
pub fn build_script_out_dir() -> Result<PathBuf, BuildError> {
    env::var_os("OUT_DIR")
        .map(|dir| PathBuf::from(dir).join("viewinject"))
        .ok_or(BuildError::MissingOutDir)
}

// One round with the manifest's elements, then the closing empty round.
fn run<F: Filer>(
    env: &mut HostEnvironment<F>,
    manifest: &Manifest,
    config: GeneratorConfig,
) -> Result<(F, BuildReport), Error> {
    let mut processor = ViewInjectProcessor::init(env, config).map_err(BuildError::from)?;

    let rounds = vec![
        processor.process(&MemoryRound::new(manifest.elements())),
        processor.process(&MemoryRound::final_round()),
    ];

    let (filer, messager) = processor.into_parts();
    let report = BuildReport {
        rounds,
        written: Vec::new(),
        diagnostics: messager.into_diagnostics(),
    };

    tracing::debug!(
        generated = report.generated_count(),
        errors = report.error_count(),
        "build finished"
    );

    Ok((filer, report))
}
