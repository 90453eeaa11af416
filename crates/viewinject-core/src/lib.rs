//! Core of viewinject: marker and element model, placement filter, per-round
//! proxy registry, Java synthesis and the round-driven processor.
//!
//! Hosts plug in through the traits in [`host`]; an in-memory host lives in
//! [`host::memory`].
#![warn(unreachable_pub)]

pub mod collect;
pub mod config;
pub mod element;
pub mod emit;
pub mod error;
pub mod filter;
pub mod host;
pub mod java;
pub mod marker;
pub mod model;
pub mod processor;
pub mod registry;

use crate::{
    config::ConfigError,
    emit::EmitError,
    host::FilerError,
    processor::InitError,
};
use thiserror::Error as ThisError;

///
/// Prelude
///
/// Domain vocabulary only; hosts import error types explicitly.
///

pub mod prelude {
    pub use crate::{
        config::GeneratorConfig,
        element::{Element, ElementKind, Location, Modifier, TypeElement},
        host::{
            Diagnostic, Filer, Level, Messager, ProcessingEnvironment, RoundEnvironment,
            SourceVersion,
        },
        marker::{Marker, MarkerKind, ViewId},
        processor::{RoundOutcome, ViewInjectProcessor},
    };
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    ConfigError(#[from] ConfigError),

    #[error(transparent)]
    EmitError(#[from] EmitError),

    #[error(transparent)]
    FilerError(#[from] FilerError),

    #[error(transparent)]
    InitError(#[from] InitError),
}
