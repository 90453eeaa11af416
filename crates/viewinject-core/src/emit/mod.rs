//! Code emission: pure synthesis followed by a write through the host filer.

pub mod code_writer;
pub mod java;

use crate::{
    config::GeneratorConfig,
    host::{Filer, FilerError, SourceVersion},
    model::ProxyModel,
};
use serde::Serialize;
use std::fmt;
use thiserror::Error as ThisError;

///
/// SynthesisError
///

#[derive(Debug, ThisError)]
pub enum SynthesisError {
    #[error("`{owner}` has {count} unresolved view id conflict(s)")]
    Conflicted { owner: String, count: usize },

    #[error("generated class name `{name}` is invalid: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("formatting failed")]
    Format(#[from] fmt::Error),
}

///
/// EmitError
///

#[derive(Debug, ThisError)]
pub enum EmitError {
    #[error("could not generate injector for `{owner}`: {source}")]
    Synthesis {
        owner: String,
        #[source]
        source: SynthesisError,
    },

    #[error("could not write injector for `{owner}`: {source}")]
    Filer {
        owner: String,
        #[source]
        source: FilerError,
    },
}

///
/// GeneratedSource
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct GeneratedSource {
    pub owner: String,
    pub qualified_name: String,
    pub bindings: usize,

    #[serde(skip)]
    pub contents: String,
}

///
/// Emitter
///

#[derive(Clone, Debug)]
pub struct Emitter {
    config: GeneratorConfig,
    source_version: SourceVersion,
}

impl Emitter {
    #[must_use]
    pub const fn new(config: GeneratorConfig, source_version: SourceVersion) -> Self {
        Self {
            config,
            source_version,
        }
    }

    #[must_use]
    pub const fn source_version(&self) -> SourceVersion {
        self.source_version
    }

    /// Render `model` without touching the host.
    pub fn synthesize(&self, model: &ProxyModel) -> Result<GeneratedSource, EmitError> {
        let contents = java::synthesize(model, &self.config, self.source_version).map_err(
            |source| EmitError::Synthesis {
                owner: model.owner_name().to_string(),
                source,
            },
        )?;

        Ok(GeneratedSource {
            owner: model.owner_name().to_string(),
            qualified_name: model.generated_qualified_name(&self.config.class_suffix),
            bindings: model.binding_count(),
            contents,
        })
    }

    /// Render `model` and hand the file to `filer`, anchored to the owner.
    pub fn emit<F: Filer + ?Sized>(
        &self,
        model: &ProxyModel,
        filer: &mut F,
    ) -> Result<GeneratedSource, EmitError> {
        let generated = self.synthesize(model)?;

        filer
            .create_source_file(&generated.qualified_name, model.owner(), &generated.contents)
            .map_err(|source| EmitError::Filer {
                owner: generated.owner.clone(),
                source,
            })?;

        tracing::debug!(
            owner = %generated.owner,
            file = %generated.qualified_name,
            bindings = generated.bindings,
            "emitted injector"
        );

        Ok(generated)
    }
}
