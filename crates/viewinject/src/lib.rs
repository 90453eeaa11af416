//! ## Crate layout
//! - `core`: markers, elements, placement filter, proxy models, Java synthesis
//!   and the round-driven processor.
//! - `build`: filesystem host, manifest loading and the build-script driver.
//!
//! `prelude` covers what a host integration needs day to day.

pub use viewinject_build as build;
pub use viewinject_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Macros
//

pub use viewinject_build::build;

//
// Drivers
//

pub use viewinject_build::{
    BuildReport, Error, Manifest, check, check_manifest, generate, generate_manifest,
};
pub use viewinject_core::{
    config::GeneratorConfig,
    host::{Diagnostic, Level},
};

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::{
        build::{FsFiler, HostEnvironment, TracingMessager},
        core::host::memory::{MemoryEnvironment, MemoryFiler, MemoryMessager, MemoryRound},
    };
}
