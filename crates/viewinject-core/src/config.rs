use crate::{err, error::ErrorTree, java};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid generator config: {0}")]
    Invalid(ErrorTree),
}

///
/// GeneratorConfig
///
/// Knobs for the generated Java. Every field has a default so an empty
/// config file is valid.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Appended to the owner's binary name to form the generated class.
    pub class_suffix: String,

    /// Package holding `ViewInject` and `ViewFinder`.
    pub runtime_package: String,

    /// Spaces per indentation level.
    pub indent: usize,

    /// Emit the "do not modify" header comment.
    pub header: bool,
}

impl GeneratorConfig {
    pub const DEFAULT_CLASS_SUFFIX: &'static str = "$$ViewInjector";
    pub const DEFAULT_RUNTIME_PACKAGE: &'static str = "viewinject.runtime";
    pub const DEFAULT_INDENT: usize = 4;

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errs = ErrorTree::new();

        if self.class_suffix.is_empty() {
            err!(errs, "class_suffix must not be empty");
        } else if !self.class_suffix.chars().all(java::is_identifier_part) {
            err!(
                errs,
                "class_suffix `{}` contains characters not allowed in a class name",
                self.class_suffix
            );
        }

        if let Err(e) = java::validate_qualified_name(&self.runtime_package) {
            err!(errs, "runtime_package: {e}");
        }

        if !(1..=8).contains(&self.indent) {
            err!(errs, "indent must be between 1 and 8, got {}", self.indent);
        }

        errs.result().map_err(ConfigError::Invalid)
    }

    /// `{runtime_package}.{name}`
    #[must_use]
    pub fn runtime_type(&self, name: &str) -> String {
        format!("{}.{name}", self.runtime_package)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            class_suffix: Self::DEFAULT_CLASS_SUFFIX.to_string(),
            runtime_package: Self::DEFAULT_RUNTIME_PACKAGE.to_string(),
            indent: Self::DEFAULT_INDENT,
            header: true,
        }
    }
}
