//! Boundary to the host build toolchain.
//!
//! The host enumerates marked elements per round, reports diagnostics and
//! accepts generated sources. Everything here is an interface; concrete hosts
//! live in [`memory`] and in the build crate.

pub mod memory;

use crate::{
    element::{Element, Location, TypeElement},
    marker::MarkerKind,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::{fmt, io, path::PathBuf};
use thiserror::Error as ThisError;

///
/// RoundEnvironment
///

pub trait RoundEnvironment {
    /// Every element of the current round carrying a marker of `kind`.
    fn elements_marked_with(&self, kind: MarkerKind) -> Vec<&Element>;

    /// True for the last round the host will run.
    fn processing_over(&self) -> bool {
        false
    }
}

///
/// Filer
///

pub trait Filer {
    /// Create a source file for `qualified_name`, anchored to `origin`.
    fn create_source_file(
        &mut self,
        qualified_name: &str,
        origin: &TypeElement,
        contents: &str,
    ) -> Result<(), FilerError>;
}

///
/// Messager
///

pub trait Messager {
    fn print_message(&mut self, diagnostic: Diagnostic);
}

///
/// ProcessingEnvironment
///
/// Hands out the facilities a processor needs at init. `None` means the host
/// cannot provide that facility, which is fatal for the processor.
///

pub trait ProcessingEnvironment {
    type Filer: Filer;
    type Messager: Messager;

    fn filer(&mut self) -> Option<Self::Filer>;

    fn messager(&mut self) -> Option<Self::Messager>;

    fn latest_source_version(&self) -> SourceVersion;
}

///
/// FilerError
///

#[derive(Debug, ThisError)]
pub enum FilerError {
    #[error("source file '{0}' was already created")]
    AlreadyExists(String),

    #[error("invalid source file name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("output location rejected for '{0}'")]
    Rejected(String),

    #[error("failed to write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

///
/// SourceVersion
///
/// Language release the generated code may target.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[display("RELEASE_{_0}")]
#[serde(transparent)]
pub struct SourceVersion(pub u32);

impl SourceVersion {
    pub const RELEASE_7: Self = Self(7);
    pub const RELEASE_8: Self = Self(8);
    pub const RELEASE_17: Self = Self(17);

    #[must_use]
    pub const fn supports_lambdas(self) -> bool {
        self.0 >= Self::RELEASE_8.0
    }
}

impl Default for SourceVersion {
    fn default() -> Self {
        Self::RELEASE_17
    }
}

///
/// Level
///

#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    #[display("note")]
    Note,
    #[display("warning")]
    Warning,
    #[display("error")]
    Error,
}

///
/// Diagnostic
///
/// A message for the host's diagnostic channel. `subject` names the element
/// symbol or class the message is about; `location` points at source when
/// the host knows it.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            subject: None,
            location: None,
        }
    }

    #[must_use]
    pub fn note(message: impl Into<String>) -> Self {
        Self::new(Level::Note, message)
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    /// Attribute the diagnostic to an element and its source location.
    #[must_use]
    pub fn on_element(mut self, element: &Element) -> Self {
        self.subject = Some(element.symbol_key());
        self.location = element.location.clone().or_else(|| {
            element
                .enclosing
                .as_ref()
                .and_then(TypeElement::source)
                .map(|file| Location {
                    file: Some(file.to_path_buf()),
                    line: None,
                })
        });
        self
    }

    /// Attribute the diagnostic to a class.
    #[must_use]
    pub fn on_class(mut self, class: &TypeElement) -> Self {
        self.subject = Some(class.qualified_name().to_string());
        self.location = class.source().map(|file| Location {
            file: Some(file.to_path_buf()),
            line: None,
        });
        self
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.level, Level::Error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = &self.location {
            write!(f, "{location}: ")?;
        }
        write!(f, "{}: {}", self.level, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;

    #[test]
    fn diagnostic_on_element_prefers_element_location() {
        let owner = TypeElement::from_qualified_name("com.example.Foo").with_source("Foo.java");
        let field = Element::field(&owner, "title", "android.view.View")
            .at(Location::new("Foo.java", 12));

        let diagnostic = Diagnostic::error("bad placement").on_element(&field);

        assert_eq!(diagnostic.subject.as_deref(), Some("com.example.Foo#title"));
        assert_eq!(diagnostic.to_string(), "Foo.java:12: error: bad placement");
    }

    #[test]
    fn diagnostic_on_element_falls_back_to_owner_source() {
        let owner = TypeElement::from_qualified_name("com.example.Foo").with_source("Foo.java");
        let field = Element::field(&owner, "title", "android.view.View");

        let diagnostic = Diagnostic::warning("odd").on_element(&field);

        assert_eq!(diagnostic.to_string(), "Foo.java: warning: odd");
    }

    #[test]
    fn diagnostic_on_class_names_the_class() {
        let owner = TypeElement::from_qualified_name("com.example.Foo");

        let diagnostic = Diagnostic::error("conflict").on_class(&owner);

        assert_eq!(diagnostic.subject.as_deref(), Some("com.example.Foo"));
        assert_eq!(diagnostic.to_string(), "error: conflict");
        assert!(diagnostic.is_error());
    }

    #[test]
    fn lambdas_start_at_release_8() {
        assert!(!SourceVersion::RELEASE_7.supports_lambdas());
        assert!(SourceVersion::RELEASE_8.supports_lambdas());
        assert_eq!(SourceVersion::default().to_string(), "RELEASE_17");
    }
}
