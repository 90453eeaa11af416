//! Symbol-table manifest.
//!
//! A manifest stands in for the host compiler's symbol table: it lists the
//! classes of a compilation and the members that carry markers. TOML or
//! JSON, chosen by file extension.

use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;
use viewinject_core::{
    err,
    error::ErrorTree,
    java,
    prelude::*,
};

///
/// ManifestError
///

#[derive(Debug, ThisError)]
pub enum ManifestError {
    #[error("failed to read manifest '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse TOML manifest '{}': {source}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse JSON manifest '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported manifest format '{}': expected .toml or .json", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("invalid manifest '{}': {errors}", .path.display())]
    Invalid { path: PathBuf, errors: ErrorTree },
}

///
/// Manifest
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_version: Option<u32>,

    #[serde(default, rename = "class")]
    pub classes: Vec<ClassEntry>,
}

///
/// ClassEntry
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClassEntry {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,

    #[serde(default, rename = "member")]
    pub members: Vec<MemberEntry>,
}

///
/// MemberEntry
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemberEntry {
    pub kind: ElementKind,
    pub name: String,

    #[serde(default, rename = "type")]
    pub ty: String,

    #[serde(default)]
    pub params: Vec<String>,

    #[serde(default)]
    pub modifiers: Vec<Modifier>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind_view: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_click: Option<Vec<i32>>,
}

impl Manifest {
    /// Read, parse and validate a manifest file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let manifest = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&text).map_err(|source| ManifestError::Toml {
                path: path.to_path_buf(),
                source,
            })?,
            Some("json") => Self::from_json_str(&text).map_err(|source| ManifestError::Json {
                path: path.to_path_buf(),
                source,
            })?,
            _ => return Err(ManifestError::UnsupportedFormat(path.to_path_buf())),
        };

        manifest.validate().map_err(|errors| ManifestError::Invalid {
            path: path.to_path_buf(),
            errors,
        })?;

        tracing::debug!(
            path = %path.display(),
            classes = manifest.classes.len(),
            "manifest loaded"
        );

        Ok(manifest)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    #[must_use]
    pub fn source_version(&self) -> SourceVersion {
        self.source_version.map_or_else(SourceVersion::default, SourceVersion)
    }

    /// Check every name in the manifest, collecting all problems.
    pub fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();
        let mut seen = BTreeSet::new();

        for class in &self.classes {
            if !seen.insert(class.name.as_str()) {
                err!(errs, "class `{}` is listed more than once", class.name);
            }
            errs.add_child(&format!("class `{}`", class.name), class.validate());
        }

        errs.result()
    }

    /// Every member of every class as a host element, in manifest order.
    #[must_use]
    pub fn elements(&self) -> Vec<Element> {
        self.classes
            .iter()
            .flat_map(|class| {
                let owner = class.type_element();
                class
                    .members
                    .iter()
                    .map(move |member| member.element(&owner, class.source.as_deref()))
            })
            .collect()
    }
}

impl ClassEntry {
    /// The class symbol, with its package given or derived from the name.
    #[must_use]
    pub fn type_element(&self) -> TypeElement {
        let owner = match &self.package {
            Some(package) => TypeElement::new(&self.name, package),
            None => TypeElement::from_qualified_name(&self.name),
        };

        match &self.source {
            Some(source) => owner.with_source(source),
            None => owner,
        }
    }

    fn validate(&self) -> ErrorTree {
        let mut errs = ErrorTree::new();

        errs.add_result(java::validate_qualified_name(&self.name));

        if let Some(package) = self.package.as_deref().filter(|p| !p.is_empty()) {
            if let Err(e) = java::validate_qualified_name(package) {
                err!(errs, "package: {e}");
            } else if !self
                .name
                .strip_prefix(package)
                .is_some_and(|rest| rest.starts_with('.'))
            {
                err!(errs, "name is not inside package `{package}`");
            }
        }

        // locals and parameters are method-scoped
        let owner = self.type_element();
        let mut keys = BTreeSet::new();
        for member in &self.members {
            let mut member_errs = member.validate();

            let class_member = matches!(
                member.kind,
                ElementKind::Field | ElementKind::Method | ElementKind::Constructor
            );
            if class_member && !keys.insert(member.element(&owner, None).symbol_key()) {
                err!(member_errs, "declared more than once");
            }

            errs.add_child(&format!("{} `{}`", member.kind, member.name), member_errs);
        }

        errs
    }
}

impl MemberEntry {
    #[must_use]
    pub fn element(&self, owner: &TypeElement, source: Option<&Path>) -> Element {
        let mut element = Element::new(self.kind, &self.name, &self.ty)
            .enclosed_by(owner.clone())
            .with_parameters(&self.params);

        for modifier in &self.modifiers {
            element = element.with_modifier(*modifier);
        }

        if let Some(line) = self.line {
            element = element.at(Location {
                file: source.map(Path::to_path_buf),
                line: Some(line),
            });
        }

        if let Some(id) = self.bind_view {
            element = element.marked(Marker::bind_view(id));
        }
        if let Some(ids) = &self.on_click {
            element = element.marked(Marker::on_click(ids.iter().copied()));
        }

        element
    }

    fn validate(&self) -> ErrorTree {
        let mut errs = ErrorTree::new();

        errs.add_result(java::validate_identifier(&self.name));

        match self.kind {
            ElementKind::Constructor if self.ty.trim().is_empty() => {}
            _ if self.ty.trim().is_empty() => err!(errs, "missing type"),
            ElementKind::Method if self.ty == "void" => {}
            _ => errs.add_result(java::validate_type_name(&self.ty)),
        }

        for param in &self.params {
            if param.trim().is_empty() {
                err!(errs, "empty parameter type");
            } else {
                errs.add_result(java::validate_type_name(param));
            }
        }

        errs
    }
}
