//! In-memory host.
//!
//! Holds the elements of a round, captures generated files and diagnostics,
//! and can be told to refuse specific outputs. Used by the tests and by hosts
//! that want to inspect output before writing it anywhere.

use crate::{
    element::{Element, TypeElement},
    host::{
        Diagnostic, Filer, FilerError, Level, Messager, ProcessingEnvironment, RoundEnvironment,
        SourceVersion,
    },
    java,
    marker::MarkerKind,
};
use std::collections::{BTreeMap, BTreeSet};

///
/// MemoryRound
///

#[derive(Clone, Debug, Default)]
pub struct MemoryRound {
    elements: Vec<Element>,
    over: bool,
}

impl MemoryRound {
    #[must_use]
    pub fn new(elements: impl IntoIterator<Item = Element>) -> Self {
        Self {
            elements: elements.into_iter().collect(),
            over: false,
        }
    }

    /// The empty closing round a host runs after the last one with input.
    #[must_use]
    pub fn final_round() -> Self {
        Self {
            elements: Vec::new(),
            over: true,
        }
    }

    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}

impl RoundEnvironment for MemoryRound {
    fn elements_marked_with(&self, kind: MarkerKind) -> Vec<&Element> {
        self.elements
            .iter()
            .filter(|e| e.marker(kind).is_some())
            .collect()
    }

    fn processing_over(&self) -> bool {
        self.over
    }
}

///
/// GeneratedFile
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedFile {
    pub qualified_name: String,
    pub origin: TypeElement,
    pub contents: String,
}

///
/// MemoryFiler
///

#[derive(Clone, Debug, Default)]
pub struct MemoryFiler {
    files: BTreeMap<String, GeneratedFile>,
    rejected: BTreeSet<String>,
}

impl MemoryFiler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse any later request to create `qualified_name`.
    #[must_use]
    pub fn reject(mut self, qualified_name: impl Into<String>) -> Self {
        self.rejected.insert(qualified_name.into());
        self
    }

    #[must_use]
    pub fn get(&self, qualified_name: &str) -> Option<&GeneratedFile> {
        self.files.get(qualified_name)
    }

    /// Generated files in qualified-name order.
    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Filer for MemoryFiler {
    fn create_source_file(
        &mut self,
        qualified_name: &str,
        origin: &TypeElement,
        contents: &str,
    ) -> Result<(), FilerError> {
        java::validate_qualified_name(qualified_name).map_err(|reason| {
            FilerError::InvalidName {
                name: qualified_name.to_string(),
                reason,
            }
        })?;

        if self.rejected.contains(qualified_name) {
            return Err(FilerError::Rejected(qualified_name.to_string()));
        }
        if self.files.contains_key(qualified_name) {
            return Err(FilerError::AlreadyExists(qualified_name.to_string()));
        }

        self.files.insert(
            qualified_name.to_string(),
            GeneratedFile {
                qualified_name: qualified_name.to_string(),
                origin: origin.clone(),
                contents: contents.to_string(),
            },
        );

        Ok(())
    }
}

///
/// MemoryMessager
///

#[derive(Clone, Debug, Default)]
pub struct MemoryMessager {
    diagnostics: Vec<Diagnostic>,
}

impl MemoryMessager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn at_level(&self, level: Level) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.level == level)
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.at_level(Level::Error).count()
    }
}

impl Messager for MemoryMessager {
    fn print_message(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

///
/// MemoryEnvironment
///

#[derive(Clone, Debug)]
pub struct MemoryEnvironment {
    filer: Option<MemoryFiler>,
    messager: Option<MemoryMessager>,
    source_version: SourceVersion,
}

impl MemoryEnvironment {
    #[must_use]
    pub fn new() -> Self {
        Self::with_filer(MemoryFiler::new())
    }

    #[must_use]
    pub fn with_filer(filer: MemoryFiler) -> Self {
        Self {
            filer: Some(filer),
            messager: Some(MemoryMessager::new()),
            source_version: SourceVersion::default(),
        }
    }

    /// A host that cannot provide a filer.
    #[must_use]
    pub fn without_filer() -> Self {
        Self {
            filer: None,
            ..Self::new()
        }
    }

    /// A host that cannot provide a diagnostic channel.
    #[must_use]
    pub fn without_messager() -> Self {
        Self {
            messager: None,
            ..Self::new()
        }
    }

    #[must_use]
    pub const fn with_source_version(mut self, source_version: SourceVersion) -> Self {
        self.source_version = source_version;
        self
    }
}

impl Default for MemoryEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingEnvironment for MemoryEnvironment {
    type Filer = MemoryFiler;
    type Messager = MemoryMessager;

    fn filer(&mut self) -> Option<MemoryFiler> {
        self.filer.take()
    }

    fn messager(&mut self) -> Option<MemoryMessager> {
        self.messager.take()
    }

    fn latest_source_version(&self) -> SourceVersion {
        self.source_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::Marker;

    #[test]
    fn round_reports_only_elements_with_the_marker() {
        let owner = TypeElement::from_qualified_name("com.example.Foo");
        let round = MemoryRound::new([
            Element::field(&owner, "title", "android.view.View").marked(Marker::bind_view(1)),
            Element::method(&owner, "onTap", &[]).marked(Marker::on_click([2])),
            Element::field(&owner, "plain", "int"),
        ]);

        let bound: Vec<_> = round
            .elements_marked_with(MarkerKind::BindView)
            .into_iter()
            .map(|e| e.name.as_str())
            .collect();

        assert_eq!(bound, ["title"]);
        assert!(!round.processing_over());
        assert!(MemoryRound::final_round().processing_over());
    }

    #[test]
    fn filer_refuses_duplicates_and_rejected_names() {
        let owner = TypeElement::from_qualified_name("com.example.Foo");
        let mut filer = MemoryFiler::new().reject("com.example.Bad");

        filer
            .create_source_file("com.example.Good", &owner, "class Good {}")
            .expect("first creation should succeed");

        assert!(matches!(
            filer.create_source_file("com.example.Good", &owner, ""),
            Err(FilerError::AlreadyExists(_))
        ));
        assert!(matches!(
            filer.create_source_file("com.example.Bad", &owner, ""),
            Err(FilerError::Rejected(_))
        ));
        assert!(matches!(
            filer.create_source_file("com.example.new", &owner, ""),
            Err(FilerError::InvalidName { .. })
        ));
        assert_eq!(filer.len(), 1);
    }

    #[test]
    fn environment_hands_out_facilities_once() {
        let mut env = MemoryEnvironment::new();

        assert!(env.filer().is_some());
        assert!(env.filer().is_none(), "the filer is handed out once");
        assert!(MemoryEnvironment::without_messager().messager().is_none());
    }
}
