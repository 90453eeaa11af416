//! Read-only view of the host's symbol table.
//!
//! Elements are what the host hands over each round: fields, methods and the
//! other member kinds a marker can be (mis)placed on, each with a reference
//! to its enclosing class.

use crate::marker::{Marker, MarkerKind};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    fmt,
    path::{Path, PathBuf},
};

///
/// ElementKind
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
#[remain::sorted]
pub enum ElementKind {
    #[display("class")]
    Class,
    #[display("constructor")]
    Constructor,
    #[display("field")]
    Field,
    #[display("local variable")]
    LocalVariable,
    #[display("method")]
    Method,
    #[display("parameter")]
    Parameter,
}

///
/// Modifier
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
#[remain::sorted]
pub enum Modifier {
    #[display("final")]
    Final,
    #[display("private")]
    Private,
    #[display("protected")]
    Protected,
    #[display("public")]
    Public,
    #[display("static")]
    Static,
}

///
/// Location
///

#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl Location {
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: u32) -> Self {
        Self {
            file: Some(file.into()),
            line: Some(line),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "{}:{line}", file.display()),
            (Some(file), None) => write!(f, "{}", file.display()),
            (None, Some(line)) => write!(f, "line {line}"),
            (None, None) => f.write_str("<unknown>"),
        }
    }
}

///
/// TypeElement
///
/// Reference to a class symbol. Owners of bindings are keyed by their
/// qualified name; the package anchors where the generated file goes.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TypeElement {
    qualified_name: String,
    package: String,
    source: Option<PathBuf>,
}

impl TypeElement {
    #[must_use]
    pub fn new(qualified_name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            package: package.into(),
            source: None,
        }
    }

    /// Build a type element whose package follows the naming convention
    /// (see [`derive_package`]).
    #[must_use]
    pub fn from_qualified_name(qualified_name: impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();
        let package = derive_package(&qualified_name).to_string();

        Self {
            qualified_name,
            package,
            source: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit_once('.')
            .map_or(self.qualified_name.as_str(), |(_, name)| name)
    }

    /// Class name relative to the package with nesting joined by `$`,
    /// e.g. `Outer$Inner` for `com.example.Outer.Inner`.
    #[must_use]
    pub fn binary_name(&self) -> String {
        let relative = if self.package.is_empty() {
            Some(self.qualified_name.as_str())
        } else {
            self.qualified_name
                .strip_prefix(self.package.as_str())
                .and_then(|rest| rest.strip_prefix('.'))
        };

        relative.map_or_else(|| self.simple_name().to_string(), |r| r.replace('.', "$"))
    }
}

impl fmt::Display for TypeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name)
    }
}

/// Package portion of a qualified class name: the segments before the first
/// one starting with an uppercase letter. Falls back to everything before the
/// last dot when no segment is capitalised.
#[must_use]
pub fn derive_package(qualified_name: &str) -> &str {
    let mut end: usize = 0;

    for segment in qualified_name.split('.') {
        if segment.chars().next().is_some_and(char::is_uppercase) {
            return &qualified_name[..end.saturating_sub(1)];
        }
        end += segment.len() + 1;
    }

    qualified_name
        .rsplit_once('.')
        .map_or("", |(package, _)| package)
}

///
/// Element
///
/// One member of the symbol table. Methods carry their parameter types;
/// `ty` is the declared type for variables and the return type for methods.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub name: String,
    pub ty: String,
    pub parameters: Vec<String>,
    pub modifiers: BTreeSet<Modifier>,
    pub enclosing: Option<TypeElement>,
    pub location: Option<Location>,
    pub markers: Vec<Marker>,
}

impl Element {
    #[must_use]
    pub fn new(kind: ElementKind, name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            ty: ty.into(),
            parameters: Vec::new(),
            modifiers: BTreeSet::new(),
            enclosing: None,
            location: None,
            markers: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(owner: &TypeElement, name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::new(ElementKind::Field, name, ty).enclosed_by(owner.clone())
    }

    #[must_use]
    pub fn method(owner: &TypeElement, name: impl Into<String>, parameters: &[&str]) -> Self {
        Self::new(ElementKind::Method, name, "void")
            .enclosed_by(owner.clone())
            .with_parameters(parameters.iter().copied())
    }

    #[must_use]
    pub fn enclosed_by(mut self, owner: TypeElement) -> Self {
        self.enclosing = Some(owner);
        self
    }

    #[must_use]
    pub fn with_parameters<S: Into<String>>(mut self, parameters: impl IntoIterator<Item = S>) -> Self {
        self.parameters = parameters.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }

    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn marked(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// First marker of the given kind, if the element carries one.
    #[must_use]
    pub fn marker(&self, kind: MarkerKind) -> Option<&Marker> {
        self.markers.iter().find(|m| m.kind() == kind)
    }

    #[must_use]
    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// Stable identity within a compilation: `Owner#name`, with the
    /// parameter list appended for methods and constructors.
    #[must_use]
    pub fn symbol_key(&self) -> String {
        let owner = self
            .enclosing
            .as_ref()
            .map_or("<none>", TypeElement::qualified_name);

        match self.kind {
            ElementKind::Method | ElementKind::Constructor => {
                format!("{owner}#{}({})", self.name, self.parameters.join(", "))
            }
            _ => format!("{owner}#{}", self.name),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.kind, self.symbol_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_stops_at_first_capitalised_segment() {
        assert_eq!(derive_package("com.example.MainActivity"), "com.example");
        assert_eq!(derive_package("com.example.Outer.Inner"), "com.example");
        assert_eq!(derive_package("MainActivity"), "");
        assert_eq!(derive_package("com.example.lower"), "com.example");
    }

    #[test]
    fn binary_name_joins_nested_classes() {
        let outer = TypeElement::from_qualified_name("com.example.Outer");
        let inner = TypeElement::from_qualified_name("com.example.Outer.Inner");
        let root = TypeElement::new("Main", "");

        assert_eq!(outer.binary_name(), "Outer");
        assert_eq!(inner.binary_name(), "Outer$Inner");
        assert_eq!(inner.simple_name(), "Inner");
        assert_eq!(root.binary_name(), "Main");
    }

    #[test]
    fn binary_name_falls_back_when_package_does_not_prefix() {
        let odd = TypeElement::new("org.other.Thing", "com.example");

        assert_eq!(odd.binary_name(), "Thing");
    }

    #[test]
    fn symbol_key_includes_method_parameters() {
        let owner = TypeElement::from_qualified_name("com.example.Foo");
        let field = Element::field(&owner, "title", "android.widget.TextView");
        let method = Element::method(&owner, "onSubmit", &["android.view.View"]);

        assert_eq!(field.symbol_key(), "com.example.Foo#title");
        assert_eq!(
            method.symbol_key(),
            "com.example.Foo#onSubmit(android.view.View)"
        );
        assert_eq!(field.to_string(), "field `com.example.Foo#title`");
    }

    #[test]
    fn location_renders_known_parts() {
        assert_eq!(Location::new("Foo.java", 12).to_string(), "Foo.java:12");
        assert_eq!(Location::default().to_string(), "<unknown>");
    }
}
