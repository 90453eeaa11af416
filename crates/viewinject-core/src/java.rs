use std::{collections::HashSet, sync::LazyLock};

///
/// RESERVED_WORDS
/// keywords and literals that can never be used as a Java identifier
///

static RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut words = Vec::new();

    // keywords
    // https://docs.oracle.com/javase/specs/jls/se21/html/jls-3.html#jls-3.9
    words.extend(vec![
        "abstract",
        "assert",
        "boolean",
        "break",
        "byte",
        "case",
        "catch",
        "char",
        "class",
        "const",
        "continue",
        "default",
        "do",
        "double",
        "else",
        "enum",
        "extends",
        "final",
        "finally",
        "float",
        "for",
        "goto",
        "if",
        "implements",
        "import",
        "instanceof",
        "int",
        "interface",
        "long",
        "native",
        "new",
        "package",
        "private",
        "protected",
        "public",
        "return",
        "short",
        "static",
        "strictfp",
        "super",
        "switch",
        "synchronized",
        "this",
        "throw",
        "throws",
        "transient",
        "try",
        "void",
        "volatile",
        "while",
        "_",
    ]);

    // literals
    words.extend(vec!["true", "false", "null"]);

    words.into_iter().collect()
});

///
/// PRIMITIVE_TYPES
///

const PRIMITIVE_TYPES: [&str; 8] = [
    "boolean", "byte", "char", "double", "float", "int", "long", "short",
];

/// Check if an identifier is a reserved word.
#[must_use]
pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS.contains(word)
}

#[must_use]
pub fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

#[must_use]
pub fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Ensure a simple name is a legal, non-reserved Java identifier.
pub fn validate_identifier(ident: &str) -> Result<(), String> {
    let mut chars = ident.chars();

    let Some(first) = chars.next() else {
        return Err("identifier is empty".to_string());
    };
    if !is_identifier_start(first) || !chars.all(is_identifier_part) {
        return Err(format!("`{ident}` is not a valid identifier"));
    }
    if is_reserved_word(ident) {
        return Err(format!("the word `{ident}` is reserved"));
    }

    Ok(())
}

/// Ensure a dotted name is made of valid identifiers.
pub fn validate_qualified_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("qualified name is empty".to_string());
    }

    for segment in name.split('.') {
        validate_identifier(segment).map_err(|e| format!("in `{name}`: {e}"))?;
    }

    Ok(())
}

#[must_use]
pub fn is_primitive_type(ty: &str) -> bool {
    PRIMITIVE_TYPES.contains(&ty)
}

/// Ensure a declared type is a primitive or a qualified class name, with
/// any number of trailing `[]`.
pub fn validate_type_name(ty: &str) -> Result<(), String> {
    let mut element = ty.trim();
    while let Some(rest) = element.strip_suffix("[]") {
        element = rest.trim_end();
    }

    if is_primitive_type(element) {
        return Ok(());
    }

    validate_qualified_name(element).map_err(|e| format!("type `{ty}`: {e}"))
}

/// A reference type that is not an array; the only kind a `View` can be
/// cast to.
#[must_use]
pub fn is_class_type(ty: &str) -> bool {
    !ty.trim_end().ends_with(']') && validate_qualified_name(ty).is_ok()
}
