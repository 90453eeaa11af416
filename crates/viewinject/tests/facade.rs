use std::fs;
use viewinject::prelude::*;

#[test]
fn prelude_drives_a_round_in_memory() {
    let owner = TypeElement::from_qualified_name("com.example.Foo");
    let round = MemoryRound::new([
        Element::field(&owner, "title", "android.widget.TextView").marked(Marker::bind_view(10)),
    ]);

    let mut env = MemoryEnvironment::new();
    let mut processor = ViewInjectProcessor::init(&mut env, GeneratorConfig::default())
        .expect("init should succeed");
    let outcome = processor.process(&round);

    assert!(outcome.is_clean());
    assert_eq!(processor.filer().len(), 1);
}

#[test]
fn generate_is_reexported() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let manifest = dir.path().join("viewinject.toml");
    fs::write(
        &manifest,
        r#"
[[class]]
name = "com.example.Foo"

[[class.member]]
kind = "field"
name = "title"
type = "android.widget.TextView"
bind_view = 10
"#,
    )
    .expect("manifest should be written");

    let report = viewinject::generate(&manifest, &dir.path().join("gen"), GeneratorConfig::default())
        .expect("generation should succeed");

    assert!(report.is_success());
    assert_eq!(report.written.len(), 1);
    assert!(!viewinject::VERSION.is_empty());
}
