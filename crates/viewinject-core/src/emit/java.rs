//! Java text synthesis for one proxy model.

use crate::{
    config::GeneratorConfig,
    element::Element,
    emit::{
        SynthesisError,
        code_writer::{CodeWriter, cw_writeln},
    },
    host::SourceVersion,
    java,
    marker::ViewId,
    model::ProxyModel,
};
use std::fmt;

/// Parameter type a handler receives without a cast.
pub const VIEW_TYPE: &str = "android.view.View";

const LISTENER_TYPE: &str = "android.view.View.OnClickListener";

/// Render the injector class for `model`. Pure: the same model, config and
/// source version always render the same text.
pub fn synthesize(
    model: &ProxyModel,
    config: &GeneratorConfig,
    source_version: SourceVersion,
) -> Result<String, SynthesisError> {
    if model.has_conflicts() {
        return Err(SynthesisError::Conflicted {
            owner: model.owner_name().to_string(),
            count: model.conflicts().len(),
        });
    }

    let class_name = model.generated_class_name(&config.class_suffix);
    java::validate_identifier(&class_name)
        .map_err(|reason| SynthesisError::InvalidName {
            name: class_name.clone(),
            reason,
        })?;

    let mut w = CodeWriter::with_indent_spaces(String::new(), config.indent);
    write_class(&mut w, model, config, source_version, &class_name)?;

    Ok(w.into_inner())
}

fn write_class(
    w: &mut CodeWriter<String>,
    model: &ProxyModel,
    config: &GeneratorConfig,
    source_version: SourceVersion,
    class_name: &str,
) -> fmt::Result {
    if config.header {
        w.comment(&format!(
            "Generated by viewinject from {}. Do not modify.",
            model.owner_name()
        ))?;
    }

    let package = model.owner().package();
    if !package.is_empty() {
        cw_writeln!(w, "package {package};")?;
        w.blank_line()?;
    }

    let owner = model.owner_name();
    let inject = config.runtime_type("ViewInject");
    let finder = config.runtime_type("ViewFinder");

    w.block(
        &format!("public class {class_name} implements {inject}<{owner}>"),
        |w| {
            w.writeln("@Override")?;
            w.block(
                &format!("public void inject(final {owner} host, Object source)"),
                |w| {
                    for id in model.ids() {
                        if let Some(field) = model.field(id) {
                            write_field(w, &finder, id, field)?;
                        }
                        if let Some(handler) = model.handler(id) {
                            write_listener(w, &finder, source_version, id, handler)?;
                        }
                    }

                    Ok(())
                },
            )
        },
    )
}

// host.title = (android.widget.TextView) ViewFinder.findViewById(source, 10);
fn write_field(
    w: &mut CodeWriter<String>,
    finder: &str,
    id: ViewId,
    field: &Element,
) -> fmt::Result {
    cw_writeln!(
        w,
        "host.{} = ({}) {finder}.findViewById(source, {id});",
        field.name,
        field.ty
    )
}

fn write_listener(
    w: &mut CodeWriter<String>,
    finder: &str,
    source_version: SourceVersion,
    id: ViewId,
    handler: &Element,
) -> fmt::Result {
    let call = handler_call(handler);

    if source_version.supports_lambdas() {
        cw_writeln!(
            w,
            "{finder}.findViewById(source, {id}).setOnClickListener(view -> {call});"
        )
    } else {
        w.block_with(
            &format!("{finder}.findViewById(source, {id}).setOnClickListener(new {LISTENER_TYPE}()"),
            ");",
            |w| {
                w.writeln("@Override")?;
                w.block(&format!("public void onClick({VIEW_TYPE} view)"), |w| {
                    cw_writeln!(w, "{call};")
                })
            },
        )
    }
}

// A handler takes nothing or the clicked view, cast when declared narrower.
fn handler_call(handler: &Element) -> String {
    match handler.parameters.first() {
        None => format!("host.{}()", handler.name),
        Some(ty) if ty == VIEW_TYPE => format!("host.{}(view)", handler.name),
        Some(ty) => format!("host.{}(({ty}) view)", handler.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::TypeElement;

    fn render(model: &ProxyModel, source_version: SourceVersion) -> String {
        synthesize(model, &GeneratorConfig::default(), source_version)
            .expect("synthesis should succeed")
    }

    #[test]
    fn renders_field_then_listener_per_id() {
        let owner = TypeElement::from_qualified_name("com.example.Bar");
        let field = Element::field(&owner, "submit", "android.widget.Button");
        let handler = Element::method(&owner, "onSubmit", &[VIEW_TYPE]);

        let mut model = ProxyModel::new(owner);
        model.bind_handler(ViewId(5), &handler);
        model.bind_field(ViewId(5), &field);

        let expected = "\
// Generated by viewinject from com.example.Bar. Do not modify.
package com.example;

public class Bar$$ViewInjector implements viewinject.runtime.ViewInject<com.example.Bar> {
    @Override
    public void inject(final com.example.Bar host, Object source) {
        host.submit = (android.widget.Button) viewinject.runtime.ViewFinder.findViewById(source, 5);
        viewinject.runtime.ViewFinder.findViewById(source, 5).setOnClickListener(view -> host.onSubmit(view));
    }
}
";
        assert_eq!(render(&model, SourceVersion::RELEASE_17), expected);
    }

    #[test]
    fn old_source_versions_get_anonymous_listener() {
        let owner = TypeElement::new("Main", "");
        let handler = Element::method(&owner, "onTap", &[]);

        let mut model = ProxyModel::new(owner);
        model.bind_handler(ViewId(3), &handler);

        let config = GeneratorConfig {
            indent: 2,
            header: false,
            ..GeneratorConfig::default()
        };
        let text = synthesize(&model, &config, SourceVersion::RELEASE_7)
            .expect("synthesis should succeed");

        let expected = "\
public class Main$$ViewInjector implements viewinject.runtime.ViewInject<Main> {
  @Override
  public void inject(final Main host, Object source) {
    viewinject.runtime.ViewFinder.findViewById(source, 3).setOnClickListener(new android.view.View.OnClickListener() {
      @Override
      public void onClick(android.view.View view) {
        host.onTap();
      }
    });
  }
}
";
        assert_eq!(text, expected);
    }

    #[test]
    fn narrower_handler_parameter_is_cast() {
        let owner = TypeElement::from_qualified_name("com.example.Foo");
        let handler = Element::method(&owner, "onPress", &["android.widget.Button"]);

        assert_eq!(
            handler_call(&handler),
            "host.onPress((android.widget.Button) view)"
        );
    }

    #[test]
    fn conflicted_model_is_not_synthesized() {
        let owner = TypeElement::from_qualified_name("com.example.Baz");
        let a = Element::field(&owner, "a", VIEW_TYPE);
        let b = Element::field(&owner, "b", VIEW_TYPE);

        let mut model = ProxyModel::new(owner);
        model.bind_field(ViewId(7), &a);
        model.bind_field(ViewId(7), &b);

        let err = synthesize(&model, &GeneratorConfig::default(), SourceVersion::default())
            .expect_err("conflicted model should not synthesize");
        assert!(matches!(err, SynthesisError::Conflicted { count: 1, .. }));
    }
}
