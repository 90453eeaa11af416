//! Placement filter.
//!
//! Every marked element passes through [`classify`] before it can reach a
//! proxy model. Classification resolves the element's syntactic [`Role`]
//! once; the collector dispatches on that role and nothing else.

use crate::{
    element::{Element, ElementKind, Modifier},
    java,
    marker::{MarkerKind, ViewId},
};
use thiserror::Error as ThisError;

///
/// Role
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    Field,
    Method,
    Other(ElementKind),
}

impl Role {
    #[must_use]
    pub const fn of(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Field => Self::Field,
            ElementKind::Method => Self::Method,
            other => Self::Other(other),
        }
    }
}

///
/// PlacementError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PlacementError {
    #[error("@BindView marker used on non-field element: {kind} `{name}`")]
    NonField { kind: ElementKind, name: String },

    #[error("@OnClick marker used on non-method element: {kind} `{name}`")]
    NonMethod { kind: ElementKind, name: String },

    #[error("{kind} `{name}` has no enclosing class")]
    NoEnclosingClass { kind: ElementKind, name: String },

    #[error("@{marker} {kind} `{name}` must not be {modifier}")]
    Inaccessible {
        marker: MarkerKind,
        kind: ElementKind,
        name: String,
        modifier: Modifier,
    },

    #[error(
        "@OnClick method `{name}` takes {count} parameters; expected none or the clicked view"
    )]
    HandlerArity { name: String, count: usize },

    #[error(
        "@OnClick method `{name}` takes `{ty}`; expected the clicked view or a subclass of it"
    )]
    HandlerParameter { name: String, ty: String },

    #[error("@{marker} marker on `{name}` carries no view identifier")]
    MissingIdentifier { marker: MarkerKind, name: String },

    #[error("`{name}` was reported for @{marker} but does not carry it")]
    MissingMarker { marker: MarkerKind, name: String },
}

///
/// Classification
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Classification {
    Accepted(Role),
    Rejected(PlacementError),
}

impl Classification {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Classify an element the host reported under `marker`.
#[must_use]
pub fn classify(marker: MarkerKind, element: &Element) -> Classification {
    match check(marker, element) {
        Ok(role) => Classification::Accepted(role),
        Err(err) => Classification::Rejected(err),
    }
}

fn check(marker: MarkerKind, element: &Element) -> Result<Role, PlacementError> {
    let role = Role::of(element.kind);
    let name = || element.name.clone();

    match (marker, role) {
        (MarkerKind::BindView, Role::Field) | (MarkerKind::OnClick, Role::Method) => {}
        (MarkerKind::BindView, _) => {
            return Err(PlacementError::NonField {
                kind: element.kind,
                name: name(),
            });
        }
        (MarkerKind::OnClick, _) => {
            return Err(PlacementError::NonMethod {
                kind: element.kind,
                name: name(),
            });
        }
    }

    if element.enclosing.is_none() {
        return Err(PlacementError::NoEnclosingClass {
            kind: element.kind,
            name: name(),
        });
    }

    // the injector is a separate class binding per host instance
    for modifier in [Modifier::Private, Modifier::Static] {
        if element.has_modifier(modifier) {
            return Err(PlacementError::Inaccessible {
                marker,
                kind: element.kind,
                name: name(),
                modifier,
            });
        }
    }

    if role == Role::Method && element.parameters.len() > 1 {
        return Err(PlacementError::HandlerArity {
            name: name(),
            count: element.parameters.len(),
        });
    }
    if let Some(ty) = element.parameters.first().filter(|ty| !java::is_class_type(ty)) {
        return Err(PlacementError::HandlerParameter {
            name: name(),
            ty: ty.clone(),
        });
    }

    let Some(found) = element.marker(marker) else {
        return Err(PlacementError::MissingMarker {
            marker,
            name: name(),
        });
    };
    if found.ids().is_empty() || found.ids().iter().copied().any(ViewId::is_no_id) {
        return Err(PlacementError::MissingIdentifier {
            marker,
            name: name(),
        });
    }

    Ok(role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{element::TypeElement, marker::Marker};

    fn owner() -> TypeElement {
        TypeElement::from_qualified_name("com.example.Foo")
    }

    #[test]
    fn bind_view_on_field_is_accepted() {
        let field = Element::field(&owner(), "title", "android.widget.TextView")
            .marked(Marker::bind_view(10));

        assert_eq!(
            classify(MarkerKind::BindView, &field),
            Classification::Accepted(Role::Field)
        );
    }

    #[test]
    fn bind_view_on_local_variable_is_rejected() {
        let local = Element::new(ElementKind::LocalVariable, "tmp", "android.view.View")
            .enclosed_by(owner())
            .marked(Marker::bind_view(3));

        let Classification::Rejected(err) = classify(MarkerKind::BindView, &local) else {
            panic!("local variables must not be accepted for @BindView");
        };
        assert!(
            err.to_string().contains("marker used on non-field element"),
            "unexpected reason: {err}"
        );
    }

    #[test]
    fn bind_view_on_parameter_and_method_is_rejected() {
        for kind in [ElementKind::Parameter, ElementKind::Method] {
            let element = Element::new(kind, "view", "android.view.View")
                .enclosed_by(owner())
                .marked(Marker::bind_view(3));

            assert!(
                matches!(
                    classify(MarkerKind::BindView, &element),
                    Classification::Rejected(PlacementError::NonField { .. })
                ),
                "{kind} should be rejected for @BindView"
            );
        }
    }

    #[test]
    fn on_click_on_field_is_rejected() {
        let field = Element::field(&owner(), "title", "android.widget.TextView")
            .marked(Marker::on_click([4]));

        let Classification::Rejected(err) = classify(MarkerKind::OnClick, &field) else {
            panic!("fields must not be accepted for @OnClick");
        };
        assert!(err.to_string().contains("marker used on non-method element"));
    }

    #[test]
    fn private_and_static_members_are_rejected() {
        let private = Element::field(&owner(), "title", "android.widget.TextView")
            .with_modifier(Modifier::Private)
            .marked(Marker::bind_view(1));
        let statik = Element::method(&owner(), "onTap", &[])
            .with_modifier(Modifier::Static)
            .marked(Marker::on_click([2]));

        assert!(matches!(
            classify(MarkerKind::BindView, &private),
            Classification::Rejected(PlacementError::Inaccessible {
                modifier: Modifier::Private,
                ..
            })
        ));
        assert!(matches!(
            classify(MarkerKind::OnClick, &statik),
            Classification::Rejected(PlacementError::Inaccessible {
                modifier: Modifier::Static,
                ..
            })
        ));
    }

    #[test]
    fn handler_with_two_parameters_is_rejected() {
        let method = Element::method(&owner(), "onTap", &["android.view.View", "int"])
            .marked(Marker::on_click([2]));

        assert_eq!(
            classify(MarkerKind::OnClick, &method),
            Classification::Rejected(PlacementError::HandlerArity {
                name: "onTap".to_string(),
                count: 2,
            })
        );
    }

    #[test]
    fn handler_taking_primitive_or_array_is_rejected() {
        for ty in ["int", "android.view.View[]"] {
            let method = Element::method(&owner(), "onTap", &[ty]).marked(Marker::on_click([2]));

            assert_eq!(
                classify(MarkerKind::OnClick, &method),
                Classification::Rejected(PlacementError::HandlerParameter {
                    name: "onTap".to_string(),
                    ty: ty.to_string(),
                })
            );
        }
    }

    #[test]
    fn handler_taking_view_subclass_is_accepted() {
        let method = Element::method(&owner(), "onPress", &["android.widget.Button"])
            .marked(Marker::on_click([2]));

        assert_eq!(
            classify(MarkerKind::OnClick, &method),
            Classification::Accepted(Role::Method)
        );
    }

    #[test]
    fn missing_identifiers_are_rejected() {
        let empty = Element::method(&owner(), "onTap", &[]).marked(Marker::on_click([]));
        let sentinel = Element::method(&owner(), "onTap", &[]).marked(Marker::on_click([-1]));

        for method in [empty, sentinel] {
            assert!(matches!(
                classify(MarkerKind::OnClick, &method),
                Classification::Rejected(PlacementError::MissingIdentifier { .. })
            ));
        }
    }

    #[test]
    fn element_without_owner_is_rejected() {
        let orphan = Element::new(ElementKind::Field, "title", "android.view.View")
            .marked(Marker::bind_view(1));

        assert!(matches!(
            classify(MarkerKind::BindView, &orphan),
            Classification::Rejected(PlacementError::NoEnclosingClass { .. })
        ));
    }

    #[test]
    fn reported_without_marker_is_rejected() {
        let field = Element::field(&owner(), "title", "android.view.View");

        assert!(matches!(
            classify(MarkerKind::BindView, &field),
            Classification::Rejected(PlacementError::MissingMarker { .. })
        ));
    }
}
