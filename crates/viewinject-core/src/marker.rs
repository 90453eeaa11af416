use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display},
    slice,
};

///
/// ViewId
///
/// Numeric view identifier carried by a marker. Ordering is numeric and
/// drives the statement order of generated code.
///

#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct ViewId(pub i32);

impl ViewId {
    /// Platform sentinel meaning "no view".
    pub const NO_ID: Self = Self(-1);

    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn is_no_id(self) -> bool {
        self.0 == Self::NO_ID.0
    }
}

///
/// MarkerKind
///
/// The fixed set of markers the processor asks the host for.
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
#[remain::sorted]
pub enum MarkerKind {
    BindView,
    OnClick,
}

impl MarkerKind {
    pub const ALL: [Self; 2] = [Self::BindView, Self::OnClick];
}

///
/// Marker
///
/// Data-only annotation attached to an element. `BindView` names exactly one
/// view; `OnClick` may name several views served by the same handler.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Marker {
    BindView(ViewId),
    OnClick(Vec<ViewId>),
}

impl Marker {
    #[must_use]
    pub fn bind_view(id: i32) -> Self {
        Self::BindView(ViewId(id))
    }

    #[must_use]
    pub fn on_click(ids: impl IntoIterator<Item = i32>) -> Self {
        Self::OnClick(ids.into_iter().map(ViewId).collect())
    }

    #[must_use]
    pub const fn kind(&self) -> MarkerKind {
        match self {
            Self::BindView(_) => MarkerKind::BindView,
            Self::OnClick(_) => MarkerKind::OnClick,
        }
    }

    /// Identifiers in declaration order.
    #[must_use]
    pub fn ids(&self) -> &[ViewId] {
        match self {
            Self::BindView(id) => slice::from_ref(id),
            Self::OnClick(ids) => ids,
        }
    }
}

impl Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BindView(id) => write!(f, "@BindView({id})"),
            Self::OnClick(ids) => {
                let ids = ids
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");

                write!(f, "@OnClick({{{ids}}})")
            }
        }
    }
}
