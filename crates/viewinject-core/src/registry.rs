use crate::{element::TypeElement, model::ProxyModel};
use std::{collections::BTreeMap, mem};

///
/// ProxyRegistry
///
/// Per-round map from owner qualified name to its proxy model. Cleared at
/// the start of each round and drained by emission; nothing in here may
/// survive into the next round.
///

#[derive(Debug, Default)]
pub struct ProxyRegistry {
    models: BTreeMap<String, ProxyModel>,
}

impl ProxyRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.models.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn get(&self, owner: &str) -> Option<&ProxyModel> {
        self.models.get(owner)
    }

    /// Look up the model for `owner`, creating it on first sighting.
    pub fn model_for(&mut self, owner: &TypeElement) -> &mut ProxyModel {
        self.models
            .entry(owner.qualified_name().to_string())
            .or_insert_with(|| {
                tracing::debug!(owner = owner.qualified_name(), "new proxy model");
                ProxyModel::new(owner.clone())
            })
    }

    /// Take every model out in owner-name order, leaving the registry empty.
    pub fn drain(&mut self) -> impl Iterator<Item = ProxyModel> + use<> {
        mem::take(&mut self.models).into_values()
    }
}
