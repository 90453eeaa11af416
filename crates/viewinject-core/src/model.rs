use crate::{
    element::{Element, TypeElement},
    marker::ViewId,
};
use derive_more::Display;
use std::collections::{BTreeMap, BTreeSet, btree_map::Entry};
use thiserror::Error as ThisError;

///
/// BindingTable
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum BindingTable {
    #[display("field")]
    Field,
    #[display("handler")]
    Handler,
}

///
/// ConflictError
///
/// Two or more distinct elements claimed the same view id in one binding
/// table. Claimants are sorted by symbol key so the report does not depend
/// on discovery order.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error(
    "duplicate view id {id} in {table} bindings of `{owner}`: claimed by {}",
    .claimants.join(", ")
)]
pub struct ConflictError {
    pub owner: String,
    pub table: BindingTable,
    pub id: ViewId,
    pub claimants: Vec<String>,
}

///
/// ProxyModel
///
/// Everything that has to be generated for one owning class in one round.
///

#[derive(Clone, Debug)]
pub struct ProxyModel {
    owner: TypeElement,
    field_bindings: BTreeMap<ViewId, Element>,
    handler_bindings: BTreeMap<ViewId, Element>,
    conflicts: BTreeMap<(BindingTable, ViewId), BTreeSet<String>>,
}

impl ProxyModel {
    #[must_use]
    pub const fn new(owner: TypeElement) -> Self {
        Self {
            owner,
            field_bindings: BTreeMap::new(),
            handler_bindings: BTreeMap::new(),
            conflicts: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn owner(&self) -> &TypeElement {
        &self.owner
    }

    #[must_use]
    pub fn owner_name(&self) -> &str {
        self.owner.qualified_name()
    }

    /// Simple name of the generated class: the owner's binary name plus
    /// `suffix`.
    #[must_use]
    pub fn generated_class_name(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.owner.binary_name())
    }

    #[must_use]
    pub fn generated_qualified_name(&self, suffix: &str) -> String {
        let class_name = self.generated_class_name(suffix);

        match self.owner.package() {
            "" => class_name,
            package => format!("{package}.{class_name}"),
        }
    }

    pub fn bind_field(&mut self, id: ViewId, element: &Element) {
        self.bind(BindingTable::Field, id, element);
    }

    pub fn bind_handler(&mut self, id: ViewId, element: &Element) {
        self.bind(BindingTable::Handler, id, element);
    }

    // The first claimant stays bound; later distinct claimants only widen
    // the conflict set, which blocks emission for the whole model.
    fn bind(&mut self, table: BindingTable, id: ViewId, element: &Element) {
        let bindings = match table {
            BindingTable::Field => &mut self.field_bindings,
            BindingTable::Handler => &mut self.handler_bindings,
        };

        match bindings.entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(element.clone());
            }
            Entry::Occupied(slot) => {
                let existing = slot.get().symbol_key();
                let incoming = element.symbol_key();
                if existing == incoming {
                    return;
                }

                tracing::debug!(
                    owner = self.owner.qualified_name(),
                    %table,
                    %id,
                    existing = %existing,
                    incoming = %incoming,
                    "duplicate view id"
                );

                let claimants = self.conflicts.entry((table, id)).or_default();
                claimants.insert(existing);
                claimants.insert(incoming);
            }
        }
    }

    #[must_use]
    pub fn field(&self, id: ViewId) -> Option<&Element> {
        self.field_bindings.get(&id)
    }

    #[must_use]
    pub fn handler(&self, id: ViewId) -> Option<&Element> {
        self.handler_bindings.get(&id)
    }

    /// Every bound id across both tables, ascending.
    #[must_use]
    pub fn ids(&self) -> BTreeSet<ViewId> {
        self.field_bindings
            .keys()
            .chain(self.handler_bindings.keys())
            .copied()
            .collect()
    }

    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.field_bindings.len() + self.handler_bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.binding_count() == 0
    }

    #[must_use]
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Conflicts ordered by table, then id.
    #[must_use]
    pub fn conflicts(&self) -> Vec<ConflictError> {
        self.conflicts
            .iter()
            .map(|((table, id), claimants)| ConflictError {
                owner: self.owner_name().to_string(),
                table: *table,
                id: *id,
                claimants: claimants.iter().cloned().collect(),
            })
            .collect()
    }
}
