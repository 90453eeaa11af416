//! Metadata collection.
//!
//! Scans one round's marked elements, filters them, and folds the accepted
//! ones into the registry's per-owner models.

use crate::{
    filter::{Classification, Role, classify},
    host::{Diagnostic, Messager, RoundEnvironment},
    marker::MarkerKind,
    registry::ProxyRegistry,
};
use serde::Serialize;

///
/// CollectStats
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct CollectStats {
    pub scanned: usize,
    pub accepted: usize,
    pub rejected: usize,
}

/// Populate `registry` from every element the round reports for the
/// supported markers. Placement errors go to `messager`; they never stop
/// collection.
pub fn collect<R, M>(round: &R, registry: &mut ProxyRegistry, messager: &mut M) -> CollectStats
where
    R: RoundEnvironment + ?Sized,
    M: Messager + ?Sized,
{
    let mut stats = CollectStats::default();

    for kind in MarkerKind::ALL {
        for element in round.elements_marked_with(kind) {
            stats.scanned += 1;

            let role = match classify(kind, element) {
                Classification::Accepted(role) => role,
                Classification::Rejected(err) => {
                    tracing::debug!(element = %element, %err, "placement rejected");
                    stats.rejected += 1;
                    messager.print_message(Diagnostic::error(err.to_string()).on_element(element));
                    continue;
                }
            };

            // classify guarantees both of these
            let (Some(owner), Some(marker)) = (element.enclosing.as_ref(), element.marker(kind))
            else {
                continue;
            };

            let model = registry.model_for(owner);
            match role {
                Role::Field => {
                    for id in marker.ids() {
                        model.bind_field(*id, element);
                    }
                }
                Role::Method => {
                    for id in marker.ids() {
                        model.bind_handler(*id, element);
                    }
                }
                Role::Other(_) => continue,
            }

            stats.accepted += 1;
        }
    }

    tracing::trace!(?stats, models = registry.len(), "collection complete");

    stats
}
