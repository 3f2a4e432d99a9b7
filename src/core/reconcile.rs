//! Diff-based set reconciliation for facet rows
//!
//! Every facet family (attribute values, permissions, status flags) shares the
//! same write model: the caller supplies the complete desired set for one
//! owner, and the engine reconciles the stored rows against it by composite
//! key. Records present only in the desired set are inserted, stored rows
//! whose key left the desired set are deleted, and matches are left untouched
//! so they keep their internal row id.

use crate::core::entity::EntityRef;
use crate::core::error::ValidationError;
use indexmap::IndexMap;
use std::collections::HashSet;
use uuid::Uuid;

/// Composite identity of a record within one owner's facet.
///
/// Keys are joined from `:`-separated segments. Segments referencing entity
/// keys are colon-free by construction (see
/// [`is_valid_key`](crate::core::entity::is_valid_key)), and free text only
/// ever forms the final segment, so composed keys are unambiguous.
pub trait CompositeKey {
    /// The composite key of this record (e.g. "NAME:EN:London")
    fn composite_key(&self) -> String;
}

/// A desired record for a reconciliation
pub trait FacetInput: CompositeKey + Clone + Send + Sync + 'static {
    /// Check key-format fields before any store work
    fn validate(&self) -> Result<(), ValidationError>;
}

/// A stored facet row: a reconcilable record attached to one owner.
///
/// Rows carry a stable internal id alongside their composite key. The
/// reconciliation never mutates a row in place: a changed value surfaces as a
/// changed composite key, i.e. one delete and one insert, while an unchanged
/// record keeps its id across any number of reconciliations.
pub trait FacetRow: CompositeKey + Clone + Send + Sync + 'static {
    /// The input form this row is materialized from
    type Input: FacetInput;

    /// Facet family name used in logs and events (e.g. "string", "permission")
    fn family() -> &'static str;

    /// Stable internal row id
    fn id(&self) -> Uuid;

    /// The tenant this row belongs to
    fn tenant_id(&self) -> Uuid;

    /// The owning entity this row is attached to
    fn owner(&self) -> &EntityRef;

    /// Materialize a stored row from an input, with a fresh id
    fn from_input(tenant_id: Uuid, owner: &EntityRef, input: Self::Input) -> Self;
}

/// Outcome of diffing one owner's stored rows against a desired input set
#[derive(Debug, Clone)]
pub struct Reconciliation<R: FacetRow> {
    /// Inputs with no stored counterpart, to be materialized and inserted
    pub insert: Vec<R::Input>,

    /// Stored rows whose key left the desired set, to be deleted
    pub delete: Vec<R>,

    /// Stored rows matching a desired key, untouched (ids preserved)
    pub keep: Vec<R>,
}

impl<R: FacetRow> Reconciliation<R> {
    /// True when the stored set already equals the desired set
    pub fn is_noop(&self) -> bool {
        self.insert.is_empty() && self.delete.is_empty()
    }
}

/// Diff stored rows against the desired input set, by composite key.
///
/// Duplicate keys in `desired` collapse to their first occurrence, so the
/// outcome's key set equals the deduplicated desired key set exactly.
/// Duplicate keys among stored rows (which a healthy store never produces)
/// collapse the same way: the first row is kept, the rest are deleted.
pub fn diff<R: FacetRow>(existing: Vec<R>, desired: Vec<R::Input>) -> Reconciliation<R> {
    // First occurrence wins; IndexMap keeps input order for the inserts.
    let mut wanted: IndexMap<String, R::Input> = IndexMap::with_capacity(desired.len());
    for input in desired {
        wanted.entry(input.composite_key()).or_insert(input);
    }

    let mut keep = Vec::new();
    let mut delete = Vec::new();
    let mut matched: HashSet<String> = HashSet::with_capacity(wanted.len());
    for row in existing {
        let key = row.composite_key();
        if wanted.contains_key(&key) && matched.insert(key) {
            keep.push(row);
        } else {
            delete.push(row);
        }
    }

    let insert = wanted
        .into_iter()
        .filter(|(key, _)| !matched.contains(key))
        .map(|(_, input)| input)
        .collect();

    Reconciliation {
        insert,
        delete,
        keep,
    }
}
