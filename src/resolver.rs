//! Mapping external unit identifiers to physical row positions
//!
//! Unit counts are small relative to per-unit spike counts, so resolution is
//! a linear scan of the identifier sequence. [`UnitIndexResolver`] caches the
//! scan for repeated lookups against one handle; the cache borrows the table,
//! so it cannot outlive the handle it was built from.

use crate::store::{HierarchicalStore, UnitsTable};
use crate::{NeurodataError, Result, UnitId};
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::debug;

/// Resolve `unit_id` to its zero-based row position in the store's units
/// table.
///
/// Fails with `NotFound` when the file has no units table, the table is
/// empty, or no row carries the identifier.
pub fn resolve_unit<S: HierarchicalStore>(store: &S, unit_id: &UnitId) -> Result<usize> {
    let table = store
        .units()?
        .ok_or_else(|| NeurodataError::not_found("file has no units table"))?;
    resolve_in_table(table, unit_id)
}

/// Resolve `unit_id` against an already-located units table.
pub fn resolve_in_table(table: &dyn UnitsTable, unit_id: &UnitId) -> Result<usize> {
    let ids = table.unit_ids()?;
    if ids.is_empty() {
        return Err(NeurodataError::not_found("units table is empty"));
    }
    let position = ids
        .iter()
        .position(|id| id == unit_id)
        .ok_or_else(|| {
            NeurodataError::not_found(format!("unit {} not present in units table", unit_id))
        })?;
    debug!(unit = %unit_id, position, "resolved unit");
    Ok(position)
}

/// Caching resolver for repeated lookups within one session.
///
/// The identifier sequence is read once, on the first lookup; later lookups
/// hit the cached map. Where identifiers repeat, the first occurrence wins,
/// matching the scan in [`resolve_in_table`].
pub struct UnitIndexResolver<'a> {
    table: &'a dyn UnitsTable,
    positions: RefCell<Option<HashMap<UnitId, usize>>>,
}

impl<'a> UnitIndexResolver<'a> {
    pub fn new(table: &'a dyn UnitsTable) -> Self {
        Self {
            table,
            positions: RefCell::new(None),
        }
    }

    /// Build a resolver over the store's units table.
    pub fn for_store<S: HierarchicalStore>(store: &'a S) -> Result<Self> {
        let table = store
            .units()?
            .ok_or_else(|| NeurodataError::not_found("file has no units table"))?;
        Ok(Self::new(table))
    }

    pub fn resolve(&self, unit_id: &UnitId) -> Result<usize> {
        let mut cache = self.positions.borrow_mut();
        if cache.is_none() {
            let ids = self.table.unit_ids()?;
            let mut positions = HashMap::with_capacity(ids.len());
            for (row, id) in ids.into_iter().enumerate() {
                positions.entry(id).or_insert(row);
            }
            debug!(units = positions.len(), "cached unit index");
            *cache = Some(positions);
        }

        let positions = cache.as_ref().expect("cache populated above");
        if positions.is_empty() {
            return Err(NeurodataError::not_found("units table is empty"));
        }
        positions.get(unit_id).copied().ok_or_else(|| {
            NeurodataError::not_found(format!("unit {} not present in units table", unit_id))
        })
    }
}
