//! Bulk retrieval of spike times across all units
//!
//! A convenience on top of the units table for small recordings: every unit's
//! full `spike_times` sequence, keyed by external id. This materializes the
//! whole column set; for large rows prefer resolving one unit and streaming
//! its row through [`crate::ChunkedColumnReader`].

use crate::store::{HierarchicalStore, SPIKE_TIMES_COLUMN};
use crate::{NeurodataError, Result, UnitId};
use indexmap::IndexMap;
use tracing::debug;

/// Collect the full spike-time sequence of every unit, in table order.
///
/// Returns an empty map when the file has no units table.
pub fn collect_spike_times<S: HierarchicalStore>(store: &S) -> Result<IndexMap<UnitId, Vec<f64>>> {
    let Some(table) = store.units()? else {
        return Ok(IndexMap::new());
    };

    let ids = table.unit_ids()?;
    debug!(units = ids.len(), "collecting spike times");
    let mut spike_times = IndexMap::with_capacity(ids.len());
    for (row, id) in ids.into_iter().enumerate() {
        let len = table.row_len(row, SPIKE_TIMES_COLUMN)?;
        let cells = table.read_slice(row, SPIKE_TIMES_COLUMN, 0, len)?;
        let mut times = Vec::with_capacity(cells.len());
        for cell in &cells {
            times.push(cell.as_f64().ok_or_else(|| {
                NeurodataError::internal(format!(
                    "non-numeric spike time of type {} for unit {}",
                    cell.type_name(),
                    id
                ))
            })?);
        }
        spike_times.insert(id, times);
    }
    Ok(spike_times)
}
