//! Collaborator boundary over hierarchical recording files
//!
//! The on-disk format is deliberately opaque: the traits here expose exactly
//! the capabilities the access layer needs — open/close, named-section lookup,
//! row/column enumeration, and index-based slicing — and nothing else. Any
//! backend that can answer these questions (an HDF5 reader, a remote object
//! store, the in-memory backend in [`crate::memory`]) plugs in unchanged.

use crate::{CellValue, Result, UnitId};
use std::path::Path;

/// Data standard identifier carried by the files this crate reads.
pub const DATA_STANDARD: &str = "NWB:N";

/// Name of the variable-length column holding per-unit spike times.
pub const SPIKE_TIMES_COLUMN: &str = "spike_times";

/// Top-level identifying metadata of a recording session.
///
/// Every field is optional; files omit sections freely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionMetadata {
    pub session_id: Option<String>,
    pub session_description: Option<String>,
    pub experiment_description: Option<String>,
    pub subject_id: Option<String>,
}

/// A named raw recorded data stream stored at the top level of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionInfo {
    pub name: String,
    /// Declared kind of the entry, e.g. `ElectricalSeries`.
    pub kind: String,
    /// Array shape, if the entry carries a sliceable array.
    pub shape: Option<Vec<usize>>,
}

/// A derived data interface contained in a processing module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataInterfaceInfo {
    pub name: String,
    pub kind: String,
}

/// A named grouping of derived data interfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingModuleInfo {
    pub name: String,
    pub interfaces: Vec<DataInterfaceInfo>,
}

/// Opens store handles for reading.
pub trait StoreOpener {
    type Store: HierarchicalStore;

    /// Open the file at `path` for reading.
    fn open(&self, path: &Path) -> Result<Self::Store>;
}

/// An open, scoped handle to a hierarchical recording file.
///
/// One handle serves one logical reader with one in-flight operation; handles
/// are not shared across threads. Closing is idempotent and also happens on
/// drop, so a handle never outlives the call that needed it.
pub trait HierarchicalStore {
    /// Top-level identifying metadata.
    fn session_metadata(&self) -> Result<SessionMetadata>;

    /// All top-level acquisitions, in file order.
    fn acquisitions(&self) -> Result<Vec<AcquisitionInfo>>;

    /// All processing modules with their contained interfaces, in file order.
    fn processing_modules(&self) -> Result<Vec<ProcessingModuleInfo>>;

    /// The units table, if the file has one.
    fn units(&self) -> Result<Option<&dyn UnitsTable>>;

    /// Release the underlying file handle. Idempotent.
    fn close(&mut self) -> Result<()>;
}

/// The spike-sorted units section of a store: one row per unit.
///
/// `read_slice` must return exactly the requested index range without reading
/// unrequested data; the chunked reader relies on this to keep peak memory
/// bounded by its chunk size.
pub trait UnitsTable {
    /// Number of rows in the table.
    fn row_count(&self) -> Result<usize>;

    /// Declared column names, in file order.
    fn column_names(&self) -> Result<Vec<String>>;

    /// The ordered sequence of external unit identifiers, one per row.
    fn unit_ids(&self) -> Result<Vec<UnitId>>;

    /// Length of one row's sequence in the named column.
    fn row_len(&self, row: usize, column: &str) -> Result<usize>;

    /// Read `[start, end)` of one row's sequence in the named column.
    fn read_slice(&self, row: usize, column: &str, start: usize, end: usize)
        -> Result<Vec<CellValue>>;
}

/// Run `f` against a freshly opened store handle, closing it on every exit
/// path.
///
/// The handle is released whether `f` succeeds or fails; a close failure after
/// a successful `f` is surfaced, a close failure after a failed `f` is
/// subordinate to the original error.
pub fn with_store<O, T, F>(opener: &O, path: &Path, f: F) -> Result<T>
where
    O: StoreOpener,
    F: FnOnce(&O::Store) -> Result<T>,
{
    let mut store = opener.open(path)?;
    let result = f(&store);
    let closed = store.close();
    match result {
        Ok(value) => {
            closed?;
            Ok(value)
        }
        Err(e) => Err(e),
    }
}
