//! Lazy, indexed access to hierarchical neural recording files
//!
//! `neurodata-core` reads large spike-sorting session files (session
//! metadata, multi-channel acquisitions, spike-sorted unit tables) without
//! loading whole datasets into memory, and carries the typed parameter store
//! used to configure downstream analyses.
//!
//! # Key Components
//!
//! - **Store traits**: the collaborator boundary over the on-disk format
//!   - [`HierarchicalStore`] / [`UnitsTable`] expose named sections, row and
//!     column enumeration, and index-based slicing
//!   - [`with_store`] scopes a handle to one operation, closing it on every
//!     exit path
//!
//! - **Resolution**: mapping external unit identifiers to physical rows
//!   - [`resolve_unit`] for one-shot lookups
//!   - [`UnitIndexResolver`] caches the identifier scan for one session
//!
//! - **Streaming**: bounded-memory reads of variable-length row data
//!   - [`ChunkedColumnReader`] walks a row's file-backed sequence one chunk
//!     at a time, never reading ahead of the cursor
//!
//! - **Reports**: structure walks at two depths
//!   - [`summarize`] for a bounded overview, [`describe`] for the full
//!     O(rows x columns) walk
//!
//! - **Parameters**: [`ParameterStore`] with range-validated values and a
//!   flat JSON persistence round-trip
//!
//! # Design Philosophy
//!
//! The on-disk format stays behind the narrow store traits, so the access
//! layer works unchanged over any backend that can enumerate sections and
//! slice columns by index. The in-memory backend in [`memory`] is both the
//! test double and the smallest useful implementation of that boundary.
//!
//! # Example
//!
//! ```
//! use neurodata_core::{ChunkedColumnReader, MemoryStore, MemoryUnitsTable};
//! use neurodata_core::{Result, UnitId, SPIKE_TIMES_COLUMN};
//!
//! fn total_spikes(store: &MemoryStore, unit: i64) -> Result<usize> {
//!     let reader = ChunkedColumnReader::for_unit(store, &UnitId::from(unit),
//!         SPIKE_TIMES_COLUMN, 1024)?;
//!     let mut total = 0;
//!     for chunk in reader {
//!         total += chunk?.len();
//!     }
//!     Ok(total)
//! }
//!
//! let store = MemoryStore::builder()
//!     .units(MemoryUnitsTable::new(vec![7i64]).with_float_column(
//!         SPIKE_TIMES_COLUMN,
//!         vec![vec![0.1, 0.2, 0.5]],
//!     ))
//!     .build();
//! assert_eq!(total_spikes(&store, 7).unwrap(), 3);
//! ```

pub mod chunked;
pub mod error;
pub mod memory;
pub mod params;
pub mod resolver;
pub mod spikes;
pub mod store;
pub mod summary;
pub mod value;

pub use chunked::{ChunkedColumnReader, DEFAULT_CHUNK_SIZE};
pub use error::{ErrorContext, NeurodataError, Result};
pub use memory::{MemoryOpener, MemoryStore, MemoryStoreBuilder, MemoryUnitsTable};
pub use params::{Parameter, ParameterStore, ParameterType};
pub use resolver::{resolve_in_table, resolve_unit, UnitIndexResolver};
pub use spikes::collect_spike_times;
pub use store::{
    with_store, AcquisitionInfo, DataInterfaceInfo, HierarchicalStore, ProcessingModuleInfo,
    SessionMetadata, StoreOpener, UnitsTable, DATA_STANDARD, SPIKE_TIMES_COLUMN,
};
pub use summary::{describe, summarize, FileDescription, FileSummary};
pub use value::{CellValue, UnitId};
