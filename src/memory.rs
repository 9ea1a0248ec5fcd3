//! In-memory store backend
//!
//! A complete [`HierarchicalStore`] over owned vectors. It backs the crate's
//! tests the way byte-buffer files back the disk formats, and doubles as a
//! reference implementation of the collaborator traits for small datasets.
//! Every `read_slice` call is recorded, so tests can hold the chunked reader
//! to its bounded-read contract, and reads can be made to fail on demand to
//! exercise error paths.

use crate::store::{
    AcquisitionInfo, DataInterfaceInfo, HierarchicalStore, ProcessingModuleInfo, SessionMetadata,
    StoreOpener, UnitsTable,
};
use crate::{CellValue, NeurodataError, Result, UnitId};
use indexmap::IndexMap;
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// One recorded `read_slice` call against a [`MemoryUnitsTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceRead {
    pub row: usize,
    pub column: String,
    pub start: usize,
    pub end: usize,
}

/// In-memory units table: ordered ids plus per-row column data.
#[derive(Debug, Default)]
pub struct MemoryUnitsTable {
    ids: Vec<UnitId>,
    columns: IndexMap<String, Vec<Vec<CellValue>>>,
    slice_log: RefCell<Vec<SliceRead>>,
    id_reads: Cell<usize>,
    fail_after: Cell<Option<usize>>,
}

impl MemoryUnitsTable {
    pub fn new<I: Into<UnitId>>(ids: Vec<I>) -> Self {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Add a column; `rows` must hold one entry per unit.
    pub fn with_column(mut self, name: &str, rows: Vec<Vec<CellValue>>) -> Self {
        assert_eq!(
            rows.len(),
            self.ids.len(),
            "column {} has {} rows but the table has {} units",
            name,
            rows.len(),
            self.ids.len()
        );
        self.columns.insert(name.to_string(), rows);
        self
    }

    /// Add a variable-length float column, one sequence per unit.
    pub fn with_float_column(self, name: &str, rows: Vec<Vec<f64>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(CellValue::from).collect())
            .collect();
        self.with_column(name, rows)
    }

    /// Make every `read_slice` after the first `n` successful ones fail.
    pub fn fail_after_reads(&self, n: usize) {
        self.fail_after.set(Some(n));
    }

    /// All `read_slice` calls issued so far, in order.
    pub fn slice_reads(&self) -> Vec<SliceRead> {
        self.slice_log.borrow().clone()
    }

    /// Number of times the identifier sequence has been read.
    pub fn unit_id_reads(&self) -> usize {
        self.id_reads.get()
    }

    fn column_rows(&self, column: &str) -> Result<&Vec<Vec<CellValue>>> {
        self.columns.get(column).ok_or_else(|| {
            NeurodataError::not_found(format!("column {} not present in units table", column))
        })
    }

    fn row_cells(&self, row: usize, column: &str) -> Result<&Vec<CellValue>> {
        let rows = self.column_rows(column)?;
        rows.get(row).ok_or_else(|| {
            NeurodataError::not_found(format!(
                "row {} out of range for units table with {} rows",
                row,
                self.ids.len()
            ))
        })
    }
}

impl UnitsTable for MemoryUnitsTable {
    fn row_count(&self) -> Result<usize> {
        Ok(self.ids.len())
    }

    fn column_names(&self) -> Result<Vec<String>> {
        Ok(self.columns.keys().cloned().collect())
    }

    fn unit_ids(&self) -> Result<Vec<UnitId>> {
        self.id_reads.set(self.id_reads.get() + 1);
        Ok(self.ids.clone())
    }

    fn row_len(&self, row: usize, column: &str) -> Result<usize> {
        Ok(self.row_cells(row, column)?.len())
    }

    fn read_slice(
        &self,
        row: usize,
        column: &str,
        start: usize,
        end: usize,
    ) -> Result<Vec<CellValue>> {
        if let Some(limit) = self.fail_after.get() {
            if self.slice_log.borrow().len() >= limit {
                return Err(NeurodataError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("simulated read failure at row {} column {}", row, column),
                )));
            }
        }

        let cells = self.row_cells(row, column)?;
        if start > end || end > cells.len() {
            return Err(NeurodataError::invalid_argument(format!(
                "slice [{}, {}) out of range for sequence of length {}",
                start,
                end,
                cells.len()
            )));
        }

        self.slice_log.borrow_mut().push(SliceRead {
            row,
            column: column.to_string(),
            start,
            end,
        });
        Ok(cells[start..end].to_vec())
    }
}

/// In-memory recording file.
#[derive(Debug, Default)]
pub struct MemoryStore {
    metadata: SessionMetadata,
    acquisitions: Vec<AcquisitionInfo>,
    modules: Vec<ProcessingModuleInfo>,
    units: Option<MemoryUnitsTable>,
    closed: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn builder() -> MemoryStoreBuilder {
        MemoryStoreBuilder::default()
    }

    /// Concrete view of the units table, for read accounting in tests.
    pub fn units_table(&self) -> Option<&MemoryUnitsTable> {
        self.units.as_ref()
    }

    /// Shared flag that flips to `true` once the handle is closed.
    pub fn closed_flag(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.closed)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.get() {
            return Err(NeurodataError::internal(
                "operation on a closed store handle",
            ));
        }
        Ok(())
    }
}

impl HierarchicalStore for MemoryStore {
    fn session_metadata(&self) -> Result<SessionMetadata> {
        self.ensure_open()?;
        Ok(self.metadata.clone())
    }

    fn acquisitions(&self) -> Result<Vec<AcquisitionInfo>> {
        self.ensure_open()?;
        Ok(self.acquisitions.clone())
    }

    fn processing_modules(&self) -> Result<Vec<ProcessingModuleInfo>> {
        self.ensure_open()?;
        Ok(self.modules.clone())
    }

    fn units(&self) -> Result<Option<&dyn UnitsTable>> {
        self.ensure_open()?;
        Ok(self.units.as_ref().map(|t| t as &dyn UnitsTable))
    }

    fn close(&mut self) -> Result<()> {
        self.closed.set(true);
        Ok(())
    }
}

impl Drop for MemoryStore {
    fn drop(&mut self) {
        self.closed.set(true);
    }
}

/// Builder for [`MemoryStore`].
#[derive(Debug, Default)]
pub struct MemoryStoreBuilder {
    metadata: SessionMetadata,
    acquisitions: Vec<AcquisitionInfo>,
    modules: Vec<ProcessingModuleInfo>,
    units: Option<MemoryUnitsTable>,
}

impl MemoryStoreBuilder {
    pub fn session_id(mut self, id: &str) -> Self {
        self.metadata.session_id = Some(id.to_string());
        self
    }

    pub fn session_description(mut self, description: &str) -> Self {
        self.metadata.session_description = Some(description.to_string());
        self
    }

    pub fn experiment_description(mut self, description: &str) -> Self {
        self.metadata.experiment_description = Some(description.to_string());
        self
    }

    pub fn subject_id(mut self, id: &str) -> Self {
        self.metadata.subject_id = Some(id.to_string());
        self
    }

    pub fn acquisition(mut self, name: &str, kind: &str, shape: Option<Vec<usize>>) -> Self {
        self.acquisitions.push(AcquisitionInfo {
            name: name.to_string(),
            kind: kind.to_string(),
            shape,
        });
        self
    }

    pub fn processing_module(mut self, name: &str, interfaces: &[(&str, &str)]) -> Self {
        self.modules.push(ProcessingModuleInfo {
            name: name.to_string(),
            interfaces: interfaces
                .iter()
                .map(|(name, kind)| DataInterfaceInfo {
                    name: name.to_string(),
                    kind: kind.to_string(),
                })
                .collect(),
        });
        self
    }

    pub fn units(mut self, table: MemoryUnitsTable) -> Self {
        self.units = Some(table);
        self
    }

    pub fn build(self) -> MemoryStore {
        MemoryStore {
            metadata: self.metadata,
            acquisitions: self.acquisitions,
            modules: self.modules,
            units: self.units,
            closed: Rc::new(Cell::new(false)),
        }
    }
}

/// Opener over a registry of in-memory recordings keyed by path.
///
/// Opening hands the store out by value, so each registered recording backs
/// exactly one handle.
#[derive(Debug, Default)]
pub struct MemoryOpener {
    stores: RefCell<IndexMap<PathBuf, MemoryStore>>,
}

impl MemoryOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<P: Into<PathBuf>>(&self, path: P, store: MemoryStore) {
        self.stores.borrow_mut().insert(path.into(), store);
    }
}

impl StoreOpener for MemoryOpener {
    type Store = MemoryStore;

    fn open(&self, path: &Path) -> Result<MemoryStore> {
        self.stores.borrow_mut().shift_remove(path).ok_or_else(|| {
            NeurodataError::not_found(format!("no recording registered at {}", path.display()))
        })
    }
}
