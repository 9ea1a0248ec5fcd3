//! Bounded-memory streaming of variable-length row data
//!
//! A row's `spike_times` sequence can dwarf the rest of the file, so it is
//! never materialized whole. [`ChunkedColumnReader`] walks the file-backed
//! sequence with a single forward cursor, issuing one bounded `read_slice`
//! per chunk; nothing past the chunk currently requested is read, keeping
//! peak memory at `O(chunk_size)` regardless of row length.

use crate::resolver::resolve_unit;
use crate::store::{HierarchicalStore, UnitsTable};
use crate::{CellValue, NeurodataError, Result, UnitId};
use tracing::{debug, trace};

/// Chunk size used when a caller has no reason to pick one.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Lazy iterator over one row's variable-length column data.
///
/// Chunks are produced in ascending offset order and partition the row's full
/// sequence exactly once. The iterator is a single forward pass: it is
/// consumed by iteration, and a fresh reader is needed to re-read from the
/// start. A failed read is yielded once, after which the iterator is fused.
pub struct ChunkedColumnReader<'a> {
    table: &'a dyn UnitsTable,
    column: String,
    row: usize,
    chunk_size: usize,
    total: usize,
    offset: usize,
    failed: bool,
}

impl std::fmt::Debug for ChunkedColumnReader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkedColumnReader")
            .field("column", &self.column)
            .field("row", &self.row)
            .field("chunk_size", &self.chunk_size)
            .field("total", &self.total)
            .field("offset", &self.offset)
            .field("failed", &self.failed)
            .finish()
    }
}

impl<'a> ChunkedColumnReader<'a> {
    /// Start a chunked read of `column` for the row at `row`.
    ///
    /// `chunk_size` must be positive; that is checked before the store is
    /// touched. The row must be in range and the column must exist.
    pub fn new(
        table: &'a dyn UnitsTable,
        column: &str,
        row: usize,
        chunk_size: usize,
    ) -> Result<Self> {
        if chunk_size == 0 {
            return Err(NeurodataError::invalid_argument(
                "chunk size must be positive",
            ));
        }

        let rows = table.row_count()?;
        if row >= rows {
            return Err(NeurodataError::not_found(format!(
                "row {} out of range for units table with {} rows",
                row, rows
            )));
        }
        if !table.column_names()?.iter().any(|name| name == column) {
            return Err(NeurodataError::not_found(format!(
                "column {} not present in units table",
                column
            )));
        }

        let total = table.row_len(row, column)?;
        debug!(column, row, total, chunk_size, "starting chunked read");
        Ok(Self {
            table,
            column: column.to_string(),
            row,
            chunk_size,
            total,
            offset: 0,
            failed: false,
        })
    }

    /// Resolve `unit_id` and start a chunked read of its row.
    pub fn for_unit<S: HierarchicalStore>(
        store: &'a S,
        unit_id: &UnitId,
        column: &str,
        chunk_size: usize,
    ) -> Result<Self> {
        if chunk_size == 0 {
            return Err(NeurodataError::invalid_argument(
                "chunk size must be positive",
            ));
        }
        let row = resolve_unit(store, unit_id)?;
        let table = store
            .units()?
            .ok_or_else(|| NeurodataError::not_found("file has no units table"))?;
        Self::new(table, column, row, chunk_size)
    }

    /// Total length of the row's sequence.
    pub fn total_len(&self) -> usize {
        self.total
    }

    /// Number of chunks the full pass will produce.
    pub fn chunk_count(&self) -> usize {
        self.total.div_ceil(self.chunk_size)
    }
}

impl Iterator for ChunkedColumnReader<'_> {
    type Item = Result<Vec<CellValue>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.total {
            return None;
        }

        let end = (self.offset + self.chunk_size).min(self.total);
        trace!(
            column = %self.column,
            row = self.row,
            start = self.offset,
            end,
            "reading chunk"
        );
        match self.table.read_slice(self.row, &self.column, self.offset, end) {
            Ok(chunk) => {
                self.offset = end;
                Some(Ok(chunk))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for ChunkedColumnReader<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryUnitsTable;
    use crate::SPIKE_TIMES_COLUMN;

    fn table() -> MemoryUnitsTable {
        MemoryUnitsTable::new(vec![1i64, 2])
            .with_float_column(SPIKE_TIMES_COLUMN, vec![vec![0.1, 0.2, 0.3], vec![]])
    }

    #[test]
    fn test_zero_chunk_size_is_rejected_before_any_read() {
        let table = table();
        let err = ChunkedColumnReader::new(&table, SPIKE_TIMES_COLUMN, 0, 0).unwrap_err();
        assert!(matches!(err, NeurodataError::InvalidArgument(_)));
        assert!(table.slice_reads().is_empty());
    }

    #[test]
    fn test_zero_length_row_yields_no_chunks() {
        let table = table();
        let mut reader = ChunkedColumnReader::new(&table, SPIKE_TIMES_COLUMN, 1, 4).unwrap();
        assert_eq!(reader.chunk_count(), 0);
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_final_chunk_is_truncated() {
        let table = table();
        let chunks: Vec<_> = ChunkedColumnReader::new(&table, SPIKE_TIMES_COLUMN, 0, 2)
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 2);
        assert_eq!(chunks[1], vec![CellValue::from(0.3)]);
    }
}
