//! Structure reports over a whole recording file
//!
//! Two depths of walk: [`summarize`] collects names, counts, and shapes
//! without touching variable-length payloads; [`describe`] additionally
//! materializes every cell of the units table, which is O(rows x columns) and
//! only sensible for small tables. Callers needing bounded memory on large
//! units tables should resolve a unit and stream its row instead.
//!
//! Both walks run against one open handle and abort wholesale on the first
//! I/O failure; no partial report is returned.

use crate::store::{HierarchicalStore, SessionMetadata};
use crate::{CellValue, Result, UnitId};
use std::fmt;
use tracing::debug;

/// Per-module entry of a [`FileSummary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSummary {
    pub name: String,
    pub interface_count: usize,
}

/// Per-acquisition entry of a [`FileSummary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionSummary {
    pub name: String,
    /// `None` when the entry carries no sliceable array.
    pub shape: Option<Vec<usize>>,
}

/// Bounded-size overview of a recording file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub session: SessionMetadata,
    pub modules: Vec<ModuleSummary>,
    pub acquisitions: Vec<AcquisitionSummary>,
    /// Row count of the units table, when the file has one.
    pub unit_count: Option<usize>,
}

/// Summarize the file's structure without reading variable-length payloads.
///
/// Every section is independently optional; a file with no processing
/// modules, no subject, or no units table simply has those parts absent from
/// the report.
pub fn summarize<S: HierarchicalStore>(store: &S) -> Result<FileSummary> {
    debug!("summarizing file structure");
    let session = store.session_metadata()?;

    let modules = store
        .processing_modules()?
        .into_iter()
        .map(|module| ModuleSummary {
            name: module.name,
            interface_count: module.interfaces.len(),
        })
        .collect();

    let acquisitions = store
        .acquisitions()?
        .into_iter()
        .map(|acq| AcquisitionSummary {
            name: acq.name,
            shape: acq.shape,
        })
        .collect();

    let unit_count = match store.units()? {
        Some(table) => Some(table.row_count()?),
        None => None,
    };

    Ok(FileSummary {
        session,
        modules,
        acquisitions,
        unit_count,
    })
}

impl fmt::Display for FileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File Summary:")?;
        write_session(f, &self.session)?;

        if !self.modules.is_empty() {
            writeln!(f, "Processing Modules:")?;
            for module in &self.modules {
                writeln!(f, "- {}: {} interfaces", module.name, module.interface_count)?;
            }
        }

        if !self.acquisitions.is_empty() {
            writeln!(f, "Acquisitions:")?;
            for acq in &self.acquisitions {
                match &acq.shape {
                    Some(shape) => writeln!(f, "- {}: Shape = {:?}", acq.name, shape)?,
                    None => writeln!(f, "- {}: Shape = N/A", acq.name)?,
                }
            }
        }

        if let Some(count) = self.unit_count {
            writeln!(f, "Units:")?;
            writeln!(f, "- Count = {}", count)?;
        }
        Ok(())
    }
}

/// Per-interface entry of a [`FileDescription`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDescription {
    pub name: String,
    pub kind: String,
}

/// Per-module entry of a [`FileDescription`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescription {
    pub name: String,
    pub interfaces: Vec<InterfaceDescription>,
}

/// Per-acquisition entry of a [`FileDescription`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionDescription {
    pub name: String,
    pub kind: String,
}

/// One fully materialized units-table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitDescription {
    pub id: UnitId,
    /// Column name paired with the row's full cell data for that column.
    pub columns: Vec<(String, Vec<CellValue>)>,
}

/// Deep structural walk of a recording file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescription {
    pub session: SessionMetadata,
    pub modules: Vec<ModuleDescription>,
    pub acquisitions: Vec<AcquisitionDescription>,
    pub units: Option<Vec<UnitDescription>>,
}

/// Walk the whole file, materializing every declared column of every unit.
pub fn describe<S: HierarchicalStore>(store: &S) -> Result<FileDescription> {
    debug!("describing file structure");
    let session = store.session_metadata()?;

    let modules = store
        .processing_modules()?
        .into_iter()
        .map(|module| ModuleDescription {
            name: module.name,
            interfaces: module
                .interfaces
                .into_iter()
                .map(|interface| InterfaceDescription {
                    name: interface.name,
                    kind: interface.kind,
                })
                .collect(),
        })
        .collect();

    let acquisitions = store
        .acquisitions()?
        .into_iter()
        .map(|acq| AcquisitionDescription {
            name: acq.name,
            kind: acq.kind,
        })
        .collect();

    let units = match store.units()? {
        Some(table) => {
            let ids = table.unit_ids()?;
            let columns = table.column_names()?;
            let mut descriptions = Vec::with_capacity(ids.len());
            for (row, id) in ids.into_iter().enumerate() {
                let mut cells = Vec::with_capacity(columns.len());
                for column in &columns {
                    let len = table.row_len(row, column)?;
                    cells.push((column.clone(), table.read_slice(row, column, 0, len)?));
                }
                descriptions.push(UnitDescription { id, columns: cells });
            }
            Some(descriptions)
        }
        None => None,
    };

    Ok(FileDescription {
        session,
        modules,
        acquisitions,
        units,
    })
}

impl fmt::Display for FileDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Metadata:")?;
        write_session(f, &self.session)?;

        for module in &self.modules {
            writeln!(f, "Processing Module: {}", module.name)?;
            for interface in &module.interfaces {
                writeln!(f, "  Data Interface: {}", interface.name)?;
                writeln!(f, "    Kind: {}", interface.kind)?;
            }
        }

        if !self.acquisitions.is_empty() {
            writeln!(f, "Acquisitions:")?;
            for acq in &self.acquisitions {
                writeln!(f, "  Acquisition: {}", acq.name)?;
                writeln!(f, "    Kind: {}", acq.kind)?;
            }
        }

        if let Some(units) = &self.units {
            writeln!(f, "Units:")?;
            for unit in units {
                writeln!(f, "  Unit ID: {}", unit.id)?;
                for (column, cells) in &unit.columns {
                    write!(f, "    {}: [", column)?;
                    for (i, cell) in cells.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", cell)?;
                    }
                    writeln!(f, "]")?;
                }
            }
        }
        Ok(())
    }
}

fn write_session(f: &mut fmt::Formatter<'_>, session: &SessionMetadata) -> fmt::Result {
    if let Some(id) = &session.session_id {
        writeln!(f, "Session ID: {}", id)?;
    }
    if let Some(description) = &session.session_description {
        writeln!(f, "Session Description: {}", description)?;
    }
    if let Some(description) = &session.experiment_description {
        writeln!(f, "Experiment Description: {}", description)?;
    }
    if let Some(subject) = &session.subject_id {
        writeln!(f, "Subject ID: {}", subject)?;
    }
    Ok(())
}
