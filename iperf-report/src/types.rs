//! Core types for the iperf report library
//!
//! This module defines the error taxonomy and the derived table structure that
//! the parser emits and the formatter consumes. The table is constructed once
//! per input file and carries no reference back to the source document.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Result type for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while converting a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The input document is not valid JSON or is missing required fields
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// The output workbook could not be written
    #[error("Failed to write workbook {path:?}: {cause}")]
    Write {
        /// Output path that could not be written
        path: PathBuf,
        /// Underlying cause reported by the workbook writer
        cause: String,
    },
}

/// Connection metadata for one logical stream, from `start.connected`
///
/// Identified by a numeric socket id, unique within a report. Immutable once
/// read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    /// Socket id correlating this connection with its throughput samples
    pub socket: u64,
    pub local_host: String,
    pub local_port: u16,
    pub remote_host: String,
    pub remote_port: u16,
}

/// The four connection attributes rendered as metadata rows, in render order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionAttribute {
    LocalHost,
    LocalPort,
    RemoteHost,
    RemotePort,
}

impl ConnectionAttribute {
    /// Fixed render order of the metadata rows
    pub const ORDER: [ConnectionAttribute; 4] = [
        ConnectionAttribute::LocalHost,
        ConnectionAttribute::LocalPort,
        ConnectionAttribute::RemoteHost,
        ConnectionAttribute::RemotePort,
    ];

    /// Row label as it appears in column A of the sheet
    pub fn label(self) -> &'static str {
        match self {
            ConnectionAttribute::LocalHost => "LocalHost",
            ConnectionAttribute::LocalPort => "LocalPort",
            ConnectionAttribute::RemoteHost => "RemoteHost",
            ConnectionAttribute::RemotePort => "RemotePort",
        }
    }
}

impl fmt::Display for ConnectionAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl ConnectionInfo {
    /// Render one attribute of this connection as a cell value
    pub fn attribute(&self, attr: ConnectionAttribute) -> String {
        match attr {
            ConnectionAttribute::LocalHost => self.local_host.clone(),
            ConnectionAttribute::LocalPort => self.local_port.to_string(),
            ConnectionAttribute::RemoteHost => self.remote_host.clone(),
            ConnectionAttribute::RemotePort => self.remote_port.to_string(),
        }
    }
}

/// One table column: a logical stream and its connection metadata
///
/// A stream observed in `intervals` but absent from `start.connected` has no
/// connection and renders empty metadata cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamColumn {
    /// Socket id of the stream
    pub socket: u64,
    /// Matching entry from `start.connected`, if any
    pub connection: Option<ConnectionInfo>,
}

impl StreamColumn {
    /// Column header label, e.g. `Stream_5`
    pub fn label(&self) -> String {
        format!("Stream_{}", self.socket)
    }
}

/// One data row: a formatted timestamp and one cell per stream column
///
/// `cells` is index-aligned with [`Table::columns`]. A `None` cell means the
/// stream had no sample for that interval and renders as an empty field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Local wall-clock timestamp (`%Y-%m-%d %H:%M:%S`, UTC+9)
    pub timestamp: String,
    /// Rounded bits-per-second per column, absent for sparse samples
    pub cells: Vec<Option<u64>>,
}

/// The derived 2-D table: time rows by stream columns
///
/// Columns are ascending by numeric socket id; rows are ascending by timestamp
/// string (the fixed-width format makes lexicographic order chronological).
/// The four metadata rows logically precede all data rows and are produced by
/// [`Table::metadata_rows`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Stream columns, ascending by socket id
    pub columns: Vec<StreamColumn>,
    /// Data rows, ascending by timestamp string
    pub rows: Vec<TableRow>,
}

impl Table {
    /// The four synthetic metadata rows, in fixed attribute order
    ///
    /// Each entry is the row label plus one cell per column, empty when the
    /// column has no connection info.
    pub fn metadata_rows(&self) -> Vec<(&'static str, Vec<String>)> {
        ConnectionAttribute::ORDER
            .iter()
            .map(|&attr| {
                let values = self
                    .columns
                    .iter()
                    .map(|col| {
                        col.connection
                            .as_ref()
                            .map(|conn| conn.attribute(attr))
                            .unwrap_or_default()
                    })
                    .collect();
                (attr.label(), values)
            })
            .collect()
    }

    /// Number of stream columns
    pub fn num_streams(&self) -> usize {
        self.columns.len()
    }

    /// True if the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
