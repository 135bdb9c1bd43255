//! Iperf Report Library
//!
//! A stateless, reusable library for converting iperf3 JSON throughput
//! reports into styled xlsx workbooks.
//!
//! # Architecture
//!
//! The library is a two-stage pipeline, with no shared state between files:
//! - [`parse_report`] reads one iperf3 JSON document and derives a [`Table`]:
//!   one time-labelled row per reporting interval, one column per logical
//!   stream, connection metadata joined onto the columns by socket id
//! - [`write_workbook`] renders a [`Table`] into a single-sheet workbook with
//!   the fixed report layout (header and unit rows, four metadata rows,
//!   frozen header region, centered cells)
//!
//! The library does NOT:
//! - Select input files or resolve output directories
//! - Orchestrate batches or decide per-file failure policy
//! - Notify anyone of success or failure
//!
//! All of that is in the application layer (iperf-report-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use iperf_report::{parse_report, write_workbook, ParseOptions};
//! use std::path::Path;
//!
//! let options = ParseOptions::new().with_cutoff("2023-11-15 07:13:30");
//! let table = parse_report(Path::new("run1.json"), &options).unwrap();
//! write_workbook(&table, Path::new("run1.xlsx")).unwrap();
//! ```

// Public modules
pub mod formatter;
pub mod options;
pub mod parser;
pub mod types;

// Re-export main types for convenience
pub use formatter::write_workbook;
pub use options::ParseOptions;
pub use parser::parse_report;
pub use types::{
    ConnectionAttribute, ConnectionInfo, ReportError, Result, StreamColumn, Table, TableRow,
};

// Internal modules (not exposed in public API)
mod schema;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: an empty table has no streams and renders four metadata rows
        let table = Table::default();
        assert_eq!(table.num_streams(), 0);
        assert!(table.is_empty());
        assert_eq!(table.metadata_rows().len(), 4);
    }
}
