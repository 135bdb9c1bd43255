//! Report parser
//!
//! Reads one iperf3 JSON report and derives the time-by-stream [`Table`]:
//! every interval becomes one row keyed by a formatted UTC+9 timestamp, every
//! distinct socket id observed across all intervals becomes one column, and
//! connection metadata from `start.connected` is joined onto the columns by
//! socket id.

use crate::options::ParseOptions;
use crate::schema::RawReport;
use crate::types::{ReportError, Result, StreamColumn, Table, TableRow};
use chrono::{DateTime, Duration, FixedOffset};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Display offset for all timestamps in the sheet (UTC+9)
const DISPLAY_UTC_OFFSET_SECS: i32 = 9 * 3600;

/// Fixed-width display format; lexicographic order equals chronological order
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse an iperf3 JSON report file into a [`Table`]
///
/// Fails with [`ReportError::MalformedInput`] if the file cannot be read, is
/// not valid JSON, or is missing required fields.
pub fn parse_report(path: &Path, options: &ParseOptions) -> Result<Table> {
    log::info!("Parsing iperf3 report: {:?}", path);

    let file = File::open(path).map_err(|e| {
        ReportError::MalformedInput(format!("failed to open report {:?}: {}", path, e))
    })?;

    let report: RawReport = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        ReportError::MalformedInput(format!("invalid iperf3 JSON in {:?}: {}", path, e))
    })?;

    let table = build_table(report, options)?;
    log::info!(
        "Parsed {} data rows across {} streams from {:?}",
        table.rows.len(),
        table.num_streams(),
        path
    );
    Ok(table)
}

/// Round bits-per-second to the nearest integer, half away from zero
///
/// Matches spreadsheet expectations for non-negative throughput values:
/// `floor(x + 0.5)`. Idempotent on already-integral values.
pub fn round_half_up(bits_per_second: f64) -> u64 {
    (bits_per_second + 0.5).floor() as u64
}

fn build_table(report: RawReport, options: &ParseOptions) -> Result<Table> {
    let timesecs = report
        .start
        .timestamp
        .as_ref()
        .and_then(|t| t.timesecs)
        .ok_or_else(|| {
            ReportError::MalformedInput("missing start.timestamp.timesecs".to_string())
        })?;

    let offset = FixedOffset::east_opt(DISPLAY_UTC_OFFSET_SECS)
        .expect("UTC+9 is within the valid offset range");
    let anchor: DateTime<FixedOffset> = DateTime::from_timestamp(timesecs, 0)
        .ok_or_else(|| {
            ReportError::MalformedInput(format!(
                "start.timestamp.timesecs out of range: {}",
                timesecs
            ))
        })?
        .with_timezone(&offset);

    // Timestamp-keyed samples per interval, plus the union of observed sockets
    let mut sampled: Vec<(String, BTreeMap<u64, u64>)> = Vec::new();
    let mut sockets: BTreeSet<u64> = BTreeSet::new();

    for (index, interval) in report.intervals.iter().enumerate() {
        // An interval with no stream entries contributes no row
        let Some(first) = interval.streams.first() else {
            log::debug!("Interval {} has no streams, skipping", index);
            continue;
        };

        // The first stream's offset stands in for the whole interval; streams
        // within one interval are assumed synchronized
        let elapsed = first
            .start
            .ok_or_else(|| missing_sample_field(index, "start"))? as i64;
        let timestamp = (anchor + Duration::seconds(elapsed))
            .format(TIMESTAMP_FORMAT)
            .to_string();

        if let Some(cutoff) = options.cutoff() {
            if timestamp.as_str() >= cutoff {
                log::debug!(
                    "Cutoff {:?} reached at interval {} ({}), stopping",
                    cutoff,
                    index,
                    timestamp
                );
                break;
            }
        }

        let mut cells: BTreeMap<u64, u64> = BTreeMap::new();
        for sample in &interval.streams {
            let socket = sample
                .socket
                .ok_or_else(|| missing_sample_field(index, "socket"))?;
            let bits_per_second = sample
                .bits_per_second
                .ok_or_else(|| missing_sample_field(index, "bits_per_second"))?;
            if sample.start.is_none() {
                return Err(missing_sample_field(index, "start"));
            }
            cells.insert(socket, round_half_up(bits_per_second));
            sockets.insert(socket);
        }
        sampled.push((timestamp, cells));
    }

    // Bulk re-sort; intervals are usually time-ordered already but the source
    // is not trusted to be
    sampled.sort_by(|a, b| a.0.cmp(&b.0));

    let connections: HashMap<u64, _> = report
        .start
        .connected
        .into_iter()
        .map(|c| (c.socket, c))
        .collect();

    let columns: Vec<StreamColumn> = sockets
        .iter()
        .map(|&socket| StreamColumn {
            socket,
            connection: connections.get(&socket).cloned(),
        })
        .collect();

    let rows = sampled
        .into_iter()
        .map(|(timestamp, cells)| TableRow {
            cells: columns
                .iter()
                .map(|col| cells.get(&col.socket).copied())
                .collect(),
            timestamp,
        })
        .collect();

    Ok(Table { columns, rows })
}

fn missing_sample_field(interval_index: usize, field: &str) -> ReportError {
    ReportError::MalformedInput(format!(
        "interval {}: stream sample missing {:?}",
        interval_index, field
    ))
}
