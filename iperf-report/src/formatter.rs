//! Workbook formatter
//!
//! Renders a [`Table`] into a single-sheet xlsx workbook with the fixed
//! layout: a double-underlined header row, a unit row, four connection
//! metadata rows, then one row per timestamp. Column A holds the row labels
//! and stays visible together with the six header rows when scrolling.

use crate::types::{ReportError, Result, Table};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, XlsxError};
use std::path::Path;

const SHEET_NAME: &str = "iperf";

/// Wide enough for a full `%Y-%m-%d %H:%M:%S` timestamp
const TIME_COLUMN_WIDTH: f64 = 21.0;
const STREAM_COLUMN_WIDTH: f64 = 16.0;

/// Freeze anchor at the first data cell (B7): six header rows + label column
const FROZEN_ROWS: u32 = 6;
const FROZEN_COLS: u16 = 1;

/// Write a [`Table`] as a styled xlsx workbook at `path`
///
/// Overwrites any existing file. Fails with [`ReportError::Write`] if the
/// path is not writable.
pub fn write_workbook(table: &Table, path: &Path) -> Result<()> {
    log::info!(
        "Writing workbook with {} streams and {} data rows: {:?}",
        table.num_streams(),
        table.rows.len(),
        path
    );

    let mut workbook = build_workbook(table).map_err(|e| write_error(path, &e))?;
    workbook.save(path).map_err(|e| write_error(path, &e))?;

    log::debug!("Workbook written: {:?}", path);
    Ok(())
}

fn write_error(path: &Path, cause: &XlsxError) -> ReportError {
    ReportError::Write {
        path: path.to_path_buf(),
        cause: cause.to_string(),
    }
}

fn build_workbook(table: &Table) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let center = Format::new()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let header = center.clone().set_border_bottom(FormatBorder::Double);

    // Row 1: time axis label and stream headers, double bottom border
    worksheet.write_with_format(0, 0, "Times(UTC+9)", &header)?;
    for (i, column) in table.columns.iter().enumerate() {
        worksheet.write_with_format(0, (i + 1) as u16, column.label(), &header)?;
    }

    // Row 2: unit row
    worksheet.write_with_format(1, 0, "Throughput", &center)?;
    for i in 0..table.columns.len() {
        worksheet.write_with_format(1, (i + 1) as u16, "(bit/s)", &center)?;
    }

    // Rows 3-6: connection metadata in fixed attribute order
    let mut row: u32 = 2;
    for (label, values) in table.metadata_rows() {
        worksheet.write_with_format(row, 0, label, &center)?;
        for (i, value) in values.iter().enumerate() {
            worksheet.write_with_format(row, (i + 1) as u16, value.as_str(), &center)?;
        }
        row += 1;
    }

    // Rows 7+: one row per timestamp
    for data_row in &table.rows {
        worksheet.write_with_format(row, 0, data_row.timestamp.as_str(), &center)?;
        for (i, cell) in data_row.cells.iter().enumerate() {
            let col = (i + 1) as u16;
            match cell {
                Some(value) => {
                    worksheet.write_with_format(row, col, *value as f64, &center)?;
                }
                // Sparse cells stay blank but keep the centered format
                None => {
                    worksheet.write_blank(row, col, &center)?;
                }
            }
        }
        row += 1;
    }

    worksheet.set_column_width(0, TIME_COLUMN_WIDTH)?;
    for i in 0..table.columns.len() {
        worksheet.set_column_width((i + 1) as u16, STREAM_COLUMN_WIDTH)?;
    }

    worksheet.set_freeze_panes(FROZEN_ROWS, FROZEN_COLS)?;

    Ok(workbook)
}
