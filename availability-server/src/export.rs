//! Tabular export of ranked records.
//!
//! Supports xlsx workbooks and CSV. Both carry one header row followed by
//! one row per record, in the order given.

use rust_xlsxwriter::Workbook;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{NormalizedRecord, StationCode};

/// Column headers, in export order. The spellings, `Availablity` included,
/// are part of the download format.
pub const COLUMNS: [&str; 15] = [
    "Train Name",
    "Train Code",
    "Source Code",
    "Destination Code",
    "Date of Journey",
    "ArrivalTime",
    "DepartureTime",
    "Last Updated",
    "Availablity",
    "Full Avail Status",
    "predictionPercentage",
    "Class Name",
    "Base Fare",
    "Quota",
    "RunningDays",
];

/// Errors while serializing records.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// A row's width differs from the header's
    #[error("row {row} has {found} fields, expected {expected}")]
    InconsistentRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("too many rows for a worksheet: {0}")]
    TooManyRows(usize),
}

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Excel workbook (`.xlsx`)
    #[default]
    #[serde(alias = "xlsx", alias = "excel")]
    Spreadsheet,

    /// Comma-separated values (`.csv`)
    #[serde(alias = "csv", alias = "delimited-text")]
    DelimitedText,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Spreadsheet => "xlsx",
            ExportFormat::DelimitedText => "csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Spreadsheet => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::DelimitedText => "text/csv",
        }
    }
}

/// One exported value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    /// The value as it appears in CSV.
    pub fn render(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

/// The cells of one record, in [`COLUMNS`] order.
pub fn record_cells(record: &NormalizedRecord) -> Vec<Cell> {
    vec![
        Cell::Text(record.train_name.clone()),
        Cell::Text(record.train_number.clone()),
        Cell::Text(record.source_code.clone()),
        Cell::Text(record.destination_code.clone()),
        Cell::Text(record.journey_date.clone()),
        Cell::Text(record.arrival_time.clone()),
        Cell::Text(record.departure_time.clone()),
        Cell::Text(record.last_updated.clone()),
        Cell::Text(record.availability.clone()),
        record
            .status_code
            .clone()
            .map_or(Cell::Empty, Cell::Text),
        Cell::Text(record.prediction.to_string()),
        Cell::Text(record.class_name.clone()),
        record.base_fare.map_or(Cell::Empty, Cell::Number),
        Cell::Text(record.quota.clone()),
        Cell::Text(record.running_days.to_string()),
    ]
}

/// Serialize records in the requested format.
pub fn export_records(
    records: &[NormalizedRecord],
    format: ExportFormat,
) -> Result<Vec<u8>, ExportError> {
    let rows: Vec<Vec<Cell>> = records.iter().map(record_cells).collect();
    export_rows(&COLUMNS, &rows, format)
}

/// Serialize arbitrary rows under `header`, rejecting ragged rows.
pub fn export_rows(
    header: &[&str],
    rows: &[Vec<Cell>],
    format: ExportFormat,
) -> Result<Vec<u8>, ExportError> {
    for (i, row) in rows.iter().enumerate() {
        if row.len() != header.len() {
            return Err(ExportError::InconsistentRow {
                row: i + 1,
                expected: header.len(),
                found: row.len(),
            });
        }
    }

    let bytes = match format {
        ExportFormat::Spreadsheet => write_xlsx(header, rows)?,
        ExportFormat::DelimitedText => write_csv(header, rows)?,
    };

    debug!(rows = rows.len(), bytes = bytes.len(), ?format, "exported records");
    Ok(bytes)
}

fn write_csv(header: &[&str], rows: &[Vec<Cell>]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row.iter().map(Cell::render))?;
    }
    writer.flush()?;

    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

fn write_xlsx(header: &[&str], rows: &[Vec<Cell>]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in header.iter().enumerate() {
        worksheet.write_string(0, col as u16, *name)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let row_num = u32::try_from(i + 1).map_err(|_| ExportError::TooManyRows(rows.len()))?;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(s) => {
                    worksheet.write_string(row_num, col, s.as_str())?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(row_num, col, *n)?;
                }
                Cell::Empty => {}
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Download name, e.g. `BCT_MMCT_to_NDLS_search.csv`.
pub fn export_file_name(
    sources: &[StationCode],
    destinations: &[StationCode],
    format: ExportFormat,
) -> String {
    let join = |codes: &[StationCode]| {
        codes
            .iter()
            .map(StationCode::as_str)
            .collect::<Vec<_>>()
            .join("_")
    };

    format!(
        "{}_to_{}_search.{}",
        join(sources),
        join(destinations),
        format.extension()
    )
}
