//! Holiday import adapter.
//!
//! Reads a tabular holiday list (one row per holiday, a `Date` column and a
//! `Holiday` column) and drops every row whose date or name is unusable, so the
//! engine only ever sees valid holidays.

use chrono::{NaiveDate, TimeDelta};
use serde_json::Value;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{PlannerError, PlannerResult};
use crate::holiday::Holiday;

const DATE_COLUMNS: [&str; 2] = ["Date", "date"];
const NAME_COLUMNS: [&str; 4] = ["Holiday", "holiday", "Name", "name"];

const STRING_DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

/// Load holidays from a `.csv`, `.json` or (with the `xlsx` feature)
/// `.xlsx`/`.xls`/`.ods` file.
pub fn load_holidays<P: AsRef<Path>>(path: P) -> PlannerResult<Vec<Holiday>> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => load_holidays_from_csv(path),
        "json" => load_holidays_from_json(path),
        #[cfg(feature = "xlsx")]
        "xlsx" | "xls" | "xlsm" | "ods" => load_holidays_from_spreadsheet(path),
        _ => Err(PlannerError::UnsupportedFormat(ext)),
    }
}

pub fn load_holidays_from_csv<P: AsRef<Path>>(path: P) -> PlannerResult<Vec<Holiday>> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = HashMap::new();
        for (idx, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(idx) {
                row.insert(header.clone(), CellValue::Text(value.trim().to_string()));
            }
        }
        rows.push(row);
    }
    parse_holiday_rows(rows)
}

/// Reads a JSON array of `{ "date": "YYYY-MM-DD", "name": "..." }` objects.
/// Each object goes through the same row checks as a spreadsheet row.
pub fn load_holidays_from_json<P: AsRef<Path>>(path: P) -> PlannerResult<Vec<Holiday>> {
    let file = File::open(path)?;
    let objects: Vec<serde_json::Map<String, Value>> = serde_json::from_reader(file)?;
    let rows = objects.into_iter().map(|object| {
        object
            .into_iter()
            .map(|(key, value)| {
                let cell = match value {
                    Value::String(s) => CellValue::Text(s),
                    Value::Number(n) => match n.as_f64() {
                        Some(v) => CellValue::Serial(v),
                        None => CellValue::Text(n.to_string()),
                    },
                    Value::Null => CellValue::Text(String::new()),
                    other => CellValue::Text(other.to_string()),
                };
                (key, cell)
            })
            .collect::<HashMap<_, _>>()
    });
    parse_holiday_rows(rows)
}

#[cfg(feature = "xlsx")]
pub fn load_holidays_from_spreadsheet<P: AsRef<Path>>(path: P) -> PlannerResult<Vec<Holiday>> {
    use calamine::{Reader, open_workbook_auto};

    let mut workbook = open_workbook_auto(path)?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| PlannerError::InvalidData("workbook has no sheets".into()))?;
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows_iter = range.rows();
    let Some(header_row) = rows_iter.next() else {
        return Err(PlannerError::NoHolidays);
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for data_row in rows_iter {
        let mut row = HashMap::new();
        for (idx, cell) in data_row.iter().enumerate() {
            let Some(header) = headers.get(idx) else {
                continue;
            };
            row.insert(header.clone(), cell_from_data(cell));
        }
        rows.push(row);
    }
    parse_holiday_rows(rows)
}

/// Numeric and date cells keep their serial value, everything else is text.
#[cfg(feature = "xlsx")]
pub fn cell_from_data(cell: &calamine::Data) -> CellValue {
    use calamine::Data;

    match cell {
        Data::Float(v) => CellValue::Serial(*v),
        Data::Int(v) => CellValue::Serial(*v as f64),
        Data::DateTime(v) => CellValue::Serial(v.as_f64()),
        Data::Empty => CellValue::Text(String::new()),
        other => CellValue::Text(other.to_string().trim().to_string()),
    }
}

/// A raw cell from a tabular source.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    /// Spreadsheet serial date number.
    Serial(f64),
}

impl CellValue {
    fn as_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Serial(v) => v.to_string(),
        }
    }
}

/// Turn row maps (header -> cell) into holidays. Blank rows are skipped,
/// rows with an unparseable date or blank name are dropped.
pub fn parse_holiday_rows<I>(rows: I) -> PlannerResult<Vec<Holiday>>
where
    I: IntoIterator<Item = HashMap<String, CellValue>>,
{
    let mut holidays = Vec::new();
    for (idx, row) in rows.into_iter().enumerate() {
        // header is line 1
        let line = idx + 2;
        if row.values().all(|v| v.as_text().is_empty()) {
            continue;
        }

        let date = match lookup(&row, &DATE_COLUMNS) {
            Some(cell) => parse_date_cell(cell),
            None => None,
        };
        let Some(date) = date else {
            warn!(line, "dropping row with missing or unparseable date");
            continue;
        };

        let name = lookup(&row, &NAME_COLUMNS)
            .map(CellValue::as_text)
            .unwrap_or_default();
        if name.is_empty() {
            warn!(line, %date, "dropping row with blank holiday name");
            continue;
        }

        holidays.push(Holiday::new(date, name));
    }

    if holidays.is_empty() {
        return Err(PlannerError::NoHolidays);
    }
    info!(count = holidays.len(), "loaded holidays");
    Ok(holidays)
}

fn lookup<'a>(row: &'a HashMap<String, CellValue>, columns: &[&str]) -> Option<&'a CellValue> {
    columns.iter().find_map(|c| row.get(*c))
}

pub fn parse_date_cell(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Serial(v) => from_serial(*v),
        CellValue::Text(s) => parse_date_str(s),
    }
}

/// Parse a date string in one of the accepted layouts, or a bare serial number.
pub fn parse_date_str(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(serial) = input.parse::<f64>() {
        return from_serial(serial);
    }
    STRING_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
}

/// Largest serial a spreadsheet can hold (9999-12-31).
pub const MAX_SERIAL: f64 = 2_958_465.0;

/// Spreadsheet serial date to calendar day. Serial 25569 is 1970-01-01.
pub fn from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(1.0..=MAX_SERIAL).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let days = TimeDelta::try_days(serial.round() as i64)?;
    epoch.checked_add_signed(days)
}
