//! CSV ingest and type coercion.
//!
//! Turns a weekly sales export into typed `WeeklyRecord`s.
//!
//! Design goals:
//! - **Strict schema**: every required column must exist (exit code 2)
//! - **Row-level validation**: every bad row is reported with its line number,
//!   and any bad row aborts the run (exit code 3)
//! - **No engine logic here**: pairing and growth live in `engine`

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::{EntityKind, PeriodName, WeeklyRecord};
use crate::error::InputError;

/// Row errors listed in full before the remainder is summarized as a count.
const MAX_REPORTED_ROW_ERRORS: usize = 20;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Resolved column positions for one input file.
struct Columns {
    period_id: usize,
    period_name: usize,
    week_commencing_date: usize,
    entity_id: usize,
    entity_name: usize,
    gross_sales: usize,
    units_sold: usize,
}

/// Load and coerce one entity type's CSV file.
pub fn load_weekly_records(path: &Path, kind: EntityKind) -> Result<Vec<WeeklyRecord>, InputError> {
    let file = File::open(path).map_err(|e| InputError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let records = read_weekly_records(file, path, kind)?;
    tracing::info!(
        kind = kind.label(),
        path = %path.display(),
        records = records.len(),
        "loaded weekly records"
    );
    Ok(records)
}

/// Parse weekly records from any reader. `source` is only used in error messages.
pub fn read_weekly_records<R: Read>(reader: R, source: &Path, kind: EntityKind) -> Result<Vec<WeeklyRecord>, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| InputError::Io {
            path: source.to_path_buf(),
            message: format!("failed to read CSV headers: {e}"),
        })?
        .clone();

    let header_map = build_header_map(&headers);
    let columns = resolve_columns(&header_map, source, kind)?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header and CSV lines are 1-based.
        let line = idx + 2;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        if record.iter().all(str::is_empty) {
            continue;
        }

        match parse_row(&record, &columns) {
            Ok(row) => records.push(row),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    if !row_errors.is_empty() {
        for e in &row_errors {
            tracing::debug!(line = e.line, error = %e.message, "rejected row");
        }
        return Err(InputError::MalformedInput {
            path: source.to_path_buf(),
            details: summarize_row_errors(&row_errors),
        });
    }

    Ok(records)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports may prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn resolve_columns(header_map: &HashMap<String, usize>, source: &Path, kind: EntityKind) -> Result<Columns, InputError> {
    let require = |name: &str| {
        header_map.get(name).copied().ok_or_else(|| InputError::MissingColumn {
            path: source.to_path_buf(),
            column: name.to_string(),
        })
    };

    let entity_name = kind
        .name_columns()
        .iter()
        .find_map(|name| header_map.get(*name).copied())
        .ok_or_else(|| InputError::MissingColumn {
            path: source.to_path_buf(),
            column: kind.name_columns().join("` or `"),
        })?;

    Ok(Columns {
        period_id: require("period_id")?,
        period_name: require("period_name")?,
        week_commencing_date: require("week_commencing_date")?,
        entity_id: require(kind.id_field())?,
        entity_name,
        gross_sales: require("gross_sales")?,
        units_sold: require("units_sold")?,
    })
}

fn parse_row(record: &StringRecord, columns: &Columns) -> Result<WeeklyRecord, String> {
    let period_id_raw = get_required(record, columns.period_id, "period_id")?;
    let period_id = period_id_raw
        .parse::<i64>()
        .map_err(|_| format!("Invalid `period_id` '{period_id_raw}' (expected an integer)."))?;

    let period_name = get_required(record, columns.period_name, "period_name")?
        .parse::<PeriodName>()
        .map_err(|e| e.to_string())?;

    let week_commencing_date = parse_date(get_required(record, columns.week_commencing_date, "week_commencing_date")?)?;
    let entity_id = get_required(record, columns.entity_id, "entity id")?.to_string();
    let entity_name = get_required(record, columns.entity_name, "entity name")?.to_string();
    let gross_sales = parse_gross_sales(get_required(record, columns.gross_sales, "gross_sales")?)?;
    let units_sold = parse_units(get_required(record, columns.units_sold, "units_sold")?)?;

    Ok(WeeklyRecord {
        period_id,
        period_name,
        week_commencing_date,
        entity_id,
        entity_name,
        gross_sales,
        units_sold,
    })
}

fn get_required<'a>(record: &'a StringRecord, idx: usize, name: &str) -> Result<&'a str, String> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

/// Parse a week-commencing date.
///
/// Sales exports write day-first dates (`DD/MM/YYYY`); ISO dates are also
/// accepted. The accepted formats cannot be confused with one another.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    const FMTS: [&str; 4] = ["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%Y/%m/%d"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: DD/MM/YYYY, YYYY-MM-DD, DD-MM-YYYY, YYYY/MM/DD."
    ))
}

fn parse_gross_sales(s: &str) -> Result<f64, String> {
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid `gross_sales` '{s}' (expected a number)."))?;
    if !v.is_finite() || v < 0.0 {
        return Err(format!("Invalid `gross_sales` '{s}' (must be finite and >= 0)."));
    }
    Ok(v)
}

fn parse_units(s: &str) -> Result<u32, String> {
    if let Ok(v) = s.parse::<u32>() {
        return Ok(v);
    }
    // Spreadsheet tools sometimes write whole numbers as `12.0`.
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= f64::from(u32::MAX) => Ok(v as u32),
        _ => Err(format!("Invalid `units_sold` '{s}' (expected a whole number >= 0).")),
    }
}

fn summarize_row_errors(errors: &[RowError]) -> String {
    let mut lines: Vec<String> = errors
        .iter()
        .take(MAX_REPORTED_ROW_ERRORS)
        .map(|e| format!("  line {}: {}", e.line, e.message))
        .collect();
    if errors.len() > MAX_REPORTED_ROW_ERRORS {
        lines.push(format!("  ... and {} more", errors.len() - MAX_REPORTED_ROW_ERRORS));
    }
    lines.join("\n")
}
