//! Export the assembled report as the dashboard JSON document.
//!
//! Layout:
//!
//! ```text
//! { "PRODUCT": [ { "barcode_no", "product_name", dates..., growth... } ],
//!   "BRAND":   [ { "brand_id",   "brand_name",   dates..., growth... } ] }
//! ```
//!
//! Undefined growth is written as `null`. The document is serialized fully
//! in memory, written to a temporary sibling, and renamed into place.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use serde::Serialize;
use serde::ser::{Error as _, SerializeMap, SerializeSeq};

use crate::domain::{EntityKind, GrowthReport, GrowthResult};
use crate::error::AppError;

/// Reject strftime patterns chrono cannot render.
pub fn validate_date_format(format: &str) -> Result<(), AppError> {
    if format.trim().is_empty() {
        return Err(AppError::new(2, "Date format must not be empty."));
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(AppError::new(2, format!("Invalid date format '{format}'.")));
    }
    Ok(())
}

/// Serializable view of a report with a fixed date rendering.
pub struct ReportDocument<'a> {
    report: &'a GrowthReport,
    date_format: &'a str,
}

impl<'a> ReportDocument<'a> {
    pub fn new(report: &'a GrowthReport, date_format: &'a str) -> Self {
        Self { report, date_format }
    }
}

impl Serialize for ReportDocument<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(EntityKind::ALL.len()))?;
        for kind in EntityKind::ALL {
            map.serialize_entry(
                kind.group_key(),
                &GroupRows {
                    kind,
                    rows: self.report.results(kind),
                    date_format: self.date_format,
                },
            )?;
        }
        map.end()
    }
}

struct GroupRows<'a> {
    kind: EntityKind,
    rows: &'a [GrowthResult],
    date_format: &'a str,
}

impl Serialize for GroupRows<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in self.rows {
            seq.serialize_element(&RowView {
                kind: self.kind,
                row,
                date_format: self.date_format,
            })?;
        }
        seq.end()
    }
}

struct RowView<'a> {
    kind: EntityKind,
    row: &'a GrowthResult,
    date_format: &'a str,
}

impl Serialize for RowView<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let current = format_date(self.row.current_week_commencing_date, self.date_format).map_err(S::Error::custom)?;
        let previous = format_date(self.row.previous_week_commencing_date, self.date_format).map_err(S::Error::custom)?;

        let mut map = serializer.serialize_map(Some(6))?;
        map.serialize_entry(self.kind.id_field(), &self.row.entity_id)?;
        map.serialize_entry(self.kind.name_field(), &self.row.entity_name)?;
        map.serialize_entry("current_week_commencing_date", &current)?;
        map.serialize_entry("previous_week_commencing_date", &previous)?;
        map.serialize_entry("perc_gross_sales_growth", &finite(self.row.perc_gross_sales_growth))?;
        map.serialize_entry("perc_unit_sales_growth", &finite(self.row.perc_unit_sales_growth))?;
        map.end()
    }
}

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}

fn format_date(date: NaiveDate, format: &str) -> Result<String, String> {
    let mut out = String::new();
    write!(out, "{}", date.format(format)).map_err(|_| format!("cannot render date with format '{format}'"))?;
    Ok(out)
}

/// Serialize the report to pretty-printed JSON bytes.
pub fn render_report_json(report: &GrowthReport, date_format: &str) -> Result<Vec<u8>, AppError> {
    let mut bytes = serde_json::to_vec_pretty(&ReportDocument::new(report, date_format))
        .map_err(|e| AppError::new(4, format!("Failed to serialize report JSON: {e}")))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Write the report JSON to `path`, replacing any existing file.
pub fn write_report_json(path: &Path, report: &GrowthReport, date_format: &str) -> Result<(), AppError> {
    let bytes = render_report_json(report, date_format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::new(4, format!("Failed to create output directory '{}': {e}", parent.display())))?;
    }

    let tmp = temp_sibling(path);
    fs::write(&tmp, &bytes)
        .map_err(|e| AppError::new(4, format!("Failed to write report JSON '{}': {e}", tmp.display())))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(AppError::new(
            4,
            format!("Failed to move report JSON into '{}': {e}", path.display()),
        ));
    }

    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote report JSON");
    Ok(())
}

/// Read a previously exported report document.
pub fn read_report_json(path: &Path) -> Result<serde_json::Value, AppError> {
    let file = fs::File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open report JSON '{}': {e}", path.display())))?;
    let value: serde_json::Value =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid report JSON: {e}")))?;
    if !(value.get("PRODUCT").is_some_and(|v| v.is_array()) && value.get("BRAND").is_some_and(|v| v.is_array())) {
        return Err(AppError::new(2, "Report JSON must contain `PRODUCT` and `BRAND` arrays."));
    }
    Ok(value)
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
