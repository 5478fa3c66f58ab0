//! Shared domain types.
//!
//! Records are plain values: ingest builds them once, and every later stage
//! only reads them. Product and brand data share the same shapes and differ
//! only through `EntityKind`.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Which period a weekly record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodName {
    Current,
    Previous,
}

impl PeriodName {
    pub fn as_str(self) -> &'static str {
        match self {
            PeriodName::Current => "current",
            PeriodName::Previous => "previous",
        }
    }
}

impl FromStr for PeriodName {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("current") {
            Ok(PeriodName::Current)
        } else if trimmed.eq_ignore_ascii_case("previous") {
            Ok(PeriodName::Previous)
        } else {
            Err(InputError::MalformedPeriod {
                value: s.to_string(),
            })
        }
    }
}

/// Entity descriptor: everything that differs between the product and brand pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityKind {
    Product,
    Brand,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::Product, EntityKind::Brand];

    /// Top-level key in the exported document.
    pub fn group_key(self) -> &'static str {
        match self {
            EntityKind::Product => "PRODUCT",
            EntityKind::Brand => "BRAND",
        }
    }

    pub fn id_field(self) -> &'static str {
        match self {
            EntityKind::Product => "barcode_no",
            EntityKind::Brand => "brand_id",
        }
    }

    pub fn name_field(self) -> &'static str {
        match self {
            EntityKind::Product => "product_name",
            EntityKind::Brand => "brand_name",
        }
    }

    /// Input column names accepted for the display name, in preference order.
    ///
    /// Brand exports label the column `brand`, so both spellings are accepted.
    pub fn name_columns(self) -> &'static [&'static str] {
        match self {
            EntityKind::Product => &["product_name"],
            EntityKind::Brand => &["brand_name", "brand"],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Product => "product",
            EntityKind::Brand => "brand",
        }
    }
}

/// One row of ingested weekly sales data.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyRecord {
    pub period_id: i64,
    pub period_name: PeriodName,
    pub week_commencing_date: NaiveDate,
    pub entity_id: String,
    pub entity_name: String,
    pub gross_sales: f64,
    pub units_sold: u32,
}

/// A current-period week joined with the previous-period week at the same ordinal index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchedWeekPair<'a> {
    pub current: &'a WeeklyRecord,
    pub previous: &'a WeeklyRecord,
}

/// One output row.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthResult {
    pub entity_id: String,
    pub entity_name: String,
    pub current_week_commencing_date: NaiveDate,
    pub previous_week_commencing_date: NaiveDate,
    pub perc_gross_sales_growth: Option<f64>,
    pub perc_unit_sales_growth: Option<f64>,
}

/// Counters gathered while running one entity pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub records_read: usize,
    pub current_records: usize,
    pub previous_records: usize,
    pub entities: usize,
    pub pairs: usize,
    /// Current weeks with no previous-period partner at the same index.
    pub unmatched_current: usize,
    /// Previous weeks with no current-period partner at the same index.
    pub unmatched_previous: usize,
    pub null_gross_growth: usize,
    pub null_unit_growth: usize,
}

/// The assembled report: two independently sorted groups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrowthReport {
    pub products: Vec<GrowthResult>,
    pub brands: Vec<GrowthResult>,
    pub product_stats: PipelineStats,
    pub brand_stats: PipelineStats,
}

impl GrowthReport {
    pub fn results(&self, kind: EntityKind) -> &[GrowthResult] {
        match kind {
            EntityKind::Product => &self.products,
            EntityKind::Brand => &self.brands,
        }
    }

    pub fn stats(&self, kind: EntityKind) -> &PipelineStats {
        match kind {
            EntityKind::Product => &self.product_stats,
            EntityKind::Brand => &self.brand_stats,
        }
    }
}

/// Default rendering for week-commencing dates in the exported document.
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Resolved configuration for one report run.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub product_csv: PathBuf,
    pub brand_csv: PathBuf,
    /// `None` means no file is written (summary-only runs).
    pub output: Option<PathBuf>,
    pub date_format: String,
    pub print_summary: bool,
    pub parallel: bool,
}
