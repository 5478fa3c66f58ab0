//! Formatted terminal output.
//!
//! Kept apart from assembly so the engine stays free of presentation
//! concerns and output changes stay local.

use crate::domain::{EntityKind, GrowthReport, GrowthResult, PipelineStats, ReportConfig};

/// Format the run summary: inputs, per-kind counters, and both result tables.
pub fn format_run_summary(report: &GrowthReport, config: &ReportConfig) -> String {
    let mut out = String::new();

    out.push_str("=== salesgrowth - Period-over-Period Sales Growth ===\n");
    out.push_str(&format!("Products: {}\n", config.product_csv.display()));
    out.push_str(&format!("Brands:   {}\n", config.brand_csv.display()));
    if let Some(path) = &config.output {
        out.push_str(&format!("Output:   {}\n", path.display()));
    }

    for kind in EntityKind::ALL {
        out.push('\n');
        out.push_str(&format_stats(kind, report.stats(kind)));
        out.push('\n');
        out.push_str(&format_results_table(kind, report.results(kind), &config.date_format));
    }

    out
}

fn format_stats(kind: EntityKind, stats: &PipelineStats) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}:\n", kind.group_key()));
    out.push_str(&format!(
        "- records: {} (current={}, previous={})\n",
        stats.records_read, stats.current_records, stats.previous_records
    ));
    out.push_str(&format!("- entities: {} | rows: {}\n", stats.entities, stats.pairs));
    if stats.unmatched_current > 0 || stats.unmatched_previous > 0 {
        out.push_str(&format!(
            "- unmatched weeks dropped: current={} previous={}\n",
            stats.unmatched_current, stats.unmatched_previous
        ));
    }
    if stats.null_gross_growth > 0 || stats.null_unit_growth > 0 {
        out.push_str(&format!(
            "- undefined growth: gross={} units={}\n",
            stats.null_gross_growth, stats.null_unit_growth
        ));
    }
    out
}

/// Format one group's rows as an aligned table.
///
/// `date_format` must already be validated (see `io::validate_date_format`).
pub fn format_results_table(kind: EntityKind, rows: &[GrowthResult], date_format: &str) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<16} {:<28} {:>10} {:>10} {:>10} {:>10}",
            kind.id_field(),
            kind.name_field(),
            "current",
            "previous",
            "gross_%",
            "units_%"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<16} {:-<28} {:-<10} {:-<10} {:-<10} {:-<10}", "", "", "", "", "", "").trim_end());
    out.push('\n');

    for r in rows {
        out.push_str(
            format!(
                "{:<16} {:<28} {:>10} {:>10} {:>10} {:>10}",
                truncate(&r.entity_id, 16),
                truncate(&r.entity_name, 28),
                r.current_week_commencing_date.format(date_format).to_string(),
                r.previous_week_commencing_date.format(date_format).to_string(),
                fmt_growth(r.perc_gross_sales_growth),
                fmt_growth(r.perc_unit_sales_growth),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn fmt_growth(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.2}"),
        None => "-".to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
