//! Shared report pipeline used by every command.
//!
//! ingest -> split -> pair -> growth -> assemble, once per entity type.
//!
//! The product and brand pipelines share no data, so they may run on
//! separate threads; the result is identical either way.

use crate::domain::{EntityKind, GrowthReport, GrowthResult, PipelineStats, ReportConfig, WeeklyRecord};
use crate::engine::{pair_weeks, split_periods};
use crate::error::{AppError, InputError};
use crate::io::ingest::load_weekly_records;
use crate::report::assemble;

/// Run split, pairing, growth and assembly for one entity type.
pub fn run_entity_pipeline(
    kind: EntityKind,
    records: Vec<WeeklyRecord>,
) -> Result<(Vec<GrowthResult>, PipelineStats), InputError> {
    let records_read = records.len();
    let split = split_periods(kind, records)?;
    let outcome = pair_weeks(&split);
    let results = assemble(&outcome.pairs);

    let stats = PipelineStats {
        records_read,
        current_records: split.current.len(),
        previous_records: split.previous.len(),
        entities: outcome.entities,
        pairs: results.len(),
        unmatched_current: outcome.unmatched_current,
        unmatched_previous: outcome.unmatched_previous,
        null_gross_growth: results.iter().filter(|r| r.perc_gross_sales_growth.is_none()).count(),
        null_unit_growth: results.iter().filter(|r| r.perc_unit_sales_growth.is_none()).count(),
    };

    if stats.unmatched_current > 0 || stats.unmatched_previous > 0 {
        tracing::warn!(
            kind = kind.label(),
            unmatched_current = stats.unmatched_current,
            unmatched_previous = stats.unmatched_previous,
            "weeks without a pairing partner were dropped"
        );
    }
    tracing::info!(
        kind = kind.label(),
        records = stats.records_read,
        entities = stats.entities,
        rows = stats.pairs,
        null_gross = stats.null_gross_growth,
        null_units = stats.null_unit_growth,
        "entity pipeline finished"
    );

    Ok((results, stats))
}

/// Build the full report from already-ingested product and brand records.
pub fn build_report(
    products: Vec<WeeklyRecord>,
    brands: Vec<WeeklyRecord>,
    parallel: bool,
) -> Result<GrowthReport, InputError> {
    let (product_out, brand_out) = if parallel {
        rayon::join(
            || run_entity_pipeline(EntityKind::Product, products),
            || run_entity_pipeline(EntityKind::Brand, brands),
        )
    } else {
        (
            run_entity_pipeline(EntityKind::Product, products),
            run_entity_pipeline(EntityKind::Brand, brands),
        )
    };

    let (products, product_stats) = product_out?;
    let (brands, brand_stats) = brand_out?;

    Ok(GrowthReport {
        products,
        brands,
        product_stats,
        brand_stats,
    })
}

/// Ingest both input files and build the report.
pub fn run_report(config: &ReportConfig) -> Result<GrowthReport, AppError> {
    tracing::info!(
        products = %config.product_csv.display(),
        brands = %config.brand_csv.display(),
        parallel = config.parallel,
        "starting report run"
    );

    let products = load_weekly_records(&config.product_csv, EntityKind::Product)?;
    let brands = load_weekly_records(&config.brand_csv, EntityKind::Brand)?;

    Ok(build_report(products, brands, config.parallel)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PeriodName;
    use crate::engine::split::tests::record;
    use crate::report::is_report_ordered;

    fn weeks(period: PeriodName, id: &str, name: &str, values: &[(f64, u32)]) -> Vec<WeeklyRecord> {
        let (year, day) = match period {
            PeriodName::Current => (2022, 4),
            PeriodName::Previous => (2021, 5),
        };
        values
            .iter()
            .enumerate()
            .map(|(i, &(gross, units))| {
                let mut r = record(period, (year, 7, day), id, name, gross, units);
                r.week_commencing_date += chrono::Duration::weeks(i as i64);
                r
            })
            .collect()
    }

    fn sample() -> (Vec<WeeklyRecord>, Vec<WeeklyRecord>) {
        let mut products = weeks(PeriodName::Current, "P2", "Zest", &[(5.0, 1), (6.0, 2), (7.0, 3), (8.0, 4), (9.0, 5)]);
        products.extend(weeks(PeriodName::Previous, "P2", "Zest", &[(5.0, 1), (0.0, 0), (0.0, 2)]));
        products.extend(weeks(PeriodName::Current, "P1", "Apple", &[(183.08, 29)]));
        products.extend(weeks(PeriodName::Previous, "P1", "Apple", &[(152.66, 19)]));

        let mut brands = weeks(PeriodName::Current, "9", "Zest", &[(10.0, 10)]);
        brands.extend(weeks(PeriodName::Previous, "9", "Zest", &[(5.0, 5)]));
        brands.extend(weeks(PeriodName::Current, "3", "Beta", &[(1.0, 1)]));
        brands.extend(weeks(PeriodName::Previous, "3", "Beta", &[(1.0, 1)]));
        (products, brands)
    }

    #[test]
    fn unmatched_tail_produces_three_rows() {
        let (products, _) = sample();
        let (rows, stats) = run_entity_pipeline(EntityKind::Product, products).unwrap();
        let zest: Vec<_> = rows.iter().filter(|r| r.entity_id == "P2").collect();
        assert_eq!(zest.len(), 3);
        assert_eq!(stats.unmatched_current, 2);
        assert_eq!(stats.pairs, 4);
        assert_eq!(stats.records_read, 10);

        // Week 2: 0 -> 6 gross is undefined, 0 -> 2 units is undefined.
        assert_eq!(zest[1].perc_gross_sales_growth, None);
        // Week 3: 0 -> 7 gross undefined, 2 -> 3 units is +50%.
        assert_eq!(zest[2].perc_unit_sales_growth, Some(50.0));
        assert_eq!(stats.null_gross_growth, 2);
        assert_eq!(stats.null_unit_growth, 1);
    }

    #[test]
    fn groups_are_sorted_independently() {
        let (products, brands) = sample();
        let report = build_report(products, brands, false).unwrap();

        assert_eq!(report.products[0].entity_name, "Apple");
        assert_eq!(report.brands[0].entity_name, "Beta");
        assert_eq!(report.brands[1].entity_name, "Zest");
        assert!(is_report_ordered(&report.products));
        assert!(is_report_ordered(&report.brands));
    }

    #[test]
    fn parallel_and_sequential_runs_agree() {
        let (products, brands) = sample();
        let sequential = build_report(products.clone(), brands.clone(), false).unwrap();
        let parallel = build_report(products, brands, true).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn malformed_group_aborts_whole_report() {
        let (products, mut brands) = sample();
        let dup = brands[0].clone();
        brands.push(dup);
        let err = build_report(products, brands, true).unwrap_err();
        assert!(matches!(err, InputError::DuplicateWeek { kind: "brand", .. }));
    }
}
