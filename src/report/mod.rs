//! Result assembly and terminal reporting.
//!
//! `assemble` turns matched pairs into output rows ordered by
//! `(entity_name, current_week_commencing_date)`; `format` renders a run
//! for the terminal.

use crate::domain::{GrowthResult, MatchedWeekPair};
use crate::engine::growth::growth;

pub mod format;

pub use format::*;

/// Build output rows for one entity type and sort them.
///
/// The sort is stable: rows equal on name and date keep their pairing order.
pub fn assemble(pairs: &[MatchedWeekPair<'_>]) -> Vec<GrowthResult> {
    let mut rows: Vec<GrowthResult> = pairs
        .iter()
        .map(|pair| {
            let (gross, units) = growth(pair);
            GrowthResult {
                entity_id: pair.current.entity_id.clone(),
                entity_name: pair.current.entity_name.clone(),
                current_week_commencing_date: pair.current.week_commencing_date,
                previous_week_commencing_date: pair.previous.week_commencing_date,
                perc_gross_sales_growth: gross,
                perc_unit_sales_growth: units,
            }
        })
        .collect();

    sort_results(&mut rows);
    rows
}

/// Stable sort by entity name, then current week.
pub fn sort_results(rows: &mut [GrowthResult]) {
    rows.sort_by(|a, b| {
        a.entity_name
            .cmp(&b.entity_name)
            .then(a.current_week_commencing_date.cmp(&b.current_week_commencing_date))
    });
}

/// True when `rows` satisfies the output ordering.
pub fn is_report_ordered(rows: &[GrowthResult]) -> bool {
    rows.windows(2).all(|w| {
        let (a, b) = (&w[0], &w[1]);
        a.entity_name < b.entity_name
            || (a.entity_name == b.entity_name
                && a.current_week_commencing_date <= b.current_week_commencing_date)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntityKind, PeriodName, WeeklyRecord};
    use crate::engine::split::tests::record;
    use crate::engine::{pair_weeks, split_periods};

    fn pairs_for(records: Vec<WeeklyRecord>) -> Vec<GrowthResult> {
        let split = split_periods(EntityKind::Product, records).unwrap();
        let outcome = pair_weeks(&split);
        assemble(&outcome.pairs)
    }

    #[test]
    fn rows_are_sorted_by_name_then_week() {
        let rows = pairs_for(vec![
            record(PeriodName::Current, (2022, 7, 11), "Z1", "Zucchini", 2.0, 2),
            record(PeriodName::Current, (2022, 7, 4), "Z1", "Zucchini", 1.0, 1),
            record(PeriodName::Current, (2022, 7, 4), "A1", "Apple", 1.0, 1),
            record(PeriodName::Previous, (2021, 7, 5), "Z1", "Zucchini", 1.0, 1),
            record(PeriodName::Previous, (2021, 7, 12), "Z1", "Zucchini", 1.0, 1),
            record(PeriodName::Previous, (2021, 7, 5), "A1", "Apple", 2.0, 2),
        ]);

        let keys: Vec<_> = rows
            .iter()
            .map(|r| (r.entity_name.as_str(), r.current_week_commencing_date.to_string()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("Apple", "2022-07-04".to_string()),
                ("Zucchini", "2022-07-04".to_string()),
                ("Zucchini", "2022-07-11".to_string()),
            ]
        );
        assert!(is_report_ordered(&rows));
    }

    #[test]
    fn carries_identity_and_both_dates() {
        let rows = pairs_for(vec![
            record(PeriodName::Current, (2022, 7, 4), "5000112637922", "Cola 2L", 183.08, 29),
            record(PeriodName::Previous, (2021, 7, 5), "5000112637922", "Cola 2L", 152.66, 19),
        ]);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.entity_id, "5000112637922");
        assert_eq!(row.entity_name, "Cola 2L");
        assert_eq!(row.current_week_commencing_date.to_string(), "2022-07-04");
        assert_eq!(row.previous_week_commencing_date.to_string(), "2021-07-05");
        assert_eq!(row.perc_gross_sales_growth, Some(19.93));
        assert_eq!(row.perc_unit_sales_growth, Some(52.63));
    }

    #[test]
    fn equal_keys_keep_input_order() {
        // Two entities share a display name and a week; pairing order decides.
        let rows = pairs_for(vec![
            record(PeriodName::Current, (2022, 7, 4), "B", "Same", 1.0, 1),
            record(PeriodName::Current, (2022, 7, 4), "A", "Same", 1.0, 1),
            record(PeriodName::Previous, (2021, 7, 5), "A", "Same", 1.0, 1),
            record(PeriodName::Previous, (2021, 7, 5), "B", "Same", 1.0, 1),
        ]);
        let ids: Vec<_> = rows.iter().map(|r| r.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
    }
}
