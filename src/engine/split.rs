//! Period splitter.
//!
//! Partitions one entity type's rows into the current and previous periods,
//! each stably sorted by week-commencing date, and rejects inputs that would
//! make ordinal pairing ambiguous.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::domain::{EntityKind, PeriodName, WeeklyRecord};
use crate::error::InputError;

/// Rows of one entity type, partitioned by period.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodSplit {
    pub current: Vec<WeeklyRecord>,
    pub previous: Vec<WeeklyRecord>,
}

/// Partition `records` into current and previous periods.
///
/// Input order is kept within each partition except where a stable sort by
/// `week_commencing_date` is needed to put weeks in ascending order.
pub fn split_periods(kind: EntityKind, records: Vec<WeeklyRecord>) -> Result<PeriodSplit, InputError> {
    let mut current = Vec::new();
    let mut previous = Vec::new();
    let mut current_id: Option<i64> = None;
    let mut previous_id: Option<i64> = None;

    for record in records {
        let (bucket, seen_id) = match record.period_name {
            PeriodName::Current => (&mut current, &mut current_id),
            PeriodName::Previous => (&mut previous, &mut previous_id),
        };

        match *seen_id {
            None => *seen_id = Some(record.period_id),
            Some(id) if id != record.period_id => {
                return Err(InputError::InconsistentPeriodId {
                    kind: kind.label(),
                    detail: format!(
                        "period `{}` uses both period_id {id} and {}.",
                        record.period_name.as_str(),
                        record.period_id
                    ),
                });
            }
            Some(_) => {}
        }

        bucket.push(record);
    }

    if let (Some(cur), Some(prev)) = (current_id, previous_id) {
        if cur == prev {
            return Err(InputError::InconsistentPeriodId {
                kind: kind.label(),
                detail: format!("`current` and `previous` share period_id {cur}."),
            });
        }
    }

    current.sort_by_key(|r| r.week_commencing_date);
    previous.sort_by_key(|r| r.week_commencing_date);

    ensure_unique_weeks(kind, PeriodName::Current, &current)?;
    ensure_unique_weeks(kind, PeriodName::Previous, &previous)?;

    Ok(PeriodSplit { current, previous })
}

fn ensure_unique_weeks(kind: EntityKind, period: PeriodName, records: &[WeeklyRecord]) -> Result<(), InputError> {
    let mut seen: HashSet<(&str, NaiveDate)> = HashSet::with_capacity(records.len());
    for r in records {
        if !seen.insert((r.entity_id.as_str(), r.week_commencing_date)) {
            return Err(InputError::DuplicateWeek {
                kind: kind.label(),
                period: period.as_str(),
                entity_id: r.entity_id.clone(),
                date: r.week_commencing_date,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(period: PeriodName, date: (i32, u32, u32), id: &str, name: &str, gross: f64, units: u32) -> WeeklyRecord {
        WeeklyRecord {
            period_id: match period {
                PeriodName::Current => 2,
                PeriodName::Previous => 1,
            },
            period_name: period,
            week_commencing_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            entity_id: id.to_string(),
            entity_name: name.to_string(),
            gross_sales: gross,
            units_sold: units,
        }
    }

    #[test]
    fn partitions_and_sorts_each_period() {
        let records = vec![
            record(PeriodName::Current, (2022, 7, 11), "A", "Apple", 2.0, 2),
            record(PeriodName::Previous, (2021, 7, 5), "A", "Apple", 1.0, 1),
            record(PeriodName::Current, (2022, 7, 4), "A", "Apple", 1.0, 1),
            record(PeriodName::Current, (2022, 7, 4), "B", "Banana", 3.0, 3),
        ];

        let split = split_periods(EntityKind::Product, records).unwrap();
        assert_eq!(split.previous.len(), 1);
        let dates: Vec<_> = split.current.iter().map(|r| (r.entity_id.as_str(), r.week_commencing_date.to_string())).collect();
        assert_eq!(
            dates,
            vec![("A", "2022-07-04".to_string()), ("B", "2022-07-04".to_string()), ("A", "2022-07-11".to_string())]
        );
    }

    #[test]
    fn duplicate_week_is_rejected() {
        let records = vec![
            record(PeriodName::Previous, (2021, 7, 5), "A", "Apple", 1.0, 1),
            record(PeriodName::Previous, (2021, 7, 5), "A", "Apple", 2.0, 1),
        ];
        let err = split_periods(EntityKind::Brand, records).unwrap_err();
        assert!(matches!(err, InputError::DuplicateWeek { period: "previous", .. }));
    }

    #[test]
    fn same_date_for_different_entities_is_fine() {
        let records = vec![
            record(PeriodName::Current, (2022, 7, 4), "A", "Apple", 1.0, 1),
            record(PeriodName::Current, (2022, 7, 4), "B", "Banana", 1.0, 1),
        ];
        assert!(split_periods(EntityKind::Product, records).is_ok());
    }

    #[test]
    fn mixed_period_ids_are_rejected() {
        let mut odd = record(PeriodName::Current, (2022, 7, 11), "A", "Apple", 1.0, 1);
        odd.period_id = 7;
        let records = vec![record(PeriodName::Current, (2022, 7, 4), "A", "Apple", 1.0, 1), odd];
        let err = split_periods(EntityKind::Product, records).unwrap_err();
        assert!(matches!(err, InputError::InconsistentPeriodId { .. }));
    }

    #[test]
    fn shared_period_id_is_rejected() {
        let mut prev = record(PeriodName::Previous, (2021, 7, 5), "A", "Apple", 1.0, 1);
        prev.period_id = 2;
        let records = vec![record(PeriodName::Current, (2022, 7, 4), "A", "Apple", 1.0, 1), prev];
        let err = split_periods(EntityKind::Product, records).unwrap_err();
        assert!(matches!(err, InputError::InconsistentPeriodId { .. }));
    }
}
