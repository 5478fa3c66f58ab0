//! Pairing engine.
//!
//! Week `i` of an entity's current period is paired with week `i` of the same
//! entity's previous period. Calendar dates are not compared: the periods are
//! aligned by position, so 04/07/2022 pairs with 05/07/2021 when both are the
//! first week of their period. Weeks beyond the shorter side have no partner
//! and produce no pair.

use std::collections::{HashMap, HashSet};

use crate::domain::{MatchedWeekPair, WeeklyRecord};
use crate::engine::split::PeriodSplit;

/// Pairs plus counts of what could not be paired.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairingOutcome<'a> {
    pub pairs: Vec<MatchedWeekPair<'a>>,
    /// Distinct entities in the current period.
    pub entities: usize,
    pub unmatched_current: usize,
    pub unmatched_previous: usize,
}

/// Group records by entity id, keeping entities in order of first appearance.
fn group_by_entity(records: &[WeeklyRecord]) -> Vec<(&str, Vec<&WeeklyRecord>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&WeeklyRecord>)> = Vec::new();
    for r in records {
        let id = r.entity_id.as_str();
        let slot = *index.entry(id).or_insert_with(|| {
            groups.push((id, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(r);
    }
    groups
}

/// Pair every current week with the previous week at the same ordinal index.
pub fn pair_weeks(split: &PeriodSplit) -> PairingOutcome<'_> {
    let current = group_by_entity(&split.current);
    let previous = group_by_entity(&split.previous);
    let previous_by_id: HashMap<&str, &Vec<&WeeklyRecord>> =
        previous.iter().map(|(id, weeks)| (*id, weeks)).collect();

    let mut outcome = PairingOutcome {
        entities: current.len(),
        ..PairingOutcome::default()
    };

    for (entity_id, current_weeks) in &current {
        let previous_weeks = previous_by_id.get(entity_id).map(|w| w.as_slice()).unwrap_or(&[]);
        let n = current_weeks.len().min(previous_weeks.len());

        for (cur, prev) in current_weeks.iter().copied().zip(previous_weeks.iter().copied()) {
            outcome.pairs.push(MatchedWeekPair {
                current: cur,
                previous: prev,
            });
        }

        let dropped_current = current_weeks.len() - n;
        let dropped_previous = previous_weeks.len() - n;
        outcome.unmatched_current += dropped_current;
        outcome.unmatched_previous += dropped_previous;

        tracing::debug!(
            entity_id = %entity_id,
            current_weeks = current_weeks.len(),
            previous_weeks = previous_weeks.len(),
            paired = n,
            "paired entity weeks"
        );
    }

    // Entities that only exist in the previous period have nothing to pair with.
    let current_ids: HashSet<&str> = current.iter().map(|(id, _)| *id).collect();
    for (entity_id, weeks) in &previous {
        if !current_ids.contains(entity_id) {
            outcome.unmatched_previous += weeks.len();
            tracing::debug!(entity_id = %entity_id, previous_weeks = weeks.len(), "entity has no current-period weeks");
        }
    }

    outcome
}
