//! Availability ranking for planner results.
//!
//! Orders records by how easy the seat is to book: confirmed availability
//! first, then RAC, then waitlisted seats by falling confirmation chance.

use std::cmp::Ordering;

use crate::domain::NormalizedRecord;

use super::config::RankPolicy;

/// Sort key for one record.
///
/// `secondary` is 0 for rule-matched tiers. In the fallback tier it is the
/// negated prediction, or +∞ when the prediction is unknown.
#[derive(Debug, Clone, Copy)]
pub struct SortKey {
    pub bucket: u8,
    pub secondary: f64,
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bucket
            .cmp(&other.bucket)
            .then_with(|| self.secondary.total_cmp(&other.secondary))
    }
}

/// Compute the sort key of a record.
///
/// A status matching no rule, blank included, lands in the fallback bucket.
pub fn sort_key(record: &NormalizedRecord, policy: &RankPolicy) -> SortKey {
    match policy.matching_bucket(&record.availability) {
        Some(bucket) => SortKey {
            bucket,
            secondary: 0.0,
        },
        None => SortKey {
            bucket: policy.fallback_bucket,
            secondary: record
                .prediction
                .percent()
                .map_or(f64::INFINITY, |p| -(p as f64)),
        },
    }
}

/// Rank records best-first.
///
/// Every record is kept. The sort is stable, so records with equal keys keep
/// their input order.
pub fn rank_records(records: Vec<NormalizedRecord>, policy: &RankPolicy) -> Vec<NormalizedRecord> {
    let mut keyed: Vec<(SortKey, NormalizedRecord)> = records
        .into_iter()
        .map(|record| (sort_key(&record, policy), record))
        .collect();

    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    keyed.into_iter().map(|(_, record)| record).collect()
}
