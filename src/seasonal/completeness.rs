//! Readiness gating for seasonal rollups.
//!
//! A season may only be rolled up once every one of its calendar months has a
//! batch available. Duplicate deliveries of the same month never inflate the
//! count, and arrival order is irrelevant.

use crate::types::batch::BatchId;
use crate::types::season::SeasonKey;
use std::collections::{BTreeMap, BTreeSet};

/// Readiness of every season represented in the available batches,
/// in deterministic (season, year) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletenessReport {
    /// Keys with all required months present.
    pub ready: Vec<SeasonKey>,
    /// Keys still missing months, with diagnostic counts.
    pub pending: Vec<PendingSeason>,
}

/// Diagnostic entry for a season that is not yet complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSeason {
    pub key: SeasonKey,
    /// Distinct months currently available for the key.
    pub present: usize,
    /// Months the season spans.
    pub required: usize,
}

/// Groups the available batches by season key and reports which keys have
/// every required month present.
pub fn season_completeness(batches: &[BatchId]) -> CompletenessReport {
    let mut months_by_key: BTreeMap<SeasonKey, BTreeSet<u32>> = BTreeMap::new();
    for id in batches {
        months_by_key
            .entry(id.season_key())
            .or_default()
            .insert(id.month);
    }

    let mut ready = Vec::new();
    let mut pending = Vec::new();
    for (key, months) in months_by_key {
        let required = key.season.required_months();
        if months.len() == required {
            ready.push(key);
        } else {
            pending.push(PendingSeason {
                key,
                present: months.len(),
                required,
            });
        }
    }

    CompletenessReport { ready, pending }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::season::Season;

    fn winter_2024() -> SeasonKey {
        SeasonKey {
            season: Season::Winter,
            year: 2024,
        }
    }

    #[test]
    fn full_winter_reports_ready() {
        let batches = [
            BatchId::new(2024, 10),
            BatchId::new(2024, 11),
            BatchId::new(2024, 12),
            BatchId::new(2025, 1),
            BatchId::new(2025, 2),
        ];
        let report = season_completeness(&batches);
        assert_eq!(report.ready, [winter_2024()]);
        assert!(report.pending.is_empty());
    }

    #[test]
    fn partial_winter_stays_pending() {
        let batches = [
            BatchId::new(2024, 10),
            BatchId::new(2024, 11),
            BatchId::new(2024, 12),
        ];
        let report = season_completeness(&batches);
        assert!(report.ready.is_empty());
        assert_eq!(
            report.pending,
            [PendingSeason {
                key: winter_2024(),
                present: 3,
                required: 5,
            }]
        );
    }

    #[test]
    fn duplicate_months_never_inflate_the_count() {
        // October delivered three times, e.g. by overlapping fetch runs.
        let batches = [
            BatchId::new(2024, 10),
            BatchId::new(2024, 10),
            BatchId::new(2024, 10),
            BatchId::new(2024, 11),
            BatchId::new(2024, 12),
        ];
        let report = season_completeness(&batches);
        assert!(report.ready.is_empty());
        assert_eq!(report.pending[0].present, 3);
    }

    #[test]
    fn arrival_order_is_irrelevant() {
        let batches = [
            BatchId::new(2025, 2),
            BatchId::new(2024, 12),
            BatchId::new(2025, 1),
            BatchId::new(2024, 10),
            BatchId::new(2024, 11),
        ];
        let report = season_completeness(&batches);
        assert_eq!(report.ready, [winter_2024()]);
    }

    #[test]
    fn seasons_are_gated_independently() {
        // A full summer alongside a partial monsoon of the same year.
        let batches = [
            BatchId::new(2025, 3),
            BatchId::new(2025, 4),
            BatchId::new(2025, 5),
            BatchId::new(2025, 6),
            BatchId::new(2025, 7),
        ];
        let report = season_completeness(&batches);
        assert_eq!(
            report.ready,
            [SeasonKey {
                season: Season::Summer,
                year: 2025,
            }]
        );
        assert_eq!(
            report.pending,
            [PendingSeason {
                key: SeasonKey {
                    season: Season::Monsoon,
                    year: 2025,
                },
                present: 2,
                required: 4,
            }]
        );
    }

    #[test]
    fn winter_months_across_the_year_boundary_share_one_key() {
        // January/February 2025 count toward Winter_2024, not Winter_2025.
        let batches = [BatchId::new(2025, 1), BatchId::new(2025, 2)];
        let report = season_completeness(&batches);
        assert_eq!(report.pending.len(), 1);
        assert_eq!(report.pending[0].key, winter_2024());
        assert_eq!(report.pending[0].present, 2);
    }

    #[test]
    fn no_batches_means_nothing_to_report() {
        let report = season_completeness(&[]);
        assert!(report.ready.is_empty());
        assert!(report.pending.is_empty());
    }
}
