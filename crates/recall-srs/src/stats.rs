//! Aggregate study statistics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    config::SchedulerConfig,
    index::CardIndex,
    retention::retention_with,
    state::CardStatus,
};

/// Card counts at one instant
///
/// `new_cards + learning + mature == total` always holds; `due` overlaps
/// the other buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// All cards
    pub total: usize,
    /// Cards whose due instant has passed
    pub due: usize,
    /// Never-reviewed cards
    pub new_cards: usize,
    /// Reviewed cards below the mature threshold
    pub learning: usize,
    /// Reviewed cards at or above the mature threshold
    pub mature: usize,
    /// Mean retention over reviewed cards, 0 when none are reviewed
    pub mean_retention: f64,
}

/// Count cards by status in a single pass over the index
///
/// `due` is recomputed from each state rather than read from the due queue.
pub fn get_stats(index: &CardIndex, now: DateTime<Utc>) -> Stats {
    stats_with(&SchedulerConfig::default(), index, now)
}

pub(crate) fn stats_with(config: &SchedulerConfig, index: &CardIndex, now: DateTime<Utc>) -> Stats {
    let mut stats = Stats::default();
    let mut retention_sum = 0.0;

    for id in index.cards().keys() {
        stats.total += 1;

        let Some(state) = index.state(id) else {
            tracing::warn!("Card {} has no SRS state, counting it as new", id);
            stats.new_cards += 1;
            continue;
        };

        if state.is_due(now) {
            stats.due += 1;
        }

        match state.status_with_threshold(config.mature_threshold_days) {
            CardStatus::New => stats.new_cards += 1,
            CardStatus::Learning => stats.learning += 1,
            CardStatus::Mature => stats.mature += 1,
        }

        if !state.is_new() {
            retention_sum += retention_with(config, state, now);
        }
    }

    let reviewed = stats.learning + stats.mature;
    if reviewed > 0 {
        stats.mean_retention = retention_sum / reviewed as f64;
    }

    stats
}
