//! SRS (Spaced Repetition System) scheduling engine for Recall
//!
//! This crate decides which flashcard a learner should review next and
//! reports aggregate study statistics. Retention is modelled on the
//! Ebbinghaus forgetting curve; cards are ranked over a read-only
//! [`CardIndex`] built by the caller before every decision.
//!
//! The four core operations are pure and total:
//!
//! * [`calculate_retention`] - probability of recall at an instant
//! * [`calculate_priority`] - relative urgency score among candidates
//! * [`get_next_card`] - the single card to show next, if any
//! * [`get_stats`] - counts of new, due, learning and mature cards
//!
//! Each has a [`Scheduler`] method counterpart that honours a custom
//! [`SchedulerConfig`]; the free functions use the default configuration.

pub mod card;
pub mod config;
pub mod error;
pub mod index;
pub mod options;
pub mod priority;
pub mod retention;
pub mod review;
pub mod select;
pub mod state;
pub mod stats;

pub use card::{Card, CardContent, CardId};
pub use config::SchedulerConfig;
pub use error::{ConfigError, IndexError};
pub use index::{CardIndex, DueQueue, NewQueue};
pub use options::SchedulerOptions;
pub use priority::calculate_priority;
pub use retention::calculate_retention;
pub use review::{Grade, format_interval, grade_card, preview_intervals};
pub use select::get_next_card;
pub use state::{CardStatus, SrsState};
pub use stats::{Stats, get_stats};

use chrono::{DateTime, Utc};

/// Scheduling engine bound to a specific [`SchedulerConfig`].
///
/// The engine holds no state besides its configuration; every method reads
/// the supplied index and returns plain data.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: SchedulerConfig,
}

impl Scheduler {
    /// Create a scheduler with the given configuration.
    pub const fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// The configuration this scheduler was built with.
    pub const fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Options seeded with this configuration's new-card cap.
    pub fn options(&self) -> SchedulerOptions {
        SchedulerOptions::default().with_new_cards_per_day(self.config.new_cards_per_day)
    }

    /// See [`calculate_retention`].
    pub fn retention(&self, state: &SrsState, now: DateTime<Utc>) -> f64 {
        retention::retention_with(&self.config, state, now)
    }

    /// See [`calculate_priority`].
    pub fn priority(&self, state: &SrsState, now: DateTime<Utc>, recent_card_ids: &[CardId]) -> f64 {
        priority::priority_with(&self.config, state, now, recent_card_ids)
    }

    /// See [`get_next_card`].
    pub fn next_card<'a>(
        &self,
        index: &'a CardIndex,
        now: DateTime<Utc>,
        options: &SchedulerOptions,
    ) -> Option<&'a Card> {
        select::next_card_with(&self.config, index, now, options)
    }

    /// See [`get_stats`].
    pub fn stats(&self, index: &CardIndex, now: DateTime<Utc>) -> Stats {
        stats::stats_with(&self.config, index, now)
    }

    /// See [`grade_card`].
    pub fn grade(&self, state: &SrsState, grade: Grade, now: DateTime<Utc>) -> SrsState {
        review::grade_with(&self.config, state, grade, now)
    }

    /// See [`preview_intervals`].
    pub fn preview(&self, state: &SrsState, now: DateTime<Utc>) -> [f64; 4] {
        review::preview_with(&self.config, state, now)
    }
}
