//! Per-card spaced repetition state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    card::CardId,
    config::{INITIAL_EASE_FACTOR, MATURE_THRESHOLD_DAYS},
};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Where a card sits in the learning process, derived on read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardStatus {
    /// Never reviewed (`reps == 0`)
    New,
    /// Reviewed, last interval below the mature threshold
    Learning,
    /// Last interval at or above the mature threshold
    Mature,
}

/// Scheduling state for exactly one card
///
/// Only the grading logic moves these fields, and only forward; the
/// scheduler reads them as a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SrsState {
    /// Card this state belongs to
    pub card_id: CardId,
    /// Instant the card becomes eligible for review
    pub due_at: DateTime<Utc>,
    /// Last scheduled gap between reviews, in days (0 when never reviewed)
    #[serde(default)]
    pub interval_days: f64,
    /// Interval growth multiplier
    #[serde(default = "default_ease_factor")]
    pub ease_factor: f64,
    /// Successful reviews
    #[serde(default)]
    pub reps: u32,
    /// Failed reviews
    #[serde(default)]
    pub lapses: u32,
}

const fn default_ease_factor() -> f64 {
    INITIAL_EASE_FACTOR
}

impl SrsState {
    /// State for a freshly imported card, eligible immediately
    pub fn new(card_id: impl Into<CardId>, now: DateTime<Utc>) -> Self {
        Self {
            card_id: card_id.into(),
            due_at: now,
            interval_days: 0.0,
            ease_factor: INITIAL_EASE_FACTOR,
            reps: 0,
            lapses: 0,
        }
    }

    /// Whether the card has never been reviewed
    pub const fn is_new(&self) -> bool {
        self.reps == 0
    }

    /// Whether the card's due instant has passed at `now`
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_at <= now
    }

    /// Signed days since the card became due; negative before `due_at`
    pub fn elapsed_days(&self, now: DateTime<Utc>) -> f64 {
        (now - self.due_at).num_milliseconds() as f64 / MILLIS_PER_DAY
    }

    /// Status using the default mature threshold
    pub fn status(&self) -> CardStatus {
        self.status_with_threshold(MATURE_THRESHOLD_DAYS)
    }

    /// Status using a caller-supplied mature threshold in days
    pub fn status_with_threshold(&self, mature_threshold_days: f64) -> CardStatus {
        if self.is_new() {
            CardStatus::New
        } else if self.interval_days >= mature_threshold_days {
            CardStatus::Mature
        } else {
            CardStatus::Learning
        }
    }
}
