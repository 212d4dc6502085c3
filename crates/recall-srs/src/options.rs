//! Per-call scheduling options

use serde::{Deserialize, Serialize};

use crate::{card::CardId, config::DEFAULT_NEW_CARDS_PER_DAY};

/// Options supplied with every selection request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchedulerOptions {
    /// Cap on new cards introduced per day
    pub new_cards_per_day: u32,
    /// New cards already introduced today
    pub today_new_card_count: u32,
    /// Recycle not-yet-due cards once the due and new pools are empty
    pub loop_mode: bool,
    /// Card to skip for this call, usually the one just answered
    pub exclude_card_id: Option<CardId>,
    /// Cards reviewed earlier in the session, most recent first
    pub recent_card_ids: Vec<CardId>,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            new_cards_per_day: DEFAULT_NEW_CARDS_PER_DAY,
            today_new_card_count: 0,
            loop_mode: false,
            exclude_card_id: None,
            recent_card_ids: Vec::new(),
        }
    }
}

impl SchedulerOptions {
    /// Set the daily new-card cap
    #[must_use]
    pub const fn with_new_cards_per_day(mut self, cap: u32) -> Self {
        self.new_cards_per_day = cap;
        self
    }

    /// Set how many new cards were already introduced today
    #[must_use]
    pub const fn with_today_new_card_count(mut self, count: u32) -> Self {
        self.today_new_card_count = count;
        self
    }

    /// Enable or disable loop mode
    #[must_use]
    pub const fn with_loop_mode(mut self, loop_mode: bool) -> Self {
        self.loop_mode = loop_mode;
        self
    }

    /// Skip one card for this call
    #[must_use]
    pub fn excluding(mut self, card_id: impl Into<CardId>) -> Self {
        self.exclude_card_id = Some(card_id.into());
        self
    }

    /// Set the session's recent reviews, most recent first
    #[must_use]
    pub fn with_recent<I>(mut self, recent: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<CardId>,
    {
        self.recent_card_ids = recent.into_iter().map(Into::into).collect();
        self
    }

    /// Whether today's new-card quota still has room
    pub const fn new_quota_open(&self) -> bool {
        self.today_new_card_count < self.new_cards_per_day
    }

    pub(crate) fn is_excluded(&self, card_id: &CardId) -> bool {
        self.exclude_card_id.as_ref() == Some(card_id)
    }
}
