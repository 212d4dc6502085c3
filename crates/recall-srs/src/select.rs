//! Next-card selection
//!
//! Pools are consulted in strict precedence order:
//!
//! 1. Due pool: `due_cards` entries whose state is due at `now`
//! 2. New pool: `new_cards` entries, only while today's quota has room
//! 3. Loop mode: `due_cards` then `upcoming_cards`, ignoring due-ness
//!
//! The excluded card is skipped in every pool. Within the due pool, cards
//! listed in `recent_card_ids` yield to any other due card, earlier `due_at`
//! wins next, and priority settles cards due at the same instant.

use chrono::{DateTime, Utc};

use crate::{
    card::{Card, CardId},
    config::SchedulerConfig,
    index::CardIndex,
    options::SchedulerOptions,
    priority::priority_with,
    state::SrsState,
};

/// Pick the card to present next, or `None` when no card is available
///
/// Pure over its inputs: the index is only read.
pub fn get_next_card<'a>(
    index: &'a CardIndex,
    now: DateTime<Utc>,
    options: &SchedulerOptions,
) -> Option<&'a Card> {
    next_card_with(&SchedulerConfig::default(), index, now, options)
}

pub(crate) fn next_card_with<'a>(
    config: &SchedulerConfig,
    index: &'a CardIndex,
    now: DateTime<Utc>,
    options: &SchedulerOptions,
) -> Option<&'a Card> {
    if let Some(card) = pick_due(config, index, now, options) {
        tracing::debug!("Selected due card {}", card.id);
        return Some(card);
    }

    if options.new_quota_open() {
        if let Some(card) = pick_new(index, options) {
            tracing::debug!(
                "Selected new card {} ({}/{} introduced today)",
                card.id,
                options.today_new_card_count,
                options.new_cards_per_day
            );
            return Some(card);
        }
    } else {
        tracing::trace!(
            "New-card quota consumed: {}/{}",
            options.today_new_card_count,
            options.new_cards_per_day
        );
    }

    if options.loop_mode {
        if let Some(card) = pick_loop(index, options) {
            tracing::debug!("Selected card {} in loop mode", card.id);
            return Some(card);
        }
    }

    tracing::debug!("No card available");
    None
}

/// A due card under consideration
struct Candidate<'a> {
    card: &'a Card,
    state: &'a SrsState,
    recent: bool,
    priority: f64,
}

impl Candidate<'_> {
    fn outranks(&self, other: &Self) -> bool {
        if self.recent != other.recent {
            return !self.recent;
        }
        match self.state.due_at.cmp(&other.state.due_at) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Greater => false,
            std::cmp::Ordering::Equal => self.priority > other.priority,
        }
    }
}

fn pick_due<'a>(
    config: &SchedulerConfig,
    index: &'a CardIndex,
    now: DateTime<Utc>,
    options: &SchedulerOptions,
) -> Option<&'a Card> {
    let mut best: Option<Candidate<'a>> = None;

    for id in index.due_cards() {
        if options.is_excluded(id) {
            continue;
        }
        let Some((card, state)) = lookup(index, id) else {
            continue;
        };

        // Queue is ascending by due_at: nothing after this point is due, and
        // nothing after can beat a non-recent best with an earlier due_at.
        if !state.is_due(now) {
            break;
        }
        if let Some(current) = &best
            && !current.recent
            && state.due_at > current.state.due_at
        {
            break;
        }

        let candidate = Candidate {
            card,
            state,
            recent: options.recent_card_ids.contains(id),
            priority: priority_with(config, state, now, &options.recent_card_ids),
        };

        if best.as_ref().is_none_or(|current| candidate.outranks(current)) {
            best = Some(candidate);
        }
    }

    best.map(|candidate| candidate.card)
}

fn pick_new<'a>(index: &'a CardIndex, options: &SchedulerOptions) -> Option<&'a Card> {
    index
        .new_cards()
        .iter()
        .filter(|id| !options.is_excluded(id))
        .find_map(|id| index.card(id))
}

fn pick_loop<'a>(index: &'a CardIndex, options: &SchedulerOptions) -> Option<&'a Card> {
    index
        .due_cards()
        .iter()
        .chain(index.upcoming_cards())
        .filter(|id| !options.is_excluded(id))
        .find_map(|id| index.card(id))
}

fn lookup<'a>(index: &'a CardIndex, id: &CardId) -> Option<(&'a Card, &'a SrsState)> {
    match (index.card(id), index.state(id)) {
        (Some(card), Some(state)) => Some((card, state)),
        _ => {
            tracing::warn!("Due queue entry {} is missing from the index", id);
            None
        }
    }
}
