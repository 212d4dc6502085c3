//! Read-only card index the scheduler ranks over
//!
//! The index pairs every [`Card`] with exactly one [`SrsState`] and carries
//! pre-sorted queues of candidate identifiers. The selector trusts the queue
//! order completely, so the ordering is an invariant of the queue types:
//!
//! * [`DueQueue`] - ascending `due_at` (earliest due first)
//! * [`NewQueue`] - ascending `created_at` (oldest card first)
//!
//! [`CardIndex::build`] derives the queues itself. Callers that maintain
//! their own queues go through [`CardIndex::from_parts`], which checks the
//! ordering in debug builds, and may call [`CardIndex::validate`] anywhere.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::{
    card::{Card, CardId},
    error::IndexError,
    state::SrsState,
};

/// Card identifiers ordered by `due_at`, earliest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DueQueue(Vec<CardId>);

/// Card identifiers ordered by `created_at`, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewQueue(Vec<CardId>);

macro_rules! queue_impl {
    ($queue:ident) => {
        impl $queue {
            /// Wrap identifiers that are already in queue order
            pub const fn new(ids: Vec<CardId>) -> Self {
                Self(ids)
            }

            /// Identifiers in queue order
            pub fn as_slice(&self) -> &[CardId] {
                &self.0
            }

            /// Iterate identifiers in queue order
            pub fn iter(&self) -> std::slice::Iter<'_, CardId> {
                self.0.iter()
            }

            /// Number of queued identifiers
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Whether the queue is empty
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl<'a> IntoIterator for &'a $queue {
            type Item = &'a CardId;
            type IntoIter = std::slice::Iter<'a, CardId>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }

        impl FromIterator<CardId> for $queue {
            fn from_iter<I: IntoIterator<Item = CardId>>(iter: I) -> Self {
                Self(iter.into_iter().collect())
            }
        }
    };
}

queue_impl!(DueQueue);
queue_impl!(NewQueue);

/// Read-only view over all known cards and their scheduling state
#[derive(Debug, Clone, Default)]
pub struct CardIndex {
    cards: HashMap<CardId, Card>,
    srs_states: HashMap<CardId, SrsState>,
    due_cards: DueQueue,
    new_cards: NewQueue,
    upcoming_cards: DueQueue,
}

impl CardIndex {
    /// Build an index as of `now`
    ///
    /// Cards without a state get a fresh [`SrsState`] due at their creation
    /// time. A state whose card is unknown is rejected.
    ///
    /// Queues:
    /// * due: reviewed cards with `due_at <= now`
    /// * new: cards with `reps == 0`
    /// * upcoming: reviewed cards not yet due, used by loop mode
    pub fn build<C, S>(cards: C, states: S, now: DateTime<Utc>) -> Result<Self, IndexError>
    where
        C: IntoIterator<Item = Card>,
        S: IntoIterator<Item = SrsState>,
    {
        let cards: HashMap<CardId, Card> = cards
            .into_iter()
            .map(|card| (card.id.clone(), card))
            .collect();

        let mut srs_states = HashMap::with_capacity(cards.len());
        for state in states {
            if !cards.contains_key(&state.card_id) {
                return Err(IndexError::OrphanState(state.card_id));
            }
            srs_states.insert(state.card_id.clone(), state);
        }

        for card in cards.values() {
            srs_states
                .entry(card.id.clone())
                .or_insert_with(|| SrsState::new(card.id.clone(), card.created_at));
        }

        let mut due: Vec<&SrsState> = Vec::new();
        let mut upcoming: Vec<&SrsState> = Vec::new();
        let mut fresh: Vec<&Card> = Vec::new();

        for state in srs_states.values() {
            if state.is_new() {
                if let Some(card) = cards.get(&state.card_id) {
                    fresh.push(card);
                }
            } else if state.is_due(now) {
                due.push(state);
            } else {
                upcoming.push(state);
            }
        }

        // Identifier as secondary key keeps the order deterministic
        due.sort_by(|a, b| a.due_at.cmp(&b.due_at).then_with(|| a.card_id.cmp(&b.card_id)));
        upcoming.sort_by(|a, b| a.due_at.cmp(&b.due_at).then_with(|| a.card_id.cmp(&b.card_id)));
        fresh.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

        let due_cards: DueQueue = due.into_iter().map(|s| s.card_id.clone()).collect();
        let upcoming_cards: DueQueue = upcoming.into_iter().map(|s| s.card_id.clone()).collect();
        let new_cards: NewQueue = fresh.into_iter().map(|c| c.id.clone()).collect();

        tracing::trace!(
            "Built card index: {} cards, {} due, {} new, {} upcoming",
            cards.len(),
            due_cards.len(),
            new_cards.len(),
            upcoming_cards.len()
        );

        Ok(Self {
            cards,
            srs_states,
            due_cards,
            new_cards,
            upcoming_cards,
        })
    }

    /// Assemble an index from caller-maintained collections
    ///
    /// The queues must already be in order; this is checked in debug builds
    /// only. The upcoming queue starts empty, see [`Self::with_upcoming`].
    pub fn from_parts(
        cards: HashMap<CardId, Card>,
        srs_states: HashMap<CardId, SrsState>,
        due_cards: DueQueue,
        new_cards: NewQueue,
    ) -> Self {
        let index = Self {
            cards,
            srs_states,
            due_cards,
            new_cards,
            upcoming_cards: DueQueue::default(),
        };
        debug_assert_eq!(index.validate(), Ok(()));
        index
    }

    /// Replace the queue of reviewed-but-not-yet-due cards
    #[must_use]
    pub fn with_upcoming(mut self, upcoming_cards: DueQueue) -> Self {
        self.upcoming_cards = upcoming_cards;
        debug_assert_eq!(self.validate(), Ok(()));
        self
    }

    /// Check every construction invariant
    pub fn validate(&self) -> Result<(), IndexError> {
        if let Some(id) = self.srs_states.keys().find(|id| !self.cards.contains_key(*id)) {
            return Err(IndexError::OrphanState(id.clone()));
        }
        if let Some(id) = self.cards.keys().find(|id| !self.srs_states.contains_key(*id)) {
            return Err(IndexError::MissingState(id.clone()));
        }

        self.check_due_order("due", &self.due_cards)?;
        self.check_due_order("upcoming", &self.upcoming_cards)?;

        let mut previous: Option<DateTime<Utc>> = None;
        for id in &self.new_cards {
            let card = self.cards.get(id).ok_or_else(|| IndexError::UnknownQueueEntry {
                queue: "new",
                card_id: id.clone(),
            })?;
            if previous.is_some_and(|prev| card.created_at < prev) {
                return Err(IndexError::Unsorted {
                    queue: "new",
                    card_id: id.clone(),
                });
            }
            previous = Some(card.created_at);
        }

        Ok(())
    }

    fn check_due_order(&self, queue: &'static str, ids: &DueQueue) -> Result<(), IndexError> {
        let mut previous: Option<DateTime<Utc>> = None;
        for id in ids {
            let state = self.srs_states.get(id).ok_or_else(|| IndexError::UnknownQueueEntry {
                queue,
                card_id: id.clone(),
            })?;
            if previous.is_some_and(|prev| state.due_at < prev) {
                return Err(IndexError::Unsorted {
                    queue,
                    card_id: id.clone(),
                });
            }
            previous = Some(state.due_at);
        }
        Ok(())
    }

    /// All known cards
    pub const fn cards(&self) -> &HashMap<CardId, Card> {
        &self.cards
    }

    /// All known scheduling states
    pub const fn srs_states(&self) -> &HashMap<CardId, SrsState> {
        &self.srs_states
    }

    /// Reviewed cards due at build time, earliest first
    pub const fn due_cards(&self) -> &DueQueue {
        &self.due_cards
    }

    /// Never-reviewed cards, oldest first
    pub const fn new_cards(&self) -> &NewQueue {
        &self.new_cards
    }

    /// Reviewed cards not yet due at build time, earliest first
    pub const fn upcoming_cards(&self) -> &DueQueue {
        &self.upcoming_cards
    }

    /// Look up a card
    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    /// Look up a card's scheduling state
    pub fn state(&self, id: &CardId) -> Option<&SrsState> {
        self.srs_states.get(id)
    }

    /// Number of cards
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the index holds no cards
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
