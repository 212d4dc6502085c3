use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use recall_srs::{Card, CardId, CardIndex, DueQueue, NewQueue, SrsState};

/// Fixed reference instant so failures reproduce exactly
pub fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-03-10T09:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// Builder for small card indexes used across the integration tests
pub struct IndexBuilder {
    now: DateTime<Utc>,
    cards: Vec<Card>,
    states: Vec<SrsState>,
}

impl IndexBuilder {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            cards: Vec::new(),
            states: Vec::new(),
        }
    }

    /// Add a reviewed card due at `now + due_in`
    pub fn reviewed(self, id: &str, due_in: Duration) -> Self {
        self.reviewed_with(id, due_in, |_| {})
    }

    /// Add a reviewed card and tweak its state
    pub fn reviewed_with(mut self, id: &str, due_in: Duration, tweak: impl FnOnce(&mut SrsState)) -> Self {
        self.cards
            .push(Card::word(id, id, self.now - Duration::days(90)));
        let mut state = SrsState::new(id, self.now + due_in);
        state.reps = 3;
        state.interval_days = 8.0;
        tweak(&mut state);
        self.states.push(state);
        self
    }

    /// Add a never-reviewed card created at `now - age`
    pub fn new_card(mut self, id: &str, age: Duration) -> Self {
        self.cards.push(Card::word(id, id, self.now - age));
        self
    }

    pub fn build(self) -> CardIndex {
        CardIndex::build(self.cards, self.states, self.now).unwrap()
    }
}

/// Index assembled from caller-ordered queues, as an external indexer would
pub fn index_from_parts(
    cards: Vec<Card>,
    states: Vec<SrsState>,
    due: &[&str],
    new: &[&str],
) -> CardIndex {
    let cards: HashMap<CardId, Card> = cards.into_iter().map(|c| (c.id.clone(), c)).collect();
    let states: HashMap<CardId, SrsState> =
        states.into_iter().map(|s| (s.card_id.clone(), s)).collect();

    CardIndex::from_parts(
        cards,
        states,
        due.iter().map(|id| CardId::new(*id)).collect::<DueQueue>(),
        new.iter().map(|id| CardId::new(*id)).collect::<NewQueue>(),
    )
}

pub fn id_of(card: Option<&Card>) -> Option<&str> {
    card.map(|c| c.id.as_str())
}
