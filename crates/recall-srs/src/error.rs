use thiserror::Error;

use crate::card::CardId;

/// A [`CardIndex`](crate::CardIndex) that breaks its construction invariants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("SRS state references unknown card: {0}")]
    OrphanState(CardId),
    #[error("Card has no SRS state: {0}")]
    MissingState(CardId),
    #[error("{queue} queue entry has no SRS state: {card_id}")]
    UnknownQueueEntry { queue: &'static str, card_id: CardId },
    #[error("{queue} queue is out of order at {card_id}")]
    Unsorted { queue: &'static str, card_id: CardId },
}

/// Scheduler configuration that could not be loaded
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment error: {0}")]
    Env(#[from] envy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
