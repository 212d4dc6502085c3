//! Card model: immutable content units the scheduler ranks

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable, unique card identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Wrap an identifier string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Type-specific card payload, tagged by `type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CardContent {
    /// Vocabulary word with an optional definition
    Word {
        /// The word being learned
        term: String,
        /// Meaning shown on the back
        #[serde(default, skip_serializing_if = "Option::is_none")]
        definition: Option<String>,
    },
    /// Simple question and answer
    Basic {
        /// Question side
        front: String,
        /// Answer side
        back: String,
    },
    /// Fill-in-the-blank text
    Cloze {
        /// Text containing the cloze deletions
        text: String,
    },
}

impl CardContent {
    /// Short text identifying the card for a human, e.g. in CLI output
    pub fn prompt(&self) -> &str {
        match self {
            Self::Word { term, .. } => term,
            Self::Basic { front, .. } => front,
            Self::Cloze { text } => text,
        }
    }
}

/// A flashcard, created once at import time and never mutated by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique card identifier
    pub id: CardId,
    /// Card payload
    #[serde(flatten)]
    pub content: CardContent,
    /// When the card was imported; orders the new-card queue
    pub created_at: DateTime<Utc>,
}

impl Card {
    /// Create a card
    pub fn new(id: impl Into<CardId>, content: CardContent, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            content,
            created_at,
        }
    }

    /// Create a `word` card
    pub fn word(id: impl Into<CardId>, term: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self::new(
            id,
            CardContent::Word {
                term: term.into(),
                definition: None,
            },
            created_at,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_json_shape() {
        let created_at = DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let card = Card::word("c1", "perro", created_at);

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["id"], "c1");
        assert_eq!(json["type"], "word");
        assert_eq!(json["term"], "perro");
        assert!(json.get("definition").is_none());

        let parsed: Card = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, card);
    }

    #[test]
    fn test_basic_card_from_json() {
        let card: Card = serde_json::from_str(
            r#"{"id":"b1","type":"basic","front":"2+2","back":"4","createdAt":"2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(card.id.as_str(), "b1");
        assert_eq!(card.content.prompt(), "2+2");
    }
}
