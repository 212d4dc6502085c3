//! JSON snapshot of cards and their scheduling state

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use recall_srs::{Card, CardIndex, IndexError, SrsState};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum SnapshotError {
    #[error("Failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Cards plus whatever states exist for them
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Snapshot {
    pub(crate) cards: Vec<Card>,
    #[serde(default)]
    pub(crate) states: Vec<SrsState>,
}

impl Snapshot {
    pub(crate) fn load(path: &Path) -> Result<Self, SnapshotError> {
        let raw = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let snapshot: Self = serde_json::from_str(&raw).map_err(|source| SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(
            "Loaded snapshot {}: {} cards, {} states",
            path.display(),
            snapshot.cards.len(),
            snapshot.states.len()
        );

        Ok(snapshot)
    }

    pub(crate) fn into_index(self, now: DateTime<Utc>) -> Result<CardIndex, SnapshotError> {
        Ok(CardIndex::build(self.cards, self.states, now)?)
    }
}
