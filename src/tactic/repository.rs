//! Embedded tactic collection with by-id and random lookup.

use rand::Rng;
use thiserror::Error;

use super::types::Tactic;

/// Tactic records compiled into the binary.
const EMBEDDED_TACTICS: &str = include_str!("../../data/tactics.json");

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("malformed tactic data: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("no tactic with id {0}")]
    NotFound(usize),
    #[error("tactic collection is empty")]
    Empty,
}

/// Read-only tactic source. Ids are positions in the collection.
pub struct TacticRepository {
    tactics: Vec<Tactic>,
}

impl TacticRepository {
    pub fn embedded() -> Result<Self, RepositoryError> {
        Self::from_json(EMBEDDED_TACTICS)
    }

    pub fn from_json(json: &str) -> Result<Self, RepositoryError> {
        let tactics: Vec<Tactic> = serde_json::from_str(json)?;
        Ok(Self { tactics })
    }

    pub fn len(&self) -> usize {
        self.tactics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tactics.is_empty()
    }

    pub fn by_id(&self, id: usize) -> Result<&Tactic, RepositoryError> {
        self.tactics.get(id).ok_or(RepositoryError::NotFound(id))
    }

    pub fn random<R: Rng>(&self, rng: &mut R) -> Result<&Tactic, RepositoryError> {
        if self.tactics.is_empty() {
            return Err(RepositoryError::Empty);
        }
        Ok(&self.tactics[rng.gen_range(0..self.tactics.len())])
    }
}
