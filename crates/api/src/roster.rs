// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The voter roster.
//!
//! Owner identities live in an external system; this engine only needs the
//! opaque owner IDs eligible to receive a ballot. The roster is the seam
//! where that external system plugs in.

use std::path::Path;
use thiserror::Error;

/// Roster loading and validation errors.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The roster file could not be read.
    #[error("roster file could not be read: {0}")]
    Io(#[from] std::io::Error),
    /// The same owner ID appears more than once.
    #[error("duplicate owner id '{0}' in roster")]
    DuplicateOwner(String),
    /// The roster contains no owner IDs.
    #[error("roster is empty")]
    Empty,
}

/// A source of eligible owner IDs.
pub trait VoterRoster: Send + Sync {
    /// Returns every eligible owner ID.
    fn owner_ids(&self) -> Vec<String>;

    /// Whether `owner_id` is eligible.
    fn contains(&self, owner_id: &str) -> bool {
        self.owner_ids().iter().any(|held| held == owner_id)
    }
}

/// A roster loaded once at startup and fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct FixedRoster {
    owner_ids: Vec<String>,
}

impl FixedRoster {
    /// Builds a roster from owner IDs, rejecting duplicates and emptiness.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or contains a duplicate.
    pub fn new(owner_ids: Vec<String>) -> Result<Self, RosterError> {
        if owner_ids.is_empty() {
            return Err(RosterError::Empty);
        }
        for (index, owner_id) in owner_ids.iter().enumerate() {
            if owner_ids[..index].contains(owner_id) {
                return Err(RosterError::DuplicateOwner(owner_id.clone()));
            }
        }
        Ok(Self { owner_ids })
    }

    /// Loads a roster from a text file with one owner ID per line.
    ///
    /// Blank lines and lines starting with `#` are ignored; surrounding
    /// whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is empty, or contains a
    /// duplicate owner ID.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RosterError> {
        let contents: String = std::fs::read_to_string(path)?;
        let owner_ids: Vec<String> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(ToString::to_string)
            .collect();
        Self::new(owner_ids)
    }
}

impl VoterRoster for FixedRoster {
    fn owner_ids(&self) -> Vec<String> {
        self.owner_ids.clone()
    }

    fn contains(&self, owner_id: &str) -> bool {
        self.owner_ids.iter().any(|held| held == owner_id)
    }
}
