// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Candidates standing in an election.

use crate::error::DomainError;

/// A candidate belonging exclusively to one election.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Unique candidate identifier.
    pub candidate_id: i64,
    /// The election this candidate stands in.
    pub election_id: i64,
    /// Name shown on the ballot.
    pub display_name: String,
    /// Optional candidate statement shown to voters.
    pub statement: Option<String>,
    /// Optional link to an owner record in the external identity store.
    pub owner_id: Option<String>,
}

/// Validates a candidate display name.
///
/// # Errors
///
/// Returns `DomainError::InvalidDisplayName` if the name is empty after
/// trimming.
pub fn validate_display_name(display_name: &str) -> Result<(), DomainError> {
    if display_name.trim().is_empty() {
        return Err(DomainError::InvalidDisplayName(String::from(
            "candidate display name must not be empty",
        )));
    }
    Ok(())
}
