// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::election::ElectionStatus;
use time::OffsetDateTime;

/// Errors raised by election domain rules.
///
/// Every variant is an expected, caller-recoverable condition. Anything
/// that is not one of these kinds (storage failures, constraint violations
/// that do not map to a rule) is an internal error and belongs to the
/// persistence or API layers.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// The presented ballot token is unknown or belongs to another election.
    ///
    /// Deliberately carries no detail: an unknown token and an unknown
    /// election must be indistinguishable to the caller.
    InvalidToken,
    /// The ballot already has a recorded vote.
    AlreadyVoted,
    /// The election is outside its voting window or not in the `Open` status.
    ElectionNotOpen,
    /// Neither a candidate nor a write-in was provided, or both were.
    NoSelection,
    /// The write-in text exceeds the maximum length.
    WriteInTooLong {
        /// The length of the trimmed write-in text, in characters.
        length: usize,
        /// The maximum permitted length.
        max: usize,
    },
    /// The candidate does not belong to the ballot's election.
    InvalidCandidate {
        /// The candidate that was chosen.
        candidate_id: i64,
        /// The election the ballot belongs to.
        election_id: i64,
    },
    /// The requested lifecycle transition is not allowed.
    InvalidTransition {
        /// The current status.
        from: ElectionStatus,
        /// The requested status.
        to: ElectionStatus,
    },
    /// Ballot issuance was attempted on a closed or archived election.
    ElectionClosed {
        /// The election that refused issuance.
        election_id: i64,
    },
    /// The token generator exhausted its collision retry budget.
    TokenExhausted {
        /// The number of attempts made before giving up.
        attempts: usize,
    },
    /// The requested election does not exist.
    ElectionNotFound {
        /// The election that was requested.
        election_id: i64,
    },
    /// The voting window is inverted (`opens_at` after `closes_at`).
    InvalidWindow {
        /// The configured opening instant.
        opens_at: OffsetDateTime,
        /// The configured closing instant.
        closes_at: OffsetDateTime,
    },
    /// The election title is empty or blank.
    InvalidTitle(String),
    /// The candidate display name is empty or blank.
    InvalidDisplayName(String),
    /// The election is past the point where this edit is allowed.
    ElectionNotEditable {
        /// The effective status that blocked the edit.
        status: ElectionStatus,
    },
    /// Candidate deletion was attempted after voting began.
    CandidateNotDeletable {
        /// The effective status that blocked the deletion.
        status: ElectionStatus,
    },
    /// A stored status string could not be parsed.
    InvalidStatus(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidToken => write!(f, "Election or ballot not found"),
            Self::AlreadyVoted => write!(f, "This ballot has already been used to vote"),
            Self::ElectionNotOpen => write!(f, "The election is not open for voting"),
            Self::NoSelection => write!(
                f,
                "Exactly one of a candidate or a write-in must be provided"
            ),
            Self::WriteInTooLong { length, max } => {
                write!(f, "Write-in is {length} characters; the maximum is {max}")
            }
            Self::InvalidCandidate {
                candidate_id,
                election_id,
            } => write!(
                f,
                "Candidate {candidate_id} does not belong to election {election_id}"
            ),
            Self::InvalidTransition { from, to } => {
                write!(f, "Cannot transition election from {from} to {to}")
            }
            Self::ElectionClosed { election_id } => write!(
                f,
                "Election {election_id} is closed; ballots can no longer be issued"
            ),
            Self::TokenExhausted { attempts } => write!(
                f,
                "Failed to generate a unique ballot token after {attempts} attempts"
            ),
            Self::ElectionNotFound { election_id } => {
                write!(f, "Election {election_id} does not exist")
            }
            Self::InvalidWindow {
                opens_at,
                closes_at,
            } => write!(
                f,
                "Voting window is inverted: opens at {opens_at}, closes at {closes_at}"
            ),
            Self::InvalidTitle(msg) => write!(f, "Invalid election title: {msg}"),
            Self::InvalidDisplayName(msg) => {
                write!(f, "Invalid candidate display name: {msg}")
            }
            Self::ElectionNotEditable { status } => {
                write!(f, "Election in status {status} can no longer be edited")
            }
            Self::CandidateNotDeletable { status } => write!(
                f,
                "Candidates cannot be deleted from an election in status {status}"
            ),
            Self::InvalidStatus(value) => write!(f, "Unknown election status '{value}'"),
        }
    }
}

impl std::error::Error for DomainError {}
