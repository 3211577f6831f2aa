// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use strata_vote_domain::DomainError;
use strata_vote_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    RuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RuleViolation { rule, message } => {
                write!(f, "Rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly. Token misses and unknown elections translate to one identical
/// `ResourceNotFound`, bodies included, so the public surface gives no way
/// to tell which tokens or elections exist.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidToken | DomainError::ElectionNotFound { .. } => {
            ApiError::ResourceNotFound {
                resource_type: String::from("Election"),
                message: String::from("Election or ballot not found"),
            }
        }
        DomainError::AlreadyVoted => ApiError::RuleViolation {
            rule: String::from("one_vote_per_ballot"),
            message: String::from("This ballot has already been used to vote"),
        },
        DomainError::ElectionNotOpen => ApiError::RuleViolation {
            rule: String::from("election_open"),
            message: String::from("The election is not currently accepting votes"),
        },
        DomainError::ElectionClosed { election_id } => ApiError::RuleViolation {
            rule: String::from("issuance_before_close"),
            message: format!("Election {election_id} is closed; ballots can no longer be issued"),
        },
        DomainError::NoSelection => ApiError::InvalidInput {
            field: String::from("choice"),
            message: String::from("Provide exactly one of candidate_id or write_in"),
        },
        DomainError::WriteInTooLong { length, max } => ApiError::InvalidInput {
            field: String::from("write_in"),
            message: format!("Write-in is {length} characters; the maximum is {max}"),
        },
        DomainError::InvalidCandidate {
            candidate_id,
            election_id,
        } => ApiError::InvalidInput {
            field: String::from("candidate_id"),
            message: format!("Candidate {candidate_id} is not on the ballot of election {election_id}"),
        },
        DomainError::InvalidTransition { from, to } => ApiError::RuleViolation {
            rule: String::from("lifecycle"),
            message: format!("Cannot move an election from {from} to {to}"),
        },
        DomainError::ElectionNotEditable { status } => ApiError::RuleViolation {
            rule: String::from("editable_statuses"),
            message: format!("Election metadata cannot be changed while the election is {status}"),
        },
        DomainError::CandidateNotDeletable { status } => ApiError::RuleViolation {
            rule: String::from("editable_statuses"),
            message: format!("Candidates cannot be removed while the election is {status}"),
        },
        DomainError::TokenExhausted { attempts } => ApiError::Internal {
            message: format!("Token generation failed after {attempts} attempts"),
        },
        DomainError::InvalidWindow { .. } => ApiError::InvalidInput {
            field: String::from("voting_window"),
            message: String::from("opens_at must not be after closes_at"),
        },
        DomainError::InvalidTitle(message) => ApiError::InvalidInput {
            field: String::from("title"),
            message,
        },
        DomainError::InvalidDisplayName(message) => ApiError::InvalidInput {
            field: String::from("display_name"),
            message,
        },
        DomainError::InvalidStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown election status '{value}'"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Rule errors carry their domain meaning through; everything else is an
/// internal failure whose detail belongs in the log, not the response.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::Rule(domain_err) => translate_domain_error(domain_err),
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message,
        },
        other => ApiError::Internal {
            message: format!("Persistence failure: {other}"),
        },
    }
}
