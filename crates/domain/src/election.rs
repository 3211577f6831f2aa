// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Election aggregate and lifecycle state machine.
//!
//! The lifecycle moves strictly forward through
//! `Draft → Scheduled → Open → Closed → Archived`. Closing can also happen
//! lazily: a status read on an `Open` election whose `closes_at` has elapsed
//! reports `Closed` without requiring a background job. The persisted status
//! is advanced to `Closed` on the next write that touches the election.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Lifecycle status of an election.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElectionStatus {
    /// Being configured; not yet announced.
    Draft,
    /// Announced with a planned window; still editable.
    Scheduled,
    /// Accepting votes (subject to the voting window).
    Open,
    /// Voting has ended; results are final.
    Closed,
    /// Terminal. Retained for audit, never deleted.
    Archived,
}

impl ElectionStatus {
    /// Returns the canonical storage string for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Scheduled => "scheduled",
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Archived => "archived",
        }
    }

    /// Whether a transition from `self` to `to` is allowed.
    ///
    /// The lifecycle is forward-only. `Open` may only be reached from
    /// `Draft` or `Scheduled`; `Closed` only from `Open`; `Archived` from
    /// `Closed`, or directly from `Draft`/`Scheduled` for elections that
    /// were abandoned before opening. Nothing leaves `Archived`.
    #[must_use]
    pub const fn can_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Draft, Self::Scheduled | Self::Open | Self::Archived)
                | (Self::Scheduled, Self::Open | Self::Archived)
                | (Self::Open, Self::Closed)
                | (Self::Closed, Self::Archived)
        )
    }

    /// Whether election metadata and candidates may still be edited.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Draft | Self::Scheduled)
    }
}

impl std::fmt::Display for ElectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ElectionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "scheduled" => Ok(Self::Scheduled),
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "archived" => Ok(Self::Archived),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}

/// An election as read from durable storage.
///
/// The election is the aggregate root owning candidates and ballots.
#[derive(Debug, Clone, PartialEq)]
pub struct Election {
    /// Unique election identifier.
    pub election_id: i64,
    /// Human-readable title.
    pub title: String,
    /// Optional longer description shown to voters.
    pub description: Option<String>,
    /// The persisted lifecycle status. Prefer `effective_status` for reads.
    pub status: ElectionStatus,
    /// Optional instant before which votes are rejected.
    pub opens_at: Option<OffsetDateTime>,
    /// Optional instant at or after which votes are rejected.
    pub closes_at: Option<OffsetDateTime>,
    /// Creation timestamp.
    pub created_at: OffsetDateTime,
    /// Last-modification timestamp.
    pub updated_at: OffsetDateTime,
}

impl Election {
    /// Returns the status as observed at `now`, applying lazy close.
    ///
    /// An `Open` election whose `closes_at` has elapsed reports `Closed`
    /// even though the persisted row still says `Open`. Writers persist the
    /// advanced status before applying their own change, committed
    /// separately so a rejected write cannot roll the close back.
    #[must_use]
    pub fn effective_status(&self, now: OffsetDateTime) -> ElectionStatus {
        if self.status == ElectionStatus::Open
            && self.closes_at.is_some_and(|closes_at| closes_at <= now)
        {
            ElectionStatus::Closed
        } else {
            self.status
        }
    }

    /// Whether a vote presented at `now` may be accepted.
    ///
    /// True iff the effective status is `Open`, `opens_at` is unset or has
    /// passed, and `closes_at` is unset or still in the future. This is the
    /// sole gate consulted by the vote recorder and must be evaluated
    /// inside the same transaction as the vote write.
    #[must_use]
    pub fn is_open_for_voting(&self, now: OffsetDateTime) -> bool {
        self.effective_status(now) == ElectionStatus::Open
            && self.opens_at.is_none_or(|opens_at| opens_at <= now)
            && self.closes_at.is_none_or(|closes_at| closes_at > now)
    }

    /// Validates a requested status change.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` if the lifecycle does not
    /// permit moving from the effective status at `now` to `to`.
    pub fn validate_transition(
        &self,
        to: ElectionStatus,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        let from: ElectionStatus = self.effective_status(now);
        if from.can_transition_to(to) {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition { from, to })
        }
    }
}

/// Validates an election title.
///
/// # Errors
///
/// Returns `DomainError::InvalidTitle` if the title is empty after trimming.
pub fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "title must not be empty",
        )));
    }
    Ok(())
}

/// Validates a voting window.
///
/// # Errors
///
/// Returns `DomainError::InvalidWindow` if both bounds are set and
/// `opens_at` is after `closes_at`.
pub fn validate_window(
    opens_at: Option<OffsetDateTime>,
    closes_at: Option<OffsetDateTime>,
) -> Result<(), DomainError> {
    if let (Some(opens_at), Some(closes_at)) = (opens_at, closes_at)
        && opens_at > closes_at
    {
        return Err(DomainError::InvalidWindow {
            opens_at,
            closes_at,
        });
    }
    Ok(())
}
