// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ballots: one-time voting credentials.

use time::OffsetDateTime;

/// A single-use voting credential tied to one eligible owner for one election.
///
/// The token is the sole proof of ballot possession; it carries no identity
/// information decodable by the holder. `voted_at` is null until a vote is
/// recorded and is then immutably set. That field is the at-most-once guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ballot {
    /// Unique ballot identifier.
    pub ballot_id: i64,
    /// The election this ballot belongs to.
    pub election_id: i64,
    /// The eligible owner this ballot was issued to, from the external roster.
    pub owner_id: String,
    /// The opaque bearer token. Unique across the whole system.
    pub token: String,
    /// When the ballot was issued.
    pub issued_at: OffsetDateTime,
    /// When the vote was recorded, if any.
    pub voted_at: Option<OffsetDateTime>,
}

impl Ballot {
    /// Whether a vote has been recorded against this ballot.
    #[must_use]
    pub const fn has_voted(&self) -> bool {
        self.voted_at.is_some()
    }
}

/// The receipt returned to a voter after a successful vote.
///
/// Carries only the election and the timestamp; never the choice, and no
/// secret beyond what the caller already possessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteReceipt {
    /// The election the vote was recorded for.
    pub election_id: i64,
    /// When the vote was recorded.
    pub voted_at: OffsetDateTime,
}
