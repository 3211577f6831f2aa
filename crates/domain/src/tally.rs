// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Derived tally statistics.
//!
//! Tallies are never persisted or cached in-process; they are recomputed
//! from durable votes on every call, eliminating cache-invalidation races
//! with the vote recorder. Callers must treat a tally as an "as of now"
//! snapshot that may already be stale by the time it is observed.

use num_traits::cast::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Vote count for one listed candidate. Zero counts are included, never
/// omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTally {
    /// The candidate.
    pub candidate_id: i64,
    /// Name shown on the ballot.
    pub display_name: String,
    /// Number of recorded votes for this candidate.
    pub votes: u64,
}

/// Aggregate statistics for one election.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionStats {
    /// The election these statistics describe.
    pub election_id: i64,
    /// One entry per candidate, including zero-vote candidates.
    pub results: Vec<CandidateTally>,
    /// All write-in votes aggregated into one bucket.
    pub write_in_count: u64,
    /// Number of issued ballots.
    pub ballot_count: u64,
    /// Number of ballots with a recorded vote.
    pub votes_cast: u64,
    /// Issued ballots with no recorded vote.
    pub abstentions: u64,
    /// `votes_cast / ballot_count` as a percentage, rounded to two decimals.
    pub turnout_percent: f64,
}

impl ElectionStats {
    /// Assembles statistics from the raw counts.
    ///
    /// Abstentions and turnout are derived here so every caller reports
    /// them consistently. An election with no ballots has zero turnout.
    #[must_use]
    pub fn new(
        election_id: i64,
        results: Vec<CandidateTally>,
        write_in_count: u64,
        ballot_count: u64,
        votes_cast: u64,
    ) -> Self {
        let abstentions: u64 = ballot_count.saturating_sub(votes_cast);
        let turnout_percent: f64 = if ballot_count == 0 {
            0.0
        } else {
            let cast: f64 = votes_cast.to_f64().unwrap_or(0.0);
            let issued: f64 = ballot_count.to_f64().unwrap_or(1.0);
            round_two_decimals(cast / issued * 100.0)
        };

        Self {
            election_id,
            results,
            write_in_count,
            ballot_count,
            votes_cast,
            abstentions,
            turnout_percent,
        }
    }
}

/// Rounds to two decimal places, half away from zero.
fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
