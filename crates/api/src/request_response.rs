// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Timestamps cross the wire as RFC 3339 strings. Election responses report
//! the effective status, so an election whose window has elapsed reads as
//! `closed` even before the stored row is advanced.

use serde::{Deserialize, Serialize};
use strata_vote_domain::{
    Ballot, Candidate, CandidateTally, Election, ElectionStats, ElectionStatus, VoteReceipt,
};
use time::OffsetDateTime;

/// API request to create a new election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateElectionRequest {
    /// Human-readable title.
    pub title: String,
    /// Optional longer description shown to voters.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional instant before which votes are rejected.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub opens_at: Option<OffsetDateTime>,
    /// Optional instant at or after which votes are rejected.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub closes_at: Option<OffsetDateTime>,
}

/// API request to replace an editable election's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateElectionRequest {
    /// Human-readable title.
    pub title: String,
    /// Optional longer description shown to voters.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional instant before which votes are rejected.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub opens_at: Option<OffsetDateTime>,
    /// Optional instant at or after which votes are rejected.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub closes_at: Option<OffsetDateTime>,
}

/// API request to move an election to a new lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionElectionRequest {
    /// The requested status.
    pub status: ElectionStatus,
}

/// An election as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionInfo {
    /// Unique election identifier.
    pub election_id: i64,
    /// Human-readable title.
    pub title: String,
    /// Optional longer description shown to voters.
    pub description: Option<String>,
    /// The effective lifecycle status as observed at request time.
    pub status: ElectionStatus,
    /// Optional instant before which votes are rejected.
    #[serde(with = "time::serde::rfc3339::option")]
    pub opens_at: Option<OffsetDateTime>,
    /// Optional instant at or after which votes are rejected.
    #[serde(with = "time::serde::rfc3339::option")]
    pub closes_at: Option<OffsetDateTime>,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Last-modification timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl ElectionInfo {
    /// Builds the API view of an election as observed at `now`.
    #[must_use]
    pub fn from_election(election: &Election, now: OffsetDateTime) -> Self {
        Self {
            election_id: election.election_id,
            title: election.title.clone(),
            description: election.description.clone(),
            status: election.effective_status(now),
            opens_at: election.opens_at,
            closes_at: election.closes_at,
            created_at: election.created_at,
            updated_at: election.updated_at,
        }
    }
}

/// API request to add a candidate to an election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddCandidateRequest {
    /// Name shown on the ballot.
    pub display_name: String,
    /// Optional candidate statement shown to voters.
    #[serde(default)]
    pub statement: Option<String>,
    /// Optional link to an owner record in the external identity store.
    #[serde(default)]
    pub owner_id: Option<String>,
}

/// A candidate as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateInfo {
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

impl From<Candidate> for CandidateInfo {
    fn from(candidate: Candidate) -> Self {
        Self {
            candidate_id: candidate.candidate_id,
            election_id: candidate.election_id,
            display_name: candidate.display_name,
            statement: candidate.statement,
            owner_id: candidate.owner_id,
        }
    }
}

/// API request to issue ballots.
///
/// When `owner_ids` is omitted the server issues against its full roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueBallotsRequest {
    /// The owners to issue ballots for, or `None` for the whole roster.
    #[serde(default)]
    pub owner_ids: Option<Vec<String>>,
}

/// API response for ballot issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueBallotsResponse {
    /// The election ballots were issued for.
    pub election_id: i64,
    /// The full current ballot set, pre-existing and newly created alike.
    pub ballots: Vec<BallotSummaryInfo>,
}

/// A ballot as reported on the administrative surface, token included.
///
/// Tokens appear only here; the public ballot view never echoes them, and
/// never names other owners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotSummaryInfo {
    /// Unique ballot identifier.
    pub ballot_id: i64,
    /// The owner this ballot was issued to.
    pub owner_id: String,
    /// The one-time voting token to hand to the owner.
    pub token: String,
    /// Issuance timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub issued_at: OffsetDateTime,
    /// Whether a vote has been recorded against this ballot.
    pub has_voted: bool,
    /// When the vote was recorded, if one was.
    #[serde(with = "time::serde::rfc3339::option")]
    pub voted_at: Option<OffsetDateTime>,
}

impl From<Ballot> for BallotSummaryInfo {
    fn from(ballot: Ballot) -> Self {
        Self {
            ballot_id: ballot.ballot_id,
            owner_id: ballot.owner_id,
            token: ballot.token,
            issued_at: ballot.issued_at,
            has_voted: ballot.voted_at.is_some(),
            voted_at: ballot.voted_at,
        }
    }
}

/// The token-scoped public view of a ballot.
///
/// Contains everything a voter needs to vote and nothing that identifies
/// other voters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotViewResponse {
    /// The election this ballot belongs to.
    pub election_id: i64,
    /// Election title.
    pub title: String,
    /// Election description.
    pub description: Option<String>,
    /// The effective lifecycle status as observed at request time.
    pub status: ElectionStatus,
    /// Optional instant before which votes are rejected.
    #[serde(with = "time::serde::rfc3339::option")]
    pub opens_at: Option<OffsetDateTime>,
    /// Optional instant at or after which votes are rejected.
    #[serde(with = "time::serde::rfc3339::option")]
    pub closes_at: Option<OffsetDateTime>,
    /// The candidates on the ballot.
    pub candidates: Vec<PublicCandidateInfo>,
    /// Whether this ballot has already been used to vote.
    pub has_voted: bool,
}

/// A candidate as shown to voters. Carries no owner linkage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicCandidateInfo {
    /// Unique candidate identifier.
    pub candidate_id: i64,
    /// Name shown on the ballot.
    pub display_name: String,
    /// Optional candidate statement.
    pub statement: Option<String>,
}

/// API request to record a vote.
///
/// Exactly one of `candidate_id` and `write_in` must be provided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitVoteRequest {
    /// A vote for a listed candidate.
    #[serde(default)]
    pub candidate_id: Option<i64>,
    /// A free-text write-in vote.
    #[serde(default)]
    pub write_in: Option<String>,
}

/// API response for a recorded vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceiptResponse {
    /// The election the vote was recorded in.
    pub election_id: i64,
    /// When the vote was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub voted_at: OffsetDateTime,
    /// A success message.
    pub message: String,
}

impl From<VoteReceipt> for VoteReceiptResponse {
    fn from(receipt: VoteReceipt) -> Self {
        Self {
            election_id: receipt.election_id,
            voted_at: receipt.voted_at,
            message: String::from("Vote recorded"),
        }
    }
}

/// Vote count for one candidate as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTallyInfo {
    /// The candidate.
    pub candidate_id: i64,
    /// Name shown on the ballot.
    pub display_name: String,
    /// Number of recorded votes for this candidate.
    pub votes: u64,
}

impl From<CandidateTally> for CandidateTallyInfo {
    fn from(tally: CandidateTally) -> Self {
        Self {
            candidate_id: tally.candidate_id,
            display_name: tally.display_name,
            votes: tally.votes,
        }
    }
}

/// Aggregate election statistics as reported by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionStatsResponse {
    /// The election these statistics describe.
    pub election_id: i64,
    /// One entry per candidate, including zero-vote candidates.
    pub results: Vec<CandidateTallyInfo>,
    /// All write-in votes aggregated into one bucket.
    pub write_in_count: u64,
    /// Number of issued ballots.
    pub ballot_count: u64,
    /// Number of ballots with a recorded vote.
    pub votes_cast: u64,
    /// Issued ballots with no recorded vote.
    pub abstentions: u64,
    /// Turnout as a percentage, rounded to two decimals.
    pub turnout_percent: f64,
}

impl From<ElectionStats> for ElectionStatsResponse {
    fn from(stats: ElectionStats) -> Self {
        Self {
            election_id: stats.election_id,
            results: stats.results.into_iter().map(CandidateTallyInfo::from).collect(),
            write_in_count: stats.write_in_count,
            ballot_count: stats.ballot_count,
            votes_cast: stats.votes_cast,
            abstentions: stats.abstentions,
            turnout_percent: stats.turnout_percent,
        }
    }
}

/// One distinct write-in text with its vote count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteInInfo {
    /// The write-in text as recorded.
    pub write_in: String,
    /// Number of votes carrying this text.
    pub votes: u64,
}
