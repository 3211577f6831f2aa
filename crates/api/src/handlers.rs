// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Handlers translate between wire DTOs and domain types, delegate to the
//! persistence adapter, and translate every error at this boundary. The
//! transport layer above never sees a `DomainError` or `PersistenceError`.

use strata_vote_domain::{Ballot, Candidate, Choice, Election, VoteReceipt};
use strata_vote_persistence::Persistence;
use time::OffsetDateTime;
use tracing::info;

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    AddCandidateRequest, BallotSummaryInfo, BallotViewResponse, CandidateInfo,
    CreateElectionRequest, ElectionInfo, ElectionStatsResponse, IssueBallotsResponse,
    PublicCandidateInfo, SubmitVoteRequest, TransitionElectionRequest, UpdateElectionRequest,
    VoteReceiptResponse, WriteInInfo,
};

/// Creates a new election in `Draft` status.
///
/// # Errors
///
/// Returns an error if the title is empty, the voting window is inverted,
/// or persistence fails.
pub fn create_election(
    persistence: &mut Persistence,
    request: CreateElectionRequest,
    now: OffsetDateTime,
) -> Result<ElectionInfo, ApiError> {
    let election: Election = persistence
        .create_election(
            &request.title,
            request.description.as_deref(),
            request.opens_at,
            request.closes_at,
            now,
        )
        .map_err(translate_persistence_error)?;

    info!(election_id = election.election_id, "Election created");
    Ok(ElectionInfo::from_election(&election, now))
}

/// Replaces an editable election's metadata.
///
/// # Errors
///
/// Returns an error if the election does not exist, is no longer editable,
/// or the new metadata is invalid.
pub fn update_election(
    persistence: &mut Persistence,
    election_id: i64,
    request: UpdateElectionRequest,
    now: OffsetDateTime,
) -> Result<ElectionInfo, ApiError> {
    let election: Election = persistence
        .update_election(
            election_id,
            &request.title,
            request.description.as_deref(),
            request.opens_at,
            request.closes_at,
            now,
        )
        .map_err(translate_persistence_error)?;

    Ok(ElectionInfo::from_election(&election, now))
}

/// Moves an election to a new lifecycle status.
///
/// # Errors
///
/// Returns an error if the election does not exist or the lifecycle does
/// not permit the transition.
pub fn transition_election(
    persistence: &mut Persistence,
    election_id: i64,
    request: TransitionElectionRequest,
    now: OffsetDateTime,
) -> Result<ElectionInfo, ApiError> {
    let election: Election = persistence
        .transition_election(election_id, request.status, now)
        .map_err(translate_persistence_error)?;

    info!(
        election_id,
        status = %election.status,
        "Election transitioned"
    );
    Ok(ElectionInfo::from_election(&election, now))
}

/// Retrieves one election.
///
/// # Errors
///
/// Returns an error if the election does not exist.
pub fn get_election(
    persistence: &mut Persistence,
    election_id: i64,
    now: OffsetDateTime,
) -> Result<ElectionInfo, ApiError> {
    let election: Election = persistence
        .get_election(election_id)
        .map_err(translate_persistence_error)?;
    Ok(ElectionInfo::from_election(&election, now))
}

/// Retrieves all elections, oldest first.
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn list_elections(
    persistence: &mut Persistence,
    now: OffsetDateTime,
) -> Result<Vec<ElectionInfo>, ApiError> {
    let elections: Vec<Election> = persistence
        .list_elections()
        .map_err(translate_persistence_error)?;
    Ok(elections
        .iter()
        .map(|election| ElectionInfo::from_election(election, now))
        .collect())
}

/// Adds a candidate to an editable election.
///
/// # Errors
///
/// Returns an error if the election does not exist, is no longer editable,
/// or the display name is empty.
pub fn add_candidate(
    persistence: &mut Persistence,
    election_id: i64,
    request: AddCandidateRequest,
    now: OffsetDateTime,
) -> Result<CandidateInfo, ApiError> {
    let candidate: Candidate = persistence
        .add_candidate(
            election_id,
            &request.display_name,
            request.statement.as_deref(),
            request.owner_id.as_deref(),
            now,
        )
        .map_err(translate_persistence_error)?;
    Ok(CandidateInfo::from(candidate))
}

/// Removes a candidate from an editable election.
///
/// # Errors
///
/// Returns an error if the election does not exist, is no longer editable,
/// or the candidate is not on its ballot.
pub fn delete_candidate(
    persistence: &mut Persistence,
    election_id: i64,
    candidate_id: i64,
    now: OffsetDateTime,
) -> Result<(), ApiError> {
    persistence
        .delete_candidate(election_id, candidate_id, now)
        .map_err(translate_persistence_error)
}

/// Retrieves the candidates of an election.
///
/// # Errors
///
/// Returns an error if the election does not exist.
pub fn list_candidates(
    persistence: &mut Persistence,
    election_id: i64,
) -> Result<Vec<CandidateInfo>, ApiError> {
    persistence
        .get_election(election_id)
        .map_err(translate_persistence_error)?;

    let candidates: Vec<Candidate> = persistence
        .list_candidates(election_id)
        .map_err(translate_persistence_error)?;
    Ok(candidates.into_iter().map(CandidateInfo::from).collect())
}

/// Issues ballots for the given owners, skipping owners who already hold
/// one.
///
/// Returns the election's full ballot set, tokens included, so a re-run
/// after a partial issuance still hands the administrator every token.
///
/// # Errors
///
/// Returns an error if the election does not exist, is closed, or token
/// generation fails.
pub fn issue_ballots(
    persistence: &mut Persistence,
    election_id: i64,
    owner_ids: &[String],
    now: OffsetDateTime,
) -> Result<IssueBallotsResponse, ApiError> {
    let ballots: Vec<Ballot> = persistence
        .issue_ballots(election_id, owner_ids, now)
        .map_err(translate_persistence_error)?;

    info!(
        election_id,
        requested = owner_ids.len(),
        total = ballots.len(),
        "Ballots issued"
    );
    Ok(IssueBallotsResponse {
        election_id,
        ballots: ballots.into_iter().map(BallotSummaryInfo::from).collect(),
    })
}

/// Retrieves an election's ballots for administrative review.
///
/// The listing carries each ballot's token; this surface is administrative
/// and is never reachable through the public gateway.
///
/// # Errors
///
/// Returns an error if the election does not exist.
pub fn list_ballots(
    persistence: &mut Persistence,
    election_id: i64,
) -> Result<Vec<BallotSummaryInfo>, ApiError> {
    persistence
        .get_election(election_id)
        .map_err(translate_persistence_error)?;

    let ballots: Vec<Ballot> = persistence
        .list_ballots(election_id)
        .map_err(translate_persistence_error)?;
    Ok(ballots.into_iter().map(BallotSummaryInfo::from).collect())
}

/// Retrieves the token-scoped public ballot view.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the election or token is
/// unknown; the two cases are indistinguishable to the caller.
pub fn get_ballot_view(
    persistence: &mut Persistence,
    election_id: i64,
    token: &str,
    now: OffsetDateTime,
) -> Result<BallotViewResponse, ApiError> {
    let election: Election = persistence
        .get_election(election_id)
        .map_err(translate_persistence_error)?;
    let ballot: Ballot = persistence
        .get_ballot_by_token(election_id, token)
        .map_err(translate_persistence_error)?;
    let candidates: Vec<Candidate> = persistence
        .list_candidates(election_id)
        .map_err(translate_persistence_error)?;

    Ok(BallotViewResponse {
        election_id,
        title: election.title.clone(),
        description: election.description.clone(),
        status: election.effective_status(now),
        opens_at: election.opens_at,
        closes_at: election.closes_at,
        candidates: candidates
            .into_iter()
            .map(|candidate| PublicCandidateInfo {
                candidate_id: candidate.candidate_id,
                display_name: candidate.display_name,
                statement: candidate.statement,
            })
            .collect(),
        has_voted: ballot.has_voted(),
    })
}

/// Records a vote against the ballot identified by `token`.
///
/// The choice is validated before any storage is touched, so a malformed
/// request can never spend a ballot.
///
/// # Errors
///
/// Returns an error if the choice is malformed, the election or token is
/// unknown, the election is not open, or the ballot is already spent.
pub fn submit_vote(
    persistence: &mut Persistence,
    election_id: i64,
    token: &str,
    request: SubmitVoteRequest,
    now: OffsetDateTime,
) -> Result<VoteReceiptResponse, ApiError> {
    let choice: Choice = Choice::from_parts(request.candidate_id, request.write_in.as_deref())
        .map_err(translate_domain_error)?;

    let receipt: VoteReceipt = persistence
        .cast_vote(election_id, token, &choice, now)
        .map_err(translate_persistence_error)?;

    info!(election_id, "Vote recorded");
    Ok(VoteReceiptResponse::from(receipt))
}

/// Computes on-demand statistics for an election.
///
/// # Errors
///
/// Returns an error if the election does not exist.
pub fn get_election_stats(
    persistence: &mut Persistence,
    election_id: i64,
) -> Result<ElectionStatsResponse, ApiError> {
    let stats = persistence
        .compute_stats(election_id)
        .map_err(translate_persistence_error)?;
    Ok(ElectionStatsResponse::from(stats))
}

/// Lists the distinct write-in texts for an election with their counts.
///
/// # Errors
///
/// Returns an error if the election does not exist.
pub fn list_write_ins(
    persistence: &mut Persistence,
    election_id: i64,
) -> Result<Vec<WriteInInfo>, ApiError> {
    let write_ins: Vec<(String, u64)> = persistence
        .list_write_ins(election_id)
        .map_err(translate_persistence_error)?;
    Ok(write_ins
        .into_iter()
        .map(|(write_in, votes)| WriteInInfo { write_in, votes })
        .collect())
}
