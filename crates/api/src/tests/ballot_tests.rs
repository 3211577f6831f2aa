// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::request_response::{
    BallotSummaryInfo, BallotViewResponse, SubmitVoteRequest, VoteReceiptResponse,
};
use crate::tests::{create_persistence, setup_open_election, test_now};
use crate::{ApiError, get_ballot_view, list_ballots, submit_vote};
use strata_vote_persistence::Persistence;
use time::OffsetDateTime;

fn candidate_vote(candidate_id: i64) -> SubmitVoteRequest {
    SubmitVoteRequest {
        candidate_id: Some(candidate_id),
        write_in: None,
    }
}

#[test]
fn test_ballot_view_shows_candidates_and_vote_state() {
    let mut persistence: Persistence = create_persistence();
    let now: OffsetDateTime = test_now();
    let (election, candidates, issued) = setup_open_election(&mut persistence, &["unit-101"]);
    let token: &str = &issued.ballots[0].token;

    let view: BallotViewResponse =
        get_ballot_view(&mut persistence, election.election_id, token, now).unwrap();
    assert_eq!(view.title, "Board Election 2026");
    assert_eq!(view.candidates.len(), 3);
    assert!(!view.has_voted);

    submit_vote(
        &mut persistence,
        election.election_id,
        token,
        candidate_vote(candidates[0].candidate_id),
        now,
    )
    .unwrap();

    let view: BallotViewResponse =
        get_ballot_view(&mut persistence, election.election_id, token, now).unwrap();
    assert!(view.has_voted);
}

#[test]
fn test_ballot_view_exposes_no_owner_identities() {
    let mut persistence: Persistence = create_persistence();
    let (election, _, issued) = setup_open_election(&mut persistence, &["unit-101"]);

    let view: BallotViewResponse = get_ballot_view(
        &mut persistence,
        election.election_id,
        &issued.ballots[0].token,
        test_now(),
    )
    .unwrap();

    // The public view carries ballot and election data only; serialize it
    // and check the owner ID is nowhere in the payload.
    let payload: String = serde_json::to_string(&view).unwrap();
    assert!(!payload.contains("unit-101"));
}

#[test]
fn test_unknown_token_and_unknown_election_look_identical() {
    let mut persistence: Persistence = create_persistence();
    let now: OffsetDateTime = test_now();
    let (election, _, _) = setup_open_election(&mut persistence, &["unit-101"]);

    let bad_token = get_ballot_view(
        &mut persistence,
        election.election_id,
        "AAAAAAAAAAAAAAAAAAAAAAAAAA",
        now,
    );
    let bad_election = get_ballot_view(&mut persistence, 999, "anything", now);

    // Not just the same variant: the rendered responses must match exactly,
    // or the gateway leaks which elections exist.
    let bad_token: ApiError = bad_token.unwrap_err();
    let bad_election: ApiError = bad_election.unwrap_err();
    assert!(matches!(bad_token, ApiError::ResourceNotFound { .. }));
    assert_eq!(bad_token, bad_election);
    assert_eq!(bad_token.to_string(), bad_election.to_string());
}

#[test]
fn test_vote_with_both_fields_is_rejected_without_spending() {
    let mut persistence: Persistence = create_persistence();
    let now: OffsetDateTime = test_now();
    let (election, candidates, issued) = setup_open_election(&mut persistence, &["unit-101"]);
    let token: &str = &issued.ballots[0].token;

    let result = submit_vote(
        &mut persistence,
        election.election_id,
        token,
        SubmitVoteRequest {
            candidate_id: Some(candidates[0].candidate_id),
            write_in: Some(String::from("Dora Diaz")),
        },
        now,
    );
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "choice"
    ));

    // The malformed request must not have consumed the ballot.
    let receipt: VoteReceiptResponse = submit_vote(
        &mut persistence,
        election.election_id,
        token,
        candidate_vote(candidates[0].candidate_id),
        now,
    )
    .unwrap();
    assert_eq!(receipt.election_id, election.election_id);
}

#[test]
fn test_vote_with_neither_field_is_rejected() {
    let mut persistence: Persistence = create_persistence();
    let (election, _, issued) = setup_open_election(&mut persistence, &["unit-101"]);

    let result = submit_vote(
        &mut persistence,
        election.election_id,
        &issued.ballots[0].token,
        SubmitVoteRequest {
            candidate_id: None,
            write_in: None,
        },
        test_now(),
    );
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "choice"
    ));
}

#[test]
fn test_double_vote_is_rule_violation() {
    let mut persistence: Persistence = create_persistence();
    let now: OffsetDateTime = test_now();
    let (election, candidates, issued) = setup_open_election(&mut persistence, &["unit-101"]);
    let token: &str = &issued.ballots[0].token;

    submit_vote(
        &mut persistence,
        election.election_id,
        token,
        candidate_vote(candidates[0].candidate_id),
        now,
    )
    .unwrap();

    let result = submit_vote(
        &mut persistence,
        election.election_id,
        token,
        candidate_vote(candidates[1].candidate_id),
        now,
    );
    assert!(matches!(
        result,
        Err(ApiError::RuleViolation { rule, .. }) if rule == "one_vote_per_ballot"
    ));
}

#[test]
fn test_oversized_write_in_is_invalid_input() {
    let mut persistence: Persistence = create_persistence();
    let (election, _, issued) = setup_open_election(&mut persistence, &["unit-101"]);

    let result = submit_vote(
        &mut persistence,
        election.election_id,
        &issued.ballots[0].token,
        SubmitVoteRequest {
            candidate_id: None,
            write_in: Some("a".repeat(201)),
        },
        test_now(),
    );
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "write_in"
    ));
}

#[test]
fn test_ballot_listing_carries_every_token() {
    let mut persistence: Persistence = create_persistence();
    let (election, _, issued) = setup_open_election(&mut persistence, &["unit-101", "unit-102"]);

    let listing: Vec<BallotSummaryInfo> =
        list_ballots(&mut persistence, election.election_id).unwrap();
    assert_eq!(listing.len(), 2);

    // The administrative listing reports the same tokens issuance handed out.
    for ballot in &issued.ballots {
        assert!(listing.iter().any(|held| held.token == ballot.token));
    }
}
