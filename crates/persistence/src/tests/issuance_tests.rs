// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{
    create_draft_election, create_open_election_with_ballots, create_persistence, test_now,
};
use crate::{Persistence, PersistenceError};
use std::collections::HashSet;
use strata_vote_domain::{Ballot, DomainError, Election, ElectionStatus, TOKEN_LENGTH};
use time::OffsetDateTime;
use time::macros::datetime;

fn owner_ids(owners: &[&str]) -> Vec<String> {
    owners.iter().map(ToString::to_string).collect()
}

#[test]
fn test_issuance_creates_one_ballot_per_owner() {
    let mut persistence: Persistence = create_persistence();
    let (election, _, ballots) =
        create_open_election_with_ballots(&mut persistence, &["unit-101", "unit-102", "unit-103"]);

    assert_eq!(ballots.len(), 3);
    for ballot in &ballots {
        assert_eq!(ballot.election_id, election.election_id);
        assert_eq!(ballot.token.chars().count(), TOKEN_LENGTH);
        assert!(ballot.voted_at.is_none());
    }

    let tokens: HashSet<&str> = ballots.iter().map(|b| b.token.as_str()).collect();
    assert_eq!(tokens.len(), 3);
}

#[test]
fn test_reissuance_returns_the_full_ballot_set() {
    let mut persistence: Persistence = create_persistence();
    let now: OffsetDateTime = test_now();
    let (election, _, first) =
        create_open_election_with_ballots(&mut persistence, &["unit-101", "unit-102"]);

    let second: Vec<Ballot> = persistence
        .issue_ballots(
            election.election_id,
            &owner_ids(&["unit-101", "unit-102", "unit-103"]),
            now,
        )
        .unwrap();

    // One new ballot, but the result carries all three.
    assert_eq!(second.len(), 3);
    assert!(second.iter().any(|b| b.owner_id == "unit-103"));

    // The original ballots are untouched: same tokens, still unspent.
    for ballot in &first {
        assert!(second.iter().any(|held| held.token == ballot.token));
    }
}

#[test]
fn test_reissuance_is_idempotent() {
    let mut persistence: Persistence = create_persistence();
    let now: OffsetDateTime = test_now();
    let (election, _, first) =
        create_open_election_with_ballots(&mut persistence, &["unit-101", "unit-102"]);

    let again: Vec<Ballot> = persistence
        .issue_ballots(election.election_id, &owner_ids(&["unit-101", "unit-102"]), now)
        .unwrap();

    // Nothing new was created; the same two ballots come back.
    assert_eq!(again.len(), 2);
    for ballot in &first {
        assert!(again.iter().any(|held| held.token == ballot.token));
    }
    assert_eq!(persistence.list_ballots(election.election_id).unwrap().len(), 2);
}

#[test]
fn test_issuance_rejected_on_closed_election() {
    let mut persistence: Persistence = create_persistence();
    let now: OffsetDateTime = test_now();
    let (election, _, _) = create_open_election_with_ballots(&mut persistence, &["unit-101"]);

    persistence
        .transition_election(election.election_id, ElectionStatus::Closed, now)
        .unwrap();

    let result = persistence.issue_ballots(election.election_id, &owner_ids(&["unit-102"]), now);
    assert!(matches!(
        result,
        Err(PersistenceError::Rule(DomainError::ElectionClosed { .. }))
    ));
}

#[test]
fn test_rejected_issuance_still_persists_lazy_close() {
    let mut persistence: Persistence = create_persistence();
    let now: OffsetDateTime = test_now();
    let (election, _) = create_draft_election(&mut persistence);
    let election_id: i64 = election.election_id;

    persistence
        .update_election(
            election_id,
            "Board Election 2026",
            None,
            None,
            Some(datetime!(2026-06-01 13:00 UTC)),
            now,
        )
        .unwrap();
    persistence
        .transition_election(election_id, ElectionStatus::Open, now)
        .unwrap();

    // Issuance past the close instant is rejected, but the close itself
    // commits: the rejection must not roll it back.
    let later: OffsetDateTime = datetime!(2026-06-01 14:00 UTC);
    let result = persistence.issue_ballots(election_id, &owner_ids(&["unit-101"]), later);
    assert!(matches!(
        result,
        Err(PersistenceError::Rule(DomainError::ElectionClosed { .. }))
    ));

    let election: Election = persistence.get_election(election_id).unwrap();
    assert_eq!(election.status, ElectionStatus::Closed);
}

#[test]
fn test_issuance_rejected_for_unknown_election() {
    let mut persistence: Persistence = create_persistence();
    let result = persistence.issue_ballots(999, &owner_ids(&["unit-101"]), test_now());

    assert!(matches!(
        result,
        Err(PersistenceError::Rule(DomainError::ElectionNotFound {
            election_id: 999
        }))
    ));
}

#[test]
fn test_ballots_are_scoped_to_their_election() {
    let mut persistence: Persistence = create_persistence();
    let now: OffsetDateTime = test_now();
    let (first, _, _) = create_open_election_with_ballots(&mut persistence, &["unit-101"]);
    let (second, _, _) = create_open_election_with_ballots(&mut persistence, &["unit-101"]);

    // The same owner holds one ballot in each election.
    assert_eq!(persistence.list_ballots(first.election_id).unwrap().len(), 1);
    assert_eq!(persistence.list_ballots(second.election_id).unwrap().len(), 1);

    // Re-issuing in the second election returns only its own ballot.
    let reissued: Vec<Ballot> = persistence
        .issue_ballots(second.election_id, &owner_ids(&["unit-101"]), now)
        .unwrap();
    assert_eq!(reissued.len(), 1);
    assert_eq!(reissued[0].election_id, second.election_id);
}
