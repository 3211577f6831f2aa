// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod issuance_tests;

use crate::Persistence;
use strata_vote_domain::{Candidate, Election, ElectionStatus};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-06-01 12:00 UTC)
}

pub fn create_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

/// Creates a draft election with three candidates.
pub fn create_draft_election(persistence: &mut Persistence) -> (Election, Vec<Candidate>) {
    let now: OffsetDateTime = test_now();
    let election: Election = persistence
        .create_election("Board Election 2026", None, None, None, now)
        .expect("create election");

    let candidates: Vec<Candidate> = ["Alice Anderson", "Bob Brown", "Carol Clark"]
        .iter()
        .map(|name| {
            persistence
                .add_candidate(election.election_id, name, None, None, now)
                .expect("add candidate")
        })
        .collect();

    (election, candidates)
}

/// Creates an open election with three candidates and ballots for `owners`.
pub fn create_open_election_with_ballots(
    persistence: &mut Persistence,
    owners: &[&str],
) -> (Election, Vec<Candidate>, Vec<strata_vote_domain::Ballot>) {
    let now: OffsetDateTime = test_now();
    let (election, candidates) = create_draft_election(persistence);

    let election: Election = persistence
        .transition_election(election.election_id, ElectionStatus::Open, now)
        .expect("open election");

    let owner_ids: Vec<String> = owners.iter().map(ToString::to_string).collect();
    let ballots: Vec<strata_vote_domain::Ballot> = persistence
        .issue_ballots(election.election_id, &owner_ids, now)
        .expect("issue ballots");

    (election, candidates, ballots)
}
