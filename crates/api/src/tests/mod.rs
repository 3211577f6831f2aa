// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod ballot_tests;
mod roster_tests;

use crate::request_response::{
    AddCandidateRequest, CandidateInfo, CreateElectionRequest, ElectionInfo, IssueBallotsResponse,
    TransitionElectionRequest,
};
use crate::{add_candidate, create_election, issue_ballots, transition_election};
use strata_vote_domain::ElectionStatus;
use strata_vote_persistence::Persistence;
use time::OffsetDateTime;
use time::macros::datetime;

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-06-01 12:00 UTC)
}

pub fn create_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_election_request(title: &str) -> CreateElectionRequest {
    CreateElectionRequest {
        title: String::from(title),
        description: None,
        opens_at: None,
        closes_at: None,
    }
}

/// Creates an open election with three candidates and ballots for `owners`
/// by driving the public handler functions.
pub fn setup_open_election(
    persistence: &mut Persistence,
    owners: &[&str],
) -> (ElectionInfo, Vec<CandidateInfo>, IssueBallotsResponse) {
    let now: OffsetDateTime = test_now();
    let election: ElectionInfo = create_election(
        persistence,
        create_election_request("Board Election 2026"),
        now,
    )
    .expect("create election");

    let candidates: Vec<CandidateInfo> = ["Alice Anderson", "Bob Brown", "Carol Clark"]
        .iter()
        .map(|name| {
            add_candidate(
                persistence,
                election.election_id,
                AddCandidateRequest {
                    display_name: String::from(*name),
                    statement: None,
                    owner_id: None,
                },
                now,
            )
            .expect("add candidate")
        })
        .collect();

    let election: ElectionInfo = transition_election(
        persistence,
        election.election_id,
        TransitionElectionRequest {
            status: ElectionStatus::Open,
        },
        now,
    )
    .expect("open election");

    let owner_ids: Vec<String> = owners.iter().map(ToString::to_string).collect();
    let issued: IssueBallotsResponse =
        issue_ballots(persistence, election.election_id, &owner_ids, now)
            .expect("issue ballots");

    (election, candidates, issued)
}
