// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Strata Vote engine.
//!
//! Handlers here are transport-agnostic: they take DTOs and an explicit
//! `now`, return DTOs or `ApiError`, and leave HTTP concerns to the server
//! crate. The voter roster trait lives here too, since eligibility is an
//! API-boundary concern rather than a storage one.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;
mod results_csv;
mod roster;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    add_candidate, create_election, delete_candidate, get_ballot_view, get_election,
    get_election_stats, issue_ballots, list_ballots, list_candidates, list_elections,
    list_write_ins, submit_vote, transition_election, update_election,
};
pub use request_response::{
    AddCandidateRequest, BallotSummaryInfo, BallotViewResponse, CandidateInfo, CandidateTallyInfo,
    CreateElectionRequest, ElectionInfo, ElectionStatsResponse, IssueBallotsRequest,
    IssueBallotsResponse, PublicCandidateInfo, SubmitVoteRequest,
    TransitionElectionRequest, UpdateElectionRequest, VoteReceiptResponse, WriteInInfo,
};
pub use results_csv::export_results_csv;
pub use roster::{FixedRoster, RosterError, VoterRoster};
