// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tally queries.
//!
//! Tallies are computed on demand from the vote rows; nothing here writes.
//! Candidates with zero votes appear in the result with an explicit zero so
//! consumers never have to guess whether a missing entry means zero or
//! missing data.

use std::collections::BTreeMap;

use diesel::prelude::*;
use strata_vote_domain::{Candidate, CandidateTally, ElectionStats};

use crate::diesel_schema::votes;
use crate::error::PersistenceError;
use crate::queries::ballots::count_ballots;
use crate::queries::elections::{get_election, list_candidates};

/// Computes on-demand statistics for an election.
///
/// # Errors
///
/// Returns `PersistenceError::Rule(DomainError::ElectionNotFound)` if the
/// election does not exist, or an error if a query fails.
pub fn compute_stats(
    conn: &mut SqliteConnection,
    election_id: i64,
) -> Result<ElectionStats, PersistenceError> {
    get_election(conn, election_id)?;

    let candidates: Vec<Candidate> = list_candidates(conn, election_id)?;
    let choices: Vec<(Option<i64>, Option<String>)> = votes::table
        .filter(votes::election_id.eq(election_id))
        .select((votes::candidate_id, votes::write_in))
        .load(conn)?;

    let mut per_candidate: BTreeMap<i64, u64> = BTreeMap::new();
    let mut write_in_count: u64 = 0;
    for (candidate_id, _write_in) in &choices {
        match candidate_id {
            Some(candidate_id) => {
                *per_candidate.entry(*candidate_id).or_insert(0) += 1;
            }
            None => write_in_count += 1,
        }
    }

    let results: Vec<CandidateTally> = candidates
        .into_iter()
        .map(|candidate| CandidateTally {
            votes: per_candidate
                .get(&candidate.candidate_id)
                .copied()
                .unwrap_or(0),
            candidate_id: candidate.candidate_id,
            display_name: candidate.display_name,
        })
        .collect();

    let (ballot_count, votes_cast): (u64, u64) = count_ballots(conn, election_id)?;

    Ok(ElectionStats::new(
        election_id,
        results,
        write_in_count,
        ballot_count,
        votes_cast,
    ))
}

/// Lists the distinct write-in texts for an election with their counts,
/// most popular first, ties broken alphabetically.
///
/// # Errors
///
/// Returns `PersistenceError::Rule(DomainError::ElectionNotFound)` if the
/// election does not exist, or an error if a query fails.
pub fn list_write_ins(
    conn: &mut SqliteConnection,
    election_id: i64,
) -> Result<Vec<(String, u64)>, PersistenceError> {
    get_election(conn, election_id)?;

    let texts: Vec<Option<String>> = votes::table
        .filter(votes::election_id.eq(election_id))
        .filter(votes::write_in.is_not_null())
        .select(votes::write_in)
        .load(conn)?;

    let mut grouped: BTreeMap<String, u64> = BTreeMap::new();
    for text in texts.into_iter().flatten() {
        *grouped.entry(text).or_insert(0) += 1;
    }

    let mut write_ins: Vec<(String, u64)> = grouped.into_iter().collect();
    write_ins.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Ok(write_ins)
}
