// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Election and candidate queries.

use diesel::prelude::*;
use strata_vote_domain::DomainError;
use strata_vote_domain::{Candidate, Election};
use tracing::debug;

use crate::data_models::{CandidateRow, ElectionRow};
use crate::diesel_schema::{candidates, elections};
use crate::error::PersistenceError;

/// Retrieves an election by ID.
///
/// # Errors
///
/// Returns `PersistenceError::Rule(DomainError::ElectionNotFound)` if the
/// election does not exist, or an error if the query fails.
pub fn get_election(
    conn: &mut SqliteConnection,
    election_id: i64,
) -> Result<Election, PersistenceError> {
    debug!("Looking up election by ID: {}", election_id);

    let result: Result<ElectionRow, diesel::result::Error> = elections::table
        .filter(elections::election_id.eq(election_id))
        .select(ElectionRow::as_select())
        .first(conn);

    match result {
        Ok(row) => row.into_domain(),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::Rule(
            DomainError::ElectionNotFound { election_id },
        )),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves all elections, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be decoded.
pub fn list_elections(conn: &mut SqliteConnection) -> Result<Vec<Election>, PersistenceError> {
    let rows: Vec<ElectionRow> = elections::table
        .order(elections::election_id.asc())
        .select(ElectionRow::as_select())
        .load(conn)?;

    rows.into_iter().map(ElectionRow::into_domain).collect()
}

/// Retrieves all candidates for an election, in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_candidates(
    conn: &mut SqliteConnection,
    election_id: i64,
) -> Result<Vec<Candidate>, PersistenceError> {
    let rows: Vec<CandidateRow> = candidates::table
        .filter(candidates::election_id.eq(election_id))
        .order(candidates::candidate_id.asc())
        .select(CandidateRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Candidate::from).collect())
}

/// Retrieves a candidate by ID, scoped to an election.
///
/// Returns `Ok(None)` if no such candidate exists on that election's ballot.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_candidate(
    conn: &mut SqliteConnection,
    election_id: i64,
    candidate_id: i64,
) -> Result<Option<Candidate>, PersistenceError> {
    let result: Result<CandidateRow, diesel::result::Error> = candidates::table
        .filter(candidates::election_id.eq(election_id))
        .filter(candidates::candidate_id.eq(candidate_id))
        .select(CandidateRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(Candidate::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
