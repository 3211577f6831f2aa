// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ballot queries.

use diesel::prelude::*;
use strata_vote_domain::Ballot;
use strata_vote_domain::DomainError;

use crate::data_models::BallotRow;
use crate::diesel_schema::ballots;
use crate::error::PersistenceError;

/// Retrieves all ballots for an election, in issuance order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be decoded.
pub fn list_ballots(
    conn: &mut SqliteConnection,
    election_id: i64,
) -> Result<Vec<Ballot>, PersistenceError> {
    let rows: Vec<BallotRow> = ballots::table
        .filter(ballots::election_id.eq(election_id))
        .order(ballots::ballot_id.asc())
        .select(BallotRow::as_select())
        .load(conn)?;

    rows.into_iter().map(BallotRow::into_domain).collect()
}

/// Retrieves the owner IDs that already hold a ballot for an election.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_owner_ids(
    conn: &mut SqliteConnection,
    election_id: i64,
) -> Result<Vec<String>, PersistenceError> {
    Ok(ballots::table
        .filter(ballots::election_id.eq(election_id))
        .select(ballots::owner_id)
        .load(conn)?)
}

/// Retrieves the ballot carrying `token` within an election.
///
/// The token is the only lookup key the public surface accepts; a miss is
/// reported as `InvalidToken` without revealing whether the token exists in
/// some other election.
///
/// # Errors
///
/// Returns `PersistenceError::Rule(DomainError::InvalidToken)` if no ballot
/// in this election carries the token, or an error if the query fails.
pub fn get_ballot_by_token(
    conn: &mut SqliteConnection,
    election_id: i64,
    token: &str,
) -> Result<Ballot, PersistenceError> {
    let result: Result<BallotRow, diesel::result::Error> = ballots::table
        .filter(ballots::election_id.eq(election_id))
        .filter(ballots::token.eq(token))
        .select(BallotRow::as_select())
        .first(conn);

    match result {
        Ok(row) => row.into_domain(),
        Err(diesel::result::Error::NotFound) => {
            Err(PersistenceError::Rule(DomainError::InvalidToken))
        }
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Counts issued ballots and spent ballots for an election.
///
/// # Returns
///
/// A `(ballot_count, votes_cast)` pair.
///
/// # Errors
///
/// Returns an error if a count query fails.
pub fn count_ballots(
    conn: &mut SqliteConnection,
    election_id: i64,
) -> Result<(u64, u64), PersistenceError> {
    let ballot_count: i64 = ballots::table
        .filter(ballots::election_id.eq(election_id))
        .count()
        .get_result(conn)?;

    let votes_cast: i64 = ballots::table
        .filter(ballots::election_id.eq(election_id))
        .filter(ballots::voted_at.is_not_null())
        .count()
        .get_result(conn)?;

    Ok((ballot_count.unsigned_abs(), votes_cast.unsigned_abs()))
}
