// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Candidate mutation operations.

use diesel::prelude::*;

use crate::backend::get_last_insert_rowid;
use crate::data_models::NewCandidate;
use crate::diesel_schema::candidates;
use crate::error::PersistenceError;

/// Inserts a new candidate row.
///
/// # Returns
///
/// The ID assigned to the new candidate.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn insert_candidate(
    conn: &mut SqliteConnection,
    record: &NewCandidate,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(candidates::table)
        .values(record)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Deletes a candidate row scoped to its election.
///
/// # Returns
///
/// The number of rows deleted (0 if the candidate did not exist).
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_candidate(
    conn: &mut SqliteConnection,
    election_id: i64,
    candidate_id: i64,
) -> Result<usize, PersistenceError> {
    let deleted: usize = diesel::delete(
        candidates::table
            .filter(candidates::election_id.eq(election_id))
            .filter(candidates::candidate_id.eq(candidate_id)),
    )
    .execute(conn)?;
    Ok(deleted)
}
