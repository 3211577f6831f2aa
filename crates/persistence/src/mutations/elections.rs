// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Election mutation operations.

use diesel::prelude::*;
use strata_vote_domain::{Election, ElectionStatus};
use time::OffsetDateTime;
use tracing::debug;

use crate::backend::get_last_insert_rowid;
use crate::data_models::{NewElection, encode_timestamp};
use crate::diesel_schema::elections;
use crate::error::PersistenceError;
use crate::queries;

/// Inserts a new election row.
///
/// # Returns
///
/// The ID assigned to the new election.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn insert_election(
    conn: &mut SqliteConnection,
    record: &NewElection,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(elections::table)
        .values(record)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Replaces the editable metadata of an election.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_election_metadata(
    conn: &mut SqliteConnection,
    election_id: i64,
    title: &str,
    description: Option<&str>,
    opens_at: Option<OffsetDateTime>,
    closes_at: Option<OffsetDateTime>,
    updated_at: OffsetDateTime,
) -> Result<(), PersistenceError> {
    let opens_at: Option<String> = opens_at.map(encode_timestamp).transpose()?;
    let closes_at: Option<String> = closes_at.map(encode_timestamp).transpose()?;

    diesel::update(elections::table.filter(elections::election_id.eq(election_id)))
        .set((
            elections::title.eq(title),
            elections::description.eq(description),
            elections::opens_at.eq(opens_at),
            elections::closes_at.eq(closes_at),
            elections::updated_at.eq(encode_timestamp(updated_at)?),
        ))
        .execute(conn)?;
    Ok(())
}

/// Sets the persisted lifecycle status of an election.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn set_election_status(
    conn: &mut SqliteConnection,
    election_id: i64,
    status: ElectionStatus,
    updated_at: OffsetDateTime,
) -> Result<(), PersistenceError> {
    diesel::update(elections::table.filter(elections::election_id.eq(election_id)))
        .set((
            elections::status.eq(status.as_str()),
            elections::updated_at.eq(encode_timestamp(updated_at)?),
        ))
        .execute(conn)?;
    Ok(())
}

/// Persists a lazy close if the stored status has fallen behind.
///
/// An election stored as `Open` whose `closes_at` has elapsed is effectively
/// `Closed`; this advances the row so stored and effective status agree.
/// The passed `election` is updated in place to the settled state.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn settle_election_status(
    conn: &mut SqliteConnection,
    election: &mut Election,
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    if election.status == ElectionStatus::Open
        && election.effective_status(now) == ElectionStatus::Closed
    {
        debug!(
            election_id = election.election_id,
            "Persisting lazy close: voting window has elapsed"
        );
        set_election_status(conn, election.election_id, ElectionStatus::Closed, now)?;
        election.status = ElectionStatus::Closed;
        election.updated_at = now;
    }
    Ok(())
}

/// Loads an election and persists a lazy close in its own transaction.
///
/// Settling must commit independently of whatever operation follows: a vote
/// or issuance that is rejected afterwards rolls back its own transaction,
/// and the close must survive that rollback.
///
/// # Errors
///
/// Returns a rule error if the election does not exist, or an error if the
/// settle update fails.
pub fn settle_election(
    conn: &mut SqliteConnection,
    election_id: i64,
    now: OffsetDateTime,
) -> Result<Election, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let mut election: Election = queries::elections::get_election(conn, election_id)?;
        settle_election_status(conn, &mut election, now)?;
        Ok(election)
    })
}
