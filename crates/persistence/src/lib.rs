// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Strata Vote engine.
//!
//! This crate provides `SQLite` persistence for elections, candidates,
//! ballots, and votes, built on Diesel with embedded migrations.
//!
//! ## Consistency model
//!
//! Votes are the only contended write path. `cast_vote` runs inside an
//! immediate transaction that re-checks the ballot and election under the
//! write lock, and the `votes.ballot_id` unique constraint backstops the
//! at-most-once guarantee even if every in-code check is bypassed.
//!
//! Ballot issuance is idempotent per `(election, owner)` and returns the
//! full current ballot set, so an interrupted issuance run can simply be
//! repeated.
//!
//! ## Testing
//!
//! Standard tests run against unique shared in-memory databases; no
//! external infrastructure is required.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

use strata_vote_domain::{
    Ballot, Candidate, Choice, DomainError, Election, ElectionStats, ElectionStatus, VoteReceipt,
    validate_display_name, validate_title, validate_window,
};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based collisions.
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for elections, candidates, ballots, and votes.
///
/// All access goes through this adapter; callers never see the connection.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// This is a startup-time check required to ensure
    /// referential integrity constraints are enforced.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Elections
    // ========================================================================

    /// Creates a new election in `Draft` status.
    ///
    /// # Errors
    ///
    /// Returns a rule error if the title is empty or the voting window is
    /// inverted, or a database error if the insert fails.
    pub fn create_election(
        &mut self,
        title: &str,
        description: Option<&str>,
        opens_at: Option<OffsetDateTime>,
        closes_at: Option<OffsetDateTime>,
        now: OffsetDateTime,
    ) -> Result<Election, PersistenceError> {
        validate_title(title)?;
        validate_window(opens_at, closes_at)?;

        let created_at: String = data_models::encode_timestamp(now)?;
        let record: data_models::NewElection = data_models::NewElection {
            title: title.to_string(),
            description: description.map(ToString::to_string),
            status: ElectionStatus::Draft.as_str().to_string(),
            opens_at: opens_at.map(data_models::encode_timestamp).transpose()?,
            closes_at: closes_at.map(data_models::encode_timestamp).transpose()?,
            created_at: created_at.clone(),
            updated_at: created_at,
        };

        let election_id: i64 = mutations::elections::insert_election(&mut self.conn, &record)?;
        queries::elections::get_election(&mut self.conn, election_id)
    }

    /// Replaces the metadata of an editable election.
    ///
    /// Only `Draft` and `Scheduled` elections may be edited; once voting can
    /// have started, the ballot must not change under the voters.
    ///
    /// # Errors
    ///
    /// Returns a rule error if the election does not exist, is no longer
    /// editable, or the new metadata is invalid.
    pub fn update_election(
        &mut self,
        election_id: i64,
        title: &str,
        description: Option<&str>,
        opens_at: Option<OffsetDateTime>,
        closes_at: Option<OffsetDateTime>,
        now: OffsetDateTime,
    ) -> Result<Election, PersistenceError> {
        let election: Election = queries::elections::get_election(&mut self.conn, election_id)?;
        let status: ElectionStatus = election.effective_status(now);
        if !status.is_editable() {
            return Err(PersistenceError::Rule(DomainError::ElectionNotEditable {
                status,
            }));
        }

        validate_title(title)?;
        validate_window(opens_at, closes_at)?;

        mutations::elections::update_election_metadata(
            &mut self.conn,
            election_id,
            title,
            description,
            opens_at,
            closes_at,
            now,
        )?;
        queries::elections::get_election(&mut self.conn, election_id)
    }

    /// Moves an election to a new lifecycle status.
    ///
    /// The transition is validated against the effective status at `now`, so
    /// an election whose window already elapsed cannot be re-opened through a
    /// stale `Open` row.
    ///
    /// # Errors
    ///
    /// Returns a rule error if the election does not exist or the lifecycle
    /// does not permit the transition.
    pub fn transition_election(
        &mut self,
        election_id: i64,
        to: ElectionStatus,
        now: OffsetDateTime,
    ) -> Result<Election, PersistenceError> {
        let election: Election =
            mutations::elections::settle_election(&mut self.conn, election_id, now)?;
        election.validate_transition(to, now)?;

        mutations::elections::set_election_status(&mut self.conn, election_id, to, now)?;
        queries::elections::get_election(&mut self.conn, election_id)
    }

    /// Retrieves an election by ID.
    ///
    /// # Errors
    ///
    /// Returns a rule error if the election does not exist.
    pub fn get_election(&mut self, election_id: i64) -> Result<Election, PersistenceError> {
        queries::elections::get_election(&mut self.conn, election_id)
    }

    /// Retrieves all elections, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_elections(&mut self) -> Result<Vec<Election>, PersistenceError> {
        queries::elections::list_elections(&mut self.conn)
    }

    // ========================================================================
    // Candidates
    // ========================================================================

    /// Adds a candidate to an editable election.
    ///
    /// # Errors
    ///
    /// Returns a rule error if the election does not exist, is no longer
    /// editable, or the display name is empty.
    pub fn add_candidate(
        &mut self,
        election_id: i64,
        display_name: &str,
        statement: Option<&str>,
        owner_id: Option<&str>,
        now: OffsetDateTime,
    ) -> Result<Candidate, PersistenceError> {
        let election: Election = queries::elections::get_election(&mut self.conn, election_id)?;
        let status: ElectionStatus = election.effective_status(now);
        if !status.is_editable() {
            return Err(PersistenceError::Rule(DomainError::ElectionNotEditable {
                status,
            }));
        }

        validate_display_name(display_name)?;

        let record: data_models::NewCandidate = data_models::NewCandidate {
            election_id,
            display_name: display_name.to_string(),
            statement: statement.map(ToString::to_string),
            owner_id: owner_id.map(ToString::to_string),
        };
        let candidate_id: i64 =
            mutations::candidates::insert_candidate(&mut self.conn, &record)?;

        Ok(Candidate {
            candidate_id,
            election_id,
            display_name: record.display_name,
            statement: record.statement,
            owner_id: record.owner_id,
        })
    }

    /// Removes a candidate from an editable election.
    ///
    /// # Errors
    ///
    /// Returns a rule error if the election does not exist, is no longer
    /// editable, or the candidate is not on its ballot.
    pub fn delete_candidate(
        &mut self,
        election_id: i64,
        candidate_id: i64,
        now: OffsetDateTime,
    ) -> Result<(), PersistenceError> {
        let election: Election = queries::elections::get_election(&mut self.conn, election_id)?;
        let status: ElectionStatus = election.effective_status(now);
        if !status.is_editable() {
            return Err(PersistenceError::Rule(
                DomainError::CandidateNotDeletable { status },
            ));
        }

        let deleted: usize =
            mutations::candidates::delete_candidate(&mut self.conn, election_id, candidate_id)?;
        if deleted == 0 {
            return Err(PersistenceError::Rule(DomainError::InvalidCandidate {
                candidate_id,
                election_id,
            }));
        }
        Ok(())
    }

    /// Retrieves all candidates for an election, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_candidates(
        &mut self,
        election_id: i64,
    ) -> Result<Vec<Candidate>, PersistenceError> {
        queries::elections::list_candidates(&mut self.conn, election_id)
    }

    // ========================================================================
    // Ballots
    // ========================================================================

    /// Issues ballots for the given owners, skipping owners who already hold
    /// one. Returns the full current ballot set, pre-existing ballots
    /// included.
    ///
    /// # Errors
    ///
    /// Returns a rule error if the election does not exist, is effectively
    /// closed or archived, or token generation exhausts its retry budget.
    pub fn issue_ballots(
        &mut self,
        election_id: i64,
        owner_ids: &[String],
        now: OffsetDateTime,
    ) -> Result<Vec<Ballot>, PersistenceError> {
        mutations::ballots::issue_ballots(&mut self.conn, election_id, owner_ids, now)
    }

    /// Retrieves all ballots for an election, in issuance order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_ballots(&mut self, election_id: i64) -> Result<Vec<Ballot>, PersistenceError> {
        queries::ballots::list_ballots(&mut self.conn, election_id)
    }

    /// Retrieves the ballot carrying `token` within an election.
    ///
    /// # Errors
    ///
    /// Returns a rule error if no ballot in this election carries the token.
    pub fn get_ballot_by_token(
        &mut self,
        election_id: i64,
        token: &str,
    ) -> Result<Ballot, PersistenceError> {
        queries::ballots::get_ballot_by_token(&mut self.conn, election_id, token)
    }

    // ========================================================================
    // Votes & Tally
    // ========================================================================

    /// Records a vote against the ballot identified by `token`.
    ///
    /// # Errors
    ///
    /// Returns a rule error if the election is not open, the token is
    /// unknown, the ballot is already spent, or the chosen candidate is not
    /// on this election's ballot.
    pub fn cast_vote(
        &mut self,
        election_id: i64,
        token: &str,
        choice: &Choice,
        now: OffsetDateTime,
    ) -> Result<VoteReceipt, PersistenceError> {
        mutations::votes::cast_vote(&mut self.conn, election_id, token, choice, now)
    }

    /// Computes on-demand statistics for an election.
    ///
    /// # Errors
    ///
    /// Returns a rule error if the election does not exist.
    pub fn compute_stats(&mut self, election_id: i64) -> Result<ElectionStats, PersistenceError> {
        queries::tally::compute_stats(&mut self.conn, election_id)
    }

    /// Lists the distinct write-in texts for an election with their counts,
    /// most popular first.
    ///
    /// # Errors
    ///
    /// Returns a rule error if the election does not exist.
    pub fn list_write_ins(
        &mut self,
        election_id: i64,
    ) -> Result<Vec<(String, u64)>, PersistenceError> {
        queries::tally::list_write_ins(&mut self.conn, election_id)
    }
}
