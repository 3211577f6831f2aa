// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diesel row structs and storage encoding helpers.
//!
//! Timestamps are stored as RFC 3339 text in UTC; statuses as lowercase
//! strings. Decoding failures surface as `SerializationError` rather than
//! panicking, since a corrupt row must not take the service down.

use diesel::prelude::*;
use strata_vote_domain::{Ballot, Candidate, Election, ElectionStatus};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::diesel_schema::{ballots, candidates, elections, votes};
use crate::error::PersistenceError;

/// Encodes an instant as RFC 3339 text for storage.
///
/// # Errors
///
/// Returns an error if the instant cannot be formatted.
pub fn encode_timestamp(instant: OffsetDateTime) -> Result<String, PersistenceError> {
    Ok(instant.format(&Rfc3339)?)
}

/// Decodes an RFC 3339 timestamp from storage.
///
/// # Errors
///
/// Returns an error if the stored text is not valid RFC 3339.
pub fn decode_timestamp(text: &str) -> Result<OffsetDateTime, PersistenceError> {
    Ok(OffsetDateTime::parse(text, &Rfc3339)?)
}

fn decode_optional_timestamp(
    text: Option<&str>,
) -> Result<Option<OffsetDateTime>, PersistenceError> {
    text.map(decode_timestamp).transpose()
}

/// Diesel Queryable struct for election rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = elections)]
pub struct ElectionRow {
    pub election_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub opens_at: Option<String>,
    pub closes_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ElectionRow {
    /// Converts a stored row into the domain aggregate.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored status or a timestamp cannot be decoded.
    pub fn into_domain(self) -> Result<Election, PersistenceError> {
        let status: ElectionStatus = self
            .status
            .parse()
            .map_err(|err: strata_vote_domain::DomainError| {
                PersistenceError::SerializationError(err.to_string())
            })?;

        Ok(Election {
            election_id: self.election_id,
            title: self.title,
            description: self.description,
            status,
            opens_at: decode_optional_timestamp(self.opens_at.as_deref())?,
            closes_at: decode_optional_timestamp(self.closes_at.as_deref())?,
            created_at: decode_timestamp(&self.created_at)?,
            updated_at: decode_timestamp(&self.updated_at)?,
        })
    }
}

/// Insertable struct for new elections.
#[derive(Insertable)]
#[diesel(table_name = elections)]
pub struct NewElection {
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub opens_at: Option<String>,
    pub closes_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Diesel Queryable struct for candidate rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = candidates)]
pub struct CandidateRow {
    pub candidate_id: i64,
    pub election_id: i64,
    pub display_name: String,
    pub statement: Option<String>,
    pub owner_id: Option<String>,
}

impl From<CandidateRow> for Candidate {
    fn from(row: CandidateRow) -> Self {
        Self {
            candidate_id: row.candidate_id,
            election_id: row.election_id,
            display_name: row.display_name,
            statement: row.statement,
            owner_id: row.owner_id,
        }
    }
}

/// Insertable struct for new candidates.
#[derive(Insertable)]
#[diesel(table_name = candidates)]
pub struct NewCandidate {
    pub election_id: i64,
    pub display_name: String,
    pub statement: Option<String>,
    pub owner_id: Option<String>,
}

/// Diesel Queryable struct for ballot rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = ballots)]
pub struct BallotRow {
    pub ballot_id: i64,
    pub election_id: i64,
    pub owner_id: String,
    pub token: String,
    pub issued_at: String,
    pub voted_at: Option<String>,
}

impl BallotRow {
    /// Converts a stored row into the domain ballot.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored timestamp cannot be decoded.
    pub fn into_domain(self) -> Result<Ballot, PersistenceError> {
        Ok(Ballot {
            ballot_id: self.ballot_id,
            election_id: self.election_id,
            owner_id: self.owner_id,
            token: self.token,
            issued_at: decode_timestamp(&self.issued_at)?,
            voted_at: decode_optional_timestamp(self.voted_at.as_deref())?,
        })
    }
}

/// Insertable struct for new ballots.
#[derive(Insertable)]
#[diesel(table_name = ballots)]
pub struct NewBallot {
    pub election_id: i64,
    pub owner_id: String,
    pub token: String,
    pub issued_at: String,
}

/// Diesel Queryable struct for vote rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = votes)]
pub struct VoteRow {
    pub vote_id: i64,
    pub election_id: i64,
    pub ballot_id: i64,
    pub candidate_id: Option<i64>,
    pub write_in: Option<String>,
    pub voted_at: String,
}

/// Insertable struct for new votes.
#[derive(Insertable)]
#[diesel(table_name = votes)]
pub struct NewVote {
    pub election_id: i64,
    pub ballot_id: i64,
    pub candidate_id: Option<i64>,
    pub write_in: Option<String>,
    pub voted_at: String,
}
