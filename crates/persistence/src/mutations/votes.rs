// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vote recording.
//!
//! The at-most-once guarantee rests on three independent checks, all inside
//! one immediate transaction: the ballot's `voted_at` read, a guarded
//! `UPDATE ... WHERE voted_at IS NULL`, and the unique constraint on
//! `votes.ballot_id`. The constraint is the backstop; the guarded update
//! catches a concurrent spend before the insert is attempted.
//!
//! Rejections are ordered: unknown token, then already-voted, then a closed
//! or not-yet-open window. A caller holding a foreign or mistyped token
//! always sees `InvalidToken`, whatever state the election is in.

use diesel::prelude::*;
use strata_vote_domain::DomainError;
use strata_vote_domain::{Ballot, Choice, Election, VoteReceipt};
use time::OffsetDateTime;
use tracing::debug;

use crate::data_models::{NewVote, encode_timestamp};
use crate::diesel_schema::{ballots, votes};
use crate::error::PersistenceError;
use crate::mutations::elections::settle_election;
use crate::mutations::is_unique_violation_on;
use crate::queries;

/// Records a vote against the ballot identified by `token`.
///
/// The ballot is spent and the vote inserted atomically. After this returns
/// `Ok`, the same token can never record a second vote.
///
/// # Errors
///
/// Checked in this order, so the first failing rule wins:
///
/// * `PersistenceError::Rule(DomainError::ElectionNotFound)` if the election
///   does not exist
/// * `PersistenceError::Rule(DomainError::InvalidToken)` if no ballot in this
///   election carries the token
/// * `PersistenceError::Rule(DomainError::AlreadyVoted)` if the ballot has
///   already been spent
/// * `PersistenceError::Rule(DomainError::ElectionNotOpen)` if the election is
///   not accepting votes at `now`
/// * `PersistenceError::Rule(DomainError::InvalidCandidate)` if the chosen
///   candidate is not on this election's ballot
/// * Database errors on any other failure
pub fn cast_vote(
    conn: &mut SqliteConnection,
    election_id: i64,
    token: &str,
    choice: &Choice,
    now: OffsetDateTime,
) -> Result<VoteReceipt, PersistenceError> {
    // Settle outside the vote transaction: a lazy close must stay persisted
    // even when the vote below is rejected and rolled back.
    settle_election(conn, election_id, now)?;

    conn.immediate_transaction(|conn| {
        let election: Election = queries::elections::get_election(conn, election_id)?;

        let ballot: Ballot = queries::ballots::get_ballot_by_token(conn, election_id, token)?;
        if ballot.has_voted() {
            return Err(PersistenceError::Rule(DomainError::AlreadyVoted));
        }

        if !election.is_open_for_voting(now) {
            return Err(PersistenceError::Rule(DomainError::ElectionNotOpen));
        }

        let candidate_id: Option<i64> = match choice {
            Choice::Candidate(candidate_id) => {
                if queries::elections::get_candidate(conn, election_id, *candidate_id)?.is_none() {
                    return Err(PersistenceError::Rule(DomainError::InvalidCandidate {
                        candidate_id: *candidate_id,
                        election_id,
                    }));
                }
                Some(*candidate_id)
            }
            Choice::WriteIn(_) => None,
        };

        let voted_at: String = encode_timestamp(now)?;

        // Guarded spend: zero rows means the ballot was spent since the read.
        let spent: usize = diesel::update(
            ballots::table
                .filter(ballots::ballot_id.eq(ballot.ballot_id))
                .filter(ballots::voted_at.is_null()),
        )
        .set(ballots::voted_at.eq(&voted_at))
        .execute(conn)?;
        if spent == 0 {
            return Err(PersistenceError::Rule(DomainError::AlreadyVoted));
        }

        let record: NewVote = NewVote {
            election_id,
            ballot_id: ballot.ballot_id,
            candidate_id,
            write_in: match choice {
                Choice::WriteIn(text) => Some(text.clone()),
                Choice::Candidate(_) => None,
            },
            voted_at: voted_at.clone(),
        };

        if let Err(err) = diesel::insert_into(votes::table).values(&record).execute(conn) {
            if is_unique_violation_on(&err, "votes.ballot_id") {
                return Err(PersistenceError::Rule(DomainError::AlreadyVoted));
            }
            return Err(err.into());
        }

        debug!(election_id, ballot_id = ballot.ballot_id, "Vote recorded");
        Ok(VoteReceipt {
            election_id,
            voted_at: now,
        })
    })
}
