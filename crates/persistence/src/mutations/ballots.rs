// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ballot issuance.
//!
//! Issuance is idempotent per `(election, owner)`: owners who already hold a
//! ballot are skipped, and the full current ballot set is returned so a
//! re-run against a partially issued roster yields the same view as the
//! first run. The delta runs in one immediate transaction.

use diesel::prelude::*;
use strata_vote_domain::DomainError;
use strata_vote_domain::{Ballot, Election, ElectionStatus, TOKEN_RETRY_BUDGET, new_ballot_token};
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::data_models::{NewBallot, encode_timestamp};
use crate::diesel_schema::ballots;
use crate::error::PersistenceError;
use crate::mutations::elections::settle_election;
use crate::mutations::is_unique_violation_on;
use crate::queries;

/// Issues ballots for the given owners, skipping owners who already hold one.
///
/// # Returns
///
/// The full current ballot set for the election, pre-existing and newly
/// created alike. Re-running with the same roster returns the same set
/// without creating anything.
///
/// # Errors
///
/// * `PersistenceError::Rule(DomainError::ElectionNotFound)` if the election
///   does not exist
/// * `PersistenceError::Rule(DomainError::ElectionClosed)` if the election is
///   effectively closed or archived
/// * `PersistenceError::Rule(DomainError::TokenExhausted)` if token generation
///   keeps colliding past the retry budget
/// * Database errors on any other failure
pub fn issue_ballots(
    conn: &mut SqliteConnection,
    election_id: i64,
    owner_ids: &[String],
    now: OffsetDateTime,
) -> Result<Vec<Ballot>, PersistenceError> {
    // Settle outside the issuance transaction: a lazy close must stay
    // persisted even when the issuance below is rejected.
    settle_election(conn, election_id, now)?;

    conn.immediate_transaction(|conn| {
        let election: Election = queries::elections::get_election(conn, election_id)?;

        let status: ElectionStatus = election.effective_status(now);
        if matches!(status, ElectionStatus::Closed | ElectionStatus::Archived) {
            return Err(PersistenceError::Rule(DomainError::ElectionClosed {
                election_id,
            }));
        }

        let existing: Vec<String> = queries::ballots::list_owner_ids(conn, election_id)?;
        let issued_at: String = encode_timestamp(now)?;
        let mut created: usize = 0;

        for owner_id in owner_ids {
            if existing.iter().any(|held| held == owner_id) {
                debug!(
                    election_id,
                    owner_id, "Owner already holds a ballot, skipping"
                );
                continue;
            }

            insert_ballot_with_retry(conn, election_id, owner_id, &issued_at)?;
            created += 1;
        }

        debug!(
            election_id,
            requested = owner_ids.len(),
            created,
            "Ballot issuance complete"
        );
        queries::ballots::list_ballots(conn, election_id)
    })
}

/// Inserts one ballot, regenerating the token on a token collision.
///
/// A unique violation on `ballots.token` means the generated token already
/// exists somewhere and a fresh one is tried, up to the retry budget.
fn insert_ballot_with_retry(
    conn: &mut SqliteConnection,
    election_id: i64,
    owner_id: &str,
    issued_at: &str,
) -> Result<(), PersistenceError> {
    for _ in 0..TOKEN_RETRY_BUDGET {
        let record: NewBallot = NewBallot {
            election_id,
            owner_id: owner_id.to_string(),
            token: new_ballot_token(),
            issued_at: issued_at.to_string(),
        };

        match diesel::insert_into(ballots::table)
            .values(&record)
            .execute(conn)
        {
            Ok(_) => return Ok(()),
            Err(err) if is_unique_violation_on(&err, "ballots.token") => {
                warn!(election_id, owner_id, "Ballot token collision, retrying");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(PersistenceError::Rule(DomainError::TokenExhausted {
        attempts: TOKEN_RETRY_BUDGET,
    }))
}
