// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation operations.
//!
//! Compound mutations (vote recording, ballot issuance) own their own
//! transactions; single-row primitives run on the caller's connection.

pub mod ballots;
pub mod candidates;
pub mod elections;
pub mod votes;

use diesel::result::DatabaseErrorKind;

/// Whether `err` is a unique constraint violation mentioning `needle`.
///
/// `SQLite` reports the violated columns in the error message
/// (e.g. `UNIQUE constraint failed: ballots.token`), which is the only
/// way to tell a token collision apart from a duplicate-owner insert.
pub(crate) fn is_unique_violation_on(err: &diesel::result::Error, needle: &str) -> bool {
    matches!(
        err,
        diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
            if info.message().contains(needle)
    )
}
