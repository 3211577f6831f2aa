// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ballot token generation.
//!
//! Tokens are bearer credentials: possession of the token is the
//! authorization to vote. They are drawn from the thread-local CSPRNG and
//! contain no owner, election, or ordering component.

use rand::RngExt;
use rand::distr::Alphanumeric;

/// Token length in alphanumeric characters.
///
/// 26 characters over a 62-symbol alphabet carry just over 154 bits of
/// entropy, comfortably above the 128-bit requirement.
pub const TOKEN_LENGTH: usize = 26;

/// How many times issuance retries on a token uniqueness collision before
/// failing with `DomainError::TokenExhausted`.
pub const TOKEN_RETRY_BUDGET: usize = 5;

/// Generates a fresh ballot token.
///
/// The result is URL-safe and globally unguessable. Uniqueness is enforced
/// by the database at insert time, not here; callers retry on collision.
#[must_use]
pub fn new_ballot_token() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}
