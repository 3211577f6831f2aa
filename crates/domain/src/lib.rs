// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and rules for the Strata Vote election engine.
//!
//! This crate is pure: no I/O, no database, no HTTP. It defines the
//! election lifecycle state machine, ballots and their one-time tokens,
//! the vote choice variant, tally computation, and the clock abstraction
//! that keeps time-dependent rules testable.

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

mod ballot;
mod candidate;
mod choice;
mod clock;
mod election;
mod error;
mod tally;
mod token;

#[cfg(test)]
mod tests;

pub use ballot::{Ballot, VoteReceipt};
pub use candidate::{Candidate, validate_display_name};
pub use choice::{Choice, WRITE_IN_MAX_LENGTH};
pub use clock::{Clock, FixedClock, SystemClock};
pub use election::{Election, ElectionStatus, validate_title, validate_window};
pub use error::DomainError;
pub use tally::{CandidateTally, ElectionStats};
pub use token::{TOKEN_LENGTH, TOKEN_RETRY_BUDGET, new_ballot_token};
