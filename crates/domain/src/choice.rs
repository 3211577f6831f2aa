// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The voter's choice: a listed candidate or a write-in.
//!
//! The API boundary accepts `candidate_id` and `write_in` as independent
//! optional fields; this module enforces that exactly one is provided and
//! normalizes write-in text before it reaches the vote recorder.

use crate::error::DomainError;

/// Maximum length of a write-in, in characters, after trimming.
pub const WRITE_IN_MAX_LENGTH: usize = 200;

/// A validated vote choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// A vote for a listed candidate.
    Candidate(i64),
    /// A free-text write-in, trimmed and length-capped.
    WriteIn(String),
}

impl Choice {
    /// Builds a `Choice` from the two optional API fields.
    ///
    /// Write-in text is trimmed first; text that is empty after trimming is
    /// treated as absent. Exactly one of the two fields must then remain.
    ///
    /// # Errors
    ///
    /// * `DomainError::NoSelection` if neither field is provided, or both are
    /// * `DomainError::WriteInTooLong` if the trimmed write-in exceeds
    ///   `WRITE_IN_MAX_LENGTH` characters
    pub fn from_parts(
        candidate_id: Option<i64>,
        write_in: Option<&str>,
    ) -> Result<Self, DomainError> {
        let write_in: Option<&str> = write_in.map(str::trim).filter(|text| !text.is_empty());

        match (candidate_id, write_in) {
            (Some(_), Some(_)) | (None, None) => Err(DomainError::NoSelection),
            (Some(candidate_id), None) => Ok(Self::Candidate(candidate_id)),
            (None, Some(text)) => {
                let length: usize = text.chars().count();
                if length > WRITE_IN_MAX_LENGTH {
                    return Err(DomainError::WriteInTooLong {
                        length,
                        max: WRITE_IN_MAX_LENGTH,
                    });
                }
                Ok(Self::WriteIn(text.to_string()))
            }
        }
    }
}
