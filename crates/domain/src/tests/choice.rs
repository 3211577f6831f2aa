// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Choice, DomainError, WRITE_IN_MAX_LENGTH};

#[test]
fn test_candidate_selection_is_accepted() {
    let choice: Choice = Choice::from_parts(Some(7), None).unwrap();
    assert_eq!(choice, Choice::Candidate(7));
}

#[test]
fn test_write_in_is_trimmed() {
    let choice: Choice = Choice::from_parts(None, Some("  Jane Doe  ")).unwrap();
    assert_eq!(choice, Choice::WriteIn(String::from("Jane Doe")));
}

#[test]
fn test_neither_field_is_rejected() {
    let result: Result<Choice, DomainError> = Choice::from_parts(None, None);
    assert!(matches!(result, Err(DomainError::NoSelection)));
}

#[test]
fn test_both_fields_are_rejected() {
    let result: Result<Choice, DomainError> =
        Choice::from_parts(Some(7), Some("Jane Doe"));
    assert!(matches!(result, Err(DomainError::NoSelection)));
}

#[test]
fn test_whitespace_only_write_in_counts_as_absent() {
    let result: Result<Choice, DomainError> = Choice::from_parts(None, Some("   "));
    assert!(matches!(result, Err(DomainError::NoSelection)));

    // A candidate id alongside blank write-in text is a plain candidate vote.
    let choice: Choice = Choice::from_parts(Some(3), Some("   ")).unwrap();
    assert_eq!(choice, Choice::Candidate(3));
}

#[test]
fn test_write_in_at_length_cap_is_accepted() {
    let text: String = "a".repeat(WRITE_IN_MAX_LENGTH);
    let choice: Choice = Choice::from_parts(None, Some(&text)).unwrap();
    assert_eq!(choice, Choice::WriteIn(text));
}

#[test]
fn test_write_in_over_length_cap_is_rejected() {
    let text: String = "a".repeat(WRITE_IN_MAX_LENGTH + 1);
    let result: Result<Choice, DomainError> = Choice::from_parts(None, Some(&text));
    assert!(matches!(
        result,
        Err(DomainError::WriteInTooLong { length, max })
            if length == WRITE_IN_MAX_LENGTH + 1 && max == WRITE_IN_MAX_LENGTH
    ));
}

#[test]
fn test_write_in_cap_counts_characters_not_bytes() {
    // Multibyte characters: 200 of these are 600 bytes but 200 chars.
    let text: String = "é".repeat(WRITE_IN_MAX_LENGTH);
    let choice: Choice = Choice::from_parts(None, Some(&text)).unwrap();
    assert_eq!(choice, Choice::WriteIn(text));
}
