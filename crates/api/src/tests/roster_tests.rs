// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{FixedRoster, RosterError, VoterRoster};

#[test]
fn test_roster_accepts_unique_owner_ids() {
    let roster: FixedRoster = FixedRoster::new(vec![
        String::from("unit-101"),
        String::from("unit-102"),
    ])
    .unwrap();

    assert_eq!(roster.owner_ids().len(), 2);
    assert!(roster.contains("unit-101"));
    assert!(!roster.contains("unit-999"));
}

#[test]
fn test_roster_rejects_duplicates() {
    let result = FixedRoster::new(vec![
        String::from("unit-101"),
        String::from("unit-101"),
    ]);

    assert!(matches!(result, Err(RosterError::DuplicateOwner(id)) if id == "unit-101"));
}

#[test]
fn test_roster_rejects_empty_list() {
    let result = FixedRoster::new(Vec::new());
    assert!(matches!(result, Err(RosterError::Empty)));
}

#[test]
fn test_roster_file_skips_blanks_and_comments() {
    let dir: std::path::PathBuf = std::env::temp_dir();
    let path: std::path::PathBuf = dir.join(format!("roster-{}.txt", std::process::id()));
    std::fs::write(&path, "# building A\nunit-101\n\n  unit-102  \n# end\n").unwrap();

    let roster: FixedRoster = FixedRoster::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(
        roster.owner_ids(),
        vec![String::from("unit-101"), String::from("unit-102")]
    );
}
