// Copyright (C) 2026 Strata Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV export of election results.
//!
//! The export is a self-contained results sheet: candidate rows ordered by
//! vote count (ties broken by candidate ID), one aggregate write-in row,
//! and summary rows for ballots, turnout, and abstentions. It is valid at
//! any point in the election's life; before any votes it simply reports
//! zeros.

use strata_vote_persistence::Persistence;

use crate::error::{ApiError, translate_persistence_error};

/// Renders an election's results as CSV.
///
/// # Errors
///
/// Returns an error if the election does not exist or the CSV cannot be
/// assembled.
pub fn export_results_csv(
    persistence: &mut Persistence,
    election_id: i64,
) -> Result<String, ApiError> {
    let stats = persistence
        .compute_stats(election_id)
        .map_err(translate_persistence_error)?;

    let mut results = stats.results;
    results.sort_by(|a, b| {
        b.votes
            .cmp(&a.votes)
            .then_with(|| a.candidate_id.cmp(&b.candidate_id))
    });

    let mut writer = csv::Writer::from_writer(Vec::new());
    write_row(&mut writer, &["name", "votes"])?;

    for tally in &results {
        write_row(&mut writer, &[&tally.display_name, &tally.votes.to_string()])?;
    }

    write_row(&mut writer, &["write_ins", &stats.write_in_count.to_string()])?;
    write_row(&mut writer, &["ballots_issued", &stats.ballot_count.to_string()])?;
    write_row(&mut writer, &["votes_cast", &stats.votes_cast.to_string()])?;
    write_row(&mut writer, &["abstentions", &stats.abstentions.to_string()])?;
    write_row(
        &mut writer,
        &["turnout_percent", &format!("{:.2}", stats.turnout_percent)],
    )?;

    let bytes: Vec<u8> = writer.into_inner().map_err(|err| ApiError::Internal {
        message: format!("Failed to assemble CSV: {err}"),
    })?;
    String::from_utf8(bytes).map_err(|err| ApiError::Internal {
        message: format!("CSV output was not valid UTF-8: {err}"),
    })
}

fn write_row(writer: &mut csv::Writer<Vec<u8>>, fields: &[&str]) -> Result<(), ApiError> {
    writer.write_record(fields).map_err(|err| ApiError::Internal {
        message: format!("Failed to write CSV row: {err}"),
    })
}
