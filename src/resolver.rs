use crate::error::{Result, RsvpError};
use crate::record::AttendeeRecord;
use crate::similarity::names_equal;

/// What to do with an incoming submission
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision<'a> {
    /// Someone already registered under this name; load it for editing
    ExactMatch(&'a AttendeeRecord),
    /// Nobody by this name yet; insert a new record
    NoMatch,
}

/// Decide between "insert" and "load the existing entry for editing"
///
/// Both sides are trimmed and compared ignoring case; the earliest matching
/// record wins. Near misses are deliberately not matched here, they only
/// show up in the admin duplicate review.
///
/// # Errors
/// * `RsvpError::Validation` when `submitted_name` is blank
pub fn resolve<'a>(submitted_name: &str, records: &'a [AttendeeRecord]) -> Result<Decision<'a>> {
    let wanted = submitted_name.trim();
    if wanted.is_empty() {
        return Err(RsvpError::Validation("name is required".to_string()));
    }

    Ok(records
        .iter()
        .find(|record| names_equal(record.name.trim(), wanted))
        .map_or(Decision::NoMatch, Decision::ExactMatch))
}
