use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{Result, RsvpError};

/// Opaque identifier of an RSVP, handed to the attendee in their edit link
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn generate() -> Self {
        RecordId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId(id)
    }
}

/// One RSVP entry
///
/// The record set is kept in insertion order; the first inserted record is
/// the "earliest" one when duplicates are reviewed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeRecord {
    /// Assigned at creation, never changes
    pub id: RecordId,

    /// Name of the person who submitted the form
    pub name: String,

    /// Family members or companions coming along
    pub guests: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AttendeeRecord {
    /// Create a record from an already validated submission
    pub fn new(submission: ValidSubmission, at: DateTime<Utc>) -> Self {
        AttendeeRecord {
            id: RecordId::generate(),
            name: submission.name,
            guests: submission.guests,
            created_at: at,
            updated_at: at,
        }
    }

    /// Replace name and guests, refreshing `updated_at`
    pub fn apply(&mut self, submission: ValidSubmission, at: DateTime<Utc>) {
        self.name = submission.name;
        self.guests = submission.guests;
        self.updated_at = at;
    }

    /// Number of people covered by this RSVP, the submitter included
    pub fn party_size(&self) -> usize {
        1 + self.guests.len()
    }
}

/// Raw form input: a name plus the guest inputs, possibly blank
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    #[serde(default)]
    pub guests: Vec<String>,
}

impl Submission {
    pub fn new(name: impl Into<String>, guests: Vec<String>) -> Self {
        Submission {
            name: name.into(),
            guests,
        }
    }

    /// Trim the name and guests, rejecting a blank name
    ///
    /// Blank guest inputs are dropped rather than rejected, the same way the
    /// public form ignores an empty guest row.
    pub fn validate(self) -> Result<ValidSubmission> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(RsvpError::Validation("name is required".to_string()));
        }

        let guests = self
            .guests
            .iter()
            .map(|guest| guest.trim())
            .filter(|guest| !guest.is_empty())
            .map(str::to_string)
            .collect();

        Ok(ValidSubmission {
            name: name.to_string(),
            guests,
        })
    }
}

/// A submission whose name is known to be non-blank
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSubmission {
    name: String,
    guests: Vec<String>,
}

impl ValidSubmission {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn guests(&self) -> &[String] {
        &self.guests
    }
}

/// On-disk shape of a record, tolerant of the first data-file layout
///
/// Early files held `{ name, guests, timestamp }` with no id. Such entries
/// are upgraded by [`StoredRecord::into_record`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredRecord {
    id: Option<RecordId>,
    name: String,
    #[serde(default)]
    guests: Vec<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    timestamp: Option<DateTime<Utc>>,
}

impl StoredRecord {
    /// Turn a stored entry into a record, returning whether it was migrated
    pub(crate) fn into_record(self, index: usize, now: DateTime<Utc>) -> Result<(AttendeeRecord, bool)> {
        if self.name.trim().is_empty() {
            return Err(RsvpError::MalformedRecord {
                index,
                reason: "name is empty".to_string(),
            });
        }
        if self.guests.iter().any(|guest| guest.trim().is_empty()) {
            return Err(RsvpError::MalformedRecord {
                index,
                reason: "guest name is empty".to_string(),
            });
        }

        let migrated = self.id.is_none() || self.created_at.is_none();
        let created_at = self.created_at.or(self.timestamp).unwrap_or(now);
        let record = AttendeeRecord {
            id: self.id.unwrap_or_else(RecordId::generate),
            name: self.name,
            guests: self.guests,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        };

        Ok((record, migrated))
    }
}
