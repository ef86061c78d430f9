use chrono::Utc;
use log::{debug, info};
use serde::Serialize;

use crate::config::Config;
use crate::duplicates::{SimilarityReport, find_similar_groups};
use crate::error::{Result, RsvpError};
use crate::record::{AttendeeRecord, RecordId, Submission};
use crate::resolver::{Decision, resolve};
use crate::store::{JsonFileStore, RecordStore};

/// Outcome of a public form submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A new RSVP was stored
    Created(AttendeeRecord),
    /// The name was already registered; nothing was stored and the existing
    /// entry is returned so the attendee can edit it
    Existing(AttendeeRecord),
}

impl SubmitOutcome {
    pub fn record(&self) -> &AttendeeRecord {
        match self {
            SubmitOutcome::Created(record) | SubmitOutcome::Existing(record) => record,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, SubmitOutcome::Existing(_))
    }
}

/// A row of the search-as-you-type dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: RecordId,
    pub name: String,
    pub guest_count: usize,
}

/// Totals for the admin overview
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Headcount {
    /// Number of RSVP entries
    pub rsvps: usize,
    /// Guests listed across all entries
    pub guests: usize,
    /// Submitters plus guests
    pub attendees: usize,
}

/// The RSVP book: validation, create-or-edit decisions and admin queries on
/// top of a [`RecordStore`]
pub struct RsvpBook<S: RecordStore> {
    store: S,
    config: Config,
}

impl RsvpBook<JsonFileStore> {
    /// Open the book backed by the data file named in `config`
    pub fn open(config: Config) -> Result<Self> {
        let store = JsonFileStore::open(&config.data_file)?;
        Ok(RsvpBook::new(store, config))
    }
}

impl<S: RecordStore> RsvpBook<S> {
    pub fn new(store: S, config: Config) -> Self {
        RsvpBook { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn list(&self) -> &[AttendeeRecord] {
        self.store.list_records()
    }

    pub fn get(&self, id: &RecordId) -> Result<&AttendeeRecord> {
        self.store
            .get(id)
            .ok_or_else(|| RsvpError::NotFound(id.to_string()))
    }

    /// Handle a public form submission
    ///
    /// If someone already registered under the same name (ignoring case and
    /// surrounding whitespace) the existing entry is returned untouched;
    /// otherwise a new entry is stored.
    pub fn submit(&mut self, submission: Submission) -> Result<SubmitOutcome> {
        let submission = submission.validate()?;

        if let Decision::ExactMatch(existing) = resolve(submission.name(), self.store.list_records())? {
            info!("submission for {:?} matches existing RSVP {}", submission.name(), existing.id);
            return Ok(SubmitOutcome::Existing(existing.clone()));
        }

        let record = AttendeeRecord::new(submission, Utc::now());
        self.store.insert(record.clone())?;
        info!(
            "stored RSVP {} for {:?} with {} guest(s)",
            record.id,
            record.name,
            record.guests.len()
        );

        Ok(SubmitOutcome::Created(record))
    }

    /// Edit an existing entry through its edit link
    pub fn update(&mut self, id: &RecordId, submission: Submission) -> Result<AttendeeRecord> {
        let submission = submission.validate()?;
        let record = self.store.update(id, submission, Utc::now())?;
        info!("updated RSVP {}", id);
        Ok(record)
    }

    /// Remove an entry (admin action)
    pub fn delete(&mut self, id: &RecordId) -> Result<AttendeeRecord> {
        let record = self.store.delete(id)?;
        info!("deleted RSVP {} ({:?})", id, record.name);
        Ok(record)
    }

    /// Find entries whose name contains `query`, ignoring case
    ///
    /// The query is trimmed first; anything shorter than the configured
    /// minimum returns no hits.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let query = query.trim();
        if query.chars().count() < self.config.search_min_chars || query.is_empty() {
            return Vec::new();
        }

        let needle = query.to_lowercase();
        self.store
            .list_records()
            .iter()
            .filter(|record| record.name.to_lowercase().contains(&needle))
            .take(self.config.search_limit)
            .map(|record| SearchHit {
                id: record.id.clone(),
                name: record.name.clone(),
                guest_count: record.guests.len(),
            })
            .collect()
    }

    /// Likely-duplicate names for the admin to review
    pub fn review(&self) -> SimilarityReport {
        let records = self.store.list_records();
        let report = find_similar_groups(records);
        debug!(
            "duplicate review: {} record(s), {} group(s), {} flagged",
            records.len(),
            report.groups.len(),
            report.flagged_ids.len()
        );
        report
    }

    pub fn headcount(&self) -> Headcount {
        let records = self.store.list_records();
        let guests = records.iter().map(|record| record.guests.len()).sum::<usize>();
        Headcount {
            rsvps: records.len(),
            guests,
            attendees: records.len() + guests,
        }
    }
}
