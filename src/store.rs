//! Persistence for RSVP records.
//!
//! The store owns the record set. Readers get a borrowed snapshot; writers
//! need `&mut` access, so one owner serializes all writes.

use chrono::{DateTime, Utc};
use log::{info, warn};
use std::collections::HashSet;
use std::fs::{self, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::{Result, RsvpError};
use crate::record::{AttendeeRecord, RecordId, StoredRecord, ValidSubmission};

/// The persistence collaborator used by [`crate::book::RsvpBook`]
pub trait RecordStore {
    /// All records in insertion order
    fn list_records(&self) -> &[AttendeeRecord];

    /// Append a new record
    fn insert(&mut self, record: AttendeeRecord) -> Result<()>;

    /// Replace name and guests of an existing record, returning the result
    fn update(&mut self, id: &RecordId, submission: ValidSubmission, at: DateTime<Utc>) -> Result<AttendeeRecord>;

    /// Remove a record, returning what was removed
    fn delete(&mut self, id: &RecordId) -> Result<AttendeeRecord>;

    fn get(&self, id: &RecordId) -> Option<&AttendeeRecord> {
        self.list_records().iter().find(|record| &record.id == id)
    }
}

fn check_unique_id(records: &[AttendeeRecord], record: &AttendeeRecord) -> Result<()> {
    match records.iter().position(|existing| existing.id == record.id) {
        Some(index) => Err(RsvpError::MalformedRecord {
            index,
            reason: format!("id {} is already taken", record.id),
        }),
        None => Ok(()),
    }
}

fn apply_update(
    records: &mut [AttendeeRecord],
    id: &RecordId,
    submission: ValidSubmission,
    at: DateTime<Utc>,
) -> Result<AttendeeRecord> {
    let record = records
        .iter_mut()
        .find(|record| &record.id == id)
        .ok_or_else(|| RsvpError::NotFound(id.to_string()))?;
    record.apply(submission, at);
    Ok(record.clone())
}

fn apply_delete(records: &mut Vec<AttendeeRecord>, id: &RecordId) -> Result<AttendeeRecord> {
    let index = records
        .iter()
        .position(|record| &record.id == id)
        .ok_or_else(|| RsvpError::NotFound(id.to_string()))?;
    Ok(records.remove(index))
}

/// Records kept only in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: Vec<AttendeeRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<AttendeeRecord>) -> Self {
        MemoryStore { records }
    }
}

impl RecordStore for MemoryStore {
    fn list_records(&self) -> &[AttendeeRecord] {
        &self.records
    }

    fn insert(&mut self, record: AttendeeRecord) -> Result<()> {
        check_unique_id(&self.records, &record)?;
        self.records.push(record);
        Ok(())
    }

    fn update(&mut self, id: &RecordId, submission: ValidSubmission, at: DateTime<Utc>) -> Result<AttendeeRecord> {
        apply_update(&mut self.records, id, submission, at)
    }

    fn delete(&mut self, id: &RecordId) -> Result<AttendeeRecord> {
        apply_delete(&mut self.records, id)
    }
}

/// Records kept in a pretty-printed JSON array on disk
///
/// The whole file is rewritten on every change. Writes go to a temporary
/// file next to the data file which is then renamed over it, so readers
/// never see a half-written array. A failed write leaves both the file and
/// the in-memory records untouched.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    records: Vec<AttendeeRecord>,
}

impl JsonFileStore {
    /// Open the data file, creating it as an empty array if it does not exist
    ///
    /// # Errors
    /// * `RsvpError::CorruptStore` if the file is not a JSON array of records
    /// * `RsvpError::MalformedRecord` if a record has a blank name or guest,
    ///   or reuses another record's id
    /// * `RsvpError::Io` if the file cannot be read or created
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                create_dir_all(dir)?;
            }
            fs::write(&path, "[]\n")?;
            info!("created empty RSVP data file {}", path.display());
        }

        let contents = fs::read_to_string(&path)?;
        // An empty file is treated like any other unparsable one; a fresh
        // store always starts out as "[]".
        let stored: Vec<StoredRecord> = serde_json::from_str(&contents).map_err(|source| {
            warn!("refusing to load {}: {}", path.display(), source);
            RsvpError::CorruptStore {
                path: path.clone(),
                source,
            }
        })?;

        let now = Utc::now();
        let mut records = Vec::with_capacity(stored.len());
        let mut seen = HashSet::new();
        let mut migrated = 0;

        for (index, entry) in stored.into_iter().enumerate() {
            let (record, was_migrated) = entry.into_record(index, now)?;
            if !seen.insert(record.id.clone()) {
                return Err(RsvpError::MalformedRecord {
                    index,
                    reason: format!("id {} appears more than once", record.id),
                });
            }
            if was_migrated {
                migrated += 1;
            }
            records.push(record);
        }

        info!("loaded {} RSVP record(s) from {}", records.len(), path.display());
        let store = JsonFileStore { path, records };

        // Ids handed out to legacy records must survive a restart
        if migrated > 0 {
            store.persist(&store.records)?;
            info!("upgraded {} legacy record(s) in {}", migrated, store.path.display());
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, records: &[AttendeeRecord]) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));

        let mut file = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut file, records)?;
        file.write_all(b"\n")?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;

        Ok(())
    }

    /// Run `change` on a copy of the records and keep it only if it persists
    fn commit<T>(&mut self, change: impl FnOnce(&mut Vec<AttendeeRecord>) -> Result<T>) -> Result<T> {
        let mut next = self.records.clone();
        let out = change(&mut next)?;
        self.persist(&next)?;
        self.records = next;
        Ok(out)
    }
}

impl RecordStore for JsonFileStore {
    fn list_records(&self) -> &[AttendeeRecord] {
        &self.records
    }

    fn insert(&mut self, record: AttendeeRecord) -> Result<()> {
        self.commit(|records| {
            check_unique_id(records, &record)?;
            records.push(record);
            Ok(())
        })
    }

    fn update(&mut self, id: &RecordId, submission: ValidSubmission, at: DateTime<Utc>) -> Result<AttendeeRecord> {
        self.commit(|records| apply_update(records, id, submission, at))
    }

    fn delete(&mut self, id: &RecordId) -> Result<AttendeeRecord> {
        self.commit(|records| apply_delete(records, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Submission;

    fn valid(name: &str) -> ValidSubmission {
        Submission::new(name, vec![]).validate().unwrap()
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        let record = AttendeeRecord::new(valid("Siti"), Utc::now());
        let id = record.id.clone();
        store.insert(record).unwrap();

        let updated = store.update(&id, valid("Siti Aminah"), Utc::now()).unwrap();
        assert_eq!(updated.name, "Siti Aminah");
        assert_eq!(store.get(&id).map(|r| r.name.as_str()), Some("Siti Aminah"));

        let removed = store.delete(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(store.list_records().is_empty());
    }

    #[test]
    fn memory_store_rejects_reused_id() {
        let first = AttendeeRecord::new(valid("Budi"), Utc::now());
        let record = AttendeeRecord::new(valid("Siti"), Utc::now());
        let third = AttendeeRecord::new(valid("Dewi"), Utc::now());
        let mut store = MemoryStore::with_records(vec![first, record.clone(), third]);
        // the error points at the record already holding the id
        assert!(matches!(
            store.insert(record),
            Err(RsvpError::MalformedRecord { index: 1, .. })
        ));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut store = MemoryStore::new();
        let missing = RecordId::from("missing");
        assert!(matches!(store.delete(&missing), Err(RsvpError::NotFound(_))));
        assert!(matches!(
            store.update(&missing, valid("Budi"), Utc::now()),
            Err(RsvpError::NotFound(_))
        ));
    }
}
