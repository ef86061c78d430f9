/*!
# RSVP Desk

Guest-list bookkeeping for an event RSVP form, built in Rust.

## Overview

Attendees submit their name and the names of the family members coming with
them. Entries are stored in a flat JSON file and every entry gets an id the
attendee can use to come back and edit it. The administrator gets a review
list of names that look like typo variants of each other.

## Architecture

### Core (pure, no I/O)
- **similarity** - Case-insensitive Levenshtein distance and the typo judgment
- **duplicates** - Greedy grouping of similar names, earliest entry kept, the rest flagged
- **resolver** - Create-or-edit decision for a submitted name (exact, case-insensitive match)

### Records and persistence
- **record** - `AttendeeRecord`, submission validation, upgrade of legacy entries
- **store** - `RecordStore` trait, JSON file store with atomic rewrites, in-memory store

### Service and tooling
- **book** - `RsvpBook`: submit, update, delete, search, duplicate review, headcount
- **config** - Settings with environment overrides
- **console** - Commands of the `rsvp-admin` prompt
- **error** - `RsvpError`

## Data File

A pretty-printed JSON array, one object per RSVP in insertion order:

```json
[
  {
    "id": "0d6f2f1e-6c3b-4a5e-9d59-8f1f0f3c2a10",
    "name": "Budi Santoso",
    "guests": ["Ani", "Dodi"],
    "createdAt": "2025-01-10T09:00:00Z",
    "updatedAt": "2025-01-10T09:00:00Z"
  }
]
```

## Usage

```
use rsvp::{Config, MemoryStore, RsvpBook, Submission};

let mut book = RsvpBook::new(MemoryStore::new(), Config::default());
book.submit(Submission::new("Budi Santoso", vec!["Ani".to_string()])).unwrap();
book.submit(Submission::new("Budi Santosoo", vec![])).unwrap();

let report = book.review();
assert_eq!(report.groups.len(), 1);
assert_eq!(report.flagged_ids.len(), 1);
```
*/

pub mod book;
pub mod config;
pub mod console;
pub mod duplicates;
pub mod error;
pub mod record;
pub mod resolver;
pub mod similarity;
pub mod store;

/// Re-export the main types to make them easier to use
pub use book::{Headcount, RsvpBook, SearchHit, SubmitOutcome};
pub use config::Config;
pub use duplicates::{GroupMember, SimilarityReport, find_similar_groups};
pub use error::{Result, RsvpError};
pub use record::{AttendeeRecord, RecordId, Submission, ValidSubmission};
pub use resolver::{Decision, resolve};
pub use similarity::{SimilarityRule, distance, is_similar};
pub use store::{JsonFileStore, MemoryStore, RecordStore};
