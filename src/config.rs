use std::env;
use std::path::PathBuf;

use crate::error::{Result, RsvpError};

// Defaults
const DATA_FILE: &str = "rsvp_data.json";
const SEARCH_MIN_CHARS: usize = 3;
const SEARCH_LIMIT: usize = 10;

/// Runtime settings for the RSVP book
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// JSON file holding every RSVP
    pub data_file: PathBuf,

    /// Search queries shorter than this (after trimming) return nothing
    pub search_min_chars: usize,

    /// Maximum number of search hits returned
    pub search_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_file: PathBuf::from(DATA_FILE),
            search_min_chars: SEARCH_MIN_CHARS,
            search_limit: SEARCH_LIMIT,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Reads `RSVP_DATA_FILE`, `RSVP_SEARCH_MIN_CHARS` and `RSVP_SEARCH_LIMIT`,
    /// falling back to the defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        Ok(Config {
            data_file: lookup("RSVP_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            search_min_chars: parse_number(&lookup, "RSVP_SEARCH_MIN_CHARS")?
                .unwrap_or(defaults.search_min_chars),
            search_limit: parse_number(&lookup, "RSVP_SEARCH_LIMIT")?
                .unwrap_or(defaults.search_limit),
        })
    }
}

fn parse_number(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<usize>> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| RsvpError::Config(format!("{} must be a non-negative number, got {:?}", key, raw))),
        None => Ok(None),
    }
}
