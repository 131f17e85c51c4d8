//! Country electrical profiles.
//!
//! The dataset is a JSON object keyed by uppercase ISO-3166 alpha-2 code:
//!
//! ```json
//! {
//!   "ES": { "name": "España", "plugs": ["C", "F"], "voltage": "230 V", "frequency": "50 Hz" },
//!   "US": { "name": "Estados Unidos", "plugs": ["A", "B"], "voltage": "120 V", "frequency": "60 Hz" }
//! }
//! ```
//!
//! Entries are validated once at load time and the resulting [`Dataset`] is
//! immutable. Route resolution, compatibility and metadata all read from it;
//! nothing downstream ever sees a half-filled profile.
//!
//! ## Validation
//!
//! - Keys must be exactly two uppercase ASCII letters.
//! - `name` and `voltage` must not be blank.
//! - `plugs` must contain at least one non-blank tag. Duplicate tags are
//!   collapsed, keeping the first occurrence so display order is stable.
//! - Missing or unknown fields are rejected by the JSON layer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid country code {0:?}: expected two uppercase ASCII letters")]
    InvalidCode(String),
    #[error("Invalid entry {code}: {reason}")]
    InvalidEntry { code: String, reason: String },
}

/// One country entry exactly as it appears in `countries.json`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEntry {
    name: String,
    plugs: Vec<String>,
    voltage: String,
    frequency: String,
}

/// Electrical profile of a single country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryProfile {
    /// Uppercase two-letter code, also the dataset key.
    #[serde(skip)]
    pub code: String,
    /// Literal display name from the dataset.
    #[serde(rename = "name")]
    pub fallback_name: String,
    /// Plug type tags in dataset order, without duplicates.
    pub plugs: Vec<String>,
    /// Free-text voltage spec, e.g. `"220-240 V"`.
    pub voltage: String,
    /// Free-text frequency spec, display only.
    pub frequency: String,
}

impl CountryProfile {
    /// Lowercase code as used in URL segments.
    pub fn slug(&self) -> String {
        self.code.to_ascii_lowercase()
    }
}

/// Immutable code → profile table.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    countries: BTreeMap<String, CountryProfile>,
}

impl Dataset {
    /// Build a dataset from already-validated profiles.
    pub fn from_profiles(profiles: impl IntoIterator<Item = CountryProfile>) -> Self {
        Self {
            countries: profiles
                .into_iter()
                .map(|p| (p.code.clone(), p))
                .collect(),
        }
    }

    /// Look up a profile by uppercase code.
    pub fn get(&self, code: &str) -> Option<&CountryProfile> {
        self.countries.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.countries.contains_key(code)
    }

    /// All profiles, ordered by code.
    pub fn iter(&self) -> impl Iterator<Item = &CountryProfile> {
        self.countries.values()
    }

    /// All codes, ordered.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.countries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Serialize back to the on-disk JSON shape.
    pub fn to_json(&self) -> Result<String, DatasetError> {
        Ok(serde_json::to_string(&self.countries)?)
    }
}

/// Parse and validate dataset JSON.
pub fn parse_dataset(json: &str) -> Result<Dataset, DatasetError> {
    let raw: BTreeMap<String, RawEntry> = serde_json::from_str(json)?;
    let profiles = raw
        .into_iter()
        .map(|(code, entry)| validate_entry(code, entry))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Dataset::from_profiles(profiles))
}

/// Read and validate `countries.json` from disk.
pub fn load_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    let content = fs::read_to_string(path)?;
    parse_dataset(&content)
}

/// Whether `code` is a well-formed dataset key.
pub fn is_country_code(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase())
}

fn validate_entry(code: String, entry: RawEntry) -> Result<CountryProfile, DatasetError> {
    if !is_country_code(&code) {
        return Err(DatasetError::InvalidCode(code));
    }
    let invalid = |reason: &str| DatasetError::InvalidEntry {
        code: code.clone(),
        reason: reason.to_string(),
    };

    if entry.name.trim().is_empty() {
        return Err(invalid("name is blank"));
    }
    if entry.voltage.trim().is_empty() {
        return Err(invalid("voltage is blank"));
    }
    if entry.plugs.is_empty() {
        return Err(invalid("plugs is empty"));
    }

    let mut plugs: Vec<String> = Vec::with_capacity(entry.plugs.len());
    for plug in entry.plugs {
        let plug = plug.trim().to_string();
        if plug.is_empty() {
            return Err(invalid("plugs contains a blank tag"));
        }
        if plugs.contains(&plug) {
            warn!(code = %code, plug = %plug, "duplicate plug tag collapsed");
            continue;
        }
        plugs.push(plug);
    }

    Ok(CountryProfile {
        fallback_name: entry.name.trim().to_string(),
        plugs,
        voltage: entry.voltage.trim().to_string(),
        frequency: entry.frequency.trim().to_string(),
        code,
    })
}
