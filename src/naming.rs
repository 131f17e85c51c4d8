//! Country display names.
//!
//! A page can name countries from one of two sources:
//!
//! - **Localized**: a `data/names.<locale>.json` table (`{"ES": "España", ...}`)
//!   mapping every dataset code to a name in the site locale.
//! - **Literal**: the `name` field of each dataset entry.
//!
//! The strategy is chosen once per build by [`CountryNames::select`] and then
//! used for every option list, heading, metadata field and JSON-LD document,
//! so a rendered page never mixes the two sources. A localized table that
//! misses any dataset code is not used at all.

use crate::dataset::{CountryProfile, Dataset};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum NamingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error in locale names: {0}")]
    Json(#[from] serde_json::Error),
}

/// Display-name strategy for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountryNames {
    Localized {
        locale: String,
        names: BTreeMap<String, String>,
    },
    Literal,
}

impl CountryNames {
    /// Pick the strategy for a dataset.
    ///
    /// `table` is the locale name table if one was found. It is used only if
    /// it has a non-blank name for every code in `dataset`.
    pub fn select(
        dataset: &Dataset,
        locale: &str,
        table: Option<BTreeMap<String, String>>,
    ) -> Self {
        let Some(names) = table else {
            debug!(locale, "no locale name table, using dataset names");
            return CountryNames::Literal;
        };
        let missing: Vec<&str> = dataset
            .codes()
            .filter(|code| names.get(*code).is_none_or(|n| n.trim().is_empty()))
            .collect();
        if !missing.is_empty() {
            warn!(
                locale,
                missing = ?missing,
                "locale name table is incomplete, using dataset names"
            );
            return CountryNames::Literal;
        }
        CountryNames::Localized {
            locale: locale.to_string(),
            names,
        }
    }

    /// Name to display for a country.
    pub fn display_name<'a>(&'a self, profile: &'a CountryProfile) -> &'a str {
        match self {
            CountryNames::Localized { names, .. } => names
                .get(&profile.code)
                .map(String::as_str)
                .unwrap_or(&profile.fallback_name),
            CountryNames::Literal => &profile.fallback_name,
        }
    }

    /// Human-readable label of the active source, for CLI output.
    pub fn source_label(&self) -> String {
        match self {
            CountryNames::Localized { locale, .. } => format!("locale table ({locale})"),
            CountryNames::Literal => "dataset names".to_string(),
        }
    }

    /// Dataset profiles sorted by display name for option lists.
    pub fn sorted<'a>(&'a self, dataset: &'a Dataset) -> Vec<&'a CountryProfile> {
        let mut profiles: Vec<&CountryProfile> = dataset.iter().collect();
        profiles.sort_by(|a, b| self.compare(a, b));
        profiles
    }

    fn compare(&self, a: &CountryProfile, b: &CountryProfile) -> Ordering {
        sort_key(self.display_name(a))
            .cmp(&sort_key(self.display_name(b)))
            .then_with(|| a.code.cmp(&b.code))
    }
}

/// Load `names.<locale>.json` from `dir`, if present.
pub fn load_locale_names(
    dir: &Path,
    locale: &str,
) -> Result<Option<BTreeMap<String, String>>, NamingError> {
    let path = dir.join(format!("names.{locale}.json"));
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    let table: BTreeMap<String, String> = serde_json::from_str(&content)?;
    Ok(Some(table))
}

/// Case- and accent-insensitive sort key for Latin-script names.
///
/// "Österreich", "Ecuador" and "Égypte" sort as if written without accents;
/// the original string breaks ties so ordering stays total.
fn sort_key(name: &str) -> (String, &str) {
    let folded = name
        .chars()
        .flat_map(char::to_lowercase)
        .map(fold_accent)
        .collect();
    (folded, name)
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ø' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}
