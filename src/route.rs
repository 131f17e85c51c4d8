//! Path → country pair resolution.
//!
//! The URL scheme is deliberately tiny:
//!
//! ```text
//! /          → Home
//! /es/fr     → pair (origin ES, destination FR)
//! /ES/fr/    → same pair (case-insensitive, trailing slash ignored)
//! /zz/fr     → NotFound (well-formed, but ZZ is not in the dataset)
//! /es        → Home (any other shape falls back to the form)
//! ```
//!
//! Segment length is measured in characters, not bytes, so a two-character
//! segment in any script is still recognised as pair-shaped and then simply
//! fails lookup.

use crate::dataset::{CountryProfile, Dataset};

/// The two profiles of a resolved route, borrowed from the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryPair<'a> {
    pub origin: &'a CountryProfile,
    pub destination: &'a CountryProfile,
}

impl CountryPair<'_> {
    /// The two-segment path this pair is served at.
    pub fn path(&self) -> String {
        format!("/{}/{}", self.origin.slug(), self.destination.slug())
    }
}

/// Outcome of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    /// No pair requested; default metadata applies.
    Home,
    /// Pair-shaped path where at least one code is missing from the dataset.
    NotFound { origin: String, destination: String },
    /// Both codes found.
    Resolved(CountryPair<'a>),
}

/// Split a path into its pair codes, uppercased, if it is pair-shaped.
///
/// Returns `None` for anything that is not exactly two non-empty segments of
/// two characters each.
pub fn pair_codes(path: &str) -> Option<(String, String)> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    let origin = segments.next()?;
    let destination = segments.next()?;
    if segments.next().is_some() {
        return None;
    }
    if origin.chars().count() != 2 || destination.chars().count() != 2 {
        return None;
    }
    Some((origin.to_uppercase(), destination.to_uppercase()))
}

/// Resolve a path against the dataset.
pub fn resolve<'a>(path: &str, dataset: &'a Dataset) -> Route<'a> {
    let Some((origin_code, destination_code)) = pair_codes(path) else {
        return Route::Home;
    };
    match (dataset.get(&origin_code), dataset.get(&destination_code)) {
        (Some(origin), Some(destination)) => Route::Resolved(CountryPair {
            origin,
            destination,
        }),
        _ => Route::NotFound {
            origin: origin_code,
            destination: destination_code,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_dataset;

    fn resolved_codes<'a>(route: &Route<'a>) -> Option<(&'a str, &'a str)> {
        match route {
            Route::Resolved(pair) => Some((
                pair.origin.code.as_str(),
                pair.destination.code.as_str(),
            )),
            _ => None,
        }
    }

    #[test]
    fn root_is_home() {
        let dataset = sample_dataset();
        assert_eq!(resolve("/", &dataset), Route::Home);
        assert_eq!(resolve("", &dataset), Route::Home);
    }

    #[test]
    fn lowercase_pair_resolves() {
        let dataset = sample_dataset();
        let route = resolve("/es/fr", &dataset);
        assert_eq!(resolved_codes(&route), Some(("ES", "FR")));
    }

    #[test]
    fn case_is_normalized() {
        let dataset = sample_dataset();
        assert_eq!(resolve("/ES/FR", &dataset), resolve("/es/fr", &dataset));
        assert_eq!(resolve("/eS/Fr", &dataset), resolve("/es/fr", &dataset));
    }

    #[test]
    fn trailing_and_doubled_slashes_ignored() {
        let dataset = sample_dataset();
        assert_eq!(
            resolved_codes(&resolve("//es//fr/", &dataset)),
            Some(("ES", "FR"))
        );
    }

    #[test]
    fn unknown_code_is_not_found() {
        let dataset = sample_dataset();
        assert_eq!(
            resolve("/zz/fr", &dataset),
            Route::NotFound {
                origin: "ZZ".to_string(),
                destination: "FR".to_string(),
            }
        );
    }

    #[test]
    fn unknown_destination_is_not_found() {
        let dataset = sample_dataset();
        assert!(matches!(resolve("/es/zz", &dataset), Route::NotFound { .. }));
    }

    #[test]
    fn self_pair_resolves() {
        let dataset = sample_dataset();
        let route = resolve("/es/es", &dataset);
        assert_eq!(resolved_codes(&route), Some(("ES", "ES")));
    }

    #[test]
    fn single_segment_is_home() {
        let dataset = sample_dataset();
        assert_eq!(resolve("/es", &dataset), Route::Home);
    }

    #[test]
    fn three_segments_is_home() {
        let dataset = sample_dataset();
        assert_eq!(resolve("/es/fr/de", &dataset), Route::Home);
    }

    #[test]
    fn long_segments_are_home() {
        let dataset = sample_dataset();
        assert_eq!(resolve("/esp/fra", &dataset), Route::Home);
        assert_eq!(resolve("/about/x", &dataset), Route::Home);
    }

    #[test]
    fn two_multibyte_chars_are_pair_shaped() {
        // "ñé" is four bytes but two characters
        assert_eq!(
            pair_codes("/ñé/fr"),
            Some(("ÑÉ".to_string(), "FR".to_string()))
        );
        let dataset = sample_dataset();
        assert!(matches!(resolve("/ñé/fr", &dataset), Route::NotFound { .. }));
    }

    #[test]
    fn pair_path_round_trips() {
        let dataset = sample_dataset();
        for origin in dataset.iter() {
            for destination in dataset.iter() {
                let pair = CountryPair {
                    origin,
                    destination,
                };
                assert_eq!(resolve(&pair.path(), &dataset), Route::Resolved(pair));
            }
        }
    }
}
