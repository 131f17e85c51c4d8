//! Shared test utilities.
//!
//! Small in-memory datasets for unit tests and a fixture copier for tests that
//! need a full site source on disk.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let dataset = sample_dataset();
//! let es = dataset.get("ES").unwrap();
//! let gb = dataset.get("GB").unwrap();
//! let result = CompatibilityResult::between(&pair(es, gb));
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::dataset::{CountryProfile, Dataset};
use crate::route::CountryPair;

// =========================================================================
// Profiles and datasets
// =========================================================================

/// Build a profile with a fixed `50 Hz` frequency.
pub fn profile(code: &str, name: &str, plugs: &[&str], voltage: &str) -> CountryProfile {
    CountryProfile {
        code: code.to_string(),
        fallback_name: name.to_string(),
        plugs: plugs.iter().map(|p| p.to_string()).collect(),
        voltage: voltage.to_string(),
        frequency: "50 Hz".to_string(),
    }
}

pub fn pair<'a>(origin: &'a CountryProfile, destination: &'a CountryProfile) -> CountryPair<'a> {
    CountryPair {
        origin,
        destination,
    }
}

/// Six countries covering every verdict combination.
///
/// | Code | Plugs | Voltage |
/// |------|-------|---------|
/// | DE | C, F | 230 V |
/// | ES | C, F | 230 V |
/// | FR | C, E | 230 V |
/// | GB | G | 230 V |
/// | JP | A, B | 100 V |
/// | US | A, B | 120 V |
pub fn sample_dataset() -> Dataset {
    Dataset::from_profiles([
        profile("DE", "Alemania", &["C", "F"], "230 V"),
        profile("ES", "España", &["C", "F"], "230 V"),
        profile("FR", "Francia", &["C", "E"], "230 V"),
        profile("GB", "Reino Unido", &["G"], "230 V"),
        {
            let mut jp = profile("JP", "Japón", &["A", "B"], "100 V");
            jp.frequency = "50/60 Hz".to_string();
            jp
        },
        {
            let mut us = profile("US", "Estados Unidos", &["A", "B"], "120 V");
            us.frequency = "60 Hz".to_string();
            us
        },
    ])
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}
