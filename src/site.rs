//! Loaded inputs of one build.
//!
//! A [`Site`] bundles the validated config, the dataset and the naming
//! strategy chosen for it. Loading is all-or-nothing: if the config or the
//! dataset cannot be read, nothing is rendered.

use crate::config::{self, ConfigError, SiteConfig};
use crate::dataset::{self, Dataset, DatasetError};
use crate::metadata::SiteContext;
use crate::naming::{self, CountryNames, NamingError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Dataset error in {path}: {source}")]
    Dataset {
        path: PathBuf,
        #[source]
        source: DatasetError,
    },
    #[error("Naming error: {0}")]
    Naming(#[from] NamingError),
}

#[derive(Debug, Clone)]
pub struct Site {
    pub source: PathBuf,
    pub config: SiteConfig,
    pub dataset: Dataset,
    pub names: CountryNames,
}

impl Site {
    /// Load `config.toml`, the dataset and the locale name table from `source`.
    pub fn load(source: &Path) -> Result<Self, SiteError> {
        let config = config::load_config(source)?;
        let dataset_path = source.join(&config.dataset);
        let dataset = dataset::load_dataset(&dataset_path).map_err(|e| SiteError::Dataset {
            path: dataset_path.clone(),
            source: e,
        })?;
        if dataset.is_empty() {
            warn!(path = %dataset_path.display(), "dataset has no countries");
        } else {
            debug!(countries = dataset.len(), path = %dataset_path.display(), "dataset loaded");
        }

        let names_dir = dataset_path.parent().unwrap_or(source);
        let table = naming::load_locale_names(names_dir, &config.locale)?;
        let names = CountryNames::select(&dataset, &config.locale, table);

        Ok(Self {
            source: source.to_path_buf(),
            config,
            dataset,
            names,
        })
    }

    pub fn context(&self) -> SiteContext<'_> {
        SiteContext {
            base_url: self.config.base_url(),
            names: &self.names,
        }
    }

    pub fn assets_path(&self) -> PathBuf {
        self.source.join(&self.config.assets_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::setup_fixtures;
    use std::fs;

    #[test]
    fn loads_fixture_site() {
        let tmp = setup_fixtures();
        let site = Site::load(tmp.path()).unwrap();
        assert!(site.dataset.contains("ES"));
        assert!(matches!(site.names, CountryNames::Localized { .. }));
        assert_eq!(site.context().base_url, "https://queenchufe.test");
    }

    #[test]
    fn missing_names_table_uses_literal() {
        let tmp = setup_fixtures();
        fs::remove_file(tmp.path().join("data/names.es.json")).unwrap();
        let site = Site::load(tmp.path()).unwrap();
        assert_eq!(site.names, CountryNames::Literal);
    }

    #[test]
    fn missing_dataset_is_error() {
        let tmp = setup_fixtures();
        fs::remove_file(tmp.path().join("data/countries.json")).unwrap();
        let err = Site::load(tmp.path()).unwrap_err();
        assert!(matches!(
            err,
            SiteError::Dataset {
                source: DatasetError::Io(_),
                ..
            }
        ));
        assert!(err.to_string().contains("countries.json"));
    }

    #[test]
    fn empty_dataset_loads() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("data/countries.json"), "{}").unwrap();
        let site = Site::load(tmp.path()).unwrap();
        assert!(site.dataset.is_empty());
    }

    #[test]
    fn invalid_dataset_entry_is_error() {
        let tmp = setup_fixtures();
        fs::write(
            tmp.path().join("data/countries.json"),
            r#"{ "ES": { "name": "España", "plugs": [], "voltage": "230 V", "frequency": "50 Hz" } }"#,
        )
        .unwrap();
        assert!(matches!(
            Site::load(tmp.path()),
            Err(SiteError::Dataset {
                source: DatasetError::InvalidEntry { .. },
                ..
            })
        ));
    }
}
