//! Survey configuration
//!
//! Maps every display language to its catalog file and names the template
//! and store files. Can be built in code, from a data directory laid out by
//! convention, or from a TOML file.

use crate::error::{Result, SurveyError};
use crate::types::{Language, ScenarioId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name of the persisted answer store inside a data directory
pub const DEFAULT_STORE_FILE: &str = ".database.json";

/// Catalog file name for a language inside a data directory
#[must_use]
pub fn catalog_file_name(lang: Language) -> String {
    format!("scenarios_{}.json", lang.as_str())
}

/// Survey configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyConfig {
    /// Catalog file per display language
    pub catalogs: BTreeMap<Language, PathBuf>,
    /// Template copied into place when the store does not exist yet
    pub template: PathBuf,
    /// Persisted answer store
    pub store: PathBuf,
    /// Scenario shown first and restored by reset; defaults to the first listed id
    #[serde(default)]
    pub first_scenario: Option<ScenarioId>,
    /// Catalog whose scenario order drives navigation
    #[serde(default)]
    pub order_language: Language,
}

impl SurveyConfig {
    /// Create configuration with explicit template and store paths and no catalogs
    #[must_use]
    pub fn new(template: impl Into<PathBuf>, store: impl Into<PathBuf>) -> Self {
        Self {
            catalogs: BTreeMap::new(),
            template: template.into(),
            store: store.into(),
            first_scenario: None,
            order_language: Language::default(),
        }
    }

    /// Conventional layout: `scenarios_<lang>.json` per language, the German
    /// catalog as template and `.database.json` as store.
    #[must_use]
    pub fn from_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let catalogs = Language::ALL
            .into_iter()
            .map(|lang| (lang, dir.join(catalog_file_name(lang))))
            .collect();
        Self {
            catalogs,
            template: dir.join(catalog_file_name(Language::De)),
            store: dir.join(DEFAULT_STORE_FILE),
            first_scenario: None,
            order_language: Language::De,
        }
    }

    /// Load configuration from a TOML file
    ///
    /// Relative paths inside the file are resolved against the file's directory.
    ///
    /// # Errors
    /// - `SurveyError::Io` if the file cannot be read
    /// - `SurveyError::Config` if it is not valid configuration
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| SurveyError::io_error(path, e))?;
        let config = Self::from_toml_str(&content)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(config.resolved_against(base))
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// `SurveyError::Config` if the text is not valid configuration
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| SurveyError::Config(e.to_string()))
    }

    /// With a catalog file for a language
    #[inline]
    #[must_use]
    pub fn with_catalog(mut self, lang: Language, path: impl Into<PathBuf>) -> Self {
        self.catalogs.insert(lang, path.into());
        self
    }

    /// With an explicit first scenario
    #[inline]
    #[must_use]
    pub fn with_first_scenario(mut self, id: ScenarioId) -> Self {
        self.first_scenario = Some(id);
        self
    }

    /// With the language whose catalog order drives navigation
    #[inline]
    #[must_use]
    pub fn with_order_language(mut self, lang: Language) -> Self {
        self.order_language = lang;
        self
    }

    /// Check the configuration is usable
    ///
    /// # Errors
    /// `SurveyError::Config` when no catalogs are configured or the
    /// navigation-order language has no catalog
    pub fn validate(&self) -> Result<()> {
        if self.catalogs.is_empty() {
            return Err(SurveyError::Config("no catalogs configured".to_string()));
        }
        if !self.catalogs.contains_key(&self.order_language) {
            return Err(SurveyError::Config(format!(
                "order language '{}' has no catalog",
                self.order_language
            )));
        }
        Ok(())
    }

    fn resolved_against(mut self, base: &Path) -> Self {
        let resolve = |p: &PathBuf| {
            if p.is_relative() {
                base.join(p)
            } else {
                p.clone()
            }
        };
        self.catalogs = self
            .catalogs
            .iter()
            .map(|(lang, p)| (*lang, resolve(p)))
            .collect();
        self.template = resolve(&self.template);
        self.store = resolve(&self.store);
        self
    }
}
