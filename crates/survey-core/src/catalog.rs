//! Language-keyed scenario catalog
//!
//! Read-only source of scenario display text. Each language maps to one JSON
//! file of the shape `{"scenarios": [...], "headings": {...}}`; the mapping is
//! fixed at construction and every lookup re-reads the file.

use crate::config::SurveyConfig;
use crate::document::read_json;
use crate::error::{Result, SurveyError};
use crate::types::{Headings, Language, ScenarioDefinition, ScenarioId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Parsed content of one catalog file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Scenarios in display order
    pub scenarios: Vec<ScenarioDefinition>,
    /// Heading text shared by all scenarios of the language
    #[serde(default)]
    pub headings: Headings,
}

impl CatalogDocument {
    /// Ids in file order
    #[must_use]
    pub fn scenario_ids(&self) -> Vec<ScenarioId> {
        self.scenarios.iter().map(|scn| scn.id).collect()
    }

    /// Find a scenario by id
    ///
    /// # Errors
    /// `SurveyError::UnknownScenario` listing the ids of this document
    pub fn find(&self, id: ScenarioId) -> Result<&ScenarioDefinition> {
        self.scenarios
            .iter()
            .find(|scn| scn.id == id)
            .ok_or_else(|| SurveyError::unknown_scenario(id, self.scenario_ids()))
    }
}

/// Scenario catalog keyed by language
#[derive(Debug, Clone)]
pub struct ScenarioCatalog {
    sources: BTreeMap<Language, PathBuf>,
}

impl ScenarioCatalog {
    /// Create catalog from an explicit language-to-file mapping
    #[inline]
    #[must_use]
    pub fn new(sources: BTreeMap<Language, PathBuf>) -> Self {
        Self { sources }
    }

    /// Create catalog from the configured catalog files
    #[inline]
    #[must_use]
    pub fn from_config(config: &SurveyConfig) -> Self {
        Self::new(config.catalogs.clone())
    }

    /// Languages with a configured file
    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.sources.keys().copied()
    }

    /// File backing a language, if configured
    #[must_use]
    pub fn source(&self, lang: Language) -> Option<&Path> {
        self.sources.get(&lang).map(PathBuf::as_path)
    }

    /// Load the catalog document for a language
    ///
    /// # Errors
    /// - `SurveyError::MissingCatalog` if no file is configured for `lang`
    /// - `SurveyError::Io` / `SurveyError::Json` if the file cannot be read
    pub fn load(&self, lang: Language) -> Result<CatalogDocument> {
        let path = self.source(lang).ok_or(SurveyError::MissingCatalog(lang))?;
        tracing::debug!(language = %lang, path = %path.display(), "loading scenario catalog");
        read_json(path)
    }

    /// Scenario ids of a language in catalog order
    ///
    /// # Errors
    /// Same as [`ScenarioCatalog::load`]
    pub fn scenario_ids(&self, lang: Language) -> Result<Vec<ScenarioId>> {
        Ok(self.load(lang)?.scenario_ids())
    }
}
