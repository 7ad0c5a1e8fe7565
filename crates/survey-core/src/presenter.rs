//! Scenario presenter
//!
//! Turns a scenario id and language into what the client displays. Answer
//! data never reaches the output, even if a catalog file carries it.

use crate::catalog::ScenarioCatalog;
use crate::error::Result;
use crate::types::{Headings, Language, ScenarioDefinition, ScenarioId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Displayable scenario: definition fields merged with the language's headings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioView {
    /// Scenario identifier
    pub id: ScenarioId,
    /// Display fields, answers removed
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    /// Shared heading text of the language
    pub headings: Headings,
}

/// Joins scenario ids with catalog content
#[derive(Debug, Clone)]
pub struct ScenarioPresenter {
    catalog: ScenarioCatalog,
}

impl ScenarioPresenter {
    /// Create presenter over a catalog
    #[inline]
    #[must_use]
    pub fn new(catalog: ScenarioCatalog) -> Self {
        Self { catalog }
    }

    /// Underlying catalog
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &ScenarioCatalog {
        &self.catalog
    }

    /// Answer-free definition of a scenario in a language
    ///
    /// # Errors
    /// - `SurveyError::UnknownScenario` naming `scn_id` and the catalog's ids
    /// - catalog load errors
    pub fn get_scenario_definition(&self, scn_id: ScenarioId, lang: Language) -> Result<ScenarioView> {
        let doc = self.catalog.load(lang)?;
        let ScenarioDefinition { id, fields } = doc.find(scn_id)?.without_answers();
        Ok(ScenarioView {
            id,
            fields,
            headings: doc.headings,
        })
    }
}
