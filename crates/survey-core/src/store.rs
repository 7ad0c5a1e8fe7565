//! Persisted answer store
//!
//! The store is a copy of a scenario template whose scenarios accumulate
//! answer records. It is bootstrapped once from the template and then
//! rewritten in full on every submission.
//!
//! # Concurrency
//! Submissions through one `AnswerStore` are serialized by an internal lock
//! and each rewrite is an atomic rename. Separate processes writing the same
//! file are not coordinated.

use crate::document::{copy_verbatim, read_json, write_json_atomic};
use crate::error::{Result, SurveyError};
use crate::types::{AnswerRecord, Decision, ScenarioId};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Scenario entry of the store: definition fields plus its answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredScenario {
    /// Scenario identifier
    pub id: ScenarioId,
    /// Display fields copied from the template
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    /// Answers in submission order, exactly as persisted
    ///
    /// Only appended records are built from [`AnswerRecord`]; earlier entries
    /// are written back untouched whatever their shape.
    #[serde(default)]
    pub answers: Vec<Value>,
}

/// Whole persisted store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    /// Scenario entries in template order
    pub scenarios: Vec<StoredScenario>,
    /// Other top-level keys of the template, kept across rewrites
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StoreDocument {
    /// Ids in store order
    #[must_use]
    pub fn scenario_ids(&self) -> Vec<ScenarioId> {
        self.scenarios.iter().map(|scn| scn.id).collect()
    }

    /// Find a scenario entry by id
    #[must_use]
    pub fn get(&self, id: ScenarioId) -> Option<&StoredScenario> {
        self.scenarios.iter().find(|scn| scn.id == id)
    }

    fn get_mut(&mut self, id: ScenarioId) -> Result<&mut StoredScenario> {
        let available = self.scenario_ids();
        self.scenarios
            .iter_mut()
            .find(|scn| scn.id == id)
            .ok_or_else(|| SurveyError::unknown_scenario(id, available))
    }
}

/// Confirmation of a stored answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreReceipt {
    /// Scenario the answer was appended to
    pub scenario_id: ScenarioId,
    /// Answers the scenario holds after the append
    pub answer_count: usize,
    /// Resolved location of the store file
    pub path: PathBuf,
    /// Human-readable confirmation
    pub message: String,
}

/// JSON-backed answer store
#[derive(Debug)]
pub struct AnswerStore {
    template: PathBuf,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl AnswerStore {
    /// Open the store, copying the template into place if the store file is missing
    ///
    /// # Errors
    /// `SurveyError::Io` if the template cannot be copied
    pub fn open(template: impl Into<PathBuf>, path: impl Into<PathBuf>) -> Result<Self> {
        let template = template.into();
        let path = path.into();

        if !path.exists() {
            copy_verbatim(&template, &path)?;
            tracing::info!(
                template = %template.display(),
                store = %path.display(),
                "bootstrapped answer store from template"
            );
        }

        Ok(Self {
            template,
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Store file location
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Template the store was bootstrapped from
    #[inline]
    #[must_use]
    pub fn template(&self) -> &Path {
        &self.template
    }

    /// Load the whole store
    ///
    /// # Errors
    /// `SurveyError::Io` / `SurveyError::Json` if the store cannot be read
    pub fn load(&self) -> Result<StoreDocument> {
        read_json(&self.path)
    }

    /// Answers recorded for a scenario, as persisted
    ///
    /// # Errors
    /// - `SurveyError::UnknownScenario` if the store has no such scenario
    /// - load errors as in [`AnswerStore::load`]
    pub fn answers_for(&self, id: ScenarioId) -> Result<Vec<Value>> {
        let doc = self.load()?;
        doc.get(id)
            .map(|scn| scn.answers.clone())
            .ok_or_else(|| SurveyError::unknown_scenario(id, doc.scenario_ids()))
    }

    /// Append an answer to a scenario and rewrite the store
    ///
    /// # Errors
    /// - `SurveyError::UnknownScenario` if the store has no such scenario;
    ///   the file is left untouched
    /// - I/O, JSON or persist errors from the read-modify-write cycle
    pub fn store_answer(
        &self,
        scn_id: ScenarioId,
        decision: Decision,
        conseqs: &str,
        user_uid: &str,
    ) -> Result<StoreReceipt> {
        let _guard = self.write_lock.lock();

        let mut doc = self.load()?;
        let record = AnswerRecord::new(decision, conseqs, user_uid);
        let encoded =
            serde_json::to_value(&record).map_err(|e| SurveyError::json_error(self.path.clone(), e))?;
        let scenario = doc.get_mut(scn_id)?;
        scenario.answers.push(encoded);
        let answer_count = scenario.answers.len();

        write_json_atomic(&self.path, &doc)?;

        let message = format!(
            "Stored new answer in the database at (following path might be in a container!): {}",
            self.path.display()
        );
        tracing::info!(
            scenario = %scn_id,
            decision = decision.as_str(),
            answers = answer_count,
            store = %self.path.display(),
            "stored answer"
        );

        Ok(StoreReceipt {
            scenario_id: scn_id,
            answer_count,
            path: self.path.clone(),
            message,
        })
    }
}
