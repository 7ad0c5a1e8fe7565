//! Error types for the survey core
//!
//! Provides error handling for:
//! - Language selection outside the supported set
//! - Scenario lookups against catalogs and the answer store
//! - Catalog and store file I/O and JSON decoding

use crate::types::{Language, ScenarioId};
use std::path::PathBuf;

/// Result alias used across the survey core
pub type Result<T> = std::result::Result<T, SurveyError>;

/// Main survey error type
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    /// Requested language code is not supported
    #[error("unknown language '{requested}', supported: {supported:?}")]
    UnknownLanguage {
        /// The rejected code
        requested: String,
        /// Every accepted code
        supported: Vec<&'static str>,
    },

    /// Requested scenario id is absent from the collection
    #[error("scenario with id {requested} not found in {available:?}")]
    UnknownScenario {
        /// The id that was asked for
        requested: ScenarioId,
        /// Ids present in the collection searched
        available: Vec<ScenarioId>,
    },

    /// Navigation needs at least one scenario
    #[error("scenario order is empty")]
    EmptyScenarioOrder,

    /// No catalog file is configured for the language
    #[error("no catalog configured for language '{0}'")]
    MissingCatalog(Language),

    /// IO error on a catalog, template or store file
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content is not the expected JSON shape
    #[error("invalid json in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Rewritten store could not replace the previous file
    #[error("failed to persist {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl SurveyError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create JSON error for path
    pub fn json_error(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// Create unknown scenario error from the ids that were searched
    pub fn unknown_scenario(
        requested: ScenarioId,
        available: impl IntoIterator<Item = ScenarioId>,
    ) -> Self {
        Self::UnknownScenario {
            requested,
            available: available.into_iter().collect(),
        }
    }

    /// Check if the error was caused by the caller's input
    #[inline]
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownLanguage { .. } | Self::UnknownScenario { .. }
        )
    }

    /// Stable label for the error kind
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownLanguage { .. } => "unknown_language",
            Self::UnknownScenario { .. } => "unknown_scenario",
            Self::EmptyScenarioOrder => "empty_scenario_order",
            Self::MissingCatalog(_) => "missing_catalog",
            Self::Io { .. } => "io",
            Self::Json { .. } => "json",
            Self::Persist { .. } => "persist",
            Self::Config(_) => "config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_scenario_message_names_id_and_candidates() {
        let err = SurveyError::unknown_scenario(ScenarioId(7), [ScenarioId(0), ScenarioId(1)]);
        let msg = err.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains("[0, 1]"));
        assert!(err.is_client_error());
        assert_eq!(err.kind(), "unknown_scenario");
    }

    #[test]
    fn io_errors_are_not_client_errors() {
        let err = SurveyError::io_error(
            "missing.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(!err.is_client_error());
        assert!(err.to_string().contains("missing.json"));
    }
}
