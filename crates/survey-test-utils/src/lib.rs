//! Testing utilities for the survey workspace
//!
//! Shared fixtures: temporary data directories holding catalogs for both
//! languages in the conventional layout.

#![allow(missing_docs)]

use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use survey_core::config::catalog_file_name;
use survey_core::{Language, Survey, SurveyConfig};
use tempfile::TempDir;

/// Catalog document with `ids` as scenarios, titles suffixed with the language code
pub fn catalog_json(lang: Language, ids: &[i64]) -> Value {
    let scenarios: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "title": format!("scenario {id} ({lang})"),
                "text": format!("text {id} ({lang})"),
                "answers": []
            })
        })
        .collect();
    json!({
        "scenarios": scenarios,
        "headings": {
            "choice": format!("choice ({lang})"),
            "conseqs": format!("consequences ({lang})")
        }
    })
}

/// Temporary data directory with `scenarios_de.json` and `scenarios_en.json`
pub struct SurveyFixture {
    dir: TempDir,
}

impl SurveyFixture {
    /// Fixture with scenarios `0..count` in both languages
    pub fn with_scenarios(count: i64) -> Self {
        let ids: Vec<i64> = (0..count).collect();
        Self::with_ids(&ids)
    }

    /// Fixture with the given scenario ids, in order, in both languages
    pub fn with_ids(ids: &[i64]) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let fixture = Self { dir };
        for lang in Language::ALL {
            fixture.write_catalog(lang, &catalog_json(lang, ids));
        }
        fixture
    }

    /// Overwrite the catalog of one language
    pub fn write_catalog(&self, lang: Language, doc: &Value) {
        let path = self.catalog_path(lang);
        std::fs::write(&path, serde_json::to_vec_pretty(doc).expect("encode catalog"))
            .expect("write catalog");
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn catalog_path(&self, lang: Language) -> PathBuf {
        self.dir.path().join(catalog_file_name(lang))
    }

    pub fn config(&self) -> SurveyConfig {
        SurveyConfig::from_data_dir(self.dir.path())
    }

    pub fn store_path(&self) -> PathBuf {
        self.config().store
    }

    /// Parsed store file
    pub fn read_store(&self) -> Value {
        let raw = std::fs::read(self.store_path()).expect("read store");
        serde_json::from_slice(&raw).expect("decode store")
    }

    pub fn open_survey(&self) -> Survey {
        Survey::open(&self.config()).expect("open survey")
    }
}
