//! Core types for the survey
//!
//! Defines the fundamental types shared by every component:
//! - Scenario identifiers and display languages
//! - Scenario definitions as read from catalog files
//! - Decisions and answer records as written to the store

use crate::error::SurveyError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Key under which answers live inside a scenario object
pub const ANSWERS_KEY: &str = "answers";

/// Shared heading text of one language file
pub type Headings = Map<String, Value>;

/// Stable integer identifier of a scenario
///
/// Any JSON integer in the `i64` range is accepted; ids are compared, never
/// used as positions.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioId(pub i64);

impl ScenarioId {
    /// Raw numeric value
    #[inline]
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for ScenarioId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Debug for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display language of scenario text
///
/// Serialized as its lowercase code so it can key JSON and TOML maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    /// German
    #[default]
    De,
    /// English
    En,
}

impl Language {
    /// Every supported language, in canonical order
    pub const ALL: [Language; 2] = [Language::De, Language::En];

    /// Returns the language code
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::De => "de",
            Self::En => "en",
        }
    }

    /// Codes accepted by [`Language::from_str`]
    #[must_use]
    pub fn supported_codes() -> Vec<&'static str> {
        Self::ALL.iter().map(|lang| lang.as_str()).collect()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = SurveyError;

    /// Exact match against the supported codes; no case folding.
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str() == code)
            .ok_or_else(|| SurveyError::UnknownLanguage {
                requested: code.to_string(),
                supported: Self::supported_codes(),
            })
    }
}

impl TryFrom<String> for Language {
    type Error = SurveyError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        code.parse()
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.as_str().to_string()
    }
}

/// Multiple-choice outcome of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    /// First option
    #[serde(rename = "1")]
    One,
    /// Second option
    #[serde(rename = "2")]
    Two,
}

impl Decision {
    /// Raw choice value that selects [`Decision::One`]
    pub const FIRST_CHOICE: &'static str = "choice1";

    /// Map a raw client choice; anything other than `choice1` is the second option.
    #[must_use]
    pub fn from_choice(choice: &str) -> Self {
        if choice == Self::FIRST_CHOICE {
            Self::One
        } else {
            Self::Two
        }
    }

    /// Text form as persisted
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Two => "2",
        }
    }
}

/// One submitted answer, appended to a scenario and never changed afterwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// Chosen option
    pub decision: Decision,
    /// Free-text consequences the submitter expects
    pub conseqs: String,
    /// Submitter identifier
    pub user_uid: String,
}

impl AnswerRecord {
    /// Create a new answer record
    pub fn new(decision: Decision, conseqs: impl Into<String>, user_uid: impl Into<String>) -> Self {
        Self {
            decision,
            conseqs: conseqs.into(),
            user_uid: user_uid.into(),
        }
    }
}

/// Scenario as read from a language catalog
///
/// Display fields are language specific and otherwise opaque, so they are
/// kept in file order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    /// Scenario identifier
    pub id: ScenarioId,
    /// Language-specific display fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ScenarioDefinition {
    /// Create a definition without display fields
    #[must_use]
    pub fn new(id: ScenarioId) -> Self {
        Self {
            id,
            fields: Map::new(),
        }
    }

    /// With a display field
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Copy of this definition with any answer data removed
    #[must_use]
    pub fn without_answers(&self) -> Self {
        let mut fields = self.fields.clone();
        fields.shift_remove(ANSWERS_KEY);
        Self {
            id: self.id,
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_parses_supported_codes_only() {
        assert_eq!("de".parse::<Language>().unwrap(), Language::De);
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);

        let err = "fr".parse::<Language>().unwrap_err();
        assert!(matches!(
            err,
            SurveyError::UnknownLanguage { ref requested, ref supported }
                if requested == "fr" && supported == &vec!["de", "en"]
        ));
        assert!("DE".parse::<Language>().is_err());
    }

    #[test]
    fn language_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Language::En).unwrap(), "\"en\"");
        let parsed: Language = serde_json::from_str("\"de\"").unwrap();
        assert_eq!(parsed, Language::De);
        assert!(serde_json::from_str::<Language>("\"xx\"").is_err());
    }

    #[test]
    fn scenario_id_accepts_any_json_integer() {
        let ids: Vec<ScenarioId> = serde_json::from_str("[-3, 0, 5000000000]").unwrap();
        assert_eq!(ids, vec![ScenarioId(-3), ScenarioId(0), ScenarioId(5_000_000_000)]);
        assert_eq!(serde_json::to_string(&ScenarioId(-3)).unwrap(), "-3");
        assert!(serde_json::from_str::<ScenarioId>("1.5").is_err());
    }

    #[test]
    fn decision_from_choice() {
        assert_eq!(Decision::from_choice("choice1"), Decision::One);
        assert_eq!(Decision::from_choice("choice2"), Decision::Two);
        assert_eq!(Decision::from_choice(""), Decision::Two);
        assert_eq!(Decision::from_choice("Choice1"), Decision::Two);
    }

    #[test]
    fn answer_record_json_shape() {
        let record = AnswerRecord::new(Decision::One, "less pollution", "abc");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"decision": "1", "conseqs": "less pollution", "user_uid": "abc"})
        );
    }

    #[test]
    fn definition_keeps_fields_in_order_and_strips_answers() {
        let raw = r#"{"id": 3, "title": "Dam", "text": "A river", "answers": [{"decision": "2", "conseqs": "x", "user_uid": "u"}]}"#;
        let def: ScenarioDefinition = serde_json::from_str(raw).unwrap();
        assert_eq!(def.id, ScenarioId(3));
        let keys: Vec<_> = def.fields.keys().cloned().collect();
        assert_eq!(keys, vec!["title", "text", "answers"]);

        let clean = def.without_answers();
        assert!(!clean.fields.contains_key(ANSWERS_KEY));
        assert_eq!(clean.fields.len(), 2);
    }
}
