//! Survey service
//!
//! Owns one navigator, one presenter and one answer store, and exposes the
//! operations the HTTP boundary calls. A `Survey` is a single logical session:
//! every caller shares its cursor and language.

use crate::catalog::ScenarioCatalog;
use crate::config::SurveyConfig;
use crate::error::Result;
use crate::navigation::Navigator;
use crate::presenter::{ScenarioPresenter, ScenarioView};
use crate::store::{AnswerStore, StoreReceipt};
use crate::types::{Decision, Language, ScenarioId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Freshly issued session identifier
///
/// Purely informational: nothing is recorded server side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTicket {
    /// Instructions for the client
    pub msg: String,
    /// New random identifier
    pub session_id: Uuid,
}

/// Result of a language change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageChange {
    /// Confirmation text
    pub msg: String,
    /// Language now active
    pub language: Language,
}

/// Scenario currently selected by navigation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResponse {
    /// Confirmation text
    pub message: String,
    /// Scenario that was requested
    pub scenario_id: ScenarioId,
    /// Language the text was resolved in
    pub language: Language,
    /// Displayable definition including headings
    pub definition: ScenarioView,
}

/// Cursor position after a navigation operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationResponse {
    /// Active scenario
    pub active_scn: ScenarioId,
}

/// Raw submission as sent by the client form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionForm {
    /// `choice1` selects the first option; any other value the second
    pub choice: String,
    /// Free-text consequences
    pub conseqs: String,
    /// Submitter identifier
    pub uuid: String,
}

/// Echo of the submitted form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedData {
    /// Whether the first option was chosen
    pub choice1: bool,
    /// Free-text consequences
    pub consequences: String,
    /// Submitter identifier
    pub uuid: String,
}

/// Outcome of a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    /// What was received
    pub submitted_data: SubmittedData,
    /// Store confirmation
    pub db_response: StoreReceipt,
}

/// The survey service
#[derive(Debug)]
pub struct Survey {
    navigator: Navigator,
    presenter: ScenarioPresenter,
    store: AnswerStore,
}

impl Survey {
    /// Assemble a survey from parts
    #[must_use]
    pub fn new(navigator: Navigator, presenter: ScenarioPresenter, store: AnswerStore) -> Self {
        Self {
            navigator,
            presenter,
            store,
        }
    }

    /// Open a survey from configuration
    ///
    /// Bootstraps the answer store if needed and takes the navigation order
    /// from the catalog of `config.order_language`.
    ///
    /// # Errors
    /// - `SurveyError::Config` if the configuration is invalid
    /// - store bootstrap and catalog load errors
    /// - navigator errors for an empty order or a first scenario outside it
    pub fn open(config: &SurveyConfig) -> Result<Self> {
        config.validate()?;

        let catalog = ScenarioCatalog::from_config(config);
        let order = catalog.scenario_ids(config.order_language)?;
        let navigator = match config.first_scenario {
            Some(first) => Navigator::new(first, order)?,
            None => Navigator::starting_at_front(order)?,
        };
        let store = AnswerStore::open(&config.template, &config.store)?;

        tracing::info!(
            scenarios = navigator.scenario_order().len(),
            first = %navigator.first_scenario(),
            store = %store.path().display(),
            "survey opened"
        );
        Ok(Self::new(navigator, ScenarioPresenter::new(catalog), store))
    }

    /// Navigation state
    #[inline]
    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Scenario presenter
    #[inline]
    #[must_use]
    pub fn presenter(&self) -> &ScenarioPresenter {
        &self.presenter
    }

    /// Answer store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &AnswerStore {
        &self.store
    }

    /// Issue a new session identifier
    #[must_use]
    pub fn start_session(&self) -> SessionTicket {
        let session_id = Uuid::new_v4();
        tracing::info!(%session_id, "started session");
        SessionTicket {
            msg: "Started a new Session! Supply this session id again when sending user input to the backend."
                .to_string(),
            session_id,
        }
    }

    /// Change the display language
    ///
    /// # Errors
    /// `SurveyError::UnknownLanguage` for unsupported codes
    pub fn set_language(&mut self, code: &str) -> Result<LanguageChange> {
        self.navigator.set_language(code)?;
        let language = self.navigator.language();
        Ok(LanguageChange {
            msg: format!("set language to {language}"),
            language,
        })
    }

    /// Definition of the active scenario in the active language
    ///
    /// # Errors
    /// Presenter errors, e.g. the active id missing from the language's catalog
    pub fn current_scenario(&self) -> Result<ScenarioResponse> {
        let language = self.navigator.language();
        let scenario_id = self.navigator.active_scenario();
        let definition = self.presenter.get_scenario_definition(scenario_id, language)?;
        Ok(ScenarioResponse {
            message: format!(
                "Scenario definition {scenario_id} was retrieved in lang {language} from database."
            ),
            scenario_id,
            language,
            definition,
        })
    }

    /// Back to the first scenario and German
    pub fn reset(&mut self) -> NavigationResponse {
        NavigationResponse {
            active_scn: self.navigator.reset(),
        }
    }

    /// Next scenario
    pub fn advance(&mut self) -> NavigationResponse {
        NavigationResponse {
            active_scn: self.navigator.advance(),
        }
    }

    /// Previous scenario
    pub fn retreat(&mut self) -> NavigationResponse {
        NavigationResponse {
            active_scn: self.navigator.retreat(),
        }
    }

    /// Store a submission against the active scenario
    ///
    /// # Errors
    /// Store errors, e.g. the active id missing from the store
    pub fn submit(&self, form: SubmissionForm) -> Result<SubmissionResponse> {
        tracing::info!("survey data received from client");
        let decision = Decision::from_choice(&form.choice);
        let receipt = self.store.store_answer(
            self.navigator.active_scenario(),
            decision,
            &form.conseqs,
            &form.uuid,
        )?;
        Ok(SubmissionResponse {
            submitted_data: SubmittedData {
                choice1: decision == Decision::One,
                consequences: form.conseqs,
                uuid: form.uuid,
            },
            db_response: receipt,
        })
    }
}
