//! Survey Core
//!
//! The stateful heart of the survey game:
//! - Language-keyed scenario catalogs
//! - A navigation cursor over a fixed scenario order
//! - An answer-free scenario presenter
//! - A JSON answer store bootstrapped from a template
//!
//! # Example
//!
//! ```rust,ignore
//! use survey_core::{Survey, SurveyConfig, SubmissionForm};
//!
//! # fn example() -> survey_core::Result<()> {
//! let config = SurveyConfig::from_data_dir("data");
//! let mut survey = Survey::open(&config)?;
//!
//! survey.set_language("en")?;
//! let scenario = survey.current_scenario()?;
//! println!("{}", scenario.message);
//!
//! survey.submit(SubmissionForm {
//!     choice: "choice1".into(),
//!     conseqs: "less pollution".into(),
//!     uuid: "abc".into(),
//! })?;
//! survey.advance();
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod catalog;
pub mod config;
pub mod document;
pub mod error;
pub mod navigation;
pub mod presenter;
pub mod store;
pub mod survey;
pub mod types;

// Re-exports for convenience
pub use catalog::{CatalogDocument, ScenarioCatalog};
pub use config::SurveyConfig;
pub use error::{Result, SurveyError};
pub use navigation::Navigator;
pub use presenter::{ScenarioPresenter, ScenarioView};
pub use store::{AnswerStore, StoreDocument, StoreReceipt, StoredScenario};
pub use survey::{
    LanguageChange, NavigationResponse, ScenarioResponse, SessionTicket, SubmissionForm,
    SubmissionResponse, SubmittedData, Survey,
};
pub use types::{AnswerRecord, Decision, Headings, Language, ScenarioDefinition, ScenarioId};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the survey core
    pub use crate::{
        AnswerStore, Decision, Language, Navigator, ScenarioCatalog, ScenarioId,
        ScenarioPresenter, Survey, SurveyConfig, SurveyError,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
