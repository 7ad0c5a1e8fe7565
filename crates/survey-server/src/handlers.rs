//! Request handlers
//!
//! Each handler locks the shared survey for exactly one operation. The guard
//! is never held across an await point. Operations that touch the catalog or
//! store files run on the blocking pool.

use crate::reply;
use crate::SharedSurvey;
use serde::{Deserialize, Serialize};
use survey_core::SubmissionForm;
use warp::reply::Response;

/// Run a file-backed survey operation on the blocking pool and reply with its outcome
async fn run_blocking<T, F>(op: F) -> Response
where
    T: Serialize + Send + 'static,
    F: FnOnce() -> survey_core::Result<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(op).await {
        Ok(Ok(value)) => reply::json(&value),
        Ok(Err(err)) => reply::error(&err),
        Err(join) => reply::internal(format!("survey task failed: {join}")),
    }
}

/// Query of `/set-lang`
#[derive(Debug, Clone, Deserialize)]
pub struct LangQuery {
    /// Requested language code
    pub language: String,
}

/// Reply of `/hello`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelloReply {
    /// Greeting
    pub message: String,
}

/// `GET /get-session-id`
pub fn session_id(survey: SharedSurvey) -> Response {
    reply::json(&survey.lock().start_session())
}

/// `GET /set-lang?language=..`
pub fn set_lang(query: LangQuery, survey: SharedSurvey) -> Response {
    match survey.lock().set_language(&query.language) {
        Ok(change) => reply::json(&change),
        Err(err) => reply::error(&err),
    }
}

/// `POST /get-scenario`
pub async fn get_scenario(survey: SharedSurvey) -> Response {
    run_blocking(move || survey.lock().current_scenario()).await
}

/// `GET /reset`
pub fn reset(survey: SharedSurvey) -> Response {
    reply::json(&survey.lock().reset())
}

/// `GET /next-scenario`
pub fn next_scenario(survey: SharedSurvey) -> Response {
    reply::json(&survey.lock().advance())
}

/// `GET /prev-scenario`
pub fn prev_scenario(survey: SharedSurvey) -> Response {
    reply::json(&survey.lock().retreat())
}

/// `POST /submit`
pub async fn submit(form: SubmissionForm, survey: SharedSurvey) -> Response {
    run_blocking(move || survey.lock().submit(form)).await
}

/// `GET /hello`
pub fn hello() -> Response {
    reply::json(&HelloReply {
        message: "Hello from the survey server!".to_string(),
    })
}
