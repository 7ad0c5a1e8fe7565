//! Route table
//!
//! ```text
//! GET  /get-session-id          new informational session id
//! GET  /set-lang?language=de    switch display language
//! POST /get-scenario            active scenario in the active language
//! GET  /reset                   first scenario, German
//! GET  /next-scenario           advance
//! GET  /prev-scenario           retreat
//! POST /submit                  form: choice, conseqs, uuid
//! GET  /hello                   liveness probe
//! GET  /                        static index.html
//! GET  /static/..               static files
//! ```

use crate::handlers::{self, LangQuery};
use crate::reply;
use crate::SharedSurvey;
use std::convert::Infallible;
use std::path::Path;
use survey_core::SubmissionForm;
use warp::{Filter, Rejection, Reply};

/// Largest accepted form body
pub const MAX_FORM_BYTES: u64 = 64 * 1024;

fn with_survey(
    survey: SharedSurvey,
) -> impl Filter<Extract = (SharedSurvey,), Error = Infallible> + Clone {
    warp::any().map(move || survey.clone())
}

/// Survey API routes, without static files or rejection handling
pub fn api(
    survey: SharedSurvey,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let session_id = warp::path!("get-session-id")
        .and(warp::get())
        .and(with_survey(survey.clone()))
        .map(handlers::session_id);

    let set_lang = warp::path!("set-lang")
        .and(warp::get())
        .and(warp::query::<LangQuery>())
        .and(with_survey(survey.clone()))
        .map(handlers::set_lang);

    let get_scenario = warp::path!("get-scenario")
        .and(warp::post().or(warp::get()).unify())
        .and(with_survey(survey.clone()))
        .then(handlers::get_scenario);

    let reset = warp::path!("reset")
        .and(warp::get())
        .and(with_survey(survey.clone()))
        .map(handlers::reset);

    let next_scenario = warp::path!("next-scenario")
        .and(warp::get())
        .and(with_survey(survey.clone()))
        .map(handlers::next_scenario);

    let prev_scenario = warp::path!("prev-scenario")
        .and(warp::get())
        .and(with_survey(survey.clone()))
        .map(handlers::prev_scenario);

    let submit = warp::path!("submit")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_FORM_BYTES))
        .and(warp::body::form::<SubmissionForm>())
        .and(with_survey(survey))
        .then(handlers::submit);

    let hello = warp::path!("hello").and(warp::get()).map(handlers::hello);

    session_id
        .or(set_lang)
        .or(get_scenario)
        .or(reset)
        .or(next_scenario)
        .or(prev_scenario)
        .or(submit)
        .or(hello)
}

/// Static front-end: `/` serves `index.html`, `/static/..` the directory
pub fn static_files(
    static_dir: &Path,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let index = warp::path::end()
        .and(warp::get())
        .and(warp::fs::file(static_dir.join("index.html")));
    let assets = warp::path("static").and(warp::fs::dir(static_dir.to_path_buf()));
    index.or(assets)
}

/// Complete application: API, static files, tracing and JSON rejections
pub fn app(
    survey: SharedSurvey,
    static_dir: &Path,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    api(survey)
        .or(static_files(static_dir))
        .recover(reply::handle_rejection)
        .with(warp::trace::request())
}
