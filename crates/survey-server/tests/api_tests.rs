use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use survey_server::{open_shared, routes, SharedSurvey};
use survey_test_utils::SurveyFixture;
use warp::http::StatusCode;

fn shared(fixture: &SurveyFixture) -> SharedSurvey {
    open_shared(&fixture.config()).unwrap()
}

fn body(res: &warp::http::Response<warp::hyper::body::Bytes>) -> Value {
    serde_json::from_slice(res.body()).unwrap()
}

#[tokio::test]
async fn session_id_is_issued() {
    let fixture = SurveyFixture::with_scenarios(1);
    let app = routes::app(shared(&fixture), fixture.dir());

    let res = warp::test::request()
        .method("GET")
        .path("/get-session-id")
        .reply(&app)
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let json = body(&res);
    assert!(json["session_id"].as_str().unwrap().len() == 36);
    assert!(json["msg"].as_str().unwrap().contains("session id"));
}

#[tokio::test]
async fn navigation_endpoints_report_active_scenario() {
    let fixture = SurveyFixture::with_scenarios(3);
    let app = routes::app(shared(&fixture), fixture.dir());

    for expected in [1, 2, 2] {
        let res = warp::test::request().path("/next-scenario").reply(&app).await;
        assert_eq!(body(&res), json!({"active_scn": expected}));
    }

    let res = warp::test::request().path("/prev-scenario").reply(&app).await;
    assert_eq!(body(&res), json!({"active_scn": 1}));

    let res = warp::test::request().path("/reset").reply(&app).await;
    assert_eq!(body(&res), json!({"active_scn": 0}));
}

#[tokio::test]
async fn set_lang_accepts_supported_and_rejects_others() {
    let fixture = SurveyFixture::with_scenarios(1);
    let survey = shared(&fixture);
    let app = routes::app(survey.clone(), fixture.dir());

    let res = warp::test::request().path("/set-lang?language=en").reply(&app).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body(&res)["language"], json!("en"));

    let res = warp::test::request().path("/set-lang?language=fr").reply(&app).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body(&res)["kind"], json!("unknown_language"));
    assert_eq!(survey.lock().navigator().language().as_str(), "en");

    let res = warp::test::request().path("/set-lang").reply(&app).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_scenario_returns_definition_with_headings() {
    let fixture = SurveyFixture::with_scenarios(2);
    let app = routes::app(shared(&fixture), fixture.dir());

    warp::test::request().path("/set-lang?language=en").reply(&app).await;
    let res = warp::test::request()
        .method("POST")
        .path("/get-scenario")
        .reply(&app)
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let json = body(&res);
    assert_eq!(json["scenario_id"], json!(0));
    assert_eq!(json["language"], json!("en"));
    assert_eq!(json["definition"]["title"], json!("scenario 0 (en)"));
    assert_eq!(json["definition"]["headings"]["choice"], json!("choice (en)"));
    assert!(json["definition"].get("answers").is_none());
}

#[tokio::test]
async fn get_scenario_missing_in_language_is_404() {
    let fixture = SurveyFixture::with_ids(&[0, 1]);
    fixture.write_catalog(
        survey_core::Language::En,
        &survey_test_utils::catalog_json(survey_core::Language::En, &[0]),
    );
    let app = routes::app(shared(&fixture), fixture.dir());

    warp::test::request().path("/next-scenario").reply(&app).await;
    warp::test::request().path("/set-lang?language=en").reply(&app).await;
    let res = warp::test::request()
        .method("POST")
        .path("/get-scenario")
        .reply(&app)
        .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body(&res)["kind"], json!("unknown_scenario"));
}

#[tokio::test]
async fn submit_form_is_persisted() {
    let fixture = SurveyFixture::with_scenarios(2);
    let app = routes::app(shared(&fixture), fixture.dir());

    let res = warp::test::request()
        .method("POST")
        .path("/submit")
        .header("content-type", "application/x-www-form-urlencoded")
        .body("choice=choice1&conseqs=less+pollution&uuid=abc")
        .reply(&app)
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let json = body(&res);
    assert_eq!(
        json["submitted_data"],
        json!({"choice1": true, "consequences": "less pollution", "uuid": "abc"})
    );
    assert!(json["db_response"]["message"].as_str().unwrap().contains(".database.json"));

    let store = fixture.read_store();
    assert_eq!(
        store["scenarios"][0]["answers"],
        json!([{"decision": "1", "conseqs": "less pollution", "user_uid": "abc"}])
    );
    assert_eq!(store["scenarios"][1]["answers"], json!([]));
}

#[tokio::test]
async fn submit_with_missing_field_is_bad_request() {
    let fixture = SurveyFixture::with_scenarios(1);
    let app = routes::app(shared(&fixture), fixture.dir());

    let res = warp::test::request()
        .method("POST")
        .path("/submit")
        .header("content-type", "application/x-www-form-urlencoded")
        .body("choice=choice2")
        .reply(&app)
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(fixture.read_store()["scenarios"][0]["answers"], json!([]));
}

#[tokio::test]
async fn hello_and_unknown_paths() {
    let fixture = SurveyFixture::with_scenarios(1);
    let app = routes::app(shared(&fixture), fixture.dir());

    let res = warp::test::request().path("/hello").reply(&app).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body(&res)["message"].is_string());

    let res = warp::test::request().path("/nope").reply(&app).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn static_index_is_served() {
    let fixture = SurveyFixture::with_scenarios(1);
    std::fs::write(fixture.dir().join("index.html"), "<h1>survey</h1>").unwrap();
    let app = routes::app(shared(&fixture), fixture.dir());

    let res = warp::test::request().path("/").reply(&app).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.body().as_ref(), b"<h1>survey</h1>");

    let res = warp::test::request().path("/static/index.html").reply(&app).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn concurrent_submissions_are_all_stored() {
    let fixture = SurveyFixture::with_scenarios(1);
    let app = routes::app(shared(&fixture), fixture.dir());

    let submit = |uuid: &'static str| {
        warp::test::request()
            .method("POST")
            .path("/submit")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(format!("choice=choice2&conseqs=x&uuid={uuid}"))
            .reply(&app)
    };
    let (a, b, c) = tokio::join!(submit("u1"), submit("u2"), submit("u3"));
    for res in [a, b, c] {
        assert_eq!(res.status(), StatusCode::OK);
    }

    let answers = fixture.read_store()["scenarios"][0]["answers"].clone();
    let mut uids: Vec<&str> = answers
        .as_array()
        .unwrap()
        .iter()
        .map(|answer| answer["user_uid"].as_str().unwrap())
        .collect();
    uids.sort_unstable();
    assert_eq!(uids, vec!["u1", "u2", "u3"]);
}
