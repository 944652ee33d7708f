use crate::e2e::helpers;

use helpers::fixtures::wav_base64;
use helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ok_for_health_check(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();

    response.assert_status(StatusCode::OK);

    // Health endpoint returns plain text
    let body = String::from_utf8(response.body_bytes.clone()).unwrap();
    assert_eq!(body, "OK");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_installed_voices_when_ready(ctx: &TestContext) {
    let response = ctx.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("ready"));

    let mut voices: Vec<&str> = body["voices"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    voices.sort();
    assert_eq!(voices, vec!["bn", "es"]);

    // Nothing has been synthesized yet
    assert_eq!(body["engines_cached"], json!([]));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_warm_engines_after_a_job(ctx: &TestContext) {
    let job = json!({
        "audio": wav_base64(16_000, 0.5),
        "src_lang": "en",
        "tgt_lang": "ben",
    });
    ctx.client
        .post("/api/translate", &job)
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let response = ctx.client.get("/health/ready").await.unwrap();
    let body = response.body.as_ref().unwrap();

    assert_eq!(body["engines_cached"], json!(["bn"]));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_in_health_responses(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();
    response.assert_header_exists("x-request-id");

    let response = ctx.client.get("/health/ready").await.unwrap();
    response.assert_header_exists("x-request-id");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_allow_cross_origin_callers(ctx: &TestContext) {
    let response = ctx
        .client
        .get_with_headers("/health", &[("origin", "https://recorder.example")])
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.header("access-control-allow-origin").map(String::as_str),
        Some("*")
    );
    let exposed = response
        .header("access-control-expose-headers")
        .expect("Missing expose headers");
    assert!(exposed.contains("x-request-id"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_handle_concurrent_health_checks(ctx: &TestContext) {
    let mut futures = Vec::new();
    for _ in 0..10 {
        let client = ctx.client.clone();
        futures.push(async move { client.get("/health").await });
    }

    let results = futures::future::join_all(futures).await;

    for result in results {
        let response = result.unwrap();
        response.assert_status(StatusCode::OK);
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_use_different_endpoints_for_liveness_and_readiness(ctx: &TestContext) {
    let liveness_response = ctx.client.get("/health").await.unwrap();
    liveness_response.assert_status(StatusCode::OK);

    let readiness_response = ctx.client.get("/health/ready").await.unwrap();
    readiness_response.assert_status(StatusCode::OK);

    assert!(liveness_response.body.is_none()); // Plain text
    assert!(readiness_response.body.is_some()); // JSON
}
