mod common;
mod support;

use std::sync::Arc;

use actix_web::http::header;
use actix_web::test;
use serde_json::{json, Value};
use support::auth::{bearer_header, mint_expired_token, tamper_signature};
use support::create_test_app;
use support::users::{alice, state_with_users, test_settings, CountingResolver, FailingResolver};
use tokengate::{AppState, ClaimsCodec, SecurityConfig};
use tokengate_test_support::problem_details::assert_unauthorized;

async fn login_token(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
) -> String {
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "id": "U1", "email": "a@x.com" }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    resp.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .expect("Bearer token in response")
        .to_string()
}

#[actix_web::test]
async fn test_login_then_access_scenario() {
    let (state, _store) = state_with_users(vec![alice()]);
    let app = create_test_app(state).build().await;

    // /login is exempt: no Authorization header needed to reach the handler
    let token = login_token(&app).await;

    let req = test::TestRequest::get()
        .uri("/some-path")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], "U1");

    let req = test::TestRequest::get()
        .uri("/some-path")
        .insert_header((
            header::AUTHORIZATION,
            format!("Bearer {}", tamper_signature(&token)),
        ))
        .to_request();
    assert_unauthorized(test::call_service(&app, req).await).await;

    let req = test::TestRequest::get().uri("/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
}

#[actix_web::test]
async fn test_me_returns_identity_and_claims() {
    let (state, _store) = state_with_users(vec![alice()]);
    let app = create_test_app(state).build().await;
    let token = login_token(&app).await;

    let req = test::TestRequest::get()
        .uri("/me")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["identity"]["id"], "U1");
    assert_eq!(body["identity"]["email"], "a@x.com");
    assert_eq!(body["claims"]["sub"], "U1");
    assert_eq!(body["claims"]["ext"]["email"], "a@x.com");
    let iat = body["claims"]["iat"].as_i64().expect("iat");
    let exp = body["claims"]["exp"].as_i64().expect("exp");
    assert_eq!(exp - iat, 15 * 60);
}

#[actix_web::test]
async fn test_missing_or_non_bearer_credentials_are_unauthorized() {
    let (state, _store) = state_with_users(vec![alice()]);
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::get().uri("/some-path").to_request();
    assert_unauthorized(test::call_service(&app, req).await).await;

    for value in ["Basic dXNlcjpwYXNz", "Bearer", "Token abc.def.ghi"] {
        let req = test::TestRequest::get()
            .uri("/some-path")
            .insert_header((header::AUTHORIZATION, value))
            .to_request();
        assert_unauthorized(test::call_service(&app, req).await).await;
    }
}

#[actix_web::test]
async fn test_expired_and_foreign_tokens_are_unauthorized() {
    let (state, _store) = state_with_users(vec![alice()]);
    let codec = state.codec.clone();
    let app = create_test_app(state).build().await;

    let expired = mint_expired_token(&codec, "U1");
    let foreign = bearer_header(
        &ClaimsCodec::new(&SecurityConfig::for_tests()),
        "U1",
        "a@x.com",
    );

    for value in [format!("Bearer {expired}"), foreign, "Bearer not.a.jwt".to_string()] {
        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header((header::AUTHORIZATION, value))
            .to_request();
        assert_unauthorized(test::call_service(&app, req).await).await;
    }
}

#[actix_web::test]
async fn test_deleted_user_is_unauthorized_with_valid_token() {
    let (state, store) = state_with_users(vec![alice()]);
    let codec = state.codec.clone();
    let app = create_test_app(state).build().await;
    let auth = bearer_header(&codec, "U1", "a@x.com");

    store.remove("U1");

    let req = test::TestRequest::get()
        .uri("/me")
        .insert_header((header::AUTHORIZATION, auth))
        .to_request();
    assert_unauthorized(test::call_service(&app, req).await).await;
}

#[actix_web::test]
async fn test_exempt_routes_never_consult_resolver() {
    let resolver = Arc::new(CountingResolver::new(vec![alice()]));
    let state = AppState::with_resolver(test_settings(), resolver.clone());
    let codec = state.codec.clone();
    let app = create_test_app(state).build().await;
    let valid = bearer_header(&codec, "U1", "a@x.com");

    for (uri, auth) in [
        ("/metrics", None),
        ("/metrics", Some("Bearer garbage")),
        ("/health", Some(valid.as_str())),
        ("/public/about", Some("Basic nope")),
    ] {
        let mut req = test::TestRequest::get().uri(uri);
        if let Some(value) = auth {
            req = req.insert_header((header::AUTHORIZATION, value));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status().as_u16(), 200, "{uri} {auth:?}");
    }
    assert_eq!(resolver.calls(), 0);

    // Wildcards stay within one segment
    let req = test::TestRequest::get().uri("/public/a/b").to_request();
    assert_unauthorized(test::call_service(&app, req).await).await;
    assert_eq!(resolver.calls(), 0);

    let req = test::TestRequest::get()
        .uri("/some-path")
        .insert_header((header::AUTHORIZATION, valid))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 200);
    assert_eq!(resolver.calls(), 1);
}

#[actix_web::test]
async fn test_store_failure_is_internal_error() {
    let state = AppState::with_resolver(test_settings(), Arc::new(FailingResolver));
    let codec = state.codec.clone();
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::get()
        .uri("/me")
        .insert_header((header::AUTHORIZATION, bearer_header(&codec, "U1", "a@x.com")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    common::assert_problem_details_structure(resp, 500, "INTERNAL", "Internal server error").await;
}

#[actix_web::test]
async fn test_rejection_trace_id_matches_request_id() {
    let (state, _store) = state_with_users(vec![alice()]);
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::get().uri("/me").to_request();
    let resp = test::call_service(&app, req).await;

    let request_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-request-id header")
        .to_string();
    let problem = assert_unauthorized(resp).await;

    assert_eq!(problem.trace_id, request_id);
}

#[actix_web::test]
async fn test_unknown_path_is_gated_then_not_found() {
    let (state, _store) = state_with_users(vec![alice()]);
    let codec = state.codec.clone();
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::get().uri("/nope").to_request();
    assert_unauthorized(test::call_service(&app, req).await).await;

    let req = test::TestRequest::get()
        .uri("/nope")
        .insert_header((header::AUTHORIZATION, bearer_header(&codec, "U1", "a@x.com")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    common::assert_problem_details_structure(resp, 404, "NOT_FOUND", "No resource at this path")
        .await;
}
