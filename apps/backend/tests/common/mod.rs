#![allow(dead_code)]

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;

pub mod proptest_prelude;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    tokengate_test_support::logging::init();
}

/// Assert a Problem Details response with the given status, code and detail.
pub async fn assert_problem_details_structure(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
    expected_detail: &str,
) {
    let status = StatusCode::from_u16(expected_status).expect("valid status code");
    let problem =
        tokengate_test_support::problem_details::assert_problem_details_from_service_response(
            resp,
            expected_code,
            status,
            None,
        )
        .await;

    assert_eq!(problem.detail, expected_detail);
    assert_eq!(
        problem.type_,
        format!("https://tokengate.dev/errors/{expected_code}")
    );
    assert!(!problem.title.is_empty());
    assert!(!problem.trace_id.is_empty());
}
