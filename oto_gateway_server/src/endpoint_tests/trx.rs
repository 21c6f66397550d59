use std::sync::Arc;

use actix_web::{http::StatusCode, test::TestRequest};
use oto_auth_engine::{CredentialProviderError, CredentialSet};
use serde_json::Value;

use super::{
    helpers::{configure_app, get_request, TestResponse},
    mocks::MockProvider,
};
use crate::{
    config::ServerOptions,
    data_objects::FailureResponse,
    errors::INTERNAL_ERROR_MESSAGE,
    middleware::{PROCESS_TIME_HEADER, TRACE_ID_HEADER},
};

const BASE: &str = "memberid=TESTOK01&dest=08123456789&product=PROD";
const OTHER_IP: &str = "1.2.3.4:40000";

fn provider(ip_check: bool) -> MockProvider {
    let credentials = Arc::new(
        CredentialSet::new("TESTOK01", "1111", "TESTOK01")
            .with_allowed_address("10.0.0.2:9000")
            .with_report_url("http://example/report")
            .with_ip_check(ip_check),
    );
    let mut provider = MockProvider::new();
    provider.expect_credentials().returning(move || Ok(Arc::clone(&credentials)));
    provider
}

fn trx_request(query: &str, peer: &str) -> TestRequest {
    TestRequest::get().uri(&format!("/trx?{query}")).peer_addr(peer.parse().unwrap())
}

async fn get_trx(query: &str, peer: &str, ip_check: bool) -> TestResponse {
    let _ = env_logger::try_init().ok();
    get_request(trx_request(query, peer), configure_app(provider(ip_check), ServerOptions::default())).await
}

fn success(res: &TestResponse) -> Value {
    assert_eq!(res.status, StatusCode::OK, "body was {}", res.body);
    let body: Value = serde_json::from_str(&res.body).unwrap();
    assert_eq!(body["status"], "success");
    body
}

fn failure(res: &TestResponse, status: StatusCode, rc: &str) -> FailureResponse {
    assert_eq!(res.status, status, "body was {}", res.body);
    let body: FailureResponse = serde_json::from_str(&res.body).unwrap();
    assert!(!body.success);
    assert_eq!(body.rc, rc);
    body
}

#[actix_web::test]
async fn pin_password_success() {
    let res = get_trx(&format!("trxid=trx-2&{BASE}&pin=1111&password=TESTOK01"), OTHER_IP, false).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.body,
        r#"{"status":"success","trxid":"trx-2","memberid":"TESTOK01","sign":"AYn-o_1i9xHsUHeE4O6KkbQMeos"}"#
    );
}

#[actix_web::test]
async fn forbidden_address() {
    let res = get_trx(&format!("trxid=trx-1&{BASE}&pin=1111&password=TESTOK01"), OTHER_IP, true).await;
    let body = failure(&res, StatusCode::FORBIDDEN, "ForbiddenAddress");
    assert!(body.message.starts_with("Invalid IP"), "was {}", body.message);
}

#[actix_web::test]
async fn allowed_address() {
    let res = get_trx(&format!("trxid=trx-1&{BASE}&pin=1111&password=TESTOK01"), "10.0.0.2:51000", true).await;
    assert_eq!(success(&res)["trxid"], "trx-1");
}

#[actix_web::test]
async fn forwarded_for_is_only_trusted_when_enabled() {
    let query = format!("trxid=trx-1&{BASE}&pin=1111&password=TESTOK01");
    let req = trx_request(&query, OTHER_IP).insert_header(("X-Forwarded-For", "10.0.0.2, 1.2.3.4"));
    let res = get_request(req, configure_app(provider(true), ServerOptions::default())).await;
    failure(&res, StatusCode::FORBIDDEN, "ForbiddenAddress");

    let options = ServerOptions { use_x_forwarded_for: true, ..Default::default() };
    let req = trx_request(&query, OTHER_IP).insert_header(("X-Forwarded-For", "10.0.0.2, 1.2.3.4"));
    let res = get_request(req, configure_app(provider(true), options)).await;
    success(&res);
}

#[actix_web::test]
async fn bad_credentials() {
    let res = get_trx(&format!("trxid=trx-3&{BASE}&pin=badpin&password=wrong"), OTHER_IP, false).await;
    failure(&res, StatusCode::UNAUTHORIZED, "BadCredentials");
}

#[actix_web::test]
async fn signature_only_success() {
    let res = get_trx(&format!("trxid=trx-4&{BASE}&sign=PtN0yjZ08vfMxUAa11xmvPcKJDI"), OTHER_IP, false).await;
    let res = success(&res);
    assert_eq!(res["trxid"], "trx-4");
    assert_eq!(res["sign"], "PtN0yjZ08vfMxUAa11xmvPcKJDI");
}

#[actix_web::test]
async fn bad_signature() {
    let res = get_trx(&format!("trxid=trx-5&{BASE}&sign=this-is-not-a-signature"), OTHER_IP, false).await;
    failure(&res, StatusCode::UNAUTHORIZED, "BadSignature");
}

#[actix_web::test]
async fn signature_alongside_pin_password_must_agree() {
    let res = get_trx(&format!("trxid=trx-2&{BASE}&pin=1111&password=TESTOK01&sign=bogus"), OTHER_IP, false).await;
    failure(&res, StatusCode::UNAUTHORIZED, "SignatureMismatch");
}

#[actix_web::test]
async fn missing_proof() {
    let res = get_trx(&format!("trxid=trx-6&{BASE}&pin=1111"), OTHER_IP, false).await;
    let body = failure(&res, StatusCode::BAD_REQUEST, "MissingProof");
    assert!(body.message.contains("'sign'"), "was {}", body.message);
}

#[actix_web::test]
async fn unknown_query_fields_are_rejected() {
    let res = get_trx(&format!("trxid=trx-2&{BASE}&pin=1111&password=TESTOK01&debug=1"), OTHER_IP, false).await;
    let body = failure(&res, StatusCode::BAD_REQUEST, "InvalidQuery");
    assert!(body.message.contains("debug"), "was {}", body.message);
}

#[actix_web::test]
async fn required_query_fields() {
    let res = get_trx("trxid=trx-2&memberid=TESTOK01&product=PROD&pin=1111&password=TESTOK01", OTHER_IP, false).await;
    let body = failure(&res, StatusCode::BAD_REQUEST, "InvalidQuery");
    assert!(body.message.contains("dest"), "was {}", body.message);
}

#[actix_web::test]
async fn query_values_are_trimmed() {
    let query = "trxid=%20trx-2%20&memberid=%20TESTOK01&dest=08123456789%20&product=PROD&pin=%201111&password=TESTOK01";
    let res = success(&get_trx(query, OTHER_IP, false).await);
    assert_eq!(res["trxid"], "trx-2");
    assert_eq!(res["memberid"], "TESTOK01");
    assert_eq!(res["sign"], "AYn-o_1i9xHsUHeE4O6KkbQMeos");
}

#[actix_web::test]
async fn missing_configuration_is_an_internal_error() {
    let _ = env_logger::try_init().ok();
    let mut provider = MockProvider::new();
    provider
        .expect_credentials()
        .times(1)
        .returning(|| Err(CredentialProviderError::NotConfigured("OTO_PIN is not set".into())));
    let req = trx_request(&format!("trxid=trx-2&{BASE}&pin=1111&password=TESTOK01"), OTHER_IP);
    let res = get_request(req, configure_app(provider, ServerOptions::default())).await;
    let body = failure(&res, StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR");
    assert_eq!(body.message, INTERNAL_ERROR_MESSAGE);
    assert!(!res.body.contains("OTO_PIN"));
}

#[actix_web::test]
async fn trace_id_is_propagated() {
    let query = format!("trxid=trx-2&{BASE}&pin=1111&password=TESTOK01");
    let req = trx_request(&query, OTHER_IP).insert_header((TRACE_ID_HEADER, "abcDEF1234"));
    let res = get_request(req, configure_app(provider(false), ServerOptions::default())).await;
    assert_eq!(res.headers.get(TRACE_ID_HEADER).unwrap(), "abcDEF1234");
    let elapsed = res.headers.get(PROCESS_TIME_HEADER).unwrap().to_str().unwrap();
    assert!(elapsed.ends_with("ms"), "was {elapsed}");
}

#[actix_web::test]
async fn invalid_trace_id_is_replaced() {
    let query = format!("trxid=trx-1&{BASE}&pin=1111&password=TESTOK01");
    let req = trx_request(&query, OTHER_IP).insert_header((TRACE_ID_HEADER, "not/valid"));
    let res = get_request(req, configure_app(provider(true), ServerOptions::default())).await;
    // Failures carry the headers too
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    let trace_id = res.headers.get(TRACE_ID_HEADER).unwrap().to_str().unwrap();
    assert_ne!(trace_id, "not/valid");
    assert_eq!(trace_id.len(), 32);
}
