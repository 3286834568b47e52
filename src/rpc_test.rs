use super::*;
use serde_json::json;

struct TestError;

impl std::fmt::Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "upstream fell over")
    }
}

impl ErrorCode for TestError {
    fn error_code(&self) -> &'static str {
        "E_TEST"
    }

    fn retryable(&self) -> bool {
        true
    }
}

#[test]
fn request_parses_numeric_and_string_ids() {
    let numeric: Request = serde_json::from_value(json!({ "jsonrpc": "2.0", "id": 7, "method": "ping" })).unwrap();
    assert_eq!(numeric.id, Some(RequestId::Number(7)));

    let text: Request = serde_json::from_value(json!({ "jsonrpc": "2.0", "id": "abc", "method": "ping" })).unwrap();
    assert_eq!(text.id, Some(RequestId::String("abc".into())));
}

#[test]
fn request_without_id_is_notification() {
    let req: Request = serde_json::from_value(json!({ "jsonrpc": "2.0", "method": "notifications/initialized" })).unwrap();
    assert!(req.is_notification());
    assert!(req.params().is_null());
}

#[test]
fn empty_object_parses_as_notification() {
    let req: Request = serde_json::from_str("{}").unwrap();
    assert!(req.is_notification());
    assert!(req.method.is_none());
}

#[test]
fn success_omits_error_field() {
    let resp = Response::success(Some(RequestId::Number(1)), json!({ "ok": true }));
    let value = serde_json::to_value(&resp).unwrap();
    assert_eq!(value["jsonrpc"], "2.0");
    assert_eq!(value["id"], 1);
    assert_eq!(value["result"]["ok"], true);
    assert!(value.get("error").is_none());
}

#[test]
fn error_with_no_id_serializes_null_id() {
    let resp = Response::error(None, error_codes::PARSE_ERROR, "parse error");
    let value = serde_json::to_value(&resp).unwrap();
    assert!(value["id"].is_null());
    assert_eq!(value["error"]["code"], -32700);
    assert!(value.get("result").is_none());
}

#[test]
fn error_from_carries_code_and_retryable() {
    let resp = Response::error_from(
        Some(RequestId::String("x".into())),
        error_codes::INTERNAL_ERROR,
        &TestError,
        Some(json!({ "kind": "upstream" })),
    );
    let err = resp.error.unwrap();
    assert_eq!(err.message, "upstream fell over");
    let data = err.data.unwrap();
    assert_eq!(data["code"], "E_TEST");
    assert_eq!(data["retryable"], true);
    assert_eq!(data["kind"], "upstream");
}
