//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use serde_json::Value;
use todo_core::{
    ApiError, HttpMethod, HttpRequest, HttpResponse, ListStatus, NewTodo, TodoClient, TodoItem,
};

const BASE_URL: &str = "http://localhost:8080";

fn client() -> TodoClient {
    TodoClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");
    let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, expected["body"], "{name}: body");
}

// ---------------------------------------------------------------------------
// Add
// ---------------------------------------------------------------------------

#[test]
fn add_test_vectors() {
    let raw = include_str!("../../test-vectors/add.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let account = case["account"].as_str().unwrap();
        let input: NewTodo = serde_json::from_value(case["input"].clone()).unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_add_todo(account, &input).unwrap();
        assert_request(name, &req, expected_req);

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        // Verify parse
        let status = c.parse_status(simulated(case)).unwrap();
        let expected: ListStatus = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(status, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let raw = include_str!("../../test-vectors/list.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let account = case["account"].as_str().unwrap();
        let argument = case["argument"].as_str().unwrap_or_default();

        let req = match case["route"].as_str().unwrap() {
            "all" => c.build_list_todos(account),
            "active" => c.build_list_active(account, argument.parse().unwrap()),
            "highs" => c.build_list_by_priority(account, argument.parse().unwrap()),
            "cat" => c.build_list_by_category(account, argument),
            other => panic!("{name}: unknown route {other}"),
        };
        assert_eq!(req.method, HttpMethod::Get, "{name}: method");
        assert_eq!(
            req.path,
            format!("{BASE_URL}{}", case["expected_path"].as_str().unwrap()),
            "{name}: path"
        );
        assert!(req.body.is_none(), "{name}: body");

        let todos = c.parse_list(simulated(case)).unwrap();
        let expected: Vec<TodoItem> = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(todos, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Change
// ---------------------------------------------------------------------------

#[test]
fn change_test_vectors() {
    let raw = include_str!("../../test-vectors/change.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let account = case["account"].as_str().unwrap();
        let id = case["id"].as_i64().unwrap();
        let value = &case["value"];

        let req = match case["field"].as_str().unwrap() {
            "title" => c.build_change_title(account, id, value.as_str().unwrap()),
            "item_priority" => c.build_change_priority(account, id, value.as_i64().unwrap() as i32),
            "active" => c.build_change_active(account, id, value.as_bool().unwrap()),
            other => panic!("{name}: unknown field {other}"),
        }
        .unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_status(simulated(case));
        match case.get("expected_error").and_then(Value::as_str) {
            Some(expected) => match result.unwrap_err() {
                ApiError::BadRequest { message } => assert_eq!(message, expected, "{name}: error"),
                other => panic!("{name}: unexpected error {other}"),
            },
            None => {
                let status = result.unwrap();
                assert_eq!(status.status, "Success", "{name}: status");
                assert_eq!(status.info, case["expected_info"].as_str().unwrap(), "{name}: info");
            }
        }
    }
}
