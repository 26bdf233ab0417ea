//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each route is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Reads share `parse_list` / `parse_get_todo`, and every mutating route
//! shares `parse_status`, because the server answers them with the same
//! shapes.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;
use serde_json::json;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ListStatus, NewTodo, TodoItem};

/// Characters escaped inside a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Synchronous, stateless client for the todo API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, account: &str, rest: &[&str]) -> String {
        let mut url = format!("{}/todo/{}", self.base_url, encode(account));
        for segment in rest {
            url.push('/');
            url.push_str(&encode(segment));
        }
        url
    }

    // --- reads ---

    pub fn build_list_todos(&self, account: &str) -> HttpRequest {
        get(self.url(account, &[]))
    }

    pub fn build_list_active(&self, account: &str, active: bool) -> HttpRequest {
        get(self.url(account, &["active", &active.to_string()]))
    }

    /// Items with priority `1..=threshold`; a threshold of `0` lists the
    /// items with no priority instead.
    pub fn build_list_by_priority(&self, account: &str, threshold: i32) -> HttpRequest {
        get(self.url(account, &["highs", &threshold.to_string()]))
    }

    pub fn build_list_by_category(&self, account: &str, category: &str) -> HttpRequest {
        get(self.url(account, &["cat", category]))
    }

    pub fn build_get_todo(&self, account: &str, id: i64) -> HttpRequest {
        get(self.url(account, &["id", &id.to_string()]))
    }

    // --- create / update ---

    pub fn build_add_todo(&self, account: &str, input: &NewTodo) -> Result<HttpRequest, ApiError> {
        with_body(HttpMethod::Post, self.url(account, &["add"]), input)
    }

    pub fn build_change_title(
        &self,
        account: &str,
        id: i64,
        title: &str,
    ) -> Result<HttpRequest, ApiError> {
        let path = self.url(account, &["ctitle", &id.to_string()]);
        with_body(HttpMethod::Post, path, &json!({ "title": title }))
    }

    pub fn build_change_priority(
        &self,
        account: &str,
        id: i64,
        priority: i32,
    ) -> Result<HttpRequest, ApiError> {
        let path = self.url(account, &["cpri", &id.to_string()]);
        with_body(HttpMethod::Post, path, &json!({ "item_priority": priority }))
    }

    pub fn build_change_active(
        &self,
        account: &str,
        id: i64,
        active: bool,
    ) -> Result<HttpRequest, ApiError> {
        let path = self.url(account, &["cactive", &id.to_string()]);
        with_body(HttpMethod::Post, path, &json!({ "active": active }))
    }

    // --- deletes ---

    pub fn build_remove_by_title(&self, account: &str, title: &str) -> Result<HttpRequest, ApiError> {
        with_body(
            HttpMethod::Delete,
            self.url(account, &["rmtitle"]),
            &json!({ "title": title }),
        )
    }

    pub fn build_remove_by_priority(
        &self,
        account: &str,
        priority: i32,
    ) -> Result<HttpRequest, ApiError> {
        with_body(
            HttpMethod::Delete,
            self.url(account, &["rmpri"]),
            &json!({ "item_priority": priority }),
        )
    }

    pub fn build_remove_inactive(&self, account: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.url(account, &["rminactive"]),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_remove_by_id(&self, account: &str, id: i64) -> Result<HttpRequest, ApiError> {
        with_body(
            HttpMethod::Delete,
            self.url(account, &["rmid"]),
            &json!({ "id": id }),
        )
    }

    // --- parsing ---

    /// Parse any list route. 204 means nothing matched.
    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<TodoItem>, ApiError> {
        if response.status == 204 {
            return Ok(Vec::new());
        }
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// Parse `GET /todo/{account}/id/{id}`. 204 means no such item.
    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Option<TodoItem>, ApiError> {
        if response.status == 204 {
            return Ok(None);
        }
        check_status(&response, 200)?;
        serde_json::from_str(&response.body)
            .map(Some)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// Parse the status envelope of any add, change or remove route.
    pub fn parse_status(&self, response: HttpResponse) -> Result<ListStatus, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }
}

fn encode(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

fn get(path: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn with_body<T: Serialize + ?Sized>(
    method: HttpMethod,
    path: String,
    payload: &T,
) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(payload).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

/// Map non-success status codes to the appropriate `ApiError` variant,
/// pulling the message out of the error envelope when there is one.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    let message = serde_json::from_str::<serde_json::Value>(&response.body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| response.body.clone());
    if response.status == 400 {
        return Err(ApiError::BadRequest { message });
    }
    Err(ApiError::HttpError {
        status: response.status,
        message,
    })
}
