//! Wire DTOs for the todo API.
//!
//! # Design
//! These mirror the server's JSON but are defined independently, so the
//! client does not pull in axum or sqlx. The integration test catches any
//! schema drift between the two crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A todo item as returned by the read routes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: i64,
    pub acct_name: String,
    pub title: String,
    pub body: String,
    pub category: String,
    pub item_priority: i32,
    pub publish_date: DateTime<Utc>,
    pub active: bool,
}

/// Payload for `POST /todo/{account}/add`. The server assigns `id`,
/// `active` and `publish_date`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(default)]
    pub item_priority: i32,
}

/// Envelope returned by every mutating route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListStatus {
    pub status: String,
    pub info: String,
}
