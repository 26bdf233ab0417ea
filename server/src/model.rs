//! Wire and row types for the todo service.
//!
//! `TodoItem` is both the `Todos` row and the JSON shape returned by reads.
//! Request bodies get their own small structs so a missing field is a decode
//! error instead of a silent zero value.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Name of the account that owns a set of todo items.
///
/// Never empty. Every store operation takes one, so an unscoped query cannot
/// be written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountName(String);

impl AccountName {
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidAccountName> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InvalidAccountName);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccountName {
    type Error = InvalidAccountName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountName> for String {
    fn from(value: AccountName) -> Self {
        value.0
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("account name must not be empty")]
pub struct InvalidAccountName;

/// A persisted todo entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TodoItem {
    pub id: i64,
    #[serde(rename = "acct_name")]
    #[sqlx(rename = "acct_name")]
    pub account_name: String,
    pub title: String,
    pub body: String,
    pub category: String,
    /// `0` means no priority was set; otherwise lower is more urgent.
    #[serde(rename = "item_priority")]
    #[sqlx(rename = "item_priority")]
    pub priority: i32,
    pub publish_date: DateTime<Utc>,
    pub active: bool,
}

/// Body of `POST /todo/{account}/add`.
///
/// Unknown fields such as `id`, `active`, `publish_date` or `acct_name` are
/// accepted and ignored; the server assigns those.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewTodo {
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, rename = "item_priority")]
    pub priority: i32,
}

#[derive(Debug, Deserialize)]
pub struct TitleField {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct PriorityField {
    #[serde(rename = "item_priority")]
    pub priority: i32,
}

#[derive(Debug, Deserialize)]
pub struct ActiveField {
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct IdField {
    pub id: i64,
}

/// Envelope returned by every mutating route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListStatus {
    pub status: String,
    pub info: String,
}

impl ListStatus {
    pub fn success(info: impl Into<String>) -> Self {
        Self {
            status: "Success".to_string(),
            info: info.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_name_rejects_blank() {
        assert!(AccountName::new("").is_err());
        assert!(AccountName::new("   ").is_err());
        assert_eq!(AccountName::new("alice").unwrap().as_str(), "alice");
    }

    #[test]
    fn todo_item_uses_wire_field_names() {
        let item = TodoItem {
            id: 7,
            account_name: "alice".to_string(),
            title: "Buy milk".to_string(),
            body: String::new(),
            category: "shopping".to_string(),
            priority: 3,
            publish_date: DateTime::from_timestamp(0, 0).unwrap(),
            active: true,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["acct_name"], "alice");
        assert_eq!(json["item_priority"], 3);
        assert_eq!(json["publish_date"], "1970-01-01T00:00:00Z");
        assert_eq!(json["active"], true);
        assert!(json.get("priority").is_none());
    }

    #[test]
    fn new_todo_defaults_optional_fields() {
        let input: NewTodo = serde_json::from_str(r#"{"title":"Only a title"}"#).unwrap();
        assert_eq!(input.title, "Only a title");
        assert_eq!(input.body, "");
        assert_eq!(input.category, "");
        assert_eq!(input.priority, 0);
    }

    #[test]
    fn new_todo_ignores_server_assigned_fields() {
        let input: NewTodo = serde_json::from_str(
            r#"{"title":"t","id":99,"active":false,"acct_name":"mallory","item_priority":2}"#,
        )
        .unwrap();
        assert_eq!(input.priority, 2);
    }

    #[test]
    fn new_todo_requires_title() {
        let result: Result<NewTodo, _> = serde_json::from_str(r#"{"item_priority":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn single_field_bodies_require_their_field() {
        assert!(serde_json::from_str::<PriorityField>("{}").is_err());
        assert!(serde_json::from_str::<ActiveField>(r#"{"active":"yes"}"#).is_err());
        let id: IdField = serde_json::from_str(r#"{"id":8}"#).unwrap();
        assert_eq!(id.id, 8);
    }
}
