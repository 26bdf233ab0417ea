//! Extractors whose rejections render as the service's JSON error envelope.
//!
//! axum's own `Path` and `Json` reject with plain-text bodies and, for JSON,
//! insist on a `Content-Type: application/json` header. The clients of this
//! service send JSON with whatever content type curl picks, so bodies are
//! parsed from raw bytes.

use std::str::FromStr;

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use serde::{de::DeserializeOwned, Deserialize};

use crate::error::AppError;

/// Typed path parameters. Any segment that fails to parse yields a 400.
#[derive(Debug)]
pub struct Path<T>(pub T);

impl<S, T> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Path(value)) => Ok(Path(value)),
            Err(rejection) => Err(AppError::bad_request(rejection.body_text())),
        }
    }
}

/// JSON request body, decoded regardless of the declared content type.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            AppError::bad_request(format!("Failed to decode body: {}", rejection.body_text()))
        })?;
        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| AppError::bad_request(format!("Failed to decode body: {e}")))
    }
}

/// Boolean path segment. Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and
/// the matching false spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Flag(pub bool);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid boolean `{0}`")]
pub struct InvalidFlag(String);

impl FromStr for Flag {
    type Err = InvalidFlag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(Flag(true)),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(Flag(false)),
            other => Err(InvalidFlag(other.to_string())),
        }
    }
}

impl TryFrom<String> for Flag {
    type Error = InvalidFlag;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
