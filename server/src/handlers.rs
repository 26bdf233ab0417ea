//! One handler per route. Each makes a single store call and writes exactly
//! one response.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::AppError;
use crate::extract::{Flag, JsonBody, Path};
use crate::model::{
    AccountName, ActiveField, IdField, ListStatus, NewTodo, PriorityField, TitleField, TodoItem,
};
use crate::store::TodoStore;

type Listing = (StatusCode, Json<Vec<TodoItem>>);

/// 200 with the items, or 204 when nothing matched.
fn listing(items: Vec<TodoItem>) -> Listing {
    let status = if items.is_empty() {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::OK
    };
    (status, Json(items))
}

pub async fn health() -> Json<ListStatus> {
    Json(ListStatus::success("Everything is working fine"))
}

// --- reads ---

pub async fn list_todos(
    State(store): State<TodoStore>,
    Path(account): Path<AccountName>,
) -> Result<Listing, AppError> {
    Ok(listing(store.select_all(&account).await?))
}

pub async fn list_by_active(
    State(store): State<TodoStore>,
    Path((account, Flag(active))): Path<(AccountName, Flag)>,
) -> Result<Listing, AppError> {
    Ok(listing(store.select_by_active(active, &account).await?))
}

/// Priority `0` is "unset", never a threshold, so it lists the unprioritized
/// items instead.
pub async fn list_by_priority(
    State(store): State<TodoStore>,
    Path((account, threshold)): Path<(AccountName, i32)>,
) -> Result<Listing, AppError> {
    let items = if threshold == 0 {
        store.select_non_priority(&account).await?
    } else {
        store.select_by_priority(threshold, &account).await?
    };
    Ok(listing(items))
}

pub async fn list_by_category(
    State(store): State<TodoStore>,
    Path((account, category)): Path<(AccountName, String)>,
) -> Result<Listing, AppError> {
    Ok(listing(store.select_by_category(&category, &account).await?))
}

pub async fn get_by_id(
    State(store): State<TodoStore>,
    Path((account, id)): Path<(AccountName, i64)>,
) -> Result<Response, AppError> {
    let response = match store.select_by_id(id, &account).await? {
        Some(item) => (StatusCode::OK, Json(item)).into_response(),
        None => (StatusCode::NO_CONTENT, Json(serde_json::json!({}))).into_response(),
    };
    Ok(response)
}

// --- create / update ---

pub async fn add_todo(
    State(store): State<TodoStore>,
    Path(account): Path<AccountName>,
    JsonBody(todo): JsonBody<NewTodo>,
) -> Result<Json<ListStatus>, AppError> {
    let id = store.insert(&todo, &account).await?;
    tracing::debug!(%account, id, "todo added");
    Ok(Json(ListStatus::success(format!(
        "Title '{}' added",
        todo.title
    ))))
}

pub async fn change_title(
    State(store): State<TodoStore>,
    Path((account, id)): Path<(AccountName, i64)>,
    JsonBody(TitleField { title }): JsonBody<TitleField>,
) -> Result<Json<ListStatus>, AppError> {
    store.update_title(id, &title, &account).await?;
    Ok(Json(ListStatus::success(format!(
        "Title changed to '{title}' for id {id}"
    ))))
}

pub async fn change_priority(
    State(store): State<TodoStore>,
    Path((account, id)): Path<(AccountName, i64)>,
    JsonBody(PriorityField { priority }): JsonBody<PriorityField>,
) -> Result<Json<ListStatus>, AppError> {
    store.update_priority(id, priority, &account).await?;
    Ok(Json(ListStatus::success(format!(
        "Priority changed to {priority} for id {id}"
    ))))
}

pub async fn change_active(
    State(store): State<TodoStore>,
    Path((account, id)): Path<(AccountName, i64)>,
    JsonBody(ActiveField { active }): JsonBody<ActiveField>,
) -> Result<Json<ListStatus>, AppError> {
    store.update_active(id, active, &account).await?;
    Ok(Json(ListStatus::success(format!(
        "Active changed to '{active}' for id {id}"
    ))))
}

// --- deletes ---

pub async fn remove_by_title(
    State(store): State<TodoStore>,
    Path(account): Path<AccountName>,
    JsonBody(TitleField { title }): JsonBody<TitleField>,
) -> Result<Json<ListStatus>, AppError> {
    let removed = store.delete_by_title(&title, &account).await?;
    tracing::debug!(%account, removed, "removed by title");
    Ok(Json(ListStatus::success(format!(
        "Todos with '{title}' title removed"
    ))))
}

pub async fn remove_by_priority(
    State(store): State<TodoStore>,
    Path(account): Path<AccountName>,
    JsonBody(PriorityField { priority }): JsonBody<PriorityField>,
) -> Result<Json<ListStatus>, AppError> {
    let removed = store.delete_by_priority(priority, &account).await?;
    tracing::debug!(%account, removed, "removed by priority");
    Ok(Json(ListStatus::success(format!(
        "Todos with '{priority}' priority removed"
    ))))
}

pub async fn remove_inactive(
    State(store): State<TodoStore>,
    Path(account): Path<AccountName>,
) -> Result<Json<ListStatus>, AppError> {
    let removed = store.delete_inactive(&account).await?;
    tracing::debug!(%account, removed, "removed inactive");
    Ok(Json(ListStatus::success("Inactive todos removed")))
}

pub async fn remove_by_id(
    State(store): State<TodoStore>,
    Path(account): Path<AccountName>,
    JsonBody(IdField { id }): JsonBody<IdField>,
) -> Result<Json<ListStatus>, AppError> {
    let removed = store.delete_by_id(id, &account).await?;
    tracing::debug!(%account, removed, "removed by id");
    Ok(Json(ListStatus::success(format!(
        "Todo with '{id}' id removed"
    ))))
}

// --- fallbacks ---

pub async fn unknown_route() -> AppError {
    AppError::bad_request("Bad Request")
}
