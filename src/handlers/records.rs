//! Generic CRUD handlers. The entity they operate on comes from the
//! `Extension<&'static EntitySchema>` layered onto each entity's routes.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde_json::{json, Map, Value};
use tracing::{error, info, warn};

use crate::api::{ApiResponse, ApiResult};
use crate::database::{record, Binding};
use crate::error::ApiError;
use crate::schema::{EntitySchema, MissingRow, Record};
use crate::state::AppState;

type Entity = Extension<&'static EntitySchema>;

fn body_object(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Map<String, Value>, ApiError> {
    let Json(value) = payload?;
    record::as_object(value).map_err(|e| ApiError::bad_request(e.to_string()))
}

fn path_id(id: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    let Path(id) = id?;
    Ok(id)
}

/// GET /{entity} - every row, fields in schema order
pub async fn list(
    State(state): State<AppState>,
    Extension(schema): Entity,
) -> ApiResult<Vec<Record>> {
    let rows = state.store.select_all(schema).await.map_err(|e| {
        error!(entity = schema.name, error = %e, "READ: listing failed");
        ApiError::read_failed(schema.messages.list_failed, &e)
    })?;

    info!(entity = schema.name, count = rows.len(), "READ: listing completed");
    Ok(ApiResponse::success(rows.into_iter().map(|row| schema.project(row)).collect()))
}

/// POST /{entity} - insert one row
pub async fn create(
    State(state): State<AppState>,
    Extension(schema): Entity,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let payload = body_object(payload)?;
    let values = record::insert_bindings(schema, &payload)
        .map_err(|e| ApiError::rejected(schema.messages.create_failed, e))?;

    let key = state.store.insert(schema, &values).await.map_err(|e| {
        error!(entity = schema.name, error = %e, "CREATE: insert failed");
        ApiError::write_failed(schema.messages.create_failed, &e)
    })?;

    let key = Value::Object(key);
    info!(entity = schema.name, key = %key, "CREATE: record created");
    Ok(ApiResponse::created(json!({ "message": schema.messages.created })))
}

/// PUT /{entity}/:id - overwrite every mutable field
pub async fn update(
    State(state): State<AppState>,
    Extension(schema): Entity,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let id = path_id(id)?;
    let payload = body_object(payload)?;
    let values = record::update_bindings(schema, &payload)
        .map_err(|e| ApiError::rejected(schema.messages.update_failed, e))?;
    let key = record::surrogate_key(schema, id);

    let affected = state.store.update(schema, &key, &values).await.map_err(|e| {
        error!(entity = schema.name, id, error = %e, "UPDATE: update failed");
        ApiError::write_failed(schema.messages.update_failed, &e)
    })?;

    if affected == 0 {
        warn!(entity = schema.name, id, "UPDATE: no row matched");
    } else {
        info!(entity = schema.name, id, "UPDATE: record updated");
    }
    Ok(ApiResponse::message(schema.messages.updated))
}

/// DELETE /{entity}/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(schema): Entity,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Value> {
    let id = path_id(id)?;
    remove(&state, schema, record::surrogate_key(schema, id)).await
}

/// DELETE /{link entity} - composite key in the body
pub async fn delete_by_body(
    State(state): State<AppState>,
    Extension(schema): Entity,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let payload = body_object(payload)?;
    let key = record::key_bindings(schema, &payload)
        .map_err(|e| ApiError::rejected(schema.messages.delete_failed, e))?;
    remove(&state, schema, key).await
}

async fn remove(
    state: &AppState,
    schema: &'static EntitySchema,
    key: Vec<Binding>,
) -> ApiResult<Value> {
    let key_repr = key_to_json(&key);

    let affected = state.store.delete(schema, &key).await.map_err(|e| {
        error!(entity = schema.name, key = %key_repr, error = %e, "DELETE: delete failed");
        ApiError::write_failed(schema.messages.delete_failed, &e)
    })?;

    if affected == 0 {
        match schema.on_missing_delete {
            MissingRow::NotFound => {
                error!(entity = schema.name, key = %key_repr, "DELETE: not found");
                return Err(ApiError::not_found(schema.messages.not_found));
            }
            MissingRow::Ignore => {
                warn!(entity = schema.name, key = %key_repr, "DELETE: no row matched");
            }
        }
    } else {
        info!(entity = schema.name, key = %key_repr, "DELETE: record removed");
    }

    Ok(ApiResponse::message(schema.messages.deleted))
}

fn key_to_json(key: &[Binding]) -> Value {
    Value::Object(key.iter().map(|b| (b.column.to_string(), b.value.to_json())).collect())
}
