#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{Map, Value};
use tower::ServiceExt;

use lumina_api::database::{Binding, DatabaseError, RecordStore, Row};
use lumina_api::schema::{EntitySchema, Key};
use lumina_api::{build_router, AppState};

// ── MemoryStore ──────────────────────────────────────────────────────────────

#[derive(Default)]
struct Tables {
    rows: HashMap<&'static str, Vec<Row>>,
    sequences: HashMap<&'static str, i64>,
    writes: usize,
}

/// In-process [`RecordStore`] keyed by table name.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    failing: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails as if the database were unreachable.
    pub fn failing() -> Self {
        Self { failing: true, ..Self::default() }
    }

    /// Store rows as-is and advance the key sequence past them.
    pub fn seed(&self, schema: &EntitySchema, rows: Vec<Value>) {
        let mut tables = self.tables.lock().unwrap();
        for row in rows {
            let Value::Object(row) = row else { panic!("seed rows must be objects") };
            if let Key::Surrogate(key) = schema.key {
                let id = row.get(key).and_then(Value::as_i64).unwrap_or(0);
                let seq = tables.sequences.entry(schema.table).or_insert(0);
                *seq = (*seq).max(id);
            }
            tables.rows.entry(schema.table).or_default().push(row);
        }
    }

    pub fn rows(&self, schema: &EntitySchema) -> Vec<Row> {
        self.tables.lock().unwrap().rows.get(schema.table).cloned().unwrap_or_default()
    }

    /// Number of insert/update/delete calls that reached the store.
    pub fn writes(&self) -> usize {
        self.tables.lock().unwrap().writes
    }

    fn check(&self) -> Result<(), DatabaseError> {
        if self.failing {
            Err(DatabaseError::Unavailable("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

fn matches_key(row: &Row, key: &[Binding]) -> bool {
    key.iter().all(|b| row.get(b.column) == Some(&b.value.to_json()))
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn select_all(&self, schema: &EntitySchema) -> Result<Vec<Row>, DatabaseError> {
        self.check()?;
        Ok(self.rows(schema))
    }

    async fn insert(&self, schema: &EntitySchema, values: &[Binding]) -> Result<Row, DatabaseError> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        tables.writes += 1;

        let mut row = Map::new();
        let mut key = Map::new();
        match schema.key {
            Key::Surrogate(column) => {
                let seq = tables.sequences.entry(schema.table).or_insert(0);
                *seq += 1;
                row.insert(column.to_string(), Value::from(*seq));
                key.insert(column.to_string(), Value::from(*seq));
            }
            Key::Composite(fields) => {
                let candidate: Vec<Binding> = values
                    .iter()
                    .filter(|b| fields.iter().any(|f| f.name == b.column))
                    .cloned()
                    .collect();
                let table = tables.rows.get(schema.table);
                if table.map_or(false, |rows| rows.iter().any(|r| matches_key(r, &candidate))) {
                    return Err(DatabaseError::Constraint(format!(
                        "duplicate key value violates unique constraint \"{}_pkey\"",
                        schema.table
                    )));
                }
                for b in &candidate {
                    key.insert(b.column.to_string(), b.value.to_json());
                }
            }
        }

        for binding in values {
            row.insert(binding.column.to_string(), binding.value.to_json());
        }
        tables.rows.entry(schema.table).or_default().push(row);
        Ok(key)
    }

    async fn update(
        &self,
        schema: &EntitySchema,
        key: &[Binding],
        values: &[Binding],
    ) -> Result<u64, DatabaseError> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        tables.writes += 1;

        let mut affected = 0;
        for row in tables.rows.entry(schema.table).or_default().iter_mut() {
            if matches_key(row, key) {
                for binding in values {
                    row.insert(binding.column.to_string(), binding.value.to_json());
                }
                affected += 1;
            }
        }
        Ok(affected)
    }

    async fn delete(&self, schema: &EntitySchema, key: &[Binding]) -> Result<u64, DatabaseError> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        tables.writes += 1;

        let rows = tables.rows.entry(schema.table).or_default();
        let before = rows.len();
        rows.retain(|row| !matches_key(row, key));
        Ok((before - rows.len()) as u64)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.check()
    }
}

// ── HTTP helpers ─────────────────────────────────────────────────────────────

pub fn app(store: &MemoryStore) -> Router {
    build_router(AppState::new(store.clone()))
}

/// Send one request through the router and decode the JSON body (`null` if empty).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => builder.body(Body::empty())?,
    };
    dispatch(app, request).await
}

/// Send a raw body with the JSON content type.
pub async fn send_raw(app: &Router, method: Method, uri: &str, body: &'static str) -> Result<(StatusCode, Value)> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))?;
    dispatch(app, request).await
}

async fn dispatch(app: &Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, json))
}
