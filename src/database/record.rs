//! Request payload to typed statement parameters.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::database::value::{Binding, SqlValue};
use crate::schema::{ColumnType, EntitySchema, Field, Key};

/// Errors that can occur while reading a request payload
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("Dados não fornecidos")]
    NotAnObject,
    #[error("Campos obrigatórios ausentes: {}", .0.join(", "))]
    MissingRequiredFields(Vec<&'static str>),
    #[error("campo '{field}' inválido: esperado {expected}")]
    InvalidField { field: &'static str, expected: &'static str },
}

/// Require the body to be a JSON object. An empty object is accepted and
/// reported later as missing fields.
pub fn as_object(payload: Value) -> Result<Map<String, Value>, RecordError> {
    match payload {
        Value::Object(map) => Ok(map),
        _ => Err(RecordError::NotAnObject),
    }
}

/// Parameters for an insert: every insertable field, absent optionals as NULL.
pub fn insert_bindings(
    schema: &EntitySchema,
    payload: &Map<String, Value>,
) -> Result<Vec<Binding>, RecordError> {
    bindings_for(&schema.insertable_fields(), payload)
}

/// Parameters for an update: every mutable field. Key fields in the payload are ignored.
pub fn update_bindings(
    schema: &EntitySchema,
    payload: &Map<String, Value>,
) -> Result<Vec<Binding>, RecordError> {
    bindings_for(&schema.updatable_fields(), payload)
}

/// Composite key read from a request body.
pub fn key_bindings(
    schema: &EntitySchema,
    payload: &Map<String, Value>,
) -> Result<Vec<Binding>, RecordError> {
    match schema.key {
        Key::Composite(fields) => {
            let fields: Vec<&'static Field> = fields.iter().collect();
            bindings_for(&fields, payload)
        }
        Key::Surrogate(_) => Ok(Vec::new()),
    }
}

/// Surrogate key from a path id.
pub fn surrogate_key(schema: &EntitySchema, id: i32) -> Vec<Binding> {
    schema
        .key_columns()
        .into_iter()
        .map(|column| Binding::new(column, SqlValue::Integer(Some(id))))
        .collect()
}

fn bindings_for(
    fields: &[&'static Field],
    payload: &Map<String, Value>,
) -> Result<Vec<Binding>, RecordError> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|f| f.required && !payload.contains_key(f.name))
        .map(|f| f.name)
        .collect();
    if !missing.is_empty() {
        return Err(RecordError::MissingRequiredFields(missing));
    }

    fields
        .iter()
        .map(|field| {
            let value = match payload.get(field.name) {
                Some(v) => coerce(field, v)?,
                None => SqlValue::null(field.column_type),
            };
            Ok(Binding::new(field.name, value))
        })
        .collect()
}

fn coerce(field: &'static Field, value: &Value) -> Result<SqlValue, RecordError> {
    if value.is_null() {
        return Ok(SqlValue::null(field.column_type));
    }

    let invalid = || RecordError::InvalidField {
        field: field.name,
        expected: field.column_type.expectation(),
    };

    let coerced = match field.column_type {
        ColumnType::Integer => {
            let parsed = match value {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.trim().parse::<i64>().ok(),
                _ => None,
            };
            let int = parsed.and_then(|i| i32::try_from(i).ok()).ok_or_else(invalid)?;
            SqlValue::Integer(Some(int))
        }
        ColumnType::Text => match value {
            Value::String(s) => SqlValue::Text(Some(s.clone())),
            _ => return Err(invalid()),
        },
        ColumnType::Date => {
            let date = value
                .as_str()
                .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
                .ok_or_else(invalid)?;
            SqlValue::Date(Some(date))
        }
        ColumnType::Decimal => {
            let parsed = match value {
                Value::Number(n) => Decimal::from_str(&n.to_string())
                    .or_else(|_| Decimal::from_scientific(&n.to_string()))
                    .ok(),
                Value::String(s) => Decimal::from_str(s.trim()).ok(),
                _ => None,
            };
            SqlValue::Decimal(Some(parsed.ok_or_else(invalid)?))
        }
        ColumnType::Boolean => {
            let parsed = match value {
                Value::Bool(b) => Some(*b),
                Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                    "true" => Some(true),
                    "false" => Some(false),
                    _ => None,
                },
                _ => None,
            };
            SqlValue::Boolean(Some(parsed.ok_or_else(invalid)?))
        }
    };

    Ok(coerced)
}
