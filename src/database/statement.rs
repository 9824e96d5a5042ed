//! SQL text for the four record operations, generated from an entity schema.
//! Values are never interpolated; every statement uses `$n` placeholders.

use crate::schema::EntitySchema;

/// Quote SQL identifier to prevent injection
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn column_list(columns: &[&str]) -> String {
    columns.iter().map(|c| quote_identifier(c)).collect::<Vec<_>>().join(", ")
}

fn key_predicate(schema: &EntitySchema, first_param: usize) -> String {
    schema
        .key_columns()
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{} = ${}", quote_identifier(column), first_param + i))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// Every row as a single JSON column named `row`, ordered by key.
pub fn select_all(schema: &EntitySchema) -> String {
    let order = schema
        .key_columns()
        .iter()
        .map(|c| format!("t.{}", quote_identifier(c)))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "SELECT row_to_json(t) AS row FROM (SELECT {} FROM {}) t ORDER BY {}",
        column_list(&schema.readable_columns()),
        quote_identifier(schema.table),
        order
    )
}

/// Insert the given columns, returning the stored key as a JSON object named `key`.
pub fn insert(schema: &EntitySchema, columns: &[&str]) -> String {
    let placeholders = (1..=columns.len()).map(|i| format!("${i}")).collect::<Vec<_>>().join(", ");
    let returning = schema
        .key_columns()
        .iter()
        .map(|c| format!("'{}', {}", c, quote_identifier(c)))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING json_build_object({}) AS key",
        quote_identifier(schema.table),
        column_list(columns),
        placeholders,
        returning
    )
}

/// Overwrite the given columns; key parameters follow the column parameters.
pub fn update(schema: &EntitySchema, columns: &[&str]) -> String {
    let assignments = columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} = ${}", quote_identifier(c), i + 1))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "UPDATE {} SET {} WHERE {}",
        quote_identifier(schema.table),
        assignments,
        key_predicate(schema, columns.len() + 1)
    )
}

pub fn delete(schema: &EntitySchema) -> String {
    format!("DELETE FROM {} WHERE {}", quote_identifier(schema.table), key_predicate(schema, 1))
}
