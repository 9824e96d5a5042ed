use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Number, Value};
use sqlx::postgres::PgArguments;
use sqlx::Postgres;

use crate::schema::ColumnType;

/// A typed statement parameter. `None` binds a NULL of the column's type.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Integer(Option<i32>),
    Text(Option<String>),
    Date(Option<NaiveDate>),
    Decimal(Option<Decimal>),
    Boolean(Option<bool>),
}

impl SqlValue {
    pub fn null(column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::Integer => SqlValue::Integer(None),
            ColumnType::Text => SqlValue::Text(None),
            ColumnType::Date => SqlValue::Date(None),
            ColumnType::Decimal => SqlValue::Decimal(None),
            ColumnType::Boolean => SqlValue::Boolean(None),
        }
    }

    /// JSON rendering matching what Postgres' `row_to_json` produces.
    pub fn to_json(&self) -> Value {
        match self {
            SqlValue::Integer(Some(i)) => Value::from(*i),
            SqlValue::Text(Some(s)) => Value::String(s.clone()),
            SqlValue::Date(Some(d)) => Value::String(d.format("%Y-%m-%d").to_string()),
            SqlValue::Decimal(Some(d)) => d
                .to_string()
                .parse::<Number>()
                .map(Value::Number)
                .unwrap_or_else(|_| Value::String(d.to_string())),
            SqlValue::Boolean(Some(b)) => Value::Bool(*b),
            _ => Value::Null,
        }
    }
}

/// A named parameter: the column it targets and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub column: &'static str,
    pub value: SqlValue,
}

impl Binding {
    pub fn new(column: &'static str, value: SqlValue) -> Self {
        Self { column, value }
    }
}

pub(crate) fn bind_param<'q>(
    q: sqlx::query::Query<'q, Postgres, PgArguments>,
    v: &'q SqlValue,
) -> sqlx::query::Query<'q, Postgres, PgArguments> {
    match v {
        SqlValue::Integer(i) => q.bind(*i),
        SqlValue::Text(s) => q.bind(s.as_deref()),
        SqlValue::Date(d) => q.bind(*d),
        SqlValue::Decimal(d) => q.bind(*d),
        SqlValue::Boolean(b) => q.bind(*b),
    }
}
