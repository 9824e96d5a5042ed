use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Row as _};
use tracing::debug;

use crate::database::manager::DatabaseError;
use crate::database::statement;
use crate::database::store::{RecordStore, Row};
use crate::database::value::{bind_param, Binding};
use crate::schema::EntitySchema;

/// [`RecordStore`] backed by a Postgres pool.
///
/// Every operation checks out its own connection; the guard returns it to the
/// pool when dropped, whichever way the operation exits.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn select_all(&self, schema: &EntitySchema) -> Result<Vec<Row>, DatabaseError> {
        let sql = statement::select_all(schema);
        debug!(sql = %sql, "select_all");

        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query(&sql).fetch_all(&mut *conn).await?;

        rows.into_iter()
            .map(|row| match row.try_get::<Value, _>("row")? {
                Value::Object(map) => Ok(map),
                _ => Err(DatabaseError::RowFormat(schema.table)),
            })
            .collect()
    }

    async fn insert(&self, schema: &EntitySchema, values: &[Binding]) -> Result<Row, DatabaseError> {
        let columns: Vec<&str> = values.iter().map(|b| b.column).collect();
        let sql = statement::insert(schema, &columns);
        debug!(sql = %sql, "insert");

        let mut q = sqlx::query(&sql);
        for binding in values {
            q = bind_param(q, &binding.value);
        }

        let mut conn = self.pool.acquire().await?;
        let row = q.fetch_one(&mut *conn).await?;
        match row.try_get::<Value, _>("key")? {
            Value::Object(map) => Ok(map),
            _ => Err(DatabaseError::RowFormat(schema.table)),
        }
    }

    async fn update(
        &self,
        schema: &EntitySchema,
        key: &[Binding],
        values: &[Binding],
    ) -> Result<u64, DatabaseError> {
        let columns: Vec<&str> = values.iter().map(|b| b.column).collect();
        let sql = statement::update(schema, &columns);
        debug!(sql = %sql, "update");

        let mut q = sqlx::query(&sql);
        for binding in values.iter().chain(key) {
            q = bind_param(q, &binding.value);
        }

        let mut conn = self.pool.acquire().await?;
        let result = q.execute(&mut *conn).await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, schema: &EntitySchema, key: &[Binding]) -> Result<u64, DatabaseError> {
        let sql = statement::delete(schema);
        debug!(sql = %sql, "delete");

        let mut q = sqlx::query(&sql);
        for binding in key {
            q = bind_param(q, &binding.value);
        }

        let mut conn = self.pool.acquire().await?;
        let result = q.execute(&mut *conn).await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }
}
