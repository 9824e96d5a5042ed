use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::database::manager::DatabaseError;
use crate::database::value::Binding;
use crate::schema::EntitySchema;

/// Raw row keyed by column name. Callers shape it with [`EntitySchema::project`].
pub type Row = Map<String, Value>;

/// Data-access seam used by the HTTP handlers.
///
/// Each call runs exactly one statement in its own auto-committed unit of
/// work. Implementations must release any connection they acquire before
/// returning, on success and on error.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every row of the entity's table.
    async fn select_all(&self, schema: &EntitySchema) -> Result<Vec<Row>, DatabaseError>;

    /// Insert one row and return its key columns.
    async fn insert(&self, schema: &EntitySchema, values: &[Binding]) -> Result<Row, DatabaseError>;

    /// Overwrite `values` on the row matching `key`. Returns rows affected.
    async fn update(
        &self,
        schema: &EntitySchema,
        key: &[Binding],
        values: &[Binding],
    ) -> Result<u64, DatabaseError>;

    /// Remove rows matching `key`. Returns rows affected.
    async fn delete(&self, schema: &EntitySchema, key: &[Binding]) -> Result<u64, DatabaseError>;

    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<(), DatabaseError>;
}
