//! Declarative entity descriptors.
//!
//! Each administrative record type is described once by an [`EntitySchema`]:
//! its table, its key, its data fields and the messages its endpoints answer
//! with. The generic handlers in `crate::handlers::records` and the statement
//! builder in `crate::database::statement` are driven entirely by these values.

pub mod entities;

use serde_json::{Map, Value};

pub use entities::{
    ALL, ALUNO, ATIVIDADE, ATIVIDADE_ALUNO, PAGAMENTO, PRESENCA, PROFESSOR, TURMA, USUARIO,
};

/// A row as returned to clients: field name to JSON value, in schema order.
pub type Record = Map<String, Value>;

/// Postgres column type of a field, used for payload coercion and binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Text,
    Date,
    Decimal,
    Boolean,
}

impl ColumnType {
    /// Human readable expectation used in validation errors.
    pub fn expectation(&self) -> &'static str {
        match self {
            ColumnType::Integer => "número inteiro",
            ColumnType::Text => "texto",
            ColumnType::Date => "data no formato AAAA-MM-DD",
            ColumnType::Decimal => "valor numérico",
            ColumnType::Boolean => "booleano",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub required: bool,
    /// Write-only fields are accepted on create/update but never listed.
    pub readable: bool,
}

impl Field {
    pub const fn required(name: &'static str, column_type: ColumnType) -> Self {
        Self { name, column_type, required: true, readable: true }
    }

    pub const fn optional(name: &'static str, column_type: ColumnType) -> Self {
        Self { name, column_type, required: false, readable: true }
    }

    pub const fn write_only(self) -> Self {
        Self { readable: false, ..self }
    }
}

/// How a record is identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Integer primary key assigned by the database, addressed by path id.
    Surrogate(&'static str),
    /// Client-supplied composite key, addressed by request body. No update.
    Composite(&'static [Field]),
}

/// What a delete answers when no row matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingRow {
    NotFound,
    Ignore,
}

/// Response texts for one entity.
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
    pub not_found: &'static str,
    pub list_failed: &'static str,
    pub create_failed: &'static str,
    pub update_failed: &'static str,
    pub delete_failed: &'static str,
}

#[derive(Debug)]
pub struct EntitySchema {
    pub name: &'static str,
    pub table: &'static str,
    /// Route prefix, e.g. `/alunos`.
    pub path: &'static str,
    pub key: Key,
    pub fields: &'static [Field],
    pub on_missing_delete: MissingRow,
    pub messages: Messages,
}

impl EntitySchema {
    /// Names of the key columns, in declaration order.
    pub fn key_columns(&self) -> Vec<&'static str> {
        match self.key {
            Key::Surrogate(name) => vec![name],
            Key::Composite(fields) => fields.iter().map(|f| f.name).collect(),
        }
    }

    /// Columns returned by list: key first, then readable fields.
    pub fn readable_columns(&self) -> Vec<&'static str> {
        let mut columns = self.key_columns();
        columns.extend(self.fields.iter().filter(|f| f.readable).map(|f| f.name));
        columns
    }

    /// Fields a client supplies on create, in insert order.
    pub fn insertable_fields(&self) -> Vec<&'static Field> {
        let mut fields: Vec<&'static Field> = match self.key {
            Key::Surrogate(_) => Vec::new(),
            Key::Composite(fields) => fields.iter().collect(),
        };
        fields.extend(self.fields.iter());
        fields
    }

    /// Fields overwritten by update. Empty for composite-key entities.
    pub fn updatable_fields(&self) -> Vec<&'static Field> {
        match self.key {
            Key::Surrogate(_) => self.fields.iter().collect(),
            Key::Composite(_) => Vec::new(),
        }
    }

    pub fn supports_update(&self) -> bool {
        matches!(self.key, Key::Surrogate(_))
    }

    /// Pick the readable columns out of a raw row by name, in schema order.
    /// Columns the row lacks are reported as `null`.
    pub fn project(&self, mut raw: Map<String, Value>) -> Record {
        self.readable_columns()
            .into_iter()
            .map(|column| {
                let value = raw.remove(column).unwrap_or(Value::Null);
                (column.to_string(), value)
            })
            .collect()
    }
}
