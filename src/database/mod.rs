pub mod manager;
pub mod postgres;
pub mod record;
pub mod statement;
pub mod store;
pub mod value;

pub use manager::{DatabaseError, DatabaseManager};
pub use postgres::PgStore;
pub use record::RecordError;
pub use store::{RecordStore, Row};
pub use value::{Binding, SqlValue};
