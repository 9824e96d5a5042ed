use std::sync::Arc;

use crate::database::RecordStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(store: impl RecordStore + 'static) -> Self {
        Self { store: Arc::new(store) }
    }
}
