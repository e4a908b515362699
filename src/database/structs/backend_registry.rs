use crate::database::structs::backend_context::BackendContext;
use std::sync::Arc;

/// Backends in registration order. Lookup is by exact name.
#[derive(Debug, Clone, Default)]
pub struct BackendRegistry {
    pub(crate) contexts: Vec<Arc<BackendContext>>,
}
