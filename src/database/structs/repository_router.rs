use crate::database::structs::backend_context::BackendContext;
use crate::database::structs::backend_registry::BackendRegistry;
use crate::database::structs::open_transaction::OpenTransaction;
use std::collections::HashMap;
use std::sync::Arc;

/// Repository facade bound to one backend at a time.
///
/// Switching backends takes `&mut self`, so a router shared behind an `Arc`
/// cannot be re-pointed by one caller under another. Use one router per
/// logical caller, or [`with_backend`](RepositoryRouter::with_backend) to get
/// an independent router for another backend.
pub struct RepositoryRouter {
    pub(crate) registry: Arc<BackendRegistry>,
    pub(crate) current: Arc<BackendContext>,
    pub(crate) transactions: HashMap<String, OpenTransaction>,
}
