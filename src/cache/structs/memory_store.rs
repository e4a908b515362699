use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Instant;

#[derive(Debug, Default)]
pub struct MemoryStore {
    pub(crate) entries: Mutex<HashMap<String, MemoryEntry>>,
}

#[derive(Debug, Clone)]
pub struct MemoryEntry {
    pub(crate) value: Vec<u8>,
    pub(crate) expires_at: Option<Instant>,
}
