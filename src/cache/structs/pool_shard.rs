use crate::cache::enums::cache_connection::CacheConnection;
use crate::cache::enums::pool_kind::PoolKind;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

#[derive(Debug)]
pub struct PoolShard {
    pub(crate) kind: PoolKind,
    pub(crate) endpoints: Vec<String>,
    pub(crate) next_endpoint: AtomicUsize,
    pub(crate) max_size: usize,
    pub(crate) idle_timeout: Duration,
    pub(crate) semaphore: Arc<Semaphore>,
    pub(crate) idle: Mutex<VecDeque<IdleConnection>>,
}

#[derive(Debug)]
pub struct IdleConnection {
    pub(crate) connection: CacheConnection,
    pub(crate) released_at: Instant,
}
