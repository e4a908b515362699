use crate::cache::enums::cache_connection::CacheConnection;
use crate::cache::enums::pool_kind::PoolKind;
use crate::cache::structs::pool_shard::{IdleConnection, PoolShard};
use crate::cache::structs::pool_status::PoolStatus;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

impl PoolShard {
    pub(crate) fn new(kind: PoolKind, endpoints: Vec<String>, max_size: usize, idle_timeout: Duration) -> Self {
        Self {
            kind,
            endpoints,
            next_endpoint: AtomicUsize::new(0),
            max_size,
            idle_timeout,
            semaphore: Arc::new(Semaphore::new(max_size)),
            idle: Mutex::new(VecDeque::with_capacity(max_size)),
        }
    }

    pub fn kind(&self) -> PoolKind {
        self.kind
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// Round-robin over the shard's endpoints.
    pub(crate) fn next_endpoint(&self) -> &str {
        let index = self.next_endpoint.fetch_add(1, Ordering::Relaxed) % self.endpoints.len();
        &self.endpoints[index]
    }

    /// Most recently released connection that has not gone stale.
    pub(crate) fn checkout_idle(&self) -> Option<CacheConnection> {
        let mut idle = self.idle.lock();
        Self::evict_stale(&mut idle, self.idle_timeout);
        idle.pop_back().map(|entry| entry.connection)
    }

    pub(crate) fn check_in(&self, connection: CacheConnection) {
        if self.semaphore.is_closed() {
            return;
        }
        self.idle.lock().push_back(IdleConnection {
            connection,
            released_at: Instant::now(),
        });
    }

    pub(crate) fn evict_idle(&self) -> usize {
        let mut idle = self.idle.lock();
        Self::evict_stale(&mut idle, self.idle_timeout)
    }

    pub(crate) fn close(&self) {
        self.semaphore.close();
        self.idle.lock().clear();
    }

    pub fn status(&self) -> PoolStatus {
        PoolStatus {
            kind: self.kind,
            max_size: self.max_size,
            available: self.semaphore.available_permits(),
            idle: self.idle.lock().len(),
        }
    }

    // Oldest entries sit at the front. A zero timeout disables eviction.
    fn evict_stale(idle: &mut VecDeque<IdleConnection>, idle_timeout: Duration) -> usize {
        if idle_timeout.is_zero() {
            return 0;
        }
        let mut evicted = 0;
        while let Some(entry) = idle.front() {
            if entry.released_at.elapsed() < idle_timeout {
                break;
            }
            idle.pop_front();
            evicted += 1;
        }
        evicted
    }
}
