use crate::cache::structs::cache_service::CacheService;
use crate::database::enums::database_drivers::DatabaseDrivers;
use crate::database::structs::query_builder::QueryBuilder;
use sqlx::AnyPool;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct BackendContext {
    pub(crate) name: String,
    pub(crate) driver: DatabaseDrivers,
    pub(crate) pool: AnyPool,
    pub(crate) query_builder: QueryBuilder,
    pub(crate) is_default: bool,
    pub(crate) cache_enabled: bool,
    pub(crate) cache: Option<Arc<CacheService>>,
    pub(crate) data_cache_ttl: Option<Duration>,
}
