use crate::cache::structs::cache_service::CacheService;
use crate::config::structs::database_config::DatabaseConfig;
use crate::database::enums::database_drivers::DatabaseDrivers;
use crate::database::errors::RepositoryError;
use crate::database::helpers::install_drivers;
use crate::database::structs::backend_context::BackendContext;
use crate::database::structs::query_builder::QueryBuilder;
use log::{info, warn};
use sqlx::any::{AnyConnectOptions, AnyPoolOptions};
use sqlx::{AnyPool, ConnectOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

const LOG_PREFIX: &str = "[Backend]";

impl BackendContext {
    pub fn new(name: &str, driver: DatabaseDrivers, pool: AnyPool, is_default: bool) -> BackendContext {
        BackendContext {
            name: name.to_string(),
            driver,
            pool,
            query_builder: QueryBuilder::new(driver),
            is_default,
            cache_enabled: false,
            cache: None,
            data_cache_ttl: None,
        }
    }

    /// Enables the data cache for this backend.
    pub fn with_cache(mut self, cache: Arc<CacheService>, data_cache_ttl: Option<Duration>) -> BackendContext {
        self.cache_enabled = true;
        self.cache = Some(cache);
        self.data_cache_ttl = data_cache_ttl;
        self
    }

    #[tracing::instrument(level = "debug", skip_all, fields(name = %config.name))]
    pub async fn connect(
        config: &DatabaseConfig,
        cache: Option<Arc<CacheService>>,
        data_cache_ttl: Option<Duration>,
    ) -> Result<BackendContext, RepositoryError> {
        install_drivers();
        if let Some(implied) = DatabaseDrivers::from_url(&config.path) && implied != config.engine {
            return Err(RepositoryError::Configuration(format!(
                "database '{}' is configured as {} but its path is a {} URL",
                config.name, config.engine, implied
            )));
        }

        let options = AnyConnectOptions::from_str(config.path.as_str())?
            .log_statements(log::LevelFilter::Debug)
            .log_slow_statements(log::LevelFilter::Debug, Duration::from_secs(1));
        let mut pool_options = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout));
        if config.path.contains(":memory:") {
            // Every connection to an in-memory database opens a new, empty one.
            pool_options = pool_options.max_connections(1).idle_timeout(None).max_lifetime(None);
        }
        let pool = pool_options.connect_with(options).await?;
        info!("{} Connected to {} backend '{}'", LOG_PREFIX, config.engine, config.name);

        let context = BackendContext::new(&config.name, config.engine, pool, config.default);
        if !config.cache_enabled {
            return Ok(context);
        }
        match cache {
            Some(cache) => Ok(context.with_cache(cache, data_cache_ttl)),
            None => {
                warn!("{} Backend '{}' enables caching without a cache service", LOG_PREFIX, config.name);
                Err(RepositoryError::Configuration(format!(
                    "database '{}' enables caching but no cache is configured",
                    config.name
                )))
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn driver(&self) -> DatabaseDrivers {
        self.driver
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    pub fn query_builder(&self) -> &QueryBuilder {
        &self.query_builder
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    /// The data cache, when this backend participates in caching.
    pub fn cache(&self) -> Option<&Arc<CacheService>> {
        if self.cache_enabled { self.cache.as_ref() } else { None }
    }

    pub fn data_cache_ttl(&self) -> Option<Duration> {
        self.data_cache_ttl
    }

    pub async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
