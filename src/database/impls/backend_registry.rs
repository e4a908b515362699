use crate::cache::structs::cache_service::CacheService;
use crate::config::structs::configuration::Configuration;
use crate::config::structs::database_config::DatabaseConfig;
use crate::database::errors::RepositoryError;
use crate::database::structs::backend_context::BackendContext;
use crate::database::structs::backend_registry::BackendRegistry;
use crate::instrument_with_sentry;
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;

const LOG_PREFIX: &str = "[Registry]";

impl BackendRegistry {
    pub fn new() -> BackendRegistry {
        BackendRegistry::default()
    }

    /// Adds a backend. Names must be unique and at most one backend may be the default.
    pub fn register(&mut self, context: BackendContext) -> Result<(), RepositoryError> {
        if self.contexts.iter().any(|existing| existing.name == context.name) {
            return Err(RepositoryError::Configuration(format!("duplicate backend name '{}'", context.name)));
        }
        if context.is_default && let Some(existing) = self.contexts.iter().find(|existing| existing.is_default) {
            return Err(RepositoryError::Configuration(format!(
                "backend '{}' is marked default but '{}' already is",
                context.name, existing.name
            )));
        }
        debug!("{} Registered backend '{}' ({})", LOG_PREFIX, context.name, context.driver);
        self.contexts.push(Arc::new(context));
        Ok(())
    }

    pub fn default_context(&self) -> Result<Arc<BackendContext>, RepositoryError> {
        self.contexts
            .iter()
            .find(|context| context.is_default)
            .cloned()
            .ok_or_else(|| RepositoryError::Configuration(String::from("no backend is marked as default")))
    }

    pub fn by_name(&self, name: &str) -> Result<Arc<BackendContext>, RepositoryError> {
        self.contexts
            .iter()
            .find(|context| context.name == name)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(name.to_string()))
    }

    /// Registered backend names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.contexts.iter().map(|context| context.name.as_str()).collect()
    }

    pub fn contexts(&self) -> &[Arc<BackendContext>] {
        &self.contexts
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Exactly one backend must be the default.
    pub fn validate(&self) -> Result<(), RepositoryError> {
        self.default_context().map(|_| ())
    }

    /// Connects every configured backend. Fails on the first backend that
    /// cannot be connected or registered.
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn connect(
        configs: &[DatabaseConfig],
        cache: Option<Arc<CacheService>>,
        data_cache_ttl: Option<Duration>,
    ) -> Result<BackendRegistry, RepositoryError> {
        instrument_with_sentry!(name = "backend_registry_connect", op = "database", {
            let connected: Result<BackendRegistry, RepositoryError> = async {
                let mut registry = BackendRegistry::new();
                for config in configs {
                    let context = BackendContext::connect(config, cache.clone(), data_cache_ttl).await?;
                    registry.register(context)?;
                }
                registry.validate()?;
                Ok(registry)
            }.await;
            if let Ok(registry) = &connected {
                info!("{} {} backend(s) ready: {}", LOG_PREFIX, registry.len(), registry.names().join(", "));
            }
            connected
        })
    }

    /// Builds the cache service (when a `[cache]` section exists) and connects every backend.
    pub async fn from_configuration(config: &Configuration) -> Result<BackendRegistry, RepositoryError> {
        let cache = match &config.cache {
            Some(cache_config) => Some(Arc::new(CacheService::from_config(cache_config)?)),
            None => None,
        };
        let data_cache_ttl = config
            .cache
            .as_ref()
            .and_then(|cache_config| cache_config.data_cache_ttl)
            .map(Duration::from_secs);
        BackendRegistry::connect(&config.database, cache, data_cache_ttl).await
    }

    /// Closes every backend pool and the shared cache pool.
    pub async fn close(&self) {
        for context in &self.contexts {
            context.close().await;
            if let Some(cache) = &context.cache {
                cache.close();
            }
        }
        info!("{} Closed {} backend(s)", LOG_PREFIX, self.contexts.len());
    }
}
