#![allow(dead_code)]
use cached_repository::cache::enums::cache_engine::CacheEngine;
use cached_repository::cache::structs::cache_service::CacheService;
use cached_repository::config::structs::cache_config::CacheConfig;
use cached_repository::config::structs::database_config::DatabaseConfig;
use cached_repository::database::enums::database_drivers::DatabaseDrivers;
use cached_repository::database::enums::value::Value;
use cached_repository::database::structs::backend_registry::BackendRegistry;
use cached_repository::database::structs::repository_router::RepositoryRouter;
use cached_repository::database::traits::entity::Entity;
use cached_repository::database::traits::projection::Projection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

pub const CREATE_USERS: &str =
    "CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL, age INTEGER NOT NULL, email TEXT NULL)";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub email: Option<String>,
}

impl User {
    pub fn new(name: &str, age: i64) -> User {
        User { id: 0, name: name.to_string(), age, email: None }
    }
}

impl Projection for User {
    fn columns() -> &'static [&'static str] {
        &["id", "name", "age", "email"]
    }
}

impl Entity for User {
    type Id = i64;
    const TABLE: &'static str = "users";
    const PRIMARY_KEY: &'static str = "id";

    fn id(&self) -> &i64 {
        &self.id
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", Value::from(self.name.as_str())),
            ("age", Value::from(self.age)),
            ("email", Value::from(self.email.clone())),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserName {
    pub name: String,
}

impl Projection for UserName {
    fn columns() -> &'static [&'static str] {
        &["name"]
    }
}

pub fn memory_cache_config(prefix: &str) -> CacheConfig {
    CacheConfig {
        engine: CacheEngine::memory,
        write_endpoints: vec!["mem:1".to_string()],
        prefix: prefix.to_string(),
        pool_timeout: 1000,
        ..Default::default()
    }
}

/// A cache service whose only endpoint refuses connections.
pub fn unreachable_cache() -> Arc<CacheService> {
    let config = CacheConfig {
        write_endpoints: vec!["127.0.0.1:1".to_string()],
        connect_timeout: 500,
        ..Default::default()
    };
    Arc::new(CacheService::from_config(&config).unwrap())
}

pub fn sqlite_backend(name: &str, default: bool, cache_enabled: bool) -> DatabaseConfig {
    DatabaseConfig {
        name: name.to_string(),
        engine: DatabaseDrivers::sqlite3,
        path: "sqlite::memory:".to_string(),
        default,
        cache_enabled,
        max_connections: 1,
        acquire_timeout: 5,
    }
}

/// `main` (default) and `reporting`, each an independent in-memory database
/// with a `users` table.
pub async fn create_registry(cache: Option<Arc<CacheService>>, cache_enabled: bool) -> Arc<BackendRegistry> {
    let configs = vec![
        sqlite_backend("main", true, cache_enabled),
        sqlite_backend("reporting", false, cache_enabled),
    ];
    let registry = Arc::new(
        BackendRegistry::connect(&configs, cache, Some(Duration::from_secs(60)))
            .await
            .unwrap(),
    );
    for name in registry.names() {
        let mut router = RepositoryRouter::new(registry.clone()).unwrap().with_backend(name).unwrap();
        router.execute_command(CREATE_USERS, Vec::new()).await.unwrap();
    }
    registry
}

pub async fn create_router() -> RepositoryRouter {
    RepositoryRouter::new(create_registry(None, false).await).unwrap()
}

pub async fn create_cached_router() -> (RepositoryRouter, Arc<CacheService>) {
    let cache = Arc::new(CacheService::from_config(&memory_cache_config("test:")).unwrap());
    let registry = create_registry(Some(cache.clone()), true).await;
    (RepositoryRouter::new(registry).unwrap(), cache)
}
