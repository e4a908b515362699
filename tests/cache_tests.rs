mod common;

use cached_repository::cache::errors::CacheError;
use cached_repository::cache::structs::cache_service::CacheService;
use cached_repository::cache::traits::cache_backend::CacheBackend;
use cached_repository::config::structs::cache_config::CacheConfig;
use common::User;
use std::time::Duration;

#[tokio::test]
async fn test_from_config_without_write_endpoints_fails() {
    let config = CacheConfig {
        write_endpoints: Vec::new(),
        ..common::memory_cache_config("app:")
    };
    assert!(matches!(CacheService::from_config(&config), Err(CacheError::ConfigurationError(_))));
}

#[tokio::test]
async fn test_read_only_pool_uses_write_endpoints_by_default() {
    let config = CacheConfig {
        write_endpoints: vec!["a:1".to_string()],
        ..common::memory_cache_config("app:")
    };
    let cache = CacheService::from_config(&config).unwrap();
    let connection = cache.pool().acquire(true).await.unwrap();
    assert_eq!(connection.endpoint(), "a:1");
}

#[tokio::test]
async fn test_list_keys_strips_prefix() {
    let cache = CacheService::from_config(&common::memory_cache_config("app:")).unwrap();
    cache.set("user:1", &User::new("ada", 36), None).await.unwrap();
    cache.set("session:9", &"token", None).await.unwrap();
    assert_eq!(cache.list_keys("user:*").await.unwrap(), vec!["user:1".to_string()]);
    let user: User = cache.get("user:1").await.unwrap();
    assert_eq!(user.name, "ada");
}

#[tokio::test]
async fn test_get_or_create_populates_once() {
    let cache = CacheService::from_config(&common::memory_cache_config("app:")).unwrap();
    let mut calls = 0;
    for _ in 0..3 {
        let user: User = cache
            .get_or_create("user:7", || {
                calls += 1;
                async { User::new("created", 7) }
            }, Some(Duration::from_secs(60)))
            .await
            .unwrap();
        assert_eq!(user.name, "created");
    }
    assert_eq!(calls, 1);
}

#[tokio::test]
async fn test_pool_exhaustion_surfaces_after_timeout() {
    let config = CacheConfig {
        max_write_pool_size: 1,
        pool_timeout: 50,
        ..common::memory_cache_config("app:")
    };
    let cache = CacheService::from_config(&config).unwrap();
    let _held = cache.pool().acquire(false).await.unwrap();
    assert!(matches!(cache.set("k", &1u8, None).await, Err(CacheError::PoolExhausted { .. })));
    assert_eq!(cache.get::<u8>("k").await.unwrap(), 0, "reads use the separate read-only pool");
}

#[tokio::test]
async fn test_close_rejects_further_use() {
    let cache = CacheService::from_config(&common::memory_cache_config("app:")).unwrap();
    cache.set("k", &1u8, None).await.unwrap();
    cache.close();
    assert!(matches!(cache.get::<u8>("k").await, Err(CacheError::Closed)));
}
