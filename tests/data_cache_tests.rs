mod common;

use cached_repository::database::enums::condition::Condition;
use cached_repository::database::enums::order_by_type::OrderByType;
use cached_repository::database::enums::value::Value;
use cached_repository::database::errors::RepositoryError;
use cached_repository::database::structs::page_query_request::PageQueryRequest;
use cached_repository::database::structs::query::Query;
use cached_repository::database::structs::repository_router::RepositoryRouter;
use common::User;

#[tokio::test]
async fn test_insert_invalidates_cached_list() {
    let (mut router, cache) = common::create_cached_router().await;
    assert!(router.current_backend().cache_enabled());
    router.insert(&User::new("first", 1)).await.unwrap();

    let all = Query::<User>::new();
    assert_eq!(router.get_list(&all).await.unwrap().len(), 1);
    assert!(!cache.list_keys("DataCache.main.users.*").await.unwrap().is_empty());

    router.insert(&User::new("second", 2)).await.unwrap();
    assert!(cache.list_keys("DataCache.main.users.*").await.unwrap().is_empty());
    let users = router.get_list(&all).await.unwrap();
    assert_eq!(users.iter().map(|u| u.name.as_str()).collect::<Vec<&str>>(), vec!["first", "second"]);
}

#[tokio::test]
async fn test_reads_are_served_from_cache() {
    let (mut router, _cache) = common::create_cached_router().await;
    router.insert(&User::new("cached", 1)).await.unwrap();
    let all = Query::<User>::new();
    assert_eq!(router.count(&all).await.unwrap(), 1);
    assert_eq!(router.get_list(&all).await.unwrap().len(), 1);

    // Raw SQL bypasses invalidation, so the cached results stay visible.
    router
        .execute_command("INSERT INTO users (name, age) VALUES (?, ?)", vec![Value::from("raw"), Value::from(2)])
        .await
        .unwrap();
    assert_eq!(router.count(&all).await.unwrap(), 1);
    assert_eq!(router.get_list(&all).await.unwrap().len(), 1);

    assert!(router.remove_data_cache::<User>().await.unwrap() >= 2);
    assert_eq!(router.count(&all).await.unwrap(), 2);
    assert_eq!(router.get_list(&all).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_every_mutation_kind_invalidates() {
    let (mut router, _cache) = common::create_cached_router().await;
    let id = router.insert_return_identity(&User::new("a", 1)).await.unwrap();
    let by_name = Query::<User>::new().filter(Condition::eq("name", "b"));

    assert!(!router.any(&by_name).await.unwrap());
    let mut user = router.get_by_id::<User>(&id).await.unwrap().unwrap();
    user.name = "b".to_string();
    router.update(&user).await.unwrap();
    assert!(router.any(&by_name).await.unwrap());

    router.update_columns(vec![("name", Value::from("c"))], &Query::<User>::new()).await.unwrap();
    assert!(!router.any(&by_name).await.unwrap());
    assert_eq!(router.get_by_id::<User>(&id).await.unwrap().unwrap().name, "c");

    router.delete_by_id::<User>(&id).await.unwrap();
    assert_eq!(router.get_by_id::<User>(&id).await.unwrap(), None);
}

#[tokio::test]
async fn test_failed_insert_range_rolls_back_and_invalidates() {
    let (mut router, cache) = common::create_cached_router().await;
    let mut first = User::new("first", 1);
    first.id = router.insert_return_identity(&first).await.unwrap();
    let all = Query::<User>::new();
    assert_eq!(router.get_list(&all).await.unwrap().len(), 1);
    assert!(!cache.list_keys("DataCache.main.users.*").await.unwrap().is_empty());

    let batch = vec![
        User { id: first.id + 1, name: "second".to_string(), age: 2, email: None },
        User { id: first.id, name: "duplicate".to_string(), age: 3, email: None },
    ];
    assert!(matches!(router.insert_range(&batch).await, Err(RepositoryError::Database(_))));
    assert!(!router.in_transaction());
    assert!(cache.list_keys("DataCache.main.users.*").await.unwrap().is_empty());

    let stored: Option<i64> = router.get_scalar("SELECT COUNT(*) FROM users", Vec::new()).await.unwrap();
    assert_eq!(stored, Some(1));
    assert_eq!(router.get_list(&all).await.unwrap(), vec![first]);
}

#[tokio::test]
async fn test_failed_update_range_rolls_back_and_invalidates() {
    let (mut router, cache) = common::create_cached_router().await;
    router.execute_command("CREATE UNIQUE INDEX users_name ON users (name)", Vec::new()).await.unwrap();
    router.insert_range(&[User::new("a", 1), User::new("b", 2)]).await.unwrap();
    let all = Query::<User>::new().order_by("id", OrderByType::Asc);
    let before = router.get_list(&all).await.unwrap();

    let mut renamed = before.clone();
    renamed[0].age = 10;
    renamed[1].name = "a".to_string();
    assert!(router.update_range(&renamed).await.is_err());
    assert!(cache.list_keys("DataCache.main.users.*").await.unwrap().is_empty());
    assert_eq!(router.get_list(&all).await.unwrap(), before);
}

#[tokio::test]
async fn test_paged_reads_are_invalidated() {
    let (mut router, _cache) = common::create_cached_router().await;
    let users: Vec<User> = (1..=3).map(|i| User::new(&format!("u{i}"), i)).collect();
    router.insert_range(&users).await.unwrap();

    let page = PageQueryRequest::new();
    let query = Query::<User>::new();
    assert_eq!(router.get_page_list(&query, &page).await.unwrap().total_count, 3);
    router.delete_by_ids::<User>(&[1]).await.unwrap();
    let result = router.get_page_list(&query, &page).await.unwrap();
    assert_eq!(result.total_count, 2);
    assert_eq!(result.items.len(), 2);
}

#[tokio::test]
async fn test_backends_do_not_share_cached_results() {
    let (mut router, _cache) = common::create_cached_router().await;
    router.insert(&User::new("main only", 1)).await.unwrap();
    let all = Query::<User>::new();
    assert_eq!(router.get_list(&all).await.unwrap().len(), 1);

    router.use_backend("reporting").unwrap();
    assert!(router.get_list(&all).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_commit_invalidates_entries_cached_during_transaction() {
    let (mut router, _cache) = common::create_cached_router().await;
    let registry = router.registry().clone();
    let mut observer = RepositoryRouter::new(registry).unwrap();
    let all = Query::<User>::new();

    router.begin_tran().await.unwrap();
    router.insert(&User::new("pending", 1)).await.unwrap();
    assert_eq!(router.count(&all).await.unwrap(), 1, "reads inside the transaction bypass the cache");
    router.commit_tran().await.unwrap();

    assert_eq!(observer.count(&all).await.unwrap(), 1);
}

#[tokio::test]
async fn test_unreachable_cache_falls_back_to_backend() {
    let registry = common::create_registry(Some(common::unreachable_cache()), true).await;
    let mut router = RepositoryRouter::new(registry).unwrap();
    assert!(router.insert(&User::new("still works", 1)).await.unwrap());
    let users = router.get_list(&Query::<User>::new()).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(router.count(&Query::<User>::new()).await.unwrap(), 1);
    assert!(router.remove_data_cache::<User>().await.is_err());
}
