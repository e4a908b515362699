mod common;

use cached_repository::database::enums::condition::Condition;
use cached_repository::database::enums::order_by_type::OrderByType;
use cached_repository::database::enums::value::Value;
use cached_repository::database::errors::RepositoryError;
use cached_repository::database::structs::page_query_request::PageQueryRequest;
use cached_repository::database::structs::query::Query;
use cached_repository::database::structs::repository_router::RepositoryRouter;
use common::{User, UserName};

#[derive(Debug, PartialEq)]
enum WorkError {
    Rejected(&'static str),
    Repository(String),
}

impl From<RepositoryError> for WorkError {
    fn from(error: RepositoryError) -> Self {
        WorkError::Repository(error.to_string())
    }
}

async fn seed(router: &mut RepositoryRouter, count: i64) {
    let users: Vec<User> = (1..=count).map(|i| User::new(&format!("user{i}"), 20 + i)).collect();
    assert!(router.insert_range(&users).await.unwrap());
}

#[tokio::test]
async fn test_router_starts_on_default_backend() {
    let router = common::create_router().await;
    assert_eq!(router.current_backend().name(), "main");
    assert!(router.current_backend().is_default());
    assert!(!router.in_transaction());
}

#[tokio::test]
async fn test_use_backend_routes_to_selected_backend() {
    let mut router = common::create_router().await;
    assert!(router.insert(&User::new("on-main", 30)).await.unwrap());

    router.use_backend("reporting").unwrap();
    assert_eq!(router.current_backend().name(), "reporting");
    assert!(router.insert(&User::new("on-reporting", 40)).await.unwrap());
    let user = router.get_by_id::<User>(&1).await.unwrap().unwrap();
    assert_eq!(user.name, "on-reporting");
    assert_eq!(router.count(&Query::<User>::new()).await.unwrap(), 1);

    router.use_backend("main").unwrap();
    let user = router.get_by_id::<User>(&1).await.unwrap().unwrap();
    assert_eq!(user.name, "on-main");
}

#[tokio::test]
async fn test_use_missing_backend_keeps_current() {
    let mut router = common::create_router().await;
    router.use_backend("reporting").unwrap();
    let result = router.use_backend("missing");
    assert!(matches!(result, Err(RepositoryError::NotFound(name)) if name == "missing"));
    assert_eq!(router.current_backend().name(), "reporting");
}

#[tokio::test]
async fn test_with_backend_returns_independent_router() {
    let router = common::create_router().await;
    let mut reporting = router.with_backend("reporting").unwrap();
    assert_eq!(reporting.current_backend().name(), "reporting");
    assert_eq!(router.current_backend().name(), "main");
    assert!(reporting.insert(&User::new("r", 1)).await.unwrap());
    assert!(matches!(router.with_backend("nope"), Err(RepositoryError::NotFound(_))));
}

#[tokio::test]
async fn test_crud_round_trip() {
    let mut router = common::create_router().await;
    let id = router.insert_return_identity(&User::new("ada", 36)).await.unwrap();
    assert_eq!(id, 1);

    let mut user = router.get_by_id::<User>(&id).await.unwrap().unwrap();
    assert_eq!(user, User { id, name: "ada".to_string(), age: 36, email: None });

    user.age = 37;
    user.email = Some("ada@example.org".to_string());
    assert!(router.update(&user).await.unwrap());
    assert_eq!(router.get_by_id::<User>(&id).await.unwrap().unwrap(), user);

    assert!(router.delete_entity(&user).await.unwrap());
    assert_eq!(router.get_by_id::<User>(&id).await.unwrap(), None);
    assert!(!router.delete_by_id::<User>(&id).await.unwrap(), "zero rows affected is false, not an error");
}

#[tokio::test]
async fn test_update_ignore_null_keeps_existing_columns() {
    let mut router = common::create_router().await;
    let mut user = User::new("grace", 45);
    user.email = Some("grace@example.org".to_string());
    user.id = router.insert_return_identity(&user).await.unwrap();

    let partial = User { id: user.id, name: "grace h".to_string(), age: 46, email: None };
    assert!(router.update_ignore_null(&partial).await.unwrap());
    let stored = router.get_by_id::<User>(&user.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "grace h");
    assert_eq!(stored.email.as_deref(), Some("grace@example.org"));

    assert!(router.update(&partial).await.unwrap());
    let stored = router.get_by_id::<User>(&user.id).await.unwrap().unwrap();
    assert_eq!(stored.email, None);
}

#[tokio::test]
async fn test_update_missing_row_is_false() {
    let mut router = common::create_router().await;
    let ghost = User { id: 99, name: "ghost".to_string(), age: 1, email: None };
    assert!(!router.update(&ghost).await.unwrap());
    assert!(!router.update_range(&[ghost]).await.unwrap());
}

#[tokio::test]
async fn test_filtered_reads_and_bulk_mutations() {
    let mut router = common::create_router().await;
    seed(&mut router, 5).await;

    let adults = Query::<User>::new().filter(Condition::ge("age", 23)).order_by("age", OrderByType::Desc);
    let users = router.get_list(&adults).await.unwrap();
    assert_eq!(users.iter().map(|u| u.age).collect::<Vec<i64>>(), vec![25, 24, 23]);
    assert_eq!(router.count(&adults).await.unwrap(), 3);
    assert!(router.any(&adults).await.unwrap());
    assert!(!router.any(&Query::<User>::new().filter(Condition::gt("age", 100))).await.unwrap());

    let first = router.get_first(&adults).await.unwrap().unwrap();
    assert_eq!(first.name, "user5");

    let names: Vec<UserName> = router
        .get_list_select::<User, UserName>(&Query::new().filter(Condition::like("name", "user%")).order_by("id", OrderByType::Asc))
        .await
        .unwrap();
    assert_eq!(names.len(), 5);
    assert_eq!(names[0].name, "user1");

    assert!(router.update_columns(vec![("email", Value::from("bulk@example.org"))], &adults).await.unwrap());
    assert_eq!(router.count(&Query::<User>::new().filter(Condition::is_not_null("email"))).await.unwrap(), 3);

    assert!(router.delete_by_ids::<User>(&[1, 2, 42]).await.unwrap());
    assert!(!router.delete_by_ids::<User>(&[]).await.unwrap());
    assert!(router.delete(&Query::<User>::new().filter(Condition::eq("name", "user3"))).await.unwrap());
    assert_eq!(router.count(&Query::<User>::new()).await.unwrap(), 2);
}

#[tokio::test]
async fn test_insert_range_inside_open_transaction_leaves_it_open() {
    let mut router = common::create_router().await;
    router.insert(&User { id: 1, name: "existing".to_string(), age: 1, email: None }).await.unwrap();

    router.begin_tran().await.unwrap();
    let batch = vec![
        User { id: 2, name: "pending".to_string(), age: 2, email: None },
        User { id: 1, name: "clash".to_string(), age: 3, email: None },
    ];
    assert!(router.insert_range(&batch).await.is_err());
    assert!(router.in_transaction(), "the caller owns the transaction");
    router.rollback_tran().await.unwrap();
    assert_eq!(router.count(&Query::<User>::new()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_empty_ranges_affect_nothing() {
    let mut router = common::create_router().await;
    assert!(!router.insert_range::<User>(&[]).await.unwrap());
    assert!(!router.update_range::<User>(&[]).await.unwrap());
    assert!(!router.in_transaction());
}

#[tokio::test]
async fn test_sql_query_map() {
    let mut router = common::create_router().await;
    let mut user = User::new("ada", 36);
    user.email = Some("ada@example.org".to_string());
    router.insert(&user).await.unwrap();
    router.insert(&User::new("grace", 45)).await.unwrap();

    let rows = router
        .sql_query_map_list("SELECT id, name, age, email FROM users ORDER BY id", Vec::new())
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], serde_json::json!("ada"));
    assert_eq!(rows[0]["age"], serde_json::json!(36));
    assert_eq!(rows[0]["email"], serde_json::json!("ada@example.org"));
    assert_eq!(rows[1]["email"], serde_json::Value::Null);
    assert_eq!(rows[0].keys().collect::<Vec<&String>>(), vec!["id", "name", "age", "email"]);

    let first = router
        .sql_query_map_first("SELECT name FROM users WHERE age > ?", vec![Value::from(40)])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first["name"], serde_json::json!("grace"));
    assert!(router.sql_query_map_first("SELECT name FROM users WHERE age > 100", Vec::new()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_page_list_returns_slice_and_total() {
    let mut router = common::create_router().await;
    seed(&mut router, 25).await;

    let query = Query::<User>::new().order_by("id", OrderByType::Asc);
    let mut page = PageQueryRequest::new();
    page.set_page_size(10);
    page.set_page_number(3);
    let result = router.get_page_list(&query, &page).await.unwrap();
    assert_eq!(result.total_count, 25);
    assert_eq!(result.items.iter().map(|u| u.id).collect::<Vec<i64>>(), (21..=25).collect::<Vec<i64>>());

    page.set_page_number(0);
    let same = router.get_page_list(&query, &page).await.unwrap();
    assert_eq!(same.items.len(), 5, "zero keeps the previous page number");

    page.set_page_size(-1);
    let empty = router.get_page_list(&query, &page).await.unwrap();
    assert!(empty.items.is_empty());
    assert_eq!(empty.total_count, 25);
}

#[tokio::test]
async fn test_tran_commits_on_success() {
    let mut router = common::create_router().await;
    let inserted: Result<i64, RepositoryError> = router
        .tran(|repo| Box::pin(async move {
            repo.insert(&User::new("a", 1)).await?;
            repo.insert(&User::new("b", 2)).await?;
            repo.count(&Query::<User>::new()).await
        }))
        .await;
    assert_eq!(inserted.unwrap(), 2);
    assert!(!router.in_transaction());
    assert_eq!(router.count(&Query::<User>::new()).await.unwrap(), 2);
}

#[tokio::test]
async fn test_tran_rolls_back_and_returns_original_error() {
    let mut router = common::create_router().await;
    router.insert(&User::new("kept", 1)).await.unwrap();
    let before = router.get_list(&Query::<User>::new()).await.unwrap();

    let result: Result<(), WorkError> = router
        .tran(|repo| Box::pin(async move {
            repo.insert(&User::new("discarded", 2)).await?;
            repo.delete(&Query::<User>::new()).await?;
            Err(WorkError::Rejected("stock too low"))
        }))
        .await;

    assert_eq!(result, Err(WorkError::Rejected("stock too low")));
    assert!(!router.in_transaction());
    assert_eq!(router.get_list(&Query::<User>::new()).await.unwrap(), before);
}

#[tokio::test]
async fn test_tran_rebinds_backend_before_commit() {
    let mut router = common::create_router().await;
    let result: Result<(), RepositoryError> = router
        .tran(|repo| Box::pin(async move {
            repo.insert(&User::new("main-tx", 1)).await?;
            repo.use_backend("reporting")?;
            Ok(())
        }))
        .await;
    assert!(result.is_ok());
    assert_eq!(router.current_backend().name(), "main");
    assert_eq!(router.count(&Query::<User>::new()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_explicit_transaction_commit_and_rollback() {
    let mut router = common::create_router().await;
    router.begin_tran().await.unwrap();
    assert!(router.in_transaction());
    router.insert(&User::new("rolled back", 1)).await.unwrap();
    assert_eq!(router.count(&Query::<User>::new()).await.unwrap(), 1);
    router.rollback_tran().await.unwrap();
    assert_eq!(router.count(&Query::<User>::new()).await.unwrap(), 0);

    router.begin_tran().await.unwrap();
    router.insert(&User::new("committed", 1)).await.unwrap();
    router.commit_tran().await.unwrap();
    assert_eq!(router.count(&Query::<User>::new()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_nested_transactions_are_rejected() {
    let mut router = common::create_router().await;
    assert!(matches!(router.commit_tran().await, Err(RepositoryError::NoTransaction(_))));
    assert!(matches!(router.rollback_tran().await, Err(RepositoryError::NoTransaction(_))));

    router.begin_tran().await.unwrap();
    assert!(matches!(router.begin_tran().await, Err(RepositoryError::TransactionAlreadyOpen(name)) if name == "main"));

    let nested: Result<(), RepositoryError> = router.tran(|_| Box::pin(async move { Ok(()) })).await;
    assert!(matches!(nested, Err(RepositoryError::TransactionAlreadyOpen(_))));
    assert!(router.in_transaction(), "the outer transaction stays open");
    router.rollback_tran().await.unwrap();
}

#[tokio::test]
async fn test_raw_sql() {
    let mut router = common::create_router().await;
    seed(&mut router, 3).await;

    let users: Vec<User> = router
        .sql_query_list("SELECT id, name, age, email FROM users WHERE age > ? ORDER BY id", vec![Value::from(21)])
        .await
        .unwrap();
    assert_eq!(users.len(), 2);

    let first: Option<UserName> = router
        .sql_query_first("SELECT name FROM users WHERE id = ?", vec![Value::from(3i64)])
        .await
        .unwrap();
    assert_eq!(first.unwrap().name, "user3");

    let total: Option<i64> = router.get_scalar("SELECT SUM(age) FROM users", Vec::new()).await.unwrap();
    assert_eq!(total, Some(21 + 22 + 23));

    let affected = router
        .execute_command("UPDATE users SET age = age + 1 WHERE age < ?", vec![Value::from(23)])
        .await
        .unwrap();
    assert_eq!(affected, 2);
}

#[tokio::test]
async fn test_database_errors_propagate_unchanged() {
    let mut router = common::create_router().await;
    let result = router.execute_command("INSERT INTO nowhere VALUES (1)", Vec::new()).await;
    assert!(matches!(result, Err(RepositoryError::Database(_))));
}

#[tokio::test]
async fn test_drop_table_is_best_effort() {
    let mut router = common::create_router().await;
    assert!(router.drop_table("does_not_exist").await);
    assert!(router.drop_table("users").await);
    assert!(router.get_list(&Query::<User>::new()).await.is_err());
}
