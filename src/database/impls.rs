pub mod database_drivers;
pub mod order_by_type;
pub mod value;
pub mod condition;
pub mod entity_id;
pub mod query;
pub mod query_builder;
pub mod backend_context;
pub mod backend_registry;
pub mod repository_router;
pub mod page_query_request;
