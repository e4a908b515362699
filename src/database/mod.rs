//! Multi-backend repository layer.
//!
//! Named SQL backends (SQLite, MySQL, PostgreSQL through the `sqlx` `Any`
//! driver) are collected in a [`BackendRegistry`](structs::backend_registry::BackendRegistry).
//! A [`RepositoryRouter`](structs::repository_router::RepositoryRouter) is
//! bound to one backend at a time and exposes typed CRUD, paging, raw SQL and
//! transaction operations. Reads on cache-enabled backends go through the
//! second-level data cache; mutations invalidate it.
//!
//! # Example
//!
//! ```rust,ignore
//! let registry = Arc::new(BackendRegistry::from_configuration(&config).await?);
//! let mut repository = RepositoryRouter::new(registry)?;
//! repository.insert(&user).await?;
//! let adults = repository.get_list(&Query::<User>::new().filter(Condition::ge("age", 18))).await?;
//! ```

pub mod enums;
pub mod errors;
pub mod helpers;
pub mod impls;
pub mod structs;
pub mod traits;
