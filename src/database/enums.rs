//! Database enumeration types.

/// Supported database driver types (sqlite3, mysql, pgsql).
pub mod database_drivers;

/// Sort direction for `ORDER BY`.
pub mod order_by_type;

/// Filter predicates for queries.
pub mod condition;

/// Bind parameter values.
pub mod value;
