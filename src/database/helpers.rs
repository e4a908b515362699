use crate::cache::impls::memory_store::escape_glob;
use crate::database::enums::value::Value;
use sha1::{Digest, Sha1};
use serde_json::{Map, Value as JsonValue};
use sqlx::any::{AnyArguments, AnyRow, AnyTypeInfoKind};
use sqlx::query::Query;
use sqlx::{Any, Column, Row, ValueRef};
use std::sync::Once;

const DATA_CACHE_NAMESPACE: &str = "DataCache";

static INSTALL_DRIVERS: Once = Once::new();

/// Registers the sqlite, mysql and postgres drivers with the `Any` driver.
pub fn install_drivers() {
    INSTALL_DRIVERS.call_once(sqlx::any::install_default_drivers);
}

pub fn bind_values<'q>(mut query: Query<'q, Any, AnyArguments<'q>>, values: Vec<Value>) -> Query<'q, Any, AnyArguments<'q>> {
    for value in values {
        query = match value {
            Value::Null => query.bind(None::<String>),
            Value::Bool(value) => query.bind(value),
            Value::Int(value) => query.bind(value),
            Value::Float(value) => query.bind(value),
            Value::Text(value) => query.bind(value),
            Value::Bytes(value) => query.bind(value),
        };
    }
    query
}

/// `DataCache.<backend>.<table>.<sha1 of sql and parameters>`
pub fn data_cache_key(backend: &str, table: &str, sql: &str, values: &[Value]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(format!("{}{:?}", sql, values).as_bytes());
    format!("{}.{}.{}.{}", DATA_CACHE_NAMESPACE, backend, table, hex::encode(hasher.finalize().as_slice()))
}

/// Glob matching every data cache key of one table on one backend.
pub fn data_cache_pattern(backend: &str, table: &str) -> String {
    format!("{}.{}.{}.*", DATA_CACHE_NAMESPACE, escape_glob(backend), escape_glob(table))
}

/// Column name to JSON value, in column order. Blobs become arrays of bytes.
pub fn row_to_map(row: &AnyRow) -> Result<Map<String, JsonValue>, sqlx::Error> {
    let mut map = Map::with_capacity(row.columns().len());
    for column in row.columns() {
        let index = column.ordinal();
        let kind = {
            let raw = row.try_get_raw(index)?;
            if raw.is_null() { AnyTypeInfoKind::Null } else { raw.type_info().kind() }
        };
        let value = match kind {
            AnyTypeInfoKind::Null => JsonValue::Null,
            AnyTypeInfoKind::Bool => JsonValue::from(row.try_get::<bool, _>(index)?),
            AnyTypeInfoKind::SmallInt | AnyTypeInfoKind::Integer | AnyTypeInfoKind::BigInt => {
                JsonValue::from(row.try_get::<i64, _>(index)?)
            }
            AnyTypeInfoKind::Real | AnyTypeInfoKind::Double => JsonValue::from(row.try_get::<f64, _>(index)?),
            AnyTypeInfoKind::Blob => JsonValue::from(row.try_get::<Vec<u8>, _>(index)?),
            AnyTypeInfoKind::Text => JsonValue::from(row.try_get::<String, _>(index)?),
        };
        map.insert(column.name().to_string(), value);
    }
    Ok(map)
}
