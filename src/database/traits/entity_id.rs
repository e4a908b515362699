use crate::database::enums::value::Value;
use std::fmt::Debug;

/// Primary key types. A transient id has not been assigned by the store yet.
pub trait EntityId: Debug + Clone + PartialEq + Send + Sync + 'static {
    fn is_transient(&self) -> bool;

    fn to_value(&self) -> Value;
}
