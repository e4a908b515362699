use crate::database::enums::value::Value;
use crate::database::traits::entity_id::EntityId;

impl EntityId for i64 {
    fn is_transient(&self) -> bool {
        *self == 0
    }

    fn to_value(&self) -> Value {
        Value::Int(*self)
    }
}

impl EntityId for i32 {
    fn is_transient(&self) -> bool {
        *self == 0
    }

    fn to_value(&self) -> Value {
        Value::Int(*self as i64)
    }
}

impl EntityId for String {
    fn is_transient(&self) -> bool {
        self.is_empty()
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}
