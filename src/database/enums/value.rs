use serde::{
    Deserialize,
    Serialize
};

/// A bind parameter. Every value reaches the driver as a placeholder, never
/// as SQL text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}
