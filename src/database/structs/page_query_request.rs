use serde::{Deserialize, Serialize};

/// Page size and 1-based page number. Setting either to zero keeps the
/// previous value; any other value, negatives included, replaces it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PageQueryRequest<T = ()> {
    pub(crate) page_size: i32,
    pub(crate) page_number: i32,
    pub data: T,
}
