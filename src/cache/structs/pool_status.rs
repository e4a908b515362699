use crate::cache::enums::pool_kind::PoolKind;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatus {
    pub kind: PoolKind,
    pub max_size: usize,
    pub available: usize,
    pub idle: usize,
}
