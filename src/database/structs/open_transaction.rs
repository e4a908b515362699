use sqlx::{Any, Transaction};
use std::collections::BTreeSet;

pub struct OpenTransaction {
    pub(crate) transaction: Transaction<'static, Any>,
    pub(crate) touched_tables: BTreeSet<String>,
}
