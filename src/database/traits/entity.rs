use crate::database::enums::value::Value;
use crate::database::traits::entity_id::EntityId;
use crate::database::traits::projection::Projection;

/// A projection mapped one-to-one onto a table with a single primary key.
pub trait Entity: Projection {
    type Id: EntityId;

    const TABLE: &'static str;

    const PRIMARY_KEY: &'static str;

    fn id(&self) -> &Self::Id;

    /// Column values excluding the primary key.
    fn values(&self) -> Vec<(&'static str, Value)>;

    /// Two entities are the same when both ids are assigned and equal.
    fn same_identity(&self, other: &Self) -> bool {
        !self.id().is_transient() && !other.id().is_transient() && self.id() == other.id()
    }
}
