use crate::database::enums::condition::Condition;
use crate::database::enums::order_by_type::OrderByType;
use std::marker::PhantomData;

/// Conjunction of conditions plus ordering, typed by the entity it targets.
pub struct Query<E> {
    pub(crate) conditions: Vec<Condition>,
    pub(crate) order_by: Vec<(String, OrderByType)>,
    pub(crate) _entity: PhantomData<fn() -> E>,
}
