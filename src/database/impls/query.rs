use crate::database::enums::condition::Condition;
use crate::database::enums::order_by_type::OrderByType;
use crate::database::enums::value::Value;
use crate::database::structs::query::Query;
use crate::database::structs::query_builder::QueryBuilder;
use std::fmt;
use std::marker::PhantomData;

impl<E> Query<E> {
    /// Matches every row.
    pub fn new() -> Query<E> {
        Query {
            conditions: Vec::new(),
            order_by: Vec::new(),
            _entity: PhantomData,
        }
    }

    pub fn filter(mut self, condition: Condition) -> Query<E> {
        self.conditions.push(condition);
        self
    }

    pub fn order_by(mut self, column: &str, direction: OrderByType) -> Query<E> {
        self.order_by.push((column.to_string(), direction));
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn where_clause(&self, builder: &QueryBuilder, values: &mut Vec<Value>) -> String {
        if self.conditions.is_empty() {
            return String::new();
        }
        let predicates: Vec<String> = self
            .conditions
            .iter()
            .map(|condition| condition.render(builder, values))
            .collect();
        format!(" WHERE {}", predicates.join(" AND "))
    }

    pub fn order_clause(&self, builder: &QueryBuilder) -> String {
        if self.order_by.is_empty() {
            return String::new();
        }
        let columns: Vec<String> = self
            .order_by
            .iter()
            .map(|(column, direction)| format!("{} {}", builder.quote_identifier(column), direction.keyword()))
            .collect();
        format!(" ORDER BY {}", columns.join(", "))
    }
}

impl<E> Default for Query<E> {
    fn default() -> Self {
        Query::new()
    }
}

impl<E> Clone for Query<E> {
    fn clone(&self) -> Self {
        Query {
            conditions: self.conditions.clone(),
            order_by: self.order_by.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> fmt::Debug for Query<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("conditions", &self.conditions)
            .field("order_by", &self.order_by)
            .finish()
    }
}
