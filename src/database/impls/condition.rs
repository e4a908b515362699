use crate::database::enums::condition::Condition;
use crate::database::enums::value::Value;
use crate::database::structs::query_builder::QueryBuilder;

impl Condition {
    pub fn eq(column: &str, value: impl Into<Value>) -> Condition {
        Condition::Eq(column.to_string(), value.into())
    }

    pub fn ne(column: &str, value: impl Into<Value>) -> Condition {
        Condition::Ne(column.to_string(), value.into())
    }

    pub fn gt(column: &str, value: impl Into<Value>) -> Condition {
        Condition::Gt(column.to_string(), value.into())
    }

    pub fn ge(column: &str, value: impl Into<Value>) -> Condition {
        Condition::Ge(column.to_string(), value.into())
    }

    pub fn lt(column: &str, value: impl Into<Value>) -> Condition {
        Condition::Lt(column.to_string(), value.into())
    }

    pub fn le(column: &str, value: impl Into<Value>) -> Condition {
        Condition::Le(column.to_string(), value.into())
    }

    pub fn like(column: &str, pattern: &str) -> Condition {
        Condition::Like(column.to_string(), pattern.to_string())
    }

    pub fn in_list<V: Into<Value>>(column: &str, values: impl IntoIterator<Item = V>) -> Condition {
        Condition::In(column.to_string(), values.into_iter().map(Into::into).collect())
    }

    pub fn is_null(column: &str) -> Condition {
        Condition::IsNull(column.to_string())
    }

    pub fn is_not_null(column: &str) -> Condition {
        Condition::IsNotNull(column.to_string())
    }

    /// Renders the predicate, appending its parameters to `values`.
    pub fn render(&self, builder: &QueryBuilder, values: &mut Vec<Value>) -> String {
        match self {
            Condition::Eq(column, Value::Null) | Condition::IsNull(column) => {
                format!("{} IS NULL", builder.quote_identifier(column))
            }
            Condition::Ne(column, Value::Null) | Condition::IsNotNull(column) => {
                format!("{} IS NOT NULL", builder.quote_identifier(column))
            }
            Condition::Eq(column, value) => builder.comparison(column, "=", value.clone(), values),
            Condition::Ne(column, value) => builder.comparison(column, "<>", value.clone(), values),
            Condition::Gt(column, value) => builder.comparison(column, ">", value.clone(), values),
            Condition::Ge(column, value) => builder.comparison(column, ">=", value.clone(), values),
            Condition::Lt(column, value) => builder.comparison(column, "<", value.clone(), values),
            Condition::Le(column, value) => builder.comparison(column, "<=", value.clone(), values),
            Condition::Like(column, pattern) => {
                builder.comparison(column, "LIKE", Value::Text(pattern.clone()), values)
            }
            Condition::In(_, list) if list.is_empty() => String::from("1 = 0"),
            Condition::In(column, list) => {
                let placeholders: Vec<String> = list
                    .iter()
                    .map(|value| builder.bind(values, value.clone()))
                    .collect();
                format!("{} IN ({})", builder.quote_identifier(column), placeholders.join(", "))
            }
        }
    }
}
