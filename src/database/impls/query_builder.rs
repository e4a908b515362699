use crate::database::enums::database_drivers::DatabaseDrivers;
use crate::database::enums::value::Value;
use crate::database::structs::query_builder::QueryBuilder;

impl QueryBuilder {
    pub fn new(engine: DatabaseDrivers) -> Self {
        Self { engine }
    }

    pub fn quote_identifier(&self, identifier: &str) -> String {
        match self.engine {
            DatabaseDrivers::sqlite3 | DatabaseDrivers::mysql => format!("`{}`", identifier.replace('`', "``")),
            DatabaseDrivers::pgsql => format!("\"{}\"", identifier.replace('"', "\"\"")),
        }
    }

    /// Placeholder for the 1-based parameter `index`.
    pub fn placeholder(&self, index: usize) -> String {
        match self.engine {
            DatabaseDrivers::sqlite3 | DatabaseDrivers::mysql => String::from("?"),
            DatabaseDrivers::pgsql => format!("${}", index),
        }
    }

    /// Appends `value` to the parameter list and returns its placeholder.
    pub fn bind(&self, values: &mut Vec<Value>, value: Value) -> String {
        values.push(value);
        self.placeholder(values.len())
    }

    pub fn comparison(&self, column: &str, operator: &str, value: Value, values: &mut Vec<Value>) -> String {
        format!("{} {} {}", self.quote_identifier(column), operator, self.bind(values, value))
    }

    pub fn limit_offset(&self, offset: u64, limit: u64) -> String {
        match self.engine {
            DatabaseDrivers::sqlite3 | DatabaseDrivers::mysql => format!("LIMIT {}, {}", offset, limit),
            DatabaseDrivers::pgsql => format!("LIMIT {} OFFSET {}", limit, offset),
        }
    }

    pub fn supports_returning(&self) -> bool {
        matches!(self.engine, DatabaseDrivers::pgsql)
    }

    pub fn column_list(&self, columns: &[&str]) -> String {
        columns
            .iter()
            .map(|column| self.quote_identifier(column))
            .collect::<Vec<String>>()
            .join(", ")
    }

    /// `filter` and `order` are either empty or start with a space.
    pub fn select(&self, table: &str, columns: &[&str], filter: &str, order: &str, page: Option<(u64, u64)>) -> String {
        let mut sql = format!("SELECT {} FROM {}{}{}", self.column_list(columns), self.quote_identifier(table), filter, order);
        if let Some((offset, limit)) = page {
            sql.push(' ');
            sql.push_str(&self.limit_offset(offset, limit));
        }
        sql
    }

    pub fn count(&self, table: &str, filter: &str) -> String {
        format!("SELECT COUNT(*) FROM {}{}", self.quote_identifier(table), filter)
    }

    /// Insert of `columns`, binding `row` into `values`.
    pub fn insert(&self, table: &str, columns: &[&str], row: Vec<Value>, values: &mut Vec<Value>, returning: Option<&str>) -> String {
        let placeholders: Vec<String> = row.into_iter().map(|value| self.bind(values, value)).collect();
        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.quote_identifier(table),
            self.column_list(columns),
            placeholders.join(", ")
        );
        if let Some(column) = returning && self.supports_returning() {
            sql.push_str(&format!(" RETURNING {}", self.quote_identifier(column)));
        }
        sql
    }

    /// `SET` clause for `assignments`; parameters are bound before any filter that follows.
    pub fn update(&self, table: &str, assignments: Vec<(&str, Value)>, values: &mut Vec<Value>) -> String {
        let sets: Vec<String> = assignments
            .into_iter()
            .map(|(column, value)| self.comparison(column, "=", value, values))
            .collect();
        format!("UPDATE {} SET {}", self.quote_identifier(table), sets.join(", "))
    }

    pub fn delete(&self, table: &str, filter: &str) -> String {
        format!("DELETE FROM {}{}", self.quote_identifier(table), filter)
    }

    pub fn drop_table(&self, table: &str) -> String {
        format!("DROP TABLE {}", self.quote_identifier(table))
    }
}
