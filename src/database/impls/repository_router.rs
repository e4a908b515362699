use crate::cache::structs::cache_service::CacheService;
use crate::database::enums::condition::Condition;
use crate::database::enums::value::Value;
use crate::database::errors::RepositoryError;
use crate::database::helpers::{bind_values, data_cache_key, data_cache_pattern, row_to_map};
use crate::database::structs::backend_context::BackendContext;
use crate::database::structs::backend_registry::BackendRegistry;
use crate::database::structs::open_transaction::OpenTransaction;
use crate::database::structs::page_query_request::PageQueryRequest;
use crate::database::structs::page_result::PageResult;
use crate::database::structs::query::Query;
use crate::database::structs::query_builder::QueryBuilder;
use crate::database::structs::repository_router::RepositoryRouter;
use crate::database::traits::entity::Entity;
use crate::database::traits::entity_id::EntityId;
use crate::database::traits::from_any_row::FromAnyRow;
use crate::database::traits::projection::Projection;
use futures_util::future::BoxFuture;
use log::{debug, error, info, warn};
use serde_json::{Map, Value as JsonValue};
use sqlx::any::{AnyQueryResult, AnyRow};
use sqlx::{Any, Decode, Row, Type};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

const LOG_PREFIX: &str = "[Repository]";

impl RepositoryRouter {
    /// Binds a new router to the registry's default backend.
    pub fn new(registry: Arc<BackendRegistry>) -> Result<RepositoryRouter, RepositoryError> {
        let current = registry.default_context()?;
        Ok(RepositoryRouter {
            registry,
            current,
            transactions: HashMap::new(),
        })
    }

    pub fn registry(&self) -> &Arc<BackendRegistry> {
        &self.registry
    }

    pub fn current_backend(&self) -> &Arc<BackendContext> {
        &self.current
    }

    /// Re-binds this router. An unknown name leaves the current backend in place.
    /// Reachability is not checked here; it surfaces on the next operation.
    pub fn use_backend(&mut self, name: &str) -> Result<(), RepositoryError> {
        let context = self.registry.by_name(name)?;
        debug!("{} Switching backend '{}' -> '{}'", LOG_PREFIX, self.current.name, context.name);
        self.current = context;
        Ok(())
    }

    /// A new router over the same registry, bound to `name`, with no open transactions.
    pub fn with_backend(&self, name: &str) -> Result<RepositoryRouter, RepositoryError> {
        Ok(RepositoryRouter {
            registry: self.registry.clone(),
            current: self.registry.by_name(name)?,
            transactions: HashMap::new(),
        })
    }

    /// Whether a transaction is open on the current backend.
    pub fn in_transaction(&self) -> bool {
        self.transactions.contains_key(&self.current.name)
    }

    fn builder(&self) -> QueryBuilder {
        self.current.query_builder
    }

    async fn fetch_rows(&mut self, sql: &str, values: Vec<Value>) -> Result<Vec<AnyRow>, sqlx::Error> {
        let query = bind_values(sqlx::query(sql), values);
        match self.transactions.get_mut(&self.current.name) {
            Some(open) => query.fetch_all(&mut *open.transaction).await,
            None => query.fetch_all(&self.current.pool).await,
        }
    }

    async fn fetch_optional_row(&mut self, sql: &str, values: Vec<Value>) -> Result<Option<AnyRow>, sqlx::Error> {
        let query = bind_values(sqlx::query(sql), values);
        match self.transactions.get_mut(&self.current.name) {
            Some(open) => query.fetch_optional(&mut *open.transaction).await,
            None => query.fetch_optional(&self.current.pool).await,
        }
    }

    async fn execute_sql(&mut self, sql: &str, values: Vec<Value>) -> Result<AnyQueryResult, sqlx::Error> {
        let query = bind_values(sqlx::query(sql), values);
        match self.transactions.get_mut(&self.current.name) {
            Some(open) => query.execute(&mut *open.transaction).await,
            None => query.execute(&self.current.pool).await,
        }
    }

    async fn fetch_list<R: FromAnyRow + Send>(&mut self, sql: &str, values: Vec<Value>) -> Result<Vec<R>, RepositoryError> {
        let rows = self.fetch_rows(sql, values).await?;
        let items = rows.iter().map(R::from_any_row).collect::<Result<Vec<R>, sqlx::Error>>()?;
        Ok(items)
    }

    async fn fetch_count(&mut self, sql: &str, values: Vec<Value>) -> Result<i64, RepositoryError> {
        let row = self.fetch_optional_row(sql, values).await?;
        match row {
            Some(row) => Ok(row.try_get::<i64, _>(0)?),
            None => Ok(0),
        }
    }

    /// The data cache to read through, if any. Reads inside a transaction
    /// must see uncommitted writes, so they always go to the backend.
    fn read_cache(&self) -> Option<Arc<CacheService>> {
        if self.in_transaction() {
            return None;
        }
        self.current.cache().cloned()
    }

    async fn cached_list<R: Projection>(&mut self, table: &str, sql: String, values: Vec<Value>) -> Result<Vec<R>, RepositoryError> {
        let Some(cache) = self.read_cache() else {
            return self.fetch_list(&sql, values).await;
        };
        let key = data_cache_key(&self.current.name, table, &sql, &values);
        match cache.try_get::<Vec<R>>(&key).await {
            Ok(Some(items)) => {
                debug!("{} Data cache hit {}", LOG_PREFIX, key);
                return Ok(items);
            }
            Ok(None) => {}
            Err(error) => warn!("{} Data cache read failed for {}, querying backend: {}", LOG_PREFIX, key, error),
        }
        let items = self.fetch_list::<R>(&sql, values).await?;
        if let Err(error) = cache.set(&key, &items, self.current.data_cache_ttl).await {
            warn!("{} Data cache write failed for {}: {}", LOG_PREFIX, key, error);
        }
        Ok(items)
    }

    async fn cached_count(&mut self, table: &str, sql: String, values: Vec<Value>) -> Result<i64, RepositoryError> {
        let Some(cache) = self.read_cache() else {
            return self.fetch_count(&sql, values).await;
        };
        let key = data_cache_key(&self.current.name, table, &sql, &values);
        match cache.try_get::<i64>(&key).await {
            Ok(Some(count)) => return Ok(count),
            Ok(None) => {}
            Err(error) => warn!("{} Data cache read failed for {}, querying backend: {}", LOG_PREFIX, key, error),
        }
        let count = self.fetch_count(&sql, values).await?;
        if let Err(error) = cache.set(&key, &count, self.current.data_cache_ttl).await {
            warn!("{} Data cache write failed for {}: {}", LOG_PREFIX, key, error);
        }
        Ok(count)
    }

    async fn clear_table_cache(context: &BackendContext, table: &str) -> Result<u64, RepositoryError> {
        let Some(cache) = context.cache() else {
            return Ok(0);
        };
        let removed = cache.remove_by_pattern(&data_cache_pattern(&context.name, table)).await?;
        debug!("{} Invalidated {} data cache entries of {}.{}", LOG_PREFIX, removed, context.name, table);
        Ok(removed)
    }

    /// Drops every data cache entry of `table` on the current backend. A
    /// failure is logged; stale entries then live until the data cache TTL
    /// runs out, or until removed when no TTL is configured.
    async fn invalidate(&mut self, table: &str) {
        if let Some(open) = self.transactions.get_mut(&self.current.name) {
            open.touched_tables.insert(table.to_string());
        }
        if let Err(error) = Self::clear_table_cache(&self.current, table).await {
            Self::report_invalidation_failure(&self.current, table, &error);
        }
    }

    fn report_invalidation_failure(context: &BackendContext, table: &str, error: &RepositoryError) {
        match context.data_cache_ttl {
            Some(ttl) => warn!(
                "{} Data cache invalidation failed for {}.{}, stale for up to {:?}: {}",
                LOG_PREFIX, context.name, table, ttl, error
            ),
            None => error!(
                "{} Data cache invalidation failed for {}.{} and no TTL is set, stale until removed: {}",
                LOG_PREFIX, context.name, table, error
            ),
        }
    }

    async fn mutate(&mut self, table: &str, sql: &str, values: Vec<Value>) -> Result<u64, RepositoryError> {
        let result = self.execute_sql(sql, values).await?;
        self.invalidate(table).await;
        Ok(result.rows_affected())
    }

    /// Runs `statements` all-or-nothing. Outside a caller's transaction they get
    /// their own, rolled back on the first failure. The table's data cache is
    /// invalidated whatever the outcome.
    async fn mutate_batch(&mut self, table: &str, statements: Vec<(String, Vec<Value>)>) -> Result<u64, RepositoryError> {
        if statements.is_empty() {
            return Ok(0);
        }
        let owns_transaction = !self.in_transaction();
        if owns_transaction {
            self.begin_tran().await?;
        }
        let mut affected = 0;
        let mut outcome = Ok(());
        for (sql, values) in statements {
            match self.execute_sql(&sql, values).await {
                Ok(result) => affected += result.rows_affected(),
                Err(error) => {
                    outcome = Err(RepositoryError::from(error));
                    break;
                }
            }
        }
        if owns_transaction {
            outcome = match outcome {
                Ok(()) => self.commit_tran().await,
                Err(error) => {
                    if let Err(rollback_error) = self.rollback_tran().await {
                        warn!("{} Batch rollback on '{}' failed: {}", LOG_PREFIX, self.current.name, rollback_error);
                    }
                    Err(error)
                }
            };
        }
        self.invalidate(table).await;
        outcome.map(|()| affected)
    }

    /// Manually invalidates the data cache of `E` on the current backend.
    pub async fn remove_data_cache<E: Entity>(&self) -> Result<u64, RepositoryError> {
        Self::clear_table_cache(&self.current, E::TABLE).await
    }

    fn id_filter<E: Entity>(id: &E::Id) -> Query<E> {
        Query::new().filter(Condition::Eq(E::PRIMARY_KEY.to_string(), id.to_value()))
    }

    #[tracing::instrument(level = "debug", skip_all, fields(backend = %self.current.name))]
    pub async fn get_list<E: Entity>(&mut self, query: &Query<E>) -> Result<Vec<E>, RepositoryError> {
        self.get_list_select::<E, E>(query).await
    }

    /// Selects the columns of `R` from the table of `E`.
    pub async fn get_list_select<E: Entity, R: Projection>(&mut self, query: &Query<E>) -> Result<Vec<R>, RepositoryError> {
        let builder = self.builder();
        let mut values = Vec::new();
        let filter = query.where_clause(&builder, &mut values);
        let sql = builder.select(E::TABLE, R::columns(), &filter, &query.order_clause(&builder), None);
        self.cached_list(E::TABLE, sql, values).await
    }

    pub async fn get_page_list<E: Entity, P>(&mut self, query: &Query<E>, page: &PageQueryRequest<P>) -> Result<PageResult<E>, RepositoryError> {
        self.get_page_list_select::<E, E, P>(query, page).await
    }

    /// One page plus the total number of matching rows. A non-positive page
    /// size or number yields no items but still reports the total.
    #[tracing::instrument(level = "debug", skip_all, fields(backend = %self.current.name))]
    pub async fn get_page_list_select<E: Entity, R: Projection, P>(
        &mut self,
        query: &Query<E>,
        page: &PageQueryRequest<P>,
    ) -> Result<PageResult<R>, RepositoryError> {
        let total_count = self.count(query).await?;
        let window = page.offset_limit();
        let items = match window {
            Some(window) => {
                let builder = self.builder();
                let mut values = Vec::new();
                let filter = query.where_clause(&builder, &mut values);
                let sql = builder.select(E::TABLE, R::columns(), &filter, &query.order_clause(&builder), Some(window));
                self.cached_list(E::TABLE, sql, values).await?
            }
            None => Vec::new(),
        };
        Ok(PageResult { items, total_count })
    }

    pub async fn get_by_id<E: Entity>(&mut self, id: &E::Id) -> Result<Option<E>, RepositoryError> {
        self.get_first(&Self::id_filter::<E>(id)).await
    }

    pub async fn get_first<E: Entity>(&mut self, query: &Query<E>) -> Result<Option<E>, RepositoryError> {
        let builder = self.builder();
        let mut values = Vec::new();
        let filter = query.where_clause(&builder, &mut values);
        let sql = builder.select(E::TABLE, E::columns(), &filter, &query.order_clause(&builder), Some((0, 1)));
        let items: Vec<E> = self.cached_list(E::TABLE, sql, values).await?;
        Ok(items.into_iter().next())
    }

    pub async fn count<E: Entity>(&mut self, query: &Query<E>) -> Result<i64, RepositoryError> {
        let builder = self.builder();
        let mut values = Vec::new();
        let filter = query.where_clause(&builder, &mut values);
        let sql = builder.count(E::TABLE, &filter);
        self.cached_count(E::TABLE, sql, values).await
    }

    pub async fn any<E: Entity>(&mut self, query: &Query<E>) -> Result<bool, RepositoryError> {
        Ok(self.count(query).await? > 0)
    }

    /// Transient ids are left to the store to assign.
    fn insert_statement<E: Entity>(&self, entity: &E, returning: bool) -> (String, Vec<Value>) {
        let mut columns = Vec::new();
        let mut row = Vec::new();
        if !entity.id().is_transient() {
            columns.push(E::PRIMARY_KEY);
            row.push(entity.id().to_value());
        }
        for (column, value) in entity.values() {
            columns.push(column);
            row.push(value);
        }
        let mut values = Vec::new();
        let sql = self.builder().insert(E::TABLE, &columns, row, &mut values, returning.then_some(E::PRIMARY_KEY));
        (sql, values)
    }

    fn update_statement<E: Entity>(&self, entity: &E, skip_nulls: bool) -> Option<(String, Vec<Value>)> {
        let assignments: Vec<(&str, Value)> = entity
            .values()
            .into_iter()
            .filter(|(_, value)| !(skip_nulls && value.is_null()))
            .collect();
        if assignments.is_empty() {
            return None;
        }
        let builder = self.builder();
        let mut values = Vec::new();
        let mut sql = builder.update(E::TABLE, assignments, &mut values);
        sql.push_str(&Self::id_filter::<E>(entity.id()).where_clause(&builder, &mut values));
        Some((sql, values))
    }

    #[tracing::instrument(level = "debug", skip_all, fields(backend = %self.current.name))]
    pub async fn insert<E: Entity>(&mut self, entity: &E) -> Result<bool, RepositoryError> {
        let (sql, values) = self.insert_statement(entity, false);
        Ok(self.mutate(E::TABLE, &sql, values).await? > 0)
    }

    /// Inserts every entity or none of them.
    pub async fn insert_range<E: Entity>(&mut self, entities: &[E]) -> Result<bool, RepositoryError> {
        let statements = entities.iter().map(|entity| self.insert_statement(entity, false)).collect();
        Ok(self.mutate_batch(E::TABLE, statements).await? > 0)
    }

    /// Inserts and returns the identity the store assigned.
    pub async fn insert_return_identity<E: Entity>(&mut self, entity: &E) -> Result<i64, RepositoryError> {
        let (sql, values) = self.insert_statement(entity, true);
        let identity = if self.builder().supports_returning() {
            let row = self.fetch_optional_row(&sql, values).await?.ok_or(sqlx::Error::RowNotFound)?;
            row.try_get::<i64, _>(0)?
        } else {
            self.execute_sql(&sql, values)
                .await?
                .last_insert_id()
                .ok_or_else(|| sqlx::Error::Protocol(String::from("backend did not report an inserted id")))?
        };
        self.invalidate(E::TABLE).await;
        Ok(identity)
    }

    pub async fn update<E: Entity>(&mut self, entity: &E) -> Result<bool, RepositoryError> {
        let Some((sql, values)) = self.update_statement(entity, false) else {
            return Ok(false);
        };
        Ok(self.mutate(E::TABLE, &sql, values).await? > 0)
    }

    /// Like `update`, but columns whose value is NULL are left untouched.
    pub async fn update_ignore_null<E: Entity>(&mut self, entity: &E) -> Result<bool, RepositoryError> {
        let Some((sql, values)) = self.update_statement(entity, true) else {
            return Ok(false);
        };
        Ok(self.mutate(E::TABLE, &sql, values).await? > 0)
    }

    /// Updates every entity or none of them.
    pub async fn update_range<E: Entity>(&mut self, entities: &[E]) -> Result<bool, RepositoryError> {
        let statements = entities.iter().filter_map(|entity| self.update_statement(entity, false)).collect();
        Ok(self.mutate_batch(E::TABLE, statements).await? > 0)
    }

    /// Assigns `assignments` on every row matching `query`.
    pub async fn update_columns<E: Entity>(&mut self, assignments: Vec<(&str, Value)>, query: &Query<E>) -> Result<bool, RepositoryError> {
        if assignments.is_empty() {
            return Ok(false);
        }
        let builder = self.builder();
        let mut values = Vec::new();
        let mut sql = builder.update(E::TABLE, assignments, &mut values);
        sql.push_str(&query.where_clause(&builder, &mut values));
        Ok(self.mutate(E::TABLE, &sql, values).await? > 0)
    }

    pub async fn delete<E: Entity>(&mut self, query: &Query<E>) -> Result<bool, RepositoryError> {
        let builder = self.builder();
        let mut values = Vec::new();
        let sql = builder.delete(E::TABLE, &query.where_clause(&builder, &mut values));
        Ok(self.mutate(E::TABLE, &sql, values).await? > 0)
    }

    pub async fn delete_entity<E: Entity>(&mut self, entity: &E) -> Result<bool, RepositoryError> {
        self.delete_by_id::<E>(entity.id()).await
    }

    pub async fn delete_by_id<E: Entity>(&mut self, id: &E::Id) -> Result<bool, RepositoryError> {
        self.delete(&Self::id_filter::<E>(id)).await
    }

    pub async fn delete_by_ids<E: Entity>(&mut self, ids: &[E::Id]) -> Result<bool, RepositoryError> {
        if ids.is_empty() {
            return Ok(false);
        }
        let query = Query::<E>::new().filter(Condition::In(
            E::PRIMARY_KEY.to_string(),
            ids.iter().map(|id| id.to_value()).collect(),
        ));
        self.delete(&query).await
    }

    /// Raw query in the backend's own dialect. Never cached.
    pub async fn sql_query_list<R: FromAnyRow + Send>(&mut self, sql: &str, values: Vec<Value>) -> Result<Vec<R>, RepositoryError> {
        self.fetch_list(sql, values).await
    }

    pub async fn sql_query_first<R: FromAnyRow + Send>(&mut self, sql: &str, values: Vec<Value>) -> Result<Option<R>, RepositoryError> {
        match self.fetch_optional_row(sql, values).await? {
            Some(row) => Ok(Some(R::from_any_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Raw query with each row as a column-name to JSON value map. Never cached.
    pub async fn sql_query_map_list(&mut self, sql: &str, values: Vec<Value>) -> Result<Vec<Map<String, JsonValue>>, RepositoryError> {
        let rows = self.fetch_rows(sql, values).await?;
        let maps = rows.iter().map(row_to_map).collect::<Result<Vec<_>, sqlx::Error>>()?;
        Ok(maps)
    }

    pub async fn sql_query_map_first(&mut self, sql: &str, values: Vec<Value>) -> Result<Option<Map<String, JsonValue>>, RepositoryError> {
        match self.fetch_optional_row(sql, values).await? {
            Some(row) => Ok(Some(row_to_map(&row)?)),
            None => Ok(None),
        }
    }

    /// First column of the first row. Use an `Option` type for nullable results.
    pub async fn get_scalar<T>(&mut self, sql: &str, values: Vec<Value>) -> Result<Option<T>, RepositoryError>
    where
        T: for<'r> Decode<'r, Any> + Type<Any> + Send,
    {
        match self.fetch_optional_row(sql, values).await? {
            Some(row) => Ok(Some(row.try_get::<T, _>(0)?)),
            None => Ok(None),
        }
    }

    /// Raw statement; returns rows affected. Does not touch the data cache,
    /// see [`remove_data_cache`](RepositoryRouter::remove_data_cache).
    pub async fn execute_command(&mut self, sql: &str, values: Vec<Value>) -> Result<u64, RepositoryError> {
        Ok(self.execute_sql(sql, values).await?.rows_affected())
    }

    /// Opens a transaction on the current backend. Nesting is rejected.
    pub async fn begin_tran(&mut self) -> Result<(), RepositoryError> {
        if self.in_transaction() {
            return Err(RepositoryError::TransactionAlreadyOpen(self.current.name.clone()));
        }
        let transaction = self.current.pool.begin().await?;
        self.transactions.insert(self.current.name.clone(), OpenTransaction {
            transaction,
            touched_tables: BTreeSet::new(),
        });
        debug!("{} Transaction opened on '{}'", LOG_PREFIX, self.current.name);
        Ok(())
    }

    pub async fn commit_tran(&mut self) -> Result<(), RepositoryError> {
        let OpenTransaction { transaction, touched_tables } = self
            .transactions
            .remove(&self.current.name)
            .ok_or_else(|| RepositoryError::NoTransaction(self.current.name.clone()))?;
        transaction.commit().await?;
        debug!("{} Transaction committed on '{}'", LOG_PREFIX, self.current.name);
        // Entries cached by other routers while the transaction was open are stale now.
        for table in &touched_tables {
            if let Err(error) = Self::clear_table_cache(&self.current, table).await {
                Self::report_invalidation_failure(&self.current, table, &error);
            }
        }
        Ok(())
    }

    pub async fn rollback_tran(&mut self) -> Result<(), RepositoryError> {
        let open = self
            .transactions
            .remove(&self.current.name)
            .ok_or_else(|| RepositoryError::NoTransaction(self.current.name.clone()))?;
        open.transaction.rollback().await?;
        debug!("{} Transaction rolled back on '{}'", LOG_PREFIX, self.current.name);
        Ok(())
    }

    /// Runs `unit_of_work` inside a transaction on the current backend and
    /// commits it. If the unit of work fails, the transaction is rolled back
    /// and its error is returned as is. The router is re-bound to the
    /// transaction's backend before commit or rollback.
    ///
    /// ```rust,ignore
    /// repository.tran(|repo| Box::pin(async move {
    ///     repo.insert(&order).await?;
    ///     repo.update(&stock).await?;
    ///     Ok::<_, RepositoryError>(())
    /// })).await?;
    /// ```
    pub async fn tran<F, T, E>(&mut self, unit_of_work: F) -> Result<T, E>
    where
        F: for<'a> FnOnce(&'a mut RepositoryRouter) -> BoxFuture<'a, Result<T, E>>,
        E: From<RepositoryError>,
    {
        self.begin_tran().await?;
        let bound = self.current.clone();
        let outcome = unit_of_work(&mut *self).await;
        self.current = bound;
        match outcome {
            Ok(value) => {
                self.commit_tran().await?;
                Ok(value)
            }
            Err(error) => {
                if let Err(rollback_error) = self.rollback_tran().await {
                    warn!("{} Rollback on '{}' failed: {}", LOG_PREFIX, self.current.name, rollback_error);
                }
                Err(error)
            }
        }
    }

    /// Best effort: always returns `true`. A failure is only logged.
    pub async fn drop_table(&mut self, table: &str) -> bool {
        let sql = self.builder().drop_table(table);
        match self.execute_sql(&sql, Vec::new()).await {
            Ok(_) => info!("{} Dropped table {}.{}", LOG_PREFIX, self.current.name, table),
            Err(error) => warn!("{} Dropping table {}.{} failed: {}", LOG_PREFIX, self.current.name, table, error),
        }
        self.invalidate(table).await;
        true
    }
}

impl fmt::Debug for RepositoryRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepositoryRouter")
            .field("current", &self.current.name)
            .field("backends", &self.registry.names())
            .field("transactions", &self.transactions.keys().collect::<Vec<&String>>())
            .finish()
    }
}
