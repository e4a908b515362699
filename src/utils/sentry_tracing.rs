use sentry::protocol::SpanStatus;
use sentry::{
    Transaction,
    TransactionContext
};

/// Starts a Sentry transaction when trace logging is enabled.
pub fn start_trace_transaction(name: &str, operation: &str) -> Option<Transaction> {
    if log::max_level() >= log::LevelFilter::Trace {
        let ctx = TransactionContext::new(name, operation);
        Some(sentry::start_transaction(ctx))
    } else {
        None
    }
}

/// Marks the transaction with the outcome of the traced work and finishes it.
pub fn finish_trace_transaction<T, E>(transaction: Option<Transaction>, result: &Result<T, E>) {
    if let Some(txn) = transaction {
        txn.set_status(match result {
            Ok(_) => SpanStatus::Ok,
            Err(_) => SpanStatus::InternalError,
        });
        txn.finish();
    }
}

/// Wraps a block returning `Result` in a trace transaction. The block may
/// `.await` when used inside an async fn.
#[macro_export]
macro_rules! instrument_with_sentry {
    (name = $name:expr, op = $op:expr, $body:block) => {{
        let transaction = $crate::utils::sentry_tracing::start_trace_transaction($name, $op);
        let result = $body;
        $crate::utils::sentry_tracing::finish_trace_transaction(transaction, &result);
        result
    }};
}
