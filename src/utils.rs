/// Optional Sentry performance transactions around startup work.
pub mod sentry_tracing;
