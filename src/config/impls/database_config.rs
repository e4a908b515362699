use crate::config::structs::database_config::DatabaseConfig;

impl DatabaseConfig {
    pub(crate) fn default_max_connections() -> u32 {
        10
    }

    pub(crate) fn default_acquire_timeout() -> u64 {
        30
    }
}
