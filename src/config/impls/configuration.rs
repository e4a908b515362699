use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use regex::Regex;
use crate::cache::enums::cache_engine::CacheEngine;
use crate::config::enums::configuration_error::ConfigurationError;
use crate::config::structs::cache_config::CacheConfig;
use crate::config::structs::configuration::Configuration;
use crate::config::structs::database_config::DatabaseConfig;
use crate::config::structs::sentry_config::SentryConfig;
use crate::database::enums::database_drivers::DatabaseDrivers;

pub const LOG_LEVELS: [&str; 6] = ["off", "trace", "debug", "info", "warn", "error"];

const BACKEND_NAME_REGEX: &str = r"^[A-Za-z0-9_.\-]{1,64}$";
const REDIS_ENDPOINT_REGEX: &str = r"^(rediss?://\S+|([^@\s]+@)?[A-Za-z0-9_.\-]+:\d{1,5})$";

impl Configuration {
    pub fn init() -> Configuration {
        Configuration {
            log_level: String::from("info"),
            cache: Some(CacheConfig {
                prefix: String::from("app:"),
                data_cache_ttl: Some(300),
                ..Default::default()
            }),
            database: vec![
                DatabaseConfig {
                    name: String::from("main"),
                    engine: DatabaseDrivers::sqlite3,
                    path: String::from("sqlite://data.db?mode=rwc"),
                    default: true,
                    cache_enabled: false,
                    max_connections: DatabaseConfig::default_max_connections(),
                    acquire_timeout: DatabaseConfig::default_acquire_timeout(),
                }
            ],
            sentry_config: SentryConfig::default(),
        }
    }

    pub fn load(data: &[u8]) -> Result<Configuration, toml::de::Error> {
        toml::from_str(&String::from_utf8_lossy(data))
    }

    pub fn load_file(path: &str) -> Result<Configuration, ConfigurationError> {
        match std::fs::read(path) {
            Err(e) => Err(ConfigurationError::IOError(e)),
            Ok(data) => {
                match Self::load(data.as_slice()) {
                    Ok(cfg) => {
                        Ok(cfg)
                    }
                    Err(e) => Err(ConfigurationError::ParseError(e)),
                }
            }
        }
    }

    pub fn save_file(path: &str, data: String) -> Result<(), ConfigurationError> {
        match File::create(path) {
            Ok(mut file) => {
                match file.write_all(data.as_ref()) {
                    Ok(_) => Ok(()),
                    Err(e) => Err(ConfigurationError::IOError(e))
                }
            }
            Err(e) => Err(ConfigurationError::IOError(e))
        }
    }

    /// Loads and validates `path`. When the file is missing or corrupt and
    /// `create` is set, a template is written and `ConfigurationError::Created`
    /// is returned so the caller can stop and let the operator edit it.
    pub fn load_from_file(path: &str, create: bool) -> Result<Configuration, ConfigurationError> {
        let config = match Configuration::load_file(path) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("No config file found or corrupt.");
                eprintln!("[ERROR] {error}");

                if !create {
                    eprintln!("You can either create your own {path} file, or start this app using '--create-config' as parameter.");
                    return Err(error);
                }
                eprintln!("Creating config file..");

                let config_toml = toml::to_string(&Configuration::init()).map_err(ConfigurationError::SerializeError)?;
                return match Configuration::save_file(path, config_toml) {
                    Ok(_) => {
                        eprintln!("Please edit {path}, exiting now...");
                        Err(ConfigurationError::Created(path.to_string()))
                    }
                    Err(e) => {
                        eprintln!("{path} file could not be created, check permissions...");
                        eprintln!("{e}");
                        Err(e)
                    }
                };
            }
        };

        println!("[VALIDATE] Validating configuration...");
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigurationError::Validation(format!("unknown log level '{}'", self.log_level)));
        }

        if let Some(cache) = &self.cache {
            Self::validate_cache(cache)?;
        }

        if self.database.is_empty() {
            return Err(ConfigurationError::Validation(String::from("at least one [[database]] entry is required")));
        }
        let mut names = HashSet::new();
        for database in &self.database {
            Self::validate_value("[DB] Name", &database.name, BACKEND_NAME_REGEX)?;
            if !names.insert(database.name.as_str()) {
                return Err(ConfigurationError::Validation(format!("database '{}' is configured more than once", database.name)));
            }
            if database.path.trim().is_empty() {
                return Err(ConfigurationError::Validation(format!("database '{}' has an empty path", database.name)));
            }
            if database.max_connections == 0 {
                return Err(ConfigurationError::Validation(format!("database '{}' needs max_connections above zero", database.name)));
            }
            if database.cache_enabled && self.cache.is_none() {
                return Err(ConfigurationError::Validation(format!("database '{}' enables caching but no [cache] section exists", database.name)));
            }
        }
        match self.database.iter().filter(|database| database.default).count() {
            1 => Ok(()),
            0 => Err(ConfigurationError::Validation(String::from("no database is marked as default"))),
            _ => Err(ConfigurationError::Validation(String::from("more than one database is marked as default"))),
        }
    }

    fn validate_cache(cache: &CacheConfig) -> Result<(), ConfigurationError> {
        if cache.write_endpoints.is_empty() {
            return Err(ConfigurationError::Validation(String::from("[cache] needs at least one write endpoint")));
        }
        if cache.max_write_pool_size == 0 || cache.max_read_pool_size == 0 {
            return Err(ConfigurationError::Validation(String::from("[cache] pool sizes must be above zero")));
        }
        if let Some(database) = cache.default_database && database < 0 {
            return Err(ConfigurationError::Validation(format!("[cache] default_database {database} is negative")));
        }
        for endpoint in cache.write_endpoints.iter().chain(cache.read_endpoints.iter()) {
            match cache.engine {
                CacheEngine::redis => Self::validate_value("[Cache] Endpoint", endpoint, REDIS_ENDPOINT_REGEX)?,
                CacheEngine::memory => {
                    if endpoint.trim().is_empty() {
                        return Err(ConfigurationError::Validation(String::from("[cache] endpoints cannot be empty")));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn validate_value(name: &str, value: &str, regex: &str) -> Result<(), ConfigurationError> {
        let regex_check = Regex::new(regex)
            .map_err(|e| ConfigurationError::Validation(format!("{name}: {e}")))?;
        if !regex_check.is_match(value) {
            return Err(ConfigurationError::Validation(format!("Error checking {name} [:] Value: \"{value}\" [:] Regex: \"{regex_check}\"")));
        }
        Ok(())
    }
}
