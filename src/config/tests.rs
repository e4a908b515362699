#[cfg(test)]
mod config_tests {
    mod configuration_tests {
        use crate::cache::enums::cache_engine::CacheEngine;
        use crate::config::enums::configuration_error::ConfigurationError;
        use crate::config::structs::configuration::Configuration;

        #[test]
        fn test_init_is_valid() {
            let config = Configuration::init();
            assert!(config.validate().is_ok());
            assert_eq!(config.database.len(), 1);
            assert!(config.database[0].default);
        }

        #[test]
        fn test_init_round_trips_through_toml() {
            let config = Configuration::init();
            let serialized = toml::to_string(&config).unwrap();
            let loaded = Configuration::load(serialized.as_bytes()).unwrap();
            assert_eq!(loaded.log_level, config.log_level);
            assert_eq!(loaded.cache, config.cache);
            assert_eq!(loaded.database, config.database);
        }

        #[test]
        fn test_cache_defaults_apply() {
            let data = r#"
                log_level = "debug"

                [cache]
                engine = "memory"
                write_endpoints = ["a:1"]

                [[database]]
                name = "main"
                engine = "sqlite3"
                path = "sqlite::memory:"
                default = true
                cache_enabled = true
            "#;
            let config = Configuration::load(data.as_bytes()).unwrap();
            let cache = config.cache.clone().unwrap();
            assert_eq!(cache.engine, CacheEngine::memory);
            assert!(cache.read_endpoints.is_empty());
            assert_eq!(cache.max_write_pool_size, 8);
            assert_eq!(cache.max_read_pool_size, 12);
            assert_eq!(cache.pool_timeout, 6000);
            assert_eq!(cache.idle_timeout, 60);
            assert_eq!(cache.data_cache_ttl, None);
            assert_eq!(config.database[0].max_connections, 10);
            assert!(!config.sentry_config.enabled);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_unknown_log_level_rejected() {
            let mut config = Configuration::init();
            config.log_level = String::from("verbose");
            assert!(matches!(config.validate(), Err(ConfigurationError::Validation(_))));
        }

        #[test]
        fn test_empty_write_endpoints_rejected() {
            let mut config = Configuration::init();
            if let Some(cache) = config.cache.as_mut() {
                cache.write_endpoints.clear();
            }
            assert!(matches!(config.validate(), Err(ConfigurationError::Validation(_))));
        }

        #[test]
        fn test_malformed_redis_endpoint_rejected() {
            let mut config = Configuration::init();
            if let Some(cache) = config.cache.as_mut() {
                cache.write_endpoints = vec![String::from("no port here")];
            }
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_redis_endpoint_formats_accepted() {
            let mut config = Configuration::init();
            if let Some(cache) = config.cache.as_mut() {
                cache.write_endpoints = vec![
                    String::from("127.0.0.1:6379"),
                    String::from("secret@cache.local:6380"),
                    String::from("redis://user:pw@cache:6379/2"),
                ];
            }
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_two_defaults_rejected() {
            let mut config = Configuration::init();
            let mut second = config.database[0].clone();
            second.name = String::from("reporting");
            config.database.push(second);
            assert!(matches!(config.validate(), Err(ConfigurationError::Validation(_))));
        }

        #[test]
        fn test_no_default_rejected() {
            let mut config = Configuration::init();
            config.database[0].default = false;
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_duplicate_names_rejected() {
            let mut config = Configuration::init();
            let mut second = config.database[0].clone();
            second.default = false;
            config.database.push(second);
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_cache_enabled_without_cache_rejected() {
            let mut config = Configuration::init();
            config.cache = None;
            config.database[0].cache_enabled = true;
            assert!(config.validate().is_err());
            config.database[0].cache_enabled = false;
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_validate_value() {
            assert!(Configuration::validate_value("name", "main_db", r"^[a-z_]+$").is_ok());
            assert!(Configuration::validate_value("name", "Main DB", r"^[a-z_]+$").is_err());
        }
    }

    mod configuration_error_tests {
        use crate::config::enums::configuration_error::ConfigurationError;

        #[test]
        fn test_display() {
            let error = ConfigurationError::Validation(String::from("bad"));
            assert_eq!(error.to_string(), "invalid configuration: bad");
            let error = ConfigurationError::IOError(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
            assert_eq!(error.to_string(), "missing");
        }
    }

    mod logging_tests {
        use crate::config::enums::configuration_error::ConfigurationError;
        use crate::logging::parse_level;

        #[test]
        fn test_parse_known_levels() {
            assert_eq!(parse_level("off").unwrap(), log::LevelFilter::Off);
            assert_eq!(parse_level("trace").unwrap(), log::LevelFilter::Trace);
            assert_eq!(parse_level("warn").unwrap(), log::LevelFilter::Warn);
        }

        #[test]
        fn test_parse_unknown_level_fails() {
            assert!(matches!(parse_level("verbose"), Err(ConfigurationError::Validation(_))));
            assert!(parse_level("INFO").is_err());
        }
    }
}
