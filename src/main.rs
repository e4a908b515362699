use std::process::exit;
use std::time::Duration;
use clap::Parser;
use log::{error, info, warn};
use parking_lot::deadlock;
use sentry::ClientInitGuard;
use tokio::runtime::Builder;
use cached_repository::config::enums::configuration_error::ConfigurationError;
use cached_repository::config::structs::configuration::Configuration;
use cached_repository::database::structs::backend_registry::BackendRegistry;
use cached_repository::logging::setup_logging;
use cached_repository::structs::Cli;

#[tracing::instrument(level = "debug")]
fn main() -> std::io::Result<()>
{
    let args = Cli::parse();

    let config = match Configuration::load_from_file(&args.config, args.create_config) {
        Ok(config) => config,
        Err(ConfigurationError::Created(_)) => exit(0),
        Err(error) => {
            eprintln!("[ERROR] {error}");
            exit(101)
        }
    };

    if let Err(error) = setup_logging(&config) {
        eprintln!("[ERROR] {error}");
        exit(101);
    }

    info!("{} - Version: {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    #[warn(unused_variables)]
    let _sentry_guard: ClientInitGuard;
    if config.sentry_config.enabled {
        _sentry_guard = sentry::init((config.sentry_config.dsn.clone(), sentry::ClientOptions {
            release: sentry::release_name!(),
            debug: config.sentry_config.debug,
            sample_rate: config.sentry_config.sample_rate,
            max_breadcrumbs: config.sentry_config.max_breadcrumbs,
            attach_stacktrace: config.sentry_config.attach_stacktrace,
            send_default_pii: config.sentry_config.send_default_pii,
            traces_sample_rate: config.sentry_config.traces_sample_rate,
            ..Default::default()
        }));
    }

    Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let registry = match BackendRegistry::from_configuration(&config).await {
                Ok(registry) => registry,
                Err(error) => {
                    error!("[BOOT] Unable to initialize backends: {error}");
                    exit(1);
                }
            };

            let mut healthy = true;
            for context in registry.contexts() {
                match context.ping().await {
                    Ok(_) => info!("[CHECK] Backend '{}' ({}) is reachable", context.name(), context.driver()),
                    Err(error) => {
                        healthy = false;
                        error!("[CHECK] Backend '{}' failed: {error}", context.name());
                    }
                }
                if let Some(cache) = context.cache() {
                    match cache.ping().await {
                        Ok(_) => info!("[CHECK] Cache for '{}' is reachable", context.name()),
                        Err(error) => warn!("[CHECK] Cache for '{}' failed: {error}", context.name()),
                    }
                }
            }

            if args.check {
                registry.close().await;
                exit(if healthy { 0 } else { 1 });
            }

            info!("[BOOT] Ready, press Ctrl-C to stop");
            let mut maintenance = tokio::time::interval(Duration::from_secs(30));
            loop {
                tokio::select! {
                    _ = maintenance.tick() => {
                        for context in registry.contexts() {
                            if let Some(cache) = context.cache() {
                                cache.pool().evict_idle();
                            }
                        }
                        let deadlocks = deadlock::check_deadlock();
                        if !deadlocks.is_empty() {
                            info!("[DEADLOCK] Found {} deadlocks", deadlocks.len());
                            for (i, threads) in deadlocks.iter().enumerate() {
                                info!("[DEADLOCK] #{i}");
                                for t in threads {
                                    info!("[DEADLOCK] Thread ID: {:#?}", t.thread_id());
                                    sentry::capture_message(&format!("{:#?}", t.backtrace()), sentry::Level::Error);
                                }
                            }
                        }
                    }
                    _ = tokio::signal::ctrl_c() => {
                        info!("[BOOT] Shutting down...");
                        break;
                    }
                }
            }
            registry.close().await;
            Ok(())
        })
}
