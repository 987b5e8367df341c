//! `prople-orgagent-app` assembles the organizational agent from its configuration.
//!
//! It provides the configuration layer, the in-memory storage implementing every repository
//! abstraction of `prople-orgagent-core`, and the [`OrgAgent`] facade which owns the
//! presentation rebuild worker.
use rst_common::with_tracing::tracing_subscriber::{
    self, layer::SubscriberExt, util::SubscriberInitExt,
};

pub mod common;
use common::types::CommonError;

mod config;
pub use config::Config;
pub use config::Parser as ConfigManager;

pub mod apps;

mod orgagent;
pub use orgagent::{ConnectionService, OrgAgent, PresentationService, RevocationService};

/// load_config parses and validates the `TOML` configuration file
pub fn load_config(conf_file: String) -> Result<Config, CommonError> {
    let config = ConfigManager::new(conf_file)
        .parse()
        .map_err(|err| CommonError::ConfigError(err.to_string()))?;

    common::helpers::validate(&config)?;
    Ok(config)
}

/// init_logging installs the global subscriber, `RUST_LOG` overrides the default filter
pub fn init_logging() -> Result<(), CommonError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}=debug,prople_orgagent_core=debug",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .try_init()
        .map_err(|err| CommonError::ConfigError(err.to_string()))
}
