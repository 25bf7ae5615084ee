//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `DECIDR` prefix and
//! `__` (double underscore) to separate nested values.
//!
//! # Example
//!
//! ```no_run
//! use decidr::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server listening on port {}", config.server.port);
//! ```

mod ai;
mod error;
mod invite;
mod server;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use invite::InviteConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// AI provider configuration (OpenRouter)
    pub ai: AiConfig,

    /// Invite gate configuration
    #[serde(default)]
    pub invite: InviteConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variable Format
    ///
    /// - `DECIDR__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `DECIDR__AI__OPENROUTER_API_KEY=...` -> `ai.openrouter_api_key = ...`
    /// - `DECIDR__INVITE__CODE=...` -> `invite.code = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DECIDR")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.invite.validate()?;
        Ok(())
    }

    /// Check if running in production environment.
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global; serialize the tests that touch them.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("DECIDR__AI__OPENROUTER_API_KEY", "sk-or-test");
    }

    fn clear_env() {
        env::remove_var("DECIDR__AI__OPENROUTER_API_KEY");
        env::remove_var("DECIDR__SERVER__PORT");
        env::remove_var("DECIDR__INVITE__CODE");
    }

    #[test]
    fn load_from_environment_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("config should load");
        assert_eq!(config.server.port, 8080);
        assert!(config.invite.code.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nested_overrides_are_applied() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("DECIDR__SERVER__PORT", "9000");
        env::set_var("DECIDR__INVITE__CODE", "ABC123");
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("config should load");
        assert_eq!(config.server.port, 9000);
        assert!(config.invite.code.is_some());
    }

    #[test]
    fn missing_api_key_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        assert!(AppConfig::load().is_err());
    }
}
