use crate::error::ConfigError;
use config::builder::DefaultState;
use config::ConfigBuilder;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{DatabaseSettings, LoggingSettings, ServerSettings, Settings};

/// Prefix for environment overrides, e.g. `APP__SERVER__PORT=9000`.
const ENV_PREFIX: &str = "APP";

/// Loads the application configuration.
///
/// Sources, lowest precedence first: built-in defaults, an optional
/// `config.toml` in the working directory, then `APP__*` environment
/// variables. A `.env` file is read first so it can supply `DATABASE_URL`.
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from("config")
}

/// Same as [`load_config`] but reads the file named `path` (extension optional).
pub fn load_config_from(path: &str) -> Result<Settings, ConfigError> {
    dotenvy::dotenv().ok();

    let builder = with_defaults(config::Config::builder())?
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    finish(builder, std::env::var("DATABASE_URL").ok())
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder
        .set_default("database.max_connections", 10_i64)?
        .set_default("database.acquire_timeout_secs", 5_i64)?
        .set_default("database.run_migrations", true)?
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000_i64)?
        .set_default("server.body_limit_bytes", 1024 * 1024_i64)?
        .set_default("logging.filter", "info,tower_http=debug")?
        .set_default("logging.file_prefix", "records.log")?)
}

fn finish(
    builder: ConfigBuilder<DefaultState>,
    database_url: Option<String>,
) -> Result<Settings, ConfigError> {
    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.build()?.try_deserialize::<Settings>()?;
    settings.with_database_url_fallback(database_url).validate()
}
