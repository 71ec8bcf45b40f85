use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Base name of the config file probed when no path is given (`entitle.toml`, `entitle.json`, ...).
pub const DEFAULT_CONFIG_PATH: &str = "entitle";

/// Prefix for environment overrides (`ENTITLE__LOG__LEVEL` maps to `log.level`).
pub const ENV_PREFIX: &str = "ENTITLE";

const ENV_SEPARATOR: &str = "__";

/// Custom error type for config loading.
#[entitle_derive::entitle_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from a file layered with environment overrides.
///
/// 1. **Base File**: An explicit `path` must exist. Without one, the optional
///    [`DEFAULT_CONFIG_PATH`] file in the working directory is used if present, otherwise
///    every field falls back to its serde default.
/// 2. **Environment Overrides**: Variables prefixed with `ENTITLE__`. Nested structures use
///    double underscores (e.g., `ENTITLE__LOG__LEVEL` maps to `log.level`).
///
/// # Errors
/// This function will return an error if:
/// * An explicitly specified configuration file cannot be found or parsed.
/// * The merged content does not match the structure of type `T`.
///
/// # Example
/// ```rust
/// use entitle_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_config_with_env(path, None)
}

/// Same as [`load_config`], but reads overrides from `env` instead of the process environment.
///
/// Keys in `env` keep their full form (`ENTITLE__LOG__LEVEL`). Useful for tests and for
/// embedding hosts that manage their own variable sets.
///
/// # Errors
/// See [`load_config`].
pub fn load_config_with_env<T>(
    path: Option<impl AsRef<Path>>,
    env: Option<config::Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (effective_path, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR).source(env));

    info!(required, "Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
