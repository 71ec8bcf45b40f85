use crate::features::{FeatureSet, QuotaFeature};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level application configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    pub log: LogConfig,
    pub entitlements: EntitlementsConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Logging output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default level directive (`error`, `warn`, `info`, `debug`, `trace`).
    pub level: String,
    pub console: bool,
    /// Directory for rolling log files. File logging is off when unset.
    pub path: Option<PathBuf>,
    pub json: bool,
}

/// Entitlements served by the in-memory license provider.
///
/// ```toml
/// [entitlements]
/// features = ["feat:customRoles", "feat:saml"]
///
/// [entitlements.quotas]
/// "quota:aiCredits" = 500
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EntitlementsConfig {
    pub features: FeatureSet,
    pub quotas: BTreeMap<QuotaFeature, i64>,
}

// --- Default ---

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), console: true, path: None, json: false }
    }
}
