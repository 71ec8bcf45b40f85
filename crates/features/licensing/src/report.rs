//! Snapshot of every named accessor on [`LicenseState`](crate::LicenseState).
//!
//! Keeps the split between literal answers and provider-backed answers visible, so an
//! edition change that flips an entry is easy to audit.

use crate::error::LicenseError;
use entitle_domain::features::FeatureValue;
use serde::Serialize;
use std::fmt;

/// Where an accessor's answer comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessorSource {
    /// A literal compiled into this edition.
    Fixed,
    /// Read from the license provider.
    Provider,
}

/// One accessor's current answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub accessor: &'static str,
    pub source: AccessorSource,
    /// Registry keys the accessor reads or stands in for.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<FeatureValue>,
    /// Fallback used when the provider has no value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<FeatureValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReportEntry {
    pub(crate) const fn fixed(accessor: &'static str, value: FeatureValue) -> Self {
        Self {
            accessor,
            source: AccessorSource::Fixed,
            keys: Vec::new(),
            value: Some(value),
            default: None,
            error: None,
        }
    }

    pub(crate) fn provider(
        accessor: &'static str,
        keys: Vec<&'static str>,
        result: Result<FeatureValue, LicenseError>,
    ) -> Self {
        let (value, error) = match result {
            Ok(value) => (Some(value), None),
            Err(err) => (None, Some(err.to_string())),
        };
        Self { accessor, source: AccessorSource::Provider, keys, value, default: None, error }
    }

    pub(crate) fn with_keys(mut self, keys: Vec<&'static str>) -> Self {
        self.keys = keys;
        self
    }

    pub(crate) fn with_default(mut self, default: FeatureValue) -> Self {
        self.default = Some(default);
        self
    }
}

/// Every accessor's answer at the time [`LicenseState::report`](crate::LicenseState::report)
/// ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseReport {
    pub entries: Vec<ReportEntry>,
}

impl LicenseReport {
    pub(crate) const fn new(entries: Vec<ReportEntry>) -> Self {
        Self { entries }
    }

    /// Looks up an entry by accessor name.
    #[must_use]
    pub fn get(&self, accessor: &str) -> Option<&ReportEntry> {
        self.entries.iter().find(|entry| entry.accessor == accessor)
    }

    /// Entries with the given source.
    pub fn by_source(&self, source: AccessorSource) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(move |entry| entry.source == source)
    }
}

impl fmt::Display for LicenseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.entries.iter().map(|entry| entry.accessor.len()).max().unwrap_or(0);

        for entry in &self.entries {
            let source = match entry.source {
                AccessorSource::Fixed => "fixed",
                AccessorSource::Provider => "provider",
            };
            write!(f, "{:<width$}  {source:<8}  ", entry.accessor)?;
            match (&entry.value, &entry.error) {
                (Some(value), _) => write!(f, "{value}")?,
                (None, Some(_)) => f.write_str("unavailable")?,
                (None, None) => f.write_str("absent")?,
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
