//! # License Providers
//!
//! A [`LicenseProvider`] holds the actual entitlement data and answers raw feature and quota
//! queries by wire name. [`LicenseState`](crate::LicenseState) only ever reads through this
//! trait, so hosts can plug in anything from a signed license file to a remote entitlement
//! service.
//!
//! [`StaticLicenseProvider`] is the in-memory implementation used by the CLI, single-tenant
//! deployments and tests.

use entitle_domain::config::EntitlementsConfig;
use entitle_domain::features::{BooleanFeature, FeatureSet, FeatureValue, QuotaFeature};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::str::FromStr;

/// Source of license data consulted by [`LicenseState`](crate::LicenseState).
///
/// Implementations must answer synchronously and cheaply; they are called on every query
/// without caching.
pub trait LicenseProvider: Debug + Send + Sync {
    /// Returns whether the boolean feature `feature` is granted.
    fn is_licensed(&self, feature: &str) -> bool;

    /// Returns the raw value for `feature`, or `None` when the provider has no value for it.
    fn get_value(&self, feature: &str) -> Option<FeatureValue>;
}

/// An in-memory provider backed by a fixed set of grants and quotas.
///
/// * `is_licensed` is `true` only for registry features present in the grant set.
/// * `get_value` answers configured quotas with [`FeatureValue::Int`], known boolean
///   features with [`FeatureValue::Bool`], and anything else with `None`.
///
/// ```rust
/// use entitle_licensing::provider::{LicenseProvider, StaticLicenseProvider};
/// use entitle_licensing::{BooleanFeature, FeatureValue, QuotaFeature};
///
/// let provider = StaticLicenseProvider::new()
///     .grant(BooleanFeature::Saml)
///     .quota(QuotaFeature::AiCredits, 100);
///
/// assert!(provider.is_licensed("feat:saml"));
/// assert_eq!(provider.get_value("quota:aiCredits"), Some(FeatureValue::Int(100)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticLicenseProvider {
    features: FeatureSet,
    quotas: BTreeMap<QuotaFeature, i64>,
}

impl StaticLicenseProvider {
    /// Creates a provider that grants nothing and reports no quotas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants a boolean feature.
    #[must_use]
    pub fn grant(mut self, feature: BooleanFeature) -> Self {
        self.features.insert(feature.into());
        self
    }

    /// Grants every feature in `features`.
    #[must_use]
    pub fn grant_all(mut self, features: FeatureSet) -> Self {
        self.features.insert(features);
        self
    }

    /// Sets a quota value, replacing any previous one.
    #[must_use]
    pub fn quota(mut self, quota: QuotaFeature, value: i64) -> Self {
        self.quotas.insert(quota, value);
        self
    }

    /// The granted feature set.
    #[must_use]
    pub const fn features(&self) -> FeatureSet {
        self.features
    }

    /// The configured quotas.
    #[must_use]
    pub const fn quotas(&self) -> &BTreeMap<QuotaFeature, i64> {
        &self.quotas
    }
}

impl From<EntitlementsConfig> for StaticLicenseProvider {
    fn from(config: EntitlementsConfig) -> Self {
        Self { features: config.features, quotas: config.quotas }
    }
}

impl From<&EntitlementsConfig> for StaticLicenseProvider {
    fn from(config: &EntitlementsConfig) -> Self {
        Self::from(config.clone())
    }
}

impl LicenseProvider for StaticLicenseProvider {
    fn is_licensed(&self, feature: &str) -> bool {
        BooleanFeature::from_str(feature).is_ok_and(|feature| self.features.grants(feature))
    }

    fn get_value(&self, feature: &str) -> Option<FeatureValue> {
        if let Ok(quota) = QuotaFeature::from_str(feature) {
            return self.quotas.get(&quota).copied().map(FeatureValue::Int);
        }

        BooleanFeature::from_str(feature)
            .ok()
            .map(|feature| FeatureValue::Bool(self.features.grants(feature)))
    }
}
