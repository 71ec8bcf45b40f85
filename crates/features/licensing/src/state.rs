use crate::error::{LicenseError, LicenseErrorExt};
use crate::provider::LicenseProvider;
use crate::report::{LicenseReport, ReportEntry};
use entitle_domain::features::{
    BooleanFeature, FeatureKey, FeatureValue, FromFeatureValue, QuotaFeature,
    UNLIMITED_LICENSE_QUOTA,
};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, error, trace, warn};

/// Anything [`LicenseState::is_licensed`] can check: one feature, or an ordered sequence
/// of features of which at least one must be licensed.
pub trait FeatureQuery {
    /// Evaluates the query against `provider`.
    ///
    /// Sequences are checked in order and stop at the first licensed feature.
    fn is_licensed_by(&self, provider: &dyn LicenseProvider) -> bool;
}

impl FeatureQuery for BooleanFeature {
    fn is_licensed_by(&self, provider: &dyn LicenseProvider) -> bool {
        provider.is_licensed(self.as_str())
    }
}

impl FeatureQuery for str {
    fn is_licensed_by(&self, provider: &dyn LicenseProvider) -> bool {
        provider.is_licensed(self)
    }
}

impl FeatureQuery for String {
    fn is_licensed_by(&self, provider: &dyn LicenseProvider) -> bool {
        provider.is_licensed(self)
    }
}

impl<T: FeatureQuery> FeatureQuery for [T] {
    fn is_licensed_by(&self, provider: &dyn LicenseProvider) -> bool {
        self.iter().any(|feature| feature.is_licensed_by(provider))
    }
}

impl<T: FeatureQuery, const N: usize> FeatureQuery for [T; N] {
    fn is_licensed_by(&self, provider: &dyn LicenseProvider) -> bool {
        self.as_slice().is_licensed_by(provider)
    }
}

impl<T: FeatureQuery> FeatureQuery for Vec<T> {
    fn is_licensed_by(&self, provider: &dyn LicenseProvider) -> bool {
        self.as_slice().is_licensed_by(provider)
    }
}

impl<T: FeatureQuery + ?Sized> FeatureQuery for &T {
    fn is_licensed_by(&self, provider: &dyn LicenseProvider) -> bool {
        (**self).is_licensed_by(provider)
    }
}

/// The shared gatekeeper for feature-flag and quota queries.
///
/// Construct one per process, hand clones to every consumer, and call
/// [`set_license_provider`](Self::set_license_provider) during startup. Clones share the
/// same provider slot. Provider-backed queries made before a provider is set fail with
/// [`LicenseError::ProviderNotSet`]; fixed accessors never consult the provider.
///
/// ```rust
/// use entitle_licensing::provider::StaticLicenseProvider;
/// use entitle_licensing::{BooleanFeature, LicenseError, LicenseState};
/// use std::sync::Arc;
///
/// let state = LicenseState::new();
/// assert!(matches!(state.is_custom_roles_licensed(), Err(LicenseError::ProviderNotSet { .. })));
///
/// state.set_license_provider(Arc::new(
///     StaticLicenseProvider::new().grant(BooleanFeature::CustomRoles),
/// ));
/// assert!(state.is_custom_roles_licensed().unwrap());
/// assert!(state.is_sharing_licensed());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LicenseState {
    provider: Arc<RwLock<Option<Arc<dyn LicenseProvider>>>>,
}

impl LicenseState {
    /// Creates a state with no provider assigned.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state with `provider` already assigned.
    #[must_use]
    pub fn with_provider(provider: Arc<dyn LicenseProvider>) -> Self {
        let state = Self::new();
        state.set_license_provider(provider);
        state
    }

    /// Assigns the provider, replacing any previous one for this state and all of its clones.
    pub fn set_license_provider(&self, provider: Arc<dyn LicenseProvider>) {
        let previous = self.provider.write().replace(provider);
        if previous.is_some() {
            warn!("License provider replaced");
        } else {
            debug!("License provider set");
        }
    }

    /// Returns `true` once a provider has been assigned.
    #[must_use]
    pub fn has_provider(&self) -> bool {
        self.provider.read().is_some()
    }

    /// Clones the provider handle out of the lock so provider calls run unlocked.
    fn provider(&self) -> Result<Arc<dyn LicenseProvider>, LicenseError> {
        self.provider.read().clone().ok_or_else(|| {
            error!("License state queried before a license provider was set");
            LicenseError::ProviderNotSet { context: None }
        })
    }

    // --------------------
    //     core queries
    // --------------------

    /// Checks a single feature, or whether any feature of a sequence is licensed.
    ///
    /// A single feature is answered by the provider as-is. A sequence is checked in order,
    /// stopping at the first licensed entry; an empty sequence is `false` without any
    /// provider call.
    ///
    /// # Errors
    /// Returns [`LicenseError::ProviderNotSet`] if no provider has been assigned.
    pub fn is_licensed<Q: FeatureQuery>(&self, feature: Q) -> Result<bool, LicenseError> {
        let provider = self.provider()?;
        let licensed = feature.is_licensed_by(provider.as_ref());
        trace!(licensed, "License feature query");
        Ok(licensed)
    }

    /// Returns the typed value of `key`, or `None` when the provider has none.
    ///
    /// The provider's answer is passed through unchanged. A value of the wrong kind for the
    /// key (a boolean for a quota, say) is treated as absent.
    ///
    /// # Errors
    /// Returns [`LicenseError::ProviderNotSet`] if no provider has been assigned.
    pub fn get_value<K: FeatureKey>(&self, key: K) -> Result<Option<K::Value>, LicenseError> {
        let Some(value) = self.get_raw_value(key.name())? else {
            return Ok(None);
        };

        let decoded = K::Value::from_feature_value(value);
        if decoded.is_none() {
            warn!(feature = key.name(), %value, "License provider returned a value of unexpected kind");
        }
        Ok(decoded)
    }

    /// Returns the provider's raw value for an arbitrary feature name.
    ///
    /// # Errors
    /// Returns [`LicenseError::ProviderNotSet`] if no provider has been assigned.
    pub fn get_raw_value(&self, feature: &str) -> Result<Option<FeatureValue>, LicenseError> {
        let value = self.provider()?.get_value(feature);
        trace!(feature, ?value, "License value query");
        Ok(value)
    }

    // --------------------
    //      booleans
    // --------------------

    /// # Errors
    /// Returns [`LicenseError::ProviderNotSet`] if no provider has been assigned.
    pub fn is_custom_roles_licensed(&self) -> Result<bool, LicenseError> {
        self.is_licensed(BooleanFeature::CustomRoles).context("custom roles")
    }

    /// # Errors
    /// Returns [`LicenseError::ProviderNotSet`] if no provider has been assigned.
    pub fn is_mfa_enforcement_licensed(&self) -> Result<bool, LicenseError> {
        self.is_licensed(BooleanFeature::MfaEnforcement).context("MFA enforcement")
    }

    /// # Errors
    /// Returns [`LicenseError::ProviderNotSet`] if no provider has been assigned.
    pub fn is_workflow_diffs_licensed(&self) -> Result<bool, LicenseError> {
        self.is_licensed(BooleanFeature::WorkflowDiffs).context("workflow diffs")
    }

    /// User provisioning is available when any SSO or directory integration is licensed.
    ///
    /// # Errors
    /// Returns [`LicenseError::ProviderNotSet`] if no provider has been assigned.
    pub fn is_provisioning_licensed(&self) -> Result<bool, LicenseError> {
        self.is_licensed(PROVISIONING_FEATURES).context("provisioning")
    }

    // --------------------
    //      integers
    // --------------------

    /// # Errors
    /// Returns [`LicenseError::ProviderNotSet`] if no provider has been assigned.
    pub fn get_max_ai_credits(&self) -> Result<i64, LicenseError> {
        self.quota_or(QuotaFeature::AiCredits, 0)
    }

    /// # Errors
    /// Returns [`LicenseError::ProviderNotSet`] if no provider has been assigned.
    pub fn get_insights_max_history(&self) -> Result<i64, LicenseError> {
        self.quota_or(QuotaFeature::InsightsMaxHistoryDays, 7)
    }

    /// # Errors
    /// Returns [`LicenseError::ProviderNotSet`] if no provider has been assigned.
    pub fn get_insights_retention_max_age(&self) -> Result<i64, LicenseError> {
        self.quota_or(QuotaFeature::InsightsRetentionMaxAgeDays, 180)
    }

    /// # Errors
    /// Returns [`LicenseError::ProviderNotSet`] if no provider has been assigned.
    pub fn get_insights_retention_prune_interval(&self) -> Result<i64, LicenseError> {
        self.quota_or(QuotaFeature::InsightsRetentionPruneIntervalDays, 24)
    }

    /// # Errors
    /// Returns [`LicenseError::ProviderNotSet`] if no provider has been assigned.
    pub fn get_max_workflows_with_evaluations(&self) -> Result<i64, LicenseError> {
        self.quota_or(QuotaFeature::EvaluationsMaxWorkflows, 0)
    }

    fn quota_or(&self, quota: QuotaFeature, default: i64) -> Result<i64, LicenseError> {
        Ok(self.get_value(quota).context(quota.as_str())?.unwrap_or(default))
    }

    // --------------------
    //       report
    // --------------------

    /// Evaluates every named accessor and reports whether each one is fixed or provider-backed.
    ///
    /// Never fails: provider-backed entries carry the error instead of a value when no
    /// provider is set.
    #[must_use]
    pub fn report(&self) -> LicenseReport {
        let fixed_flags = FIXED_FLAGS
            .iter()
            .map(|&(accessor, value)| ReportEntry::fixed(accessor, FeatureValue::Bool(value)));
        let fixed_quotas = UNLIMITED_QUOTAS.iter().map(|&(accessor, quota)| {
            ReportEntry::fixed(accessor, FeatureValue::Int(UNLIMITED_LICENSE_QUOTA))
                .with_keys(vec![quota.as_str()])
        });
        let provider_flags = PROVIDER_FLAGS.iter().map(|&(accessor, features, query)| {
            ReportEntry::provider(
                accessor,
                features.iter().map(|feature| feature.as_str()).collect(),
                query(self).map(FeatureValue::Bool),
            )
        });
        let provider_quotas = DEFAULTED_QUOTAS.iter().map(|&(accessor, quota, default)| {
            ReportEntry::provider(
                accessor,
                vec![quota.as_str()],
                self.quota_or(quota, default).map(FeatureValue::Int),
            )
            .with_default(FeatureValue::Int(default))
        });

        LicenseReport::new(
            fixed_flags.chain(provider_flags).chain(fixed_quotas).chain(provider_quotas).collect(),
        )
    }
}

const PROVISIONING_FEATURES: [BooleanFeature; 3] =
    [BooleanFeature::Saml, BooleanFeature::Oidc, BooleanFeature::Ldap];

type FlagQuery = fn(&LicenseState) -> Result<bool, LicenseError>;

const PROVIDER_FLAGS: &[(&str, &[BooleanFeature], FlagQuery)] = &[
    (
        "is_custom_roles_licensed",
        &[BooleanFeature::CustomRoles],
        LicenseState::is_custom_roles_licensed,
    ),
    (
        "is_mfa_enforcement_licensed",
        &[BooleanFeature::MfaEnforcement],
        LicenseState::is_mfa_enforcement_licensed,
    ),
    (
        "is_workflow_diffs_licensed",
        &[BooleanFeature::WorkflowDiffs],
        LicenseState::is_workflow_diffs_licensed,
    ),
    ("is_provisioning_licensed", &PROVISIONING_FEATURES, LicenseState::is_provisioning_licensed),
];

const DEFAULTED_QUOTAS: &[(&str, QuotaFeature, i64)] = &[
    ("get_max_ai_credits", QuotaFeature::AiCredits, 0),
    ("get_insights_max_history", QuotaFeature::InsightsMaxHistoryDays, 7),
    ("get_insights_retention_max_age", QuotaFeature::InsightsRetentionMaxAgeDays, 180),
    ("get_insights_retention_prune_interval", QuotaFeature::InsightsRetentionPruneIntervalDays, 24),
    ("get_max_workflows_with_evaluations", QuotaFeature::EvaluationsMaxWorkflows, 0),
];

/// Declares accessors that answer a literal without consulting the provider, plus the
/// table [`LicenseState::report`] reads them from.
macro_rules! fixed_flags {
    ($( $(#[$meta:meta])* $accessor:ident => $value:literal, )+) => {
        #[allow(clippy::unused_self)]
        impl LicenseState {
            $(
                $(#[$meta])*
                #[must_use]
                pub const fn $accessor(&self) -> bool {
                    $value
                }
            )+
        }

        const FIXED_FLAGS: &[(&str, bool)] = &[ $( (stringify!($accessor), $value), )+ ];
    };
}

macro_rules! unlimited_quotas {
    ($( $accessor:ident => $quota:ident, )+) => {
        #[allow(clippy::unused_self)]
        impl LicenseState {
            $(
                #[doc = concat!("Always [`UNLIMITED_LICENSE_QUOTA`] (`", stringify!($quota), "` is not capped).")]
                #[must_use]
                pub const fn $accessor(&self) -> i64 {
                    UNLIMITED_LICENSE_QUOTA
                }
            )+
        }

        const UNLIMITED_QUOTAS: &[(&str, QuotaFeature)] =
            &[ $( (stringify!($accessor), QuotaFeature::$quota), )+ ];
    };
}

fixed_flags! {
    is_sharing_licensed => true,
    is_log_streaming_licensed => true,
    is_ldap_licensed => true,
    is_saml_licensed => true,
    is_oidc_licensed => true,
    is_api_key_scopes_licensed => true,
    is_ai_assistant_licensed => false,
    is_ask_ai_licensed => false,
    is_ai_credits_licensed => false,
    is_advanced_execution_filters_licensed => true,
    is_advanced_permissions_licensed => true,
    is_debug_in_editor_licensed => true,
    is_binary_data_s3_licensed => true,
    /// Multiple main instances.
    is_multi_main_licensed => true,
    is_variables_licensed => true,
    is_source_control_licensed => true,
    is_external_secrets_licensed => true,
    is_workflow_history_licensed => true,
    /// The public API is never switched off in this edition.
    is_api_disabled => false,
    is_worker_view_licensed => true,
    is_project_role_admin_licensed => true,
    is_project_role_editor_licensed => true,
    is_project_role_viewer_licensed => true,
    /// Custom community-node npm registry.
    is_custom_npm_registry_licensed => true,
    is_folders_licensed => true,
    is_insights_summary_licensed => true,
    is_insights_dashboard_licensed => true,
    is_insights_hourly_data_licensed => true,
}

unlimited_quotas! {
    get_max_users => Users,
    get_max_active_workflows => ActiveWorkflows,
    get_max_variables => MaxVariables,
    get_workflow_history_prune_quota => WorkflowHistoryPrune,
    get_max_team_projects => MaxTeamProjects,
}
