//! # Feature Registry
//!
//! Every license feature is addressed by an opaque wire name such as `feat:saml` or
//! `quota:aiCredits`. This module is the single place those names are spelled out.
//!
//! * [`BooleanFeature`]: `feat:*` capabilities answered with a `bool`.
//! * [`QuotaFeature`]: `quota:*` limits answered with an `i64`, where
//!   [`UNLIMITED_LICENSE_QUOTA`] means "no cap".
//! * [`FeatureKey`]: the static mapping from a key to the type its value decodes into.
//!
//! Parsing is ASCII case-insensitive, because some config sources lowercase map keys.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// Quota value meaning "no cap enforced".
pub const UNLIMITED_LICENSE_QUOTA: i64 = -1;

macro_rules! boolean_features {
    ($( $variant:ident => $flag:ident = $name:literal, )+) => {
        /// A named boolean capability a license edition may or may not grant.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            Display, EnumString, IntoStaticStr, EnumIter, EnumCount,
        )]
        #[strum(ascii_case_insensitive)]
        pub enum BooleanFeature {
            $( #[strum(serialize = $name)] $variant, )+
        }

        bitflags! {
            /// A compact set of granted [`BooleanFeature`]s.
            #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
            pub struct FeatureSet: u64 {
                $( const $flag = 1 << (BooleanFeature::$variant as u64); )+
            }
        }

        impl From<BooleanFeature> for FeatureSet {
            fn from(feature: BooleanFeature) -> Self {
                match feature {
                    $( BooleanFeature::$variant => Self::$flag, )+
                }
            }
        }
    };
}

boolean_features! {
    Sharing => SHARING = "feat:sharing",
    Ldap => LDAP = "feat:ldap",
    Saml => SAML = "feat:saml",
    Oidc => OIDC = "feat:oidc",
    MfaEnforcement => MFA_ENFORCEMENT = "feat:mfaEnforcement",
    LogStreaming => LOG_STREAMING = "feat:logStreaming",
    AdvancedExecutionFilters => ADVANCED_EXECUTION_FILTERS = "feat:advancedExecutionFilters",
    Variables => VARIABLES = "feat:variables",
    SourceControl => SOURCE_CONTROL = "feat:sourceControl",
    ApiDisabled => API_DISABLED = "feat:apiDisabled",
    ExternalSecrets => EXTERNAL_SECRETS = "feat:externalSecrets",
    ShowNonProdBanner => SHOW_NON_PROD_BANNER = "feat:showNonProdBanner",
    WorkflowHistory => WORKFLOW_HISTORY = "feat:workflowHistory",
    DebugInEditor => DEBUG_IN_EDITOR = "feat:debugInEditor",
    BinaryDataS3 => BINARY_DATA_S3 = "feat:binaryDataS3",
    MultipleMainInstances => MULTIPLE_MAIN_INSTANCES = "feat:multipleMainInstances",
    WorkerView => WORKER_VIEW = "feat:workerView",
    AdvancedPermissions => ADVANCED_PERMISSIONS = "feat:advancedPermissions",
    ProjectRoleAdmin => PROJECT_ROLE_ADMIN = "feat:projectRole:admin",
    ProjectRoleEditor => PROJECT_ROLE_EDITOR = "feat:projectRole:editor",
    ProjectRoleViewer => PROJECT_ROLE_VIEWER = "feat:projectRole:viewer",
    AiAssistant => AI_ASSISTANT = "feat:aiAssistant",
    AskAi => ASK_AI = "feat:askAi",
    CommunityNodesCustomRegistry => COMMUNITY_NODES_CUSTOM_REGISTRY = "feat:communityNodes:customRegistry",
    AiCredits => AI_CREDITS = "feat:aiCredits",
    Folders => FOLDERS = "feat:folders",
    InsightsViewSummary => INSIGHTS_VIEW_SUMMARY = "feat:insights:viewSummary",
    InsightsViewDashboard => INSIGHTS_VIEW_DASHBOARD = "feat:insights:viewDashboard",
    InsightsViewHourlyData => INSIGHTS_VIEW_HOURLY_DATA = "feat:insights:viewHourlyData",
    ApiKeyScopes => API_KEY_SCOPES = "feat:apiKeyScopes",
    WorkflowDiffs => WORKFLOW_DIFFS = "feat:workflowDiffs",
    CustomRoles => CUSTOM_ROLES = "feat:customRoles",
}

/// A named numeric limit a license edition may cap or leave unlimited.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    EnumIter,
    EnumCount,
)]
#[strum(ascii_case_insensitive)]
pub enum QuotaFeature {
    #[strum(serialize = "quota:users")]
    Users,
    #[strum(serialize = "quota:activeWorkflows")]
    ActiveWorkflows,
    #[strum(serialize = "quota:maxVariables")]
    MaxVariables,
    #[strum(serialize = "quota:aiCredits")]
    AiCredits,
    #[strum(serialize = "quota:workflowHistoryPrune")]
    WorkflowHistoryPrune,
    #[strum(serialize = "quota:insights:maxHistoryDays")]
    InsightsMaxHistoryDays,
    #[strum(serialize = "quota:insights:retention:maxAgeDays")]
    InsightsRetentionMaxAgeDays,
    #[strum(serialize = "quota:insights:retention:pruneIntervalDays")]
    InsightsRetentionPruneIntervalDays,
    #[strum(serialize = "quota:maxTeamProjects")]
    MaxTeamProjects,
    #[strum(serialize = "quota:evaluations:maxWorkflows")]
    EvaluationsMaxWorkflows,
}

impl BooleanFeature {
    /// The wire name, e.g. `feat:saml`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl QuotaFeature {
    /// The wire name, e.g. `quota:aiCredits`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// A raw value reported by a license provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Bool(bool),
    Int(i64),
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => value.fmt(f),
            Self::Int(value) => value.fmt(f),
        }
    }
}

impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

/// Decodes a [`FeatureValue`] into a concrete Rust type.
///
/// Returns `None` when the value holds a different kind.
pub trait FromFeatureValue: Sized {
    fn from_feature_value(value: FeatureValue) -> Option<Self>;
}

impl FromFeatureValue for bool {
    fn from_feature_value(value: FeatureValue) -> Option<Self> {
        match value {
            FeatureValue::Bool(value) => Some(value),
            FeatureValue::Int(_) => None,
        }
    }
}

impl FromFeatureValue for i64 {
    fn from_feature_value(value: FeatureValue) -> Option<Self> {
        match value {
            FeatureValue::Int(value) => Some(value),
            FeatureValue::Bool(_) => None,
        }
    }
}

/// A registry key together with the type its value is expected to have.
pub trait FeatureKey: Copy + fmt::Debug {
    /// The type a provider value for this key decodes into.
    type Value: FromFeatureValue;

    /// The wire name of the key.
    fn name(self) -> &'static str;
}

impl FeatureKey for BooleanFeature {
    type Value = bool;

    fn name(self) -> &'static str {
        self.as_str()
    }
}

impl FeatureKey for QuotaFeature {
    type Value = i64;

    fn name(self) -> &'static str {
        self.as_str()
    }
}

impl FeatureSet {
    /// Returns `true` if `feature` is part of the set.
    #[must_use]
    pub fn grants(self, feature: BooleanFeature) -> bool {
        self.contains(feature.into())
    }

    /// Iterates over the granted features in registry order.
    pub fn features(self) -> impl Iterator<Item = BooleanFeature> {
        BooleanFeature::iter().filter(move |feature| self.grants(*feature))
    }
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<BooleanFeature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = BooleanFeature>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |set, feature| set | feature.into())
    }
}

impl From<&str> for FeatureSet {
    fn from(s: &str) -> Self {
        match s {
            "all" | "*" => Self::all(),
            name => BooleanFeature::from_str(name).map_or_else(|_| Self::empty(), Self::from),
        }
    }
}

impl Serialize for FeatureSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.features().map(BooleanFeature::as_str))
    }
}

impl<'de> Deserialize<'de> for FeatureSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let names = Vec::<String>::deserialize(deserializer)?;
        names.iter().try_fold(Self::empty(), |set, name| match name.as_str() {
            "all" | "*" => Ok(Self::all()),
            name => BooleanFeature::from_str(name)
                .map(|feature| set | feature.into())
                .map_err(|_| serde::de::Error::custom(format!("Unknown license feature '{name}'"))),
        })
    }
}

macro_rules! wire_name_serde {
    ($ty:ty, $kind:literal) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let name = String::deserialize(deserializer)?;
                Self::from_str(&name).map_err(|_| {
                    serde::de::Error::custom(format!(concat!("Unknown ", $kind, " '{}'"), name))
                })
            }
        }
    };
}

wire_name_serde!(BooleanFeature, "license feature");
wire_name_serde!(QuotaFeature, "license quota");
