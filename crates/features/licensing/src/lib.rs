//! # License State
//!
//! One process-wide surface for "is feature X enabled / what is its quota" checks, backed by
//! a pluggable [`LicenseProvider`] assigned once at startup.
//!
//! ## Architecture
//!
//! 1.  **State ([`LicenseState`]):** Cheaply clonable handle injected into every consumer.
//!     Guards against queries before a provider is set and exposes the named accessors.
//! 2.  **Providers ([`provider`]):** The [`LicenseProvider`] trait plus the in-memory
//!     [`StaticLicenseProvider`](provider::StaticLicenseProvider).
//! 3.  **Report ([`report`]):** An auditable table of which accessors are literals and which
//!     are provider-backed.
//!
//! ## Accessor kinds
//!
//! * **Fixed**: return a literal for this edition and never touch the provider
//!   (e.g. [`LicenseState::is_sharing_licensed`], [`LicenseState::get_max_users`]).
//! * **Provider-backed**: delegate to [`LicenseState::is_licensed`] or
//!   [`LicenseState::get_value`] and fail with [`LicenseError::ProviderNotSet`] before startup
//!   wiring is complete. Quota accessors substitute a documented default for absent values.

mod error;
pub mod provider;
pub mod registry;
pub mod report;
mod state;

pub use crate::error::{LicenseError, LicenseErrorExt, LicenseResult};
pub use crate::provider::LicenseProvider;
pub use crate::state::{FeatureQuery, LicenseState};
pub use entitle_domain::features::{
    BooleanFeature, FeatureKey, FeatureSet, FeatureValue, QuotaFeature, UNLIMITED_LICENSE_QUOTA,
};
