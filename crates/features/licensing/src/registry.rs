//! Strict lookups from wire names to registry keys.
//!
//! [`LicenseState`](crate::LicenseState) accepts any name and lets the provider decide;
//! these helpers are for surfaces (CLI, config tooling) that should reject typos instead.

use crate::error::LicenseError;
use entitle_domain::features::{BooleanFeature, QuotaFeature};
use std::str::FromStr;

/// Resolves a `feat:*` wire name.
///
/// # Errors
/// Returns [`LicenseError::UnknownFeature`] if the name is not in the registry.
pub fn boolean_feature(name: &str) -> Result<BooleanFeature, LicenseError> {
    BooleanFeature::from_str(name).map_err(|_| unknown(name, "boolean feature lookup"))
}

/// Resolves a `quota:*` wire name.
///
/// # Errors
/// Returns [`LicenseError::UnknownFeature`] if the name is not in the registry.
pub fn quota_feature(name: &str) -> Result<QuotaFeature, LicenseError> {
    QuotaFeature::from_str(name).map_err(|_| unknown(name, "quota lookup"))
}

fn unknown(name: &str, context: &'static str) -> LicenseError {
    LicenseError::UnknownFeature { message: format!("'{name}'").into(), context: Some(context.into()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_names() {
        assert_eq!(boolean_feature("feat:saml").unwrap(), BooleanFeature::Saml);
        assert_eq!(quota_feature("quota:users").unwrap(), QuotaFeature::Users);
    }

    #[test]
    fn rejects_names_from_the_other_registry() {
        let err = boolean_feature("quota:users").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown license feature (boolean feature lookup): 'quota:users'"
        );
        assert!(matches!(quota_feature("feat:saml"), Err(LicenseError::UnknownFeature { .. })));
    }
}
