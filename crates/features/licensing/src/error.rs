use std::borrow::Cow;

/// Error types specific to the licensing feature.
#[entitle_derive::entitle_error(result = LicenseResult)]
pub enum LicenseError {
    /// A provider-backed query ran before startup assigned a provider.
    ///
    /// This is an initialization-ordering bug in the host, not a runtime condition to recover from.
    #[error(
        "Cannot query license state because license provider has not been set{}",
        format_context(.context)
    )]
    ProviderNotSet { context: Option<Cow<'static, str>> },

    /// A feature or quota name that is not part of the registry.
    #[error("Unknown license feature{}: {message}", format_context(.context))]
    UnknownFeature { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
