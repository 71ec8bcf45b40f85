#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the workspace crates.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! entitle-derive.workspace = true
//! thiserror.workspace = true
//! ```
//!
//! The generated code refers to `::thiserror`, so every consumer must depend on it directly.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining crate-level error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` when missing.
/// * **Type Aliasing**: Emits a `Result<T, E = ErrorName>` alias next to the enum. Pass
///   `#[entitle_error(result = LicenseResult)]` to pick another alias name, or
///   `#[entitle_error(result = false)]` to skip it.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a source field.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal`
///   variant exists.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants are either unit variants or use named fields. Tuple variants are rejected.
/// 3. Variants that carry context use `context: Option<Cow<'static, str>>`.
/// 4. Variants wrapping an upstream error must also carry a context field.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[entitle_derive::entitle_error]
/// pub enum StoreError {
///     #[error("Store is closed")]
///     Closed,
///
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &str) -> Result<String> {
///     std::fs::read_to_string(path).context("Reading store file")
/// }
/// ```
#[proc_macro_attribute]
pub fn entitle_error(args: TokenStream, item: TokenStream) -> TokenStream {
    let mut options = macros::error::ErrorOptions::default();
    let parser = syn::meta::parser(|meta| options.parse(meta));
    parse_macro_input!(args with parser);

    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input, options).into()
}
