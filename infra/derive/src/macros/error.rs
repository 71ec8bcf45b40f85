use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Data, DeriveInput, Fields, Ident, LitBool, Type, Variant};

/// Arguments accepted by `#[entitle_error(...)]`.
pub struct ErrorOptions {
    result_alias: Option<Ident>,
}

impl Default for ErrorOptions {
    fn default() -> Self {
        Self { result_alias: Some(format_ident!("Result")) }
    }
}

impl ErrorOptions {
    pub fn parse(&mut self, meta: ParseNestedMeta<'_>) -> syn::Result<()> {
        if !meta.path.is_ident("result") {
            return Err(meta.error("unsupported entitle_error argument, expected `result`"));
        }

        let value = meta.value()?;
        if value.peek(LitBool) {
            let enabled: LitBool = value.parse()?;
            if !enabled.value {
                self.result_alias = None;
            }
        } else {
            self.result_alias = Some(value.parse()?);
        }
        Ok(())
    }
}

struct VariantMeta<'a> {
    ident: &'a Ident,
    source_ty: Option<&'a Type>,
    source_field: Option<&'a Ident>,
    has_context: bool,
    cfg_attrs: Vec<Attribute>,
}

pub fn expand_derive(input: DeriveInput, options: ErrorOptions) -> TokenStream {
    let name = &input.ident;
    let vis = &input.vis;
    let trait_name = format_ident!("{}Ext", name);

    let Data::Enum(data) = &input.data else {
        return quote! { compile_error!("entitle_error can only be applied to enums"); };
    };

    let variants: Vec<VariantMeta<'_>> = match data.variants.iter().map(parse_variant).collect() {
        Ok(v) => v,
        Err(err) => return err,
    };
    if let Some(err) = variants_error(&variants) {
        return err;
    }

    let derived_traits = derived_trait_names(&input);
    let mut derive_tokens = Vec::new();
    if !derived_traits.contains("Debug") {
        derive_tokens.push(quote! { Debug });
    }
    if !derived_traits.contains("Error") {
        derive_tokens.push(quote! { ::thiserror::Error });
    }
    let extra_derives = if derive_tokens.is_empty() {
        quote! {}
    } else {
        quote! { #[derive(#(#derive_tokens),*)] }
    };

    let result_alias = options.result_alias.map(|alias| {
        quote! {
            #[doc = concat!("A [`Result`](::std::result::Result) defaulting to [`", stringify!(#name), "`].")]
            #vis type #alias<T, E = #name> = ::std::result::Result<T, E>;
        }
    });
    let context_impl = generate_context_trait(name, &trait_name, &variants);
    let from_impls = variants.iter().filter_map(|v| generate_from_impl(name, &trait_name, v));
    let internal_impls = generate_internal_impls(name, &variants);

    quote! {
        #[allow(non_shorthand_field_patterns)]
        #extra_derives
        #input

        #result_alias
        #context_impl
        #(#from_impls)*
        #internal_impls

        #[allow(dead_code)]
        fn format_context(context: &Option<std::borrow::Cow<'static, str>>) -> std::borrow::Cow<'static, str> {
            context.as_ref().map_or(std::borrow::Cow::Borrowed(""), |c| std::borrow::Cow::Owned(format!(" ({c})")))
        }
    }
}

fn parse_variant(v: &Variant) -> Result<VariantMeta<'_>, TokenStream> {
    let cfg_attrs = v.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).cloned().collect();

    let fields = match &v.fields {
        Fields::Named(fields) => fields,
        Fields::Unit => {
            return Ok(VariantMeta {
                ident: &v.ident,
                source_ty: None,
                source_field: None,
                has_context: false,
                cfg_attrs,
            });
        },
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(
                v,
                "entitle_error requires named fields (or a unit variant) for source/context handling",
            )
            .to_compile_error());
        },
    };

    let context_field = find_context_field(fields)?;
    let source_field = find_source_field(fields);

    Ok(VariantMeta {
        ident: &v.ident,
        source_ty: source_field.map(|field| &field.ty),
        source_field: source_field.and_then(|field| field.ident.as_ref()),
        has_context: context_field.is_some(),
        cfg_attrs,
    })
}

fn find_context_field(fields: &syn::FieldsNamed) -> Result<Option<&syn::Field>, TokenStream> {
    let Some(field) =
        fields.named.iter().find(|field| field.ident.as_ref().is_some_and(|i| i == "context"))
    else {
        return Ok(None);
    };

    if !is_context_type(&field.ty) {
        return Err(syn::Error::new_spanned(
            &field.ty,
            "context field must be Option<Cow<'static, str>>",
        )
        .to_compile_error());
    }
    Ok(Some(field))
}

fn find_source_field(fields: &syn::FieldsNamed) -> Option<&syn::Field> {
    fields.named.iter().find(|field| {
        let is_source_name = field.ident.as_ref().is_some_and(|ident| ident == "source");
        is_source_name || field_has_attr(field, "source") || field_has_attr(field, "from")
    })
}

fn generate_context_trait(
    name: &Ident,
    trait_name: &Ident,
    variants: &[VariantMeta<'_>],
) -> TokenStream {
    let context_variants: Vec<TokenStream> = variants
        .iter()
        .filter(|v| v.has_context)
        .map(|v| {
            let cfg_attrs = &v.cfg_attrs;
            let ident = v.ident;
            quote! { #(#cfg_attrs)* #name::#ident { context: c, .. } => *c = Some(context.into()), }
        })
        .collect();

    let body = if context_variants.is_empty() {
        quote! {
            let _ = context;
            self
        }
    } else {
        quote! {
            self.map_err(|mut e| {
                match &mut e {
                    #( #context_variants )*
                    _ => {}
                }
                e
            })
        }
    };

    quote! {
        /// Attaches human-readable context to errors convertible into this crate's error type.
        pub trait #trait_name<T> {
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> ::std::result::Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #trait_name<T> for ::std::result::Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                #body
            }
        }
    }
}

fn generate_from_impl(
    name: &Ident,
    trait_name: &Ident,
    v: &VariantMeta<'_>,
) -> Option<TokenStream> {
    if v.ident == "Internal" {
        return None;
    }
    let source_ty = v.source_ty?;
    let source_field = v.source_field?;
    let v_ident = v.ident;
    let cfg_attrs = &v.cfg_attrs;

    Some(quote! {
        #(#cfg_attrs)*
        #[automatically_derived]
        impl From<#source_ty> for #name {
            #[inline]
            fn from(#source_field: #source_ty) -> Self { Self::#v_ident { #source_field, context: None } }
        }

        #(#cfg_attrs)*
        impl<T> #trait_name<T> for ::std::result::Result<T, #source_ty> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> ::std::result::Result<T, #name> {
                self.map_err(|#source_field| #name::#v_ident { #source_field, context: Some(context.into()) })
            }
        }
    })
}

fn generate_internal_impls(name: &Ident, variants: &[VariantMeta<'_>]) -> TokenStream {
    let Some(internal) = variants.iter().find(|v| v.ident == "Internal" && v.has_context) else {
        return quote!();
    };
    let cfg_attrs = &internal.cfg_attrs;

    quote! {
        #(#cfg_attrs)*
        impl From<&'static str> for #name {
            #[inline]
            fn from(s: &'static str) -> Self { Self::Internal { message: std::borrow::Cow::Borrowed(s), context: None } }
        }
        #(#cfg_attrs)*
        impl From<String> for #name {
            #[inline]
            fn from(s: String) -> Self { Self::Internal { message: std::borrow::Cow::Owned(s), context: None } }
        }
    }
}

fn field_has_attr(field: &syn::Field, name: &str) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident(name))
}

fn derived_trait_names(input: &DeriveInput) -> FxHashSet<String> {
    let mut traits = FxHashSet::default();

    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(segment) = meta.path.segments.last() {
                traits.insert(segment.ident.to_string());
            }
            Ok(())
        });
    }

    traits
}

fn variants_error(variants: &[VariantMeta<'_>]) -> Option<TokenStream> {
    variants.iter().find(|v| v.source_ty.is_some() && !v.has_context).map(|v| {
        syn::Error::new_spanned(
            v.ident,
            "entitle_error requires `context: Option<Cow<'static, str>>` for variants with a source",
        )
        .to_compile_error()
    })
}

/// Matches `Option<Cow<'static, str>>` by the last path segment of each type.
fn is_context_type(ty: &Type) -> bool {
    let Some(option) = last_segment(ty).filter(|seg| seg.ident == "Option") else {
        return false;
    };
    let Some(cow_ty) = generic_types(option).next() else {
        return false;
    };
    let Some(cow) = last_segment(cow_ty).filter(|seg| seg.ident == "Cow") else {
        return false;
    };
    let syn::PathArguments::AngleBracketed(args) = &cow.arguments else {
        return false;
    };

    let mut args = args.args.iter();
    let is_static =
        matches!(args.next(), Some(syn::GenericArgument::Lifetime(lt)) if lt.ident == "static");
    let is_str = matches!(
        args.next(),
        Some(syn::GenericArgument::Type(inner)) if last_segment(inner).is_some_and(|s| s.ident == "str")
    );
    is_static && is_str
}

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    let Type::Path(path) = ty else {
        return None;
    };
    path.path.segments.last()
}

fn generic_types(segment: &syn::PathSegment) -> impl Iterator<Item = &Type> {
    let args = match &segment.arguments {
        syn::PathArguments::AngleBracketed(args) => Some(&args.args),
        _ => None,
    };
    args.into_iter().flatten().filter_map(|arg| match arg {
        syn::GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand(input: DeriveInput) -> String {
        expand_derive(input, ErrorOptions::default()).to_string()
    }

    #[test]
    fn rejects_tuple_variants() {
        let out = expand(parse_quote! {
            pub enum DemoError {
                #[error("IO error: {0}")]
                Io(std::io::Error),
            }
        });
        assert!(out.contains("compile_error"));
        assert!(out.contains("requires named fields"));
    }

    #[test]
    fn rejects_source_without_context() {
        let out = expand(parse_quote! {
            pub enum DemoError {
                #[error("IO error: {source}")]
                Io { #[source] source: std::io::Error },
            }
        });
        assert!(out.contains("compile_error"));
        assert!(out.contains("for variants with a source"));
    }

    #[test]
    fn rejects_mistyped_context() {
        let out = expand(parse_quote! {
            pub enum DemoError {
                #[error("bad")]
                Bad { context: Option<String> },
            }
        });
        assert!(out.contains("context field must be"));
    }

    #[test]
    fn rejects_structs() {
        let out = expand(parse_quote! {
            pub struct NotAnEnum { context: Option<Cow<'static, str>> }
        });
        assert!(out.contains("can only be applied to enums"));
    }

    #[test]
    fn accepts_qualified_cow_context() {
        let ty: Type = parse_quote!(Option<std::borrow::Cow<'static, str>>);
        assert!(is_context_type(&ty));
        let ty: Type = parse_quote!(Option<Cow<'a, str>>);
        assert!(!is_context_type(&ty));
    }

    #[test]
    fn emits_result_alias_unless_disabled() {
        let input: DeriveInput = parse_quote! {
            pub enum DemoError {
                #[error("closed")]
                Closed,
            }
        };
        let with_alias = expand(input.clone());
        assert!(with_alias.contains("type Result"));

        let without = expand_derive(input, ErrorOptions { result_alias: None }).to_string();
        assert!(!without.contains("type Result"));
        assert!(without.contains("DemoErrorExt"));
    }

    #[test]
    fn skips_existing_derives() {
        let out = expand(parse_quote! {
            #[derive(Debug, thiserror::Error)]
            pub enum DemoError {
                #[error("closed")]
                Closed,
            }
        });
        assert!(!out.contains(":: thiserror :: Error"));
    }
}
