//! Literal parsing helpers for derive attributes.

use syn::{Lit, LitStr};

/// Parses the string literal assigned to `key` in a nested attribute.
///
/// # Examples
///
/// ```rust,ignore
/// let attr: syn::Attribute = syn::parse_quote!(#[flagarize(crate = "flags")]);
/// attr.parse_nested_meta(|meta| {
///     assert_eq!(lit_str(&meta, "crate")?.value(), "flags");
///     Ok(())
/// })?;
/// ```
pub(crate) fn lit_str(meta: &syn::meta::ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    match meta.value()?.parse::<Lit>()? {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(
            other.span(),
            format!("{key} must be a string"),
        )),
    }
}
