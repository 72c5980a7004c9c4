//! Crate path resolution for dependency aliasing support.
//!
//! Turns the optional `#[flagarize(crate = "...")]` attribute value into the
//! tokens that prefix every runtime path in generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the crate path from the parsed struct attribute.
///
/// Defaults to `flagarize` when no override is present.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { flagarize }, |path| quote! { #path })
}
