//! Expansion of `#[derive(Flagarize)]`.

use proc_macro2::TokenStream;
use syn::DeriveInput;

mod crate_path;
mod generate;
mod parse;

/// Expands the derive for `input`.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let schema = parse::parse_input(input)?;
    let krate = crate_path::resolve(schema.attrs.crate_path.as_ref());
    Ok(generate::describe_impl(input, &schema, &krate))
}
