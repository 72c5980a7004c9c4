//! Procedural macros for `flagarize`.
//!
//! [`Flagarize`] implements `flagarize::Flagarize` for a struct with named
//! fields. The generated `describe` method passes each field, in declaration
//! order, to the walker together with a static description of the field and
//! its raw annotation. Annotations are parsed at runtime by the `flagarize`
//! crate so that malformed ones surface as ordinary errors.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `flagarize::Flagarize`.
///
/// Field attributes:
///
/// - `#[flagarize("name=...|help=...")]` binds the field to a flag.
/// - `#[flagarize(flatten)]` walks a nested struct as if its fields were
///   declared on the parent.
///
/// Struct attribute:
///
/// - `#[flagarize(crate = "path")]` points generated code at a renamed
///   `flagarize` dependency.
///
/// A `String`, `&str` or `Cow<str>` field named `<field>_help` without an
/// attribute of its own supplies runtime help text for `<field>` and is not
/// bound itself.
#[proc_macro_derive(Flagarize, attributes(flagarize))]
pub fn derive_flagarize(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
