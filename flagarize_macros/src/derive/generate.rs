//! Code generation for the `Flagarize` derive macro.
//!
//! Each field becomes one statement in `describe`. Bound fields are routed
//! through the runtime crate's probe stack, which picks the walker method
//! from the field type at compile time.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::DeriveInput;

use super::parse::{FieldSpec, Schema, type_label};

/// Number of references stacked in front of a probe. Matches the number of
/// probe traits minus one.
const PROBE_DEPTH: usize = 5;

/// Builds `impl Flagarize for <input>`.
pub(crate) fn describe_impl(input: &DeriveInput, schema: &Schema, krate: &TokenStream) -> TokenStream {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let statements: Vec<TokenStream> = schema
        .fields
        .iter()
        .enumerate()
        .filter(|(_, field)| !field.is_help_var)
        .map(|(index, field)| field_statement(field, index, krate))
        .collect();
    let walker = if statements.is_empty() {
        format_ident!("_walker")
    } else {
        format_ident!("walker")
    };

    quote! {
        impl #impl_generics #krate::Flagarize for #ident #ty_generics #where_clause {
            fn describe<'__flagarize>(
                &'__flagarize mut self,
                #walker: &mut #krate::Walker<'__flagarize, '_>,
            ) -> #krate::FlagarizeResult<()> {
                #[allow(unused_imports)]
                use #krate::__private::{
                    ExtensionProbe as _, LeafProbe as _, OptionalExtensionProbe as _,
                    SchemaProbe as _, SetterProbe as _, SharedExtensionProbe as _,
                };
                #(#statements)*
                ::core::result::Result::Ok(())
            }
        }
    }
}

/// Static description of a field, evaluated at compile time.
fn field_meta(field: &FieldSpec, index: usize, krate: &TokenStream) -> TokenStream {
    let name = &field.name;
    let label = type_label(&field.ty);
    let mut meta = quote! { #krate::FieldMeta::new(#name, #label, #index) };
    if let Some(annotation) = &field.attrs.annotation {
        meta = quote! { #meta.with_annotation(#annotation) };
    }
    if field.exported {
        meta = quote! { #meta.exported() };
    }
    if field.attrs.flatten {
        meta = quote! { #meta.embedded() };
    }
    meta
}

fn probe(field: &FieldSpec, krate: &TokenStream) -> TokenStream {
    let ty = &field.ty;
    let refs = (0..=PROBE_DEPTH).map(|_| quote! { & });
    quote! { (#(#refs)* #krate::__private::Probe::<#ty>::new()).flagarize_kind() }
}

fn field_statement(field: &FieldSpec, index: usize, krate: &TokenStream) -> TokenStream {
    let ident = &field.ident;
    let meta = field_meta(field, index, krate);
    let binding = if field.attrs.flatten {
        let kind = probe(field, krate);
        quote! { #kind.flatten(walker, &FIELD, &mut self.#ident)?; }
    } else if !field.exported {
        quote! { walker.visit_private(&FIELD)?; }
    } else {
        let kind = probe(field, krate);
        let help = field.help_var.as_ref().map_or_else(
            || quote! { ::core::option::Option::None },
            |help| {
                quote! {
                    ::core::option::Option::Some(::core::convert::AsRef::<str>::as_ref(&self.#help))
                }
            },
        );
        quote! { #kind.visit(walker, &FIELD, #help, &mut self.#ident)?; }
    };
    quote! {
        {
            const FIELD: #krate::FieldMeta = #meta;
            #binding
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, anyhow, ensure};
    use quote::quote;
    use rstest::rstest;
    use syn::{DeriveInput, parse_quote};

    use super::*;
    use crate::derive::parse::parse_input;

    fn expand(input: &DeriveInput) -> Result<String> {
        let schema = parse_input(input).map_err(|err| anyhow!("parse failed: {err}"))?;
        Ok(describe_impl(input, &schema, &quote! { flagarize }).to_string())
    }

    #[rstest]
    fn routes_private_fields_to_the_walker() -> Result<()> {
        let input: DeriveInput = parse_quote! {
            struct Config {
                #[flagarize("help=secret")]
                token: String,
            }
        };
        let out = expand(&input)?;
        ensure!(out.contains("walker . visit_private (& FIELD)"), "{out}");
        ensure!(!out.contains("flagarize_kind"), "private field probed: {out}");
        Ok(())
    }

    #[rstest]
    fn passes_help_var_and_skips_it() -> Result<()> {
        let input: DeriveInput = parse_quote! {
            struct Config {
                #[flagarize("help=placeholder")]
                pub dial: String,
                pub dial_help: String,
            }
        };
        let out = expand(&input)?;
        ensure!(out.contains("as_ref (& self . dial_help)"), "{out}");
        ensure!(!out.contains("\"dial_help\""), "help var described: {out}");
        Ok(())
    }

    #[rstest]
    fn embeds_field_meta() -> Result<()> {
        let input: DeriveInput = parse_quote! {
            struct Config {
                #[flagarize(flatten)]
                pub nested: Nested,
            }
        };
        let out = expand(&input)?;
        ensure!(
            out.contains(
                "FieldMeta :: new (\"nested\" , \"Nested\" , 0usize) . exported () . embedded ()"
            ),
            "{out}"
        );
        ensure!(out.contains(". flatten (walker , & FIELD , & mut self . nested)"), "{out}");
        Ok(())
    }

    #[rstest]
    fn indexes_count_every_declared_field() -> Result<()> {
        let input: DeriveInput = parse_quote! {
            struct Config {
                #[flagarize("help=placeholder")]
                pub dial: String,
                pub dial_help: String,
                #[flagarize("help=Port.")]
                pub port: u16,
            }
        };
        let out = expand(&input)?;
        ensure!(out.contains("new (\"dial\" , \"String\" , 0usize)"), "{out}");
        ensure!(out.contains("new (\"port\" , \"u16\" , 2usize)"), "{out}");
        Ok(())
    }

    #[rstest]
    fn empty_structs_ignore_the_walker() -> Result<()> {
        let input: DeriveInput = parse_quote! {
            struct Empty {}
        };
        let out = expand(&input)?;
        ensure!(out.contains("_walker : & mut flagarize :: Walker"), "{out}");
        Ok(())
    }
}
