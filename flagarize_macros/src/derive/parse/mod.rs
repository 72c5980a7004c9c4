//! Attribute and field parsing for the `Flagarize` derive macro.
//!
//! Annotations are kept as raw string literals. The runtime crate owns the
//! annotation grammar, so this module only validates the attribute shape and
//! pairs fields with their help-text siblings.

use syn::parse::{Parse, ParseStream};
use syn::{Attribute, Ident, LitStr};

mod input;
mod literals;
#[cfg(test)]
mod tests;
mod type_utils;

pub(crate) use input::parse_input;
use literals::lit_str;
pub(crate) use type_utils::{is_help_text_type, type_label};

/// Suffix naming the sibling field that carries runtime help text.
pub(crate) const HELP_VAR_SUFFIX: &str = "_help";

/// Struct-level `#[flagarize(...)]` options.
#[derive(Default)]
pub(crate) struct StructAttrs {
    /// Overrides the path used to reach the runtime crate.
    pub crate_path: Option<syn::Path>,
}

/// Field-level `#[flagarize(...)]` options.
#[derive(Default)]
pub(crate) struct FieldAttrs {
    /// Raw annotation text, e.g. `"name=listen|help=Address."`.
    pub annotation: Option<LitStr>,
    /// Whether the field is walked as part of its parent.
    pub flatten: bool,
}

impl FieldAttrs {
    /// Whether the field carries no `flagarize` attribute at all.
    pub(crate) const fn is_plain(&self) -> bool {
        self.annotation.is_none() && !self.flatten
    }
}

/// A named field as the generator sees it.
pub(crate) struct FieldSpec {
    /// Declared identifier, possibly raw.
    pub ident: Ident,
    /// Identifier text with any `r#` prefix removed.
    pub name: String,
    /// Declared type.
    pub ty: syn::Type,
    /// Whether the field is declared `pub`.
    pub exported: bool,
    /// Parsed `flagarize` attribute.
    pub attrs: FieldAttrs,
    /// Sibling field providing help text for this one.
    pub help_var: Option<Ident>,
    /// Whether this field only provides help text for a sibling.
    pub is_help_var: bool,
}

/// Everything the generator needs to know about the derive input.
pub(crate) struct Schema {
    /// Struct-level options.
    pub attrs: StructAttrs,
    /// Named fields in declaration order.
    pub fields: Vec<FieldSpec>,
}

/// A single field attribute argument.
enum FieldArg {
    Annotation(LitStr),
    Flatten,
}

impl Parse for FieldArg {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        if input.peek(LitStr) {
            return input.parse().map(Self::Annotation);
        }
        let ident: Ident = input.parse()?;
        if ident == "flatten" {
            Ok(Self::Flatten)
        } else {
            Err(syn::Error::new(
                ident.span(),
                format!("unknown flagarize field attribute `{ident}`"),
            ))
        }
    }
}

fn flagarize_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("flagarize"))
}

/// Parses `#[flagarize(crate = "...")]` on the struct.
///
/// Unknown keys are rejected so typos do not silently change the crate path.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    for attr in flagarize_attrs(attrs) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let s = lit_str(&meta, "crate")?;
                let path: syn::Path =
                    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
                out.crate_path = Some(path);
                Ok(())
            } else {
                Err(meta.error("unknown flagarize struct attribute"))
            }
        })?;
    }
    Ok(out)
}

/// Parses the `flagarize` attribute of a single field.
///
/// A field takes at most one attribute, holding either an annotation string
/// or `flatten`.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for attr in flagarize_attrs(attrs) {
        let arg: FieldArg = attr.parse_args()?;
        if !out.is_plain() {
            let message = match (&arg, out.flatten) {
                (FieldArg::Annotation(_), true) | (FieldArg::Flatten, false) => {
                    "`flatten` cannot be combined with an annotation"
                }
                _ => "duplicate `flagarize` attribute",
            };
            return Err(syn::Error::new_spanned(attr, message));
        }
        match arg {
            FieldArg::Annotation(lit) => out.annotation = Some(lit),
            FieldArg::Flatten => out.flatten = true,
        }
    }
    Ok(out)
}
