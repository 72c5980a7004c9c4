//! Type introspection helpers.
//!
//! The checks are shallow and look only at the last path segment, so
//! `std::borrow::Cow<'_, str>` and `Cow<str>` are treated alike.

use quote::ToTokens;
use syn::{GenericArgument, PathArguments, Type};

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    let Type::Path(p) = ty else {
        return None;
    };
    if p.qself.is_some() {
        return None;
    }
    p.path.segments.last()
}

fn is_str(ty: &Type) -> bool {
    last_segment(ty).is_some_and(|seg| seg.ident == "str" && seg.arguments.is_none())
}

/// Whether `ty` can carry help text: `String`, `&str` or `Cow<str>`.
pub(crate) fn is_help_text_type(ty: &Type) -> bool {
    match ty {
        Type::Reference(reference) => {
            reference.mutability.is_none() && is_str(&reference.elem)
        }
        Type::Group(group) => is_help_text_type(&group.elem),
        Type::Paren(paren) => is_help_text_type(&paren.elem),
        _ => last_segment(ty).is_some_and(|seg| {
            if seg.ident == "String" {
                return seg.arguments.is_none();
            }
            if seg.ident != "Cow" {
                return false;
            }
            let PathArguments::AngleBracketed(args) = &seg.arguments else {
                return false;
            };
            args.args.iter().any(|arg| match arg {
                GenericArgument::Type(inner) => is_str(inner),
                _ => false,
            })
        }),
    }
}

/// Renders `ty` the way it reads in source, e.g. `HashMap<String, i32>`.
pub(crate) fn type_label(ty: &Type) -> String {
    let raw = ty.to_token_stream().to_string();
    let mut out = String::with_capacity(raw.len());
    let mut glue_next = true;
    for token in raw.split_whitespace() {
        let glue_prev = matches!(token, "<" | ">" | "," | ";" | "::" | "(" | ")" | "[" | "]");
        if !(glue_next || glue_prev) {
            out.push(' ');
        }
        out.push_str(token);
        glue_next = matches!(token, "<" | "::" | "&" | "(" | "[");
    }
    out
}
