//! Input parsing for the `Flagarize` derive macro.
//!
//! Collects the struct's fields and attributes in one pass and pairs each
//! `<field>_help` string with the field it documents.

use std::collections::HashMap;

use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Visibility};

use super::{
    FieldSpec, HELP_VAR_SUFFIX, Schema, is_help_text_type, parse_field_attrs, parse_struct_attrs,
};

/// Gathers the schema of the user-provided struct.
///
/// Enums, unions and structs without named fields are rejected.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<Schema> {
    let attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unnamed(_) | Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Flagarize requires named fields",
                ));
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Flagarize can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        fields.push(FieldSpec {
            name: ident.unraw().to_string(),
            ident,
            ty: field.ty.clone(),
            exported: matches!(field.vis, Visibility::Public(_)),
            attrs: parse_field_attrs(&field.attrs)?,
            help_var: None,
            is_help_var: false,
        });
    }
    pair_help_vars(&mut fields);
    Ok(Schema { attrs, fields })
}

/// Links every unannotated string field named `<x>_help` to its field `<x>`.
fn pair_help_vars(fields: &mut [FieldSpec]) {
    let positions: HashMap<String, usize> = fields
        .iter()
        .enumerate()
        .map(|(idx, field)| (field.name.clone(), idx))
        .collect();

    let mut pairs = Vec::new();
    for (idx, field) in fields.iter().enumerate() {
        let Some(base) = field.name.strip_suffix(HELP_VAR_SUFFIX) else {
            continue;
        };
        if !field.attrs.is_plain() || !is_help_text_type(&field.ty) {
            continue;
        }
        if let Some(&target) = positions.get(base) {
            pairs.push((idx, target));
        }
    }

    for (help, target) in pairs {
        let help_ident = fields.get_mut(help).map(|field| {
            field.is_help_var = true;
            field.ident.clone()
        });
        if let Some(field) = fields.get_mut(target) {
            field.help_var = help_ident;
        }
    }
}
