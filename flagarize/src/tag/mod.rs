//! Annotation grammar and the canonical per-field [`Tag`].
//!
//! An annotation is a list of `key=value` segments joined by a separator
//! (`|` unless configured otherwise), for example
//! `name=listen|help=Address to listen on.|short=l`. [`parse_tag`] turns the
//! raw text into a [`Tag`], resolving the flag name and help text along the
//! way.

use heck::ToSnakeCase;

use crate::catalog::parse_bool_literal;
use crate::error::{FlagarizeError, FlagarizeResult};
use crate::registrar::{Flag, Registrar};

/// Keys accepted inside an annotation, in documentation order.
pub const VALID_KEYS: [&str; 8] = [
    "name",
    "help",
    "hidden",
    "required",
    "default",
    "envvar",
    "short",
    "placeholder",
];

/// Suffix identifying the sibling field that supplies runtime help text.
pub const HELP_VAR_SUFFIX: &str = "_help";

/// Static description of one field, emitted by `#[derive(Flagarize)]`.
///
/// # Examples
///
/// ```
/// use flagarize::FieldMeta;
///
/// const META: FieldMeta = FieldMeta::new("listen_address", "Option<SocketAddr>", 0)
///     .with_annotation("help=Address to listen on.")
///     .exported();
/// assert_eq!(META.help_var_name(), "listen_address_help");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    ident: &'static str,
    type_name: &'static str,
    annotation: Option<&'static str>,
    exported: bool,
    embedded: bool,
    index: usize,
}

impl FieldMeta {
    /// Describes a private, unannotated field.
    #[must_use]
    pub const fn new(ident: &'static str, type_name: &'static str, index: usize) -> Self {
        Self {
            ident,
            type_name,
            annotation: None,
            exported: false,
            embedded: false,
            index,
        }
    }

    /// Attaches the raw annotation text.
    #[must_use]
    pub const fn with_annotation(mut self, annotation: &'static str) -> Self {
        self.annotation = Some(annotation);
        self
    }

    /// Marks the field as `pub`.
    #[must_use]
    pub const fn exported(mut self) -> Self {
        self.exported = true;
        self
    }

    /// Marks the field as flattened into its parent.
    #[must_use]
    pub const fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    /// Declared identifier, without any raw-identifier prefix.
    #[must_use]
    pub const fn ident(&self) -> &'static str {
        self.ident
    }

    /// Declared type as written in the struct.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Raw annotation text, if the field carries one.
    #[must_use]
    pub const fn annotation(&self) -> Option<&'static str> {
        self.annotation
    }

    /// Whether the field is `pub`.
    #[must_use]
    pub const fn is_exported(&self) -> bool {
        self.exported
    }

    /// Whether the field is flattened into its parent.
    #[must_use]
    pub const fn is_embedded(&self) -> bool {
        self.embedded
    }

    /// Position of the field within its struct.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Conventional name of the sibling field holding runtime help text.
    #[must_use]
    pub fn help_var_name(&self) -> String {
        format!("{}{HELP_VAR_SUFFIX}", self.ident)
    }
}

/// Canonical descriptor of one flag, resolved from an annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    /// Long flag name.
    pub name: String,
    /// Help text shown in usage output.
    pub help: String,
    /// Hide the flag from usage output.
    pub hidden: bool,
    /// Fail parsing when the flag is absent.
    pub required: bool,
    /// Default representation applied when the flag is absent.
    pub default_value: Option<String>,
    /// Environment variable consulted when the flag is absent.
    pub env_name: Option<String>,
    /// Single-character alias.
    pub short: Option<char>,
    /// Value placeholder shown in usage output.
    pub placeholder: Option<String>,
    /// Separator splitting repeatable values of flags built from this tag.
    /// The walker fills it from [`crate::Options`]; `None` keeps
    /// [`crate::DEFAULT_ELEM_SEPARATOR`].
    pub elem_separator: Option<String>,
}

impl Tag {
    /// Starts a flag definition on `registrar` pre-filled from this tag.
    ///
    /// Extensions use this to register their flag with the tag's settings and
    /// then pick a typed bind.
    #[must_use]
    pub fn flag<'r, 'a>(&self, registrar: &'r mut dyn Registrar<'a>) -> Flag<'r, 'a> {
        let mut flag = Flag::new(registrar, self.name.clone(), self.help.clone())
            .hidden(self.hidden)
            .required(self.required);
        if let Some(default) = &self.default_value {
            flag = flag.default_value(default.clone());
        }
        if let Some(env) = &self.env_name {
            flag = flag.env(env.clone());
        }
        if let Some(short) = self.short {
            flag = flag.short(short);
        }
        if let Some(placeholder) = &self.placeholder {
            flag = flag.placeholder(placeholder.clone());
        }
        if let Some(separator) = &self.elem_separator {
            flag = flag.separator(separator.clone());
        }
        flag
    }
}

/// Parses the annotation of `field` into a [`Tag`].
///
/// Returns `Ok(None)` when the field carries no annotation at all.
/// `help_var` is the runtime value of the field's help var, if it has one.
///
/// # Errors
///
/// Returns a grammar error ([`FlagarizeError::TagFormat`],
/// [`FlagarizeError::UnknownKey`]) for malformed segments and a semantic
/// error ([`FlagarizeError::MissingHelp`],
/// [`FlagarizeError::LowercaseEnvVar`], [`FlagarizeError::InvalidShort`],
/// [`FlagarizeError::InvalidBool`]) for invalid values.
///
/// # Examples
///
/// ```
/// use flagarize::{FieldMeta, parse_tag};
///
/// let field = FieldMeta::new("listen_address", "String", 0)
///     .with_annotation("help=Address to listen on.|short=l")
///     .exported();
/// let tag = parse_tag(&field, None, "|").unwrap().unwrap();
/// assert_eq!(tag.name, "listen_address");
/// assert_eq!(tag.short, Some('l'));
/// ```
pub fn parse_tag(
    field: &FieldMeta,
    help_var: Option<&str>,
    separator: &str,
) -> FlagarizeResult<Option<Tag>> {
    let Some(annotation) = field.annotation() else {
        return Ok(None);
    };

    let mut tag = Tag::default();
    let mut name = None;
    let mut help = None;
    for segment in annotation.split(separator) {
        let (key, value) = split_segment(field, segment)?;
        match key {
            "name" => name = non_empty(value),
            "help" => help = non_empty(value),
            "hidden" => tag.hidden = parse_flag_bool(field, "hidden", value)?,
            "required" => tag.required = parse_flag_bool(field, "required", value)?,
            "default" => tag.default_value = non_empty(value),
            "envvar" => tag.env_name = parse_env_name(field, value)?,
            "short" => tag.short = Some(parse_short(field, value)?),
            "placeholder" => tag.placeholder = non_empty(value),
            other => {
                return Err(FlagarizeError::UnknownKey {
                    field: field.ident().to_owned(),
                    separator: separator.to_owned(),
                    key: other.to_owned(),
                });
            }
        }
    }

    tag.name = name.unwrap_or_else(|| field.ident().to_snake_case());
    tag.help = help
        .or_else(|| help_var.and_then(non_empty))
        .ok_or_else(|| FlagarizeError::MissingHelp {
            field: field.ident().to_owned(),
            help_var: field.help_var_name(),
        })?;
    Ok(Some(tag))
}

fn split_segment<'s>(field: &FieldMeta, segment: &'s str) -> FlagarizeResult<(&'s str, &'s str)> {
    if let Some(pair) = segment.split_once('=') {
        return Ok(pair);
    }
    match segment {
        "hidden" | "required" => Ok((segment, "true")),
        _ => Err(FlagarizeError::TagFormat {
            field: field.ident().to_owned(),
            fragment: segment.to_owned(),
        }),
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

fn parse_flag_bool(field: &FieldMeta, key: &'static str, value: &str) -> FlagarizeResult<bool> {
    parse_bool_literal(value).ok_or_else(|| FlagarizeError::InvalidBool {
        field: field.ident().to_owned(),
        key,
        value: value.to_owned(),
    })
}

fn parse_env_name(field: &FieldMeta, value: &str) -> FlagarizeResult<Option<String>> {
    if value.chars().any(char::is_lowercase) {
        return Err(FlagarizeError::LowercaseEnvVar {
            field: field.ident().to_owned(),
            value: value.to_owned(),
        });
    }
    Ok(non_empty(value))
}

fn parse_short(field: &FieldMeta, value: &str) -> FlagarizeResult<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(short), None) => Ok(short),
        _ => Err(FlagarizeError::InvalidShort {
            field: field.ident().to_owned(),
            value: value.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests;
