//! Primary error enum for schema binding and flag parsing.

use thiserror::Error;

/// Boxed error returned by extensions and value setters.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result alias used throughout the crate.
pub type FlagarizeResult<T> = Result<T, FlagarizeError>;

/// Errors raised while binding a schema to a registrar or parsing its flags.
///
/// Binding is fail-fast: the first error aborts the walk and flags registered
/// before it are not rolled back, so callers should treat any error as fatal
/// to start-up.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlagarizeError {
    /// The root object was absent.
    #[error("object cannot be nil")]
    NilObject,

    /// A flattened field does not describe a struct.
    #[error("embedded field {field:?} of type {type_name} must be a struct to be flattened")]
    NotAStruct {
        /// Identifier of the flattened field.
        field: String,
        /// Declared type of the field.
        type_name: String,
    },

    /// A separator in [`crate::Options`] was empty.
    #[error("{which} separator cannot be empty")]
    InvalidSeparator {
        /// Which separator was rejected.
        which: &'static str,
    },

    /// An annotation was placed on a field that is not `pub`.
    #[error("flagarize annotation found on private field {field:?}; it has to be public")]
    PrivateField {
        /// Identifier of the private field.
        field: String,
    },

    /// An annotated field has a type with no binding strategy.
    #[error("flagarize annotation found on not supported type {type_name} for field {field:?}")]
    UnsupportedType {
        /// Identifier of the annotated field.
        field: String,
        /// Declared type of the field.
        type_name: String,
    },

    /// An annotation segment is not of the `key=value` form.
    #[error(
        "expected map-like annotation elements (e.g hidden=true), found non supported format {fragment:?} for field {field:?}"
    )]
    TagFormat {
        /// Identifier of the annotated field.
        field: String,
        /// The offending segment.
        fragment: String,
    },

    /// An annotation segment uses an unknown key.
    #[error(
        "expected map-like annotation elements (e.g hidden=true) separated with {separator}, but found unsupported key {key:?} for field {field:?}; only [{keys}] are supported",
        keys = crate::tag::VALID_KEYS.join(" ")
    )]
    UnknownKey {
        /// Identifier of the annotated field.
        field: String,
        /// Separator in use while parsing.
        separator: String,
        /// The unknown key.
        key: String,
    },

    /// Neither `help=` nor a help var supplied help text.
    #[error(
        "no help=<help> in annotation for field {field:?} and no help var; help=<help> or {help_var:?} is required for help/usage of the flag"
    )]
    MissingHelp {
        /// Identifier of the annotated field.
        field: String,
        /// Name of the sibling field that would have satisfied the requirement.
        help_var: String,
    },

    /// `envvar=` contained lowercase letters.
    #[error("environment variable name has to be upper case, but it's not {value:?} for field {field:?}")]
    LowercaseEnvVar {
        /// Identifier of the annotated field.
        field: String,
        /// The rejected variable name.
        value: String,
    },

    /// `short=` was not exactly one character.
    #[error("short has to be exactly one character, got {value:?} for field {field:?}")]
    InvalidShort {
        /// Identifier of the annotated field.
        field: String,
        /// The rejected value.
        value: String,
    },

    /// `hidden=` or `required=` was not a boolean literal.
    #[error("{key} expects a boolean, got {value:?} for field {field:?}")]
    InvalidBool {
        /// Identifier of the annotated field.
        field: String,
        /// Key whose value was rejected.
        key: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The field's extension is only reachable through a shared pointer.
    #[error(
        "flagarize field {field:?} of type {type_name} holds a custom Flagarizer behind a shared pointer; it has to be reachable through a mutable reference"
    )]
    ExtensionReceiver {
        /// Identifier of the field.
        field: String,
        /// Declared type of the field.
        type_name: String,
    },

    /// A custom extension returned an error.
    #[error("custom Flagarizer for field {field}: {source}")]
    ExtensionFailure {
        /// Identifier of the field.
        field: String,
        /// Error reported by the extension.
        #[source]
        source: BoxError,
    },

    /// Two flags share a long name.
    #[error("flag --{name} is already registered")]
    DuplicateFlag {
        /// The conflicting long name.
        name: String,
    },

    /// Two flags share a short name.
    #[error("short flag -{short} requested by --{name} is already registered")]
    DuplicateShort {
        /// The conflicting short name.
        short: char,
        /// Long name of the flag that requested it.
        name: String,
    },

    /// Error parsing command-line arguments.
    #[error("failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),

    /// A flag value was rejected by its semantic parser.
    #[error("invalid value {value:?} for flag --{flag}: {source}")]
    InvalidValue {
        /// Long name of the flag.
        flag: String,
        /// The raw value as supplied.
        value: String,
        /// Error reported by the parser.
        #[source]
        source: BoxError,
    },
}

/// Coarse classification of [`FlagarizeError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The root object or an embedded field cannot be walked.
    Structural,
    /// An annotation sits on a non-public field.
    PrivateField,
    /// An annotated field has no binding strategy.
    UnsupportedType,
    /// An annotation is syntactically malformed.
    TagGrammar,
    /// An annotation is well-formed but semantically invalid.
    TagSemantic,
    /// An extension cannot be reached mutably.
    ExtensionReceiver,
    /// An extension reported an error.
    ExtensionFailure,
    /// The registrar rejected a flag definition.
    Registration,
    /// Argument parsing or value parsing failed.
    Parse,
}

impl FlagarizeError {
    /// Returns the taxonomy bucket this error belongs to.
    ///
    /// # Examples
    ///
    /// ```
    /// use flagarize::{ErrorCategory, FlagarizeError};
    ///
    /// let err = FlagarizeError::PrivateField { field: "secret".into() };
    /// assert_eq!(err.category(), ErrorCategory::PrivateField);
    /// ```
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::NilObject | Self::NotAStruct { .. } | Self::InvalidSeparator { .. } => {
                ErrorCategory::Structural
            }
            Self::PrivateField { .. } => ErrorCategory::PrivateField,
            Self::UnsupportedType { .. } => ErrorCategory::UnsupportedType,
            Self::TagFormat { .. } | Self::UnknownKey { .. } => ErrorCategory::TagGrammar,
            Self::MissingHelp { .. }
            | Self::LowercaseEnvVar { .. }
            | Self::InvalidShort { .. }
            | Self::InvalidBool { .. } => ErrorCategory::TagSemantic,
            Self::ExtensionReceiver { .. } => ErrorCategory::ExtensionReceiver,
            Self::ExtensionFailure { .. } => ErrorCategory::ExtensionFailure,
            Self::DuplicateFlag { .. } | Self::DuplicateShort { .. } => {
                ErrorCategory::Registration
            }
            Self::CliParsing(_) | Self::InvalidValue { .. } => ErrorCategory::Parse,
        }
    }
}

impl From<clap::Error> for FlagarizeError {
    fn from(e: clap::Error) -> Self {
        Self::CliParsing(Box::new(e))
    }
}
