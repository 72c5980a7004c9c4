//! Derive command-line flags from annotated configuration structs.
//!
//! Annotate the fields of a struct with `#[flagarize("...")]`, derive
//! [`Flagarize`] and hand a mutable borrow of an instance to [`flagarize`].
//! Every eligible field becomes one flag on the supplied [`Registrar`]; once
//! the registrar parses its arguments, the parsed values are written straight
//! into the struct.
//!
//! ```
//! use std::time::Duration;
//!
//! use flagarize::{App, Flagarize, flagarize};
//!
//! #[derive(Default, Flagarize)]
//! struct Config {
//!     #[flagarize("name=listen|help=Address to listen on.|short=l|default=localhost:8080")]
//!     pub listen: String,
//!     #[flagarize("help=Request timeout.|default=30s")]
//!     pub timeout: Duration,
//!     #[flagarize("help=Log more.")]
//!     pub verbose: bool,
//! }
//!
//! let mut config = Config::default();
//! let mut app = App::new("server");
//! flagarize(&mut app, &mut config)?;
//! app.parse_from(["server", "--verbose", "--timeout", "1m"])?;
//!
//! assert_eq!(config.listen, "localhost:8080");
//! assert_eq!(config.timeout, Duration::from_secs(60));
//! assert!(config.verbose);
//! # Ok::<(), flagarize::FlagarizeError>(())
//! ```
//!
//! The annotation grammar is a list of `key=value` segments separated by `|`
//! (configurable through [`Options`]). Supported keys are `name`, `help`,
//! `hidden`, `required`, `default`, `envvar`, `short` and `placeholder`.
//! When `help=` is omitted, a sibling `String` field named `<field>_help`
//! supplies the help text at runtime.

pub use flagarize_macros::Flagarize;

mod app;
pub mod catalog;
mod error;
mod extension;
pub mod ext;
mod options;
mod probe;
mod registrar;
mod tag;
mod walker;

pub use app::App;
pub use catalog::{ByteSize, Catalog, FlagParse, LeafKind, Strategy, ValueError};
pub use error::{BoxError, ErrorCategory, FlagarizeError, FlagarizeResult, is_display_request};
pub use extension::{Flagarizer, SetValue};
pub use options::{DEFAULT_ELEM_SEPARATOR, DEFAULT_TAG_SEPARATOR, Options};
pub use registrar::{Flag, FlagDef, Occurrence, Registrar, StringMap};
pub use tag::{FieldMeta, HELP_VAR_SUFFIX, Tag, VALID_KEYS, parse_tag};
pub use walker::{Flagarize, Target, Walker, flagarize, flagarize_with};

#[doc(hidden)]
pub mod __private {
    //! Items used by code generated with `#[derive(Flagarize)]`.

    pub use crate::probe::{
        CatalogKind, ExtensionKind, ExtensionProbe, LeafProbe, OptionalExtensionKind,
        OptionalExtensionProbe, Probe, SchemaKind, SchemaProbe, SetterKind, SetterProbe,
        SharedExtensionKind, SharedExtensionProbe,
    };
}
