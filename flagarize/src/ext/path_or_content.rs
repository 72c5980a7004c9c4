//! A value given either inline or as a path to a file holding it.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::error::BoxError;
use crate::extension::Flagarizer;
use crate::registrar::{Flag, Registrar};
use crate::tag::Tag;

/// Errors raised when resolving a [`PathOrContent`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PathOrContentError {
    /// Both flags of the pair were given.
    #[error("both --{flag}-file and --{flag} flags set")]
    BothSet {
        /// Name of the content flag.
        flag: String,
    },
    /// Neither flag was given but a value is required.
    #[error("flag --{flag}-file or --{flag} is required for running this command and content cannot be empty")]
    Missing {
        /// Name of the content flag.
        flag: String,
    },
    /// The file could not be read.
    #[error("loading file {path:?} for --{flag}-file")]
    Read {
        /// Name of the content flag.
        flag: String,
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Content supplied inline via `--<name>` or loaded from `--<name>-file`.
///
/// With a tag named `config` the field registers `--config-file
/// <file-path>` followed by `--config <content>`. Without a tag it
/// registers nothing.
///
/// # Examples
///
/// ```
/// use flagarize::ext::PathOrContent;
/// use flagarize::{App, Flagarize, flagarize};
///
/// #[derive(Default, Flagarize)]
/// struct Config {
///     #[flagarize("help=alerting rules.")]
///     pub rules: PathOrContent,
/// }
///
/// let mut config = Config::default();
/// let mut app = App::new("demo");
/// flagarize(&mut app, &mut config)?;
/// app.parse_from(["demo", "--rules", "groups: []"])?;
/// assert_eq!(config.rules.content()?.as_deref(), Some("groups: []"));
/// # Ok::<(), flagarize::BoxError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathOrContent {
    flag_name: String,
    required: bool,
    path: Option<PathBuf>,
    content: Option<String>,
}

impl PathOrContent {
    /// Creates a value as if it had been parsed from flags named `flag_name`.
    #[must_use]
    pub fn new(
        flag_name: impl Into<String>,
        required: bool,
        path: Option<PathBuf>,
        content: Option<String>,
    ) -> Self {
        Self {
            flag_name: flag_name.into(),
            required,
            path,
            content,
        }
    }

    /// Name of the content flag; the file flag appends `-file`.
    #[must_use]
    pub fn flag_name(&self) -> &str {
        &self.flag_name
    }

    /// Path given through the file flag, if any.
    #[must_use]
    pub const fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    /// Resolves the content, reading the file when a path was given.
    ///
    /// # Errors
    ///
    /// Fails when both flags were given, when a required value is missing
    /// and when the file cannot be read.
    pub fn content(&self) -> Result<Option<String>, PathOrContentError> {
        match (&self.path, &self.content) {
            (Some(_), Some(_)) => Err(PathOrContentError::BothSet {
                flag: self.flag_name.clone(),
            }),
            (Some(path), None) => fs::read_to_string(path)
                .map(Some)
                .map_err(|source| PathOrContentError::Read {
                    flag: self.flag_name.clone(),
                    path: path.clone(),
                    source,
                }),
            (None, Some(content)) => Ok(Some(content.clone())),
            (None, None) if self.required => Err(PathOrContentError::Missing {
                flag: self.flag_name.clone(),
            }),
            (None, None) => Ok(None),
        }
    }
}

impl Flagarizer for PathOrContent {
    fn flagarize<'a>(
        &'a mut self,
        registrar: &mut dyn Registrar<'a>,
        tag: Option<&Tag>,
    ) -> Result<(), BoxError> {
        let Some(tag) = tag else {
            return Ok(());
        };
        self.flag_name.clone_from(&tag.name);
        self.required = tag.required;

        let file_flag = format!("{}-file", tag.name);
        Flag::new(
            &mut *registrar,
            file_flag.clone(),
            format!("Path to {}", tag.help),
        )
        .hidden(tag.hidden)
        .placeholder("<file-path>")
        .optional_var(&mut self.path)?;

        let mut content = Flag::new(
            registrar,
            tag.name.clone(),
            format!(
                "Alternative to '{file_flag}' flag (lower priority). Content of {}",
                tag.help
            ),
        )
        .hidden(tag.hidden)
        .placeholder("<content>");
        if let Some(env) = &tag.env_name {
            content = content.env(env.clone());
        }
        if let Some(default) = &tag.default_value {
            content = content.default_value(default.clone());
        }
        content.optional_var(&mut self.content)?;
        Ok(())
    }
}
