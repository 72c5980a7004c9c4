//! The flag-registration surface consumed by the walker.
//!
//! A [`Registrar`] receives one [`FlagDef`] per flag together with a boxed
//! [`SetValue`] writing through to the bound field. [`Flag`] is the builder
//! handed to extensions and catalog strategies for assembling that pair.

mod values;

use std::time::Duration;

pub use values::StringMap;
pub(crate) use values::{Mapping, Optional, Repeated, Single};

use crate::catalog::FlagParse;
use crate::error::FlagarizeResult;
use crate::extension::SetValue;
use crate::options::DEFAULT_ELEM_SEPARATOR;

/// How many values a flag takes per occurrence and how often it may appear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Occurrence {
    /// Takes no value; presence means `true`.
    Switch,
    /// Takes one value; the last occurrence wins.
    #[default]
    Single,
    /// Takes one value per occurrence; every occurrence is kept.
    Repeated,
}

/// Everything a registrar needs to know about one flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagDef {
    /// Long name, used as `--<name>`.
    pub name: String,
    /// Help text.
    pub help: String,
    /// Hide from usage output.
    pub hidden: bool,
    /// Fail parsing when absent.
    pub required: bool,
    /// Raw default applied when the flag is absent.
    pub default_value: Option<String>,
    /// Environment variable consulted when the flag is absent.
    pub env_name: Option<String>,
    /// Single-character alias.
    pub short: Option<char>,
    /// Value placeholder for usage output.
    pub placeholder: Option<String>,
    /// Arity of the flag.
    pub occurrence: Occurrence,
}

impl FlagDef {
    /// Creates a single-valued definition with the given name and help.
    #[must_use]
    pub fn new(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            ..Self::default()
        }
    }
}

/// A surface that accepts flag registrations.
///
/// `'a` is the lifetime of the bound schema; every value handed over writes
/// through a `&'a mut` borrow of one of its fields.
pub trait Registrar<'a> {
    /// Registers `flag`, storing parsed occurrences through `value`.
    ///
    /// # Errors
    ///
    /// Implementations reject definitions they cannot accept, such as a
    /// name that is already taken.
    fn register(&mut self, flag: FlagDef, value: Box<dyn SetValue + 'a>) -> FlagarizeResult<()>;
}

/// Settable handle for a flag that has not been bound yet.
///
/// Obtain one from [`crate::Tag::flag`] or [`Flag::new`], adjust it with the
/// builder methods and finish with one of the `*_var` binds.
///
/// # Examples
///
/// ```
/// use flagarize::{App, Flag};
///
/// let mut verbose = false;
/// let mut app = App::new("demo");
/// Flag::new(&mut app, "verbose", "Log more.").short('v').bool_var(&mut verbose)?;
/// app.parse_from(["demo", "-v"])?;
/// assert!(verbose);
/// # Ok::<(), flagarize::FlagarizeError>(())
/// ```
pub struct Flag<'r, 'a> {
    registrar: &'r mut dyn Registrar<'a>,
    def: FlagDef,
    separator: String,
}

impl<'r, 'a> Flag<'r, 'a> {
    /// Starts a flag with the given long name and help text.
    #[must_use]
    pub fn new(
        registrar: &'r mut dyn Registrar<'a>,
        name: impl Into<String>,
        help: impl Into<String>,
    ) -> Self {
        Self {
            registrar,
            def: FlagDef::new(name, help),
            separator: DEFAULT_ELEM_SEPARATOR.to_owned(),
        }
    }

    /// Hides the flag from usage output.
    #[must_use]
    pub const fn hidden(mut self, hidden: bool) -> Self {
        self.def.hidden = hidden;
        self
    }

    /// Makes the flag mandatory.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.def.required = required;
        self
    }

    /// Sets the raw default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.def.default_value = Some(value.into());
        self
    }

    /// Names the environment variable consulted when the flag is absent.
    #[must_use]
    pub fn env(mut self, name: impl Into<String>) -> Self {
        self.def.env_name = Some(name.into());
        self
    }

    /// Adds a single-character alias.
    #[must_use]
    pub const fn short(mut self, short: char) -> Self {
        self.def.short = Some(short);
        self
    }

    /// Sets the value placeholder shown in usage output.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.def.placeholder = Some(placeholder.into());
        self
    }

    /// Sets the separator splitting repeatable values; empty disables
    /// splitting.
    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Sets the arity explicitly.
    #[must_use]
    pub const fn occurrence(mut self, occurrence: Occurrence) -> Self {
        self.def.occurrence = occurrence;
        self
    }

    /// Makes the flag a value-less switch.
    #[must_use]
    pub const fn switch(self) -> Self {
        self.occurrence(Occurrence::Switch)
    }

    /// Lets the flag appear more than once.
    #[must_use]
    pub const fn repeated(self) -> Self {
        self.occurrence(Occurrence::Repeated)
    }

    /// The definition as it stands.
    #[must_use]
    pub const fn definition(&self) -> &FlagDef {
        &self.def
    }

    /// Registers the flag with an arbitrary value sink.
    ///
    /// # Errors
    ///
    /// Propagates the registrar's rejection.
    pub fn bind(self, value: Box<dyn SetValue + 'a>) -> FlagarizeResult<()> {
        self.registrar.register(self.def, value)
    }

    /// Binds to a custom [`SetValue`] target.
    ///
    /// # Errors
    ///
    /// Propagates the registrar's rejection.
    pub fn set_value<V: SetValue + ?Sized>(self, target: &'a mut V) -> FlagarizeResult<()> {
        self.bind(Box::new(target))
    }

    /// Binds a switch to `target`.
    ///
    /// # Errors
    ///
    /// Propagates the registrar's rejection.
    pub fn bool_var(self, target: &'a mut bool) -> FlagarizeResult<()> {
        self.switch().parsed_var(target)
    }

    /// Binds a string to `target`.
    ///
    /// # Errors
    ///
    /// Propagates the registrar's rejection.
    pub fn string_var(self, target: &'a mut String) -> FlagarizeResult<()> {
        self.parsed_var(target)
    }

    /// Binds a human-readable duration such as `1h30m` to `target`.
    ///
    /// # Errors
    ///
    /// Propagates the registrar's rejection.
    pub fn duration_var(self, target: &'a mut Duration) -> FlagarizeResult<()> {
        self.parsed_var(target)
    }

    /// Binds any [`FlagParse`] type to `target`.
    ///
    /// # Errors
    ///
    /// Propagates the registrar's rejection.
    pub fn parsed_var<T: FlagParse + 'a>(self, target: &'a mut T) -> FlagarizeResult<()> {
        self.bind(Box::new(Single::new(target)))
    }

    /// Binds a value that stays `None` unless the flag is given.
    ///
    /// # Errors
    ///
    /// Propagates the registrar's rejection.
    pub fn optional_var<T: FlagParse + 'a>(self, target: &'a mut Option<T>) -> FlagarizeResult<()> {
        self.bind(Box::new(Optional::new(target)))
    }

    /// Binds a repeatable list of strings.
    ///
    /// # Errors
    ///
    /// Propagates the registrar's rejection.
    pub fn strings_var(self, target: &'a mut Vec<String>) -> FlagarizeResult<()> {
        self.repeated_var(target)
    }

    /// Binds a repeatable list of any [`FlagParse`] type.
    ///
    /// # Errors
    ///
    /// Propagates the registrar's rejection.
    pub fn repeated_var<T: FlagParse + 'a>(self, target: &'a mut Vec<T>) -> FlagarizeResult<()> {
        let separator = self.separator.clone();
        self.repeated().bind(Box::new(Repeated::new(target, separator)))
    }

    /// Binds a repeatable `key=value` map.
    ///
    /// # Errors
    ///
    /// Propagates the registrar's rejection.
    pub fn map_var<M: StringMap + 'a>(self, target: &'a mut M) -> FlagarizeResult<()> {
        let separator = self.separator.clone();
        self.repeated().bind(Box::new(Mapping::new(target, separator)))
    }
}
