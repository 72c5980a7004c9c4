//! A [`Registrar`] backed by [`clap::Command`].
//!
//! Flags are turned into `clap` arguments as they are registered. Parsing
//! consumes the [`App`], which ends the borrow of the bound schema so the
//! caller can read the populated fields afterwards.

use std::ffi::OsString;

use clap::builder::BoolishValueParser;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::error::{FlagarizeError, FlagarizeResult};
use crate::extension::SetValue;
use crate::registrar::{FlagDef, Occurrence, Registrar};

const HELP_FLAG: &str = "help";
const HELP_SHORT: char = 'h';

/// Command-line application collecting flags from one or more schemas.
///
/// # Examples
///
/// ```
/// use flagarize::{App, Flagarize, flagarize};
///
/// #[derive(Default, Flagarize)]
/// struct Config {
///     #[flagarize("help=Names to greet.|short=n")]
///     pub names: Vec<String>,
/// }
///
/// let mut config = Config::default();
/// let mut app = App::new("greeter").about("Greets people.");
/// flagarize(&mut app, &mut config)?;
/// assert!(app.render_help().contains("--names <NAMES>"));
/// app.parse_from(["greeter", "-n", "ada,grace", "--names", "linus"])?;
/// assert_eq!(config.names, ["ada", "grace", "linus"]);
/// # Ok::<(), flagarize::FlagarizeError>(())
/// ```
pub struct App<'a> {
    command: Command,
    bindings: Vec<Binding<'a>>,
}

struct Binding<'a> {
    def: FlagDef,
    value: Box<dyn SetValue + 'a>,
}

impl<'a> App<'a> {
    /// Creates an application named `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            command: Command::new(name.into()).args_override_self(true),
            bindings: Vec::new(),
        }
    }

    /// Sets the description shown at the top of the help output.
    #[must_use]
    pub fn about(self, about: impl Into<String>) -> Self {
        Self {
            command: self.command.about(about.into()),
            ..self
        }
    }

    /// The underlying command, including every registered flag.
    #[must_use]
    pub const fn command(&self) -> &Command {
        &self.command
    }

    /// Registered flag definitions in registration order.
    pub fn flags(&self) -> impl Iterator<Item = &FlagDef> {
        self.bindings.iter().map(|binding| &binding.def)
    }

    /// Renders the long help text.
    #[must_use]
    pub fn render_help(&self) -> String {
        self.command.clone().render_help().to_string()
    }

    /// Parses the process arguments into the bound fields.
    ///
    /// # Errors
    ///
    /// As [`App::parse_from`].
    pub fn parse(self) -> FlagarizeResult<()> {
        self.parse_from(std::env::args_os())
    }

    /// Parses `args` (including the binary name) into the bound fields.
    ///
    /// Values supplied on the command line, through the environment or by
    /// an annotation default are applied in registration order. Flags that
    /// are absent keep whatever the field held before.
    ///
    /// # Errors
    ///
    /// Returns [`FlagarizeError::CliParsing`] when `clap` rejects the
    /// arguments (including `--help`, see [`crate::is_display_request`]) and
    /// [`FlagarizeError::InvalidValue`] when a value fails to parse.
    pub fn parse_from<I, T>(self, args: I) -> FlagarizeResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let Self { command, bindings } = self;
        let matches = command.try_get_matches_from(args)?;
        for binding in bindings {
            binding.apply(&matches)?;
        }
        Ok(())
    }

    fn check_unique(&self, def: &FlagDef) -> FlagarizeResult<()> {
        if def.name == HELP_FLAG || self.flags().any(|flag| flag.name == def.name) {
            return Err(FlagarizeError::DuplicateFlag {
                name: def.name.clone(),
            });
        }
        if let Some(short) = def.short
            && (short == HELP_SHORT || self.flags().any(|flag| flag.short == Some(short)))
        {
            return Err(FlagarizeError::DuplicateShort {
                short,
                name: def.name.clone(),
            });
        }
        Ok(())
    }
}

impl<'a> Registrar<'a> for App<'a> {
    fn register(&mut self, flag: FlagDef, value: Box<dyn SetValue + 'a>) -> FlagarizeResult<()> {
        self.check_unique(&flag)?;
        tracing::debug!(
            flag = %flag.name,
            occurrence = ?flag.occurrence,
            "registering command-line flag"
        );
        let arg = to_arg(&flag);
        let command = std::mem::take(&mut self.command);
        self.command = command.arg(arg);
        self.bindings.push(Binding { def: flag, value });
        Ok(())
    }
}

fn to_arg(def: &FlagDef) -> Arg {
    let mut arg = Arg::new(def.name.clone())
        .long(def.name.clone())
        .help(def.help.clone())
        .hide(def.hidden)
        .required(def.required);
    arg = match def.occurrence {
        Occurrence::Switch => arg
            .action(ArgAction::SetTrue)
            .value_parser(BoolishValueParser::new()),
        Occurrence::Single | Occurrence::Repeated => {
            let action = if def.occurrence == Occurrence::Repeated {
                ArgAction::Append
            } else {
                ArgAction::Set
            };
            let value_name = def.placeholder.as_deref().map_or_else(
                || def.name.to_uppercase(),
                |placeholder| strip_angle_brackets(placeholder).to_owned(),
            );
            arg.action(action)
                .value_parser(clap::value_parser!(String))
                .value_name(value_name)
                .allow_negative_numbers(true)
        }
    };
    if let Some(short) = def.short {
        arg = arg.short(short);
    }
    if let Some(env) = &def.env_name {
        arg = arg.env(env.clone());
    }
    if let Some(default) = &def.default_value {
        arg = arg.default_value(default.clone());
    }
    arg
}

fn strip_angle_brackets(placeholder: &str) -> &str {
    placeholder
        .strip_prefix('<')
        .and_then(|inner| inner.strip_suffix('>'))
        .unwrap_or(placeholder)
}

impl Binding<'_> {
    fn apply(mut self, matches: &ArgMatches) -> FlagarizeResult<()> {
        let id = self.def.name.as_str();
        match matches.value_source(id) {
            None => return Ok(()),
            Some(ValueSource::DefaultValue) if self.def.default_value.is_none() => return Ok(()),
            Some(source) => {
                tracing::debug!(flag = %id, source = ?source, "applying flag value");
            }
        }
        if self.def.occurrence == Occurrence::Switch {
            let on = matches!(matches.try_get_one::<bool>(id), Ok(Some(true)));
            return self.set(if on { "true" } else { "false" });
        }
        let raws: Vec<String> = matches
            .get_many::<String>(id)
            .into_iter()
            .flatten()
            .cloned()
            .collect();
        for raw in &raws {
            self.set(raw)?;
        }
        Ok(())
    }

    fn set(&mut self, raw: &str) -> FlagarizeResult<()> {
        self.value
            .set_value(raw)
            .map_err(|source| FlagarizeError::InvalidValue {
                flag: self.def.name.clone(),
                value: raw.to_owned(),
                source,
            })
    }
}

#[cfg(test)]
mod tests;
