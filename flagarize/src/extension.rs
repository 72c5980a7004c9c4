//! Traits letting custom types take over their own flag binding.
//!
//! [`Flagarizer`] hands a field the whole registrar so it can register any
//! number of flags. [`SetValue`] is the narrower capability used by types
//! that map onto exactly one flag and only need to parse its raw value.

use crate::error::BoxError;
use crate::registrar::Registrar;
use crate::tag::Tag;

/// A type that registers its own flags.
///
/// The walker prefers this capability over every other dispatch, whether or
/// not the field is annotated. `tag` is `None` when the field carries no
/// annotation or when its annotation failed to parse.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use flagarize::{BoxError, Flagarizer, Registrar, Tag};
///
/// #[derive(Default)]
/// struct Timeout(Duration);
///
/// impl Flagarizer for Timeout {
///     fn flagarize<'a>(
///         &'a mut self,
///         registrar: &mut dyn Registrar<'a>,
///         tag: Option<&Tag>,
///     ) -> Result<(), BoxError> {
///         let Some(tag) = tag else { return Ok(()) };
///         tag.flag(registrar).duration_var(&mut self.0)?;
///         Ok(())
///     }
/// }
/// ```
pub trait Flagarizer {
    /// Registers the flags backing `self`.
    ///
    /// # Errors
    ///
    /// Any error returned here aborts the walk and is reported as
    /// [`crate::FlagarizeError::ExtensionFailure`].
    fn flagarize<'a>(
        &'a mut self,
        registrar: &mut dyn Registrar<'a>,
        tag: Option<&Tag>,
    ) -> Result<(), BoxError>;
}

impl<T: Flagarizer + ?Sized> Flagarizer for Box<T> {
    fn flagarize<'a>(
        &'a mut self,
        registrar: &mut dyn Registrar<'a>,
        tag: Option<&Tag>,
    ) -> Result<(), BoxError> {
        (**self).flagarize(registrar, tag)
    }
}

/// A value that parses one raw flag occurrence into itself.
///
/// Annotated fields of a `SetValue` type are bound to a single flag whose
/// every occurrence is forwarded here.
pub trait SetValue {
    /// Parses `raw` and stores the result.
    ///
    /// # Errors
    ///
    /// Returns the parser's error when `raw` is not acceptable.
    fn set_value(&mut self, raw: &str) -> Result<(), BoxError>;
}

impl<V: SetValue + ?Sized> SetValue for &mut V {
    fn set_value(&mut self, raw: &str) -> Result<(), BoxError> {
        (**self).set_value(raw)
    }
}

impl<V: SetValue + ?Sized> SetValue for Box<V> {
    fn set_value(&mut self, raw: &str) -> Result<(), BoxError> {
        (**self).set_value(raw)
    }
}
