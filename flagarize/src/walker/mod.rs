//! Depth-first traversal of a schema, registering one flag per eligible field.
//!
//! The derive macro generates a [`Flagarize::describe`] body that hands every
//! field to the matching `visit_*` method of [`Walker`]. The walker parses the
//! field's annotation, consults the [`Catalog`] and forwards the resulting
//! flag to the [`Registrar`].

use std::any::Any;

use crate::catalog::Catalog;
use crate::error::{FlagarizeError, FlagarizeResult};
use crate::extension::{Flagarizer, SetValue};
use crate::options::Options;
use crate::registrar::Registrar;
use crate::tag::{FieldMeta, Tag, parse_tag};

/// A struct whose fields can be bound to flags.
///
/// Implement it with `#[derive(Flagarize)]`.
pub trait Flagarize {
    /// Hands every field of `self` to `walker`, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while visiting a field.
    fn describe<'a>(&'a mut self, walker: &mut Walker<'a, '_>) -> FlagarizeResult<()>;
}

impl<S: Flagarize + ?Sized> Flagarize for Box<S> {
    fn describe<'a>(&'a mut self, walker: &mut Walker<'a, '_>) -> FlagarizeResult<()> {
        (**self).describe(walker)
    }
}

/// A root object accepted by [`flagarize`].
///
/// Implemented for `&mut S` and `Option<&mut S>`. There is deliberately no
/// implementation for owned schemas, since the registrar writes through
/// borrows of the fields.
///
/// ```compile_fail
/// use flagarize::{App, Flagarize, flagarize};
///
/// #[derive(Flagarize)]
/// struct Config {
///     #[flagarize("help=Port.")]
///     pub port: u16,
/// }
///
/// let mut app = App::new("demo");
/// flagarize(&mut app, Config { port: 0 })?;
/// # Ok::<(), flagarize::FlagarizeError>(())
/// ```
pub trait Target<'a> {
    /// Describes the root into `walker`.
    ///
    /// # Errors
    ///
    /// Returns [`FlagarizeError::NilObject`] for an absent root, or the first
    /// error raised while walking it.
    fn describe_into(self, walker: &mut Walker<'a, '_>) -> FlagarizeResult<()>;
}

impl<'a, S: Flagarize + ?Sized> Target<'a> for &'a mut S {
    fn describe_into(self, walker: &mut Walker<'a, '_>) -> FlagarizeResult<()> {
        self.describe(walker)
    }
}

impl<'a, S: Flagarize + ?Sized> Target<'a> for Option<&'a mut S> {
    fn describe_into(self, walker: &mut Walker<'a, '_>) -> FlagarizeResult<()> {
        self.ok_or(FlagarizeError::NilObject)?.describe(walker)
    }
}

/// Registers a flag for every eligible field of `target`.
///
/// # Errors
///
/// Aborts on the first structural, annotation, dispatch or registration
/// error. Flags registered before the failure stay registered.
///
/// # Examples
///
/// ```
/// use flagarize::{App, Flagarize, flagarize};
///
/// #[derive(Default, Flagarize)]
/// struct Config {
///     #[flagarize("help=Port to listen on.|short=p")]
///     pub port: u16,
/// }
///
/// let mut config = Config::default();
/// let mut app = App::new("demo");
/// flagarize(&mut app, &mut config)?;
/// app.parse_from(["demo", "-p", "8080"])?;
/// assert_eq!(config.port, 8080);
/// # Ok::<(), flagarize::FlagarizeError>(())
/// ```
pub fn flagarize<'a>(
    registrar: &mut dyn Registrar<'a>,
    target: impl Target<'a>,
) -> FlagarizeResult<()> {
    flagarize_with(registrar, target, &Options::default())
}

/// Like [`flagarize`], with explicit [`Options`].
///
/// # Errors
///
/// Returns [`FlagarizeError::InvalidSeparator`] for unusable options, then
/// behaves as [`flagarize`].
pub fn flagarize_with<'a>(
    registrar: &mut dyn Registrar<'a>,
    target: impl Target<'a>,
    options: &Options,
) -> FlagarizeResult<()> {
    options.validate()?;
    let mut walker = Walker {
        registrar,
        options,
        catalog: Catalog::standard(),
        path: Vec::new(),
    };
    target.describe_into(&mut walker)
}

/// Traversal state shared by every field of one [`flagarize`] call.
pub struct Walker<'a, 'r> {
    registrar: &'r mut dyn Registrar<'a>,
    options: &'r Options,
    catalog: &'static Catalog,
    path: Vec<&'static str>,
}

impl<'a> Walker<'a, '_> {
    /// Options in effect for this walk.
    #[must_use]
    pub const fn options(&self) -> &Options {
        self.options
    }

    /// Handles a non-`pub` field, which must not carry an annotation.
    ///
    /// # Errors
    ///
    /// Returns [`FlagarizeError::PrivateField`] for annotated fields.
    pub fn visit_private(&mut self, field: &FieldMeta) -> FlagarizeResult<()> {
        if field.annotation().is_some() {
            return Err(FlagarizeError::PrivateField {
                field: field.ident().to_owned(),
            });
        }
        tracing::trace!(field = %self.field_path(field), "skipping private field");
        Ok(())
    }

    /// Hands the field to its own [`Flagarizer`] implementation.
    ///
    /// An annotation that fails to parse is not fatal here: the extension is
    /// invoked without a tag.
    ///
    /// # Errors
    ///
    /// Wraps any extension error in [`FlagarizeError::ExtensionFailure`].
    pub fn visit_extension<T: Flagarizer + ?Sized>(
        &mut self,
        field: &FieldMeta,
        help_var: Option<&str>,
        slot: &'a mut T,
    ) -> FlagarizeResult<()> {
        let tag = self.tag(field, help_var).unwrap_or_else(|err| {
            tracing::debug!(
                field = %self.field_path(field),
                error = %err,
                "annotation unusable; extension invoked without a tag"
            );
            None
        });
        tracing::debug!(
            field = %self.field_path(field),
            tagged = tag.is_some(),
            "delegating to custom flagarizer"
        );
        slot.flagarize(&mut *self.registrar, tag.as_ref())
            .map_err(|source| FlagarizeError::ExtensionFailure {
                field: field.ident().to_owned(),
                source,
            })
    }

    /// Fills an absent extension with its default, then delegates to it.
    ///
    /// # Errors
    ///
    /// As [`Walker::visit_extension`].
    pub fn visit_optional_extension<T: Flagarizer + Default>(
        &mut self,
        field: &FieldMeta,
        help_var: Option<&str>,
        slot: &'a mut Option<T>,
    ) -> FlagarizeResult<()> {
        let value = slot.get_or_insert_with(T::default);
        self.visit_extension(field, help_var, value)
    }

    /// Rejects an extension that can only be reached through a shared
    /// pointer.
    ///
    /// # Errors
    ///
    /// Always returns [`FlagarizeError::ExtensionReceiver`].
    pub fn reject_shared_extension(&mut self, field: &FieldMeta) -> FlagarizeResult<()> {
        Err(FlagarizeError::ExtensionReceiver {
            field: field.ident().to_owned(),
            type_name: field.type_name().to_owned(),
        })
    }

    /// Binds an annotated [`SetValue`] field to one flag.
    ///
    /// # Errors
    ///
    /// Returns annotation errors and registration errors.
    pub fn visit_setter<T: SetValue + ?Sized>(
        &mut self,
        field: &FieldMeta,
        help_var: Option<&str>,
        slot: &'a mut T,
    ) -> FlagarizeResult<()> {
        let Some(tag) = self.tag(field, help_var)? else {
            tracing::trace!(field = %self.field_path(field), "skipping unannotated setter");
            return Ok(());
        };
        tracing::debug!(field = %self.field_path(field), flag = %tag.name, "registering setter flag");
        tag.flag(&mut *self.registrar).set_value(slot)
    }

    /// Recurses into an unannotated nested struct.
    ///
    /// # Errors
    ///
    /// Returns [`FlagarizeError::UnsupportedType`] if the field is annotated,
    /// otherwise the first error raised inside the nested struct.
    pub fn visit_schema<S: Flagarize + ?Sized>(
        &mut self,
        field: &FieldMeta,
        slot: &'a mut S,
    ) -> FlagarizeResult<()> {
        if field.annotation().is_some() {
            return Err(unsupported(field));
        }
        self.descend(field, slot)
    }

    /// Walks a flattened struct as if its fields were declared on the parent.
    ///
    /// # Errors
    ///
    /// Returns the first error raised inside the embedded struct.
    pub fn visit_embedded<S: Flagarize + ?Sized>(
        &mut self,
        field: &FieldMeta,
        slot: &'a mut S,
    ) -> FlagarizeResult<()> {
        self.descend(field, slot)
    }

    /// Binds an annotated catalog leaf.
    ///
    /// # Errors
    ///
    /// Returns annotation errors, [`FlagarizeError::UnsupportedType`] when
    /// the catalog has no entry for `T`, and registration errors.
    pub fn visit_leaf<T: Any>(
        &mut self,
        field: &FieldMeta,
        help_var: Option<&str>,
        slot: &'a mut T,
    ) -> FlagarizeResult<()> {
        let Some(tag) = self.tag(field, help_var)? else {
            tracing::trace!(field = %self.field_path(field), "skipping unannotated field");
            return Ok(());
        };
        let strategy = self
            .catalog
            .lookup::<T>()
            .ok_or_else(|| unsupported(field))?;
        let value = strategy
            .bind(slot, self.options)
            .ok_or_else(|| unsupported(field))?;
        tracing::debug!(
            field = %self.field_path(field),
            index = field.index(),
            flag = %tag.name,
            kind = ?strategy.kind(),
            "registering flag"
        );
        tag.flag(&mut *self.registrar)
            .occurrence(strategy.occurrence())
            .bind(value)
    }

    /// Rejects `#[flagarize(flatten)]` on a field that is not a struct.
    ///
    /// # Errors
    ///
    /// Always returns [`FlagarizeError::NotAStruct`].
    pub fn reject_flatten(&mut self, field: &FieldMeta) -> FlagarizeResult<()> {
        Err(FlagarizeError::NotAStruct {
            field: field.ident().to_owned(),
            type_name: field.type_name().to_owned(),
        })
    }

    fn descend<S: Flagarize + ?Sized>(
        &mut self,
        field: &FieldMeta,
        slot: &'a mut S,
    ) -> FlagarizeResult<()> {
        tracing::trace!(
            field = %self.field_path(field),
            index = field.index(),
            "descending into struct"
        );
        self.path.push(field.ident());
        let result = slot.describe(self);
        self.path.pop();
        result
    }

    fn tag(&self, field: &FieldMeta, help_var: Option<&str>) -> FlagarizeResult<Option<Tag>> {
        let parsed = parse_tag(field, help_var, self.options.tag_separator())?;
        Ok(parsed.map(|tag| Tag {
            elem_separator: Some(self.options.elem_separator().to_owned()),
            ..tag
        }))
    }

    fn field_path(&self, field: &FieldMeta) -> String {
        self.path
            .iter()
            .copied()
            .chain(std::iter::once(field.ident()))
            .collect::<Vec<_>>()
            .join(".")
    }
}

fn unsupported(field: &FieldMeta) -> FlagarizeError {
    FlagarizeError::UnsupportedType {
        field: field.ident().to_owned(),
        type_name: field.type_name().to_owned(),
    }
}
