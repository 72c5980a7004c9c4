//! Compile-time dispatch used by `#[derive(Flagarize)]`.
//!
//! Every field is classified by calling `flagarize_kind` on a stack of
//! references to `Probe<FieldType>`. Method resolution strips one reference
//! per step and picks the first trait whose bounds the field type meets, so
//! the number of `&` in each impl below sets its priority. The returned kind
//! then routes the field to the matching [`Walker`] method.

use std::any::Any;
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::FlagarizeResult;
use crate::extension::{Flagarizer, SetValue};
use crate::tag::FieldMeta;
use crate::walker::{Flagarize, Walker};

/// Zero-sized witness of a field type.
pub struct Probe<T>(PhantomData<T>);

impl<T> Probe<T> {
    /// Creates the witness.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Probe<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Field implements [`Flagarizer`].
pub trait ExtensionProbe {
    /// Classifies the field.
    fn flagarize_kind(&self) -> ExtensionKind {
        ExtensionKind
    }
}

impl<T: Flagarizer> ExtensionProbe for &&&&&Probe<T> {}

/// Field is an `Option` of a defaultable [`Flagarizer`].
pub trait OptionalExtensionProbe {
    /// Classifies the field.
    fn flagarize_kind(&self) -> OptionalExtensionKind {
        OptionalExtensionKind
    }
}

impl<T: Flagarizer + Default> OptionalExtensionProbe for &&&&Probe<Option<T>> {}

/// Field holds a [`Flagarizer`] behind a shared pointer.
pub trait SharedExtensionProbe {
    /// Classifies the field.
    fn flagarize_kind(&self) -> SharedExtensionKind {
        SharedExtensionKind
    }
}

impl<T: Flagarizer + ?Sized> SharedExtensionProbe for &&&Probe<Arc<T>> {}
impl<T: Flagarizer + ?Sized> SharedExtensionProbe for &&&Probe<Rc<T>> {}

/// Field implements [`SetValue`].
pub trait SetterProbe {
    /// Classifies the field.
    fn flagarize_kind(&self) -> SetterKind {
        SetterKind
    }
}

impl<T: SetValue> SetterProbe for &&Probe<T> {}

/// Field is a nested [`Flagarize`] struct.
pub trait SchemaProbe {
    /// Classifies the field.
    fn flagarize_kind(&self) -> SchemaKind {
        SchemaKind
    }
}

impl<T: Flagarize> SchemaProbe for &Probe<T> {}

/// Anything else; resolved against the catalog at walk time.
pub trait LeafProbe {
    /// Classifies the field.
    fn flagarize_kind(&self) -> CatalogKind {
        CatalogKind
    }
}

impl<T> LeafProbe for Probe<T> {}

/// Dispatches to [`Walker::visit_extension`].
#[derive(Debug, Clone, Copy)]
pub struct ExtensionKind;

impl ExtensionKind {
    /// Visits a regular field.
    ///
    /// # Errors
    ///
    /// Propagates the walker's error.
    pub fn visit<'a, T: Flagarizer>(
        self,
        walker: &mut Walker<'a, '_>,
        field: &FieldMeta,
        help_var: Option<&str>,
        slot: &'a mut T,
    ) -> FlagarizeResult<()> {
        walker.visit_extension(field, help_var, slot)
    }

    /// Visits a flattened field; extensions still take over.
    ///
    /// # Errors
    ///
    /// Propagates the walker's error.
    pub fn flatten<'a, T: Flagarizer>(
        self,
        walker: &mut Walker<'a, '_>,
        field: &FieldMeta,
        slot: &'a mut T,
    ) -> FlagarizeResult<()> {
        walker.visit_extension(field, None, slot)
    }
}

/// Dispatches to [`Walker::visit_optional_extension`].
#[derive(Debug, Clone, Copy)]
pub struct OptionalExtensionKind;

impl OptionalExtensionKind {
    /// Visits a regular field.
    ///
    /// # Errors
    ///
    /// Propagates the walker's error.
    pub fn visit<'a, T: Flagarizer + Default>(
        self,
        walker: &mut Walker<'a, '_>,
        field: &FieldMeta,
        help_var: Option<&str>,
        slot: &'a mut Option<T>,
    ) -> FlagarizeResult<()> {
        walker.visit_optional_extension(field, help_var, slot)
    }

    /// Visits a flattened field; extensions still take over.
    ///
    /// # Errors
    ///
    /// Propagates the walker's error.
    pub fn flatten<'a, T: Flagarizer + Default>(
        self,
        walker: &mut Walker<'a, '_>,
        field: &FieldMeta,
        slot: &'a mut Option<T>,
    ) -> FlagarizeResult<()> {
        walker.visit_optional_extension(field, None, slot)
    }
}

/// Dispatches to [`Walker::reject_shared_extension`].
#[derive(Debug, Clone, Copy)]
pub struct SharedExtensionKind;

impl SharedExtensionKind {
    /// Visits a regular field.
    ///
    /// # Errors
    ///
    /// Always fails.
    pub fn visit<T: ?Sized>(
        self,
        walker: &mut Walker<'_, '_>,
        field: &FieldMeta,
        _help_var: Option<&str>,
        _slot: &mut T,
    ) -> FlagarizeResult<()> {
        walker.reject_shared_extension(field)
    }

    /// Visits a flattened field.
    ///
    /// # Errors
    ///
    /// Always fails.
    pub fn flatten<T: ?Sized>(
        self,
        walker: &mut Walker<'_, '_>,
        field: &FieldMeta,
        _slot: &mut T,
    ) -> FlagarizeResult<()> {
        walker.reject_shared_extension(field)
    }
}

/// Dispatches to [`Walker::visit_setter`].
#[derive(Debug, Clone, Copy)]
pub struct SetterKind;

impl SetterKind {
    /// Visits a regular field.
    ///
    /// # Errors
    ///
    /// Propagates the walker's error.
    pub fn visit<'a, T: SetValue>(
        self,
        walker: &mut Walker<'a, '_>,
        field: &FieldMeta,
        help_var: Option<&str>,
        slot: &'a mut T,
    ) -> FlagarizeResult<()> {
        walker.visit_setter(field, help_var, slot)
    }

    /// Visits a flattened field.
    ///
    /// # Errors
    ///
    /// Always fails; setters are not structs.
    pub fn flatten<T>(
        self,
        walker: &mut Walker<'_, '_>,
        field: &FieldMeta,
        _slot: &mut T,
    ) -> FlagarizeResult<()> {
        walker.reject_flatten(field)
    }
}

/// Dispatches to [`Walker::visit_schema`] and [`Walker::visit_embedded`].
#[derive(Debug, Clone, Copy)]
pub struct SchemaKind;

impl SchemaKind {
    /// Visits a regular field.
    ///
    /// # Errors
    ///
    /// Propagates the walker's error.
    pub fn visit<'a, T: Flagarize>(
        self,
        walker: &mut Walker<'a, '_>,
        field: &FieldMeta,
        _help_var: Option<&str>,
        slot: &'a mut T,
    ) -> FlagarizeResult<()> {
        walker.visit_schema(field, slot)
    }

    /// Visits a flattened field.
    ///
    /// # Errors
    ///
    /// Propagates the walker's error.
    pub fn flatten<'a, T: Flagarize>(
        self,
        walker: &mut Walker<'a, '_>,
        field: &FieldMeta,
        slot: &'a mut T,
    ) -> FlagarizeResult<()> {
        walker.visit_embedded(field, slot)
    }
}

/// Dispatches to [`Walker::visit_leaf`].
#[derive(Debug, Clone, Copy)]
pub struct CatalogKind;

impl CatalogKind {
    /// Visits a regular field.
    ///
    /// # Errors
    ///
    /// Propagates the walker's error.
    pub fn visit<'a, T: Any>(
        self,
        walker: &mut Walker<'a, '_>,
        field: &FieldMeta,
        help_var: Option<&str>,
        slot: &'a mut T,
    ) -> FlagarizeResult<()> {
        walker.visit_leaf(field, help_var, slot)
    }

    /// Visits a flattened field.
    ///
    /// # Errors
    ///
    /// Always fails; only structs can be flattened.
    pub fn flatten<T>(
        self,
        walker: &mut Walker<'_, '_>,
        field: &FieldMeta,
        _slot: &mut T,
    ) -> FlagarizeResult<()> {
        walker.reject_flatten(field)
    }
}
