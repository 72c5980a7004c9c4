//! Registry mapping supported leaf types to binding strategies.
//!
//! The standard [`Catalog`] is built once per process and is read-only
//! afterwards. Lookup is by [`TypeId`], so only `'static` field types can be
//! catalog leaves.

mod parse;
mod units;

use std::any::{Any, TypeId, type_name};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::net::{IpAddr, SocketAddr};
use std::sync::LazyLock;
use std::time::Duration;

use url::Url;

pub use parse::{FlagParse, ValueError};
pub(crate) use parse::parse_bool_literal;
pub use units::ByteSize;

use crate::extension::SetValue;
use crate::options::Options;
use crate::registrar::{Mapping, Occurrence, Optional, Repeated, Single, StringMap};

/// Binds a type-erased field to a value sink, or returns `None` when the
/// field is not of the strategy's type.
pub type Binder =
    for<'a> fn(&'a mut (dyn Any + 'static), &Options) -> Option<Box<dyn SetValue + 'a>>;

/// Family a catalog entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum LeafKind {
    /// `bool`.
    Bool,
    /// `String`.
    String,
    /// Signed integers.
    Int,
    /// Unsigned integers.
    Uint,
    /// `f32` and `f64`.
    Float,
    /// [`ByteSize`].
    ByteSize,
    /// [`Duration`].
    Duration,
    /// [`IpAddr`].
    IpAddr,
    /// [`SocketAddr`].
    SocketAddr,
    /// [`Url`].
    Url,
    /// A file opened for reading.
    File,
    /// `key=value` string maps.
    StringMap,
}

/// How a catalog entry registers and binds its field.
#[derive(Debug, Clone, Copy)]
pub struct Strategy {
    kind: LeafKind,
    occurrence: Occurrence,
    type_name: &'static str,
    binder: Binder,
}

impl Strategy {
    /// Family of the bound type.
    #[must_use]
    pub const fn kind(&self) -> LeafKind {
        self.kind
    }

    /// Arity of the registered flag.
    #[must_use]
    pub const fn occurrence(&self) -> Occurrence {
        self.occurrence
    }

    /// Fully qualified name of the bound type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Wraps `slot` in a value sink.
    ///
    /// Returns `None` when `slot` is not of the type this strategy was
    /// registered for.
    #[must_use]
    pub fn bind<'a>(
        &self,
        slot: &'a mut (dyn Any + 'static),
        options: &Options,
    ) -> Option<Box<dyn SetValue + 'a>> {
        (self.binder)(slot, options)
    }
}

/// Immutable registry of leaf strategies keyed by [`TypeId`].
///
/// # Examples
///
/// ```
/// use flagarize::{Catalog, LeafKind, Occurrence};
///
/// let strategy = Catalog::standard().lookup::<Vec<u16>>().unwrap();
/// assert_eq!(strategy.kind(), LeafKind::Uint);
/// assert_eq!(strategy.occurrence(), Occurrence::Repeated);
/// assert!(Catalog::standard().lookup::<Option<String>>().is_none());
/// ```
#[derive(Debug)]
pub struct Catalog {
    strategies: HashMap<TypeId, Strategy>,
}

static STANDARD: LazyLock<Catalog> = LazyLock::new(Catalog::build);

macro_rules! register_leaves {
    ($catalog:ident, $kind:expr => $($ty:ty),+ $(,)?) => {
        $(
            $catalog.singular::<$ty>($kind);
            $catalog.repeated::<$ty>($kind);
        )+
    };
}

macro_rules! register_optional_leaves {
    ($catalog:ident, $kind:expr => $($ty:ty),+ $(,)?) => {
        $(
            $catalog.optional::<$ty>($kind);
            $catalog.repeated::<$ty>($kind);
        )+
    };
}

impl Catalog {
    /// The process-wide catalog of built-in leaf types.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Strategy for `T`, if `T` is a supported leaf.
    #[must_use]
    pub fn lookup<T: Any>(&self) -> Option<&Strategy> {
        self.lookup_id(TypeId::of::<T>())
    }

    /// Strategy for the type identified by `id`.
    #[must_use]
    pub fn lookup_id(&self, id: TypeId) -> Option<&Strategy> {
        self.strategies.get(&id)
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Whether no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Iterates over every registered strategy in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &Strategy)> {
        self.strategies.iter().map(|(id, strategy)| (*id, strategy))
    }

    fn build() -> Self {
        let mut catalog = Self {
            strategies: HashMap::new(),
        };
        catalog.insert::<bool>(LeafKind::Bool, Occurrence::Switch, bind_single::<bool>);
        catalog.repeated::<bool>(LeafKind::Bool);
        register_leaves!(catalog, LeafKind::String => String);
        register_leaves!(catalog, LeafKind::Int => i8, i16, i32, i64, isize);
        register_leaves!(catalog, LeafKind::Uint => u8, u16, u32, u64, usize);
        register_leaves!(catalog, LeafKind::Float => f32, f64);
        register_leaves!(catalog, LeafKind::ByteSize => ByteSize);
        register_leaves!(catalog, LeafKind::Duration => Duration);
        register_optional_leaves!(catalog, LeafKind::IpAddr => IpAddr);
        register_optional_leaves!(catalog, LeafKind::SocketAddr => SocketAddr);
        register_optional_leaves!(catalog, LeafKind::Url => Url);
        register_optional_leaves!(catalog, LeafKind::File => File);
        catalog.mapping::<HashMap<String, String>>();
        catalog.mapping::<BTreeMap<String, String>>();
        catalog
    }

    fn insert<T: Any>(&mut self, kind: LeafKind, occurrence: Occurrence, binder: Binder) {
        self.strategies.insert(
            TypeId::of::<T>(),
            Strategy {
                kind,
                occurrence,
                type_name: type_name::<T>(),
                binder,
            },
        );
    }

    fn singular<T: FlagParse + Any>(&mut self, kind: LeafKind) {
        self.insert::<T>(kind, Occurrence::Single, bind_single::<T>);
    }

    fn optional<T: FlagParse + Any>(&mut self, kind: LeafKind) {
        self.insert::<Option<T>>(kind, Occurrence::Single, bind_optional::<T>);
    }

    fn repeated<T: FlagParse + Any>(&mut self, kind: LeafKind) {
        self.insert::<Vec<T>>(kind, Occurrence::Repeated, bind_repeated::<T>);
    }

    fn mapping<M: StringMap + Any>(&mut self) {
        self.insert::<M>(LeafKind::StringMap, Occurrence::Repeated, bind_mapping::<M>);
    }
}

fn bind_single<'a, T: FlagParse + Any>(
    slot: &'a mut (dyn Any + 'static),
    _options: &Options,
) -> Option<Box<dyn SetValue + 'a>> {
    let target = slot.downcast_mut::<T>()?;
    Some(Box::new(Single::new(target)))
}

fn bind_optional<'a, T: FlagParse + Any>(
    slot: &'a mut (dyn Any + 'static),
    _options: &Options,
) -> Option<Box<dyn SetValue + 'a>> {
    let target = slot.downcast_mut::<Option<T>>()?;
    Some(Box::new(Optional::new(target)))
}

fn bind_repeated<'a, T: FlagParse + Any>(
    slot: &'a mut (dyn Any + 'static),
    options: &Options,
) -> Option<Box<dyn SetValue + 'a>> {
    let target = slot.downcast_mut::<Vec<T>>()?;
    let separator = options.elem_separator().to_owned();
    Some(Box::new(Repeated::new(target, separator)))
}

fn bind_mapping<'a, M: StringMap + Any>(
    slot: &'a mut (dyn Any + 'static),
    options: &Options,
) -> Option<Box<dyn SetValue + 'a>> {
    let target = slot.downcast_mut::<M>()?;
    let separator = options.elem_separator().to_owned();
    Some(Box::new(Mapping::new(target, separator)))
}
