//! Shared types describing how a value exposes itself to the dumper.
//!
//! [`Dump`] is the single capability a value needs. It reports a display type
//! name and a [`Shape`]: one variant out of a closed set covering scalars,
//! containers, structs and pointers, with [`Shape::Other`] as the fallback.

use std::borrow::Cow;
use std::fmt;

use crate::core::classify::short_type_name;

/// A value that can describe its own structure.
///
/// Implementations exist for the std scalars, strings, sequences, maps,
/// pointers and tuples, plus parsed JSON/TOML documents. Structs opt in with
/// [`dump_struct!`](crate::dump_struct) or a manual impl that lists their
/// fields, private ones included.
pub trait Dump {
    /// Display name of the concrete type, before any pointer is followed.
    fn type_name(&self) -> Cow<'static, str> {
        Cow::Owned(short_type_name(std::any::type_name::<Self>()))
    }

    /// Structural view of this value.
    fn shape(&self) -> Shape<'_>;

    /// Whether this type is the universal any-slot.
    ///
    /// Containers consult it for their element type to decide whether each
    /// child needs a `(ConcreteType)` annotation.
    fn is_erased() -> bool
    where
        Self: Sized,
    {
        false
    }
}

/// Structural category of a value, borrowed from the value itself.
pub enum Shape<'a> {
    Nil,
    Bool(bool),
    Int(i128),
    Uint(u128),
    Float(Float),
    Str(Cow<'a, str>),
    Chan(Chan),
    /// Function pointer address.
    Func(usize),
    Array(Seq<'a>),
    Slice(Seq<'a>),
    Map(MapShape<'a>),
    /// Fields in declaration order.
    Struct(Vec<Field<'a>>),
    /// A single level of indirection; `None` is a nil pointer.
    Pointer(Option<&'a dyn Dump>),
    /// Pre-formatted text for anything without a dedicated variant.
    Other(String),
}

impl Shape<'_> {
    /// Containers that expand into children (and may collapse to a placeholder).
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            Shape::Array(_) | Shape::Slice(_) | Shape::Map(_) | Shape::Struct(_)
        )
    }
}

/// Floating point payload, kept at its original width so `1.1f32` prints as `1.1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Float {
    F32(f32),
    F64(f64),
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Float::F32(v) => write!(f, "{v}"),
            Float::F64(v) => write!(f, "{v}"),
        }
    }
}

/// Channel identity and occupancy.
///
/// For tokio senders `addr` is the address of the `Sender` handle being
/// dumped, not of the shared channel: clones of one sender print different
/// addresses. tokio exposes no stable channel identity; compare handles with
/// `Sender::same_channel` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chan {
    pub addr: usize,
    pub len: usize,
    pub cap: usize,
}

/// Elements of an array or slice.
pub struct Seq<'a> {
    pub items: Vec<&'a dyn Dump>,
    pub cap: usize,
    /// Element slot type is the any-slot.
    pub erased: bool,
}

impl<'a> Seq<'a> {
    /// Build a sequence from concretely typed elements.
    pub fn of<T: Dump>(items: impl IntoIterator<Item = &'a T>, cap: usize) -> Self
    where
        T: 'a,
    {
        Seq {
            items: items.into_iter().map(|item| item as &dyn Dump).collect(),
            cap,
            erased: T::is_erased(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Entries of a map, in the map's iteration order.
pub struct MapShape<'a> {
    pub entries: Vec<(&'a dyn Dump, &'a dyn Dump)>,
    /// Key slot type is the any-slot. Never set by the std map impls, whose
    /// keys need `Ord` or `Hash`; manual impls may set it.
    pub key_erased: bool,
    pub value_erased: bool,
}

impl<'a> MapShape<'a> {
    pub fn of<K: Dump, V: Dump>(entries: impl IntoIterator<Item = (&'a K, &'a V)>) -> Self
    where
        K: 'a,
        V: 'a,
    {
        MapShape {
            entries: entries
                .into_iter()
                .map(|(key, value)| (key as &dyn Dump, value as &dyn Dump))
                .collect(),
            key_erased: K::is_erased(),
            value_erased: V::is_erased(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One named struct member.
pub struct Field<'a> {
    pub name: &'static str,
    pub value: &'a dyn Dump,
}

impl<'a> Field<'a> {
    pub fn new(name: &'static str, value: &'a dyn Dump) -> Self {
        Field { name, value }
    }
}
