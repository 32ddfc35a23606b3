//! Value classification: display type names, pointer unwrapping and kinds.

use std::borrow::Cow;

use crate::core::types::{Dump, Shape};

/// Structural category of a value, independent of its exact type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Nil,
    Bool,
    Int,
    Uint,
    Float,
    String,
    Chan,
    Func,
    Array,
    Slice,
    Map,
    Struct,
    Pointer,
    Other,
}

impl Kind {
    pub fn of(shape: &Shape<'_>) -> Kind {
        match shape {
            Shape::Nil => Kind::Nil,
            Shape::Bool(_) => Kind::Bool,
            Shape::Int(_) => Kind::Int,
            Shape::Uint(_) => Kind::Uint,
            Shape::Float(_) => Kind::Float,
            Shape::Str(_) => Kind::String,
            Shape::Chan(_) => Kind::Chan,
            Shape::Func(_) => Kind::Func,
            Shape::Array(_) => Kind::Array,
            Shape::Slice(_) => Kind::Slice,
            Shape::Map(_) => Kind::Map,
            Shape::Struct(_) => Kind::Struct,
            Shape::Pointer(_) => Kind::Pointer,
            Shape::Other(_) => Kind::Other,
        }
    }
}

/// A value after classification.
///
/// `type_name` belongs to the original value; `shape` belongs to whatever the
/// pointer chain ends at and is never [`Shape::Pointer`].
pub struct Normalized<'a> {
    pub type_name: Cow<'static, str>,
    pub shape: Shape<'a>,
}

impl Normalized<'_> {
    pub fn kind(&self) -> Kind {
        Kind::of(&self.shape)
    }
}

/// Classify `value`, following pointer indirections to the referent.
pub fn normalize(value: &dyn Dump) -> Normalized<'_> {
    Normalized {
        type_name: value.type_name(),
        shape: deref(value.shape()),
    }
}

/// Follow pointers until a non-pointer shape; a nil link anywhere yields [`Shape::Nil`].
pub fn deref(mut shape: Shape<'_>) -> Shape<'_> {
    loop {
        match shape {
            Shape::Pointer(Some(target)) => shape = target.shape(),
            Shape::Pointer(None) => return Shape::Nil,
            other => return other,
        }
    }
}

/// Strip module paths from a `std::any::type_name` string.
///
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>` and
/// `dyn vardump::core::types::Dump` becomes `dyn Dump`.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    // Start of the path segment currently being copied.
    let mut segment = 0;
    let mut chars = full.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            out.truncate(segment);
            continue;
        }
        out.push(c);
        if !(c.is_alphanumeric() || c == '_') {
            segment = out.len();
        }
    }
    out
}
