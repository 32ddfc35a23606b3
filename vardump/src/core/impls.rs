//! [`Dump`] implementations for std types (and tokio channels).

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::core::classify::short_type_name;
use crate::core::types::{Chan, Dump, Field, Float, MapShape, Seq, Shape};

macro_rules! impl_signed {
    ($($ty:ty),*) => {$(
        impl Dump for $ty {
            fn shape(&self) -> Shape<'_> {
                Shape::Int(*self as i128)
            }
        }
    )*};
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {$(
        impl Dump for $ty {
            fn shape(&self) -> Shape<'_> {
                Shape::Uint(*self as u128)
            }
        }
    )*};
}

impl_signed!(i8, i16, i32, i64, i128, isize);
impl_unsigned!(u8, u16, u32, u64, u128, usize);

impl Dump for f32 {
    fn shape(&self) -> Shape<'_> {
        Shape::Float(Float::F32(*self))
    }
}

impl Dump for f64 {
    fn shape(&self) -> Shape<'_> {
        Shape::Float(Float::F64(*self))
    }
}

impl Dump for bool {
    fn shape(&self) -> Shape<'_> {
        Shape::Bool(*self)
    }
}

impl Dump for String {
    fn shape(&self) -> Shape<'_> {
        Shape::Str(Cow::Borrowed(self.as_str()))
    }
}

impl Dump for &str {
    fn shape(&self) -> Shape<'_> {
        Shape::Str(Cow::Borrowed(*self))
    }
}

impl Dump for PathBuf {
    fn shape(&self) -> Shape<'_> {
        Shape::Str(self.to_string_lossy())
    }
}

impl Dump for char {
    fn shape(&self) -> Shape<'_> {
        Shape::Other(format!("{self:?}"))
    }
}

impl Dump for () {
    fn shape(&self) -> Shape<'_> {
        Shape::Other("()".to_string())
    }
}

impl Dump for Duration {
    fn shape(&self) -> Shape<'_> {
        Shape::Other(format!("{self:?}"))
    }
}

impl<T: ?Sized> Dump for *const T {
    fn shape(&self) -> Shape<'_> {
        Shape::Other(format!("{:p}", *self))
    }
}

impl<T: ?Sized> Dump for *mut T {
    fn shape(&self) -> Shape<'_> {
        Shape::Other(format!("{:p}", *self))
    }
}

// Pointer-like wrappers. `None` is the nil pointer.

impl<T: Dump> Dump for Option<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Pointer(self.as_ref().map(|value| value as &dyn Dump))
    }
}

impl<T: Dump> Dump for Box<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Pointer(Some(&**self as &dyn Dump))
    }
}

impl<T: Dump> Dump for Rc<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Pointer(Some(&**self as &dyn Dump))
    }
}

impl<T: Dump> Dump for Arc<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Pointer(Some(&**self as &dyn Dump))
    }
}

impl<T: Dump> Dump for &T {
    fn shape(&self) -> Shape<'_> {
        Shape::Pointer(Some(*self as &dyn Dump))
    }
}

// Any-slots are transparent: they report what they hold.

impl Dump for Box<dyn Dump> {
    fn type_name(&self) -> Cow<'static, str> {
        (**self).type_name()
    }

    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }

    fn is_erased() -> bool {
        true
    }
}

impl Dump for &dyn Dump {
    fn type_name(&self) -> Cow<'static, str> {
        (**self).type_name()
    }

    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }

    fn is_erased() -> bool {
        true
    }
}

// Sequences.

impl<T: Dump, const N: usize> Dump for [T; N] {
    fn shape(&self) -> Shape<'_> {
        Shape::Array(Seq::of(self.iter(), N))
    }
}

impl<T: Dump> Dump for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Slice(Seq::of(self.iter(), self.capacity()))
    }
}

impl<T: Dump> Dump for VecDeque<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Slice(Seq::of(self.iter(), self.capacity()))
    }
}

impl<T: Dump> Dump for &[T] {
    fn shape(&self) -> Shape<'_> {
        Shape::Slice(Seq::of(self.iter(), self.len()))
    }
}

// Maps, in iteration order.

impl<K: Dump, V: Dump, S> Dump for HashMap<K, V, S> {
    fn type_name(&self) -> Cow<'static, str> {
        // Leave the hasher out of the name.
        Cow::Owned(format!(
            "HashMap<{}, {}>",
            short_type_name(std::any::type_name::<K>()),
            short_type_name(std::any::type_name::<V>())
        ))
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Map(MapShape::of(self.iter()))
    }
}

impl<K: Dump, V: Dump> Dump for BTreeMap<K, V> {
    fn shape(&self) -> Shape<'_> {
        Shape::Map(MapShape::of(self.iter()))
    }
}

// Tuples render as structs with positional field names.

macro_rules! impl_tuple {
    ($(($($idx:tt $name:ident),+))+) => {$(
        impl<$($name: Dump),+> Dump for ($($name,)+) {
            fn shape(&self) -> Shape<'_> {
                Shape::Struct(vec![$(Field::new(stringify!($idx), &self.$idx)),+])
            }
        }
    )+};
}

impl_tuple! {
    (0 A)
    (0 A, 1 B)
    (0 A, 1 B, 2 C)
    (0 A, 1 B, 2 C, 3 D)
}

macro_rules! impl_fn {
    ($(($($arg:ident),*))+) => {$(
        impl<R, $($arg),*> Dump for fn($($arg),*) -> R {
            fn shape(&self) -> Shape<'_> {
                Shape::Func(*self as usize)
            }
        }
    )+};
}

impl_fn! {
    ()
    (A)
    (A, B)
}

impl<T> Dump for mpsc::Sender<T> {
    fn shape(&self) -> Shape<'_> {
        let cap = self.max_capacity();
        Shape::Chan(Chan {
            addr: std::ptr::from_ref(self).addr(),
            len: cap.saturating_sub(self.capacity()),
            cap,
        })
    }
}
