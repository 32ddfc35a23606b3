//! Structural value inspector for interactive debugging.
//!
//! Given one or more values, `vardump` prints a deterministic, indented
//! description exposing each value's concrete type, nested structure and data.
//! The crate is split the same way the rendering pipeline is:
//!
//! - **[`core`]**: Pure, deterministic logic. The [`Dump`] capability trait,
//!   the classifier that normalizes a value into a [`Shape`], and the
//!   depth-bounded renderer. No I/O.
//! - **[`io`]**: Side-effecting collaborators (scratch buffer pool, output
//!   sinks, process termination, configuration files).
//! - **[`session`]**: The façade tying both together: numbers the values,
//!   renders them into a pooled buffer and flushes it to the sink in one write.
//!
//! ```
//! use vardump::{DumpConfig, render};
//!
//! let out = render(&vec![1, 2], &DumpConfig::default());
//! assert_eq!(out, "Vec<i32>\n  (len=2, cap=2)[1, 2]");
//! ```

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use crate::core::classify::{Kind, Normalized, normalize, short_type_name};
pub use crate::core::render::{Renderer, render};
pub use crate::core::types::{Chan, Dump, Field, Float, MapShape, Seq, Shape};
pub use crate::error::DumpError;
pub use crate::io::config::DumpConfig;
pub use crate::io::terminate::{ProcessExit, Terminate};
pub use crate::session::{Dumper, configure, dump, dump_and_exit, reset};

/// Dump every argument through the process-wide [`Dumper`].
///
/// ```no_run
/// let retries = 3;
/// vardump::dump!(retries, "label", vec![1.5, 2.5]);
/// ```
#[macro_export]
macro_rules! dump {
    ($($value:expr),* $(,)?) => {
        $crate::dump(&[$(&$value as &dyn $crate::Dump),*])
    };
}

/// Dump every argument, then invoke the configured termination hook.
#[macro_export]
macro_rules! dd {
    ($($value:expr),* $(,)?) => {
        $crate::dump_and_exit(&[$(&$value as &dyn $crate::Dump),*])
    };
}

/// Implement [`Dump`] for a struct by listing its fields.
///
/// The expansion lives in the caller's module, so private fields can be
/// listed alongside public ones. Fields render in the order given. Type
/// parameters are accepted and each one is bounded by [`Dump`]; structs with
/// lifetime parameters need a manual impl.
///
/// ```
/// struct Session {
///     pub user: String,
///     token: u64,
/// }
///
/// vardump::dump_struct!(Session { user, token });
///
/// let out = vardump::render(
///     &Session { user: "ada".into(), token: 7 },
///     &vardump::DumpConfig::default(),
/// );
/// assert!(out.contains("token : (u64) 7"));
/// ```
#[macro_export]
macro_rules! dump_struct {
    ($name:ident $(<$($param:ident),+ $(,)?>)? { $($field:ident),* $(,)? }) => {
        impl$(<$($param: $crate::Dump),+>)? $crate::Dump for $name$(<$($param),+>)? {
            fn shape(&self) -> $crate::Shape<'_> {
                $crate::Shape::Struct(vec![
                    $($crate::Field::new(stringify!($field), &self.$field)),*
                ])
            }
        }
    };
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::Dump for $ty {
            fn shape(&self) -> $crate::Shape<'_> {
                $crate::Shape::Struct(vec![
                    $($crate::Field::new(stringify!($field), &self.$field)),*
                ])
            }
        }
    };
}
