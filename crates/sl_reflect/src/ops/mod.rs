//! Kind-specific access to reflected values.
//!
//! ## Menu
//!
//! The following are subtraits of [`Reflect`], one per [`ReflectKind`]:
//!
//! - [`Struct`]: For records with named fields.
//! - [`List`]: For list-like (e.g. `Vec<i32>`).
//! - [`Array`]: For arrays (e.g. `[i32; 5]`).
//! - [`Map`]: For map-like (e.g. `BTreeMap<String, f32>`).
//! - [`Pointer`]: For nullable indirections (e.g. `Option<T>`, `Arc<T>`).
//!
//! Scalars are exposed as [`ScalarRef`] values, and everything is reached
//! through [`ReflectRef`].
//!
//! [`Reflect`]: crate::Reflect
//! [`ReflectKind`]: crate::info::ReflectKind

// -----------------------------------------------------------------------------
// Modules

mod array_ops;
mod kind;
mod list_ops;
mod map_ops;
mod pointer_ops;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use kind::{ReflectRef, ScalarRef};

pub use array_ops::{Array, ArrayItemIter};
pub use list_ops::{List, ListItemIter};
pub use map_ops::{Map, MapIter};
pub use pointer_ops::Pointer;
pub use struct_ops::{Struct, StructFieldIter};
