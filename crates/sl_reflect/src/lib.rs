//! Runtime shape discovery for `shapelog`.
//!
//! A value's *shape* is described by a static [`TypeInfo`](info::TypeInfo),
//! and its contents are reached through [`Reflect::reflect_ref`]:
//!
//! ```
//! use sl_reflect::{Reflect, derive::Reflect, info::Typed, ops::ReflectRef};
//!
//! #[derive(Reflect)]
//! pub struct Point {
//!     pub x: i32,
//!     #[reflect(rename = "why")]
//!     pub y: i32,
//! }
//!
//! let info = Point::type_info().as_struct().unwrap();
//! assert_eq!(info.field_at(1).unwrap().meta().rename(), Some("why"));
//!
//! let point = Point { x: 1, y: 2 };
//! let ReflectRef::Struct(s) = point.reflect_ref() else { unreachable!() };
//! assert_eq!(s.field("x").unwrap().downcast_ref::<i32>(), Some(&1));
//! ```
//!
//! ## Menu
//!
//! - [`Reflect`]: dynamic access to a value.
//! - [`info`]: static shape descriptions, `TypePath` and `Typed`.
//! - [`ops`]: the per-kind access traits (`Struct`, `List`, `Map`, ...).
//! - [`registry`]: the [`TypeRegistry`](registry::TypeRegistry) and capability type traits.
//! - [`impls`]: built-in implementations for std types.
//! - [`derive`]: `#[derive(Reflect)]`.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names this crate `sl_reflect`, also inside the crate itself.
extern crate self as sl_reflect;

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod impls;
pub mod info;
pub mod ops;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use reflection::Reflect;
pub use sl_reflect_derive as derive;
