//! Compile-time type information.
//!
//! ## Menu
//!
//! - [`TypePath`]: A trait for obtaining type names, without prefix `::`.
//! - [`TypePathTable`]: Function pointers to a type's `TypePath` implementation.
//! - [`Type`]: A `TypeId` paired with a `TypePathTable`.
//! - [`TypeInfo`]: The static shape of a type, one of:
//!     - [`StructInfo`]: records with named fields and their [`FieldMeta`].
//!     - [`ListInfo`]: growable sequences like `Vec<T>`.
//!     - [`ArrayInfo`]: fixed-length arrays `[T; N]`.
//!     - [`MapInfo`]: key/value maps like `BTreeMap<K, V>`.
//!     - [`PointerInfo`]: nullable indirections like `Option<T>` and `Box<T>`.
//!     - [`ScalarInfo`]: booleans, numbers, characters and strings.
//!     - [`OpaqueInfo`]: types without inspectable content.
//! - [`ReflectKind`]: The kind discriminator of a `TypeInfo`.
//! - [`Typed`]: A trait for obtaining `TypeInfo` data.

// -----------------------------------------------------------------------------
// Modules

mod array_info;
mod field_info;
mod list_info;
mod map_info;
mod opaque_info;
mod pointer_info;
mod scalar_info;
mod struct_info;
mod type_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use type_path::impl_type_fn;

// -----------------------------------------------------------------------------
// Exports

pub use array_info::ArrayInfo;
pub use field_info::{FieldFlags, FieldMeta, NamedField};
pub use list_info::ListInfo;
pub use map_info::MapInfo;
pub use opaque_info::OpaqueInfo;
pub use pointer_info::PointerInfo;
pub use scalar_info::{ScalarInfo, ScalarKind};
pub use struct_info::StructInfo;
pub use type_info::{ReflectKind, ReflectKindError, TypeInfo};
pub use type_path::{Type, TypePath, TypePathTable};
pub use typed::Typed;
