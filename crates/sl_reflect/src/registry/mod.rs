//! Type registry for capability lookup.
//!
//! ## Menu
//!
//! - [`TypeTrait`]: A capability supported by a type.
//! - [`FromType`]: Creates a `TypeTrait` from a type.
//! - [`TypeMeta`]: A [`TypeInfo`] plus a table of [`TypeTrait`]s.
//! - [`GetTypeMeta`]: Creates the `TypeMeta` of a type.
//! - [`TypeRegistry`]: Stores `TypeMeta`s by `TypeId` and type path.
//! - [`TypeRegistryArc`]: A shared, lock-protected `TypeRegistry`.
//! - Capabilities:
//!     - [`MarshalJson`] / [`TypeTraitMarshalJson`]: custom encoded output.
//!     - [`MarshalText`] / [`TypeTraitMarshalText`]: custom text output.
//!
//! ## auto_register
//!
//! See [`TypeRegistry::auto_register`]. Static registration uses the
//! [`inventory`](https://docs.rs/inventory) crate. On platforms it does not
//! support, `auto_register` returns `false` instead of failing.
//!
//! [`TypeInfo`]: crate::info::TypeInfo

// -----------------------------------------------------------------------------
// Modules

mod from_type;
mod traits;
mod type_meta;
mod type_registry;
mod type_trait;

// -----------------------------------------------------------------------------
// Exports

pub use from_type::FromType;
pub use traits::{BoxError, MarshalJson, MarshalText};
pub use traits::{TypeTraitMarshalJson, TypeTraitMarshalText};
pub use type_meta::{GetTypeMeta, TypeMeta};
pub use type_registry::{TypeRegistry, TypeRegistryArc};
pub use type_trait::TypeTrait;
