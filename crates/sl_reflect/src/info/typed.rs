use crate::info::{TypeInfo, TypePath};

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to compile-time type information.
///
/// Implemented by [`#[derive(Reflect)]`](crate::derive::Reflect) and by this
/// crate for the supported std types.
///
/// For manual implementations, [`NonGenericTypeInfoCell`] and
/// [`GenericTypeInfoCell`] keep the info in static storage.
///
/// ```
/// use sl_reflect::derive::Reflect;
/// use sl_reflect::info::{Typed, TypeInfo};
///
/// #[derive(Reflect)]
/// struct A {
///     pub id: u32,
/// }
///
/// let info: &'static TypeInfo = <A as Typed>::type_info();
/// assert_eq!(info.as_struct().unwrap().field_len(), 1);
/// ```
///
/// [`NonGenericTypeInfoCell`]: crate::impls::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::impls::GenericTypeInfoCell
pub trait Typed: TypePath {
    /// Returns the static type information.
    fn type_info() -> &'static TypeInfo;
}
