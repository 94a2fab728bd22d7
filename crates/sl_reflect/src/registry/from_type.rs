use crate::info::Typed;

/// Creates a type trait for the type `T`.
///
/// # Examples
///
/// ```
/// use sl_reflect::{info::Typed, registry::FromType};
///
/// #[derive(Clone)]
/// struct TypeName(&'static str);
///
/// impl<T: Typed> FromType<T> for TypeName {
///     fn from_type() -> Self {
///         TypeName(T::type_path())
///     }
/// }
///
/// let name = <TypeName as FromType<u8>>::from_type();
/// assert_eq!(name.0, "u8");
/// ```
pub trait FromType<T: Typed> {
    /// Creates an instance of `Self` for type `T`.
    fn from_type() -> Self;
}
