use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::Reflect;
use crate::info::Typed;
use crate::registry::FromType;

/// The error type returned by custom marshalers.
pub type BoxError = Box<dyn core::error::Error + Send + Sync>;

// -----------------------------------------------------------------------------
// Capabilities

/// A type that renders itself as a complete encoded value.
///
/// The returned bytes are validated and compacted before being written, so
/// whitespace is allowed. Errors are reported as marshaler failures that
/// name the type.
pub trait MarshalJson {
    /// Produces the encoded form of `self`.
    fn marshal_json(&self) -> Result<Vec<u8>, BoxError>;
}

/// A type that renders itself as text.
///
/// The text is always written as a quoted, escaped string. When such a type
/// is used as a map key, the text becomes the key.
pub trait MarshalText {
    /// Produces the textual form of `self`.
    fn marshal_text(&self) -> Result<String, BoxError>;
}

fn mismatch<T: Typed>(value: &dyn Reflect) -> BoxError {
    format!(
        "type trait of `{}` called with a value of `{}`",
        T::type_path(),
        value.reflect_type_path(),
    )
    .into()
}

// -----------------------------------------------------------------------------
// TypeTraitMarshalJson

/// Registry entry giving access to a type's [`MarshalJson`] implementation.
///
/// # Examples
///
/// ```
/// use sl_reflect::{derive::Reflect, Reflect};
/// use sl_reflect::registry::{BoxError, MarshalJson, TypeRegistry, TypeTraitMarshalJson};
///
/// #[derive(Reflect)]
/// #[reflect(opaque, marshal_json)]
/// struct Raw(&'static str);
///
/// impl MarshalJson for Raw {
///     fn marshal_json(&self) -> Result<Vec<u8>, BoxError> {
///         Ok(self.0.as_bytes().to_vec())
///     }
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Raw>();
///
/// let value = Raw("[1, 2]");
/// let marshal = registry.get_type_trait::<TypeTraitMarshalJson>(value.ty_id()).unwrap();
/// assert_eq!(marshal.marshal_json(&value).unwrap(), b"[1, 2]");
/// assert!(marshal.marshal_json(&5_u8).is_err());
/// ```
#[derive(Clone)]
pub struct TypeTraitMarshalJson {
    fun: fn(value: &dyn Reflect) -> Result<Vec<u8>, BoxError>,
}

impl<T: MarshalJson + Typed + Reflect> FromType<T> for TypeTraitMarshalJson {
    fn from_type() -> Self {
        Self {
            fun: |value| match value.downcast_ref::<T>() {
                Some(val) => val.marshal_json(),
                None => Err(mismatch::<T>(value)),
            },
        }
    }
}

impl TypeTraitMarshalJson {
    /// Calls the type's [`MarshalJson`] on `value`.
    ///
    /// A value of another type yields an error.
    #[inline(always)]
    pub fn marshal_json(&self, value: &dyn Reflect) -> Result<Vec<u8>, BoxError> {
        (self.fun)(value)
    }
}

// -----------------------------------------------------------------------------
// TypeTraitMarshalText

/// Registry entry giving access to a type's [`MarshalText`] implementation.
#[derive(Clone)]
pub struct TypeTraitMarshalText {
    fun: fn(value: &dyn Reflect) -> Result<String, BoxError>,
}

impl<T: MarshalText + Typed + Reflect> FromType<T> for TypeTraitMarshalText {
    fn from_type() -> Self {
        Self {
            fun: |value| match value.downcast_ref::<T>() {
                Some(val) => val.marshal_text(),
                None => Err(mismatch::<T>(value)),
            },
        }
    }
}

impl TypeTraitMarshalText {
    /// Calls the type's [`MarshalText`] on `value`.
    ///
    /// A value of another type yields an error.
    #[inline(always)]
    pub fn marshal_text(&self, value: &dyn Reflect) -> Result<String, BoxError> {
        (self.fun)(value)
    }
}
