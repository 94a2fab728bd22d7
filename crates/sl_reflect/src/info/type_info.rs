use core::{error, fmt};

use crate::info::{ArrayInfo, ListInfo, MapInfo};
use crate::info::{OpaqueInfo, PointerInfo, ScalarInfo, StructInfo, Type};

// -----------------------------------------------------------------------------
// ReflectKind

/// An enumeration of the "kinds" of a reflected type.
///
/// Each kind corresponds to one way the encoder can render a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    /// A record with named fields.
    Struct,
    /// A growable sequence, may be absent.
    List,
    /// A fixed-length sequence.
    Array,
    /// A key/value map, may be absent.
    Map,
    /// A nullable indirection.
    Pointer,
    /// A primitive: boolean, number, character or string.
    Scalar,
    /// A type with no inspectable content.
    Opaque,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct => f.pad("Struct"),
            Self::List => f.pad("List"),
            Self::Array => f.pad("Array"),
            Self::Map => f.pad("Map"),
            Self::Pointer => f.pad("Pointer"),
            Self::Scalar => f.pad("Scalar"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}

/// Error returned when a `TypeInfo` value is not the expected `ReflectKind`.
#[derive(Debug)]
pub struct ReflectKindError {
    pub expected: ReflectKind,
    pub received: ReflectKind,
}

impl fmt::Display for ReflectKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reflect kind mismatch: expected {}, received {}",
            self.expected, self.received
        )
    }
}

impl error::Error for ReflectKindError {}

// -----------------------------------------------------------------------------
// TypeInfo

/// Static shape information of a reflected type.
///
/// A `TypeInfo` is created once per type and lives for the rest of the
/// program. It is obtained through [`Typed::type_info`] or
/// [`Reflect::reflect_type_info`].
///
/// # Examples
///
/// ```
/// use sl_reflect::info::{Typed, ReflectKind};
///
/// assert_eq!(i32::type_info().kind(), ReflectKind::Scalar);
/// assert_eq!(<Vec<i32>>::type_info().kind(), ReflectKind::List);
/// assert!(<Option<i32>>::type_info().as_pointer().is_ok());
/// ```
///
/// [`Typed::type_info`]: crate::info::Typed::type_info
/// [`Reflect::reflect_type_info`]: crate::Reflect::reflect_type_info
#[derive(Debug, Clone)]
pub enum TypeInfo {
    Struct(StructInfo),
    List(ListInfo),
    Array(ArrayInfo),
    Map(MapInfo),
    Pointer(PointerInfo),
    Scalar(ScalarInfo),
    Opaque(OpaqueInfo),
}

// Helper macro that implements type-safe accessor methods like `as_struct`.
macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        /// Convert [`TypeInfo`] to the kind-specific information.
        pub const fn $name(&self) -> Result<&$info, ReflectKindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_struct: Struct => StructInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_array: Array => ArrayInfo);
    impl_cast_method!(as_map: Map => MapInfo);
    impl_cast_method!(as_pointer: Pointer => PointerInfo);
    impl_cast_method!(as_scalar: Scalar => ScalarInfo);
    impl_cast_method!(as_opaque: Opaque => OpaqueInfo);

    /// Returns the underlying [`Type`] metadata for this `TypeInfo`.
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Struct(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Array(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Pointer(info) => info.ty(),
            Self::Scalar(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
        }
    }

    crate::info::impl_type_fn!();

    /// Returns the [`ReflectKind`] for this `TypeInfo`.
    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Array(_) => ReflectKind::Array,
            Self::Map(_) => ReflectKind::Map,
            Self::Pointer(_) => ReflectKind::Pointer,
            Self::Scalar(_) => ReflectKind::Scalar,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::ReflectKind;
    use crate::info::Typed;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    #[test]
    fn cast_reports_both_kinds() {
        let err = <Vec<u8>>::type_info().as_map().unwrap_err();
        assert_eq!(err.expected, ReflectKind::Map);
        assert_eq!(err.received, ReflectKind::List);
        assert_eq!(
            err.to_string(),
            "reflect kind mismatch: expected Map, received List"
        );
    }
}
