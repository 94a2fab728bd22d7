use core::fmt;

use crate::Reflect;
use crate::info::{Type, TypePath, impl_type_fn};

/// The primitive category of a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int,
    Uint,
    F32,
    F64,
    Char,
    String,
}

impl ScalarKind {
    /// Returns `true` for integer kinds.
    #[inline]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Int | Self::Uint)
    }

    /// Returns `true` for floating point kinds.
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.pad("bool"),
            Self::Int => f.pad("int"),
            Self::Uint => f.pad("uint"),
            Self::F32 => f.pad("f32"),
            Self::F64 => f.pad("f64"),
            Self::Char => f.pad("char"),
            Self::String => f.pad("string"),
        }
    }
}

/// Metadata for primitive values.
///
/// # Examples
///
/// ```rust
/// use sl_reflect::info::{Typed, ScalarKind};
///
/// let info = <u16 as Typed>::type_info().as_scalar().unwrap();
/// assert_eq!(info.scalar_kind(), ScalarKind::Uint);
/// ```
#[derive(Debug, Clone)]
pub struct ScalarInfo {
    ty: Type,
    kind: ScalarKind,
}

impl ScalarInfo {
    impl_type_fn!(ty);

    /// Create a new [`ScalarInfo`].
    #[inline]
    pub const fn new<T: Reflect + TypePath + ?Sized>(kind: ScalarKind) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
        }
    }

    /// Returns the primitive category.
    #[inline]
    pub const fn scalar_kind(&self) -> ScalarKind {
        self.kind
    }
}
