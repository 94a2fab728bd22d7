use crate::Reflect;
use crate::info::{ReflectKind, ReflectKindError};
use crate::ops::{Array, List, Map, Pointer, Struct};

// -----------------------------------------------------------------------------
// ScalarRef

/// A borrowed primitive value.
///
/// Integers are widened to 64 bits. Floats keep their width because the
/// shortest text form of an `f32` differs from the one of the same value
/// widened to `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarRef<'a> {
    Bool(bool),
    Int(i64),
    Uint(u64),
    F32(f32),
    F64(f64),
    Char(char),
    Str(&'a str),
}

impl ScalarRef<'_> {
    /// Returns `true` for the zero value of the scalar's category.
    ///
    /// This is `false`, `0`, `0.0`, `'\0'` or the empty string.
    pub fn is_zero(&self) -> bool {
        match *self {
            Self::Bool(v) => !v,
            Self::Int(v) => v == 0,
            Self::Uint(v) => v == 0,
            Self::F32(v) => v == 0.0,
            Self::F64(v) => v == 0.0,
            Self::Char(v) => v == '\0',
            Self::Str(v) => v.is_empty(),
        }
    }
}

// -----------------------------------------------------------------------------
// ReflectRef

/// An immutable, kind-specific view of a reflected value.
///
/// Obtained through [`Reflect::reflect_ref`].
///
/// # Examples
///
/// ```
/// use sl_reflect::{Reflect, ops::{ReflectRef, ScalarRef}};
///
/// let v: &dyn Reflect = &17_u8;
/// assert!(matches!(v.reflect_ref(), ReflectRef::Scalar(ScalarRef::Uint(17))));
///
/// let v: &dyn Reflect = &vec![1_u8, 2];
/// assert_eq!(v.reflect_ref().as_list().unwrap().len(), 2);
/// ```
#[derive(Clone, Copy)]
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    List(&'a dyn List),
    Array(&'a dyn Array),
    Map(&'a dyn Map),
    Pointer(&'a dyn Pointer),
    Scalar(ScalarRef<'a>),
    Opaque(&'a dyn Reflect),
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $ret:ty) => {
        /// Convert to the kind-specific view.
        #[inline]
        pub fn $name(self) -> Result<$ret, ReflectKindError> {
            match self {
                Self::$kind(value) => Ok(value),
                _ => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl<'a> ReflectRef<'a> {
    impl_cast_method!(as_struct: Struct => &'a dyn Struct);
    impl_cast_method!(as_list: List => &'a dyn List);
    impl_cast_method!(as_array: Array => &'a dyn Array);
    impl_cast_method!(as_map: Map => &'a dyn Map);
    impl_cast_method!(as_pointer: Pointer => &'a dyn Pointer);
    impl_cast_method!(as_scalar: Scalar => ScalarRef<'a>);
    impl_cast_method!(as_opaque: Opaque => &'a dyn Reflect);

    /// Returns the [`ReflectKind`] of this view.
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
