use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{ReflectKind, TypeInfo};
use crate::ops::ReflectRef;

// -----------------------------------------------------------------------------
// Reflect

/// Dynamic access to a value whose shape is only known at runtime.
///
/// Every implementor has a static [`TypeInfo`] describing its shape and can
/// expose its content through [`ReflectRef`]. Implementations are usually
/// generated by [`#[derive(Reflect)]`](crate::derive::Reflect) or provided by
/// this crate for std types.
///
/// # Manual implementation
///
/// ```
/// use sl_reflect::{Reflect, impls::NonGenericTypeInfoCell, ops::ReflectRef};
/// use sl_reflect::info::{OpaqueInfo, TypeInfo, TypePath, Typed};
///
/// struct Handle(u32);
///
/// impl TypePath for Handle {
///     fn type_path() -> &'static str { "demo::Handle" }
///     fn type_name() -> &'static str { "Handle" }
///     fn type_ident() -> &'static str { "Handle" }
/// }
///
/// impl Typed for Handle {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
///     }
/// }
///
/// impl Reflect for Handle {
///     fn reflect_type_info(&self) -> &'static TypeInfo { Self::type_info() }
///     fn reflect_ref(&self) -> ReflectRef<'_> { ReflectRef::Opaque(self) }
///     fn as_reflect(&self) -> &dyn Reflect { self }
/// }
///
/// let h: &dyn Reflect = &Handle(3);
/// assert_eq!(h.reflect_type_path(), "demo::Handle");
/// assert!(h.is::<Handle>());
/// ```
pub trait Reflect: Send + Sync + Any {
    /// Returns the static shape description of this value's type.
    fn reflect_type_info(&self) -> &'static TypeInfo;

    /// Returns an immutable, kind-specific view of the value.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Casts this value to `&dyn Reflect`.
    fn as_reflect(&self) -> &dyn Reflect;

    /// Returns the [`TypeId`] of the underlying type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        Any::type_id(self)
    }

    /// Returns the kind of the underlying type.
    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        self.reflect_type_info().kind()
    }

    /// Returns the full type path of the underlying type.
    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        self.reflect_type_info().type_path()
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to `&T`.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Returns the address of the value, used as its identity.
    ///
    /// Two live values of the same type never share an address unless one
    /// of them is zero-sized.
    #[inline]
    pub fn address(&self) -> usize {
        (self as *const dyn Reflect).cast::<()>() as usize
    }
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dyn Reflect({})", self.reflect_type_path())
    }
}

// -----------------------------------------------------------------------------
// Internal API

/// Implements the three boilerplate methods of [`Reflect`] for a given kind.
macro_rules! impl_reflect_fns {
    ($kind:ident) => {
        #[inline]
        fn reflect_type_info(&self) -> &'static $crate::info::TypeInfo {
            <Self as $crate::info::Typed>::type_info()
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::$kind(self)
        }

        #[inline]
        fn as_reflect(&self) -> &dyn $crate::Reflect {
            self
        }
    };
}

pub(crate) use impl_reflect_fns;
