use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::Pointer;

/// A container for nullable indirections such as `Option<T>`, `Box<T>` or `Arc<T>`.
///
/// The pointee is unknown for type-erased pointers like `Box<dyn Reflect>`;
/// their target shape is only discovered from the value.
///
/// # Examples
///
/// ```rust
/// use sl_reflect::{Reflect, info::Typed};
///
/// let info = <Option<u8> as Typed>::type_info().as_pointer().unwrap();
/// assert_eq!(info.pointee_info().unwrap().type_path(), "u8");
///
/// let info = <Box<dyn Reflect> as Typed>::type_info().as_pointer().unwrap();
/// assert!(info.pointee_info().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct PointerInfo {
    ty: Type,
    pointee_info: Option<fn() -> &'static TypeInfo>,
}

impl PointerInfo {
    impl_type_fn!(ty);

    /// Creates a pointer info with a statically known pointee.
    #[inline]
    pub const fn new<TPtr: Pointer + TypePath, TTarget: Reflect + Typed>() -> Self {
        Self {
            ty: Type::of::<TPtr>(),
            pointee_info: Some(TTarget::type_info),
        }
    }

    /// Creates a pointer info whose pointee is only known at runtime.
    #[inline]
    pub const fn dynamic<TPtr: Pointer + TypePath>() -> Self {
        Self {
            ty: Type::of::<TPtr>(),
            pointee_info: None,
        }
    }

    /// Returns `true` if the pointee type is only known per value.
    #[inline]
    pub const fn is_dynamic(&self) -> bool {
        self.pointee_info.is_none()
    }

    /// Returns the pointee's [`TypeInfo`], if it is statically known.
    #[inline]
    pub fn pointee_info(&self) -> Option<&'static TypeInfo> {
        self.pointee_info.map(|f| f())
    }
}
