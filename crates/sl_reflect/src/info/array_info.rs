use core::any::{Any, TypeId};

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::Array;

/// A container for compile-time fixed-length array info.
///
/// # Examples
///
/// ```rust
/// use sl_reflect::info::Typed;
///
/// let info = <[u16; 3] as Typed>::type_info().as_array().unwrap();
///
/// assert_eq!(info.len(), 3);
/// assert!(info.item_is::<u16>());
/// ```
#[derive(Clone, Debug)]
pub struct ArrayInfo {
    ty: Type,
    item_id: TypeId,
    item_info: fn() -> &'static TypeInfo,
    len: usize,
}

impl ArrayInfo {
    impl_type_fn!(ty);

    /// Creates a new [`ArrayInfo`].
    #[inline]
    pub const fn new<TArray: Array + TypePath, TItem: Reflect + Typed>(len: usize) -> Self {
        Self {
            ty: Type::of::<TArray>(),
            item_id: TypeId::of::<TItem>(),
            item_info: TItem::type_info,
            len,
        }
    }

    /// Returns the fixed length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the [`TypeId`] of array items.
    #[inline]
    pub const fn item_id(&self) -> TypeId {
        self.item_id
    }

    /// Returns `true` if the item type is `T`.
    #[inline]
    pub fn item_is<T: Any>(&self) -> bool {
        self.item_id == TypeId::of::<T>()
    }

    /// Returns the [`TypeInfo`] of array items.
    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }
}
