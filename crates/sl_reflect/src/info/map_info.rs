use core::any::{Any, TypeId};

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::Map;

/// A container for compile-time map-like info.
///
/// # Examples
///
/// ```rust
/// # use core::any::TypeId;
/// use sl_reflect::info::Typed;
/// use std::collections::BTreeMap;
///
/// let info = <BTreeMap<String, i32> as Typed>::type_info().as_map().unwrap();
///
/// assert_eq!(info.key_id(), TypeId::of::<String>());
/// assert_eq!(info.value_id(), TypeId::of::<i32>());
/// ```
#[derive(Clone, Debug)]
pub struct MapInfo {
    ty: Type,
    key_id: TypeId,
    value_id: TypeId,
    // `TypeInfo` is created on first access; use function pointers to delay it.
    key_info: fn() -> &'static TypeInfo,
    value_info: fn() -> &'static TypeInfo,
}

impl MapInfo {
    impl_type_fn!(ty);

    /// Create a new [`MapInfo`].
    #[inline]
    pub const fn new<TMap: Map + TypePath, TKey: Reflect + Typed, TValue: Reflect + Typed>() -> Self
    {
        Self {
            ty: Type::of::<TMap>(),
            key_id: TypeId::of::<TKey>(),
            value_id: TypeId::of::<TValue>(),
            key_info: TKey::type_info,
            value_info: TValue::type_info,
        }
    }

    /// Returns the [`TypeId`] of the key.
    #[inline]
    pub const fn key_id(&self) -> TypeId {
        self.key_id
    }

    /// Returns `true` if the key type is `T`.
    #[inline]
    pub fn key_is<T: Any>(&self) -> bool {
        self.key_id == TypeId::of::<T>()
    }

    /// Returns the [`TypeId`] of the value.
    #[inline]
    pub const fn value_id(&self) -> TypeId {
        self.value_id
    }

    /// Returns the key's [`TypeInfo`].
    #[inline]
    pub fn key_info(&self) -> &'static TypeInfo {
        (self.key_info)()
    }

    /// Returns the value's [`TypeInfo`].
    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value_info)()
    }
}
