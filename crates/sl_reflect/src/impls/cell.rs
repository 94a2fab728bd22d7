//! Containers for static storage of type information.
//!
//! Used to implement [`Typed`](crate::info::Typed) and [`TypePath`](crate::info::TypePath).
//!
//! - [`NonGenericTypeInfoCell`]: a [`OnceLock`] holding one [`TypeInfo`].
//! - [`GenericTypeInfoCell`] / [`GenericTypePathCell`]: a `static CELL` inside a
//!   generic function is shared by all instantiations, so these cells keep a
//!   [`TypeIdMap`] behind a [`RwLock`].

use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use sl_utils::TypeIdMap;

use crate::info::TypeInfo;

mod sealed {
    use super::TypeInfo;
    use alloc::string::String;
    pub trait TypedProperty: 'static {}

    impl TypedProperty for String {}
    impl TypedProperty for TypeInfo {}
}

use sealed::TypedProperty;

/// Container for static storage of non-generic type information.
pub struct NonGenericTypeCell<T: TypedProperty>(OnceLock<T>);

/// Container for the [`TypeInfo`] of a non-generic type.
///
/// ```
/// use sl_reflect::impls::NonGenericTypeInfoCell;
/// use sl_reflect::info::{OpaqueInfo, TypeInfo, TypePath, Typed};
/// # use sl_reflect::{Reflect, ops::ReflectRef};
///
/// struct Token;
/// # impl Reflect for Token {
/// #     fn reflect_type_info(&self) -> &'static TypeInfo { Self::type_info() }
/// #     fn reflect_ref(&self) -> ReflectRef<'_> { ReflectRef::Opaque(self) }
/// #     fn as_reflect(&self) -> &dyn Reflect { self }
/// # }
///
/// impl TypePath for Token {
///     fn type_path() -> &'static str { "demo::Token" }
///     fn type_name() -> &'static str { "Token" }
///     fn type_ident() -> &'static str { "Token" }
/// }
///
/// impl Typed for Token {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
///     }
/// }
///
/// assert!(core::ptr::eq(Token::type_info(), Token::type_info()));
/// ```
pub type NonGenericTypeInfoCell = NonGenericTypeCell<TypeInfo>;

impl<T: TypedProperty> NonGenericTypeCell<T> {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored value, creating it with `f` on first access.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.0.get_or_init(f)
    }
}

/// Container for static storage of type information with generics.
pub struct GenericTypeCell<T: TypedProperty>(RwLock<TypeIdMap<&'static T>>);

/// Container for the [`TypeInfo`] of a generic type.
pub type GenericTypeInfoCell = GenericTypeCell<TypeInfo>;

/// Container for the type path of a generic type.
///
/// ```
/// use sl_reflect::impls::{concat, GenericTypePathCell};
/// use sl_reflect::info::TypePath;
///
/// struct Wrap<T>(T);
///
/// impl<T: TypePath> TypePath for Wrap<T> {
///     fn type_path() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| concat(&["demo::Wrap<", T::type_path(), ">"]))
///     }
///     fn type_name() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| concat(&["Wrap<", T::type_name(), ">"]))
///     }
///     fn type_ident() -> &'static str { "Wrap" }
/// }
///
/// assert_eq!(<Wrap<i32>>::type_path(), "demo::Wrap<i32>");
/// assert_eq!(<Wrap<u8>>::type_name(), "Wrap<u8>");
/// ```
pub type GenericTypePathCell = GenericTypeCell<String>;

impl<T: TypedProperty> GenericTypeCell<T> {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the value stored for `G`, creating it with `f` on first access.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &T {
        // Separate to reduce code compilation times
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> T) -> &T {
        match self.get_by_type_id(type_id) {
            Some(info) => info,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&T> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    // `value` is built outside the lock, so a racing thread may build one
    // too; only the first is kept.
    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: T) -> &T {
        let mut table = self.0.write().unwrap_or_else(PoisonError::into_inner);
        let stored: &'static T = *table.get_or_insert(type_id, || Box::leak(Box::new(value)));
        stored
    }
}
