use alloc::boxed::Box;
use core::any::TypeId;
use core::ops::Deref;

use sl_utils::TypeIdMap;

use crate::info::{Type, TypeInfo, Typed};
use crate::registry::{TypeRegistry, TypeTrait};

// -----------------------------------------------------------------------------
// TypeMeta

/// Runtime storage for a type's [`TypeInfo`] and its [`TypeTrait`]s.
///
/// # Examples
///
/// ```
/// use sl_reflect::registry::{TypeMeta, TypeTraitMarshalText, FromType};
/// use sl_reflect::derive::Reflect;
///
/// #[derive(Reflect)]
/// #[reflect(opaque, marshal_text)]
/// struct Version(u32);
///
/// impl sl_reflect::registry::MarshalText for Version {
///     fn marshal_text(&self) -> Result<String, sl_reflect::registry::BoxError> {
///         Ok(format!("v{}", self.0))
///     }
/// }
///
/// let mut meta = TypeMeta::of::<Version>();
/// assert!(!meta.has_trait::<TypeTraitMarshalText>());
/// meta.insert_trait::<TypeTraitMarshalText>(FromType::<Version>::from_type());
/// assert!(meta.has_trait::<TypeTraitMarshalText>());
/// ```
pub struct TypeMeta {
    ty: &'static Type,
    type_info: &'static TypeInfo,
    trait_table: TypeIdMap<Box<dyn TypeTrait>>,
}

impl TypeMeta {
    /// Creates an empty meta for `T`.
    #[inline]
    pub fn of<T: Typed>() -> Self {
        let type_info = T::type_info();
        Self {
            ty: type_info.ty(),
            type_info,
            trait_table: TypeIdMap::new(),
        }
    }

    /// Creates an empty meta for `T` with room for `capacity` traits.
    #[inline]
    pub fn with_capacity<T: Typed>(capacity: usize) -> Self {
        let type_info = T::type_info();
        Self {
            ty: type_info.ty(),
            type_info,
            trait_table: TypeIdMap::with_capacity(capacity),
        }
    }

    /// Returns the [`TypeInfo`].
    #[inline(always)]
    pub const fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    /// Returns the [`Type`].
    #[inline(always)]
    pub const fn ty(&self) -> &'static Type {
        self.ty
    }

    crate::info::impl_type_fn!();

    /// Inserts a type trait, replacing any previous one of the same type.
    #[inline(always)]
    pub fn insert_trait<T: TypeTrait>(&mut self, data: T) {
        self.insert_trait_by_id(TypeId::of::<T>(), Box::new(data));
    }

    #[inline(never)]
    fn insert_trait_by_id(&mut self, id: TypeId, val: Box<dyn TypeTrait>) {
        self.trait_table.insert(id, val);
    }

    /// Returns the type trait `T`, if present.
    #[inline]
    pub fn get_trait<T: TypeTrait>(&self) -> Option<&T> {
        self.get_trait_by_id(TypeId::of::<T>())
            .and_then(<dyn TypeTrait>::downcast_ref)
    }

    /// Returns the type trait with the given [`TypeId`], if present.
    pub fn get_trait_by_id(&self, type_id: TypeId) -> Option<&dyn TypeTrait> {
        self.trait_table.get(&type_id).map(Deref::deref)
    }

    /// Returns `true` if the type trait `T` is present.
    #[inline]
    pub fn has_trait<T: TypeTrait>(&self) -> bool {
        self.trait_table.contains(&TypeId::of::<T>())
    }

    /// Returns the number of type traits.
    #[inline]
    pub fn trait_len(&self) -> usize {
        self.trait_table.len()
    }
}

impl Clone for TypeMeta {
    fn clone(&self) -> Self {
        let mut new_map = TypeIdMap::with_capacity(self.trait_len());
        for (id, type_trait) in self.trait_table.iter() {
            new_map.insert(*id, (**type_trait).clone_type_trait());
        }

        Self {
            trait_table: new_map,
            type_info: self.type_info,
            ty: self.ty,
        }
    }
}

impl core::fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypeMeta")
            .field("type_info", &self.type_info)
            .field("trait_len", &self.trait_len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// GetTypeMeta

/// Provides the [`TypeMeta`] of a type for registration.
///
/// Usually implemented by [`#[derive(Reflect)]`](crate::derive::Reflect).
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `GetTypeMeta` so cannot provide type registration information",
    note = "consider annotating `{Self}` with `#[derive(Reflect)]`"
)]
pub trait GetTypeMeta: Typed {
    /// Returns the default [`TypeMeta`] for this type.
    fn get_type_meta() -> TypeMeta;

    /// Registers other types needed by this type.
    ///
    /// Called once, when the type is first registered.
    fn register_dependencies(_registry: &mut TypeRegistry) {}
}
