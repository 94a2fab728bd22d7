use alloc::string::String;
use core::any::TypeId;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use sl_utils::TypeIdMap;
use sl_utils::hash::HashMap;

use crate::info::{TypeInfo, Typed};
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTrait};

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of reflected types and their capabilities.
///
/// The registry maps a [`TypeId`] (or a type path) to a [`TypeMeta`], which
/// carries the type's [`TypeInfo`] and its [`TypeTrait`]s. The encoder asks
/// it for `TypeTraitMarshalJson` and `TypeTraitMarshalText`.
///
/// # Examples
///
/// ```
/// use sl_reflect::{derive::Reflect, registry::TypeRegistry};
///
/// #[derive(Reflect)]
/// struct Inner {
///     pub x: u8,
/// }
///
/// #[derive(Reflect)]
/// struct Outer {
///     pub inner: Vec<Inner>,
/// }
///
/// let mut registry = TypeRegistry::empty();
/// registry.register::<Outer>();
///
/// // dependencies are registered recursively
/// assert!(registry.contains(core::any::TypeId::of::<Inner>()));
/// assert!(registry.get_with_type_path("u8").is_some());
/// ```
pub struct TypeRegistry {
    type_meta_table: TypeIdMap<TypeMeta>,
    type_path_to_id: HashMap<&'static str, TypeId>,
}

impl Default for TypeRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates a registry with no types at all.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            type_meta_table: TypeIdMap::new(),
            type_path_to_id: HashMap::with_hasher(sl_utils::hash::FixedHashState),
        }
    }

    /// Creates a registry with the primitive types registered.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<()>();
        registry.register::<bool>();
        registry.register::<char>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<usize>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<isize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry
    }

    // Returns `false` without calling `get_type_meta` if the type already exists.
    fn register_internal(
        &mut self,
        type_id: TypeId,
        get_type_meta: impl FnOnce() -> TypeMeta,
    ) -> bool {
        let type_path_to_id = &mut self.type_path_to_id;
        self.type_meta_table.try_insert(type_id, || {
            let meta = get_type_meta();
            type_path_to_id.insert(meta.type_path(), type_id);
            meta
        })
    }

    /// Registers `T` and, the first time, its dependencies.
    pub fn register<T: GetTypeMeta>(&mut self) {
        if self.register_internal(TypeId::of::<T>(), T::get_type_meta) {
            T::register_dependencies(self);
        }
    }

    /// Registers every non-generic type declared with `#[reflect(auto_register)]`.
    ///
    /// Returns `false` if automatic registration is unavailable, either because
    /// the `auto_register` feature is off or the platform does not support it.
    ///
    /// ```
    /// use sl_reflect::{derive::Reflect, registry::TypeRegistry};
    ///
    /// #[derive(Reflect)]
    /// #[reflect(auto_register)]
    /// struct Auto {
    ///     pub id: u32,
    /// }
    ///
    /// let mut registry = TypeRegistry::empty();
    /// if registry.auto_register() {
    ///     assert!(registry.contains(core::any::TypeId::of::<Auto>()));
    /// }
    /// ```
    #[cfg(feature = "auto_register")]
    pub fn auto_register(&mut self) -> bool {
        use crate::__macro_exports::auto_register;

        if self.contains(TypeId::of::<auto_register::__AvailFlag>()) {
            return true;
        }
        auto_register::__register_types(self);
        self.contains(TypeId::of::<auto_register::__AvailFlag>())
    }

    /// Always `false` without the `auto_register` feature.
    #[cfg(not(feature = "auto_register"))]
    #[inline(always)]
    pub fn auto_register(&mut self) -> bool {
        false
    }

    /// Attaches the type trait `D` to `T`, registering `T` first if needed.
    ///
    /// ```
    /// use sl_reflect::registry::{FromType, TypeRegistry};
    /// use sl_reflect::info::Typed;
    ///
    /// #[derive(Clone)]
    /// struct Label(&'static str);
    ///
    /// impl<T: Typed> FromType<T> for Label {
    ///     fn from_type() -> Self { Label(T::type_ident()) }
    /// }
    ///
    /// let mut registry = TypeRegistry::empty();
    /// registry.register_type_trait::<u32, Label>();
    /// let label = registry.get_type_trait::<Label>(core::any::TypeId::of::<u32>()).unwrap();
    /// assert_eq!(label.0, "u32");
    /// ```
    pub fn register_type_trait<T: GetTypeMeta, D: TypeTrait + FromType<T>>(&mut self) {
        self.register::<T>();
        if let Some(type_meta) = self.type_meta_table.get_mut(&TypeId::of::<T>()) {
            type_meta.insert_trait(D::from_type());
        }
    }

    /// Returns `true` if the type is registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains(&type_id)
    }

    /// Returns the [`TypeMeta`] of a registered type.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    /// Returns the [`TypeMeta`] of a registered type by its full path.
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeMeta> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns the type trait `T` of a registered type.
    pub fn get_type_trait<T: TypeTrait>(&self, type_id: TypeId) -> Option<&T> {
        match self.get(type_id) {
            Some(type_meta) => type_meta.get_trait::<T>(),
            None => None,
        }
    }

    /// Returns the [`TypeInfo`] of a registered type.
    #[inline]
    pub fn get_type_info(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.get(type_id).map(TypeMeta::type_info)
    }

    /// Returns the number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.type_meta_table.len()
    }

    /// Returns `true` if nothing is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.type_meta_table.is_empty()
    }

    /// Iterates over all registered types, in no particular order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.type_meta_table.values()
    }
}

// -----------------------------------------------------------------------------
// TypeRegistryArc

/// A shared, lock-protected [`TypeRegistry`].
///
/// Lock poisoning is ignored: the registry is only ever extended, so a panic
/// while holding the write lock leaves it in a usable state.
#[derive(Clone, Default)]
pub struct TypeRegistryArc {
    pub internal: Arc<RwLock<TypeRegistry>>,
}

impl TypeRegistryArc {
    /// Wraps an existing registry.
    #[inline]
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// Takes a read lock.
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock.
    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl core::fmt::Debug for TypeRegistryArc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.read().type_path_to_id.keys())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{TypeRegistry, TypeRegistryArc};
    use crate::registry::FromType;
    use crate::info::Typed;
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::any::TypeId;

    #[derive(Clone)]
    struct Ident(&'static str);

    impl<T: Typed> FromType<T> for Ident {
        fn from_type() -> Self {
            Ident(T::type_ident())
        }
    }

    #[test]
    fn new_registers_primitives() {
        let registry = TypeRegistry::new();
        assert!(registry.contains(TypeId::of::<u64>()));
        assert!(registry.contains(TypeId::of::<String>()));
        assert!(registry.get_with_type_path("alloc::string::String").is_some());
        assert!(TypeRegistry::empty().is_empty());
    }

    #[test]
    fn register_pulls_in_item_types() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Vec<Option<u16>>>();
        assert!(registry.contains(TypeId::of::<Option<u16>>()));
        assert!(registry.contains(TypeId::of::<u16>()));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn type_trait_registers_missing_type() {
        let mut registry = TypeRegistry::empty();
        registry.register_type_trait::<i8, Ident>();
        let ident = registry.get_type_trait::<Ident>(TypeId::of::<i8>());
        assert_eq!(ident.map(|v| v.0), Some("i8"));
    }

    #[test]
    fn shared_registry_locks() {
        let shared = TypeRegistryArc::default();
        shared.write().register::<bool>();
        assert!(shared.read().contains(TypeId::of::<bool>()));
    }
}
