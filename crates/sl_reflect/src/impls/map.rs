use alloc::boxed::Box;
use alloc::collections::BTreeMap;

use crate::Reflect;
use crate::derive::impl_type_path;
use crate::impls::GenericTypeInfoCell;
use crate::info::{MapInfo, TypeInfo, Typed};
use crate::ops::{Map, MapIter};
use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};

// -----------------------------------------------------------------------------
// BTreeMap

impl_type_path!(::alloc::collections::BTreeMap<K, V>);

impl<K: Reflect + Typed + Ord, V: Reflect + Typed> Typed for BTreeMap<K, V> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Map(MapInfo::new::<Self, K, V>()))
    }
}

impl<K: Reflect + Typed + Ord, V: Reflect + Typed> Reflect for BTreeMap<K, V> {
    crate::reflection::impl_reflect_fns!(Map);
}

impl<K: Reflect + Typed + Ord, V: Reflect + Typed> Map for BTreeMap<K, V> {
    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn iter(&self) -> MapIter<'_> {
        Box::new(BTreeMap::iter(self).map(|(k, v)| (k.as_reflect(), v.as_reflect())))
    }
}

impl<K, V> GetTypeMeta for BTreeMap<K, V>
where
    K: Reflect + Typed + Ord + GetTypeMeta,
    V: Reflect + Typed + GetTypeMeta,
{
    #[inline]
    fn get_type_meta() -> TypeMeta {
        TypeMeta::of::<Self>()
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<K>();
        registry.register::<V>();
    }
}

// -----------------------------------------------------------------------------
// HashMap

macro_rules! impl_reflect_for_hashmap {
    ($ty:path) => {
        impl<K, V, S> Typed for $ty
        where
            K: Reflect + Typed + Eq + ::core::hash::Hash,
            V: Reflect + Typed,
            S: $crate::info::TypePath + ::core::hash::BuildHasher + Send + Sync,
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| TypeInfo::Map(MapInfo::new::<Self, K, V>()))
            }
        }

        impl<K, V, S> Reflect for $ty
        where
            K: Reflect + Typed + Eq + ::core::hash::Hash,
            V: Reflect + Typed,
            S: $crate::info::TypePath + ::core::hash::BuildHasher + Send + Sync,
        {
            crate::reflection::impl_reflect_fns!(Map);
        }

        impl<K, V, S> Map for $ty
        where
            K: Reflect + Typed + Eq + ::core::hash::Hash,
            V: Reflect + Typed,
            S: $crate::info::TypePath + ::core::hash::BuildHasher + Send + Sync,
        {
            #[inline]
            fn len(&self) -> usize {
                Self::len(self)
            }

            fn iter(&self) -> MapIter<'_> {
                Box::new(Self::iter(self).map(|(k, v)| (k.as_reflect(), v.as_reflect())))
            }
        }

        impl<K, V, S> GetTypeMeta for $ty
        where
            K: Reflect + Typed + Eq + ::core::hash::Hash + GetTypeMeta,
            V: Reflect + Typed + GetTypeMeta,
            S: $crate::info::TypePath + ::core::hash::BuildHasher + Send + Sync,
        {
            #[inline]
            fn get_type_meta() -> TypeMeta {
                TypeMeta::of::<Self>()
            }

            fn register_dependencies(registry: &mut TypeRegistry) {
                registry.register::<K>();
                registry.register::<V>();
            }
        }
    };
}

impl_type_path!(::std::hash::RandomState);
impl_type_path!(::std::collections::HashMap<K, V, S>);
impl_reflect_for_hashmap!(::std::collections::HashMap<K, V, S>);

impl_type_path!(::sl_utils::hash::FixedHashState);
impl_type_path!((in hashbrown) ::sl_utils::hash::hashbrown::HashMap<K, V, S>);
impl_reflect_for_hashmap!(::sl_utils::hash::hashbrown::HashMap<K, V, S>);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::info::{TypePath, Typed};
    use crate::ops::{Map, ReflectRef};
    use crate::Reflect;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use std::collections::HashMap;

    #[test]
    fn btree_entries_are_reflected() {
        let mut map = BTreeMap::new();
        map.insert(String::from("k"), 1_u32);
        let v: &dyn Reflect = &map;
        let ReflectRef::Map(m) = v.reflect_ref() else {
            panic!("expected a map");
        };
        let (key, value) = m.iter().next().unwrap();
        assert_eq!(key.downcast_ref::<String>().map(String::as_str), Some("k"));
        assert_eq!(value.downcast_ref::<u32>(), Some(&1));
    }

    #[test]
    fn hash_maps_are_maps() {
        let map: HashMap<u8, bool> = HashMap::from([(1, true), (2, false)]);
        assert_eq!(Map::len(&map), 2);
        assert!(<HashMap<u8, bool>>::type_info().as_map().is_ok());
        assert_eq!(
            <HashMap<u8, bool> as TypePath>::type_path(),
            "std::collections::HashMap<u8, bool, std::hash::RandomState>"
        );
    }
}
