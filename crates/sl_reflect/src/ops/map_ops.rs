use alloc::boxed::Box;

use crate::Reflect;

/// An iterator over the entries of a map, in the map's own order.
pub type MapIter<'a> = Box<dyn Iterator<Item = (&'a dyn Reflect, &'a dyn Reflect)> + 'a>;

// -----------------------------------------------------------------------------
// Map trait

/// A trait for type-erased map-like operations via reflection.
///
/// The iteration order is whatever the underlying map provides; callers
/// that need a deterministic order must sort the entries themselves.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use sl_reflect::ops::Map;
///
/// let mut map = BTreeMap::new();
/// map.insert(1_u8, "one");
///
/// let dyn_map: &dyn Map = &map;
/// assert_eq!(dyn_map.len(), 1);
///
/// let (k, v) = dyn_map.iter().next().unwrap();
/// assert_eq!(k.downcast_ref::<u8>(), Some(&1));
/// assert_eq!(v.downcast_ref::<&str>(), Some(&"one"));
/// ```
pub trait Map: Reflect {
    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the map contains no entries.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the entries.
    fn iter(&self) -> MapIter<'_>;

    /// Returns `true` for an absent map as opposed to an empty one.
    #[inline]
    fn is_absent(&self) -> bool {
        false
    }
}
