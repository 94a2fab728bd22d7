//! Hash states and hash containers, re-exports *hashbrown* and *foldhash*.
//!
//! The containers default to [`FixedHashState`], so iteration order depends
//! on the inserted keys only. Output that must be deterministic still sorts
//! explicitly; the fixed seed only keeps debugging sessions reproducible.

// -----------------------------------------------------------------------------
// Modules

mod hasher;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{FixedHashState, FixedHasher};
pub use hasher::{NoOpHashState, NoOpHasher};

/// A [`hashbrown::HashMap`] using [`FixedHashState`] by default.
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

/// A [`hashbrown::HashSet`] using [`FixedHashState`] by default.
pub type HashSet<T, S = FixedHashState> = hashbrown::HashSet<T, S>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{FixedHashState, HashMap, NoOpHashState};
    use core::hash::{BuildHasher, Hash, Hasher};

    #[test]
    fn fixed_state_is_stable_across_builders() {
        let hash = |v: &str| {
            let mut hasher = FixedHashState.build_hasher();
            v.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash("shape"), hash("shape"));
        assert_ne!(hash("shape"), hash("shapes"));
    }

    #[test]
    fn no_op_state_passes_u64_through() {
        let mut hasher = NoOpHashState.build_hasher();
        hasher.write_u64(0xDEAD_BEEF);
        assert_eq!(hasher.finish(), 0xDEAD_BEEF);
    }

    #[test]
    fn map_alias_uses_fixed_state() {
        let mut map: HashMap<&str, u32> = HashMap::default();
        map.insert("a", 1);
        map.insert("b", 2);
        assert_eq!(map.get("b"), Some(&2));
    }
}
