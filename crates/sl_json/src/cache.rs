use alloc::sync::Arc;
use core::fmt;
use std::sync::{OnceLock, PoisonError, RwLock};

use log::debug;
use sl_reflect::info::TypeInfo;
use sl_utils::TypeIdMap;

use crate::Encoder;
use crate::strategy::Strategy;

// -----------------------------------------------------------------------------
// Slot

/// The encoding strategy of one shape, filled on first use.
///
/// A slot exists before its strategy does. Strategies of nested shapes hold
/// the slots of their children rather than the children's strategies, so a
/// shape that contains itself refers to its own slot and construction never
/// recurses.
pub(crate) struct Slot {
    info: &'static TypeInfo,
    strategy: OnceLock<Strategy>,
    /// Replaces an `Unsupported` strategy once the registry can do better.
    late: OnceLock<Strategy>,
}

pub(crate) type SlotRef = Arc<Slot>;

impl Slot {
    #[inline]
    pub fn info(&self) -> &'static TypeInfo {
        self.info
    }

    /// Returns the strategy, building it if this is the first request.
    ///
    /// Concurrent first requests build once; the others wait for the
    /// published result. An `Unsupported` strategy is rebuilt on every
    /// request until the registry yields a better one, which is then kept.
    pub fn get(&self, encoder: &Encoder) -> &Strategy {
        let strategy = self.strategy.get_or_init(|| {
            let strategy = Strategy::build(self.info, encoder);
            debug!(
                "publish {} strategy for `{}`",
                strategy.name(),
                self.info.type_path()
            );
            strategy
        });
        if !matches!(strategy, Strategy::Unsupported) {
            return strategy;
        }
        if let Some(late) = self.late.get() {
            return late;
        }
        match Strategy::build(self.info, encoder) {
            Strategy::Unsupported => strategy,
            rebuilt => self.late.get_or_init(|| {
                debug!(
                    "publish late {} strategy for `{}`",
                    rebuilt.name(),
                    self.info.type_path()
                );
                rebuilt
            }),
        }
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("type_path", &self.info.type_path())
            .field("ready", &self.strategy.get().is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// StrategyCache

/// Process-lifetime map from shape to [`Slot`].
///
/// Entries are never removed. The lock only guards the map itself and is
/// never held while a strategy is built.
pub(crate) struct StrategyCache {
    slots: RwLock<TypeIdMap<SlotRef>>,
}

impl StrategyCache {
    pub const fn new() -> Self {
        Self {
            slots: RwLock::new(TypeIdMap::new()),
        }
    }

    /// Returns the slot for `info`, creating an empty one if needed.
    pub fn slot(&self, info: &'static TypeInfo) -> SlotRef {
        let type_id = info.ty_id();

        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(slot) = slots.get(&type_id) {
            return slot.clone();
        }
        drop(slots);

        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots
            .get_or_insert(type_id, || {
                Arc::new(Slot {
                    info,
                    strategy: OnceLock::new(),
                    late: OnceLock::new(),
                })
            })
            .clone()
    }

    /// Returns the number of known shapes.
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::StrategyCache;
    use alloc::sync::Arc;
    use sl_reflect::info::Typed;

    #[test]
    fn one_slot_per_shape() {
        let cache = StrategyCache::new();
        let a = cache.slot(u8::type_info());
        let b = cache.slot(u8::type_info());
        let c = cache.slot(<alloc::vec::Vec<u8>>::type_info());
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(cache.len(), 2);
        assert_eq!(a.info().type_path(), "u8");
    }

    #[test]
    fn concurrent_requests_share_a_slot() {
        let cache = StrategyCache::new();
        let slots: alloc::vec::Vec<_> = std::thread::scope(|s| {
            let handles: alloc::vec::Vec<_> = (0..8)
                .map(|_| s.spawn(|| cache.slot(u64::type_info())))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(slots.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(cache.len(), 1);
    }
}
