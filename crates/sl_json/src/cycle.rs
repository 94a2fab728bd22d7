use core::any::TypeId;

use sl_utils::hash::HashSet;

use crate::MarshalError;

/// The identity of a shared value: its address and its type.
///
/// The type is part of the key because a record and its first field may
/// live at the same address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Identity {
    pub address: usize,
    pub type_id: TypeId,
}

/// Proof that a level was entered, handed back to [`CycleGuard::leave`].
#[must_use]
#[derive(Debug)]
pub(crate) struct Entered(Option<Identity>);

// -----------------------------------------------------------------------------
// CycleGuard

/// Detects a value reached again while it is still being encoded.
///
/// Every list, map and pointer entered raises the level by one. Only above
/// the threshold are identities recorded, so shallow values pay nothing but
/// a counter.
#[derive(Debug, Default)]
pub(crate) struct CycleGuard {
    level: usize,
    seen: HashSet<Identity>,
}

impl CycleGuard {
    /// Enters one level.
    ///
    /// Fails with `CyclicStructure` if `identity` is already on the active
    /// path. The level is left unchanged in that case.
    pub fn enter(
        &mut self,
        threshold: usize,
        identity: Option<Identity>,
        type_path: &'static str,
    ) -> Result<Entered, MarshalError> {
        self.level += 1;
        if self.level <= threshold {
            return Ok(Entered(None));
        }
        let Some(identity) = identity else {
            return Ok(Entered(None));
        };
        if !self.seen.insert(identity) {
            self.level -= 1;
            return Err(MarshalError::CyclicStructure { type_path });
        }
        Ok(Entered(Some(identity)))
    }

    /// Leaves the level entered last.
    pub fn leave(&mut self, entered: Entered) {
        self.level -= 1;
        if let Some(identity) = entered.0 {
            self.seen.remove(&identity);
        }
    }

    /// Returns `true` if no level is active.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.level == 0 && self.seen.is_empty()
    }

    pub fn clear(&mut self) {
        self.level = 0;
        self.seen.clear();
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{CycleGuard, Identity};
    use crate::MarshalError;
    use core::any::TypeId;

    fn id(address: usize) -> Option<Identity> {
        Some(Identity {
            address,
            type_id: TypeId::of::<u8>(),
        })
    }

    #[test]
    fn shallow_levels_are_not_tracked() {
        let mut guard = CycleGuard::default();
        let a = guard.enter(2, id(1), "A").unwrap();
        let b = guard.enter(2, id(1), "A").unwrap();
        guard.leave(b);
        guard.leave(a);
        assert!(guard.is_idle());
    }

    #[test]
    fn repeated_identity_above_threshold_fails() {
        let mut guard = CycleGuard::default();
        let a = guard.enter(0, id(1), "A").unwrap();
        let b = guard.enter(0, id(2), "B").unwrap();
        let err = guard.enter(0, id(1), "A").unwrap_err();
        assert!(matches!(err, MarshalError::CyclicStructure { type_path: "A" }));
        guard.leave(b);
        guard.leave(a);
        assert!(guard.is_idle());
    }

    #[test]
    fn siblings_are_not_cycles() {
        let mut guard = CycleGuard::default();
        for _ in 0..3 {
            let entered = guard.enter(0, id(7), "A").unwrap();
            guard.leave(entered);
        }
        let other_type = Some(Identity {
            address: 7,
            type_id: TypeId::of::<u16>(),
        });
        let a = guard.enter(0, id(7), "A").unwrap();
        let b = guard.enter(0, other_type, "B").unwrap();
        guard.leave(b);
        guard.leave(a);
        assert!(guard.is_idle());
    }
}
