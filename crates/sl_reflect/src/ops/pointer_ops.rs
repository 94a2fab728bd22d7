use crate::Reflect;

// -----------------------------------------------------------------------------
// Pointer trait

/// A trait for nullable indirections via reflection.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use sl_reflect::ops::Pointer;
///
/// let none: Option<u8> = None;
/// assert!(none.pointee().is_none());
///
/// let shared = Arc::new(5_u8);
/// let ptr: &dyn Pointer = &shared;
/// assert_eq!(ptr.pointee().unwrap().downcast_ref::<u8>(), Some(&5));
/// assert_eq!(ptr.address(), Some(Arc::as_ptr(&shared) as usize));
/// ```
pub trait Pointer: Reflect {
    /// Returns the pointed-to value, or `None` when absent.
    fn pointee(&self) -> Option<&dyn Reflect>;

    /// Returns the heap address of the pointee, for indirections that can
    /// be shared and therefore form cycles.
    ///
    /// Inline wrappers such as `Option<T>` return `None`.
    #[inline]
    fn address(&self) -> Option<usize> {
        None
    }
}
