use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

/// A capability that can be attached to a registered type.
///
/// Type traits are stored in a [`TypeMeta`](crate::registry::TypeMeta) and
/// looked up by their own [`TypeId`](core::any::TypeId). They are usually
/// created through [`FromType`](crate::registry::FromType).
///
/// Implemented for every `Clone + Send + Sync + 'static` type.
pub trait TypeTrait: Any + Send + Sync {
    /// Clones the type trait into a new box.
    fn clone_type_trait(&self) -> Box<dyn TypeTrait>;
}

impl<T: Clone + Any + Send + Sync> TypeTrait for T {
    #[inline]
    fn clone_type_trait(&self) -> Box<dyn TypeTrait> {
        Box::new(self.clone())
    }
}

impl dyn TypeTrait {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref()
    }
}

impl fmt::Debug for dyn TypeTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TypeTrait")
    }
}
