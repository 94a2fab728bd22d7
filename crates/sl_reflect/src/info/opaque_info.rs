use crate::Reflect;
use crate::info::{Type, TypePath, impl_type_fn};

/// Metadata for types whose internals are hidden from reflection.
///
/// The encoder can only render such values through a capability such as
/// `MarshalJson` or `MarshalText`; otherwise they are unsupported.
#[derive(Debug, Clone)]
pub struct OpaqueInfo {
    ty: Type,
}

impl OpaqueInfo {
    impl_type_fn!(ty);

    /// Create a new [`OpaqueInfo`].
    #[inline]
    pub const fn new<T: Reflect + TypePath + ?Sized>() -> Self {
        Self { ty: Type::of::<T>() }
    }
}
