//! Items used by code generated from `sl_reflect_derive`.

/// Re-exports of `alloc` and `core` items, so generated code does not
/// depend on the user's prelude.
pub mod macro_utils {
    pub use ::alloc::borrow::ToOwned;
    pub use ::alloc::boxed::Box;
    pub use ::alloc::string::String;
    pub use ::alloc::string::ToString;
    pub use ::core::option::Option;

    pub use crate::impls::concat as __concat;
}

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use ::inventory;

    use crate::info::{OpaqueInfo, TypeInfo, TypePath, Typed};
    use crate::ops::ReflectRef;
    use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};
    use crate::{Reflect, impls::NonGenericTypeInfoCell};

    /// A registration function collected by `inventory`.
    pub struct __AutoRegisterFunc(pub fn(&mut TypeRegistry));

    inventory::collect!(__AutoRegisterFunc);

    /// Registers a type through its `GetTypeMeta` implementation.
    pub trait __RegisterType {
        fn __register(registry: &mut TypeRegistry);
    }

    impl<T: GetTypeMeta> __RegisterType for T {
        #[inline]
        fn __register(registry: &mut TypeRegistry) {
            registry.register::<T>();
        }
    }

    /// Marker type, its presence proves the inventory was walked.
    pub struct __AvailFlag;

    impl TypePath for __AvailFlag {
        fn type_path() -> &'static str {
            "sl_reflect::__macro_exports::auto_register::__AvailFlag"
        }
        fn type_name() -> &'static str {
            "__AvailFlag"
        }
        fn type_ident() -> &'static str {
            "__AvailFlag"
        }
    }

    impl Typed for __AvailFlag {
        fn type_info() -> &'static TypeInfo {
            static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
        }
    }

    impl Reflect for __AvailFlag {
        fn reflect_type_info(&self) -> &'static TypeInfo {
            Self::type_info()
        }
        fn reflect_ref(&self) -> ReflectRef<'_> {
            ReflectRef::Opaque(self)
        }
        fn as_reflect(&self) -> &dyn Reflect {
            self
        }
    }

    impl GetTypeMeta for __AvailFlag {
        fn get_type_meta() -> TypeMeta {
            TypeMeta::of::<Self>()
        }
    }

    inventory::submit! { __AutoRegisterFunc(<__AvailFlag as __RegisterType>::__register) }

    /// Runs every collected registration function.
    pub fn __register_types(registry: &mut TypeRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }
}
