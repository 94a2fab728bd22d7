use alloc::boxed::Box;
use alloc::sync::Arc;
use std::sync::OnceLock;

use crate::Reflect;
use crate::derive::impl_type_path;
use crate::impls::{GenericTypeInfoCell, NonGenericTypeInfoCell};
use crate::info::{PointerInfo, TypeInfo, TypePath, Typed};
use crate::ops::Pointer;
use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};

macro_rules! impl_reflect_for_pointer {
    ($ty:ident) => {
        impl<T: Reflect + Typed> Typed for $ty<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| TypeInfo::Pointer(PointerInfo::new::<Self, T>()))
            }
        }

        impl<T: Reflect + Typed> Reflect for $ty<T> {
            crate::reflection::impl_reflect_fns!(Pointer);
        }

        impl<T: Reflect + Typed + GetTypeMeta> GetTypeMeta for $ty<T> {
            #[inline]
            fn get_type_meta() -> TypeMeta {
                TypeMeta::of::<Self>()
            }

            fn register_dependencies(registry: &mut TypeRegistry) {
                registry.register::<T>();
            }
        }
    };
}

impl_type_path!(::core::option::Option<T>);
impl_type_path!(::alloc::boxed::Box<T>);
impl_type_path!(::alloc::sync::Arc<T>);
impl_type_path!(::std::sync::OnceLock<T>);

impl_reflect_for_pointer!(Option);
impl_reflect_for_pointer!(Box);
impl_reflect_for_pointer!(Arc);
impl_reflect_for_pointer!(OnceLock);

impl<T: Reflect + Typed> Pointer for Option<T> {
    #[inline]
    fn pointee(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(Reflect::as_reflect)
    }
}

impl<T: Reflect + Typed> Pointer for Box<T> {
    #[inline]
    fn pointee(&self) -> Option<&dyn Reflect> {
        Some(T::as_reflect(self))
    }

    #[inline]
    fn address(&self) -> Option<usize> {
        Some(core::ptr::from_ref::<T>(self).addr())
    }
}

impl<T: Reflect + Typed> Pointer for Arc<T> {
    #[inline]
    fn pointee(&self) -> Option<&dyn Reflect> {
        Some(T::as_reflect(self))
    }

    #[inline]
    fn address(&self) -> Option<usize> {
        Some(Arc::as_ptr(self).addr())
    }
}

// An unset cell reads as absent; this is how shared structures close a loop.
impl<T: Reflect + Typed> Pointer for OnceLock<T> {
    #[inline]
    fn pointee(&self) -> Option<&dyn Reflect> {
        self.get().map(Reflect::as_reflect)
    }
}

// -----------------------------------------------------------------------------
// Box<dyn Reflect>

impl TypePath for Box<dyn Reflect> {
    #[inline]
    fn type_path() -> &'static str {
        "alloc::boxed::Box<dyn sl_reflect::Reflect>"
    }

    #[inline]
    fn type_name() -> &'static str {
        "Box<dyn Reflect>"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Box"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("alloc::boxed")
    }
}

impl Typed for Box<dyn Reflect> {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Pointer(PointerInfo::dynamic::<Self>()))
    }
}

impl Reflect for Box<dyn Reflect> {
    crate::reflection::impl_reflect_fns!(Pointer);
}

impl Pointer for Box<dyn Reflect> {
    #[inline]
    fn pointee(&self) -> Option<&dyn Reflect> {
        Some(&**self)
    }

    #[inline]
    fn address(&self) -> Option<usize> {
        Some(<dyn Reflect>::address(&**self))
    }
}

impl GetTypeMeta for Box<dyn Reflect> {
    #[inline]
    fn get_type_meta() -> TypeMeta {
        TypeMeta::of::<Self>()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::{Pointer, ReflectRef};
    use alloc::boxed::Box;
    use alloc::sync::Arc;
    use std::sync::OnceLock;

    #[test]
    fn option_is_an_inline_pointer() {
        let some = Some(3_u8);
        assert_eq!(some.pointee().unwrap().downcast_ref::<u8>(), Some(&3));
        assert_eq!(some.address(), None);
        assert_eq!(
            <Option<u8> as TypePath>::type_path(),
            "core::option::Option<u8>"
        );
    }

    #[test]
    fn arc_clones_share_an_address() {
        let a = Arc::new(1_i32);
        let b = Arc::clone(&a);
        assert_eq!(a.address(), b.address());
        assert_ne!(a.address(), Arc::new(1_i32).address());
    }

    #[test]
    fn unset_cell_is_absent() {
        let cell: OnceLock<u8> = OnceLock::new();
        assert!(cell.pointee().is_none());
        let _ = cell.set(9);
        assert!(cell.pointee().is_some());
    }

    #[test]
    fn boxed_reflect_is_dynamic() {
        let boxed: Box<dyn Reflect> = Box::new(2_u16);
        let info = <Box<dyn Reflect>>::type_info().as_pointer().unwrap();
        assert!(info.is_dynamic());
        let v: &dyn Reflect = &boxed;
        let ReflectRef::Pointer(p) = v.reflect_ref() else {
            panic!("expected a pointer");
        };
        assert_eq!(p.pointee().unwrap().downcast_ref::<u16>(), Some(&2));
    }
}
