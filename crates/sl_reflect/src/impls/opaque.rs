use crate::Reflect;
use crate::derive::impl_reflect_opaque;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, TypeInfo, TypePath, Typed};
use crate::registry::{GetTypeMeta, TypeMeta};

macro_rules! impl_reflect_leaf {
    ($ty:ty) => {
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
            }
        }

        impl Reflect for $ty {
            crate::reflection::impl_reflect_fns!(Opaque);
        }

        impl GetTypeMeta for $ty {
            #[inline]
            fn get_type_meta() -> TypeMeta {
                TypeMeta::of::<Self>()
            }
        }
    };
}

impl TypePath for () {
    #[inline]
    fn type_path() -> &'static str {
        "()"
    }

    #[inline]
    fn type_name() -> &'static str {
        "()"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "()"
    }
}

impl TypePath for fn() {
    #[inline]
    fn type_path() -> &'static str {
        "fn()"
    }

    #[inline]
    fn type_name() -> &'static str {
        "fn()"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "fn"
    }
}

impl_reflect_leaf!(());
impl_reflect_leaf!(fn());

impl_reflect_opaque!(::core::time::Duration);

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{ReflectKind, TypePath};
    use core::time::Duration;

    fn callback() {}

    #[test]
    fn opaque_kinds() {
        let unit: &dyn Reflect = &();
        assert_eq!(unit.reflect_kind(), ReflectKind::Opaque);
        assert_eq!(<() as TypePath>::type_path(), "()");

        let func: fn() = callback;
        assert_eq!(func.as_reflect().reflect_kind(), ReflectKind::Opaque);

        let timeout: &dyn Reflect = &Duration::from_secs(1);
        assert_eq!(timeout.reflect_kind(), ReflectKind::Opaque);
        assert_eq!(timeout.reflect_type_path(), "core::time::Duration");
        assert_eq!(<Duration as TypePath>::type_name(), "Duration");
    }
}
