use alloc::borrow::Cow;
use alloc::string::String;

use crate::Reflect;
use crate::derive::impl_type_path;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{ScalarInfo, ScalarKind, TypeInfo, TypePath, Typed};
use crate::ops::{ReflectRef, ScalarRef};
use crate::registry::{GetTypeMeta, TypeMeta};

macro_rules! impl_reflect_scalar {
    ($ty:ty, $kind:ident, |$this:ident| $view:expr) => {
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Scalar(ScalarInfo::new::<Self>(ScalarKind::$kind)))
            }
        }

        impl Reflect for $ty {
            #[inline]
            fn reflect_type_info(&self) -> &'static TypeInfo {
                <Self as Typed>::type_info()
            }

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                let $this = self;
                ReflectRef::Scalar($view)
            }

            #[inline]
            fn as_reflect(&self) -> &dyn Reflect {
                self
            }
        }

        impl GetTypeMeta for $ty {
            #[inline]
            fn get_type_meta() -> TypeMeta {
                TypeMeta::of::<Self>()
            }
        }
    };
}

impl_type_path!(bool);
impl_type_path!(char);
impl_type_path!(i8);
impl_type_path!(i16);
impl_type_path!(i32);
impl_type_path!(i64);
impl_type_path!(isize);
impl_type_path!(u8);
impl_type_path!(u16);
impl_type_path!(u32);
impl_type_path!(u64);
impl_type_path!(usize);
impl_type_path!(f32);
impl_type_path!(f64);
impl_type_path!(::alloc::string::String);

impl_reflect_scalar!(bool, Bool, |v| ScalarRef::Bool(*v));
impl_reflect_scalar!(char, Char, |v| ScalarRef::Char(*v));
impl_reflect_scalar!(i8, Int, |v| ScalarRef::Int(i64::from(*v)));
impl_reflect_scalar!(i16, Int, |v| ScalarRef::Int(i64::from(*v)));
impl_reflect_scalar!(i32, Int, |v| ScalarRef::Int(i64::from(*v)));
impl_reflect_scalar!(i64, Int, |v| ScalarRef::Int(*v));
impl_reflect_scalar!(isize, Int, |v| ScalarRef::Int(*v as i64));
impl_reflect_scalar!(u8, Uint, |v| ScalarRef::Uint(u64::from(*v)));
impl_reflect_scalar!(u16, Uint, |v| ScalarRef::Uint(u64::from(*v)));
impl_reflect_scalar!(u32, Uint, |v| ScalarRef::Uint(u64::from(*v)));
impl_reflect_scalar!(u64, Uint, |v| ScalarRef::Uint(*v));
impl_reflect_scalar!(usize, Uint, |v| ScalarRef::Uint(*v as u64));
impl_reflect_scalar!(f32, F32, |v| ScalarRef::F32(*v));
impl_reflect_scalar!(f64, F64, |v| ScalarRef::F64(*v));
impl_reflect_scalar!(String, String, |v| ScalarRef::Str(v.as_str()));
impl_reflect_scalar!(&'static str, String, |v| ScalarRef::Str(*v));
impl_reflect_scalar!(Cow<'static, str>, String, |v| ScalarRef::Str(v.as_ref()));

impl TypePath for &'static str {
    #[inline]
    fn type_path() -> &'static str {
        "&str"
    }

    #[inline]
    fn type_name() -> &'static str {
        "&str"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "&str"
    }
}

impl TypePath for Cow<'static, str> {
    #[inline]
    fn type_path() -> &'static str {
        "alloc::borrow::Cow<str>"
    }

    #[inline]
    fn type_name() -> &'static str {
        "Cow<str>"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Cow"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("alloc::borrow")
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{ScalarKind, TypePath, Typed};
    use crate::ops::ScalarRef;
    use alloc::borrow::Cow;
    use alloc::string::String;

    #[test]
    fn integers_are_widened() {
        let v: &dyn Reflect = &-3_i8;
        assert_eq!(v.reflect_ref().as_scalar().unwrap(), ScalarRef::Int(-3));
        let v: &dyn Reflect = &7_usize;
        assert_eq!(v.reflect_ref().as_scalar().unwrap(), ScalarRef::Uint(7));
    }

    #[test]
    fn floats_keep_their_width() {
        let v: &dyn Reflect = &0.5_f32;
        assert_eq!(v.reflect_ref().as_scalar().unwrap(), ScalarRef::F32(0.5));
        let kind = f64::type_info().as_scalar().unwrap().scalar_kind();
        assert_eq!(kind, ScalarKind::F64);
    }

    #[test]
    fn string_like_types_share_kind() {
        let owned = String::from("a");
        let cow: Cow<'static, str> = Cow::Borrowed("b");
        for v in [&owned as &dyn Reflect, &"c" as &dyn Reflect, &cow as &dyn Reflect] {
            assert!(matches!(v.reflect_ref().as_scalar().unwrap(), ScalarRef::Str(_)));
        }
        assert_eq!(<String as TypePath>::type_path(), "alloc::string::String");
        assert_eq!(<u16 as TypePath>::type_path(), "u16");
    }
}
