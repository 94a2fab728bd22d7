use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::any::Any;

use crate::Reflect;
use crate::derive::impl_type_path;
use crate::impls::GenericTypeInfoCell;
use crate::info::{ListInfo, TypeInfo, Typed};
use crate::ops::List;
use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};

impl_type_path!(::alloc::vec::Vec<T>);
impl_type_path!(::alloc::collections::VecDeque<T>);

macro_rules! impl_reflect_for_list {
    ($ty:ident) => {
        impl<T: Reflect + Typed> Typed for $ty<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| TypeInfo::List(ListInfo::new::<Self, T>()))
            }
        }

        impl<T: Reflect + Typed> Reflect for $ty<T> {
            crate::reflection::impl_reflect_fns!(List);
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

impl_reflect_for_list!(Vec);
impl_reflect_for_list!(VecDeque);

impl<T: Reflect + Typed> List for Vec<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(Reflect::as_reflect)
    }

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn as_bytes(&self) -> Option<&[u8]> {
        <dyn Any>::downcast_ref::<Vec<u8>>(self).map(Vec::as_slice)
    }
}

impl<T: Reflect + Typed> List for VecDeque<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        VecDeque::get(self, index).map(Reflect::as_reflect)
    }

    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::List;
    use alloc::collections::VecDeque;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn byte_vectors_expose_their_slice() {
        let bytes: Vec<u8> = vec![0, 255];
        assert_eq!(List::as_bytes(&bytes), Some(&[0_u8, 255][..]));
        let words: Vec<u16> = vec![1];
        assert!(List::as_bytes(&words).is_none());
    }

    #[test]
    fn deque_items_are_reflected_in_order() {
        let mut deque = VecDeque::new();
        deque.push_back(2_i32);
        deque.push_front(1_i32);
        let list: &dyn List = &deque;
        let items: Vec<i32> = list
            .iter()
            .filter_map(|v| v.downcast_ref::<i32>().copied())
            .collect();
        assert_eq!(items, [1, 2]);
    }

    #[test]
    fn list_paths_and_info() {
        assert_eq!(<Vec<u8> as TypePath>::type_path(), "alloc::vec::Vec<u8>");
        assert_eq!(<Vec<u8> as TypePath>::type_name(), "Vec<u8>");
        let info = <VecDeque<bool>>::type_info().as_list().unwrap();
        assert!(info.item_is::<bool>());
        let v: &dyn Reflect = &Vec::<u8>::new();
        assert_eq!(v.reflect_type_path(), "alloc::vec::Vec<u8>");
    }
}
