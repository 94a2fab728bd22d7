use crate::Reflect;

// -----------------------------------------------------------------------------
// Struct trait

/// A trait for type-erased struct-like operations via reflection.
///
/// Field order and names match [`StructInfo`](crate::info::StructInfo), so
/// index `i` here is field `i` there. Usually implemented by
/// [`#[derive(Reflect)]`](crate::derive::Reflect).
///
/// # Examples
///
/// ```
/// use sl_reflect::{derive::Reflect, ops::Struct};
///
/// #[derive(Reflect)]
/// struct Foo {
///     pub bar: u32,
/// }
///
/// let foo = Foo { bar: 123 };
///
/// assert_eq!(foo.field_len(), 1);
/// assert_eq!(foo.name_at(0), Some("bar"));
///
/// let field = foo.field_at(0).unwrap();
/// assert_eq!(field.downcast_ref::<u32>(), Some(&123));
/// ```
pub trait Struct: Reflect {
    /// Returns a reference to the value of the field named `name`.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    /// Returns a reference to the value of the field with index `index`.
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the name of the field with index `index`.
    fn name_at(&self, index: usize) -> Option<&str>;

    /// Returns the number of fields in the struct.
    fn field_len(&self) -> usize;
}

impl dyn Struct {
    /// Returns an iterator over the field values, in declaration order.
    #[inline]
    pub fn iter_fields(&self) -> StructFieldIter<'_> {
        StructFieldIter::new(self)
    }
}

// -----------------------------------------------------------------------------
// StructFieldIter

/// An iterator over the field values of a struct.
pub struct StructFieldIter<'a> {
    inner: &'a dyn Struct,
    index: usize,
}

impl StructFieldIter<'_> {
    /// Creates a new [`StructFieldIter`].
    #[inline(always)]
    pub const fn new(value: &dyn Struct) -> StructFieldIter<'_> {
        StructFieldIter {
            inner: value,
            index: 0,
        }
    }
}

impl<'a> Iterator for StructFieldIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.inner.field_at(self.index);
        self.index += value.is_some() as usize;
        value
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.inner.field_len() - self.index;
        (size, Some(size))
    }
}

impl ExactSizeIterator for StructFieldIter<'_> {}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Struct;
    use crate::derive::Reflect;
    use alloc::string::String;
    use alloc::vec::Vec;

    #[derive(Reflect)]
    struct Row {
        pub id: u32,
        pub label: String,
        pub weights: Vec<u8>,
    }

    #[test]
    fn derived_accessors_cover_every_field() {
        let row = Row {
            id: 7,
            label: String::from("x"),
            weights: Vec::new(),
        };

        assert_eq!(row.field_len(), 3);
        assert_eq!(row.name_at(0), Some("id"));
        assert_eq!(row.name_at(2), Some("weights"));
        assert_eq!(row.name_at(3), None);

        assert_eq!(row.field_at(0).unwrap().downcast_ref::<u32>(), Some(&7));
        assert!(row.field_at(3).is_none());
        assert_eq!(
            row.field("label").unwrap().downcast_ref::<String>().map(String::as_str),
            Some("x"),
        );
        assert!(row.field("missing").is_none());

        let dynamic: &dyn Struct = &row;
        assert_eq!(dynamic.iter_fields().len(), 3);
    }
}
