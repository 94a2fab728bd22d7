use crate::Reflect;

// -----------------------------------------------------------------------------
// List trait

/// A trait for type-erased list-like operations via reflection.
///
/// Lists are variable-length sequences such as `Vec<T>` and `VecDeque<T>`.
///
/// # Examples
///
/// ```
/// use sl_reflect::ops::List;
///
/// let list: &dyn List = &vec![1_i32, 2, 3];
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.get(1).unwrap().downcast_ref::<i32>(), Some(&2));
/// assert!(list.as_bytes().is_none());
///
/// let bytes: &dyn List = &vec![1_u8, 2];
/// assert_eq!(bytes.as_bytes(), Some(&[1_u8, 2][..]));
/// ```
pub trait List: Reflect {
    /// Returns a reference to the element at `index`, or `None` if out of bounds.
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the number of elements in the list.
    fn len(&self) -> usize;

    /// Returns `true` if the list contains no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the content as a contiguous byte slice, for byte lists.
    ///
    /// Byte lists are rendered as base64 text instead of number sequences.
    #[inline]
    fn as_bytes(&self) -> Option<&[u8]> {
        None
    }

    /// Returns `true` for an absent list as opposed to an empty one.
    ///
    /// Rust lists are always present; wrappers may override this.
    #[inline]
    fn is_absent(&self) -> bool {
        false
    }
}

impl dyn List {
    /// Returns an iterator over the list.
    #[inline]
    pub fn iter(&self) -> ListItemIter<'_> {
        ListItemIter::new(self)
    }
}

// -----------------------------------------------------------------------------
// ListItemIter

/// An iterator over the items of a list.
pub struct ListItemIter<'a> {
    list: &'a dyn List,
    index: usize,
}

impl ListItemIter<'_> {
    /// Creates a new iterator for the given list.
    #[inline(always)]
    pub const fn new(list: &dyn List) -> ListItemIter<'_> {
        ListItemIter { list, index: 0 }
    }
}

impl<'a> Iterator for ListItemIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.list.get(self.index);
        self.index += value.is_some() as usize;
        value
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.list.len() - self.index;
        (size, Some(size))
    }
}

impl ExactSizeIterator for ListItemIter<'_> {}
