//! The emitted members of a record shape.
//!
//! A record's members are its public fields plus the members promoted from
//! fields marked `#[reflect(embed)]`, searched breadth first. When several
//! fields end up with the same name, the shallowest one wins; a renamed
//! field beats an unrenamed one at the same depth; any other tie hides the
//! name completely.
//!
//! ```
//! use sl_json::fields::type_fields;
//! use sl_reflect::{derive::Reflect, info::Typed};
//!
//! #[derive(Reflect)]
//! pub struct Audit {
//!     pub created: u64,
//!     pub id: u32,
//! }
//!
//! #[derive(Reflect)]
//! pub struct User {
//!     pub id: u64,
//!     #[reflect(embed)]
//!     pub audit: Audit,
//! }
//!
//! let fields = type_fields(User::type_info().as_struct().unwrap());
//! let names: Vec<_> = fields.iter().map(|f| f.name()).collect();
//! assert_eq!(names, ["id", "created"]);
//! assert_eq!(fields[1].index(), [1, 0]);
//! ```

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::any::TypeId;
use core::mem;

use log::debug;
use sl_reflect::info::{StructInfo, TypeInfo};
use sl_utils::hash::{HashMap, HashSet};

// -----------------------------------------------------------------------------
// FieldDescriptor

/// One emitted member of a record shape.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: &'static str,
    index: Box<[usize]>,
    tagged: bool,
    omit_empty: bool,
    type_info: &'static TypeInfo,
}

impl FieldDescriptor {
    /// The emitted name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The field positions leading from the outer record to this field.
    ///
    /// Every position but the last selects an embedded field, possibly
    /// behind a pointer.
    #[inline]
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// Whether the name comes from a valid `rename`.
    #[inline]
    pub fn tagged(&self) -> bool {
        self.tagged
    }

    /// Whether the member is left out when its value is empty.
    #[inline]
    pub fn omit_empty(&self) -> bool {
        self.omit_empty
    }

    /// The declared type of the field.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }
}

// -----------------------------------------------------------------------------
// Resolution

// First code point of every run of ten decimal digits (Unicode 15, Nd).
const DECIMAL_ZEROS: [u32; 68] = [
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6,
    0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66, 0x0CE6,
    0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040,
    0x1090, 0x17E0, 0x1810, 0x1946, 0x19D0, 0x1A80,
    0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620,
    0xA8D0, 0xA900, 0xA9D0, 0xA9F0, 0xAA50, 0xABF0,
    0xFF10, 0x104A0, 0x10D30, 0x11066, 0x110F0, 0x11136,
    0x111D0, 0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0,
    0x11730, 0x118E0, 0x11950, 0x11C50, 0x11D50, 0x11DA0,
    0x11F50, 0x16A60, 0x16AC0, 0x16B50, 0x1D7CE, 0x1D7D8,
    0x1D7E2, 0x1D7EC, 0x1D7F6, 0x1E140, 0x1E2F0, 0x1E4F0,
    0x1E950, 0x1FBF0,
];

// Decimal digits only; `½` and `²` are numeric but not decimal.
fn is_decimal_digit(c: char) -> bool {
    let c = u32::from(c);
    match DECIMAL_ZEROS.binary_search(&c) {
        Ok(_) => true,
        Err(0) => false,
        Err(i) => c - DECIMAL_ZEROS[i - 1] < 10,
    }
}

// Letter numbers such as `Ⅳ` have the Alphabetic property but are not letters.
fn is_letter(c: char) -> bool {
    c.is_alphabetic() && !c.is_numeric()
}

/// Returns `true` if `name` may be used as an emitted name.
///
/// Letters, decimal digits and the punctuation
/// ``!#$%&()*+-./:;<=>?@[]^_{|}~ `` are accepted. Other renames are ignored
/// in favor of the field name.
pub fn is_valid_tag(name: &str) -> bool {
    const PUNCT: &str = "!#$%&()*+-./:;<=>?@[]^_{|}~ ";

    !name.is_empty()
        && name
            .chars()
            .all(|c| PUNCT.contains(c) || is_letter(c) || is_decimal_digit(c))
}

// Follows static pointers to the shape they lead to.
fn deref_info(mut info: &'static TypeInfo) -> &'static TypeInfo {
    while let TypeInfo::Pointer(ptr) = info {
        match ptr.pointee_info() {
            Some(pointee) => info = pointee,
            None => break,
        }
    }
    info
}

struct Pending {
    index: Vec<usize>,
    info: &'static StructInfo,
}

/// Resolves the emitted members of a record shape, in declaration order.
///
/// Embedded records are followed breadth first and each record type is
/// expanded only once, so recursive embedding terminates.
pub fn type_fields(info: &'static StructInfo) -> Vec<FieldDescriptor> {
    let mut current: Vec<Pending> = Vec::new();
    let mut next = vec![Pending {
        index: Vec::new(),
        info,
    }];

    // Occurrences of each embedded record type at the current and next depth.
    let mut count: HashMap<TypeId, usize> = HashMap::default();
    let mut next_count: HashMap<TypeId, usize> = HashMap::default();

    let mut visited: HashSet<TypeId> = HashSet::default();
    let mut fields: Vec<FieldDescriptor> = Vec::new();

    while !next.is_empty() {
        mem::swap(&mut current, &mut next);
        next.clear();
        count = mem::take(&mut next_count);

        for pending in &current {
            if !visited.insert(pending.info.ty_id()) {
                continue;
            }
            let repeated = count.get(&pending.info.ty_id()).is_some_and(|&n| n > 1);

            for (i, field) in pending.info.iter().enumerate() {
                let meta = field.meta();
                let target = deref_info(field.type_info());

                if meta.embed() {
                    if !meta.is_public() && target.as_struct().is_err() {
                        continue;
                    }
                } else if !meta.is_public() {
                    continue;
                }

                let rename = meta.rename().filter(|name| is_valid_tag(name));

                let mut index = pending.index.clone();
                index.push(i);

                if let (None, true, Ok(inner)) = (rename, meta.embed(), target.as_struct()) {
                    let n = next_count.entry(inner.ty_id()).or_insert(0);
                    *n += 1;
                    if *n == 1 {
                        next.push(Pending { index, info: inner });
                    }
                    continue;
                }

                let descriptor = FieldDescriptor {
                    name: rename.unwrap_or(field.name()),
                    index: index.into_boxed_slice(),
                    tagged: rename.is_some(),
                    omit_empty: meta.omit_empty(),
                    type_info: field.type_info(),
                };
                // A record embedded twice at one depth yields each of its
                // fields twice, which annihilate each other below.
                if repeated {
                    fields.push(descriptor.clone());
                }
                fields.push(descriptor);
            }
        }
    }

    fields.sort_by(|a, b| {
        a.name
            .cmp(b.name)
            .then(a.index.len().cmp(&b.index.len()))
            .then(b.tagged.cmp(&a.tagged))
            .then(a.index.cmp(&b.index))
    });

    let mut out = Vec::with_capacity(fields.len());
    for group in fields.chunk_by(|a, b| a.name == b.name) {
        match group {
            [only] => out.push(only.clone()),
            [first, second, ..] if first.index.len() == second.index.len() && first.tagged == second.tagged => {
                debug!(
                    "field `{}` of `{}` is ambiguous and will not be emitted",
                    first.name,
                    info.type_path(),
                );
            }
            [first, ..] => out.push(first.clone()),
            [] => {}
        }
    }

    out.sort_by(|a, b| a.index.cmp(&b.index));
    out
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{is_valid_tag, type_fields};
    use alloc::boxed::Box;
    use alloc::vec::Vec;
    use sl_reflect::derive::Reflect;
    use sl_reflect::info::Typed;

    fn names<T: Typed>() -> Vec<&'static str> {
        type_fields(T::type_info().as_struct().unwrap())
            .iter()
            .map(|f| f.name())
            .collect()
    }

    #[derive(Reflect)]
    pub struct Plain {
        pub a: u8,
        #[reflect(rename = "bee")]
        pub b: u8,
        #[reflect(rename = "not,valid")]
        pub c: u8,
        hidden: u8,
    }

    #[test]
    fn public_fields_in_order() {
        assert_eq!(names::<Plain>(), ["a", "bee", "c"]);
        let _ = Plain { a: 0, b: 0, c: 0, hidden: 0 }.hidden;
    }

    #[test]
    fn tag_characters() {
        assert!(is_valid_tag("user-id"));
        assert!(is_valid_tag("a b"));
        assert!(is_valid_tag("ünï_1"));
        assert!(!is_valid_tag(""));
        assert!(!is_valid_tag("a,b"));
        assert!(!is_valid_tag("quote\""));
        assert!(!is_valid_tag("back\\slash"));
    }

    #[test]
    fn only_decimal_digits_count() {
        assert!(is_valid_tag("v٣"));
        assert!(is_valid_tag("x９"));
        assert!(is_valid_tag("𝟘"));
        assert!(!is_valid_tag("half½"));
        assert!(!is_valid_tag("Ⅳ"));
        assert!(!is_valid_tag("x²"));
    }

    #[derive(Reflect)]
    pub struct Inner {
        pub x: u8,
        pub y: u8,
        pub shared: u8,
    }

    #[derive(Reflect)]
    pub struct Other {
        pub shared: u8,
        #[reflect(rename = "y")]
        pub why: u8,
    }

    #[derive(Reflect)]
    pub struct Outer {
        #[reflect(embed)]
        pub inner: Inner,
        #[reflect(embed)]
        pub other: Box<Other>,
        pub x: u8,
    }

    #[test]
    fn promotion_and_dominance() {
        let fields = type_fields(Outer::type_info().as_struct().unwrap());
        let names: Vec<_> = fields.iter().map(|f| f.name()).collect();
        // `x`: depth one beats depth two.
        // `y`: renamed beats unrenamed at the same depth.
        // `shared`: two unrenamed at the same depth, dropped.
        assert_eq!(names, ["y", "x"]);
        assert_eq!(fields[0].index(), [1, 1]);
        assert!(fields[0].tagged());
        assert_eq!(fields[1].index(), [2]);
    }

    #[derive(Reflect)]
    pub struct Twice {
        #[reflect(embed)]
        pub first: Inner,
        #[reflect(embed)]
        pub second: Option<Inner>,
    }

    #[test]
    fn same_record_twice_hides_its_fields() {
        assert!(names::<Twice>().is_empty());
    }

    #[derive(Reflect)]
    pub struct Named {
        #[reflect(embed, rename = "inner")]
        pub inner: Inner,
        #[reflect(omit_empty)]
        pub note: alloc::string::String,
    }

    #[test]
    fn renamed_embed_is_a_member() {
        let fields = type_fields(Named::type_info().as_struct().unwrap());
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name(), "inner");
        assert!(fields[0].type_info().as_struct().is_ok());
        assert!(!fields[0].omit_empty());
        assert!(fields[1].omit_empty());
    }

    #[derive(Reflect)]
    pub struct Chain {
        pub id: u8,
        #[reflect(embed)]
        pub next: Option<Box<Chain>>,
    }

    #[test]
    fn recursive_embedding_terminates() {
        assert_eq!(names::<Chain>(), ["id"]);
    }
}
