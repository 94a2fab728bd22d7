use core::any::{Any, TypeId};

use crate::info::{TypeInfo, Typed};

// -----------------------------------------------------------------------------
// FieldFlags

bitflags::bitflags! {
    /// Encoding flags attached to a record field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FieldFlags: u8 {
        /// Skip the field when its value is empty.
        const OMIT_EMPTY = 1 << 0;
        /// Promote the fields of this member into the enclosing record.
        const EMBED      = 1 << 1;
        /// The field is visible outside its defining module.
        const PUBLIC     = 1 << 2;
    }
}

// -----------------------------------------------------------------------------
// FieldMeta

/// Per-field encoding annotation.
///
/// Built by `#[derive(Reflect)]` from `#[reflect(rename = "..", omit_empty, embed)]`
/// and the field's visibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldMeta {
    rename: Option<&'static str>,
    flags: FieldFlags,
}

impl FieldMeta {
    /// A meta with no rename and no flags.
    pub const EMPTY: Self = Self {
        rename: None,
        flags: FieldFlags::empty(),
    };

    /// Creates a new meta.
    #[inline]
    pub const fn new(rename: Option<&'static str>, flags: FieldFlags) -> Self {
        Self { rename, flags }
    }

    /// Returns the renamed key, if any.
    #[inline]
    pub const fn rename(&self) -> Option<&'static str> {
        self.rename
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn flags(&self) -> FieldFlags {
        self.flags
    }

    #[inline]
    pub const fn omit_empty(&self) -> bool {
        self.flags.contains(FieldFlags::OMIT_EMPTY)
    }

    #[inline]
    pub const fn embed(&self) -> bool {
        self.flags.contains(FieldFlags::EMBED)
    }

    #[inline]
    pub const fn is_public(&self) -> bool {
        self.flags.contains(FieldFlags::PUBLIC)
    }
}

// -----------------------------------------------------------------------------
// NamedField

/// Information for a named (struct) field.
///
/// # Examples
///
/// ```
/// use sl_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect)]
/// struct Foo {
///     #[reflect(omit_empty)]
///     pub field_a: f32,
/// }
///
/// let info = Foo::type_info().as_struct().unwrap();
/// let field = info.field_at(0).unwrap();
///
/// assert!(field.type_is::<f32>());
/// assert_eq!(field.name(), "field_a");
/// assert!(field.meta().omit_empty());
/// assert!(field.meta().is_public());
/// ```
#[derive(Clone, Debug)]
pub struct NamedField {
    ty_id: TypeId,
    name: &'static str,
    // `TypeInfo` is created on first access; using a function pointer delays it.
    type_info: fn() -> &'static TypeInfo,
    meta: FieldMeta,
}

impl NamedField {
    /// Creates a new [`NamedField`] for the given field `name` and type `T`.
    #[inline]
    pub const fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            type_info: T::type_info,
            ty_id: TypeId::of::<T>(),
            meta: FieldMeta::EMPTY,
        }
    }

    /// Replaces the field annotation.
    #[inline]
    pub const fn with_meta(mut self, meta: FieldMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Returns the `TypeId`.
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    /// Returns the field name as declared.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the field annotation.
    #[inline]
    pub const fn meta(&self) -> &FieldMeta {
        &self.meta
    }

    /// Returns the field's [`TypeInfo`].
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }
}
