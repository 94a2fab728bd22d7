use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use sl_reflect::info::{ScalarKind, TypeInfo};
use sl_reflect::registry::{TypeTraitMarshalJson, TypeTraitMarshalText};

use crate::cache::SlotRef;
use crate::config::Style;
use crate::fields::{FieldDescriptor, type_fields};
use crate::format::string::{escape_str, write_quoted};
use crate::Encoder;

// -----------------------------------------------------------------------------
// Strategy

/// How values of one shape are written.
///
/// A type's own capabilities take precedence over its structure: an encoded
/// form first, then a text form, then the kind of the shape.
pub(crate) enum Strategy {
    MarshalJson(TypeTraitMarshalJson),
    MarshalText(TypeTraitMarshalText),
    Scalar,
    /// A list of bytes, written as a base64 string.
    Bytes,
    List(SlotRef),
    Array(SlotRef),
    Map(MapStrategy),
    /// `None` for dynamic pointers, whose target shape is only known from
    /// the value.
    Pointer(Option<SlotRef>),
    Struct(StructStrategy),
    Unsupported,
}

pub(crate) struct MapStrategy {
    pub key: KeyStrategy,
    pub value: SlotRef,
}

/// How a map key becomes a string.
#[derive(Clone)]
pub(crate) enum KeyStrategy {
    /// String and character keys are used as they are.
    Str,
    Text(TypeTraitMarshalText),
    /// Integers are written in decimal.
    Int,
}

pub(crate) struct StructStrategy {
    pub fields: Box<[EncodedField]>,
}

pub(crate) struct EncodedField {
    pub descriptor: FieldDescriptor,
    /// The member name and separator, rendered for the encoder's style.
    pub key: Box<[u8]>,
    pub slot: SlotRef,
}

impl Strategy {
    /// Builds the strategy for `info`.
    ///
    /// Child shapes are only looked up in the cache, never built here.
    pub fn build(info: &'static TypeInfo, encoder: &Encoder) -> Self {
        let type_id = info.ty_id();
        {
            let registry = encoder.registry.read();
            if let Some(marshal) = registry.get_type_trait::<TypeTraitMarshalJson>(type_id) {
                return Self::MarshalJson(marshal.clone());
            }
            if let Some(marshal) = registry.get_type_trait::<TypeTraitMarshalText>(type_id) {
                return Self::MarshalText(marshal.clone());
            }
        }

        match info {
            TypeInfo::Scalar(_) => Self::Scalar,
            TypeInfo::List(list) if list.item_is::<u8>() => Self::Bytes,
            TypeInfo::List(list) => Self::List(encoder.cache.slot(list.item_info())),
            TypeInfo::Array(array) => Self::Array(encoder.cache.slot(array.item_info())),
            TypeInfo::Map(map) => match KeyStrategy::build(map.key_info(), encoder) {
                Some(key) => Self::Map(MapStrategy {
                    key,
                    value: encoder.cache.slot(map.value_info()),
                }),
                None => Self::Unsupported,
            },
            TypeInfo::Pointer(ptr) => {
                Self::Pointer(ptr.pointee_info().map(|pointee| encoder.cache.slot(pointee)))
            }
            TypeInfo::Struct(info) => {
                let style = encoder.config.style();
                let html = encoder.config.escape_html();
                let fields: Vec<EncodedField> = type_fields(info)
                    .into_iter()
                    .map(|descriptor| EncodedField {
                        key: render_key(descriptor.name(), style, html),
                        slot: encoder.cache.slot(descriptor.type_info()),
                        descriptor,
                    })
                    .collect();
                Self::Struct(StructStrategy {
                    fields: fields.into_boxed_slice(),
                })
            }
            TypeInfo::Opaque(_) => Self::Unsupported,
        }
    }

    /// A short name for log output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MarshalJson(_) => "marshal_json",
            Self::MarshalText(_) => "marshal_text",
            Self::Scalar => "scalar",
            Self::Bytes => "bytes",
            Self::List(_) => "list",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::Pointer(_) => "pointer",
            Self::Struct(_) => "struct",
            Self::Unsupported => "unsupported",
        }
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl KeyStrategy {
    fn build(info: &'static TypeInfo, encoder: &Encoder) -> Option<Self> {
        if let TypeInfo::Scalar(scalar) = info
            && matches!(scalar.scalar_kind(), ScalarKind::String | ScalarKind::Char)
        {
            return Some(Self::Str);
        }
        if let Some(marshal) = encoder
            .registry
            .read()
            .get_type_trait::<TypeTraitMarshalText>(info.ty_id())
        {
            return Some(Self::Text(marshal.clone()));
        }
        match info {
            TypeInfo::Scalar(scalar) if scalar.scalar_kind().is_integer() => Some(Self::Int),
            _ => None,
        }
    }
}

/// Renders a member name followed by its separator.
///
/// Human output writes `name: `, strict output writes `"name":`.
pub(crate) fn render_key(name: &str, style: Style, escape_html: bool) -> Box<[u8]> {
    let mut key = Vec::with_capacity(name.len() + 3);
    match style {
        Style::Human => {
            escape_str(&mut key, name, escape_html);
            key.extend_from_slice(b": ");
        }
        Style::Strict => {
            write_quoted(&mut key, name, escape_html);
            key.push(b':');
        }
    }
    key.into_boxed_slice()
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Strategy, render_key};
    use crate::config::Style;
    use crate::{Encoder, EncoderConfig};
    use alloc::collections::BTreeMap;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;
    use sl_reflect::info::Typed;
    use sl_reflect::registry::{TypeRegistry, TypeRegistryArc};

    fn strategy_name(info: &'static sl_reflect::info::TypeInfo) -> &'static str {
        let encoder = Encoder::new(TypeRegistryArc::new(TypeRegistry::new()), EncoderConfig::new());
        let slot = encoder.cache.slot(info);
        slot.get(&encoder).name()
    }

    #[test]
    fn kinds() {
        assert_eq!(strategy_name(u8::type_info()), "scalar");
        assert_eq!(strategy_name(<Vec<u8>>::type_info()), "bytes");
        assert_eq!(strategy_name(<[u8; 4]>::type_info()), "array");
        assert_eq!(strategy_name(<Vec<String>>::type_info()), "list");
        assert_eq!(strategy_name(<Option<u8>>::type_info()), "pointer");
        assert_eq!(strategy_name(<BTreeMap<String, u8>>::type_info()), "map");
        assert_eq!(strategy_name(<BTreeMap<i16, u8>>::type_info()), "map");
        assert_eq!(strategy_name(<BTreeMap<bool, u8>>::type_info()), "unsupported");
        assert_eq!(strategy_name(<()>::type_info()), "unsupported");
    }

    #[test]
    fn children_are_not_built_eagerly() {
        let encoder = Encoder::new(TypeRegistryArc::new(TypeRegistry::new()), EncoderConfig::new());
        let slot = encoder.cache.slot(<Vec<Vec<String>>>::type_info());
        let Strategy::List(item) = slot.get(&encoder) else {
            panic!("expected a list strategy");
        };
        assert_eq!(item.info().type_path(), <Vec<String>>::type_info().type_path());
        assert!(format!("{item:?}").contains("ready: false"));
    }

    #[test]
    fn keys_follow_the_style() {
        assert_eq!(&*render_key("id", Style::Human, false), b"id: ");
        assert_eq!(&*render_key("id", Style::Strict, false), b"\"id\":");
        assert_eq!(&*render_key("a\"b", Style::Strict, false), b"\"a\\\"b\":");
        assert_eq!(&*render_key("<x>", Style::Human, false), b"<x>: ");
    }
}
