use syn::{Data, DeriveInput, Fields, spanned::Spanned};

use super::{ReflectMeta, ReflectStruct, TypeAttributes, TypeParser};

/// The parsed input of `#[derive(Reflect)]`.
pub(crate) enum ReflectDerive<'a> {
    Struct(ReflectStruct<'a>),
    Opaque(ReflectMeta<'a>),
}

impl<'a> ReflectDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let parser = TypeParser::new_local(&input.ident, attrs.type_path.clone(), &input.generics);
        let meta = ReflectMeta::new(attrs, parser);

        if meta.attrs().is_opaque.is_some() {
            return Ok(Self::Opaque(meta));
        }

        match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(fields) => Ok(Self::Struct(ReflectStruct::new(meta, fields)?)),
                Fields::Unit => Ok(Self::Opaque(meta)),
                Fields::Unnamed(fields) => Err(syn::Error::new(
                    fields.span(),
                    "tuple structs have no member names, mark the type `#[reflect(opaque)]`",
                )),
            },
            Data::Enum(data) => Err(syn::Error::new(
                data.enum_token.span(),
                "enums have no record layout, mark the type `#[reflect(opaque)]`",
            )),
            Data::Union(data) => Err(syn::Error::new(
                data.union_token.span(),
                "unions are not supported, mark the type `#[reflect(opaque)]`",
            )),
        }
    }
}
