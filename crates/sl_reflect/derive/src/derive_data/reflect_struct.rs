use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Field, FieldsNamed, Ident, Visibility};

use super::reflect_meta::FixedState;
use super::{FieldAttributes, ReflectMeta};
use crate::path::fp::OptionFP;

// -----------------------------------------------------------------------------
// Define

/// A named struct, the only layout reflected as a record.
pub(crate) struct ReflectStruct<'a> {
    meta: ReflectMeta<'a>,
    fields: Vec<StructField<'a>>,
}

/// A field of a [`ReflectStruct`].
pub(crate) struct StructField<'a> {
    /// The raw field.
    pub data: &'a Field,
    /// The reflection attributes on the field.
    pub attrs: FieldAttributes,
}

// -----------------------------------------------------------------------------
// StructField

impl StructField<'_> {
    pub fn ident(&self) -> &Ident {
        self.data
            .ident
            .as_ref()
            .expect("named structs only have named fields")
    }

    /// The declared name, without the raw identifier prefix.
    pub fn name(&self) -> String {
        let name = self.ident().to_string();
        match name.strip_prefix("r#") {
            Some(stripped) => stripped.to_owned(),
            None => name,
        }
    }

    /// `NamedField` construction tokens.
    fn to_info_tokens(&self, sl_reflect_path: &syn::Path) -> TokenStream {
        let named_field_ = crate::path::named_field_(sl_reflect_path);
        let field_meta_ = crate::path::field_meta_(sl_reflect_path);
        let field_flags_ = crate::path::field_flags_(sl_reflect_path);

        let ty = &self.data.ty;
        let name = self.name();

        let rename = match &self.attrs.rename {
            Some(lit) => quote!(#OptionFP::Some(#lit)),
            None => quote!(#OptionFP::None),
        };

        let mut flags = Vec::new();
        if self.attrs.omit_empty.is_some() {
            flags.push(quote!(.union(#field_flags_::OMIT_EMPTY)));
        }
        if self.attrs.embed.is_some() {
            flags.push(quote!(.union(#field_flags_::EMBED)));
        }
        if matches!(self.data.vis, Visibility::Public(_)) {
            flags.push(quote!(.union(#field_flags_::PUBLIC)));
        }

        quote! {
            #named_field_::new::<#ty>(#name).with_meta(
                #field_meta_::new(#rename, #field_flags_::empty() #(#flags)*)
            )
        }
    }
}

// -----------------------------------------------------------------------------
// ReflectStruct

impl<'a> ReflectStruct<'a> {
    pub fn new(mut meta: ReflectMeta<'a>, fields: &'a FieldsNamed) -> syn::Result<Self> {
        let fields = fields
            .named
            .iter()
            .map(|data| {
                Ok(StructField {
                    data,
                    attrs: FieldAttributes::parse_attrs(&data.attrs)?,
                })
            })
            .collect::<syn::Result<Vec<_>>>()?;

        let active_types = fields
            .iter()
            .filter(|field| field.attrs.is_active())
            .map(|field| field.data.ty.clone())
            .collect::<HashSet<_, FixedState>>();
        meta.set_active_types(active_types);

        Ok(Self { meta, fields })
    }

    #[inline]
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    /// Fields visible to reflection, in declaration order.
    pub fn active_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(|field| field.attrs.is_active())
    }

    /// `TypeInfo` tokens for this struct.
    pub fn to_info_tokens(&self) -> TokenStream {
        let sl_reflect_path = self.meta.sl_reflect_path();
        let type_info_ = crate::path::type_info_(sl_reflect_path);
        let struct_info_ = crate::path::struct_info_(sl_reflect_path);

        let fields = self
            .active_fields()
            .map(|field| field.to_info_tokens(sl_reflect_path));

        quote! {
            #type_info_::Struct(#struct_info_::new::<Self>(&[
                #(#fields),*
            ]))
        }
    }
}
