use proc_macro2::TokenStream;
use quote::quote;

#[inline]
pub(crate) fn type_meta_(sl_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #sl_reflect_path::registry::TypeMeta
    }
}

#[inline]
pub(crate) fn get_type_meta_(sl_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #sl_reflect_path::registry::GetTypeMeta
    }
}

#[inline]
pub(crate) fn from_type_(sl_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #sl_reflect_path::registry::FromType
    }
}

#[inline]
pub(crate) fn type_registry_(sl_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #sl_reflect_path::registry::TypeRegistry
    }
}

#[inline]
pub(crate) fn type_trait_marshal_json_(sl_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #sl_reflect_path::registry::TypeTraitMarshalJson
    }
}

#[inline]
pub(crate) fn type_trait_marshal_text_(sl_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #sl_reflect_path::registry::TypeTraitMarshalText
    }
}
