use proc_macro2::TokenStream;
use quote::quote;

#[inline]
pub(crate) fn type_path_(sl_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #sl_reflect_path::info::TypePath
    }
}

#[inline]
pub(crate) fn typed_(sl_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #sl_reflect_path::info::Typed
    }
}

#[inline]
pub(crate) fn type_info_(sl_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #sl_reflect_path::info::TypeInfo
    }
}

#[inline(always)]
pub(crate) fn opaque_info_(sl_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #sl_reflect_path::info::OpaqueInfo
    }
}

#[inline(always)]
pub(crate) fn struct_info_(sl_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #sl_reflect_path::info::StructInfo
    }
}

#[inline(always)]
pub(crate) fn named_field_(sl_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #sl_reflect_path::info::NamedField
    }
}

#[inline(always)]
pub(crate) fn field_meta_(sl_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #sl_reflect_path::info::FieldMeta
    }
}

#[inline(always)]
pub(crate) fn field_flags_(sl_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #sl_reflect_path::info::FieldFlags
    }
}
