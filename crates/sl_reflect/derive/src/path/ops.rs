use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn reflect_ref_(sl_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #sl_reflect_path::ops::ReflectRef
    }
}

#[inline(always)]
pub(crate) fn struct_(sl_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #sl_reflect_path::ops::Struct
    }
}
