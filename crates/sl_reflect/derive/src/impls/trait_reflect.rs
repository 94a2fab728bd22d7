use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;

/// Generate implementation code for `Reflect` trait.
///
/// `reflect_kind_token` is the `ReflectRef` variant, such as `Struct`.
pub(crate) fn impl_trait_reflect(meta: &ReflectMeta, reflect_kind_token: TokenStream) -> TokenStream {
    let sl_reflect_path = meta.sl_reflect_path();

    let reflect_ = crate::path::reflect_(sl_reflect_path);
    let typed_ = crate::path::typed_(sl_reflect_path);
    let type_info_ = crate::path::type_info_(sl_reflect_path);
    let reflect_ref_ = crate::path::reflect_ref_(sl_reflect_path);

    let real_ident = meta.real_ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true, false);

    quote! {
        impl #impl_generics #reflect_ for #real_ident #ty_generics #where_clause {
            #[inline]
            fn reflect_type_info(&self) -> &'static #type_info_ {
                <Self as #typed_>::type_info()
            }

            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::#reflect_kind_token(self)
            }

            #[inline]
            fn as_reflect(&self) -> &dyn #reflect_ {
                self
            }
        }
    }
}
