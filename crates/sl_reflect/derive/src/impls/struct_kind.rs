use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

use super::{get_auto_register_impl, impl_trait_get_type_meta};
use super::{impl_trait_reflect, impl_trait_type_path, impl_trait_typed};

use crate::derive_data::ReflectStruct;
use crate::path::fp::OptionFP;

/// Implement full reflect for struct type.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();

    let type_path_trait_tokens = impl_trait_type_path(meta);
    let typed_trait_tokens = impl_trait_typed(meta, info.to_info_tokens());
    let struct_trait_tokens = impl_trait_struct(info);
    let reflect_trait_tokens = impl_trait_reflect(meta, quote!(Struct));
    let get_type_meta_tokens = impl_trait_get_type_meta(meta, get_registry_dependencies(info));
    let auto_register_tokens = get_auto_register_impl(meta);

    quote! {
        #type_path_trait_tokens

        #typed_trait_tokens

        #struct_trait_tokens

        #reflect_trait_tokens

        #get_type_meta_tokens

        #auto_register_tokens
    }
}

/// Generate `Struct` trait implementation tokens.
fn impl_trait_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();

    let sl_reflect_path = meta.sl_reflect_path();
    let struct_ = crate::path::struct_(sl_reflect_path);
    let reflect_ = crate::path::reflect_(sl_reflect_path);
    let option_ = OptionFP.to_token_stream();

    let field_names = info
        .active_fields()
        .map(|field| field.name())
        .collect::<Vec<String>>();
    let field_idents = info.active_fields().map(|field| field.ident()).collect::<Vec<_>>();
    let field_indices = (0..field_names.len()).collect::<Vec<usize>>();
    let field_count = field_names.len();

    let real_ident = meta.real_ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true, false);

    quote! {
        impl #impl_generics #struct_ for #real_ident #ty_generics #where_clause {
            fn field(&self, name: &str) -> #option_<&dyn #reflect_> {
                match name {
                    #(#field_names => #option_::Some(&self.#field_idents),)*
                    _ => #option_::None,
                }
            }

            fn field_at(&self, index: usize) -> #option_<&dyn #reflect_> {
                match index {
                    #(#field_indices => #option_::Some(&self.#field_idents),)*
                    _ => #option_::None,
                }
            }

            fn name_at(&self, index: usize) -> #option_<&str> {
                match index {
                    #(#field_indices => #option_::Some(#field_names),)*
                    _ => #option_::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_count
            }
        }
    }
}

/// Generate partial `GetTypeMeta` implementation tokens.
fn get_registry_dependencies(info: &ReflectStruct) -> TokenStream {
    let sl_reflect_path = info.meta().sl_reflect_path();
    let type_registry_ = crate::path::type_registry_(sl_reflect_path);

    let field_types = info.active_fields().map(|x| &x.data.ty);

    quote! {
        fn register_dependencies(__registry: &mut #type_registry_) {
            #(#type_registry_::register::<#field_types>(__registry);)*
        }
    }
}
