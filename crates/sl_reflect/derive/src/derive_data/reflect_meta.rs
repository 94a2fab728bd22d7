use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Generics, ImplGenerics, Path, Token, Type, TypeGenerics, punctuated::Punctuated};

use super::{TypeAttributes, TypeParser};
use crate::utils::StringExpr;

pub(crate) struct ReflectMeta<'a> {
    sl_reflect_path: Path,
    attrs: TypeAttributes,
    type_parser: TypeParser<'a>,
    // `syn::Type` has no `Ord`, so no `BTreeSet`.
    active_types: HashSet<Type, FixedState>,
}

impl core::fmt::Debug for ReflectMeta<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReflectMeta")
            .field("sl_reflect_path", &self.sl_reflect_path.to_token_stream())
            .field("type_parser", &self.type_parser)
            .field("attrs", &self.attrs)
            .finish()
    }
}

impl<'a> ReflectMeta<'a> {
    #[inline]
    pub fn new(attrs: TypeAttributes, type_parser: TypeParser<'a>) -> Self {
        Self {
            attrs,
            type_parser,
            sl_reflect_path: crate::path::sl_reflect(),
            active_types: HashSet::default(),
        }
    }

    /// Set by [`ReflectStruct`](crate::derive_data::ReflectStruct) to the
    /// types of its reflected fields.
    #[inline]
    pub(super) fn set_active_types(&mut self, active_types: HashSet<Type, FixedState>) {
        self.active_types = active_types;
    }

    #[inline]
    pub fn sl_reflect_path(&self) -> &Path {
        &self.sl_reflect_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn generics(&self) -> &'a Generics {
        self.type_parser.generics()
    }

    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        self.type_parser.impl_with_generic()
    }

    #[inline]
    pub fn real_ident(&self) -> TokenStream {
        self.type_parser.real_ident()
    }

    #[inline]
    pub fn module_path(&self) -> Option<StringExpr> {
        self.type_parser.module_path()
    }

    #[inline]
    pub fn type_ident(&self) -> StringExpr {
        self.type_parser.type_ident()
    }

    #[inline]
    pub fn assert_ident_tokens(&self) -> TokenStream {
        #[cfg(debug_assertions)]
        if let TypeParser::Primitive(_) = &self.type_parser {
            let ident = self.real_ident();
            return quote! {
                mod __assert_primitive_ident {
                    type AssertIdentValidity = #ident;
                }
            };
        }
        crate::utils::empty()
    }

    #[inline]
    pub fn type_name(&self) -> StringExpr {
        self.type_parser.type_name(&self.sl_reflect_path)
    }

    #[inline]
    pub fn type_path(&self) -> StringExpr {
        self.type_parser.type_path(&self.sl_reflect_path)
    }

    #[inline]
    pub fn type_name_into_owned(&self) -> TokenStream {
        self.type_name().into_owned(&self.sl_reflect_path)
    }

    #[inline]
    pub fn type_path_into_owned(&self) -> TokenStream {
        self.type_path().into_owned(&self.sl_reflect_path)
    }

    /// Return `impl_generics`, `ty_generics` and the `where` clause.
    ///
    /// ```ignore
    /// let real_ident = meta.real_ident();
    /// let (impl_generics, ty_generics, where_clause) = meta.split_generics(true, false);
    ///
    /// quote! {
    ///     impl #impl_generics TraitName for #real_ident #ty_generics #where_clause {
    ///         /* ... */
    ///     }
    /// }
    /// ```
    ///
    /// ## Bounds
    ///
    /// - Type itself:
    ///     - `'static`: if it has lifetime params.
    ///     - `Any + Send + Sync`: if it has type params.
    /// - Type params: `TypePath`, always.
    /// - Field types mentioning a type param:
    ///     - `Reflect + Typed`: if `add_reflect_typed`, i.e. every trait but `TypePath`.
    ///     - `GetTypeMeta`: if `add_get_type_meta`, for `register_dependencies`.
    pub fn split_generics(
        &self,
        add_reflect_typed: bool,
        add_get_type_meta: bool,
    ) -> (ImplGenerics<'_>, TypeGenerics<'_>, TokenStream) {
        use crate::path::fp::{AnyFP, SendFP, SyncFP};

        let generics = self.generics();

        let mut generic_where_clause = quote! { where };

        if generics.type_params().next().is_some() {
            generic_where_clause.extend(quote! { Self: #AnyFP + #SendFP + #SyncFP, });
        } else if generics.lifetimes().next().is_some() {
            generic_where_clause.extend(quote! { Self: 'static, });
        }

        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        // Maintain existing where clause bounds, if any.
        if let Some(where_clause) = where_clause {
            let predicates = where_clause.predicates.iter();
            generic_where_clause.extend(quote! { #(#predicates,)* });
        }

        let mut predicates: Punctuated<TokenStream, Token![,]> = Punctuated::new();

        predicates.extend(self.type_path_predicates());

        if add_reflect_typed {
            predicates.extend(self.field_type_predicates(add_get_type_meta));
        }

        generic_where_clause.extend(quote! { #predicates });

        (impl_generics, ty_generics, generic_where_clause)
    }

    fn type_path_predicates(&self) -> impl Iterator<Item = TokenStream> + '_ {
        let type_path_ = crate::path::type_path_(&self.sl_reflect_path);
        self.generics().type_params().map(move |param| {
            let ident = &param.ident;
            quote!(#ident : #type_path_)
        })
    }

    fn field_type_predicates(&self, add_get_type_meta: bool) -> Vec<TokenStream> {
        let type_param_idents = self
            .generics()
            .type_params()
            .map(|type_param| type_param.ident.clone())
            .collect::<Vec<syn::Ident>>();

        if type_param_idents.is_empty() || self.active_types.is_empty() {
            return Vec::new();
        }

        let sl_reflect_path = &self.sl_reflect_path;
        let reflect_ = crate::path::reflect_(sl_reflect_path);
        let typed_ = crate::path::typed_(sl_reflect_path);

        let get_type_meta_ = if add_get_type_meta {
            let get_type_meta_ = crate::path::get_type_meta_(sl_reflect_path);
            quote!( + #get_type_meta_ )
        } else {
            crate::utils::empty()
        };

        // Do any of the identifiers in `idents` appear in `token_stream`?
        fn is_any_ident_in_token_stream(idents: &[syn::Ident], token_stream: TokenStream) -> bool {
            token_stream.into_iter().any(|token_tree| match token_tree {
                proc_macro2::TokenTree::Ident(ident) => idents.contains(&ident),
                proc_macro2::TokenTree::Group(group) => {
                    is_any_ident_in_token_stream(idents, group.stream())
                }
                _ => false,
            })
        }

        // Sorted so the generated `where` clause is stable between builds.
        let mut types = self
            .active_types
            .iter()
            .filter(|ty| is_any_ident_in_token_stream(&type_param_idents, ty.to_token_stream()))
            .map(|ty| ty.to_token_stream())
            .collect::<Vec<_>>();
        types.sort_by_cached_key(ToString::to_string);

        types
            .into_iter()
            .map(|ty| quote! { #ty: #reflect_ + #typed_ #get_type_meta_ })
            .collect()
    }

    /// `TypeInfo` tokens for opaque types.
    pub fn to_info_tokens(&self) -> TokenStream {
        let sl_reflect_path = &self.sl_reflect_path;

        let opaque_info_ = crate::path::opaque_info_(sl_reflect_path);
        let type_info_ = crate::path::type_info_(sl_reflect_path);

        quote! {
            #type_info_::Opaque(#opaque_info_::new::<Self>())
        }
    }
}

pub(crate) struct FixedHasher(u64);

impl core::hash::Hasher for FixedHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.0 = self.0.rotate_right(8).wrapping_add(*b as u64)
        }
    }
}

/// A deterministic hash state, so a `HashSet<Type>` built twice from the
/// same input behaves the same way.
#[derive(Copy, Clone, Default)]
pub(super) struct FixedState;

impl core::hash::BuildHasher for FixedState {
    type Hasher = FixedHasher;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        FixedHasher(0)
    }
}
