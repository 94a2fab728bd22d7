use crate::utils::StringExpr;
use quote::{ToTokens, quote};
use syn::{
    GenericParam, Generics, Ident, LitStr, Path, TypeParam, punctuated::Punctuated,
    spanned::Spanned,
};

/// Type paths and generic parameters of the type being implemented.
///
/// Only used inside [`ReflectMeta`](crate::derive_data::ReflectMeta).
pub(crate) enum TypeParser<'a> {
    /// Types without a crate/module that can be named from any scope (e.g. `bool`).
    Primitive(&'a Ident),
    /// The type can be reached with just its ident; the module path comes
    /// from [`module_path!()`](module_path).
    Local {
        ident: &'a Ident,
        custom_path: Option<Path>,
        generics: &'a Generics,
    },
    /// [`module_path!()`](module_path) does not apply, the caller gives
    /// the complete path with `::my_crate::foo::Bar` syntax.
    Foreign {
        path: &'a Path,
        custom_path: Option<Path>,
        generics: &'a Generics,
    },
}

impl core::fmt::Debug for TypeParser<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.real_ident(), f)
    }
}

impl<'a> TypeParser<'a> {
    pub(crate) fn new_local(
        ident: &'a Ident,
        custom_path: Option<Path>,
        generics: &'a Generics,
    ) -> TypeParser<'a> {
        TypeParser::Local {
            ident,
            custom_path,
            generics,
        }
    }

    /// See [`impl_reflect_opaque`](crate::impl_reflect_opaque) and [`impl_type_path`](crate::impl_type_path)
    pub(crate) fn new_foreign(
        ident: &'a Ident,
        path: &'a Path,
        custom_path: Option<Path>,
        generics: &'a Generics,
    ) -> TypeParser<'a> {
        if custom_path.is_none() && path.leading_colon.is_none() {
            TypeParser::Primitive(ident)
        } else {
            TypeParser::Foreign {
                path,
                custom_path,
                generics,
            }
        }
    }

    pub(super) fn generics(&self) -> &'a Generics {
        // A constant, because the reference must live for at least 'a.
        const EMPTY_GENERICS: &Generics = &Generics {
            gt_token: None,
            lt_token: None,
            where_clause: None,
            params: Punctuated::new(),
        };

        match self {
            Self::Local { generics, .. } | Self::Foreign { generics, .. } => generics,
            Self::Primitive(_) => EMPTY_GENERICS,
        }
    }

    /// Whether an implementation of `Typed` or `TypePath` should be generic.
    pub(super) fn impl_with_generic(&self) -> bool {
        self.generics()
            .params
            .iter()
            .any(|param| !matches!(param, GenericParam::Lifetime(_)))
    }

    /// This name is used in `impl ... for #real_ident {...}`.
    pub(super) fn real_ident(&self) -> proc_macro2::TokenStream {
        match self {
            Self::Local { ident, .. } | Self::Primitive(ident) => ident.to_token_stream(),
            Self::Foreign { path, .. } => path.to_token_stream(),
        }
    }

    fn get_ident(&self) -> &Ident {
        fn last_ident(path: &Path) -> &Ident {
            &path
                .segments
                .last()
                .expect("type paths are checked to be non-empty while parsing")
                .ident
        }

        match self {
            Self::Primitive(ident) => ident,
            Self::Local {
                ident, custom_path, ..
            } => custom_path.as_ref().map(last_ident).unwrap_or(ident),
            Self::Foreign {
                path, custom_path, ..
            } => last_ident(custom_path.as_ref().unwrap_or(path)),
        }
    }

    /// The full (custom) path, without generic params.
    fn get_path(&self) -> Option<&Path> {
        match self {
            Self::Local { custom_path, .. } => custom_path.as_ref(),
            Self::Foreign {
                path, custom_path, ..
            } => Some(custom_path.as_ref().unwrap_or(path)),
            Self::Primitive(_) => None,
        }
    }

    pub(super) fn module_path(&self) -> Option<StringExpr> {
        if let Some(path) = self.get_path() {
            let path_string = path
                .segments
                .iter()
                .take(path.segments.len() - 1)
                .map(|segment| segment.ident.to_string())
                .reduce(|path, ident| path + "::" + &ident)
                .expect("If Path/CustomPath is exist, can not be empty.");

            let path_lit = LitStr::new(&path_string, path.span());
            return Some(StringExpr::from_lit(&path_lit));
        }

        match self {
            Self::Local { .. } => Some(StringExpr::Const(quote! {
                ::core::module_path!()
            })),
            _ => None,
        }
    }

    pub(super) fn type_ident(&self) -> StringExpr {
        StringExpr::from(self.get_ident())
    }

    /// Joins type and const generics with `", "`.
    ///
    /// `ty_generic_fn` maps each [`TypeParam`] to its string.
    fn reduce_generics(
        generics: &Generics,
        mut ty_generic_fn: impl FnMut(&TypeParam) -> StringExpr,
        sl_reflect_path: &Path,
    ) -> StringExpr {
        let macro_utils_path = crate::path::macro_utils_(sl_reflect_path);

        let mut params = generics.params.iter().filter_map(|param| match param {
            GenericParam::Type(type_param) => Some(ty_generic_fn(type_param)),
            GenericParam::Const(const_param) => {
                let ident = &const_param.ident;
                let ty = &const_param.ty;

                Some(StringExpr::Owned(quote! {
                    <#ty as #macro_utils_path::ToString>::to_string(&#ident)
                }))
            }
            GenericParam::Lifetime(_) => None,
        });

        let first = params.next().into_iter();

        StringExpr::from_iter(
            first.chain(params.flat_map(|x| [StringExpr::from_str(", "), x])),
            sl_reflect_path,
        )
    }

    /// For `core::option::Option<alloc::string::String>`, this is `"Option<String>"`.
    pub(super) fn type_name(&self, sl_reflect_path: &Path) -> StringExpr {
        match self {
            Self::Primitive(ident) => StringExpr::from(ident),
            Self::Local { generics, .. } | Self::Foreign { generics, .. } => {
                let type_ident = self.type_ident();

                if !self.impl_with_generic() {
                    return type_ident;
                }

                let type_path_ = crate::path::type_path_(sl_reflect_path);
                let generics = TypeParser::reduce_generics(
                    generics,
                    |TypeParam { ident, .. }| {
                        StringExpr::Borrowed(quote! {
                            <#ident as #type_path_>::type_name()
                        })
                    },
                    sl_reflect_path,
                );

                StringExpr::from_iter(
                    [
                        type_ident,
                        StringExpr::from_str("<"),
                        generics,
                        StringExpr::from_str(">"),
                    ],
                    sl_reflect_path,
                )
            }
        }
    }

    /// For `Option<String>`, this is `"core::option::Option<alloc::string::String>"`.
    pub(super) fn type_path(&self, sl_reflect_path: &Path) -> StringExpr {
        match self {
            Self::Primitive(ident) => StringExpr::from(ident),
            Self::Local { generics, .. } | Self::Foreign { generics, .. } => {
                let type_ident = self.type_ident();
                let module_path = self
                    .module_path()
                    .expect("Non-Primitive type, try to parse type_path but get module_path fail.");

                if !self.impl_with_generic() {
                    return StringExpr::from_iter(
                        [module_path, StringExpr::from_str("::"), type_ident],
                        sl_reflect_path,
                    );
                }

                let type_path_ = crate::path::type_path_(sl_reflect_path);
                let generics = TypeParser::reduce_generics(
                    generics,
                    |TypeParam { ident, .. }| {
                        StringExpr::Borrowed(quote! {
                            <#ident as #type_path_>::type_path()
                        })
                    },
                    sl_reflect_path,
                );

                StringExpr::from_iter(
                    [
                        module_path,
                        StringExpr::from_str("::"),
                        type_ident,
                        StringExpr::from_str("<"),
                        generics,
                        StringExpr::from_str(">"),
                    ],
                    sl_reflect_path,
                )
            }
        }
    }
}
