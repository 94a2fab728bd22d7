//! See following macros:
//!
//! - [`Reflect`]
//! - [`impl_reflect_opaque`]
//! - [`impl_type_path`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Reflection Derivation
///
/// `#[derive(Reflect)]` implements the following traits:
///
/// - `TypePath`
/// - `Typed`
/// - `Reflect`
/// - `GetTypeMeta`
/// - `Struct` (for `struct T { ... }`)
///
/// Unit structs (`struct T;`) are treated as `Opaque`. Tuple structs and
/// enums have no record layout, so they must be marked `opaque` explicitly.
///
/// ## Field Attributes
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// struct User {
///     #[reflect(rename = "user_id")]
///     pub id: u64,
///     #[reflect(omit_empty)]
///     pub email: String,
///     #[reflect(embed)]
///     pub audit: Audit,
///     #[reflect(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// - `rename = "..."`: the emitted member name.
/// - `omit_empty`: leave the member out when its value is empty.
/// - `embed`: promote the members of this record into the enclosing one.
/// - `skip`: the field is invisible to reflection; its type needs no `Reflect`.
///
/// Only `pub` fields are marked public. Non-public fields stay reachable
/// through reflection but encoders may ignore them.
///
/// ## Type Attributes
///
/// - `opaque`: do not inspect the fields, the type is a leaf.
/// - `marshal_json`: register `TypeTraitMarshalJson`, the type must implement `MarshalJson`.
/// - `marshal_text`: register `TypeTraitMarshalText`, the type must implement `MarshalText`.
/// - `type_path = "..."`: override the module path and ident. Generics are appended.
/// - `auto_register`: submit the type to the automatic registry. No effect
///   on generic types, or when the `auto_register` feature is disabled.
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// #[reflect(opaque, marshal_text, auto_register)]
/// struct Level(u8);
/// ```
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_reflect_impls(&ast)
}

/// Implements reflection for `Opaque` foreign types.
///
/// Syntax: `(in module_path as alias_name) ident (..attrs..)`.
///
/// ## Example
///
/// ```rust, ignore
/// impl_reflect_opaque!(::core::time::Duration);
/// impl_reflect_opaque!(::utils::Level (marshal_text));
/// impl_reflect_opaque!((in core::time as Ins) Instant);
/// ```
#[proc_macro]
pub fn impl_reflect_opaque(input: TokenStream) -> TokenStream {
    use crate::derive_data::{ReflectMeta, ReflectOpaqueParser, TypeParser};

    let ReflectOpaqueParser {
        attrs,
        custom_path,
        type_ident,
        type_path,
        generics,
    } = parse_macro_input!(input with ReflectOpaqueParser::parse);

    let parser = TypeParser::new_foreign(&type_ident, &type_path, custom_path, &generics);

    let meta = ReflectMeta::new(attrs, parser);

    let assert_tokens = meta.assert_ident_tokens();
    let reflect_impls = impls::impl_opaque(&meta);

    quote! {
        const _: () = {
            #assert_tokens
            #reflect_impls
        };
    }
    .into()
}

/// A macro that implements `TypePath` for foreign type.
///
/// Syntax: `(in module_path as alias_name) ident`.
///
/// Paths starting with `::` cannot be used for primitive types.
/// The specified path must resolve to the target type and be accessible from the crate where the macro is invoked.
///
/// ## Example
///
/// ```ignore
/// // impl for primitive type.
/// impl_type_path!(u64);
///
/// // The leading `::` marks a complete path and is stripped from the result.
/// impl_type_path!(::alloc::string::String);
///
/// // Generics are also supported.
/// impl_type_path!(::alloc::vec::Vec<T>);
///
/// // Custom module path, the type path becomes `hashbrown::HashMap<..>`.
/// impl_type_path!((in hashbrown) ::sl_utils::hash::hashbrown::HashMap<K, V, S>);
/// ```
#[proc_macro]
pub fn impl_type_path(input: TokenStream) -> TokenStream {
    use crate::derive_data::{ReflectMeta, ReflectTypePathParser, TypeAttributes, TypeParser};

    let ReflectTypePathParser {
        custom_path,
        type_ident,
        type_path,
        generics,
    } = parse_macro_input!(input with ReflectTypePathParser::parse);

    let parser = TypeParser::new_foreign(&type_ident, &type_path, custom_path, &generics);

    let meta = ReflectMeta::new(TypeAttributes::default(), parser);
    let assert_tokens = meta.assert_ident_tokens();

    let type_path_impls = impls::impl_trait_type_path(&meta);

    quote! {
        const _: () = {
            #assert_tokens
            #type_path_impls
        };
    }
    .into()
}
