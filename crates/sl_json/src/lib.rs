//! Encoding of reflected values as JSON-like text.
//!
//! Values are walked through their [`Reflect`] shape. A strategy is built
//! once per shape and cached, so the reflective work of a type is paid on
//! first use only.
//!
//! Two output styles exist. [`Style::Human`], the default, writes members as
//! `name: value`; [`Style::Strict`] writes standard `"name":value` text that
//! any JSON parser accepts.
//!
//! ```
//! use sl_json::{EncoderConfig, Style};
//! use sl_reflect::{derive::Reflect, registry::{TypeRegistry, TypeRegistryArc}};
//! use std::collections::BTreeMap;
//!
//! #[derive(Reflect)]
//! pub struct Job {
//!     pub name: String,
//!     #[reflect(omit_empty)]
//!     pub tags: Vec<String>,
//!     pub limits: BTreeMap<String, u32>,
//! }
//!
//! let job = Job {
//!     name: "build".into(),
//!     tags: vec![],
//!     limits: BTreeMap::from([("mem".into(), 512), ("cpu".into(), 2)]),
//! };
//!
//! assert_eq!(
//!     sl_json::marshal(&job).unwrap(),
//!     br#"{name: "build",limits: {"cpu": 2,"mem": 512}}"#,
//! );
//!
//! let strict = sl_json::Encoder::new(
//!     TypeRegistryArc::new(TypeRegistry::new()),
//!     EncoderConfig::new().with_style(Style::Strict),
//! );
//! let out = strict.marshal(&job).unwrap();
//! assert_eq!(out, br#"{"name":"build","limits":{"cpu":2,"mem":512}}"#);
//! assert!(sl_json::valid(&out));
//! ```
//!
//! ## Menu
//!
//! - [`Encoder`]: encoding with an explicit registry and configuration.
//! - [`marshal`], [`marshal_reflect`]: one-shot encoding with the default configuration.
//! - [`valid`], [`check_valid`], [`compact`]: checks and rewrites encoded text.
//! - [`fields`]: the member resolution rules of records.
//! - [`MarshalError`], [`SyntaxError`]: failures.
//!
//! ## Shapes
//!
//! | Shape | Output |
//! |-------|--------|
//! | `bool`, integers | `true`, `42` |
//! | `f32`, `f64` | shortest round-trip decimal, exponent form below `1e-6` and from `1e21` |
//! | `String`, `&str`, `char` | quoted, escaped string |
//! | `Vec<u8>` | base64 string |
//! | `Vec<T>`, `VecDeque<T>`, `[T; N]` | `[a,b]` |
//! | maps | object with keys sorted; string, integer or `MarshalText` keys |
//! | `Option<T>`, `Box<T>`, `Arc<T>`, `OnceLock<T>` | `null` or the target |
//! | records | object of the public fields, see [`fields`] |
//!
//! A type registered with `MarshalJson` writes itself; its output is checked
//! and compacted. A type registered with `MarshalText` is written as a
//! string and may be used as a map key.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod compact;
mod config;
mod cycle;
mod encode;
mod encoder;
mod error;
mod format;
mod scanner;
mod strategy;

pub mod fields;

// -----------------------------------------------------------------------------
// Exports

pub use config::{EncoderConfig, Style};
pub use encoder::Encoder;
pub use error::{Capability, MarshalError, SyntaxError};
pub use scanner::MAX_NESTING_DEPTH;

use alloc::vec::Vec;

use sl_reflect::Reflect;
use sl_reflect::registry::{GetTypeMeta, TypeRegistry, TypeRegistryArc};

use scanner::Scanner;

// -----------------------------------------------------------------------------
// One-shot functions

fn one_shot_encoder() -> Encoder {
    let mut registry = TypeRegistry::new();
    registry.auto_register();
    Encoder::new(TypeRegistryArc::new(registry), EncoderConfig::new())
}

/// Encodes `value` with a fresh encoder and the default [`EncoderConfig`].
///
/// The encoder knows the primitive types, every `#[reflect(auto_register)]`
/// type, and `T` with its dependencies. Nothing is cached between calls; keep
/// an [`Encoder`] around to encode many values.
///
/// # Errors
///
/// See [`Encoder::marshal_reflect`].
pub fn marshal<T: Reflect + GetTypeMeta>(value: &T) -> Result<Vec<u8>, MarshalError> {
    one_shot_encoder().marshal(value)
}

/// Encodes a dynamic value with a fresh encoder.
///
/// Capabilities are only seen for automatically registered types.
pub fn marshal_reflect(value: &dyn Reflect) -> Result<Vec<u8>, MarshalError> {
    one_shot_encoder().marshal_reflect(value)
}

/// Returns `true` if `data` is one complete, well-formed value in standard
/// syntax.
///
/// ```
/// assert!(sl_json::valid(br#" {"a": [1, 2.5e3, null]} "#));
/// assert!(!sl_json::valid(b"{a: 1}"));
/// assert!(!sl_json::valid(b"1 2"));
/// ```
pub fn valid(data: &[u8]) -> bool {
    check_valid(data).is_ok()
}

/// Like [`valid`], but returns the first error with its byte offset.
///
/// ```
/// let err = sl_json::check_valid(b"[1,]").unwrap_err();
/// assert_eq!(err.to_string(), "invalid character ']' looking for beginning of value");
/// assert_eq!(err.offset(), 4);
/// ```
pub fn check_valid(data: &[u8]) -> Result<(), SyntaxError> {
    scanner::check_valid_with(&mut Scanner::new(), data)
}

/// Appends `src` to `dst` without insignificant whitespace.
///
/// With `escape_html`, `<`, `>`, `&`, U+2028 and U+2029 inside strings are
/// escaped. On error `dst` is left as it was.
///
/// ```
/// let mut out = Vec::new();
/// sl_json::compact(&mut out, b"{ \"a\" : [ 1, 2 ] }", false).unwrap();
/// assert_eq!(out, br#"{"a":[1,2]}"#);
/// ```
pub fn compact(dst: &mut Vec<u8>, src: &[u8], escape_html: bool) -> Result<(), SyntaxError> {
    compact::compact_with(&mut Scanner::new(), dst, src, escape_html)
}
