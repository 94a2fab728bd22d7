//! Reflection for std types, plus helpers for writing implementations.
//!
//! - [`concat`]: An efficient string concatenation function.
//! - [`NonGenericTypeInfoCell`]: Used to implement [`Typed`] for non-generic types.
//! - [`GenericTypePathCell`]: Used to implement [`TypePath`] for generic types.
//! - [`GenericTypeInfoCell`]: Used to implement [`Typed`] for generic types.
//!
//! ## Implemented Menu
//!
//! - scalar:
//!     - `bool`, `char`, `i8`-`i64`, `u8`-`u64`, `isize`, `usize`, `f32`, `f64`
//!     - `&'static str`, `String`, `Cow<'static, str>`
//! - list: `Vec<T>`, `VecDeque<T>`
//! - array: `[T; N]`
//! - map:
//!     - `BTreeMap<K, V>`
//!     - `std::collections::HashMap<K, V, S>`
//!     - `hashbrown::HashMap<K, V, S>`
//! - pointer: `Option<T>`, `Box<T>`, `Arc<T>`, `OnceLock<T>`, `Box<dyn Reflect>`
//! - opaque: `()`, `Duration`
//!
//! [`TypePath`]: crate::info::TypePath
//! [`Typed`]: crate::info::Typed

// -----------------------------------------------------------------------------
// Modules

mod cell;

mod array;
mod list;
mod map;
mod opaque;
mod pointer;
mod scalar;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell};

/// An efficient string concatenation function.
///
/// This is usually used for the implementation of `TypePath`.
///
/// # Example
///
/// ```
/// use sl_reflect::impls;
///
/// let s = impls::concat(&["demo", "::", "Wrap", "<", "u8", ">"]);
///
/// assert_eq!(s, "demo::Wrap<u8>");
/// ```
#[inline(never)]
pub fn concat(arr: &[&str]) -> ::alloc::string::String {
    let len = arr.iter().map(|item| item.len()).sum();
    let mut res = ::alloc::string::String::with_capacity(len);
    arr.iter().for_each(|item| res.push_str(item));
    res
}
