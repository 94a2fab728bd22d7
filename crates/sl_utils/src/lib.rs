//! Small containers shared by the `shapelog` crates.
//!
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId).
//! - [`hash`]: fixed and pass-through hash states, re-exports *hashbrown* and *foldhash*.
//! - [`pool`]: a reuse pool whose checked-out objects return on drop.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod hash;
pub mod pool;

// -----------------------------------------------------------------------------
// Top-level exports

pub use pool::{Pool, Pooled, Reusable};
pub use typeid_map::TypeIdMap;
