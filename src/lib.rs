#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use sl_json as json;
pub use sl_reflect as reflect;
pub use sl_utils as utils;
