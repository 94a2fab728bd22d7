//! The value encoder.
//!
//! Walks a value along the strategies of its shape and appends the output
//! to a pooled [`EncodeState`]. Output only leaves the state once the whole
//! value succeeded, so callers never observe partial text.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::warn;
use sl_reflect::Reflect;
use sl_reflect::ops::{List, Map, Pointer, ReflectRef, ScalarRef, Struct};
use sl_reflect::registry::BoxError;
use sl_utils::Reusable;

use crate::cache::Slot;
use crate::compact::compact_with;
use crate::cycle::{CycleGuard, Identity};
use crate::format::number::{write_f32, write_f64, write_int, write_uint};
use crate::format::string::write_quoted;
use crate::strategy::{KeyStrategy, MapStrategy, Strategy, StructStrategy};
use crate::{Capability, Encoder, MarshalError, Style};

// -----------------------------------------------------------------------------
// EncodeState

// Buffers above this size are not returned to the pool.
const MAX_KEPT_BUFFER: usize = 64 * 1024;

/// Per-call scratch: the output buffer and the cycle guard.
#[derive(Default)]
pub(crate) struct EncodeState {
    pub buf: Vec<u8>,
    cycle: CycleGuard,
    /// Type paths of the values being encoded, innermost last.
    ///
    /// Frames are kept on failure so the path to the failing value can be
    /// logged.
    #[cfg(all(debug_assertions, feature = "debug"))]
    pub stack: Vec<&'static str>,
}

impl Reusable for EncodeState {
    fn reset(&mut self) {
        self.buf.clear();
        self.cycle.clear();
        #[cfg(all(debug_assertions, feature = "debug"))]
        self.stack.clear();
    }

    #[inline]
    fn keep(&self) -> bool {
        self.buf.capacity() <= MAX_KEPT_BUFFER
    }
}

impl EncodeState {
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.cycle.is_idle()
    }
}

// -----------------------------------------------------------------------------
// Helpers

fn unsupported(value: &dyn Reflect) -> MarshalError {
    MarshalError::UnsupportedType {
        type_path: value.reflect_type_path(),
    }
}

fn marshaler(capability: Capability, value: &dyn Reflect, source: BoxError) -> MarshalError {
    MarshalError::Marshaler {
        capability,
        type_path: value.reflect_type_path(),
        source,
    }
}

/// Returns `true` for values left out by `omit_empty`.
///
/// Empty means `false`, zero, an empty string, list or map, an absent
/// pointer or a zero-length array. Records are never empty.
pub(crate) fn is_empty_value(value: &dyn Reflect) -> bool {
    match value.reflect_ref() {
        ReflectRef::Scalar(scalar) => scalar.is_zero(),
        ReflectRef::List(list) => list.is_absent() || list.is_empty(),
        ReflectRef::Array(array) => array.is_empty(),
        ReflectRef::Map(map) => map.is_absent() || map.is_empty(),
        ReflectRef::Pointer(ptr) => ptr.pointee().is_none(),
        ReflectRef::Struct(_) | ReflectRef::Opaque(_) => false,
    }
}

/// Reaches the field at `index`, following embedded records and the
/// pointers leading to them.
///
/// Returns `None` if an embedded pointer on the way is absent.
fn field_by_index<'a>(root: &'a dyn Struct, index: &[usize]) -> Option<&'a dyn Reflect> {
    let (&last, path) = index.split_last()?;
    let mut current = root;
    for &i in path {
        let mut value = current.field_at(i)?;
        current = loop {
            match value.reflect_ref() {
                ReflectRef::Struct(inner) => break inner,
                ReflectRef::Pointer(ptr) => value = ptr.pointee()?,
                _ => return None,
            }
        };
    }
    current.field_at(last)
}

// -----------------------------------------------------------------------------
// Encoder

impl Encoder {
    /// Encodes `value`, whose shape is the one of `slot`.
    pub(crate) fn encode(
        &self,
        state: &mut EncodeState,
        value: &dyn Reflect,
        slot: &Slot,
    ) -> Result<(), MarshalError> {
        #[cfg(all(debug_assertions, feature = "debug"))]
        state.stack.push(value.reflect_type_path());

        let result = match slot.get(self) {
            Strategy::MarshalJson(marshal) => {
                let raw = marshal
                    .marshal_json(value)
                    .map_err(|e| marshaler(Capability::MarshalJson, value, e))?;
                let mut scan = self.scanners.take();
                compact_with(&mut scan, &mut state.buf, &raw, self.config.escape_html()).map_err(
                    |e| {
                        warn!(
                            "`{}` produced invalid output at byte {}: {e}",
                            value.reflect_type_path(),
                            e.offset(),
                        );
                        marshaler(Capability::MarshalJson, value, Box::new(e))
                    },
                )
            }
            Strategy::MarshalText(marshal) => {
                let text = marshal
                    .marshal_text(value)
                    .map_err(|e| marshaler(Capability::MarshalText, value, e))?;
                write_quoted(&mut state.buf, &text, self.config.escape_html());
                Ok(())
            }
            Strategy::Scalar => match value.reflect_ref() {
                ReflectRef::Scalar(scalar) => self.encode_scalar(state, scalar),
                _ => Err(unsupported(value)),
            },
            Strategy::Bytes => match value.reflect_ref() {
                ReflectRef::List(list) => {
                    encode_bytes(state, list);
                    Ok(())
                }
                _ => Err(unsupported(value)),
            },
            Strategy::List(item) => match value.reflect_ref() {
                ReflectRef::List(list) if list.is_absent() => {
                    state.buf.extend_from_slice(b"null");
                    Ok(())
                }
                ReflectRef::List(list) => {
                    let identity = Identity {
                        address: value.address(),
                        type_id: value.ty_id(),
                    };
                    self.nested(state, Some(identity), value, |this, state| {
                        this.encode_items(state, list.iter(), item)
                    })
                }
                _ => Err(unsupported(value)),
            },
            Strategy::Array(item) => match value.reflect_ref() {
                ReflectRef::Array(array) => self.encode_items(state, array.iter(), item),
                _ => Err(unsupported(value)),
            },
            Strategy::Map(strategy) => match value.reflect_ref() {
                ReflectRef::Map(map) if map.is_absent() => {
                    state.buf.extend_from_slice(b"null");
                    Ok(())
                }
                ReflectRef::Map(map) => {
                    let identity = Identity {
                        address: value.address(),
                        type_id: value.ty_id(),
                    };
                    self.nested(state, Some(identity), value, |this, state| {
                        this.encode_map(state, map, strategy)
                    })
                }
                _ => Err(unsupported(value)),
            },
            Strategy::Pointer(pointee) => match value.reflect_ref() {
                ReflectRef::Pointer(ptr) => {
                    self.encode_pointer(state, value, ptr, pointee.as_deref())
                }
                _ => Err(unsupported(value)),
            },
            Strategy::Struct(strategy) => match value.reflect_ref() {
                ReflectRef::Struct(record) => self.encode_struct(state, record, strategy),
                _ => Err(unsupported(value)),
            },
            Strategy::Unsupported => Err(unsupported(value)),
        };

        #[cfg(all(debug_assertions, feature = "debug"))]
        if result.is_ok() {
            state.stack.pop();
        }

        result
    }

    /// Runs `f` one cycle-guard level deeper.
    ///
    /// The level is left again whatever `f` returns.
    fn nested(
        &self,
        state: &mut EncodeState,
        identity: Option<Identity>,
        value: &dyn Reflect,
        f: impl FnOnce(&Self, &mut EncodeState) -> Result<(), MarshalError>,
    ) -> Result<(), MarshalError> {
        let entered = state.cycle.enter(
            self.config.cycle_check_depth(),
            identity,
            value.reflect_type_path(),
        )?;
        let result = f(self, state);
        state.cycle.leave(entered);
        result
    }

    fn encode_scalar(
        &self,
        state: &mut EncodeState,
        scalar: ScalarRef<'_>,
    ) -> Result<(), MarshalError> {
        let buf = &mut state.buf;
        match scalar {
            ScalarRef::Bool(true) => buf.extend_from_slice(b"true"),
            ScalarRef::Bool(false) => buf.extend_from_slice(b"false"),
            ScalarRef::Int(v) => write_int(buf, v),
            ScalarRef::Uint(v) => write_uint(buf, v),
            ScalarRef::F32(v) => write_f32(buf, v)?,
            ScalarRef::F64(v) => write_f64(buf, v)?,
            ScalarRef::Char(c) => {
                let mut tmp = [0_u8; 4];
                write_quoted(buf, c.encode_utf8(&mut tmp), self.config.escape_html());
            }
            ScalarRef::Str(s) => write_quoted(buf, s, self.config.escape_html()),
        }
        Ok(())
    }

    fn encode_items<'a>(
        &self,
        state: &mut EncodeState,
        items: impl Iterator<Item = &'a dyn Reflect>,
        slot: &Slot,
    ) -> Result<(), MarshalError> {
        state.buf.push(b'[');
        for (i, item) in items.enumerate() {
            if i > 0 {
                state.buf.push(b',');
            }
            self.encode(state, item, slot)?;
        }
        state.buf.push(b']');
        Ok(())
    }

    fn encode_map(
        &self,
        state: &mut EncodeState,
        map: &dyn Map,
        strategy: &MapStrategy,
    ) -> Result<(), MarshalError> {
        let mut entries: Vec<(String, &dyn Reflect)> = Vec::with_capacity(map.len());
        for (key, value) in map.iter() {
            entries.push((map_key(key, &strategy.key)?, value));
        }
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let html = self.config.escape_html();
        state.buf.push(b'{');
        for (i, (key, value)) in entries.into_iter().enumerate() {
            if i > 0 {
                state.buf.push(b',');
            }
            // Map keys stay quoted in both styles; only member names differ.
            write_quoted(&mut state.buf, &key, html);
            match self.config.style() {
                Style::Human => state.buf.extend_from_slice(b": "),
                Style::Strict => state.buf.push(b':'),
            }
            self.encode(state, value, &strategy.value)?;
        }
        state.buf.push(b'}');
        Ok(())
    }

    fn encode_pointer(
        &self,
        state: &mut EncodeState,
        value: &dyn Reflect,
        ptr: &dyn Pointer,
        pointee: Option<&Slot>,
    ) -> Result<(), MarshalError> {
        let Some(target) = ptr.pointee() else {
            state.buf.extend_from_slice(b"null");
            return Ok(());
        };
        let identity = ptr.address().map(|address| Identity {
            address,
            type_id: target.ty_id(),
        });
        self.nested(state, identity, value, |this, state| match pointee {
            Some(slot) => this.encode(state, target, slot),
            None => {
                let slot = this.cache.slot(target.reflect_type_info());
                this.encode(state, target, &slot)
            }
        })
    }

    fn encode_struct(
        &self,
        state: &mut EncodeState,
        record: &dyn Struct,
        strategy: &StructStrategy,
    ) -> Result<(), MarshalError> {
        state.buf.push(b'{');
        let mut first = true;
        for field in &strategy.fields {
            let Some(value) = field_by_index(record, field.descriptor.index()) else {
                continue;
            };
            if field.descriptor.omit_empty() && is_empty_value(value) {
                continue;
            }
            if !first {
                state.buf.push(b',');
            }
            first = false;
            state.buf.extend_from_slice(&field.key);
            self.encode(state, value, &field.slot)?;
        }
        state.buf.push(b'}');
        Ok(())
    }
}

fn encode_bytes(state: &mut EncodeState, list: &dyn List) {
    let encoded = match list.as_bytes() {
        Some(bytes) => STANDARD.encode(bytes),
        None => {
            let bytes: Vec<u8> = list
                .iter()
                .filter_map(|item| item.downcast_ref::<u8>().copied())
                .collect();
            STANDARD.encode(bytes)
        }
    };
    state.buf.push(b'"');
    state.buf.extend_from_slice(encoded.as_bytes());
    state.buf.push(b'"');
}

fn map_key(key: &dyn Reflect, strategy: &KeyStrategy) -> Result<String, MarshalError> {
    match (strategy, key.reflect_ref()) {
        (KeyStrategy::Str, ReflectRef::Scalar(ScalarRef::Str(s))) => Ok(s.to_string()),
        (KeyStrategy::Str, ReflectRef::Scalar(ScalarRef::Char(c))) => Ok(c.to_string()),
        (KeyStrategy::Int, ReflectRef::Scalar(ScalarRef::Int(v))) => {
            Ok(itoa::Buffer::new().format(v).to_string())
        }
        (KeyStrategy::Int, ReflectRef::Scalar(ScalarRef::Uint(v))) => {
            Ok(itoa::Buffer::new().format(v).to_string())
        }
        (KeyStrategy::Text(marshal), _) => marshal
            .marshal_text(key)
            .map_err(|e| marshaler(Capability::MarshalText, key, e)),
        _ => Err(unsupported(key)),
    }
}
