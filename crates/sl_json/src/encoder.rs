use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use log::trace;
use sl_reflect::Reflect;
use sl_reflect::registry::{GetTypeMeta, TypeRegistryArc};
use sl_utils::Pool;

use crate::cache::StrategyCache;
use crate::compact::compact_with;
use crate::encode::EncodeState;
use crate::scanner::{Scanner, check_valid_with};
use crate::{EncoderConfig, MarshalError, SyntaxError};

const MAX_IDLE_STATES: usize = 16;
const MAX_IDLE_SCANNERS: usize = 16;

// -----------------------------------------------------------------------------
// Encoder

/// Encodes reflected values.
///
/// An encoder owns the strategy cache for its configuration, so strategies
/// are built once per shape and reused by every later call, from any
/// thread. Capabilities (`MarshalJson`, `MarshalText`) are looked up in the
/// registry when a shape is first seen. A shape that had no encoding is
/// looked up again on later calls, so registering its capability afterwards
/// takes effect; a shape that already encodes keeps its strategy.
///
/// # Examples
///
/// ```
/// use sl_json::{Encoder, EncoderConfig, Style};
/// use sl_reflect::{derive::Reflect, registry::{TypeRegistry, TypeRegistryArc}};
///
/// #[derive(Reflect)]
/// pub struct Point {
///     pub x: i32,
///     #[reflect(rename = "Y")]
///     pub y: i32,
/// }
///
/// let registry = TypeRegistryArc::new(TypeRegistry::new());
///
/// let human = Encoder::new(registry.clone(), EncoderConfig::new());
/// assert_eq!(human.marshal(&Point { x: 1, y: 2 }).unwrap(), b"{x: 1,Y: 2}");
///
/// let strict = Encoder::new(registry, EncoderConfig::new().with_style(Style::Strict));
/// assert_eq!(strict.marshal(&Point { x: 1, y: 2 }).unwrap(), br#"{"x":1,"Y":2}"#);
/// ```
pub struct Encoder {
    pub(crate) registry: TypeRegistryArc,
    pub(crate) config: EncoderConfig,
    pub(crate) cache: StrategyCache,
    states: Pool<EncodeState>,
    pub(crate) scanners: Pool<Scanner>,
}

impl Encoder {
    /// Creates an encoder reading capabilities from `registry`.
    pub const fn new(registry: TypeRegistryArc, config: EncoderConfig) -> Self {
        Self {
            registry,
            config,
            cache: StrategyCache::new(),
            states: Pool::new(MAX_IDLE_STATES),
            scanners: Pool::new(MAX_IDLE_SCANNERS),
        }
    }

    /// Returns the configuration.
    #[inline]
    pub const fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Returns the registry.
    #[inline]
    pub const fn registry(&self) -> &TypeRegistryArc {
        &self.registry
    }

    /// Registers `T` and its dependencies, unless it is already known.
    pub fn register<T: GetTypeMeta>(&self) {
        if !self.registry.read().contains(TypeId::of::<T>()) {
            self.registry.write().register::<T>();
        }
    }

    /// Encodes `value`, registering its type first.
    ///
    /// See [`marshal_reflect`](Self::marshal_reflect).
    pub fn marshal<T: Reflect + GetTypeMeta>(&self, value: &T) -> Result<Vec<u8>, MarshalError> {
        self.register::<T>();
        self.marshal_reflect(value)
    }

    /// Encodes `value` into a new buffer.
    ///
    /// Map entries are sorted by key, so equal values always give equal
    /// output.
    ///
    /// # Errors
    ///
    /// Fails on shapes that cannot be encoded, non-finite floats, cycles and
    /// failing capabilities. No output is produced in that case.
    pub fn marshal_reflect(&self, value: &dyn Reflect) -> Result<Vec<u8>, MarshalError> {
        let mut out = Vec::new();
        self.marshal_into(value, &mut out)?;
        Ok(out)
    }

    /// Appends the encoding of `value` to `dst`.
    ///
    /// On error `dst` is left as it was.
    pub fn marshal_into(&self, value: &dyn Reflect, dst: &mut Vec<u8>) -> Result<(), MarshalError> {
        trace!("marshal `{}`", value.reflect_type_path());

        let mut state = self.states.take();
        let slot = self.cache.slot(value.reflect_type_info());

        match self.encode(&mut state, value, &slot) {
            Ok(()) => {
                debug_assert!(state.is_idle());
                dst.extend_from_slice(&state.buf);
                Ok(())
            }
            Err(err) => {
                #[cfg(all(debug_assertions, feature = "debug"))]
                log::debug!(
                    "marshal `{}` failed: {err}\n  via {}",
                    value.reflect_type_path(),
                    state.stack.join("\n  via "),
                );
                Err(err)
            }
        }
    }

    /// Returns `true` if `data` is one complete, well-formed value.
    pub fn valid(&self, data: &[u8]) -> bool {
        self.check_valid(data).is_ok()
    }

    /// Like [`valid`](Self::valid), but reports the first error.
    pub fn check_valid(&self, data: &[u8]) -> Result<(), SyntaxError> {
        check_valid_with(&mut self.scanners.take(), data)
    }

    /// Appends `src` to `dst` without insignificant whitespace.
    ///
    /// Uses the encoder's `escape_html` setting.
    pub fn compact(&self, dst: &mut Vec<u8>, src: &[u8]) -> Result<(), SyntaxError> {
        compact_with(&mut self.scanners.take(), dst, src, self.config.escape_html())
    }
}

impl fmt::Debug for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encoder")
            .field("config", &self.config)
            .field("shapes", &self.cache.len())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Encoder;
    use crate::{Capability, EncoderConfig, MarshalError, Style};
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::format;
    use alloc::string::{String, ToString};
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::time::Duration;
    use sl_reflect::Reflect;
    use sl_reflect::derive::Reflect;
    use sl_reflect::info::TypePath;
    use sl_reflect::registry::{BoxError, MarshalJson, MarshalText, TypeRegistry, TypeRegistryArc};
    use std::collections::HashMap;
    use std::sync::OnceLock;

    fn encoder(config: EncoderConfig) -> Encoder {
        Encoder::new(TypeRegistryArc::new(TypeRegistry::new()), config)
    }

    fn human() -> Encoder {
        encoder(EncoderConfig::new())
    }

    fn strict() -> Encoder {
        encoder(EncoderConfig::new().with_style(Style::Strict))
    }

    fn text(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    // -------------------------------------------------------------------------
    // Shapes

    #[derive(Reflect)]
    pub struct Sample {
        pub flag: bool,
        pub count: i32,
        pub ratio: f64,
        #[reflect(rename = "label")]
        pub name: String,
        pub letter: char,
        pub raw: Vec<u8>,
        pub fixed: [u8; 3],
        pub tags: Vec<&'static str>,
        pub maybe: Option<u8>,
    }

    fn sample() -> Sample {
        Sample {
            flag: true,
            count: -3,
            ratio: 0.5,
            name: "a\"b".to_string(),
            letter: 'x',
            raw: vec![1, 2, 3],
            fixed: [1, 2, 3],
            tags: vec!["x", "y"],
            maybe: None,
        }
    }

    #[test]
    fn human_style() {
        assert_eq!(
            text(human().marshal(&sample()).unwrap()),
            r#"{flag: true,count: -3,ratio: 0.5,label: "a\"b",letter: "x",raw: "AQID",fixed: [1,2,3],tags: ["x","y"],maybe: null}"#,
        );
    }

    #[test]
    fn strict_style_is_standard() {
        let out = text(strict().marshal(&sample()).unwrap());
        assert_eq!(
            out,
            r#"{"flag":true,"count":-3,"ratio":0.5,"label":"a\"b","letter":"x","raw":"AQID","fixed":[1,2,3],"tags":["x","y"],"maybe":null}"#,
        );
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["label"], "a\"b");
        assert_eq!(parsed["fixed"][2], 3);
        assert!(crate::valid(out.as_bytes()));
    }

    #[test]
    fn top_level_scalars_and_lists() {
        let enc = human();
        assert_eq!(enc.marshal(&42_u64).unwrap(), b"42");
        assert_eq!(enc.marshal(&1e21_f64).unwrap(), b"1e+21");
        assert_eq!(enc.marshal(&String::from("<&>")).unwrap(), b"\"<&>\"");
        assert_eq!(enc.marshal(&Vec::<u8>::new()).unwrap(), b"\"\"");
        assert_eq!(enc.marshal(&Vec::<i8>::new()).unwrap(), b"[]");
        assert_eq!(enc.marshal(&vec![Some(1_u8), None]).unwrap(), b"[1,null]");
    }

    #[test]
    fn html_escaping_is_configurable() {
        let enc = encoder(EncoderConfig::new().with_escape_html(true));
        let out = text(enc.marshal(&String::from("<&>")).unwrap());
        let parsed: String = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, "<&>");
        assert!(!out.contains('<'));
        assert!(!out.contains('&'));
    }

    // -------------------------------------------------------------------------
    // Maps

    #[test]
    fn maps_are_sorted_by_key() {
        let mut map: HashMap<String, u32> = HashMap::new();
        for i in 0..32 {
            map.insert(format!("k{i:02}"), i);
        }
        let expected: Vec<String> = (0..32).map(|i| format!("\"k{i:02}\":{i}")).collect();
        let expected = format!("{{{}}}", expected.join(","));

        let enc = strict();
        assert_eq!(text(enc.marshal(&map).unwrap()), expected);
        assert_eq!(enc.marshal(&map).unwrap(), enc.marshal(&map).unwrap());
    }

    #[test]
    fn integer_keys_sort_as_text() {
        let map = BTreeMap::from([(9_i32, "a"), (10, "b"), (-1, "c")]);
        assert_eq!(human().marshal(&map).unwrap(), br#"{"-1": "c","10": "b","9": "a"}"#);
        assert_eq!(strict().marshal(&map).unwrap(), br#"{"-1":"c","10":"b","9":"a"}"#);

        let chars = BTreeMap::from([('b', 1_u8), ('a', 2)]);
        assert_eq!(strict().marshal(&chars).unwrap(), br#"{"a":2,"b":1}"#);
    }

    #[derive(Reflect)]
    pub struct Limits {
        pub name: &'static str,
        pub limits: BTreeMap<String, u32>,
    }

    #[test]
    fn human_style_quotes_map_keys() {
        let value = Limits {
            name: "db",
            limits: BTreeMap::from([("k".to_string(), 1)]),
        };
        assert_eq!(human().marshal(&value).unwrap(), br#"{name: "db",limits: {"k": 1}}"#);
        assert_eq!(strict().marshal(&value).unwrap(), br#"{"name":"db","limits":{"k":1}}"#);
    }

    #[test]
    fn empty_map_and_unsupported_keys() {
        assert_eq!(human().marshal(&BTreeMap::<String, u8>::new()).unwrap(), b"{}");

        let map = BTreeMap::from([(true, 1_u8)]);
        let err = human().marshal(&map).unwrap_err();
        assert!(matches!(err, MarshalError::UnsupportedType { .. }));
        assert_eq!(err.type_path(), Some(<BTreeMap<bool, u8> as TypePath>::type_path()));
    }

    // -------------------------------------------------------------------------
    // Capabilities

    #[derive(Reflect, PartialEq, Eq, PartialOrd, Ord)]
    #[reflect(opaque, marshal_text)]
    pub struct Version(u32);

    impl MarshalText for Version {
        fn marshal_text(&self) -> Result<String, BoxError> {
            Ok(format!("v{}", self.0))
        }
    }

    #[derive(Reflect)]
    #[reflect(opaque, marshal_json)]
    pub struct Raw(&'static str);

    impl MarshalJson for Raw {
        fn marshal_json(&self) -> Result<Vec<u8>, BoxError> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    #[derive(Reflect)]
    #[reflect(opaque, marshal_text)]
    pub struct Broken;

    impl MarshalText for Broken {
        fn marshal_text(&self) -> Result<String, BoxError> {
            Err("broken".into())
        }
    }

    #[derive(Reflect, PartialEq, Eq, PartialOrd, Ord)]
    #[reflect(opaque, marshal_json, marshal_text)]
    pub struct Both;

    impl MarshalJson for Both {
        fn marshal_json(&self) -> Result<Vec<u8>, BoxError> {
            Ok(b"1".to_vec())
        }
    }

    impl MarshalText for Both {
        fn marshal_text(&self) -> Result<String, BoxError> {
            Ok("t".to_string())
        }
    }

    #[derive(Reflect)]
    pub struct Wrapper {
        pub raw: Raw,
        pub version: Version,
    }

    #[test]
    fn text_capability() {
        assert_eq!(human().marshal(&Version(2)).unwrap(), b"\"v2\"");

        let map = BTreeMap::from([(Version(2), true), (Version(10), false)]);
        assert_eq!(strict().marshal(&map).unwrap(), br#"{"v10":false,"v2":true}"#);
    }

    #[test]
    fn json_capability_is_compacted() {
        let value = Wrapper {
            raw: Raw(" { \"a\" : [1, 2] } "),
            version: Version(1),
        };
        assert_eq!(human().marshal(&value).unwrap(), br#"{raw: {"a":[1,2]},version: "v1"}"#);
        assert_eq!(strict().marshal(&value).unwrap(), br#"{"raw":{"a":[1,2]},"version":"v1"}"#);
    }

    #[test]
    fn json_capability_wins_except_for_keys() {
        assert_eq!(human().marshal(&Both).unwrap(), b"1");
        let map = BTreeMap::from([(Both, Both)]);
        assert_eq!(strict().marshal(&map).unwrap(), br#"{"t":1}"#);
    }

    #[test]
    fn invalid_capability_output_fails() {
        let value = Wrapper {
            raw: Raw("{bad"),
            version: Version(1),
        };
        let enc = human();
        enc.register::<Wrapper>();
        let mut dst = b"keep".to_vec();
        let err = enc.marshal_into(&value, &mut dst).unwrap_err();
        assert_eq!(dst, b"keep");
        let MarshalError::Marshaler {
            capability,
            type_path,
            source,
        } = err
        else {
            panic!("expected a marshaler error");
        };
        assert_eq!(capability, Capability::MarshalJson);
        assert_eq!(type_path, <Raw as TypePath>::type_path());
        assert!(source.is::<crate::SyntaxError>());
    }

    #[test]
    fn late_registration_is_picked_up() {
        let enc = human();
        let value = Wrapper {
            raw: Raw("[1]"),
            version: Version(3),
        };
        let err = enc.marshal_reflect(&value).unwrap_err();
        assert!(matches!(err, MarshalError::UnsupportedType { .. }));

        enc.register::<Wrapper>();
        assert_eq!(enc.marshal_reflect(&value).unwrap(), br#"{raw: [1],version: "v3"}"#);
        assert_eq!(enc.marshal_reflect(&Version(4)).unwrap(), b"\"v4\"");
    }

    #[test]
    fn failing_capability_names_the_type() {
        let err = human().marshal(&vec![Broken]).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "error calling MarshalText for type {}: broken",
                <Broken as TypePath>::type_path()
            ),
        );
    }

    // -------------------------------------------------------------------------
    // Records

    #[derive(Reflect)]
    pub struct Meta {
        pub created: u64,
        #[reflect(omit_empty)]
        pub note: String,
    }

    #[derive(Reflect)]
    pub struct Entry {
        pub id: u32,
        #[reflect(embed)]
        pub meta: Option<Box<Meta>>,
        #[reflect(omit_empty)]
        pub children: Vec<u32>,
        #[reflect(omit_empty)]
        pub parent: Option<u32>,
        #[reflect(omit_empty)]
        pub weight: f32,
    }

    #[test]
    fn omit_empty_and_embedding() {
        let enc = human();
        let bare = Entry {
            id: 1,
            meta: None,
            children: vec![],
            parent: None,
            weight: 0.0,
        };
        assert_eq!(enc.marshal(&bare).unwrap(), b"{id: 1}");

        let full = Entry {
            id: 2,
            meta: Some(Box::new(Meta {
                created: 7,
                note: String::new(),
            })),
            children: vec![3],
            parent: Some(0),
            weight: 1.5,
        };
        assert_eq!(
            enc.marshal(&full).unwrap(),
            b"{id: 2,created: 7,children: [3],parent: 0,weight: 1.5}",
        );
    }

    #[derive(Reflect)]
    pub struct Empty {}

    #[test]
    fn record_without_members() {
        assert_eq!(strict().marshal(&Empty {}).unwrap(), b"{}");
    }

    // -------------------------------------------------------------------------
    // Pointers and cycles

    #[derive(Reflect)]
    pub struct Holder {
        pub any: Box<dyn Reflect>,
        pub shared: Arc<u8>,
    }

    #[test]
    fn dynamic_pointers_use_the_value_shape() {
        let value = Holder {
            any: Box::new(vec![1_u16, 2]),
            shared: Arc::new(3),
        };
        assert_eq!(strict().marshal(&value).unwrap(), br#"{"any":[1,2],"shared":3}"#);
    }

    #[derive(Reflect)]
    pub struct Node {
        pub id: u8,
        pub next: OnceLock<Arc<Node>>,
    }

    fn node(id: u8) -> Arc<Node> {
        Arc::new(Node {
            id,
            next: OnceLock::new(),
        })
    }

    #[test]
    fn chains_are_not_cycles() {
        let a = node(1);
        let _ = a.next.set(node(2));
        let enc = encoder(EncoderConfig::new().with_cycle_check_depth(0));
        assert_eq!(enc.marshal(&a).unwrap(), b"{id: 1,next: {id: 2,next: null}}");
    }

    #[derive(Reflect)]
    pub struct Pair {
        pub left: Arc<Node>,
        pub right: Arc<Node>,
    }

    #[test]
    fn shared_values_are_not_cycles() {
        let leaf = node(5);
        let pair = Pair {
            left: leaf.clone(),
            right: leaf,
        };
        let enc = encoder(EncoderConfig::new().with_cycle_check_depth(0));
        assert_eq!(
            enc.marshal(&pair).unwrap(),
            b"{left: {id: 5,next: null},right: {id: 5,next: null}}",
        );
    }

    #[test]
    fn cycles_are_reported() {
        let a = node(1);
        let b = node(2);
        let _ = a.next.set(b.clone());
        let _ = b.next.set(a.clone());

        let enc = encoder(EncoderConfig::new().with_cycle_check_depth(4));
        let mut dst = Vec::new();
        let err = enc.marshal_into(&a, &mut dst).unwrap_err();
        assert!(matches!(err, MarshalError::CyclicStructure { .. }));
        assert!(dst.is_empty());

        // The encoder stays usable after a failure.
        assert_eq!(enc.marshal(&node(3)).unwrap(), b"{id: 3,next: null}");
    }

    #[test]
    fn self_reference_fails_at_the_default_depth() {
        let a = node(1);
        let _ = a.next.set(a.clone());

        let enc = human();
        assert_eq!(
            enc.config().cycle_check_depth(),
            EncoderConfig::DEFAULT_CYCLE_CHECK_DEPTH
        );
        let err = enc.marshal(&a).unwrap_err();
        assert!(matches!(err, MarshalError::CyclicStructure { .. }));
        assert_eq!(
            err.to_string(),
            format!("encountered a cycle via {}", <Arc<Node> as TypePath>::type_path()),
        );
    }

    // -------------------------------------------------------------------------
    // Failures

    #[derive(Reflect)]
    pub struct Reading {
        pub value: f64,
    }

    #[test]
    fn non_finite_floats_fail_without_output() {
        let mut dst = b"keep".to_vec();
        let err = human()
            .marshal_into(&Reading { value: f64::NAN }, &mut dst)
            .unwrap_err();
        assert!(matches!(err, MarshalError::UnsupportedValue { ref description } if description == "NaN"));
        assert_eq!(dst, b"keep");
        assert_eq!(err.type_path(), None);
    }

    #[derive(Reflect)]
    pub struct Timed {
        pub elapsed: Duration,
    }

    #[test]
    fn opaque_shapes_are_unsupported() {
        let err = human()
            .marshal(&Timed {
                elapsed: Duration::from_secs(1),
            })
            .unwrap_err();
        assert!(matches!(err, MarshalError::UnsupportedType { .. }));
        assert_eq!(err.type_path(), Some(<Duration as TypePath>::type_path()));
    }

    // -------------------------------------------------------------------------
    // Concurrency and text helpers

    #[test]
    fn concurrent_first_use_agrees() {
        let enc = strict();
        let value = sample();
        let outputs: Vec<Vec<u8>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8).map(|_| s.spawn(|| enc.marshal(&value).unwrap())).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        let expected = strict().marshal(&value).unwrap();
        assert!(outputs.iter().all(|out| *out == expected));
    }

    #[test]
    fn text_helpers() {
        let enc = encoder(EncoderConfig::new().with_escape_html(true));
        assert!(enc.valid(b"[1, {\"a\": null}]"));
        assert_eq!(enc.check_valid(b"[1").unwrap_err().offset(), 2);

        let mut out = Vec::new();
        enc.compact(&mut out, b"[ \"<\" ]").unwrap();
        assert_eq!(out, br#"["\u003c"]"#);
    }
}
