use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The parsed `Cargo.toml` of the crate currently invoking a proc-macro.
///
/// Generated code has to name `sl_reflect` the way the *calling* crate sees it.
/// [`Manifest::get_crate_path`] answers that question.
///
/// ```rust
/// # use sl_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.get_crate_path("sl_reflect"));
/// ```
///
/// # Resolution rules
///
/// 1. The crate is a direct dependency: `::crate_name`.
/// 2. The name starts with `sl_` and the caller depends on the umbrella crate
///    `shapelog`: `::shapelog::short_name` (`sl_reflect` -> `::shapelog::reflect`).
/// 3. Steps 1-2 again for `dev-dependencies`.
/// 4. Otherwise `::crate_name`.
///
/// A crate referring to itself should declare `extern crate self as name;`
/// so the fallback path also resolves inside the crate.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const UMBRELLA_NAME: &str = "shapelog";
const CRATE_PREFIX: &str = "sl_";

impl Manifest {
    #[inline(never)]
    fn manifest_path() -> PathBuf {
        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.");
        let path = PathBuf::from(dir).join("Cargo.toml");
        assert!(
            path.exists(),
            "Cargo manifest does not exist at path {}",
            path.display(),
        );
        path
    }

    #[inline(never)]
    fn modified_time(path: &Path) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn read(path: &Path) -> Document<Box<str>> {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(text)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    fn absolute(name: &str) -> syn::Path {
        syn::parse_str(&format!("::{name}"))
            .unwrap_or_else(|_| panic!("`{name}` is not a valid crate name"))
    }

    fn find_in(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::absolute(name));
        }
        let short = name.strip_prefix(CRATE_PREFIX)?;
        if !deps.contains_key(UMBRELLA_NAME) {
            return None;
        }
        let mut path = Self::absolute(UMBRELLA_NAME);
        let segment: syn::PathSegment = syn::parse_str(short)
            .unwrap_or_else(|_| panic!("`{short}` is not a valid path segment"));
        path.segments.push(segment);
        Some(path)
    }

    /// Returns the path of crate `name` as seen from the calling crate.
    ///
    /// See the type-level documentation for the resolution order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .filter_map(|table| match self.manifest.get(table) {
                Some(Item::Table(deps)) => Self::find_in(deps, name),
                _ => None,
            })
            .next()
            .unwrap_or_else(|| Self::absolute(name))
    }

    /// Runs `func` with the calling crate's manifest.
    ///
    /// Manifests are cached per path and re-read when the file's modification
    /// time changes. Reading still costs a lock and a syscall, so macros should
    /// call this once per invocation and pass the resulting path around.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path();
        let modified_time =
            Self::modified_time(&path).expect("The Cargo.toml should have a modified time.");

        {
            let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = manifests.get(&path)
                && manifest.modified_time == modified_time
            {
                return func(manifest);
            }
        }

        let manifest = Manifest {
            manifest: Self::read(&path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}
