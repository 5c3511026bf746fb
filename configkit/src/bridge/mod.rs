//! Projection of configuration trees onto an array-style store and back.
//!
//! [`project`] flattens a [`Mapping`] depth-first: every leaf becomes one
//! store entry whose key is the leaf's composite key and whose value is the
//! leaf's encoded text. [`reconstruct`] reverses the process.
//!
//! Two losses are inherent to the flat representation. Empty mappings have
//! no leaves and therefore disappear. Strings that look like numbers decode
//! as numbers unless type hints were recorded with
//! [`ProjectOptions::type_hints`].
//!
//! # Examples
//!
//! ```rust
//! use configkit::bridge::{project, reconstruct};
//! use configkit::mapping_from_json;
//! use serde_json::json;
//!
//! let tree = mapping_from_json(json!({"server": {"host": "localhost", "port": 8080}}));
//! let store = project(&tree)?;
//! assert_eq!(store.get("server(host)"), Some(r#""localhost""#));
//! assert_eq!(store.get("server(port)"), Some("8080"));
//! assert_eq!(reconstruct(&store)?, tree);
//! # Ok::<_, configkit::bridge::BridgeError>(())
//! ```

mod hints;
mod store;

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::codec::{self, CodecError, TypeTag};
use crate::path::{CompositeKey, KeyPath, PathError, join_segments};
use crate::value::{ConfigValue, Mapping};

pub use hints::{TYPE_HINTS_ARRAY, hint_key};
pub(crate) use hints::is_hint_key;
pub use store::{ArrayStore, MemoryStore};

/// Errors raised while projecting or reconstructing a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BridgeError {
    /// A mapping key cannot be used as a path segment, or a store key is not
    /// a valid composite key.
    #[error("invalid key '{key}': {source}")]
    Path {
        /// Offending key as it appears in the tree or the store.
        key: String,
        /// Underlying path error.
        #[source]
        source: PathError,
    },

    /// A leaf could not be encoded.
    #[error("cannot encode value at '{key}': {source}")]
    Encode {
        /// Composite key of the leaf.
        key: String,
        /// Underlying codec error.
        #[source]
        source: CodecError,
    },

    /// A store entry could not be decoded.
    #[error("cannot decode entry '{key}': {source}")]
    Decode {
        /// Composite key of the entry.
        key: String,
        /// Underlying codec error.
        #[source]
        source: CodecError,
    },

    /// One path is used both as a leaf and as a mapping.
    #[error("path '{path}' is used both as a value and as a mapping")]
    PathConflict {
        /// Composite key of the contested path.
        path: String,
    },

    /// A type hint names an unknown type.
    #[error("entry '{key}' has unknown type hint '{tag}'")]
    UnknownTypeHint {
        /// Composite key of the hinted entry.
        key: String,
        /// Tag text found in the hint array.
        tag: String,
    },

    /// The tree uses the name reserved for the type hint array.
    #[error("top-level key '__configkit_types__' is reserved for type hints")]
    ReservedName,

    /// The store listed a key but returned no value for it.
    #[error("store lists '{key}' but holds no value for it")]
    MissingEntry {
        /// Listed key.
        key: String,
    },
}

/// Options controlling [`project_with`] and [`project_into`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectOptions {
    /// Record each leaf's type in the `__configkit_types__` array.
    pub type_hints: bool,
}

impl ProjectOptions {
    /// Enables or disables type hints.
    #[must_use]
    pub const fn with_type_hints(mut self, enabled: bool) -> Self {
        self.type_hints = enabled;
        self
    }
}

/// Projects `tree` into a fresh [`MemoryStore`] without type hints.
///
/// # Errors
///
/// Returns [`BridgeError::Path`] for keys that are not valid path segments
/// and [`BridgeError::Encode`] for sequences containing mappings.
pub fn project(tree: &Mapping) -> Result<MemoryStore, BridgeError> {
    project_with(tree, ProjectOptions::default())
}

/// Projects `tree` into a fresh [`MemoryStore`].
///
/// # Errors
///
/// See [`project`]. [`BridgeError::ReservedName`] is returned when the tree
/// has a top-level `__configkit_types__` key.
pub fn project_with(
    tree: &Mapping,
    options: ProjectOptions,
) -> Result<MemoryStore, BridgeError> {
    flatten(tree, options).map(MemoryStore::from_iter)
}

/// Projects `tree` into an existing store.
///
/// Every entry is computed before the first write, so `store` is left
/// untouched when an error is returned.
///
/// # Errors
///
/// See [`project_with`].
pub fn project_into<S>(
    tree: &Mapping,
    store: &mut S,
    options: ProjectOptions,
) -> Result<(), BridgeError>
where
    S: ArrayStore + ?Sized,
{
    let entries = flatten(tree, options)?;
    let count = entries.len();
    for (key, text) in entries {
        store.set_entry(key, text);
    }
    debug!(
        entries = count,
        type_hints = options.type_hints,
        "projected tree into store"
    );
    Ok(())
}

fn flatten(
    tree: &Mapping,
    options: ProjectOptions,
) -> Result<Vec<(CompositeKey, String)>, BridgeError> {
    if tree.contains_key(TYPE_HINTS_ARRAY) {
        return Err(BridgeError::ReservedName);
    }
    let mut leaves = Vec::new();
    let mut prefix = Vec::new();
    collect_leaves(tree, &mut prefix, &mut leaves)?;

    let mut entries = Vec::with_capacity(leaves.len());
    let mut tags = Vec::new();
    for (path, value) in leaves {
        let key = path.to_composite_key();
        let text = codec::encode(value).map_err(|source| BridgeError::Encode {
            key: key.to_string(),
            source,
        })?;
        if options.type_hints
            && let Some(tag) = TypeTag::of(value)
        {
            tags.push((
                CompositeKey::new(hint_key(key.as_str())),
                tag.as_str().to_owned(),
            ));
        }
        entries.push((key, text));
    }
    entries.extend(tags);
    Ok(entries)
}

fn collect_leaves<'a>(
    node: &'a Mapping,
    prefix: &mut Vec<String>,
    leaves: &mut Vec<(KeyPath, &'a ConfigValue)>,
) -> Result<(), BridgeError> {
    for (segment, value) in node {
        prefix.push(segment.clone());
        match value {
            ConfigValue::Mapping(nested) => collect_leaves(nested, prefix, leaves)?,
            leaf => {
                let path =
                    KeyPath::new(prefix.iter().cloned()).map_err(|source| BridgeError::Path {
                        key: join_segments(prefix.as_slice()),
                        source,
                    })?;
                leaves.push((path, leaf));
            }
        }
        prefix.pop();
    }
    Ok(())
}

/// Rebuilds a tree from every entry of `store`.
///
/// Type hint entries are consulted, never copied into the result. Entry
/// order does not matter for conflict detection: `a` and `a(b)` conflict
/// whichever comes first.
///
/// # Errors
///
/// Returns [`BridgeError::Path`] for malformed keys, [`BridgeError::Decode`]
/// for malformed values and [`BridgeError::PathConflict`] when a path is
/// both a leaf and a mapping.
pub fn reconstruct<S>(store: &S) -> Result<Mapping, BridgeError>
where
    S: ArrayStore + ?Sized,
{
    let keys = store.list_entries();
    let tags = read_type_hints(store, &keys)?;

    let mut tree = Mapping::new();
    for key in keys.iter().filter(|key| !is_hint_key(key.as_str())) {
        let path = key.to_key_path().map_err(|source| BridgeError::Path {
            key: key.to_string(),
            source,
        })?;
        let text = entry_text(store, key)?;
        let decoded = match tags.get(key.as_str()) {
            Some(tag) => codec::decode_typed(text, *tag),
            None => codec::decode(text),
        };
        let value = decoded.map_err(|source| BridgeError::Decode {
            key: key.to_string(),
            source,
        })?;
        insert_at(&mut tree, path.segments(), value)?;
    }
    debug!(
        entries = keys.len(),
        hinted = tags.len(),
        "reconstructed tree from store"
    );
    Ok(tree)
}

fn entry_text<'s, S>(store: &'s S, key: &CompositeKey) -> Result<&'s str, BridgeError>
where
    S: ArrayStore + ?Sized,
{
    store.get_entry(key).ok_or_else(|| BridgeError::MissingEntry {
        key: key.to_string(),
    })
}

fn read_type_hints<S>(
    store: &S,
    keys: &[CompositeKey],
) -> Result<HashMap<String, TypeTag>, BridgeError>
where
    S: ArrayStore + ?Sized,
{
    let mut tags = HashMap::new();
    for key in keys {
        let Some(target) = hints::hinted_key(key.as_str()) else {
            continue;
        };
        let text = entry_text(store, key)?;
        let decoded = codec::decode_typed(text, TypeTag::String).map_err(|source| {
            BridgeError::Decode {
                key: key.to_string(),
                source,
            }
        })?;
        let name = decoded.as_str().unwrap_or_default();
        let tag = TypeTag::from_name(name).ok_or_else(|| BridgeError::UnknownTypeHint {
            key: target.to_owned(),
            tag: name.to_owned(),
        })?;
        tags.insert(target.to_owned(), tag);
    }
    Ok(tags)
}

fn insert_at(
    tree: &mut Mapping,
    segments: &[String],
    value: ConfigValue,
) -> Result<(), BridgeError> {
    let Some((leaf, parents)) = segments.split_last() else {
        return Ok(());
    };
    let mut node = tree;
    for (depth, segment) in parents.iter().enumerate() {
        let child = node
            .entry(segment.clone())
            .or_insert_with(|| ConfigValue::Mapping(Mapping::new()));
        let ConfigValue::Mapping(nested) = child else {
            return Err(conflict(segments.get(..=depth).unwrap_or(segments)));
        };
        node = nested;
    }
    if matches!(node.get(leaf), Some(ConfigValue::Mapping(_))) {
        return Err(conflict(segments));
    }
    node.insert(leaf.clone(), value);
    Ok(())
}

fn conflict(segments: &[String]) -> BridgeError {
    BridgeError::PathConflict {
        path: join_segments(segments),
    }
}
