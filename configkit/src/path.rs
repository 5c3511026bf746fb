//! Key paths and their composite-key form.
//!
//! A [`KeyPath`] addresses a leaf in a configuration tree. The Tcl side stores
//! it as a [`CompositeKey`]: the first segment names the variable (or array)
//! and any remaining segments form a comma-joined array index, so
//! `["server", "settings", "timeout"]` becomes `server(settings,timeout)`.

use std::borrow::Borrow;
use std::fmt;

use thiserror::Error;

/// Characters that cannot appear inside a path segment.
pub const RESERVED_CHARACTERS: [char; 3] = [',', '(', ')'];

/// Errors raised while building or parsing key paths.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PathError {
    /// A key path needs at least one segment.
    #[error("key paths need at least one segment")]
    Empty,

    /// A segment was the empty string.
    #[error("key path segments must not be empty")]
    EmptySegment,

    /// A segment contains a character used by the composite-key syntax.
    #[error("segment '{segment}' contains the reserved character '{character}'")]
    ReservedCharacter {
        /// Offending segment.
        segment: String,
        /// Reserved character found in it.
        character: char,
    },

    /// A composite key does not follow the `name(index,...)` layout.
    #[error("malformed composite key '{key}': {reason}")]
    Malformed {
        /// Offending key text.
        key: String,
        /// What was wrong with it.
        reason: &'static str,
    },
}

/// An ordered, non-empty list of validated key segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Builds a path after validating every segment.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Empty`] for no segments,
    /// [`PathError::EmptySegment`] for an empty segment and
    /// [`PathError::ReservedCharacter`] when a segment contains `,`, `(` or
    /// `)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use configkit::KeyPath;
    ///
    /// let path = KeyPath::new(["server", "port"])?;
    /// assert_eq!(path.to_composite_key().as_str(), "server(port)");
    /// assert!(KeyPath::new(["a,b"]).is_err());
    /// # Ok::<_, configkit::PathError>(())
    /// ```
    pub fn new<I, S>(segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let owned: Vec<String> = segments.into_iter().map(Into::into).collect();
        if owned.is_empty() {
            return Err(PathError::Empty);
        }
        for segment in &owned {
            validate_segment(segment)?;
        }
        Ok(Self { segments: owned })
    }

    /// Every segment, outermost first.
    #[must_use]
    pub const fn segments(&self) -> &[String] {
        self.segments.as_slice()
    }

    /// The first segment, used as the Tcl variable or array name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.segments.first().map_or("", String::as_str)
    }

    /// The segments after the name, which form the array index.
    #[must_use]
    pub fn indices(&self) -> &[String] {
        self.segments.get(1..).unwrap_or_default()
    }

    /// Encodes the path as a composite key.
    #[must_use]
    pub fn to_composite_key(&self) -> CompositeKey {
        to_composite_key(self)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_segments(&self.segments))
    }
}

fn validate_segment(segment: &str) -> Result<(), PathError> {
    if segment.is_empty() {
        return Err(PathError::EmptySegment);
    }
    match segment.chars().find(|ch| RESERVED_CHARACTERS.contains(ch)) {
        Some(character) => Err(PathError::ReservedCharacter {
            segment: segment.to_owned(),
            character,
        }),
        None => Ok(()),
    }
}

/// The flat key naming one entry of an array store.
///
/// The wrapper does not validate its contents: stores may hold names that do
/// not map to a [`KeyPath`] (for instance type hint entries). Use
/// [`CompositeKey::to_key_path`] to parse it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompositeKey(String);

impl CompositeKey {
    /// Wraps raw key text.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key text.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Parses the key into a path.
    ///
    /// # Errors
    ///
    /// See [`from_composite_key`].
    pub fn to_key_path(&self) -> Result<KeyPath, PathError> {
        from_composite_key(&self.0)
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CompositeKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CompositeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CompositeKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for CompositeKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Encodes `path` as `name` or `name(index,...)`.
#[must_use]
pub fn to_composite_key(path: &KeyPath) -> CompositeKey {
    CompositeKey(join_segments(path.segments()))
}

pub(crate) fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    let mut parts = segments.iter().map(AsRef::as_ref);
    let mut key = parts.next().unwrap_or_default().to_owned();
    let indices: Vec<&str> = parts.collect();
    if !indices.is_empty() {
        key.push('(');
        key.push_str(&indices.join(","));
        key.push(')');
    }
    key
}

/// Parses a composite key back into its path.
///
/// # Errors
///
/// Returns [`PathError::Malformed`] when parentheses are unbalanced or nested,
/// text follows the closing parenthesis, the name is empty or an index
/// segment is empty. A plain name containing `,` is rejected with
/// [`PathError::ReservedCharacter`].
///
/// # Examples
///
/// ```rust
/// use configkit::path::from_composite_key;
///
/// let path = from_composite_key("server(settings,timeout)")?;
/// assert_eq!(path.segments(), ["server", "settings", "timeout"]);
/// assert!(from_composite_key("server(settings").is_err());
/// # Ok::<_, configkit::PathError>(())
/// ```
pub fn from_composite_key(key: &str) -> Result<KeyPath, PathError> {
    let malformed = |reason: &'static str| PathError::Malformed {
        key: key.to_owned(),
        reason,
    };

    let Some((name, rest)) = key.split_once('(') else {
        if key.contains(')') {
            return Err(malformed("closing parenthesis without an opening one"));
        }
        return KeyPath::new([key]).map_err(|err| match err {
            PathError::EmptySegment => malformed("empty variable name"),
            other => other,
        });
    };

    if name.is_empty() {
        return Err(malformed("empty array name"));
    }
    if name.contains(')') {
        return Err(malformed("closing parenthesis before the opening one"));
    }
    let Some(inner) = rest.strip_suffix(')') else {
        return Err(if rest.contains(')') {
            malformed("text after the closing parenthesis")
        } else {
            malformed("missing closing parenthesis")
        });
    };
    if inner.contains(['(', ')']) {
        return Err(malformed("nested parentheses"));
    }

    KeyPath::new(std::iter::once(name).chain(inner.split(','))).map_err(|err| match err {
        PathError::EmptySegment => malformed("empty index segment"),
        other => other,
    })
}
