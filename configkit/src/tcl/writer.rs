//! Renders array stores as Tcl scripts.

use crate::bridge::{MemoryStore, TYPE_HINTS_ARRAY, is_hint_key};
use crate::codec::quote;

/// First line of every generated script.
pub const SCRIPT_HEADER: &str = "# Generated by configkit";

const HINTS_COMMENT: &str = "# Type information for configkit";

/// Options for scripts generated from several inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TclWriteOptions {
    /// Precede each input's section with a `# From <path>` comment.
    pub source_comments: bool,
    /// Record leaf types in the `__configkit_types__` array.
    pub type_hints: bool,
    /// Note failing inputs in a comment and continue instead of failing.
    pub skip_errors: bool,
}

impl Default for TclWriteOptions {
    fn default() -> Self {
        Self {
            source_comments: true,
            type_hints: false,
            skip_errors: false,
        }
    }
}

/// Incremental builder for a generated script.
///
/// ```rust
/// use configkit::tcl::ScriptWriter;
/// use configkit::{ArrayStore, CompositeKey, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// store.set_entry(CompositeKey::from("server(port)"), "8080".to_owned());
///
/// let mut writer = ScriptWriter::new();
/// writer.comment("From base.yaml");
/// writer.store(&store);
/// assert_eq!(
///     writer.finish(),
///     "# Generated by configkit\n\n# From base.yaml\nset server(port) 8080\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ScriptWriter {
    out: String,
}

impl Default for ScriptWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptWriter {
    /// Starts a script with the generated-file header.
    #[must_use]
    pub fn new() -> Self {
        let mut out = String::from(SCRIPT_HEADER);
        out.push_str("\n\n");
        Self { out }
    }

    /// Appends a comment; multi-line text becomes one comment per line.
    pub fn comment(&mut self, text: &str) {
        for line in text.lines() {
            self.out.push_str("# ");
            self.out.push_str(line);
            self.out.push('\n');
        }
    }

    /// Appends an empty line.
    pub fn blank_line(&mut self) {
        self.out.push('\n');
    }

    /// Appends one `set` command per entry of `store`.
    ///
    /// Type hint entries are gathered into a trailing section that
    /// initialises the hint array first.
    pub fn store(&mut self, store: &MemoryStore) {
        let (hints, values): (Vec<_>, Vec<_>) =
            store.iter().partition(|(key, _)| is_hint_key(key.as_str()));
        for (key, text) in values {
            self.set(key.as_str(), text);
        }
        if hints.is_empty() {
            return;
        }
        self.blank_line();
        self.out.push_str(HINTS_COMMENT);
        self.out.push('\n');
        self.out.push_str("array set ");
        self.out.push_str(TYPE_HINTS_ARRAY);
        self.out.push_str(" {}\n");
        for (key, text) in hints {
            self.set(key.as_str(), text);
        }
    }

    fn set(&mut self, name: &str, text: &str) {
        self.out.push_str("set ");
        self.out.push_str(&variable_word(name));
        self.out.push(' ');
        self.out.push_str(if text.is_empty() { "{}" } else { text });
        self.out.push('\n');
    }

    /// Returns the rendered script.
    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }
}

/// Renders a whole store as a standalone script.
///
/// # Examples
///
/// ```rust
/// use configkit::bridge::project;
/// use configkit::mapping_from_json;
/// use configkit::tcl::render_script;
/// use serde_json::json;
///
/// let store = project(&mapping_from_json(json!({"name": "demo", "limits": {"cpu": 4}})))?;
/// assert_eq!(
///     render_script(&store),
///     "# Generated by configkit\n\nset name \"demo\"\nset limits(cpu) 4\n"
/// );
/// # Ok::<_, configkit::bridge::BridgeError>(())
/// ```
#[must_use]
pub fn render_script(store: &MemoryStore) -> String {
    let mut writer = ScriptWriter::new();
    writer.store(store);
    writer.finish()
}

fn variable_word(name: &str) -> String {
    let plain = !name.is_empty()
        && !name.starts_with('#')
        && !name
            .chars()
            .any(|ch| ch.is_whitespace() || matches!(ch, '"' | '{' | '}' | '[' | ']' | '$' | '\\' | ';'));
    if plain {
        return name.to_owned();
    }
    if name.contains(['{', '}', '\\']) {
        return quote(name);
    }
    format!("{{{name}}}")
}
