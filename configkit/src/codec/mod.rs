//! Leaf value codec for the Tcl array notation.
//!
//! Every leaf of a configuration tree is stored as one Tcl word. The rules are
//! fixed so that a value's type survives the trip through the store:
//!
//! | value            | encoded form                     |
//! |------------------|----------------------------------|
//! | null             | `{}`                             |
//! | boolean          | `true` / `false` (bare)          |
//! | number           | `42`, `-7`, `2.75` (bare)        |
//! | string           | `"..."` (always double-quoted)   |
//! | sequence         | `[list e1 e2 ...]`               |
//! | mapping in a list| `[dict create "k" v ...]`        |
//!
//! Decoding applies a fixed precedence to bare tokens: number, then boolean,
//! then string. Quoted text whose content looks numeric decodes as a number;
//! this is the one lossy case, and callers that need exact scalar strings
//! record a [`TypeTag`] and use [`decode_typed`]. Elements of a list are always
//! sniffed.
//!
//! # Examples
//!
//! ```rust
//! use configkit::ConfigValue;
//! use configkit::codec::{decode, encode};
//!
//! let value = ConfigValue::Sequence(vec![ConfigValue::from(1_i64), "two words".into()]);
//! let text = encode(&value)?;
//! assert_eq!(text, r#"[list 1 "two words"]"#);
//! assert_eq!(decode(&text)?, value);
//! # Ok::<_, configkit::codec::CodecError>(())
//! ```

mod lexer;

use std::fmt::Display;

use thiserror::Error;

use crate::value::{ConfigValue, Mapping, Number};

pub(crate) use lexer::{Command, LexError, Lexer, Mode, Word, WordKind};

/// Errors raised while encoding or decoding a leaf value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// The text is not a well-formed encoded value.
    #[error("cannot decode '{text}': {message}")]
    Decode {
        /// Offending input text.
        text: String,
        /// What was wrong with it.
        message: String,
    },

    /// Mappings are flattened by the store bridge and never encoded directly.
    #[error("{kind} values cannot be encoded as a single store entry")]
    UnsupportedLeaf {
        /// Kind of the rejected value.
        kind: &'static str,
    },
}

/// Declared type of a stored leaf, used to decode it without guessing.
///
/// The names match the entries written to the `__configkit_types__` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// Text, even when it looks like a number.
    String,
    /// Integer or float.
    Number,
    /// `1`/`0` or `true`/`false`.
    Bool,
    /// Null.
    None,
    /// A Tcl list.
    List,
}

impl TypeTag {
    /// Returns the tag describing `value`, or `None` for mappings.
    #[must_use]
    pub const fn of(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Null => Some(Self::None),
            ConfigValue::Bool(_) => Some(Self::Bool),
            ConfigValue::Number(_) => Some(Self::Number),
            ConfigValue::String(_) => Some(Self::String),
            ConfigValue::Sequence(_) => Some(Self::List),
            ConfigValue::Mapping(_) => None,
        }
    }

    /// Returns the name stored in the type hint array.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::None => "none",
            Self::List => "list",
        }
    }

    /// Parses a stored tag name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "bool" => Some(Self::Bool),
            "none" => Some(Self::None),
            "list" => Some(Self::List),
            _ => None,
        }
    }
}

/// Encodes a leaf value as a single Tcl word.
///
/// # Errors
///
/// Returns [`CodecError::UnsupportedLeaf`] when `value` itself is a mapping.
/// Mappings nested inside a sequence are encoded as `dict create` commands.
pub fn encode(value: &ConfigValue) -> Result<String, CodecError> {
    if !value.is_leaf() {
        return Err(CodecError::UnsupportedLeaf { kind: value.kind() });
    }
    let mut out = String::new();
    encode_into(value, &mut out);
    Ok(out)
}

fn encode_into(value: &ConfigValue, out: &mut String) {
    match value {
        ConfigValue::Null => out.push_str("{}"),
        ConfigValue::Bool(flag) => out.push_str(if *flag { "true" } else { "false" }),
        ConfigValue::Number(number) => out.push_str(&number.to_string()),
        ConfigValue::String(text) => quote_into(text, out),
        ConfigValue::Sequence(items) => {
            out.push_str("[list");
            for item in items {
                out.push(' ');
                encode_into(item, out);
            }
            out.push(']');
        }
        ConfigValue::Mapping(entries) => {
            out.push_str("[dict create");
            for (key, item) in entries {
                out.push(' ');
                quote_into(key, out);
                out.push(' ');
                encode_into(item, out);
            }
            out.push(']');
        }
    }
}

/// Wraps `text` in double quotes, escaping characters Tcl would substitute.
///
/// # Examples
///
/// ```rust
/// use configkit::codec::quote;
///
/// assert_eq!(quote("a $b [c]"), r#""a \$b \[c\]""#);
/// assert_eq!(quote("line\nbreak"), r#""line\nbreak""#);
/// ```
#[must_use]
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    quote_into(text, &mut out);
    out
}

fn quote_into(text: &str, out: &mut String) {
    out.push('"');
    for ch in text.chars() {
        match ch {
            '\\' | '"' | '$' | '[' | ']' => {
                out.push('\\');
                out.push(ch);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

/// Decodes a single encoded word back into a value.
///
/// Empty input decodes to [`ConfigValue::Null`].
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for unterminated quotes, braces or brackets,
/// for more than one word and for command substitutions other than `list`.
/// A `dict create` command is only accepted inside a list.
pub fn decode(text: &str) -> Result<ConfigValue, CodecError> {
    let value = single_word(text)?.map_or(Ok(ConfigValue::Null), |word| decode_word(&word))?;
    if value.is_leaf() {
        Ok(value)
    } else {
        Err(decode_error(text, "a dict is only allowed as a list element"))
    }
}

/// Decodes `text` according to a recorded type tag instead of sniffing.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] when the text is malformed or does not fit
/// the tag (for example `number` for non-numeric text).
pub fn decode_typed(text: &str, tag: TypeTag) -> Result<ConfigValue, CodecError> {
    let word = single_word(text)?;
    let content = word.as_ref().map_or("", literal);
    match tag {
        TypeTag::None => Ok(ConfigValue::Null),
        TypeTag::String => Ok(ConfigValue::String(content.to_owned())),
        TypeTag::Number => parse_number(content)
            .map(ConfigValue::Number)
            .ok_or_else(|| decode_error(text, "expected a number")),
        TypeTag::Bool => match content.to_ascii_lowercase().as_str() {
            "1" | "true" => Ok(ConfigValue::Bool(true)),
            "0" | "false" => Ok(ConfigValue::Bool(false)),
            _ => Err(decode_error(text, "expected a boolean")),
        },
        TypeTag::List => match word {
            None => Ok(ConfigValue::Sequence(Vec::new())),
            Some(list) if list.kind == WordKind::Bracketed => match decode_command(&list.text)? {
                sequence @ ConfigValue::Sequence(_) => Ok(sequence),
                _ => Err(decode_error(text, "expected a list")),
            },
            Some(list) => split_list(&list.text)?
                .iter()
                .map(decode_word)
                .collect::<Result<_, _>>()
                .map(ConfigValue::Sequence),
        },
    }
}

fn literal(word: &Word) -> &str {
    match word.kind {
        WordKind::Bracketed => &word.raw,
        WordKind::Bare | WordKind::Quoted | WordKind::Braced => &word.text,
    }
}

fn single_word(text: &str) -> Result<Option<Word>, CodecError> {
    let mut words = split_list(text)?;
    if words.len() > 1 {
        return Err(decode_error(
            text,
            "expected a single value but found several words",
        ));
    }
    Ok(words.pop())
}

fn split_list(text: &str) -> Result<Vec<Word>, CodecError> {
    Lexer::new(text, Mode::List)
        .words()
        .map_err(|err| decode_error(text, err))
}

fn decode_word(word: &Word) -> Result<ConfigValue, CodecError> {
    match word.kind {
        WordKind::Bare => Ok(sniff_bare(&word.text)),
        WordKind::Quoted => Ok(parse_number(&word.text).map_or_else(
            || ConfigValue::String(word.text.clone()),
            ConfigValue::Number,
        )),
        WordKind::Braced if word.text.is_empty() => Ok(ConfigValue::Null),
        WordKind::Braced => Ok(ConfigValue::String(word.text.clone())),
        WordKind::Bracketed => decode_command(&word.text),
    }
}

fn decode_command(command: &str) -> Result<ConfigValue, CodecError> {
    let words = split_list(command)?;
    match words.as_slice() {
        [head, items @ ..] if head.is_bare("list") => items
            .iter()
            .map(decode_word)
            .collect::<Result<_, _>>()
            .map(ConfigValue::Sequence),
        [head, sub, pairs @ ..] if head.is_bare("dict") && sub.is_bare("create") => {
            decode_dict(command, pairs).map(ConfigValue::Mapping)
        }
        _ => Err(decode_error(
            command,
            "only [list ...] and [dict create ...] command substitutions are supported",
        )),
    }
}

fn decode_dict(command: &str, pairs: &[Word]) -> Result<Mapping, CodecError> {
    let mut entries = Mapping::new();
    let mut words = pairs.iter();
    while let Some(key) = words.next() {
        if key.kind == WordKind::Bracketed {
            return Err(decode_error(command, "dict keys must be plain words"));
        }
        let Some(item) = words.next() else {
            return Err(decode_error(command, "dict create expects key value pairs"));
        };
        entries.insert(key.text.clone(), decode_word(item)?);
    }
    Ok(entries)
}

fn sniff_bare(token: &str) -> ConfigValue {
    if let Some(number) = parse_number(token) {
        return ConfigValue::Number(number);
    }
    match token {
        "true" => ConfigValue::Bool(true),
        "false" => ConfigValue::Bool(false),
        _ => ConfigValue::String(token.to_owned()),
    }
}

/// Parses an integer or finite float literal.
pub(crate) fn parse_number(token: &str) -> Option<Number> {
    if let Ok(int) = token.parse::<i64>() {
        return Some(Number::from(int));
    }
    if let Ok(uint) = token.parse::<u64>() {
        return Some(Number::from(uint));
    }
    if !looks_like_float(token) {
        return None;
    }
    token.parse::<f64>().ok().and_then(Number::from_f64)
}

// Keeps `inf`, `nan` and friends out; Rust's float parser accepts them.
fn looks_like_float(token: &str) -> bool {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    unsigned.starts_with(|ch: char| ch.is_ascii_digit() || ch == '.')
        && unsigned.chars().any(|ch| ch.is_ascii_digit())
        && unsigned
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '.' | 'e' | 'E' | '+' | '-'))
}

fn decode_error(text: &str, message: impl Display) -> CodecError {
    CodecError::Decode {
        text: text.to_owned(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests;
