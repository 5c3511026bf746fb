//! Loads Tcl scripts into an array store.

use crate::bridge::{ArrayStore, MemoryStore};
use crate::codec::{Command, Lexer, Mode, Word, WordKind};
use crate::path::CompositeKey;

use super::TclError;

/// Parses `source` into a fresh store.
///
/// # Errors
///
/// Returns [`TclError::Syntax`] for unterminated words or malformed `set`
/// commands and [`TclError::UnsupportedCommand`] for any other command.
///
/// # Examples
///
/// ```rust
/// use configkit::tcl::parse_script;
///
/// let store = parse_script("# comment\nset server(port) 8080\nset name \"demo\"\n")?;
/// assert_eq!(store.get("server(port)"), Some("8080"));
/// assert_eq!(store.get("name"), Some("\"demo\""));
/// # Ok::<_, configkit::tcl::TclError>(())
/// ```
pub fn parse_script(source: &str) -> Result<MemoryStore, TclError> {
    let mut store = MemoryStore::new();
    source_script(source, &mut store)?;
    Ok(store)
}

/// Evaluates `source` against an existing store, later assignments winning.
///
/// The script is read in full before any entry is written, so `store` is
/// unchanged when an error is returned.
///
/// # Errors
///
/// See [`parse_script`].
pub fn source_script<S>(source: &str, store: &mut S) -> Result<(), TclError>
where
    S: ArrayStore + ?Sized,
{
    let mut lexer = Lexer::new(source, Mode::Script);
    let mut assignments = Vec::new();
    while let Some(command) = lexer.next_command().map_err(|err| TclError::from_lex(&err))? {
        evaluate(&command, &mut assignments)?;
    }
    for (key, text) in assignments {
        store.set_entry(key, text);
    }
    Ok(())
}

fn evaluate(command: &Command, out: &mut Vec<(CompositeKey, String)>) -> Result<(), TclError> {
    match command.words.as_slice() {
        [] => Ok(()),
        [head, name, value] if head.is_bare("set") => {
            let key = CompositeKey::new(variable_name(command, name)?);
            out.push((key, stored_text(value)));
            Ok(())
        }
        [head, ..] if head.is_bare("set") => Err(TclError::syntax(
            command.line,
            "set expects a variable name and a value",
        )),
        [head, sub, name, pairs] if head.is_bare("array") && sub.is_bare("set") => {
            array_set(command, name, pairs, out)
        }
        [head, sub, ..] if head.is_bare("array") && sub.is_bare("set") => Err(TclError::syntax(
            command.line,
            "array set expects an array name and a list of pairs",
        )),
        [head, ..] => Err(TclError::UnsupportedCommand {
            line: command.line,
            command: head.raw.clone(),
        }),
    }
}

fn array_set(
    command: &Command,
    name: &Word,
    pairs: &Word,
    out: &mut Vec<(CompositeKey, String)>,
) -> Result<(), TclError> {
    let array = variable_name(command, name)?;
    let words = Lexer::new(&pairs.text, Mode::List)
        .words()
        .map_err(|err| TclError::syntax(command.line, err.to_string()))?;
    let items = words.chunks_exact(2);
    if !items.remainder().is_empty() {
        return Err(TclError::syntax(
            command.line,
            format!("array set {array} needs an even number of list elements"),
        ));
    }
    for pair in items {
        if let [index, value] = pair {
            out.push((
                CompositeKey::new(format!("{array}({})", index.text)),
                stored_text(value),
            ));
        }
    }
    Ok(())
}

fn variable_name(command: &Command, word: &Word) -> Result<String, TclError> {
    if word.kind == WordKind::Bracketed {
        return Err(TclError::syntax(
            command.line,
            "command substitution is not supported in variable names",
        ));
    }
    Ok(word.text.clone())
}

fn stored_text(word: &Word) -> String {
    word.raw.clone()
}
