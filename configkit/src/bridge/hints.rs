//! Keys of the reserved type hint array.

/// Name of the Tcl array that records each leaf's declared type.
pub const TYPE_HINTS_ARRAY: &str = "__configkit_types__";

/// Builds the hint key for the leaf stored under `key`.
///
/// ```rust
/// use configkit::bridge::hint_key;
///
/// assert_eq!(hint_key("server(port)"), "__configkit_types__(server(port))");
/// ```
#[must_use]
pub fn hint_key(key: &str) -> String {
    format!("{TYPE_HINTS_ARRAY}({key})")
}

/// Returns the leaf key a hint entry describes, or `None` for ordinary keys.
pub(crate) fn hinted_key(key: &str) -> Option<&str> {
    key.strip_prefix(TYPE_HINTS_ARRAY)?
        .strip_prefix('(')?
        .strip_suffix(')')
}

/// Whether `key` belongs to the hint array, including the bare array name.
pub(crate) fn is_hint_key(key: &str) -> bool {
    key == TYPE_HINTS_ARRAY || hinted_key(key).is_some()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{hint_key, hinted_key, is_hint_key};

    #[rstest]
    #[case("port")]
    #[case("server(settings,timeout)")]
    fn hint_keys_round_trip(#[case] key: &str) {
        assert_eq!(hinted_key(&hint_key(key)), Some(key));
    }

    #[rstest]
    #[case("__configkit_types__", true)]
    #[case("__configkit_types__(a)", true)]
    #[case("__configkit_typesx(a)", false)]
    #[case("server(port)", false)]
    fn recognises_hint_entries(#[case] key: &str, #[case] expected: bool) {
        assert_eq!(is_hint_key(key), expected);
    }
}
