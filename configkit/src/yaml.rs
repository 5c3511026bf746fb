//! YAML text adapter backed by `serde-saphyr` and `serde_yaml`.
//!
//! Parsing uses `serde-saphyr` with strict boolean semantics, so only `true`
//! and `false` become booleans; `yes`, `on` and friends stay strings. Emission
//! uses `serde_yaml`, which writes block style in the mapping's insertion
//! order.

use serde_saphyr::Options;

use crate::value::{ConfigValue, Mapping};
use crate::{ConfigkitError, ConfigkitResult, ConfigkitResultExt};

/// Origin label used for YAML that does not come from a file.
pub const INLINE_ORIGIN: &str = "<inline>";

/// Parses a YAML document whose top level is a mapping.
///
/// # Errors
///
/// See [`parse_yaml_from`].
///
/// # Examples
///
/// ```rust
/// use configkit::{ConfigValue, yaml::parse_yaml};
///
/// let tree = parse_yaml("server:\n  port: 8080\n  debug: yes\n")?;
/// let server = tree.get("server").and_then(ConfigValue::as_mapping).expect("mapping");
/// assert_eq!(server.get("port"), Some(&ConfigValue::from(8080_i64)));
/// assert_eq!(server.get("debug"), Some(&ConfigValue::from("yes")));
/// # Ok::<_, configkit::ConfigkitError>(())
/// ```
pub fn parse_yaml(text: &str) -> ConfigkitResult<Mapping> {
    parse_yaml_from(INLINE_ORIGIN, text)
}

/// Parses YAML read from `origin`, which is only used in error messages.
///
/// Documents that hold nothing but comments, or an explicit null, yield an
/// empty mapping.
///
/// # Errors
///
/// Returns [`ConfigkitError::SourceFormat`] when the text is not valid YAML
/// or its top level is not a mapping.
pub fn parse_yaml_from(origin: &str, text: &str) -> ConfigkitResult<Mapping> {
    if is_blank_document(text) {
        return Ok(Mapping::new());
    }
    let value: ConfigValue = serde_saphyr::from_str_with_options(
        text,
        Options {
            strict_booleans: true,
            ..Options::default()
        },
    )
    .map_err(|err| ConfigkitError::source_format(origin, err))?;
    match value {
        ConfigValue::Mapping(mapping) => Ok(mapping),
        ConfigValue::Null => Ok(Mapping::new()),
        other => Err(ConfigkitError::source_format(
            origin,
            format!("top-level YAML value must be a mapping, found {}", other.kind()),
        )),
    }
}

fn is_blank_document(text: &str) -> bool {
    text.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

/// Serialises `tree` as block-style YAML.
///
/// # Errors
///
/// Returns [`ConfigkitError::YamlEmit`] when the emitter fails.
///
/// # Examples
///
/// ```rust
/// use configkit::mapping_from_json;
/// use configkit::yaml::to_yaml_string;
/// use serde_json::json;
///
/// let yaml = to_yaml_string(&mapping_from_json(json!({"a": {"b": [1, 2]}})))?;
/// assert_eq!(yaml, "a:\n  b:\n  - 1\n  - 2\n");
/// # Ok::<_, configkit::ConfigkitError>(())
/// ```
pub fn to_yaml_string(tree: &Mapping) -> ConfigkitResult<String> {
    serde_yaml::to_string(tree).into_configkit()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{parse_yaml, parse_yaml_from, to_yaml_string};
    use crate::ConfigkitError;
    use crate::value::{Mapping, mapping_from_json};

    #[rstest]
    #[case("")]
    #[case("\n\n")]
    #[case("# only a comment\n")]
    #[case("---\n")]
    #[case("~\n")]
    fn blank_documents_are_empty(#[case] text: &str) {
        assert_eq!(parse_yaml(text).expect("document parses"), Mapping::new());
    }

    #[rstest]
    fn parses_nested_documents_in_order() {
        let text = "zeta: 1\nalpha:\n  list: [a, 2, true, ~]\n  text: \"8080\"\n";
        let tree = parse_yaml(text).expect("document parses");
        assert_eq!(
            tree,
            mapping_from_json(json!({
                "zeta": 1,
                "alpha": {"list": ["a", 2, true, null], "text": "8080"}
            }))
        );
        assert_eq!(tree.keys().collect::<Vec<_>>(), ["zeta", "alpha"]);
    }

    #[rstest]
    #[case("- a\n- b\n", "sequence")]
    #[case("just text\n", "string")]
    fn non_mapping_documents_are_rejected(#[case] text: &str, #[case] kind: &str) {
        let err = parse_yaml_from("list.yaml", text).expect_err("top level is not a mapping");
        assert!(matches!(err, ConfigkitError::SourceFormat { ref origin, .. } if origin == "list.yaml"));
        assert!(err.to_string().contains(kind), "{err}");
    }

    #[rstest]
    fn malformed_yaml_is_a_source_format_error() {
        let err = parse_yaml("a: [1, 2\n").expect_err("unterminated flow sequence");
        assert!(matches!(err, ConfigkitError::SourceFormat { .. }));
    }

    #[rstest]
    fn duplicate_keys_are_rejected() {
        let err = parse_yaml("a: 1\na: 2\n").expect_err("duplicate mapping key");
        assert!(matches!(err, ConfigkitError::SourceFormat { .. }));
    }

    #[rstest]
    fn emitted_yaml_parses_back() {
        let tree = mapping_from_json(json!({
            "server": {"host": "localhost", "port": 8080, "ratio": 0.5},
            "flags": [true, false],
            "version": "1.0",
            "empty": null
        }));
        let text = to_yaml_string(&tree).expect("tree serialises");
        assert_eq!(parse_yaml(&text).expect("emitted YAML parses"), tree);
    }
}
