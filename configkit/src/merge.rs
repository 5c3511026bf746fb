//! Deep merge of configuration mappings.
//!
//! Sources are folded left to right and later sources win:
//! - mappings present on both sides merge recursively;
//! - any other value (scalars, sequences, nulls) replaces the earlier value
//!   wholesale, sequences included;
//! - keys only present in one side are kept as they are.
//!
//! The result never aliases an input; every value is cloned into it.

use std::borrow::Borrow;

use tracing::trace;

use crate::value::{ConfigValue, Mapping};

/// Merges `sources` in order, later entries taking precedence.
///
/// An empty input yields an empty mapping and a single input yields a deep
/// copy of it.
///
/// # Examples
///
/// ```rust
/// use configkit::{mapping_from_json, merge};
/// use serde_json::json;
///
/// let base = mapping_from_json(json!({"a": 1, "b": {"x": 1, "y": 2}}));
/// let site = mapping_from_json(json!({"b": {"y": 20, "z": 30}, "c": 3}));
///
/// let merged = merge([&base, &site]);
/// assert_eq!(
///     merged,
///     mapping_from_json(json!({"a": 1, "b": {"x": 1, "y": 20, "z": 30}, "c": 3}))
/// );
/// ```
#[must_use]
pub fn merge<I>(sources: I) -> Mapping
where
    I: IntoIterator,
    I::Item: Borrow<Mapping>,
{
    sources.into_iter().fold(Mapping::new(), |mut acc, source| {
        merge_into(&mut acc, source.borrow());
        acc
    })
}

/// Overlays `layer` onto `target` in place.
///
/// ```rust
/// use configkit::{mapping_from_json, merge_into};
/// use serde_json::json;
///
/// let mut acc = mapping_from_json(json!({"list": [1, 2, 3], "keep": true}));
/// merge_into(&mut acc, &mapping_from_json(json!({"list": [4]})));
/// assert_eq!(acc, mapping_from_json(json!({"list": [4], "keep": true})));
/// ```
pub fn merge_into(target: &mut Mapping, layer: &Mapping) {
    for (key, incoming) in layer {
        match (target.get_mut(key), incoming) {
            (Some(ConfigValue::Mapping(existing)), ConfigValue::Mapping(nested)) => {
                merge_into(existing, nested);
            }
            (Some(existing), _) => {
                if existing.kind() != incoming.kind() {
                    trace!(
                        key = %key,
                        from = existing.kind(),
                        to = incoming.kind(),
                        "later source replaces value of a different kind"
                    );
                }
                *existing = incoming.clone();
            }
            (None, _) => {
                target.insert(key.clone(), incoming.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{merge, merge_into};
    use crate::value::{ConfigValue, Mapping, mapping_from_json};

    #[rstest]
    fn empty_input_yields_empty_mapping() {
        assert_eq!(merge(Vec::<Mapping>::new()), Mapping::new());
    }

    #[rstest]
    fn single_input_is_copied_deeply() {
        let source = mapping_from_json(json!({"a": {"b": [1, 2]}}));
        let mut merged = merge([&source]);
        assert_eq!(merged, source);

        merged.insert("a".to_owned(), ConfigValue::from("changed"));
        assert_eq!(source, mapping_from_json(json!({"a": {"b": [1, 2]}})));
    }

    #[rstest]
    #[case(json!({"a": 1}), json!({"b": 2}), json!({"a": 1, "b": 2}))]
    #[case(json!({"a": 1}), json!({"a": 2}), json!({"a": 2}))]
    #[case(json!({"a": {"x": 1}}), json!({"a": {"y": 2}}), json!({"a": {"x": 1, "y": 2}}))]
    #[case(json!({"a": [1, 2, 3]}), json!({"a": [4]}), json!({"a": [4]}))]
    #[case(json!({"a": {"x": 1}}), json!({"a": 5}), json!({"a": 5}))]
    #[case(json!({"a": 5}), json!({"a": {"x": 1}}), json!({"a": {"x": 1}}))]
    #[case(json!({"a": 1}), json!({"a": null}), json!({"a": null}))]
    fn later_sources_win(
        #[case] first: serde_json::Value,
        #[case] second: serde_json::Value,
        #[case] expected: serde_json::Value,
    ) {
        let merged = merge([mapping_from_json(first), mapping_from_json(second)]);
        assert_eq!(merged, mapping_from_json(expected));
    }

    #[rstest]
    fn merge_is_not_commutative() {
        let left = mapping_from_json(json!({"a": 1}));
        let right = mapping_from_json(json!({"a": 2}));
        assert_ne!(merge([&left, &right]), merge([&right, &left]));
    }

    #[rstest]
    fn three_sources_fold_left() {
        let merged = merge([
            mapping_from_json(json!({"a": {"x": 1, "y": 1}})),
            mapping_from_json(json!({"a": {"y": 2}})),
            mapping_from_json(json!({"a": {"z": 3}, "b": true})),
        ]);
        assert_eq!(
            merged,
            mapping_from_json(json!({"a": {"x": 1, "y": 2, "z": 3}, "b": true}))
        );
    }

    #[rstest]
    fn inputs_are_left_untouched() {
        let first = mapping_from_json(json!({"a": {"x": 1}}));
        let second = mapping_from_json(json!({"a": {"y": 2}}));
        let mut target = first.clone();
        merge_into(&mut target, &second);
        assert_eq!(first, mapping_from_json(json!({"a": {"x": 1}})));
        assert_eq!(second, mapping_from_json(json!({"a": {"y": 2}})));
    }
}
