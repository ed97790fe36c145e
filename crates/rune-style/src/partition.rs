use crate::diagnostics::diagnostics_enabled;
use crate::flatten::{flatten, is_numeric_key};
use crate::tables::{Bucket, ClassificationTable};
use crate::types::{StyleInput, StyleMapping};

/// Flatten `input` and keep only the keys accepted by `predicate`.
///
/// When the input is absent or names no keys at all it is returned
/// unchanged. Numeric keys never survive, even when they are the only keys.
/// Values are carried over without any conversion.
pub fn filter_style<P>(input: Option<&StyleInput>, mut predicate: P) -> Option<StyleInput>
where
    P: FnMut(&str) -> bool,
{
    let flat = match flatten(input) {
        Some(flat) if !flat.is_empty() => flat,
        Some(_) if names_keys(input) => return Some(StyleInput::Mapping(StyleMapping::new())),
        _ => return input.cloned(),
    };
    let filtered: StyleMapping = flat
        .iter()
        .filter(|(key, _)| !is_numeric_key(key.as_str()) && predicate(key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    Some(StyleInput::Mapping(filtered))
}

/// Whether any mapping inside `input` has a key, numeric ones included.
fn names_keys(input: Option<&StyleInput>) -> bool {
    match input {
        None => false,
        Some(StyleInput::Mapping(map)) => !map.is_empty(),
        Some(StyleInput::Sequence(entries)) => entries.iter().any(|e| names_keys(e.as_ref())),
    }
}

/// [`filter_style`] against one of the fixed tables.
pub fn filter_bucket(input: Option<&StyleInput>, bucket: Bucket) -> Option<StyleInput> {
    let table = ClassificationTable::global();
    filter_style(input, |key| table.admits(bucket, key))
}

/// The three per-bucket styles computed from one input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StylePartition {
    pub fast_driver: Option<StyleInput>,
    pub general_driver: Option<StyleInput>,
    pub static_style: Option<StyleInput>,
}

impl StylePartition {
    pub fn get(&self, bucket: Bucket) -> Option<&StyleInput> {
        match bucket {
            Bucket::FastDriver => self.fast_driver.as_ref(),
            Bucket::GeneralDriver => self.general_driver.as_ref(),
            Bucket::Static => self.static_style.as_ref(),
        }
    }

    /// Keys of one bucket, in order. Empty for absent or sequence-shaped
    /// buckets (those only occur when the input had no properties).
    pub fn keys(&self, bucket: Bucket) -> Vec<&str> {
        self.get(bucket)
            .and_then(StyleInput::as_mapping)
            .map(|map| map.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// Split a style input into its fast-driver, general-driver and static parts.
pub fn partition(input: Option<&StyleInput>) -> StylePartition {
    let out = StylePartition {
        fast_driver: filter_bucket(input, Bucket::FastDriver),
        general_driver: filter_bucket(input, Bucket::GeneralDriver),
        static_style: filter_bucket(input, Bucket::Static),
    };
    if diagnostics_enabled("style") {
        tracing::info!(
            fast_keys = ?out.keys(Bucket::FastDriver),
            general_keys = ?out.keys(Bucket::GeneralDriver),
            static_keys = ?out.keys(Bucket::Static),
            "diagnostics: style partitioned"
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: serde_json::Value) -> StyleInput {
        StyleInput::from_value(value).unwrap().unwrap()
    }

    #[test]
    fn absent_input_stays_absent() {
        assert_eq!(filter_style(None, |_| true), None);
        assert_eq!(partition(None), StylePartition::default());
    }

    #[test]
    fn empty_input_is_returned_unchanged() {
        let empty = input(json!([{}, null]));
        let out = filter_style(Some(&empty), |_| true);
        assert_eq!(out, Some(empty));
    }

    #[test]
    fn sequences_of_only_numeric_keys_filter_to_an_empty_mapping() {
        let style = input(json!([{ "0": { "flex": 1 } }, null, [{ "1": "x" }]]));
        let out = filter_style(Some(&style), |_| true);
        assert_eq!(out, Some(StyleInput::Mapping(StyleMapping::new())));
        for bucket in Bucket::ALL {
            assert!(partition(Some(&style)).keys(bucket).is_empty());
            assert_eq!(
                partition(Some(&style)).get(bucket).map(StyleInput::to_value),
                Some(json!({}))
            );
        }
    }

    #[test]
    fn predicate_selects_keys_in_order() {
        let style = input(json!({ "a": 1, "b": 2, "c": 3 }));
        let out = filter_style(Some(&style), |key| key != "b").unwrap();
        assert_eq!(out.to_value(), json!({ "a": 1, "c": 3 }));
    }

    #[test]
    fn numeric_keys_are_filtered_even_from_single_mappings() {
        let style = input(json!({ "0": 1, "1": 2, "flex": 1 }));
        let out = filter_style(Some(&style), |_| true).unwrap();
        assert_eq!(out.to_value(), json!({ "flex": 1 }));
    }

    #[test]
    fn nested_values_are_classified_by_top_level_key_only() {
        let style = input(json!({
            "transform": [{ "translateX": 10 }, { "backgroundColor": "red" }],
            "shadowOffset": { "width": 1, "height": 2 },
        }));
        let parts = partition(Some(&style));
        assert_eq!(parts.keys(Bucket::FastDriver), ["transform"]);
        assert_eq!(parts.keys(Bucket::GeneralDriver), ["shadowOffset"]);
        assert!(parts.keys(Bucket::Static).is_empty());
        let fast = parts.fast_driver.unwrap().to_value();
        assert_eq!(
            fast["transform"],
            json!([{ "translateX": 10 }, { "backgroundColor": "red" }])
        );
    }

    #[test]
    fn partition_is_deterministic() {
        let style = input(json!([
            { "color": "red", "flex": 1, "borderWidth": 2 },
            { "padding": 4, "opacity": 0.5, "zIndex": 3, "customKey": true },
        ]));
        let first = partition(Some(&style));
        let second = partition(Some(&style));
        for bucket in Bucket::ALL {
            let a = serde_json::to_string(&first.get(bucket)).unwrap();
            let b = serde_json::to_string(&second.get(bucket)).unwrap();
            assert_eq!(a, b);
        }
        assert_eq!(first.keys(Bucket::FastDriver), ["flex", "opacity", "zIndex"]);
        assert_eq!(first.keys(Bucket::GeneralDriver), ["borderWidth", "customKey"]);
        assert_eq!(first.keys(Bucket::Static), ["color", "padding", "customKey"]);
    }
}
