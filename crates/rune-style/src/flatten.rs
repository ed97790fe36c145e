use std::borrow::Cow;

use crate::types::{StyleInput, StyleMapping};

/// Merge a style input into one mapping.
///
/// Absent input stays absent and a single mapping is returned as-is.
/// Sequences are merged in order, skipping gaps, with later values winning
/// per key. Numeric keys are dropped while merging a sequence since they only
/// appear when an array was read as an object.
pub fn flatten(input: Option<&StyleInput>) -> Option<Cow<'_, StyleMapping>> {
    match input? {
        StyleInput::Mapping(map) => Some(Cow::Borrowed(map)),
        StyleInput::Sequence(entries) => {
            let mut merged = StyleMapping::new();
            accumulate(entries, &mut merged);
            Some(Cow::Owned(merged))
        }
    }
}

fn accumulate(entries: &[Option<StyleInput>], merged: &mut StyleMapping) {
    for entry in entries.iter().flatten() {
        match entry {
            StyleInput::Mapping(map) => {
                for (key, value) in map {
                    if is_numeric_key(key) {
                        continue;
                    }
                    merged.insert(key.clone(), value.clone());
                }
            }
            StyleInput::Sequence(nested) => accumulate(nested, merged),
        }
    }
}

/// True for keys written as a plain decimal number (`"0"`, `"12"`, `"-1.5"`).
pub fn is_numeric_key(key: &str) -> bool {
    let digits = key.strip_prefix('-').unwrap_or(key);
    let mut seen_digit = false;
    let mut seen_dot = false;
    for ch in digits.chars() {
        match ch {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    seen_digit
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: serde_json::Value) -> StyleInput {
        StyleInput::from_value(value).unwrap().unwrap()
    }

    #[test]
    fn absent_passes_through() {
        assert!(flatten(None).is_none());
    }

    #[test]
    fn single_mapping_is_borrowed() {
        let style = input(json!({ "flex": 1, "0": "kept" }));
        let flat = flatten(Some(&style)).unwrap();
        assert!(matches!(flat, Cow::Borrowed(_)));
        assert_eq!(flat.get("0"), Some(&json!("kept")));
    }

    #[test]
    fn later_entries_win() {
        let style = input(json!([{ "color": "red" }, { "color": "blue" }]));
        let flat = flatten(Some(&style)).unwrap();
        assert_eq!(flat.get("color"), Some(&json!("blue")));
    }

    #[test]
    fn empty_and_falsy_entries_do_not_change_the_result() {
        let plain = input(json!([{ "color": "red", "flex": 1 }, { "color": "blue" }]));
        let gappy = input(json!([{ "color": "red", "flex": 1 }, {}, null, { "color": "blue" }]));
        assert_eq!(flatten(Some(&plain)), flatten(Some(&gappy)));
    }

    #[test]
    fn nested_sequences_flatten_in_order() {
        let style = input(json!([{ "opacity": 0.5 }, [{ "opacity": 0.7 }, [{ "width": 10 }]]]));
        let flat = flatten(Some(&style)).unwrap();
        assert_eq!(flat.get("opacity"), Some(&json!(0.7)));
        assert_eq!(flat.get("width"), Some(&json!(10)));
    }

    #[test]
    fn numeric_keys_are_dropped_from_sequences() {
        let style = input(json!([{ "0": { "flex": 1 }, "1": null, "margin": 4 }]));
        let flat = flatten(Some(&style)).unwrap();
        assert_eq!(flat.len(), 1);
        assert!(flat.contains_key("margin"));
    }

    #[test]
    fn insertion_order_is_preserved() {
        let style = input(json!([{ "b": 1, "a": 2 }, { "c": 3, "b": 4 }]));
        let flat = flatten(Some(&style)).unwrap();
        let keys: Vec<&str> = flat.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn numeric_key_detection() {
        for key in ["0", "17", "-3", "1.5", ".5"] {
            assert!(is_numeric_key(key), "{key} should be numeric");
        }
        for key in ["", "-", ".", "1e3", "width", "0x1", "1.2.3", "NaN"] {
            assert!(!is_numeric_key(key), "{key} should not be numeric");
        }
    }
}
