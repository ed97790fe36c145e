use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// A single style value. Transform lists and nested objects are opaque.
pub type StyleValue = Value;

/// Ordered style properties. Iteration follows insertion order.
pub type StyleMapping = Map<String, StyleValue>;

/// Style as supplied by a component: one mapping or an ordered list of
/// mappings with gaps.
///
/// A missing style is `Option::None`. Sequence entries may themselves be
/// absent or nested sequences; both are resolved by [`crate::flatten`].
#[derive(Debug, Clone, PartialEq)]
pub enum StyleInput {
    Mapping(StyleMapping),
    Sequence(Vec<Option<StyleInput>>),
}

/// A JSON value that cannot stand in style position.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("expected a style object, array or falsy value, found {found}")]
pub struct InvalidStyleInput {
    pub found: String,
}

impl StyleInput {
    /// Build a sequence from optional entries.
    pub fn sequence<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = Option<StyleInput>>,
    {
        Self::Sequence(entries.into_iter().collect())
    }

    /// Interpret a JSON value as a style input.
    ///
    /// Objects are mappings, arrays are sequences, and falsy values
    /// (`null`, `false`, `0`, `""`) are absent.
    pub fn from_value(value: Value) -> Result<Option<Self>, InvalidStyleInput> {
        match value {
            Value::Object(map) => Ok(Some(Self::Mapping(map))),
            Value::Array(items) => {
                let entries = items
                    .into_iter()
                    .map(Self::from_value)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Some(Self::Sequence(entries)))
            }
            other if is_falsy(&other) => Ok(None),
            other => Err(InvalidStyleInput {
                found: other.to_string(),
            }),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Mapping(map) => Value::Object(map.clone()),
            Self::Sequence(entries) => Value::Array(
                entries
                    .iter()
                    .map(|entry| entry.as_ref().map_or(Value::Null, Self::to_value))
                    .collect(),
            ),
        }
    }

    /// The mapping, when this input is a single mapping.
    pub fn as_mapping(&self) -> Option<&StyleMapping> {
        match self {
            Self::Mapping(map) => Some(map),
            Self::Sequence(_) => None,
        }
    }
}

impl From<StyleMapping> for StyleInput {
    fn from(map: StyleMapping) -> Self {
        Self::Mapping(map)
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

impl Serialize for StyleInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Mapping(map) => map.serialize(serializer),
            Self::Sequence(entries) => serializer.collect_seq(entries),
        }
    }
}

impl<'de> Deserialize<'de> for StyleInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match StyleInput::from_value(value).map_err(de::Error::custom)? {
            Some(input) => Ok(input),
            None => Err(de::Error::custom(
                "falsy style value where a style was required",
            )),
        }
    }
}

/// `deserialize_with` helper for `Option<StyleInput>` fields so that every
/// falsy JSON value (not only `null`) reads as an absent style.
pub fn deserialize_optional_style<'de, D>(deserializer: D) -> Result<Option<StyleInput>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    StyleInput::from_value(value).map_err(de::Error::custom)
}
