use rune_style::{StyleInput, deserialize_optional_style};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Which animation context drives a container's style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Driver {
    /// Runs without per-frame coordination with application logic.
    Fast,
    /// Coordinates with application logic every frame.
    General,
}

/// A container type that accepts live (driven) style values.
///
/// Two containers built from the same base are distinct unless they share
/// an `instance` id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimatableContainer {
    pub instance: u64,
    pub base: String,
    pub driver: Driver,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentType {
    /// A host primitive such as `View` or `Text`.
    Primitive { name: String },
    /// An application-defined component.
    Composite { name: String },
    Animatable(AnimatableContainer),
}

impl ComponentType {
    pub fn primitive(name: impl Into<String>) -> Self {
        Self::Primitive { name: name.into() }
    }

    pub fn composite(name: impl Into<String>) -> Self {
        Self::Composite { name: name.into() }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Primitive { name } | Self::Composite { name } => name,
            Self::Animatable(container) => &container.base,
        }
    }

    pub fn as_animatable(&self) -> Option<&AnimatableContainer> {
        match self {
            Self::Animatable(container) => Some(container),
            _ => None,
        }
    }
}

/// Opaque handle owned by the host (identity references, layout callbacks).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandleId(pub String);

impl From<&str> for HandleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Component props. Only the fields the composer touches are typed; every
/// other prop is kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Props {
    #[serde(default, deserialize_with = "deserialize_optional_style")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleInput>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_layout: Option<HandleId>,
    /// `false` stops the host from caching layout measurement for the view.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsable: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A component element: its type, identity and props.
///
/// `key` and `identity_ref` describe the element rather than its props and
/// are not passed down when the element is re-created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, rename = "ref")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_ref: Option<HandleId>,
    #[serde(default)]
    pub props: Props,
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ComponentDescriptor>,
}

impl ComponentDescriptor {
    pub fn new(component_type: ComponentType) -> Self {
        Self {
            component_type,
            key: None,
            identity_ref: None,
            props: Props::default(),
            children: Vec::new(),
        }
    }

    pub fn primitive(name: impl Into<String>) -> Self {
        Self::new(ComponentType::primitive(name))
    }

    pub fn with_style(mut self, style: impl Into<Option<StyleInput>>) -> Self {
        self.props.style = style.into();
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_ref(mut self, handle: impl Into<HandleId>) -> Self {
        self.identity_ref = Some(handle.into());
        self
    }

    pub fn with_on_layout(mut self, handle: impl Into<HandleId>) -> Self {
        self.props.on_layout = Some(handle.into());
        self
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: Value) -> Self {
        self.props.extra.insert(name.into(), value);
        self
    }

    pub fn with_child(mut self, child: ComponentDescriptor) -> Self {
        self.children.push(child);
        self
    }

    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Depth of the single-child chain starting at this element.
    pub fn depth(&self) -> usize {
        1 + self.children.first().map_or(0, ComponentDescriptor::depth)
    }
}
