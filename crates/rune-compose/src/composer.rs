use rune_style::{Bucket, StyleInput, StyleMapping, diagnostics_enabled, partition};
use serde_json::Value;

use crate::animatable::{AnimatableFactory, ContainerCache, HostAnimatableFactory};
use crate::descriptor::{ComponentDescriptor, ComponentType, Driver, Props};
use crate::error::{DescriptorError, Result};

/// Host primitive the animatable containers are built from.
pub const DEFAULT_BASE_CONTAINER: &str = "View";

/// Appended last to the general-driver container's style. It overrides any
/// caller `overflow` so that transforms and opacity on the outer container
/// never reveal unclipped content.
pub const GENERAL_LAYER_CLIP: (&str, &str) = ("overflow", "hidden");

pub fn general_layer_clip() -> StyleInput {
    let mut map = StyleMapping::new();
    map.insert(
        GENERAL_LAYER_CLIP.0.to_string(),
        Value::String(GENERAL_LAYER_CLIP.1.to_string()),
    );
    StyleInput::Mapping(map)
}

/// Extra styles layered on top of the component's own buckets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerStyles {
    /// Applied after the fast-driver bucket, typically live transform/opacity.
    pub fast: Option<StyleInput>,
    /// Applied after the general-driver bucket, before the clip.
    pub general: Option<StyleInput>,
}

impl LayerStyles {
    /// Read both extra styles from JSON. Falsy values mean no extra style.
    pub fn from_values(fast: Value, general: Value) -> Result<Self> {
        let read = |path: &str, value: Value| {
            StyleInput::from_value(value).map_err(|source| DescriptorError::InvalidStyle {
                path: path.to_string(),
                source,
            })
        };
        Ok(Self {
            fast: read("fast", fast)?,
            general: read("general", general)?,
        })
    }
}

/// Wraps components in a fast-driver and a general-driver container.
pub struct LayerComposer<'a> {
    factory: &'a dyn AnimatableFactory,
    base: ComponentType,
}

impl<'a> LayerComposer<'a> {
    pub fn new(factory: &'a dyn AnimatableFactory) -> Self {
        Self {
            factory,
            base: ComponentType::primitive(DEFAULT_BASE_CONTAINER),
        }
    }

    /// Build containers from another host primitive.
    pub fn with_base_container(mut self, name: impl Into<String>) -> Self {
        self.base = ComponentType::primitive(name);
        self
    }

    pub fn base_container(&self) -> &ComponentType {
        &self.base
    }

    fn container_type(&self, cache: Option<&ContainerCache>, driver: Driver) -> ComponentType {
        match cache.and_then(|cache| cache.get(driver)) {
            Some(cached) => cached.clone(),
            None => self.factory.make_animatable(&self.base, driver),
        }
    }

    /// Produce `fast container > general container > component`.
    ///
    /// The component keeps its props and children with `style` replaced by
    /// its static bucket. Its key and identity reference move to the outer
    /// container, which also receives the layout callback when one is set.
    pub fn compose(
        &self,
        component: &ComponentDescriptor,
        extra: &LayerStyles,
        cache: Option<&ContainerCache>,
    ) -> ComponentDescriptor {
        let fast_type = self.container_type(cache, Driver::Fast);
        let general_type = self.container_type(cache, Driver::General);
        let parts = partition(component.props.style.as_ref());

        if diagnostics_enabled("compose") {
            tracing::info!(
                component = component.component_type.name(),
                cached = cache.is_some_and(ContainerCache::is_primed),
                fast_keys = ?parts.keys(Bucket::FastDriver),
                general_keys = ?parts.keys(Bucket::GeneralDriver),
                static_keys = ?parts.keys(Bucket::Static),
                "diagnostics: composing animated layers"
            );
        }

        let leaf = ComponentDescriptor {
            component_type: component.component_type.clone(),
            key: None,
            identity_ref: None,
            props: Props {
                style: parts.static_style,
                ..component.props.clone()
            },
            children: component.children.clone(),
        };

        let mut general = ComponentDescriptor::new(general_type);
        general.props.style = Some(StyleInput::sequence([
            parts.general_driver,
            extra.general.clone(),
            Some(general_layer_clip()),
        ]));
        general.children.push(leaf);

        let mut fast = ComponentDescriptor::new(fast_type);
        fast.props.style = Some(StyleInput::sequence([
            parts.fast_driver,
            extra.fast.clone(),
        ]));
        fast.props.collapsable = Some(false);
        if let Some(key) = &component.key {
            fast.key = Some(key.clone());
        }
        if let Some(handle) = &component.identity_ref {
            fast.identity_ref = Some(handle.clone());
        }
        if let Some(handle) = &component.props.on_layout {
            fast.props.on_layout = Some(handle.clone());
        }
        fast.children.push(general);
        fast
    }
}

/// [`LayerComposer::compose`] with the default factory and base container.
pub fn compose(
    component: &ComponentDescriptor,
    extra: &LayerStyles,
    cache: Option<&ContainerCache>,
) -> ComponentDescriptor {
    LayerComposer::new(&HostAnimatableFactory).compose(component, extra, cache)
}
