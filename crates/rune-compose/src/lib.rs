//! Three-layer composition of animated components.
//!
//! ```text
//! fast-driver container   (geometry, transform, opacity; collapsable: false)
//!   └── general-driver container   (colors, borders, shadows; overflow clipped)
//!         └── original component   (everything else, static)
//! ```

mod animatable;
mod composer;
mod descriptor;
mod error;

pub use animatable::{AnimatableFactory, ContainerCache, HostAnimatableFactory};
pub use composer::{
    DEFAULT_BASE_CONTAINER, GENERAL_LAYER_CLIP, LayerComposer, LayerStyles, compose,
    general_layer_clip,
};
pub use descriptor::{
    AnimatableContainer, ComponentDescriptor, ComponentType, Driver, HandleId, Props,
};
pub use error::{DescriptorError, Result};
