use std::sync::atomic::{AtomicU64, Ordering};

use crate::descriptor::{AnimatableContainer, ComponentType, Driver};

/// Host capability that turns a container type into one whose style can be
/// driven by live animation values.
///
/// Each call yields a new, independent type. Callers that need the same type
/// across compositions keep it in a [`ContainerCache`].
pub trait AnimatableFactory {
    fn make_animatable(&self, base: &ComponentType, driver: Driver) -> ComponentType;
}

/// Default factory: stamps every container with a process-unique instance id.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostAnimatableFactory;

impl HostAnimatableFactory {
    fn next_instance() -> u64 {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        COUNTER.fetch_add(1, Ordering::Relaxed)
    }
}

impl AnimatableFactory for HostAnimatableFactory {
    fn make_animatable(&self, base: &ComponentType, driver: Driver) -> ComponentType {
        ComponentType::Animatable(AnimatableContainer {
            instance: Self::next_instance(),
            base: base.name().to_string(),
            driver,
        })
    }
}

/// Caller-owned container types reused across compositions.
///
/// The composer only reads from the cache; filling it is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerCache {
    pub fast: Option<ComponentType>,
    pub general: Option<ComponentType>,
}

impl ContainerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build both container types once through `factory`.
    pub fn prime(factory: &dyn AnimatableFactory, base: &ComponentType) -> Self {
        Self {
            fast: Some(factory.make_animatable(base, Driver::Fast)),
            general: Some(factory.make_animatable(base, Driver::General)),
        }
    }

    pub fn get(&self, driver: Driver) -> Option<&ComponentType> {
        match driver {
            Driver::Fast => self.fast.as_ref(),
            Driver::General => self.general.as_ref(),
        }
    }

    pub fn is_primed(&self) -> bool {
        self.fast.is_some() && self.general.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_call_mints_a_new_instance() {
        let base = ComponentType::primitive("View");
        let a = HostAnimatableFactory.make_animatable(&base, Driver::Fast);
        let b = HostAnimatableFactory.make_animatable(&base, Driver::Fast);
        assert_ne!(a, b);
        assert_eq!(a.name(), "View");
        assert_eq!(a.as_animatable().map(|c| c.driver), Some(Driver::Fast));
    }

    #[test]
    fn primed_cache_holds_one_type_per_driver() {
        let cache =
            ContainerCache::prime(&HostAnimatableFactory, &ComponentType::primitive("View"));
        assert!(cache.is_primed());
        let fast = cache.get(Driver::Fast).and_then(ComponentType::as_animatable);
        let general = cache.get(Driver::General).and_then(ComponentType::as_animatable);
        assert_eq!(fast.map(|c| c.driver), Some(Driver::Fast));
        assert_eq!(general.map(|c| c.driver), Some(Driver::General));
        assert!(!ContainerCache::new().is_primed());
    }
}
