// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provides the closure factory for dynamically-named component creation.

use std::collections::HashMap;

use crate::component::Component;

type Factory = Box<dyn Fn() -> Box<dyn Component>>;

/// A factory registry mapping component names to constructor closures.
///
/// This replaces reflection-driven construction: every component variant
/// that can be created by name (editor "Add Component" menus, serialized
/// scene payloads) is registered once at startup, and creation resolves
/// through the stored closure. Unknown names are the recoverable
/// "not a component type" condition and yield `None`, never a panic.
#[derive(Default)]
pub struct ComponentRegistry {
    factories: HashMap<String, Factory>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` under `name`.
    ///
    /// Re-registering a name replaces the previous factory; the
    /// replacement is logged since it usually indicates two systems
    /// fighting over the same name.
    pub fn register<T: Component + Default>(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self
            .factories
            .insert(name.clone(), Box::new(|| Box::new(T::default())))
            .is_some()
        {
            log::warn!("component factory for `{name}` was replaced");
        } else {
            log::debug!("registered component factory `{name}`");
        }
    }

    /// Creates a component by registered name.
    ///
    /// Returns `None` for unknown names.
    pub fn create(&self, name: &str) -> Option<Box<dyn Component>> {
        self.factories.get(name).map(|factory| factory())
    }

    /// Returns `true` when a factory is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Returns the number of registered factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns `true` when no factories are registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Iterates over the registered names, for editor enumeration.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentError;
    use std::any::Any;

    #[derive(Debug, Clone, Default)]
    struct Spin {
        speed: f32,
    }

    impl Component for Spin {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
        fn clone_component(&self) -> Box<dyn Component> {
            Box::new(self.clone())
        }
        fn load_from_json(&mut self, _json: &str) -> Result<(), ComponentError> {
            Err(ComponentError::PayloadMismatch { expected: "Spin" })
        }
    }

    #[derive(Debug, Clone, Default)]
    struct Bob;

    impl Component for Bob {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
        fn clone_component(&self) -> Box<dyn Component> {
            Box::new(self.clone())
        }
        fn load_from_json(&mut self, _json: &str) -> Result<(), ComponentError> {
            Ok(())
        }
    }

    #[test]
    fn test_create_resolves_registered_factory() {
        let mut registry = ComponentRegistry::new();
        registry.register::<Spin>("Spin");

        let created = registry.create("Spin").expect("factory should exist");
        let spin = created
            .as_any()
            .downcast_ref::<Spin>()
            .expect("factory builds the registered type");
        assert_eq!(spin.speed, 0.0);
    }

    #[test]
    fn test_unknown_name_yields_none() {
        let registry = ComponentRegistry::new();
        assert!(registry.create("NoSuchComponent").is_none());
        assert!(!registry.contains("NoSuchComponent"));
    }

    #[test]
    fn test_reregistering_replaces_factory() {
        let mut registry = ComponentRegistry::new();
        registry.register::<Spin>("Widget");
        registry.register::<Bob>("Widget");
        assert_eq!(registry.len(), 1);

        let created = registry.create("Widget").expect("factory should exist");
        assert!(created.as_any().downcast_ref::<Bob>().is_some());
    }

    #[test]
    fn test_names_enumerates_registrations() {
        let mut registry = ComponentRegistry::new();
        registry.register::<Spin>("Spin");
        registry.register::<Bob>("Bob");
        let mut names: Vec<&str> = registry.names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["Bob", "Spin"]);
    }
}
