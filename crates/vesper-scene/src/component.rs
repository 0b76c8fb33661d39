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

//! Defines the component behavior contract and the attached-component slot.

use std::any::Any;
use std::fmt;

use thiserror::Error;
use vesper_core::{ObjectMeta, Signal};

use crate::game_object::GameObjectId;

/// Errors produced while rehydrating a component from a serialized payload.
#[derive(Debug, Error)]
pub enum ComponentError {
    /// The payload is not valid JSON for the component's state shape.
    #[error("malformed component payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
    /// The payload belongs to a different component variant.
    #[error("payload does not match component type `{expected}`")]
    PayloadMismatch {
        /// The component type that attempted the load.
        expected: &'static str,
    },
}

/// A behavior/data unit attachable to exactly one game object.
///
/// Each concrete component declares three capabilities the engine needs:
/// type-pattern matching for the typed query family (`as_any`), deep
/// copying for [`crate::SceneGraph::instantiate`] (`clone_component`), and
/// a typed rehydration contract for the external serialization layer
/// (`load_from_json`). There is no reflection: every variant implements
/// its own deserialize path.
pub trait Component: Any {
    /// Upcasts to `Any` for downcast-based type matching.
    fn as_any(&self) -> &dyn Any;

    /// Mutable variant of [`Component::as_any`].
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Deep-copies the component for object-graph cloning.
    fn clone_component(&self) -> Box<dyn Component>;

    /// Replaces the component's state from a serialized JSON payload.
    fn load_from_json(&mut self, json: &str) -> Result<(), ComponentError>;
}

/// The attach-once record a game object keeps per component.
///
/// The owner id is set when the owning game object creates the slot and is
/// never reassigned. The `enabled` flag carries a change signal that fires
/// only on an actual transition.
pub struct ComponentSlot {
    meta: ObjectMeta,
    owner: GameObjectId,
    enabled: bool,
    /// Fires with the new value whenever `enabled` actually changes.
    pub enabled_changed: Signal<bool>,
    behavior: Box<dyn Component>,
}

impl ComponentSlot {
    /// Creates an enabled slot bound to `owner`.
    pub(crate) fn new(meta: ObjectMeta, owner: GameObjectId, behavior: Box<dyn Component>) -> Self {
        Self {
            meta,
            owner,
            enabled: true,
            enabled_changed: Signal::new(),
            behavior,
        }
    }

    /// The slot's identity (name and hide flags).
    pub fn meta(&self) -> &ObjectMeta {
        &self.meta
    }

    /// Mutable access to the slot's identity.
    pub fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.meta
    }

    /// The game object this component is attached to. Never changes.
    pub fn owner(&self) -> GameObjectId {
        self.owner
    }

    /// Whether the component is currently enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Sets the enabled flag.
    ///
    /// Idempotent: setting the current value again is a no-op and fires no
    /// event. The `enabled_changed` signal fires only on a real transition.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.enabled_changed.emit(&enabled);
        }
    }

    /// The attached behavior.
    pub fn behavior(&self) -> &dyn Component {
        self.behavior.as_ref()
    }

    /// Mutable access to the attached behavior.
    pub fn behavior_mut(&mut self) -> &mut dyn Component {
        self.behavior.as_mut()
    }

    /// Deep-copies the slot for a new owner.
    ///
    /// The behavior is cloned through [`Component::clone_component`];
    /// signal subscribers are deliberately not copied.
    pub(crate) fn duplicate_for(&self, owner: GameObjectId) -> Self {
        Self {
            meta: self.meta.clone(),
            owner,
            enabled: self.enabled,
            enabled_changed: Signal::new(),
            behavior: self.behavior.clone_component(),
        }
    }
}

impl fmt::Debug for ComponentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentSlot")
            .field("meta", &self.meta)
            .field("owner", &self.owner)
            .field("enabled", &self.enabled)
            .finish()
    }
}

// --- Tests ---
