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

//! Defines the scene-graph node and its per-node component storage.

use std::any::Any;
use std::fmt;

use vesper_core::{ObjectMeta, Signal};

use crate::component::{Component, ComponentSlot};
use crate::transform::Transform;

/// The default tag every new game object carries.
pub const DEFAULT_TAG: &str = "Untagged";

/// A non-owning handle to a game object in a [`crate::SceneGraph`].
///
/// It combines an index with a generation count to solve the "ABA
/// problem". When a game object is destroyed its index can be recycled,
/// but the generation is incremented, so stale handles pointing at the
/// recycled index become invalid instead of silently aliasing the new
/// occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameObjectId {
    /// The index of the slot in the graph's arena.
    pub index: u32,
    /// A generation counter, incremented each time the index is recycled.
    pub generation: u32,
}

/// A node in the scene graph: identity, activity state, a transform, and
/// an insertion-ordered list of components.
///
/// Hierarchy links (parent, children, root) are not stored here — the
/// owning [`crate::SceneGraph`] arena is the single source of that truth.
/// Duplicate components of the same concrete type are permitted; the
/// component list preserves insertion order.
pub struct GameObject {
    id: GameObjectId,
    /// The object's identity (name and hide flags).
    pub meta: ObjectMeta,
    active: bool,
    layer: i32,
    tag: String,
    is_static: bool,
    persistent: bool,
    transform: Transform,
    components: Vec<ComponentSlot>,
    /// Fires with the new value when the local active flag changes.
    pub active_changed: Signal<bool>,
    /// Fires with the new value when the layer changes.
    pub layer_changed: Signal<i32>,
    /// Fires with the new value when the tag changes.
    pub tag_changed: Signal<String>,
    /// Fires with the new value when the static flag changes.
    pub static_changed: Signal<bool>,
}

impl GameObject {
    /// Creates an active, untagged node on layer 0.
    pub(crate) fn new(name: impl Into<String>, id: GameObjectId) -> Self {
        Self {
            id,
            meta: ObjectMeta::new(name),
            active: true,
            layer: 0,
            tag: DEFAULT_TAG.to_string(),
            is_static: false,
            persistent: false,
            transform: Transform::default(),
            components: Vec::new(),
            active_changed: Signal::new(),
            layer_changed: Signal::new(),
            tag_changed: Signal::new(),
            static_changed: Signal::new(),
        }
    }

    /// This node's handle in the owning graph.
    pub fn id(&self) -> GameObjectId {
        self.id
    }

    /// The object's display name.
    pub fn name(&self) -> &str {
        &self.meta.name
    }

    /// Renames the object.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.meta.name = name.into();
    }

    // --- Activity and Properties ---

    /// The local active flag.
    ///
    /// This is the node's own desired state; an object inside an inactive
    /// subtree still reports its local flag.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Sets the local active flag, firing `active_changed` on transition.
    pub fn set_active(&mut self, active: bool) {
        if self.active != active {
            self.active = active;
            self.active_changed.emit(&active);
        }
    }

    /// The object's layer.
    pub fn layer(&self) -> i32 {
        self.layer
    }

    /// Sets the layer, firing `layer_changed` on transition.
    pub fn set_layer(&mut self, layer: i32) {
        if self.layer != layer {
            self.layer = layer;
            self.layer_changed.emit(&layer);
        }
    }

    /// The object's tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Sets the tag, firing `tag_changed` on transition.
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if self.tag != tag {
            self.tag = tag.clone();
            self.tag_changed.emit(&tag);
        }
    }

    /// Whether the object is marked static for editor/renderer purposes.
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Sets the static flag, firing `static_changed` on transition.
    pub fn set_static(&mut self, is_static: bool) {
        if self.is_static != is_static {
            self.is_static = is_static;
            self.static_changed.emit(&is_static);
        }
    }

    /// Whether the object survives a scene unload.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    pub(crate) fn set_persistent(&mut self, persistent: bool) {
        self.persistent = persistent;
    }

    // --- Transform ---

    /// The object's transform. Every object has exactly one.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable access to the object's transform.
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    // --- Component Storage ---

    /// The attached component slots, in insertion order.
    pub fn components(&self) -> &[ComponentSlot] {
        &self.components
    }

    /// Mutable access to the attached component slots.
    pub fn components_mut(&mut self) -> &mut [ComponentSlot] {
        &mut self.components
    }

    /// Attaches a component, returning a reference to it.
    ///
    /// Duplicates of the same concrete type are allowed; the new slot is
    /// appended at the end of the list.
    pub fn add_component<T: Component>(&mut self, component: T) -> &mut T {
        let meta = ObjectMeta::new(short_type_name::<T>());
        self.components
            .push(ComponentSlot::new(meta, self.id, Box::new(component)));
        match self
            .components
            .last_mut()
            .and_then(|slot| slot.behavior_mut().as_any_mut().downcast_mut::<T>())
        {
            Some(component) => component,
            // The slot was pushed with exactly this type on this line.
            None => unreachable!("freshly attached component has type T"),
        }
    }

    /// Attaches an already-boxed component under the given display name.
    pub fn add_boxed_component(
        &mut self,
        name: impl Into<String>,
        component: Box<dyn Component>,
    ) -> &mut dyn Component {
        self.components
            .push(ComponentSlot::new(ObjectMeta::new(name), self.id, component));
        match self.components.last_mut() {
            Some(slot) => slot.behavior_mut(),
            None => unreachable!("component list cannot be empty after push"),
        }
    }

    /// Removes and returns the slot at `index`, or `None` out of range.
    pub fn remove_component_at(&mut self, index: usize) -> Option<ComponentSlot> {
        if index < self.components.len() {
            Some(self.components.remove(index))
        } else {
            None
        }
    }

    // --- Component Queries (this node only) ---

    /// Returns the first attached component of type `T`.
    ///
    /// First-match linear scan in insertion order; `None` when no match
    /// exists.
    pub fn get_component<T: Component>(&self) -> Option<&T> {
        self.components
            .iter()
            .find_map(|slot| slot.behavior().as_any().downcast_ref::<T>())
    }

    /// Mutable variant of [`GameObject::get_component`].
    pub fn get_component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .iter_mut()
            .find_map(|slot| slot.behavior_mut().as_any_mut().downcast_mut::<T>())
    }

    /// Returns the first attached component with the given runtime type id.
    ///
    /// Dynamic counterpart of [`GameObject::get_component`] for callers
    /// that resolve the type at runtime.
    pub fn get_component_dyn(&self, type_id: std::any::TypeId) -> Option<&dyn Component> {
        self.components
            .iter()
            .find(|slot| slot.behavior().as_any().type_id() == type_id)
            .map(|slot| slot.behavior())
    }

    /// Iterates over every attached component of type `T`, in insertion
    /// order.
    pub fn components_of_type<T: Component>(&self) -> impl Iterator<Item = &T> {
        self.components
            .iter()
            .filter_map(|slot| slot.behavior().as_any().downcast_ref::<T>())
    }

    /// Returns the index of the first slot whose component has the **same
    /// runtime type** as `component`.
    ///
    /// Note: when duplicates of the same type are attached, this is not
    /// necessarily the index of the given instance — matching is by type,
    /// not identity. This is a preserved engine contract; see the
    /// regression test pinning the observed behavior.
    pub fn get_component_index(&self, component: &dyn Component) -> Option<usize> {
        let target = component.as_any().type_id();
        self.components
            .iter()
            .position(|slot| slot.behavior().as_any().type_id() == target)
    }

    /// Returns the slot wrapping the first component of type `T`.
    pub fn slot_of<T: Component>(&self) -> Option<&ComponentSlot> {
        self.components
            .iter()
            .find(|slot| slot.behavior().as_any().is::<T>())
    }

    /// Mutable variant of [`GameObject::slot_of`].
    pub fn slot_of_mut<T: Component>(&mut self) -> Option<&mut ComponentSlot> {
        self.components
            .iter_mut()
            .find(|slot| slot.behavior().as_any().is::<T>())
    }

    /// Deep-copies the node's data for a clone with handle `id`.
    ///
    /// Components are cloned through their `clone_component` capability;
    /// signal subscribers are not copied.
    pub(crate) fn duplicate_as(&self, id: GameObjectId) -> Self {
        Self {
            id,
            meta: self.meta.clone(),
            active: self.active,
            layer: self.layer,
            tag: self.tag.clone(),
            is_static: self.is_static,
            persistent: self.persistent,
            transform: self.transform.clone(),
            components: self
                .components
                .iter()
                .map(|slot| slot.duplicate_for(id))
                .collect(),
            active_changed: Signal::new(),
            layer_changed: Signal::new(),
            tag_changed: Signal::new(),
            static_changed: Signal::new(),
        }
    }
}

impl fmt::Debug for GameObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameObject")
            .field("id", &self.id)
            .field("meta", &self.meta)
            .field("active", &self.active)
            .field("layer", &self.layer)
            .field("tag", &self.tag)
            .field("components", &self.components.len())
            .finish()
    }
}

/// The unqualified name of `T`, for auto-generated slot identities.
fn short_type_name<T: Any>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

// --- Tests ---
