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

//! The generational arena owning every game object, with the hierarchy,
//! query, and lifecycle operations built on top of it.

use std::any::TypeId;

use vesper_core::math::Matrix4x4;

use crate::component::Component;
use crate::game_object::{GameObject, GameObjectId};
use crate::registry::ComponentRegistry;
use crate::transform::Transform;

/// One arena slot: the generation it is currently on, plus the node when
/// the slot is occupied.
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Per-node hierarchy record. Parent and child links live here — and only
/// here — so the arena is the single source of hierarchy truth.
struct Node {
    game_object: GameObject,
    parent: Option<GameObjectId>,
    children: Vec<GameObjectId>,
}

/// A destruction scheduled for a future [`SceneGraph::flush_destroyed`].
struct PendingDestroy {
    id: GameObjectId,
    remaining_seconds: f32,
}

/// The scene graph: a generational arena of [`GameObject`]s plus their
/// parent/child links and the pending-destruction queue.
///
/// All mutation happens through this type's methods on a single logical
/// main thread. Handles ([`GameObjectId`]) are non-owning; a destroyed
/// object invalidates every outstanding handle to it via its slot's
/// generation bump.
#[derive(Default)]
pub struct SceneGraph {
    slots: Vec<Slot>,
    free: Vec<u32>,
    pending: Vec<PendingDestroy>,
    live: usize,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            generation: 0,
            node: None,
        }
    }
}

impl SceneGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    fn node(&self, id: GameObjectId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: GameObjectId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    // --- Spawning ---

    /// Creates a new root game object and returns its handle.
    pub fn spawn(&mut self, name: impl Into<String>) -> GameObjectId {
        let name = name.into();
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };
        let generation = self.slots[index as usize].generation;
        let id = GameObjectId { index, generation };
        log::debug!("spawning game object `{name}` at {index}v{generation}");
        self.slots[index as usize].node = Some(Node {
            game_object: GameObject::new(name, id),
            parent: None,
            children: Vec::new(),
        });
        self.live += 1;
        id
    }

    /// Creates a new game object parented under `parent`.
    ///
    /// Returns `None` when `parent` is not a live handle.
    pub fn spawn_child(
        &mut self,
        name: impl Into<String>,
        parent: GameObjectId,
    ) -> Option<GameObjectId> {
        if !self.contains(parent) {
            return None;
        }
        let id = self.spawn(name);
        self.node_mut(id)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(id);
        Some(id)
    }

    // --- Access ---

    /// Returns the game object behind a live handle.
    pub fn get(&self, id: GameObjectId) -> Option<&GameObject> {
        self.node(id).map(|node| &node.game_object)
    }

    /// Mutable variant of [`SceneGraph::get`].
    pub fn get_mut(&mut self, id: GameObjectId) -> Option<&mut GameObject> {
        self.node_mut(id).map(|node| &mut node.game_object)
    }

    /// Returns `true` when the handle refers to a live game object.
    pub fn contains(&self, id: GameObjectId) -> bool {
        self.node(id).is_some()
    }

    /// Returns the number of live game objects.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` when the graph holds no live game objects.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Iterates over every live game object in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (GameObjectId, &GameObject)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.node.as_ref().map(|node| {
                (
                    GameObjectId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    &node.game_object,
                )
            })
        })
    }

    // --- Hierarchy ---

    /// The parent of `id`, or `None` for roots and dead handles.
    pub fn parent(&self, id: GameObjectId) -> Option<GameObjectId> {
        self.node(id).and_then(|node| node.parent)
    }

    /// The children of `id`, in attach order. Empty for dead handles.
    pub fn children(&self, id: GameObjectId) -> &[GameObjectId] {
        self.node(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// The topmost ancestor of `id` (itself, for roots).
    pub fn root(&self, id: GameObjectId) -> Option<GameObjectId> {
        if !self.contains(id) {
            return None;
        }
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        Some(current)
    }

    /// Returns `true` when `descendant` is in the subtree of `ancestor`
    /// (the object itself does not count as its own descendant).
    fn is_descendant_of(&self, descendant: GameObjectId, ancestor: GameObjectId) -> bool {
        let mut current = self.parent(descendant);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Reparents `id` under `new_parent` (or detaches it to a root for
    /// `None`).
    ///
    /// Returns `false` without mutating when the move is invalid: a dead
    /// handle on either side, parenting an object to itself, or a cycle
    /// (the new parent lies inside the object's own subtree).
    pub fn set_parent(&mut self, id: GameObjectId, new_parent: Option<GameObjectId>) -> bool {
        if !self.contains(id) {
            return false;
        }
        if let Some(parent) = new_parent {
            if parent == id || !self.contains(parent) || self.is_descendant_of(parent, id) {
                return false;
            }
        }

        let old_parent = self.parent(id);
        if let Some(old) = old_parent {
            if let Some(node) = self.node_mut(old) {
                node.children.retain(|child| *child != id);
            }
        }
        if let Some(parent) = new_parent {
            if let Some(node) = self.node_mut(parent) {
                node.children.push(id);
            }
        }
        if let Some(node) = self.node_mut(id) {
            node.parent = new_parent;
        }
        true
    }

    /// Returns every live parentless game object, in slot order.
    pub fn roots(&self) -> Vec<GameObjectId> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                slot.node.as_ref().and_then(|node| {
                    node.parent.is_none().then_some(GameObjectId {
                        index: index as u32,
                        generation: slot.generation,
                    })
                })
            })
            .collect()
    }

    // --- Activity and Properties ---

    /// Sets the local active flag of `id`, firing its signal on
    /// transition only.
    pub fn set_active(&mut self, id: GameObjectId, active: bool) {
        if let Some(game_object) = self.get_mut(id) {
            game_object.set_active(active);
        }
    }

    /// Sets the active flag of `id` **and every descendant**,
    /// unconditionally.
    ///
    /// This does not consult each child's own desired state: previously
    /// mixed active flags across the subtree are collapsed to `active`.
    /// Documented engine quirk, preserved on purpose.
    pub fn set_active_recursively(&mut self, id: GameObjectId, active: bool) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            stack.extend_from_slice(self.children(current));
            self.set_active(current, active);
        }
    }

    /// Sets the layer of `id`, firing its signal on transition only.
    pub fn set_layer(&mut self, id: GameObjectId, layer: i32) {
        if let Some(game_object) = self.get_mut(id) {
            game_object.set_layer(layer);
        }
    }

    /// Sets the tag of `id`, firing its signal on transition only.
    pub fn set_tag(&mut self, id: GameObjectId, tag: impl Into<String>) {
        if let Some(game_object) = self.get_mut(id) {
            game_object.set_tag(tag);
        }
    }

    /// Sets the static flag of `id`, firing its signal on transition only.
    pub fn set_static(&mut self, id: GameObjectId, is_static: bool) {
        if let Some(game_object) = self.get_mut(id) {
            game_object.set_static(is_static);
        }
    }

    // --- Components ---

    /// Attaches a component to `id`, returning a reference to it.
    ///
    /// The typed path has no failure mode beyond a dead handle; the type
    /// system already guarantees `T` is a component.
    pub fn add_component<T: Component>(&mut self, id: GameObjectId, component: T) -> Option<&mut T> {
        self.get_mut(id)
            .map(|game_object| game_object.add_component(component))
    }

    /// Attaches a component created by name through the registry.
    ///
    /// Returns `None` when the handle is dead or the name is not a
    /// registered component type — the recoverable "type mismatch"
    /// condition, never a panic.
    pub fn add_component_with(
        &mut self,
        id: GameObjectId,
        registry: &ComponentRegistry,
        name: &str,
    ) -> Option<&mut dyn Component> {
        let component = registry.create(name)?;
        self.get_mut(id)
            .map(|game_object| game_object.add_boxed_component(name, component))
    }

    /// Removes the component slot at `index` on `id`.
    pub fn remove_component_at(&mut self, id: GameObjectId, index: usize) -> bool {
        self.get_mut(id)
            .and_then(|game_object| game_object.remove_component_at(index))
            .is_some()
    }

    // --- Component Queries ---

    /// Returns the first component of type `T` on `id` itself.
    pub fn get_component<T: Component>(&self, id: GameObjectId) -> Option<&T> {
        self.get(id)?.get_component::<T>()
    }

    /// Mutable variant of [`SceneGraph::get_component`].
    pub fn get_component_mut<T: Component>(&mut self, id: GameObjectId) -> Option<&mut T> {
        self.get_mut(id)?.get_component_mut::<T>()
    }

    /// Returns the first component on `id` with the given runtime type id.
    pub fn get_component_dyn(&self, id: GameObjectId, type_id: TypeId) -> Option<&dyn Component> {
        self.get(id)?.get_component_dyn(type_id)
    }

    /// Searches `id` and its subtree for the first component of type `T`,
    /// depth-first pre-order.
    ///
    /// The object itself is checked first, then each child subtree in
    /// attach order. A child whose local active flag is `false` is skipped
    /// (its whole subtree with it) unless `include_inactive` is set; the
    /// starting object is never gated.
    pub fn get_component_in_children<T: Component>(
        &self,
        id: GameObjectId,
        include_inactive: bool,
    ) -> Option<&T> {
        let game_object = self.get(id)?;
        if let Some(component) = game_object.get_component::<T>() {
            return Some(component);
        }
        for &child in self.children(id) {
            let child_object = self.get(child)?;
            if !child_object.is_active() && !include_inactive {
                continue;
            }
            if let Some(component) = self.get_component_in_children::<T>(child, include_inactive) {
                return Some(component);
            }
        }
        None
    }

    /// Collects components of type `T` from the **immediate children** of
    /// `id` only.
    ///
    /// Unlike [`SceneGraph::get_component_in_children`], this does not
    /// look at the object itself and does not descend into grandchildren:
    /// it scans one level down, collecting every `T` on each (active,
    /// unless `include_inactive`) child. The asymmetry with the singular
    /// form is a preserved engine contract, pinned by a regression test.
    pub fn get_components_in_children<T: Component>(
        &self,
        id: GameObjectId,
        include_inactive: bool,
    ) -> Vec<&T> {
        let mut results = Vec::new();
        for &child in self.children(id) {
            if let Some(child_object) = self.get(child) {
                if child_object.is_active() || include_inactive {
                    results.extend(child_object.components_of_type::<T>());
                }
            }
        }
        results
    }

    /// Searches `id` and then its ancestor chain for the first component
    /// of type `T`.
    ///
    /// No active-state gate is applied on this singular form — inactive
    /// ancestors are searched too. (The plural form offers the gate; the
    /// asymmetry is a preserved engine contract.)
    pub fn get_component_in_parent<T: Component>(&self, id: GameObjectId) -> Option<&T> {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if let Some(component) = self.get(current_id)?.get_component::<T>() {
                return Some(component);
            }
            current = self.parent(current_id);
        }
        None
    }

    /// Collects every component of type `T` on `id` and its ancestor
    /// chain, in walk order (self first, then parent, then grandparent…).
    ///
    /// The starting object always contributes; an **ancestor** whose local
    /// active flag is `false` is skipped unless `include_inactive` is set.
    pub fn get_components_in_parent<T: Component>(
        &self,
        id: GameObjectId,
        include_inactive: bool,
    ) -> Vec<&T> {
        let mut results = Vec::new();
        if let Some(game_object) = self.get(id) {
            results.extend(game_object.components_of_type::<T>());
        }
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            if let Some(game_object) = self.get(ancestor) {
                if game_object.is_active() || include_inactive {
                    results.extend(game_object.components_of_type::<T>());
                }
            }
            current = self.parent(ancestor);
        }
        results
    }

    /// Returns the index of the first component slot on `id` with the same
    /// runtime type as `component`. See
    /// [`GameObject::get_component_index`] for the by-type matching
    /// contract.
    pub fn get_component_index(
        &self,
        id: GameObjectId,
        component: &dyn Component,
    ) -> Option<usize> {
        self.get(id)?.get_component_index(component)
    }

    // --- Lifecycle ---

    /// Collects `id` and its whole subtree in depth-first pre-order.
    fn collect_subtree(&self, id: GameObjectId) -> Vec<GameObjectId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            // Reverse so the first child is processed first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    fn clone_subtree(
        &mut self,
        source: GameObjectId,
        parent: Option<GameObjectId>,
        is_clone_root: bool,
    ) -> Option<GameObjectId> {
        let source_children: Vec<GameObjectId> = self.children(source).to_vec();

        // Allocate the clone's slot, then move the duplicated node data in.
        let placeholder = self.spawn(String::new());
        let duplicated = {
            let original = self.get(source)?;
            let mut copy = original.duplicate_as(placeholder);
            if is_clone_root {
                let name = format!("{} (Clone)", copy.meta.name);
                copy.set_name(name);
            }
            copy
        };
        self.node_mut(placeholder)?.game_object = duplicated;
        if parent.is_some() {
            self.node_mut(placeholder)?.parent = parent;
            if let Some(parent_node) = parent.and_then(|p| self.node_mut(p)) {
                parent_node.children.push(placeholder);
            }
        }

        for child in source_children {
            self.clone_subtree(child, Some(placeholder), false)?;
        }
        Some(placeholder)
    }

    /// Deep-copies the subtree rooted at `id`.
    ///
    /// The clone carries copies of every transform, flag, tag, layer, and
    /// component (via `clone_component`); signal subscribers are not
    /// copied. The clone's root name gains a `" (Clone)"` suffix and the
    /// clone lands at the graph root. Returns `None` for a dead handle.
    pub fn instantiate(&mut self, id: GameObjectId) -> Option<GameObjectId> {
        if !self.contains(id) {
            return None;
        }
        log::debug!("instantiating subtree of {}v{}", id.index, id.generation);
        self.clone_subtree(id, None, true)
    }

    /// Like [`SceneGraph::instantiate`], but parents the clone under
    /// `parent`.
    pub fn instantiate_child_of(
        &mut self,
        id: GameObjectId,
        parent: GameObjectId,
    ) -> Option<GameObjectId> {
        if !self.contains(id) || !self.contains(parent) {
            return None;
        }
        self.clone_subtree(id, Some(parent), true)
    }

    /// Schedules `id` for removal at the next
    /// [`SceneGraph::flush_destroyed`].
    pub fn destroy(&mut self, id: GameObjectId) {
        self.destroy_delayed(id, 0.0);
    }

    /// Schedules `id` for removal once `seconds` of flushed frame time
    /// have elapsed.
    pub fn destroy_delayed(&mut self, id: GameObjectId, seconds: f32) {
        if self.contains(id) {
            self.pending.push(PendingDestroy {
                id,
                remaining_seconds: seconds,
            });
        }
    }

    /// Synchronously removes `id` and its whole subtree.
    ///
    /// Children cascade; every removed slot's generation is bumped so
    /// outstanding handles die. Returns `false` for an already-dead
    /// handle.
    pub fn destroy_immediate(&mut self, id: GameObjectId) -> bool {
        if !self.contains(id) {
            return false;
        }
        // Detach from the parent before the subtree goes away.
        if let Some(parent) = self.parent(id) {
            if let Some(parent_node) = self.node_mut(parent) {
                parent_node.children.retain(|child| *child != id);
            }
        }
        let subtree = self.collect_subtree(id);
        log::debug!(
            "destroying {}v{} ({} object(s))",
            id.index,
            id.generation,
            subtree.len()
        );
        for dead in subtree {
            let slot = &mut self.slots[dead.index as usize];
            slot.node = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(dead.index);
            self.live -= 1;
        }
        true
    }

    /// Advances scheduled destructions by `dt_seconds` and removes every
    /// entry that has come due.
    ///
    /// Called once per frame by the main loop. Entries whose target died
    /// in the meantime are silently dropped.
    pub fn flush_destroyed(&mut self, dt_seconds: f32) {
        for entry in self.pending.iter_mut() {
            entry.remaining_seconds -= dt_seconds;
        }
        let due: Vec<GameObjectId> = self
            .pending
            .iter()
            .filter(|entry| entry.remaining_seconds <= 0.0)
            .map(|entry| entry.id)
            .collect();
        self.pending.retain(|entry| entry.remaining_seconds > 0.0);
        for id in due {
            self.destroy_immediate(id);
        }
    }

    /// Marks `id` as persistent: it survives scene unloads.
    pub fn dont_destroy_on_load(&mut self, id: GameObjectId) {
        if let Some(game_object) = self.get_mut(id) {
            game_object.set_persistent(true);
        }
    }

    // --- World Placement ---

    /// The transform of `id`.
    pub fn transform(&self, id: GameObjectId) -> Option<&Transform> {
        self.get(id).map(|game_object| game_object.transform())
    }

    /// Mutable variant of [`SceneGraph::transform`].
    pub fn transform_mut(&mut self, id: GameObjectId) -> Option<&mut Transform> {
        self.get_mut(id).map(|game_object| game_object.transform_mut())
    }

    /// The world matrix of `id`: its local matrix composed with every
    /// ancestor's, local first (row-vector order).
    pub fn world_matrix(&self, id: GameObjectId) -> Option<Matrix4x4> {
        let local = self.get(id)?.transform().local_matrix();
        match self.parent(id) {
            Some(parent) => Some(local * self.world_matrix(parent)?),
            None => Some(local),
        }
    }
}
