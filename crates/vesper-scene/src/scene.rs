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

//! Defines the handle-identified root-object container layered over the
//! scene graph.

use std::fmt;

use crate::game_object::GameObjectId;
use crate::graph::SceneGraph;

/// A value-type handle identifying a loaded scene.
///
/// Zero is the invalid sentinel: a default-constructed handle refers to no
/// scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SceneHandle(pub i32);

impl SceneHandle {
    /// The invalid sentinel handle.
    pub const INVALID: Self = Self(0);

    /// Returns `true` when the handle is not the invalid sentinel.
    pub fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

/// A named collection of root game objects in a [`SceneGraph`].
///
/// Equality is **by handle only**: two scene values with the same handle
/// compare equal regardless of name, dirtiness, or root list. The root
/// list is explicit and insertion-ordered; an empty list is a valid state,
/// not an error.
#[derive(Debug)]
pub struct Scene {
    handle: SceneHandle,
    build_index: i32,
    /// The scene's display name.
    pub name: String,
    is_dirty: bool,
    is_loaded: bool,
    roots: Vec<GameObjectId>,
}

impl Scene {
    /// Creates a loaded, clean scene.
    pub fn new(handle: SceneHandle, build_index: i32, name: impl Into<String>) -> Self {
        Self {
            handle,
            build_index,
            name: name.into(),
            is_dirty: false,
            is_loaded: true,
            roots: Vec::new(),
        }
    }

    /// The scene's identifying handle.
    pub fn handle(&self) -> SceneHandle {
        self.handle
    }

    /// The scene's position in the build order.
    pub fn build_index(&self) -> i32 {
        self.build_index
    }

    /// Returns `true` when the handle corresponds to a live scene.
    pub fn is_valid(&self) -> bool {
        self.handle.is_valid()
    }

    /// Returns `true` while the scene is loaded.
    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    /// Returns `true` when the scene has unsaved modifications.
    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// Flags the scene as having unsaved modifications.
    pub fn mark_dirty(&mut self) {
        self.is_dirty = true;
    }

    /// Clears the unsaved-modifications flag (after a save).
    pub fn clear_dirty(&mut self) {
        self.is_dirty = false;
    }

    // --- Root Objects ---

    /// The scene's root game objects, in insertion order.
    ///
    /// An empty slice is a valid result, not an error.
    pub fn root_game_objects(&self) -> &[GameObjectId] {
        &self.roots
    }

    /// The number of root game objects.
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Registers a root game object. Duplicate handles are ignored.
    pub fn add_root(&mut self, id: GameObjectId) {
        if !self.roots.contains(&id) {
            self.roots.push(id);
            self.is_dirty = true;
        }
    }

    /// Removes a root game object from the scene's list.
    pub fn remove_root(&mut self, id: GameObjectId) -> bool {
        let before = self.roots.len();
        self.roots.retain(|root| *root != id);
        let removed = self.roots.len() != before;
        if removed {
            self.is_dirty = true;
        }
        removed
    }

    // --- Queries ---

    /// Finds the first **active root** whose name matches.
    ///
    /// Shallow by convention: children are not searched. Dead handles in
    /// the root list are skipped.
    pub fn find(&self, graph: &SceneGraph, name: &str) -> Option<GameObjectId> {
        self.roots.iter().copied().find(|&id| {
            graph
                .get(id)
                .is_some_and(|game_object| game_object.is_active() && game_object.name() == name)
        })
    }

    /// Collects every **active root** carrying `tag`.
    ///
    /// Shallow by convention: children are not searched.
    pub fn find_game_objects_with_tag(&self, graph: &SceneGraph, tag: &str) -> Vec<GameObjectId> {
        self.roots
            .iter()
            .copied()
            .filter(|&id| {
                graph
                    .get(id)
                    .is_some_and(|game_object| game_object.is_active() && game_object.tag() == tag)
            })
            .collect()
    }

    pub(crate) fn mark_unloaded(&mut self) {
        self.is_loaded = false;
    }
}

/// Scenes compare equal when their handles do, regardless of any other
/// state.
impl PartialEq for Scene {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for Scene {}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.handle.0)
    }
}

impl SceneGraph {
    /// Unloads a scene: every non-persistent root (and its subtree) is
    /// destroyed immediately; roots marked with
    /// [`SceneGraph::dont_destroy_on_load`] survive and stay in the
    /// scene's root list. The scene is marked unloaded.
    pub fn unload(&mut self, scene: &mut Scene) {
        log::debug!("unloading scene `{}`", scene.name);
        let roots: Vec<GameObjectId> = scene.root_game_objects().to_vec();
        for root in roots {
            let persistent = self
                .get(root)
                .is_some_and(|game_object| game_object.is_persistent());
            if !persistent {
                self.destroy_immediate(root);
                scene.remove_root(root);
            }
        }
        scene.mark_unloaded();
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_by_handle_only() {
        let a = Scene::new(SceneHandle(1), 0, "Level01");
        let mut b = Scene::new(SceneHandle(1), 7, "SomethingElse");
        b.mark_dirty();
        assert_eq!(a, b, "same handle means same scene");

        let c = Scene::new(SceneHandle(2), 0, "Level01");
        assert_ne!(a, c);
    }

    #[test]
    fn test_default_handle_is_invalid() {
        assert!(!SceneHandle::default().is_valid());
        assert_eq!(SceneHandle::default(), SceneHandle::INVALID);
        assert!(SceneHandle(3).is_valid());
    }

    #[test]
    fn test_empty_root_list_is_valid() {
        let scene = Scene::new(SceneHandle(1), 0, "Empty");
        assert!(scene.root_game_objects().is_empty());
        assert_eq!(scene.root_count(), 0);
    }

    #[test]
    fn test_add_and_remove_roots() {
        let mut graph = SceneGraph::new();
        let mut scene = Scene::new(SceneHandle(1), 0, "Main");
        let a = graph.spawn("A");
        let b = graph.spawn("B");

        scene.add_root(a);
        scene.add_root(b);
        scene.add_root(a); // duplicate ignored
        assert_eq!(scene.root_count(), 2);

        assert!(scene.remove_root(a));
        assert!(!scene.remove_root(a));
        assert_eq!(scene.root_game_objects(), &[b]);
    }

    #[test]
    fn test_find_is_shallow_and_active_only() {
        let mut graph = SceneGraph::new();
        let mut scene = Scene::new(SceneHandle(1), 0, "Main");

        let root = graph.spawn("Root");
        let hidden = graph.spawn("Hidden");
        graph.set_active(hidden, false);
        let child = graph.spawn_child("Child", root).unwrap();

        scene.add_root(root);
        scene.add_root(hidden);

        assert_eq!(scene.find(&graph, "Root"), Some(root));
        // Inactive roots are not found.
        assert_eq!(scene.find(&graph, "Hidden"), None);
        // Children are not searched, by convention.
        assert_eq!(scene.find(&graph, "Child"), None);
        let _ = child;
    }

    #[test]
    fn test_find_game_objects_with_tag() {
        let mut graph = SceneGraph::new();
        let mut scene = Scene::new(SceneHandle(1), 0, "Main");

        let a = graph.spawn("A");
        let b = graph.spawn("B");
        let c = graph.spawn("C");
        graph.set_tag(a, "Enemy");
        graph.set_tag(b, "Enemy");
        graph.set_active(b, false);
        scene.add_root(a);
        scene.add_root(b);
        scene.add_root(c);

        let found = scene.find_game_objects_with_tag(&graph, "Enemy");
        assert_eq!(found, vec![a], "inactive roots are excluded");
    }
}
