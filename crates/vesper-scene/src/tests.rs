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

use std::any::Any;

use vesper_core::math::{approx_eq_eps, Vector3};

use crate::component::{Component, ComponentError};
use crate::graph::SceneGraph;
use crate::registry::ComponentRegistry;
use crate::scene::{Scene, SceneHandle};

// --- DUMMY COMPONENTS FOR TESTING ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Foo(i32);

impl Component for Foo {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
    fn clone_component(&self) -> Box<dyn Component> {
        Box::new(*self)
    }
    fn load_from_json(&mut self, _json: &str) -> Result<(), ComponentError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Marker;

impl Component for Marker {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
    fn clone_component(&self) -> Box<dyn Component> {
        Box::new(*self)
    }
    fn load_from_json(&mut self, _json: &str) -> Result<(), ComponentError> {
        Ok(())
    }
}

// --- HIERARCHY QUERY TESTS ---

#[test]
fn test_component_on_child_found_in_children_not_on_self() {
    let mut graph = SceneGraph::new();
    let a = graph.spawn("A");
    let b = graph.spawn_child("B", a).expect("A is live");
    graph.add_component(b, Foo(42));

    let found = graph
        .get_component_in_children::<Foo>(a, false)
        .expect("search descends into B");
    assert_eq!(found.0, 42);

    assert!(
        graph.get_component::<Foo>(a).is_none(),
        "get_component scans only the object's own list"
    );
}

#[test]
fn test_get_component_in_children_is_pre_order_first_match() {
    let mut graph = SceneGraph::new();
    let root = graph.spawn("root");
    let child_a = graph.spawn_child("childA", root).unwrap();
    let _child_b = graph.spawn_child("childB", root).unwrap();
    let grandchild = graph.spawn_child("grandchild", child_a).unwrap();

    graph.add_component(grandchild, Foo(2));
    graph.add_component(child_a, Foo(1));

    // childA comes before its own subtree: first match wins.
    let found = graph
        .get_component_in_children::<Foo>(root, false)
        .expect("a Foo exists in the tree");
    assert_eq!(found.0, 1, "pre-order: childA is visited before grandchild");
}

#[test]
fn test_get_component_in_children_checks_self_first() {
    let mut graph = SceneGraph::new();
    let root = graph.spawn("root");
    let child = graph.spawn_child("child", root).unwrap();
    graph.add_component(root, Foo(10));
    graph.add_component(child, Foo(20));

    let found = graph.get_component_in_children::<Foo>(root, false).unwrap();
    assert_eq!(found.0, 10, "the object itself is checked before children");
}

#[test]
fn test_get_component_in_children_skips_inactive_subtrees() {
    let mut graph = SceneGraph::new();
    let root = graph.spawn("root");
    let child = graph.spawn_child("child", root).unwrap();
    let grandchild = graph.spawn_child("grandchild", child).unwrap();
    graph.add_component(grandchild, Foo(7));

    graph.set_active(child, false);
    assert!(
        graph.get_component_in_children::<Foo>(root, false).is_none(),
        "an inactive child hides its whole subtree"
    );
    assert!(
        graph.get_component_in_children::<Foo>(root, true).is_some(),
        "include_inactive lifts the gate"
    );
}

#[test]
fn test_get_components_in_children_does_not_recurse() {
    let mut graph = SceneGraph::new();
    let root = graph.spawn("root");
    let child = graph.spawn_child("child", root).unwrap();
    let grandchild = graph.spawn_child("grandchild", child).unwrap();
    graph.add_component(grandchild, Foo(99));

    // The plural form scans immediate children only. A Foo attached only
    // to the grandchild must NOT be returned — this non-recursion is a
    // preserved contract, asymmetric with the singular form above.
    let found = graph.get_components_in_children::<Foo>(root, false);
    assert!(
        found.is_empty(),
        "plural children query must not descend into grandchildren"
    );

    // The same Foo IS visible to the singular, recursive form.
    assert!(graph.get_component_in_children::<Foo>(root, false).is_some());
}

#[test]
fn test_get_components_in_children_collects_immediate_children_only() {
    let mut graph = SceneGraph::new();
    let root = graph.spawn("root");
    let child_a = graph.spawn_child("childA", root).unwrap();
    let child_b = graph.spawn_child("childB", root).unwrap();
    graph.add_component(root, Foo(0)); // self: not collected
    graph.add_component(child_a, Foo(1));
    graph.add_component(child_a, Foo(2)); // duplicates both collected
    graph.add_component(child_b, Foo(3));

    let values: Vec<i32> = graph
        .get_components_in_children::<Foo>(root, false)
        .iter()
        .map(|foo| foo.0)
        .collect();
    assert_eq!(values, vec![1, 2, 3], "attach order, children only");
}

#[test]
fn test_get_component_in_parent_walks_up_without_active_gate() {
    let mut graph = SceneGraph::new();
    let root = graph.spawn("root");
    let child = graph.spawn_child("child", root).unwrap();
    let leaf = graph.spawn_child("leaf", child).unwrap();
    graph.add_component(root, Foo(5));
    graph.set_active(root, false);

    // The singular parent query has no include_inactive gate: the
    // inactive root still matches.
    let found = graph
        .get_component_in_parent::<Foo>(leaf)
        .expect("walks the parent chain to root");
    assert_eq!(found.0, 5);
}

#[test]
fn test_get_components_in_parent_gates_inactive_ancestors() {
    let mut graph = SceneGraph::new();
    let root = graph.spawn("root");
    let child = graph.spawn_child("child", root).unwrap();
    graph.add_component(root, Foo(1));
    graph.add_component(child, Foo(2));
    graph.set_active(root, false);

    let gated: Vec<i32> = graph
        .get_components_in_parent::<Foo>(child, false)
        .iter()
        .map(|foo| foo.0)
        .collect();
    assert_eq!(gated, vec![2], "inactive ancestor skipped");

    let ungated: Vec<i32> = graph
        .get_components_in_parent::<Foo>(child, true)
        .iter()
        .map(|foo| foo.0)
        .collect();
    assert_eq!(ungated, vec![2, 1], "self first, then the parent chain");
}

// --- ACTIVE STATE ---

#[test]
fn test_set_active_recursively_overwrites_mixed_state() {
    let mut graph = SceneGraph::new();
    let root = graph.spawn("root");
    let on_child = graph.spawn_child("on", root).unwrap();
    let off_child = graph.spawn_child("off", root).unwrap();
    let grandchild = graph.spawn_child("grand", off_child).unwrap();
    graph.set_active(off_child, false);

    // Mixed state across the tree collapses: every descendant is forced
    // to false, regardless of its previous local flag.
    graph.set_active_recursively(root, false);
    for id in [root, on_child, off_child, grandchild] {
        assert!(!graph.get(id).unwrap().is_active());
    }

    graph.set_active_recursively(root, true);
    for id in [root, on_child, off_child, grandchild] {
        assert!(
            graph.get(id).unwrap().is_active(),
            "previously-false children are overwritten too"
        );
    }
}

// --- REPARENTING ---

#[test]
fn test_set_parent_moves_and_rejects_cycles() {
    let mut graph = SceneGraph::new();
    let a = graph.spawn("A");
    let b = graph.spawn_child("B", a).unwrap();
    let c = graph.spawn("C");

    assert!(graph.set_parent(b, Some(c)));
    assert_eq!(graph.parent(b), Some(c));
    assert!(graph.children(a).is_empty());
    assert_eq!(graph.children(c), &[b]);

    // Self-parenting and cycles are rejected without mutating.
    assert!(!graph.set_parent(c, Some(c)));
    assert!(!graph.set_parent(c, Some(b)), "b is inside c's subtree");
    assert_eq!(graph.parent(c), None);

    // Detaching to root.
    assert!(graph.set_parent(b, None));
    assert_eq!(graph.parent(b), None);
    assert_eq!(graph.root(b), Some(b));
}

// --- INSTANTIATE ---

#[test]
fn test_instantiate_deep_copies_subtree() {
    let mut graph = SceneGraph::new();
    let original = graph.spawn("Rig");
    let child = graph.spawn_child("Arm", original).unwrap();
    graph.add_component(original, Foo(1));
    graph.add_component(child, Foo(2));
    graph.transform_mut(child).unwrap().local_position = Vector3::new(1.0, 0.0, 0.0);

    let clone = graph.instantiate(original).expect("original is live");
    assert_ne!(clone, original);
    assert_eq!(graph.get(clone).unwrap().name(), "Rig (Clone)");
    assert_eq!(graph.parent(clone), None, "clone lands at the root");

    // Structure and component state are copied.
    let clone_children = graph.children(clone).to_vec();
    assert_eq!(clone_children.len(), 1);
    let clone_child = clone_children[0];
    assert_eq!(graph.get(clone_child).unwrap().name(), "Arm");
    assert_eq!(graph.get_component::<Foo>(clone_child).unwrap().0, 2);
    assert_eq!(
        graph.transform(clone_child).unwrap().local_position,
        Vector3::new(1.0, 0.0, 0.0)
    );

    // The copy is independent: mutating the clone leaves the original
    // untouched.
    graph.get_component_mut::<Foo>(clone_child).unwrap().0 = 77;
    assert_eq!(graph.get_component::<Foo>(child).unwrap().0, 2);
}

#[test]
fn test_instantiate_child_of_parents_the_clone() {
    let mut graph = SceneGraph::new();
    let prefab = graph.spawn("Prefab");
    let holder = graph.spawn("Holder");

    let clone = graph
        .instantiate_child_of(prefab, holder)
        .expect("both handles are live");
    assert_eq!(graph.parent(clone), Some(holder));
    assert_eq!(graph.children(holder), &[clone]);
}

// --- DESTRUCTION ---

#[test]
fn test_destroy_immediate_cascades_and_invalidates_handles() {
    let mut graph = SceneGraph::new();
    let root = graph.spawn("root");
    let child = graph.spawn_child("child", root).unwrap();
    let grandchild = graph.spawn_child("grand", child).unwrap();
    assert_eq!(graph.len(), 3);

    assert!(graph.destroy_immediate(child));
    assert_eq!(graph.len(), 1);
    assert!(graph.contains(root));
    assert!(!graph.contains(child), "stale handle is invalid");
    assert!(!graph.contains(grandchild), "children cascade");
    assert!(graph.children(root).is_empty(), "detached from parent");

    // Destroying again reports failure.
    assert!(!graph.destroy_immediate(child));

    // A recycled slot gets a fresh generation: the old handle stays dead.
    let replacement = graph.spawn("replacement");
    assert!(!graph.contains(child));
    assert!(graph.contains(replacement));
}

#[test]
fn test_destroy_is_deferred_until_flush() {
    let mut graph = SceneGraph::new();
    let doomed = graph.spawn("doomed");

    graph.destroy(doomed);
    assert!(graph.contains(doomed), "still alive before the flush");

    graph.flush_destroyed(0.0);
    assert!(!graph.contains(doomed));
}

#[test]
fn test_destroy_delayed_waits_for_its_deadline() {
    let mut graph = SceneGraph::new();
    let doomed = graph.spawn("doomed");
    graph.destroy_delayed(doomed, 1.0);

    graph.flush_destroyed(0.4);
    assert!(graph.contains(doomed), "0.4s elapsed of 1.0s");
    graph.flush_destroyed(0.4);
    assert!(graph.contains(doomed), "0.8s elapsed of 1.0s");
    graph.flush_destroyed(0.4);
    assert!(!graph.contains(doomed), "deadline passed");
}

// --- REGISTRY-DRIVEN CREATION ---

#[test]
fn test_add_component_with_registry() {
    let mut registry = ComponentRegistry::new();
    registry.register::<Marker>("Marker");

    let mut graph = SceneGraph::new();
    let id = graph.spawn("Thing");

    assert!(graph.add_component_with(id, &registry, "Marker").is_some());
    assert!(graph.get_component::<Marker>(id).is_some());

    // Unknown names are a recoverable failure, not a panic.
    assert!(graph
        .add_component_with(id, &registry, "NotRegistered")
        .is_none());
}

// --- WORLD PLACEMENT ---

#[test]
fn test_world_matrix_composes_parent_chain() {
    let mut graph = SceneGraph::new();
    let root = graph.spawn("root");
    let child = graph.spawn_child("child", root).unwrap();

    graph.transform_mut(root).unwrap().local_position = Vector3::new(10.0, 0.0, 0.0);
    graph.transform_mut(child).unwrap().local_position = Vector3::new(0.0, 5.0, 0.0);

    let world = graph.world_matrix(child).expect("child is live");
    let position = world.transform_coordinate(Vector3::ZERO);
    assert!(approx_eq_eps(position.x, 10.0, 1e-5));
    assert!(approx_eq_eps(position.y, 5.0, 1e-5));
    assert!(approx_eq_eps(position.z, 0.0, 1e-5));
}

// --- SCENE LIFECYCLE ---

#[test]
fn test_unload_destroys_non_persistent_roots() {
    let mut graph = SceneGraph::new();
    let mut scene = Scene::new(SceneHandle(1), 0, "Main");

    let disposable = graph.spawn("Disposable");
    let keeper = graph.spawn("Keeper");
    let child_of_disposable = graph.spawn_child("Child", disposable).unwrap();
    graph.dont_destroy_on_load(keeper);
    scene.add_root(disposable);
    scene.add_root(keeper);

    graph.unload(&mut scene);

    assert!(!graph.contains(disposable));
    assert!(!graph.contains(child_of_disposable), "subtrees go too");
    assert!(graph.contains(keeper), "persistent root survives");
    assert_eq!(scene.root_game_objects(), &[keeper]);
    assert!(!scene.is_loaded());
}
