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

//! # Vesper Scene
//!
//! The hierarchy engine: game objects owned by a generational-arena scene
//! graph, attached components with an enable/disable lifecycle, transforms
//! composed into world matrices, and the hierarchical query family consumed
//! by editor panels (`get_component_in_children`, tag/name lookup, and so
//! on).
//!
//! The arena is the single source of hierarchy truth: parent and child
//! links live in the graph's records, never inside the nodes, so a
//! reparenting operation can never leave two back-references out of sync.
//!
//! All mutation is synchronous and single-threaded, matching the
//! conventional game-engine main-loop model. Structural mutation during
//! iteration over a node's children or components is the caller's
//! responsibility to avoid.

#![warn(missing_docs)]

pub mod component;
pub mod game_object;
pub mod graph;
pub mod registry;
pub mod scene;
pub mod transform;

pub use component::{Component, ComponentError, ComponentSlot};
pub use game_object::{GameObject, GameObjectId};
pub use graph::SceneGraph;
pub use registry::ComponentRegistry;
pub use scene::{Scene, SceneHandle};
pub use transform::Transform;

#[cfg(test)]
mod tests;
