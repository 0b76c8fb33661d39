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

//! # Vesper Core
//!
//! Foundational crate containing the math library (vectors, quaternions,
//! row-major 4x4 matrices), the object identity model shared by every
//! engine object, and the synchronous change-notification primitive.
//!
//! This crate has no knowledge of the scene graph; `vesper-scene` builds
//! the hierarchy engine on top of these value types.

#![warn(missing_docs)]

pub mod event;
pub mod math;
pub mod object;

pub use event::{Signal, SubscriptionId};
pub use object::{HideFlags, ObjectMeta};
