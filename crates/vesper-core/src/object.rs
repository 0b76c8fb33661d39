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

//! Defines the identity state shared by every engine object.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Bit flags controlling an object's visibility and persistence in
    /// editor tooling.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct HideFlags: u32 {
        /// The object does not appear in the hierarchy panel.
        const HIDE_IN_HIERARCHY = 1;
        /// The object does not appear in the inspector panel.
        const HIDE_IN_INSPECTOR = 1 << 1;
        /// The object is not saved with the scene in the editor.
        const DONT_SAVE_IN_EDITOR = 1 << 2;
        /// The object cannot be edited in the inspector.
        const NOT_EDITABLE = 1 << 3;
        /// The object is not saved when building the player.
        const DONT_SAVE_IN_BUILD = 1 << 4;
        /// The object is not unloaded with unused assets.
        const DONT_UNLOAD_UNUSED_ASSET = 1 << 5;
        /// The object is never saved, in the editor or in a build.
        const DONT_SAVE = Self::DONT_SAVE_IN_EDITOR.bits()
            | Self::DONT_SAVE_IN_BUILD.bits()
            | Self::DONT_UNLOAD_UNUSED_ASSET.bits();
        /// The object is hidden everywhere and never saved.
        const HIDE_AND_DONT_SAVE = Self::HIDE_IN_HIERARCHY.bits() | Self::DONT_SAVE.bits();
    }
}

/// The identity every engine object embeds: a display name plus editor
/// hide flags.
///
/// Equality is **value equality over the `(name, hide_flags)` pair**, not
/// reference identity: two distinct objects with the same name and flags
/// compare equal. Editor tooling relies on this for deduplication displays,
/// so the contract is deliberate despite being surprising.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectMeta {
    /// The object's display name.
    pub name: String,
    /// Flags controlling editor visibility and persistence.
    pub hide_flags: HideFlags,
}

impl ObjectMeta {
    /// Creates an identity with the given name and empty hide flags.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hide_flags: HideFlags::empty(),
        }
    }

    /// Creates an identity with the given name and flags.
    pub fn with_flags(name: impl Into<String>, hide_flags: HideFlags) -> Self {
        Self {
            name: name.into(),
            hide_flags,
        }
    }
}

impl fmt::Display for ObjectMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_instances_with_same_pair_are_equal() {
        let a = ObjectMeta::with_flags("Player", HideFlags::NOT_EDITABLE);
        let b = ObjectMeta::with_flags("Player", HideFlags::NOT_EDITABLE);
        assert_eq!(a, b, "equality is by (name, hide_flags), not identity");
    }

    #[test]
    fn test_differing_flags_break_equality() {
        let a = ObjectMeta::new("Player");
        let b = ObjectMeta::with_flags("Player", HideFlags::HIDE_IN_HIERARCHY);
        assert_ne!(a, b);
    }

    #[test]
    fn test_composed_flag_constants() {
        assert!(HideFlags::DONT_SAVE.contains(HideFlags::DONT_SAVE_IN_EDITOR));
        assert!(HideFlags::DONT_SAVE.contains(HideFlags::DONT_SAVE_IN_BUILD));
        assert!(HideFlags::HIDE_AND_DONT_SAVE.contains(HideFlags::HIDE_IN_HIERARCHY));
        assert!(!HideFlags::DONT_SAVE.contains(HideFlags::HIDE_IN_INSPECTOR));
    }
}
