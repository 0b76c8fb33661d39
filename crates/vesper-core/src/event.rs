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

//! Provides the synchronous change-notification primitive.
//!
//! Editor panels observe scene-graph state (active flags, layers, tags,
//! component enablement) through [`Signal`]s instead of polling. Emission
//! is synchronous and happens on the mutating call's thread, matching the
//! engine's single-threaded main-loop model; there is no queue and no
//! cross-thread delivery.

use std::fmt;

/// Identifies a single subscription on a [`Signal`].
///
/// Ids are monotonic per signal and never reused, so a stale id after
/// unsubscription can never detach someone else's observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A synchronous multicast observer registry.
///
/// Observers are invoked in subscription order, on the caller's thread,
/// every time [`Signal::emit`] runs. Lifetime management is explicit:
/// there are no weak references, and an observer stays registered until
/// [`Signal::unsubscribe`] is called with its id.
///
/// Subscribing or unsubscribing from inside a callback is not supported;
/// the signal is exclusively borrowed for the duration of `emit`.
pub struct Signal<T> {
    observers: Vec<(SubscriptionId, Box<dyn FnMut(&T)>)>,
    next_id: u64,
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self {
            observers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> Signal<T> {
    /// Creates an empty signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer and returns its subscription id.
    pub fn subscribe(&mut self, observer: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes the observer with the given id.
    ///
    /// Returns `false` when the id is unknown (already unsubscribed, or
    /// from another signal).
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Invokes every current observer with `value`, in subscription order.
    pub fn emit(&mut self, value: &T) {
        log::trace!("emitting to {} observer(s)", self.observers.len());
        for (_, observer) in self.observers.iter_mut() {
            observer(value);
        }
    }

    /// Returns the number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Returns `true` when no observers are registered.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("observers", &self.observers.len())
            .finish()
    }
}

// --- Tests ---
