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

use std::sync::{Mutex, MutexGuard, PoisonError};

type Listener<T> = Box<dyn Fn(&T) + Send + Sync>;

/// A thread-safe, multi-subscriber notification channel.
///
/// `Signal` is generic over the payload type `T` it reports. Listeners are
/// invoked synchronously, in subscription order, each time [`Signal::emit`]
/// is called. A single-callback "slot" API is deliberately absent: callers
/// that only ever need one listener simply subscribe one listener, so there
/// is exactly one notification path to maintain.
///
/// Listeners must not subscribe to the same signal from inside a callback;
/// the listener list is locked for the duration of an emit.
pub struct Signal<T: ?Sized> {
    listeners: Mutex<Vec<Listener<T>>>,
}

impl<T: ?Sized> Signal<T> {
    /// Creates a signal with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Appends a listener. Listeners fire in the order they were added.
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) {
        self.lock().push(Box::new(listener));
    }

    /// Invokes every listener with a reference to `payload`.
    pub fn emit(&self, payload: &T) {
        let listeners = self.lock();
        log::trace!("emitting to {} listener(s)", listeners.len());
        for listener in listeners.iter() {
            listener(payload);
        }
    }

    /// Removes every listener.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Returns the number of subscribed listeners.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if no listener is subscribed.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A poisoned list only means a previous listener panicked; the list
    // itself is still valid, so recover it instead of propagating.
    fn lock(&self) -> MutexGuard<'_, Vec<Listener<T>>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: ?Sized> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.len())
            .finish()
    }
}
