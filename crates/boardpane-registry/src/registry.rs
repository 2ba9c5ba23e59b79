//! Sub-window registry
//!
//! Tracks the transient windows of one parent frame so the parent can hide,
//! show or dispose all of them at once. Entries are identified by the window
//! handle itself.

use std::sync::{Arc, Weak};

use boardpane_window::{SubWindow, SubWindowHandle};
use parking_lot::Mutex;

use crate::link::RegistryLink;

pub(crate) type Entries = Mutex<Vec<SubWindowHandle>>;

pub(crate) fn same_window(entry: &SubWindowHandle, window: *const Mutex<dyn SubWindow>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(entry), window)
}

pub struct SubWindowRegistry {
    windows: Arc<Entries>,
}

impl SubWindowRegistry {
    pub fn new() -> Self {
        Self {
            windows: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn register(&self, window: SubWindowHandle) {
        let mut windows = self.windows.lock();
        windows.push(window);
        tracing::debug!(count = windows.len(), "Registered sub-window");
    }

    /// Removes the window. Returns false if it was not registered.
    pub fn unregister(&self, window: &SubWindowHandle) -> bool {
        remove(&self.windows, Arc::as_ptr(window))
    }

    pub fn contains(&self, window: &SubWindowHandle) -> bool {
        self.windows
            .lock()
            .iter()
            .any(|entry| same_window(entry, Arc::as_ptr(window)))
    }

    pub fn len(&self) -> usize {
        self.windows.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.lock().is_empty()
    }

    /// Handles in registration order.
    pub fn windows(&self) -> Vec<SubWindowHandle> {
        self.windows.lock().clone()
    }

    /// Hides every window, remembering its visibility on the first call only.
    pub fn iconify_all(&self) {
        for window in self.windows() {
            window.lock().parent_iconified();
        }
    }

    pub fn deiconify_all(&self) {
        for window in self.windows() {
            window.lock().parent_deiconified();
        }
    }

    /// Disposes every window without going through their own deregistration,
    /// leaving the registry empty.
    pub fn dispose_all(&self) {
        // Taken out first so a window reaching back into the registry sees it empty.
        let windows = std::mem::take(&mut *self.windows.lock());
        let count = windows.len();
        for window in windows {
            window.lock().parent_disposed();
        }
        tracing::debug!(count, "Disposed all sub-windows");
    }

    /// Link a window keeps so it can deregister itself when disposed.
    pub fn link(&self, window: Weak<Mutex<dyn SubWindow>>) -> RegistryLink {
        RegistryLink::new(Arc::downgrade(&self.windows), window)
    }
}

pub(crate) fn remove(entries: &Entries, window: *const Mutex<dyn SubWindow>) -> bool {
    let mut windows = entries.lock();
    match windows.iter().position(|entry| same_window(entry, window)) {
        Some(index) => {
            // Dropped after the lock is released.
            let removed = windows.remove(index);
            let count = windows.len();
            drop(windows);
            drop(removed);
            tracing::debug!(count, "Unregistered sub-window");
            true
        }
        None => false,
    }
}

impl Default for SubWindowRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SubWindowRegistry {
    fn clone(&self) -> Self {
        Self {
            windows: Arc::clone(&self.windows),
        }
    }
}
