//! Self-registration of transient windows

use std::sync::{Arc, Weak};

use boardpane_window::SubWindow;
use parking_lot::Mutex;

use crate::registry::{remove, Entries, SubWindowRegistry};

/// Back-reference from a transient window to the registry holding it. Holds no
/// strong references, so it never keeps the registry or the window alive.
#[derive(Clone)]
pub struct RegistryLink {
    registry: Weak<Entries>,
    window: Weak<Mutex<dyn SubWindow>>,
}

impl RegistryLink {
    pub(crate) fn new(registry: Weak<Entries>, window: Weak<Mutex<dyn SubWindow>>) -> Self {
        Self { registry, window }
    }

    /// Removes the window from its registry. Returns false if the registry is
    /// gone or no longer holds the window.
    pub fn detach(&self) -> bool {
        match self.registry.upgrade() {
            Some(entries) => remove(&entries, self.window.as_ptr()),
            None => false,
        }
    }
}

impl std::fmt::Debug for RegistryLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryLink")
            .field("registry_alive", &(self.registry.strong_count() > 0))
            .finish()
    }
}

/// Builds a window and registers it in one step. The window gets a link it can
/// use to deregister itself on disposal.
pub fn open_transient<W, F>(registry: &SubWindowRegistry, build: F) -> Arc<Mutex<W>>
where
    W: SubWindow + 'static,
    F: FnOnce(RegistryLink) -> W,
{
    let window = Arc::new_cyclic(|me: &Weak<Mutex<W>>| {
        let me: Weak<Mutex<dyn SubWindow>> = me.clone();
        Mutex::new(build(registry.link(me)))
    });
    registry.register(window.clone());
    window
}
