//! Board frame: host of the permanent and transient tool windows

use std::sync::{Arc, Weak};

use boardpane_registry::{
    ObjectInfoWindow, Printable, RegistryLink, SubWindowRegistry, WINDOW_OFFSET,
};
use boardpane_session::{RestoreReport, SaveReport, SessionFile};
use boardpane_state::Rect;
use boardpane_window::{
    PersistableHandle, PersistableWindow, SavableWindow, SubWindow, SubWindowHandle,
};
use parking_lot::Mutex;

use crate::error::CoreError;
use crate::services::Services;
use crate::Result;

/// Kind tag of the main frame window. It is always the first record of a session.
pub const MAIN_FRAME_KIND: &str = "board_frame";

pub struct BoardFrame {
    main: Arc<Mutex<SavableWindow>>,
    permanent: Vec<PersistableHandle>,
    transient: SubWindowRegistry,
    focused: Option<Weak<Mutex<dyn SubWindow>>>,
    services: Arc<Services>,
    session: SessionFile,
    disposed: bool,
}

impl BoardFrame {
    pub fn new(title: impl Into<String>, services: Arc<Services>, session: SessionFile) -> Self {
        let mut main = SavableWindow::new(MAIN_FRAME_KIND, title);
        main.set_visible(true);
        Self {
            main: Arc::new(Mutex::new(main)),
            permanent: Vec::new(),
            transient: SubWindowRegistry::new(),
            focused: None,
            services,
            session,
            disposed: false,
        }
    }

    pub fn main_window(&self) -> &Arc<Mutex<SavableWindow>> {
        &self.main
    }

    pub fn services(&self) -> &Arc<Services> {
        &self.services
    }

    pub fn session(&self) -> &SessionFile {
        &self.session
    }

    pub fn transient(&self) -> &SubWindowRegistry {
        &self.transient
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Appends a window to the persisted list. Windows are saved and restored
    /// in the order they were added, after the main frame.
    pub fn add_permanent<W>(&mut self, window: W) -> Arc<Mutex<W>>
    where
        W: PersistableWindow + 'static,
    {
        let handle = Arc::new(Mutex::new(window));
        self.permanent.push(handle.clone());
        handle
    }

    pub fn permanent_windows(&self) -> &[PersistableHandle] {
        &self.permanent
    }

    /// Every window in session order: the main frame first, then the
    /// permanent windows.
    pub fn persisted_windows(&self) -> Vec<PersistableHandle> {
        let main: PersistableHandle = self.main.clone();
        std::iter::once(main).chain(self.permanent.iter().cloned()).collect()
    }

    /// Opens a window that registers itself with this frame and is disposed
    /// together with it.
    pub fn open_transient<W, F>(&self, build: F) -> Arc<Mutex<W>>
    where
        W: SubWindow + 'static,
        F: FnOnce(RegistryLink) -> W,
    {
        boardpane_registry::open_transient(&self.transient, build)
    }

    /// Opens an info window for `objects`, placed next to `anchor`.
    pub fn show_object_info<'a, P, I>(
        &self,
        title: impl Into<String>,
        objects: I,
        anchor: Rect,
    ) -> Arc<Mutex<ObjectInfoWindow>>
    where
        P: Printable + ?Sized + 'a,
        I: IntoIterator<Item = &'a P>,
    {
        let bounds = anchor.offset(WINDOW_OFFSET, WINDOW_OFFSET);
        ObjectInfoWindow::display(&self.transient, title, objects, bounds)
    }

    pub fn save_session(&self) -> Result<SaveReport> {
        self.ensure_open()?;
        let report = self.session.save(&self.persisted_windows())?;
        if !report.is_complete() {
            tracing::warn!(
                failed = report.failed.len(),
                path = %self.session.path().display(),
                "Session saved with failures"
            );
        }
        Ok(report)
    }

    /// Restores every persisted window from the session file, then refreshes
    /// the permanent windows against the current board.
    pub fn load_session(&mut self) -> Result<RestoreReport> {
        self.ensure_open()?;
        let report = self.session.load(&self.persisted_windows())?;
        self.refresh_windows();
        Ok(report)
    }

    pub fn refresh_windows(&self) {
        for window in &self.permanent {
            window.lock().refresh();
        }
    }

    pub fn iconify(&self) {
        for window in &self.permanent {
            window.lock().parent_iconified();
        }
        self.transient.iconify_all();
    }

    pub fn deiconify(&self) {
        for window in &self.permanent {
            window.lock().parent_deiconified();
        }
        self.transient.deiconify_all();
    }

    /// Disposes every owned window. The frame cannot save or load afterwards.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        for window in self.permanent.drain(..) {
            window.lock().dispose();
        }
        self.transient.dispose_all();
        self.main.lock().dispose();
        self.focused = None;
        self.disposed = true;
        tracing::info!(title = %self.main.lock().frame().title(), "Board frame disposed");
    }

    /// Remembers `window` as focused without keeping it alive.
    pub fn focus<W: SubWindow + 'static>(&mut self, window: &Arc<Mutex<W>>) {
        let weak: Weak<Mutex<W>> = Arc::downgrade(window);
        let weak: Weak<Mutex<dyn SubWindow>> = weak;
        self.focused = Some(weak);
    }

    /// The focused window, unless it was dropped or disposed since.
    pub fn focused(&self) -> Option<SubWindowHandle> {
        let window = self.focused.as_ref()?.upgrade()?;
        if window.lock().frame().is_disposed() {
            return None;
        }
        Some(window)
    }

    pub fn help_text(&self, topic: &str) -> Option<String> {
        self.services.help_text(topic)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.disposed {
            return Err(CoreError::Disposed);
        }
        Ok(())
    }
}

impl Drop for BoardFrame {
    fn drop(&mut self) {
        self.dispose();
    }
}
