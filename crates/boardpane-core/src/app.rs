//! Application root
//!
//! Owns the configuration and the shared services. Frames get the services
//! injected when they are opened.

use std::sync::Arc;

use boardpane_session::{RestoreReport, SessionFile};

use crate::config::Config;
use crate::frame::BoardFrame;
use crate::services::Services;
use crate::Result;

pub struct Application {
    /// Configuration
    config: Config,
    /// Services shared by every frame
    services: Arc<Services>,
}

impl Application {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            services: Arc::new(Services::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn services(&self) -> &Arc<Services> {
        &self.services
    }

    /// Initialize the shared services
    pub fn start(&self) -> Result<()> {
        self.services.init(self.config.help_topics.clone())?;
        tracing::info!(session = %self.config.session_path.display(), "Application started");
        Ok(())
    }

    /// Opens an empty frame bound to the configured session file. Add its
    /// permanent windows, then call [`Application::restore`].
    pub fn open_frame(&self, title: impl Into<String>) -> BoardFrame {
        let session = SessionFile::new(&self.config.session_path, self.config.snapshot_format);
        let frame = BoardFrame::new(title, self.services.clone(), session);
        frame.main_window().lock().set_bounds(self.config.frame_bounds);
        frame
    }

    /// Restores the frame's windows when configured to and a session exists.
    pub fn restore(&self, frame: &mut BoardFrame) -> Result<Option<RestoreReport>> {
        if !self.config.restore_on_startup {
            return Ok(None);
        }
        if !frame.session().exists() {
            tracing::debug!(path = %frame.session().path().display(), "No session to restore");
            return Ok(None);
        }
        frame.load_session().map(Some)
    }

    pub fn shutdown(&self) {
        self.services.teardown();
    }
}
