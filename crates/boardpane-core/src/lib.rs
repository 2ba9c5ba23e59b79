//! BoardPane Core
//!
//! The board frame hosting the tool windows, the application root that owns
//! configuration and shared services, and logging setup.

mod app;
mod config;
mod error;
mod frame;
mod services;

pub use app::Application;
pub use config::Config;
pub use error::CoreError;
pub use frame::{BoardFrame, MAIN_FRAME_KIND};
pub use services::{HelpBroker, Services};

// Re-export the window and session layers
pub use boardpane_registry::{
    open_transient, ObjectInfoWindow, Printable, RegistryLink, SubWindowRegistry, WINDOW_OFFSET,
};
pub use boardpane_session::{
    RestoreReport, SaveReport, SessionError, SessionFile, SessionSnapshot, SnapshotFormat,
};
pub use boardpane_state::{FilteredListState, Rect, WindowState};
pub use boardpane_window::{
    CompositeWindow, DisplayName, EntitySource, FilteredListWindow, PersistableHandle,
    PersistableWindow, SavableWindow, SubWindow, SubWindowHandle, VisibilitySource,
    VisibilityWindow,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
