//! # LogWriter: project event logger
//!
//! A minimal sink that writes incoming project events through `tracing`.
//! It works both inline (advised as a [`ProjectEvents`] sink) and queued
//! (wrapped in a [`QueuedSink`](crate::QueuedSink) as an [`AsyncSink`]).
//!
//! ## Example output
//! ```text
//! INFO connpoint::sinks::log: [opened] added=false
//! INFO connpoint::sinks::log: [closing] removed=true
//! INFO connpoint::sinks::log: [items] added=2 removed=0
//! INFO connpoint::sinks::log: [configuration] name="Debug|x64"
//! ```

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::SinkError;
use crate::project::{
    ActiveConfigurationChanged, ProjectEvent, ProjectEvents, ProjectFileClosing,
    ProjectFileOpened, ProjectItemsChanged,
};
use crate::sinks::AsyncSink;

/// Event writer sink.
#[derive(Default, Debug, Clone, Copy)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ProjectEvents for LogWriter {
    fn on_file_opened(&self, ev: &ProjectFileOpened) -> Result<(), SinkError> {
        info!(added = ev.added, "[opened]");
        Ok(())
    }

    fn on_file_closing(&self, ev: &ProjectFileClosing) -> Result<(), SinkError> {
        info!(removed = ev.removed, "[closing]");
        Ok(())
    }

    fn on_items_changed(&self, ev: &ProjectItemsChanged) -> Result<(), SinkError> {
        info!(added = ev.added.len(), removed = ev.removed.len(), "[items]");
        Ok(())
    }

    fn on_active_configuration_changed(
        &self,
        ev: &ActiveConfigurationChanged,
    ) -> Result<(), SinkError> {
        info!(name = %ev.configuration, "[configuration]");
        Ok(())
    }
}

#[async_trait]
impl AsyncSink<ProjectEvent> for LogWriter {
    async fn on_event(&self, event: &ProjectEvent) {
        if let Err(error) = event.deliver(self) {
            warn!(event = event.as_label(), %error, "log writer rejected event");
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
