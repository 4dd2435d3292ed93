//! # Project events contract.
//!
//! [`ProjectEvents`] is the sink contract a project host publishes through its
//! connection point container. [`ProjectEvent`] carries the same notifications
//! as values, for sinks that queue them.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use connpoint::{ConnectionPoint, ProjectEvents, ProjectFileOpened, SinkError};
//!
//! struct Refresh;
//!
//! impl ProjectEvents for Refresh {
//!     fn on_file_opened(&self, ev: &ProjectFileOpened) -> Result<(), SinkError> {
//!         assert!(!ev.added);
//!         Ok(())
//!     }
//! }
//!
//! let point = ConnectionPoint::<dyn ProjectEvents>::detached();
//! point.advise(Arc::new(Refresh)).unwrap();
//! let report = point.notify(|s| s.on_file_opened(&ProjectFileOpened { added: false })).unwrap();
//! assert_eq!(report.delivered, 1);
//! ```

use crate::error::SinkError;
use crate::points::{Iid, Interface};
use crate::sinks::QueuedSink;

use super::EventCategory;

/// The project file finished opening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFileOpened {
    /// The project was just added to the solution (not merely reopened).
    pub added: bool,
}

/// The project file is about to close.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFileClosing {
    /// The project is being removed from the solution.
    pub removed: bool,
}

/// Items were added to or removed from the project.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectItemsChanged {
    /// Paths of added items.
    pub added: Vec<String>,
    /// Paths of removed items.
    pub removed: Vec<String>,
}

/// The active build configuration changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveConfigurationChanged {
    /// Canonical name of the new configuration, e.g. `"Debug|x64"`.
    pub configuration: String,
}

/// Sink contract for project lifecycle notifications.
///
/// Every method defaults to accepting the notification, so sinks implement only
/// what they care about.
pub trait ProjectEvents: Send + Sync {
    /// Called after the project file has been opened.
    fn on_file_opened(&self, _ev: &ProjectFileOpened) -> Result<(), SinkError> {
        Ok(())
    }

    /// Called before the project file closes.
    fn on_file_closing(&self, _ev: &ProjectFileClosing) -> Result<(), SinkError> {
        Ok(())
    }

    /// Called after items were added or removed.
    fn on_items_changed(&self, _ev: &ProjectItemsChanged) -> Result<(), SinkError> {
        Ok(())
    }

    /// Called after the active configuration changed.
    fn on_active_configuration_changed(
        &self,
        _ev: &ActiveConfigurationChanged,
    ) -> Result<(), SinkError> {
        Ok(())
    }
}

impl Interface for dyn ProjectEvents {
    const IID: Iid = Iid::from_u128(0x7b8f3c21_5d0e_4a9b_9c61_2f4e8d1a6b30);
    const NAME: &'static str = "ProjectEvents";
}

/// One project notification as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectEvent {
    /// See [`ProjectEvents::on_file_opened`].
    FileOpened(ProjectFileOpened),
    /// See [`ProjectEvents::on_file_closing`].
    FileClosing(ProjectFileClosing),
    /// See [`ProjectEvents::on_items_changed`].
    ItemsChanged(ProjectItemsChanged),
    /// See [`ProjectEvents::on_active_configuration_changed`].
    ActiveConfigurationChanged(ActiveConfigurationChanged),
}

impl ProjectEvent {
    /// Suppression category.
    pub fn category(&self) -> EventCategory {
        match self {
            ProjectEvent::FileOpened(_) | ProjectEvent::FileClosing(_) => EventCategory::Hierarchy,
            ProjectEvent::ItemsChanged(_) => EventCategory::Tracker,
            ProjectEvent::ActiveConfigurationChanged(_) => EventCategory::Configuration,
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ProjectEvent::FileOpened(_) => "file_opened",
            ProjectEvent::FileClosing(_) => "file_closing",
            ProjectEvent::ItemsChanged(_) => "items_changed",
            ProjectEvent::ActiveConfigurationChanged(_) => "active_configuration_changed",
        }
    }

    /// Calls the matching [`ProjectEvents`] method on `sink`.
    pub fn deliver<P: ProjectEvents + ?Sized>(&self, sink: &P) -> Result<(), SinkError> {
        match self {
            ProjectEvent::FileOpened(ev) => sink.on_file_opened(ev),
            ProjectEvent::FileClosing(ev) => sink.on_file_closing(ev),
            ProjectEvent::ItemsChanged(ev) => sink.on_items_changed(ev),
            ProjectEvent::ActiveConfigurationChanged(ev) => {
                sink.on_active_configuration_changed(ev)
            }
        }
    }
}

/// A queued sink can be advised directly; each notification is posted as a
/// [`ProjectEvent`] and handled later by its worker.
impl ProjectEvents for QueuedSink<ProjectEvent> {
    fn on_file_opened(&self, ev: &ProjectFileOpened) -> Result<(), SinkError> {
        self.post(ProjectEvent::FileOpened(ev.clone()))
    }

    fn on_file_closing(&self, ev: &ProjectFileClosing) -> Result<(), SinkError> {
        self.post(ProjectEvent::FileClosing(ev.clone()))
    }

    fn on_items_changed(&self, ev: &ProjectItemsChanged) -> Result<(), SinkError> {
        self.post(ProjectEvent::ItemsChanged(ev.clone()))
    }

    fn on_active_configuration_changed(
        &self,
        ev: &ActiveConfigurationChanged,
    ) -> Result<(), SinkError> {
        self.post(ProjectEvent::ActiveConfigurationChanged(ev.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Journal(Mutex<Vec<&'static str>>);

    impl ProjectEvents for Journal {
        fn on_file_opened(&self, _ev: &ProjectFileOpened) -> Result<(), SinkError> {
            self.0.lock().push("opened");
            Ok(())
        }

        fn on_items_changed(&self, ev: &ProjectItemsChanged) -> Result<(), SinkError> {
            if ev.added.is_empty() && ev.removed.is_empty() {
                return Err(SinkError::rejected("empty change"));
            }
            self.0.lock().push("items");
            Ok(())
        }
    }

    #[test]
    fn test_deliver_routes_to_matching_method() {
        let j = Journal::default();
        ProjectEvent::FileOpened(ProjectFileOpened { added: true })
            .deliver(&j)
            .unwrap();
        ProjectEvent::FileClosing(ProjectFileClosing { removed: false })
            .deliver(&j)
            .unwrap();
        ProjectEvent::ItemsChanged(ProjectItemsChanged {
            added: vec!["a.rs".into()],
            removed: vec![],
        })
        .deliver(&j)
        .unwrap();

        assert_eq!(*j.0.lock(), vec!["opened", "items"]);
    }

    #[test]
    fn test_deliver_surfaces_sink_error() {
        let j = Journal::default();
        let err = ProjectEvent::ItemsChanged(ProjectItemsChanged::default())
            .deliver(&j as &dyn ProjectEvents)
            .unwrap_err();
        assert_eq!(err.as_label(), "sink_rejected");
    }

    #[test]
    fn test_categories() {
        let cfg = ProjectEvent::ActiveConfigurationChanged(ActiveConfigurationChanged {
            configuration: "Debug|x64".into(),
        });
        assert_eq!(cfg.category(), EventCategory::Configuration);
        assert_eq!(cfg.as_label(), "active_configuration_changed");
        assert_eq!(
            ProjectEvent::FileClosing(ProjectFileClosing { removed: true }).category(),
            EventCategory::Hierarchy
        );
        assert_eq!(
            ProjectEvent::ItemsChanged(ProjectItemsChanged::default()).category(),
            EventCategory::Tracker
        );
    }
}
