//! # Project events: a ready-made contract and its source.
//!
//! ## Contents
//! - [`ProjectEvents`] sink contract (file opened / closing, items changed,
//!   active configuration changed) and the [`ProjectEvent`] value form
//! - [`ProjectEventsSource`] host-side source with sink tracking and suppression
//! - [`EventTriggering`], [`EventCategory`] suppression flags
//!
//! ## Wiring
//! ```text
//! ProjectEventsSource ──register_event_source::<dyn ProjectEvents>──► ContainerBuilder
//!        │                                                                │ build()
//!        │ raise(point, event)                                            ▼
//!        └──────────────────────────────► ConnectionPoint<dyn ProjectEvents> ──► sinks
//! ```

mod events;
mod source;
mod triggering;

pub use events::{
    ActiveConfigurationChanged, ProjectEvent, ProjectEvents, ProjectFileClosing,
    ProjectFileOpened, ProjectItemsChanged,
};
pub use source::{ProjectEventsSource, TriggeringGuard};
pub use triggering::{EventCategory, EventTriggering};
