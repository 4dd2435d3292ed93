//! # Example: project_events
//!
//! Demonstrates a host wiring a project-events connection point and clients
//! subscribing inline and queued sinks.
//!
//! Shows how to:
//! - Register a [`ProjectEventsSource`] on a [`ConnectionPointContainer`].
//! - Advise a sink through the untyped [`Connectable`] surface.
//! - Suppress hierarchy events while "reloading".
//! - Disconnect everything on shutdown.
//!
//! ## Run
//! ```bash
//! cargo run --example project_events
//! ```

use std::sync::Arc;

use connpoint::{
    AsyncSink, Config, ConnectionPointContainer, EventTriggering, Interface, LogWriter,
    ProjectEvent, ProjectEvents, ProjectEventsSource, QueuedSink, Unknown,
};

/// Counts queued events; stands in for a slow consumer (index, UI refresh...).
struct Indexer;

#[async_trait::async_trait]
impl AsyncSink<ProjectEvent> for Indexer {
    async fn on_event(&self, event: &ProjectEvent) {
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        println!("[indexer] {}", event.as_label());
    }

    fn name(&self) -> &'static str {
        "indexer"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let source = Arc::new(ProjectEventsSource::new());
    let container = ConnectionPointContainer::builder(Config::default())
        .register_event_source::<dyn ProjectEvents>(source.clone())?
        .build();

    // A client that only knows the identity goes through the untyped surface.
    let untyped = container.find_connection_point(<dyn ProjectEvents as Interface>::IID)?;
    untyped.advise_unknown(&Unknown::of::<dyn ProjectEvents>(Arc::new(LogWriter::new())))?;

    let point = container.connection_point::<dyn ProjectEvents>()?;
    let indexer = Arc::new(QueuedSink::<ProjectEvent>::spawn(Arc::new(Indexer)));
    point.advise(indexer.clone())?;

    source.signal_open_status(&point, true)?;
    {
        let _reload = source.suppress(EventTriggering::DO_NOT_TRIGGER_HIERARCHY_EVENTS);
        source.signal_open_status(&point, false)?;
        source.signal_open_status(&point, true)?;
    }
    source.signal_items_changed(&point, vec!["src/lib.rs".into()], vec![])?;
    source.signal_configuration_changed(&point, "Release|x64")?;
    source.signal_open_status(&point, false)?;

    for conn in point.enumerate_connections() {
        println!("connected: cookie={}", conn.cookie);
    }

    let removed = container.disconnect_all();
    indexer.shutdown().await;
    println!("disconnected {removed} sinks; still registered: {}", source.is_sink_registered());
    Ok(())
}
