use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::core::Config;
use crate::error::{ConnectionError, Result};
use crate::points::{Connectable, ConnectionPoint, EventSource, Iid, Interface};

use super::container::ConnectionPointContainer;

/// Builder for constructing a [`ConnectionPointContainer`].
///
/// This is the "unpopulated" state: event sources are registered here, and
/// [`build`](Self::build) freezes the set of identities.
pub struct ContainerBuilder {
    cfg: Config,
    points: Vec<Arc<dyn Connectable>>,
    index: HashMap<Iid, usize>,
}

impl ContainerBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            points: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Creates a connection point for contract `S` backed by `source`.
    ///
    /// # Errors
    /// [`ConnectionError::DuplicateRegistration`] if `S::IID` is already registered.
    pub fn register_event_source<S: Interface + ?Sized>(
        self,
        source: Arc<dyn EventSource<S>>,
    ) -> Result<Self> {
        let point = Arc::new(ConnectionPoint::<S>::with_config(source, &self.cfg));
        self.register_connection_point(point)
    }

    /// Adds an already constructed connection point.
    ///
    /// # Errors
    /// [`ConnectionError::DuplicateRegistration`] if its identity is already registered.
    pub fn register_connection_point(mut self, point: Arc<dyn Connectable>) -> Result<Self> {
        let iid = point.iid();
        if self.index.contains_key(&iid) {
            return Err(ConnectionError::DuplicateRegistration { iid });
        }
        debug!(%iid, contract = point.name(), "connection point registered");
        self.index.insert(iid, self.points.len());
        self.points.push(point);
        Ok(self)
    }

    /// Configuration handed to points created by this builder.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Builds and returns the container.
    ///
    /// The set of identities is fixed from here on; only subscriptions change.
    pub fn build(self) -> ConnectionPointContainer {
        ConnectionPointContainer::new_internal(self.cfg, self.points, self.index)
    }
}
