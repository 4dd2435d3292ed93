//! Container core: configuration, construction and lookup.
//!
//! Public API from this module:
//! - [`Config`]: settings shared by every point of a container;
//! - [`ContainerBuilder`]: registers event sources (the unpopulated state);
//! - [`ConnectionPointContainer`]: the frozen identity → point map.

mod builder;
mod config;
mod container;

pub use builder::ContainerBuilder;
pub use config::Config;
pub use container::ConnectionPointContainer;
