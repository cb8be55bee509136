//! Execution context and its configuration.
//!
//! - [`config`]: executor settings;
//! - [`executor`]: runtime handle + event bus shared by all task launches;
//! - [`builder`]: wiring of handle, bus and subscribers.

mod builder;
mod config;
mod executor;

pub use builder::ExecutorBuilder;
pub use config::Config;
pub use executor::Executor;
