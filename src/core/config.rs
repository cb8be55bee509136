//! # Executor configuration.
//!
//! [`Config`] is passed to [`ExecutorBuilder::new`](crate::ExecutorBuilder::new).
//!
//! ## Sentinel values
//! - `bus_capacity = 0` → clamped to 1 by [`Config::bus_capacity_clamped`]

/// Settings for an [`Executor`](crate::Executor).
///
/// All fields are public; prefer the accessors over re-checking sentinels.
#[derive(Clone, Debug)]
pub struct Config {
    /// Capacity of the event bus broadcast ring buffer.
    ///
    /// Receivers lagging more than `bus_capacity` events skip the oldest ones.
    pub bus_capacity: usize,
}

impl Config {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// `bus_capacity = 1024`.
    fn default() -> Self {
        Self { bus_capacity: 1024 }
    }
}
