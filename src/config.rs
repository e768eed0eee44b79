//! Configuration for the planning pipeline.

/// Configuration threaded through the planning pipeline.
#[derive(Clone, Debug)]
pub struct PlanConfig {
    /// Verbosity level: 0=silent, 1=passes, 2=tasks, 3=debug.
    pub verbosity: u8,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self { verbosity: 0 }
    }
}
