// Presentation sinks - consumers of scope lifecycle decisions
//
// The matcher only emits typed decisions; a sink turns them into actual
// drawing and teardown. The binary ships a tracing-backed sink; a real
// display backend would implement the same trait.

use tracing::{debug, info, warn};

use crate::scope::LifecycleDecision;

/// Consumer of scope lifecycle decisions
pub trait ScopeSink: Send {
    /// Apply one decision (draw, move, or tear down a blip)
    fn apply(&mut self, decision: &LifecycleDecision);

    /// Called once after all decisions of a render cycle have been
    /// applied, with the number of blips now on screen
    fn cycle_complete(&mut self, blip_count: usize) {
        let _ = blip_count;
    }
}

/// Sink that logs decisions through tracing
pub struct TraceSink {
    last_blip_count: usize,
}

impl TraceSink {
    pub fn new() -> Self {
        TraceSink { last_blip_count: 0 }
    }
}

impl Default for TraceSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeSink for TraceSink {
    fn apply(&mut self, decision: &LifecycleDecision) {
        match decision {
            LifecycleDecision::Create { hex, state } => {
                info!(
                    "Blip created: {} at ({}, {})",
                    hex, state.screen.0, state.screen.1
                );
            }
            LifecycleDecision::Update { hex, state } => {
                debug!(
                    "Blip updated: {} at ({}, {})",
                    hex, state.screen.0, state.screen.1
                );
            }
            LifecycleDecision::Delete { hex } => {
                info!("Blip removed: {}", hex);
            }
            LifecycleDecision::PoolFull { hex } => {
                warn!("Blip pool full, not rendering {}", hex);
            }
        }
    }

    fn cycle_complete(&mut self, blip_count: usize) {
        if blip_count != self.last_blip_count {
            info!("{} aircraft on scope", blip_count);
            self.last_blip_count = blip_count;
        }
    }
}
