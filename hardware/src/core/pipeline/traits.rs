//! Pipeline Latch Interface.
//!
//! Defines the common behavior of the latches that connect pipeline stages,
//! so the CPU and the hazard unit can flush, inspect, and report them
//! without caring which boundary they sit on.

use crate::core::pipeline::latches::{ExMem, IdEx, IfId, MemWb};

/// Represents a pipeline latch (inter-stage buffer).
pub trait PipelineLatch {
    /// Replaces the contents with a bubble.
    ///
    /// Called for latches holding wrong-path instructions after a taken
    /// branch or jump, so they never commit state.
    fn flush(&mut self);

    /// Returns `true` if the latch holds a bubble.
    fn is_empty(&self) -> bool;

    /// Returns `true` if the held instruction carries a fault.
    fn has_fault(&self) -> bool;

    /// Program counter of the held instruction, `None` for a bubble.
    fn pc(&self) -> Option<u32>;
}

macro_rules! impl_pipeline_latch {
    ($($latch:ty),* $(,)?) => {
        $(
            impl PipelineLatch for $latch {
                fn flush(&mut self) {
                    self.entry = None;
                }

                fn is_empty(&self) -> bool {
                    self.entry.is_none()
                }

                fn has_fault(&self) -> bool {
                    self.entry.as_ref().is_some_and(|e| e.fault.is_some())
                }

                fn pc(&self) -> Option<u32> {
                    self.entry.as_ref().map(|e| e.pc)
                }
            }
        )*
    };
}

impl_pipeline_latch!(IfId, IdEx, ExMem, MemWb);
