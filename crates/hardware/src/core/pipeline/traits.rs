//! Pipeline Latch Interface.
//!
//! Provides the common operations the core performs on every inter-stage buffer:
//! flushing on reset and checking whether a stage currently holds an instruction.

/// Represents a pipeline latch (inter-stage buffer).
///
/// Latches hold the state of an instruction as it moves between stages. They support
/// flushing and status checks.
pub trait PipelineLatch {
    /// Returns the latch to its idle (bubble) state.
    ///
    /// Called while reset is asserted.
    fn flush(&mut self);

    /// Checks if the latch is empty.
    ///
    /// # Returns
    ///
    /// `true` if the latch holds a bubble, `false` otherwise.
    fn is_empty(&self) -> bool;
}
