//! Custom actions for the counter actor.

/// Operations on a [`SequenceCounter`](super::SequenceCounter) beyond plain reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterAction {
    /// Returns the stored value and stores `value + 1`.
    FetchAndIncrement,
}
