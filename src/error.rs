use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// An argument the operation requires was absent or unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The allocator could not provide `bytes` bytes.
    #[error("allocation of {bytes} bytes failed")]
    AllocationFailure { bytes: usize },

    /// Head removal on a queue with no elements.
    #[error("queue is empty")]
    Empty,
}

pub type QueueResult<T> = Result<T, QueueError>;
