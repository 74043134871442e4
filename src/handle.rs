//! Queue operations over a queue reference that may be absent.
//!
//! Every function here accepts `None` in place of the queue and answers with
//! a failure or a no-op, never a panic. Callers that always hold a queue can
//! use the methods on [`Queue`] directly.

use tracing::debug;

use crate::error::{QueueError, QueueResult};
use crate::queue::Queue;

/// Allocates a new, empty queue.
pub fn create() -> QueueResult<Box<Queue>> {
    let queue = Queue::try_boxed()?;
    debug!("queue created");
    Ok(queue)
}

/// Releases every element of `queue`, then the queue record itself.
pub fn destroy(queue: Option<Box<Queue>>) {
    if let Some(queue) = queue {
        debug!(size = queue.len(), "queue destroyed");
        drop(queue);
    }
}

pub fn insert_head(queue: Option<&mut Queue>, s: &str) -> QueueResult<()> {
    queue.ok_or(QueueError::InvalidArgument("queue is absent"))?.insert_head(s)
}

pub fn insert_tail(queue: Option<&mut Queue>, s: &str) -> QueueResult<()> {
    queue.ok_or(QueueError::InvalidArgument("queue is absent"))?.insert_tail(s)
}

/// Removes the head element, copying its string into `buf` truncated to
/// `buf.len() - 1` bytes plus a NUL terminator.
///
/// Fails without touching the queue if either argument is absent or the
/// queue is empty.
pub fn remove_head(queue: Option<&mut Queue>, buf: Option<&mut [u8]>) -> QueueResult<usize> {
    let queue = queue.ok_or(QueueError::InvalidArgument("queue is absent"))?;
    if queue.is_empty() {
        return Err(QueueError::Empty);
    }
    let buf = buf.ok_or(QueueError::InvalidArgument("output buffer is absent"))?;
    queue.remove_head(buf)
}

pub fn size(queue: Option<&Queue>) -> usize {
    queue.map_or(0, Queue::len)
}

pub fn reverse(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        queue.reverse();
    }
}
