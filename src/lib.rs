mod error;
mod fallible;
pub mod handle;
mod queue;

pub use error::{QueueError, QueueResult};
pub use queue::Queue;

/// Fills a queue from both ends, reverses it and drains it again. Returns the
/// number of strings drained.
pub fn mixed_workload(elems: usize) -> QueueResult<usize> {
    let mut queue = Queue::new();

    for elem in 0..elems {
        let s = elem.to_string();
        if elem % 2 == 0 {
            queue.insert_tail(&s)?;
        } else {
            queue.insert_head(&s)?;
        }
    }

    queue.reverse();

    drain(&mut queue, &mut [0u8; 32])
}

/// Removes heads into `buf` until the queue runs dry. Any failure other than
/// running dry is passed up.
fn drain(queue: &mut Queue, buf: &mut [u8]) -> QueueResult<usize> {
    let mut drained = 0;
    loop {
        match queue.remove_head(buf) {
            Ok(_) => drained += 1,
            Err(QueueError::Empty) => return Ok(drained),
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
static SOME_ELEMS: usize = 10;
#[cfg(test)]
static MANY_ELEMS: usize = 100_000;
#[cfg(test)]
static NUM_THREADS: usize = 4;
#[cfg(test)]
static ELEMS_PER_THREAD: usize = MANY_ELEMS / NUM_THREADS;
