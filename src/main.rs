use crossbeam_utils::thread;
use std::error::Error;
use std::ffi::CStr;
use std::sync::{Mutex, PoisonError};
use string_queue::{handle, Queue};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut queue = handle::create()?;
    handle::insert_tail(Some(&mut *queue), "a")?;
    handle::insert_tail(Some(&mut *queue), "b")?;
    handle::insert_head(Some(&mut *queue), "c")?;
    info!(size = handle::size(Some(&*queue)), "filled");

    let mut buf = [0u8; 16];
    while handle::remove_head(Some(&mut *queue), Some(&mut buf[..])).is_ok() {
        let value = CStr::from_bytes_until_nul(&buf)?;
        info!(?value, "removed");
    }
    handle::destroy(Some(queue));

    // The queue does no locking of its own; sharing it means wrapping it.
    let shared = Mutex::new(Queue::new());
    let results = thread::scope(|s| {
        let handles: Vec<_> = (1..4)
            .map(|i| {
                let shared = &shared;
                s.spawn(move |_| {
                    let mut queue = shared.lock().unwrap_or_else(PoisonError::into_inner);
                    let value = format!("worker {}", i);
                    if i % 2 == 0 {
                        queue.insert_head(&value)
                    } else {
                        queue.insert_tail(&value)
                    }
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join())
            .collect::<Vec<_>>()
    })
    .map_err(|_| "worker thread panicked")?;

    for result in results {
        result.map_err(|_| "worker thread panicked")??;
    }

    let mut queue = shared.into_inner().unwrap_or_else(PoisonError::into_inner);
    info!(queue = ?queue, "before reverse");
    queue.reverse();
    info!(queue = ?queue, "after reverse");

    Ok(())
}
