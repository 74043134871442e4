//! Allocation that reports failure to the caller instead of aborting the
//! process. `Box::new` and `String::from` call `handle_alloc_error` when the
//! global allocator returns null; everything the queue allocates goes through
//! here instead.

use std::alloc::{self, Layout};
use std::ptr::{self, NonNull};

use tracing::debug;

use crate::error::{QueueError, QueueResult};

/// Moves `value` onto the heap. On failure `value` is dropped before
/// returning, so nothing it owned stays allocated.
pub(crate) fn try_box<T>(value: T) -> QueueResult<Box<T>> {
    let layout = Layout::new::<T>();
    if layout.size() == 0 {
        return Ok(Box::new(value));
    }

    // SAFETY: `layout` has a non-zero size.
    let raw = unsafe { alloc::alloc(layout) } as *mut T;
    match NonNull::new(raw) {
        // SAFETY: `slot` was allocated by the global allocator with the layout
        // of `T`, which is exactly what `Box::from_raw` expects.
        Some(slot) => unsafe {
            ptr::write(slot.as_ptr(), value);
            Ok(Box::from_raw(slot.as_ptr()))
        },
        None => {
            debug!(bytes = layout.size(), "record allocation failed");
            Err(QueueError::AllocationFailure {
                bytes: layout.size(),
            })
        }
    }
}

/// Copies `s` into freshly allocated storage that the caller owns outright.
pub(crate) fn try_copy(s: &str) -> QueueResult<String> {
    let mut owned = String::new();
    owned.try_reserve_exact(s.len()).map_err(|_| {
        debug!(bytes = s.len(), "string allocation failed");
        QueueError::AllocationFailure { bytes: s.len() }
    })?;
    owned.push_str(s);
    Ok(owned)
}
