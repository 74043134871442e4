use std::fmt;
use std::iter;
use std::marker::PhantomData;
use std::ptr::NonNull;

use tracing::trace;

use crate::error::{QueueError, QueueResult};
use crate::fallible::{try_box, try_copy};

type Link = Option<NonNull<Element>>;

struct Element {
    value: String,
    next: Link,
}

/// A queue of owned strings on a singly-linked list.
///
/// Elements can be inserted at either end and are only ever removed from the
/// head, so inserting at the tail gives FIFO order and inserting at the head
/// gives LIFO order.
///
/// Every element is a leaked `Box` owned by the queue and reachable from
/// `head`. `tail` points at the last of them and is `None` exactly when
/// `head` is.
pub struct Queue {
    head: Link,
    tail: Link,
    size: usize,
    _owns: PhantomData<Box<Element>>,
}

// SAFETY: the queue is the only owner of every element it links, so moving it
// to another thread moves everything its pointers can reach with it.
unsafe impl Send for Queue {}

/// Hands ownership of `element` to the list; only `reclaim` gives it back.
fn link(element: Box<Element>) -> NonNull<Element> {
    NonNull::from(Box::leak(element))
}

/// # Safety
///
/// `node` must come from `link` and must no longer be reachable from the
/// queue once the returned box is used.
unsafe fn reclaim(node: NonNull<Element>) -> Box<Element> {
    Box::from_raw(node.as_ptr())
}

impl Queue {
    pub fn new() -> Self {
        Queue {
            head: None,
            tail: None,
            size: 0,
            _owns: PhantomData,
        }
    }

    /// Allocates an empty queue record on the heap, reporting allocation
    /// failure instead of aborting.
    pub fn try_boxed() -> QueueResult<Box<Queue>> {
        try_box(Queue::new())
    }

    /// Copies `s` and links it in front of the current head.
    ///
    /// On error the queue is left untouched and nothing stays allocated.
    pub fn insert_head(&mut self, s: &str) -> QueueResult<()> {
        let value = try_copy(s)?;
        let element = try_box(Element {
            value,
            next: self.head,
        })?;
        let node = link(element);

        if self.tail.is_none() {
            self.tail = Some(node);
        }
        self.head = Some(node);
        self.size += 1;

        trace!(size = self.size, "inserted at head");
        Ok(())
    }

    /// Copies `s` and links it after the current tail.
    ///
    /// On error the queue is left untouched and nothing stays allocated.
    pub fn insert_tail(&mut self, s: &str) -> QueueResult<()> {
        let value = try_copy(s)?;
        let element = try_box(Element { value, next: None })?;
        let node = link(element);

        match self.tail {
            // SAFETY: `tail` is a live element owned by this queue, and
            // `&mut self` guarantees nobody else is reading it.
            Some(tail) => unsafe { (*tail.as_ptr()).next = Some(node) },
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.size += 1;

        trace!(size = self.size, "inserted at tail");
        Ok(())
    }

    /// Removes the head element and copies its string into `buf` as a
    /// NUL-terminated byte string.
    ///
    /// At most `buf.len() - 1` bytes of the string are copied; anything longer
    /// is silently truncated. Returns the number of string bytes written,
    /// not counting the terminator.
    pub fn remove_head(&mut self, buf: &mut [u8]) -> QueueResult<usize> {
        if buf.is_empty() {
            return Err(QueueError::InvalidArgument("output buffer has no capacity"));
        }
        let value = self.pop_front().ok_or(QueueError::Empty)?;

        let copied = value.len().min(buf.len() - 1);
        buf[..copied].copy_from_slice(&value.as_bytes()[..copied]);
        buf[copied] = 0;

        if copied < value.len() {
            trace!(len = value.len(), copied, "truncated removed string");
        }
        Ok(copied)
    }

    /// Removes the head element and hands its string back.
    pub fn pop_front(&mut self) -> Option<String> {
        self.head.map(|node| {
            // SAFETY: `node` is the head, and it is unlinked right below
            // before anything else can observe it.
            let Element { value, next } = *unsafe { reclaim(node) };
            self.head = next;
            self.size -= 1;
            if self.head.is_none() {
                self.tail = None;
            }
            trace!(size = self.size, "removed head");
            value
        })
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn front(&self) -> Option<&str> {
        // SAFETY: linked elements live until removed through `&mut self`.
        self.head.map(|head| unsafe { (*head.as_ptr()).value.as_str() })
    }

    pub fn back(&self) -> Option<&str> {
        // SAFETY: linked elements live until removed through `&mut self`.
        self.tail.map(|tail| unsafe { (*tail.as_ptr()).value.as_str() })
    }

    /// Reverses the queue in place by relinking the existing elements.
    /// Nothing is allocated or freed.
    pub fn reverse(&mut self) {
        if self.size < 2 {
            return;
        }

        let mut remaining = self.head;
        let mut reversed: Link = None;
        while let Some(node) = remaining {
            // SAFETY: every node on the chain is a live element owned by this
            // queue, and `&mut self` excludes other readers.
            unsafe {
                remaining = (*node.as_ptr()).next;
                (*node.as_ptr()).next = reversed;
            }
            reversed = Some(node);
        }
        self.tail = self.head;
        self.head = reversed;

        trace!(size = self.size, "reversed");
    }

    fn nodes(&self) -> impl Iterator<Item = NonNull<Element>> + '_ {
        // SAFETY: linked elements live until removed through `&mut self`.
        iter::successors(self.head, |node| unsafe { (*node.as_ptr()).next })
    }

    fn values(&self) -> impl Iterator<Item = &str> {
        // SAFETY: as in `nodes`.
        self.nodes().map(|node| unsafe { (*node.as_ptr()).value.as_str() })
    }
}

impl Default for Queue {
    fn default() -> Self {
        Queue::new()
    }
}

impl Drop for Queue {
    fn drop(&mut self) {
        self.tail = None;
        let mut cursor = self.head.take();
        while let Some(node) = cursor {
            // SAFETY: `head` was taken, so the rest of the chain is owned by
            // this loop alone.
            cursor = unsafe { reclaim(node) }.next;
        }
    }
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values()).finish()
    }
}
