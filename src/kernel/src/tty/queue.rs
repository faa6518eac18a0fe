//! Completed-line queue between the dispatcher and a terminal's readers.

use alloc::vec::Vec;
use core::task::{Context, Poll};
use crossbeam_queue::ArrayQueue;
use futures_util::task::AtomicWaker;

/// Lines finished on one terminal and not yet read.
///
/// The dispatcher pushes, readers pop. When full, the oldest line goes.
pub struct LineQueue {
    lines: ArrayQueue<Vec<u8>>,
    waker: AtomicWaker,
}

impl LineQueue {
    /// Creates a queue holding up to `depth` lines.
    pub fn new(depth: usize) -> Self {
        LineQueue {
            lines: ArrayQueue::new(depth.max(1)),
            waker: AtomicWaker::new(),
        }
    }

    /// Queues a finished line and wakes the waiting reader.
    ///
    /// Returns the line that had to be evicted to make room, if any.
    pub fn push(&self, line: Vec<u8>) -> Option<Vec<u8>> {
        let evicted = self.lines.force_push(line);
        self.waker.wake();
        evicted
    }

    /// Takes the oldest line, if any.
    pub fn pop(&self) -> Option<Vec<u8>> {
        self.lines.pop()
    }

    /// Number of queued lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when no line is waiting.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Takes the oldest line, or registers `cx` to be woken by the next push.
    pub fn poll_pop(&self, cx: &mut Context<'_>) -> Poll<Vec<u8>> {
        // fast path
        if let Some(line) = self.lines.pop() {
            return Poll::Ready(line);
        }

        self.waker.register(cx.waker());
        match self.lines.pop() {
            Some(line) => {
                self.waker.take();
                Poll::Ready(line)
            }
            None => Poll::Pending,
        }
    }
}
