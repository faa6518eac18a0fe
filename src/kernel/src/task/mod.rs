//! Cooperative task runtime.
//!
//! The keyboard dispatcher and terminal readers run as futures on the
//! [`executor::Executor`]; a reader waiting for a line costs nothing until
//! the dispatcher queues one for its terminal.

use alloc::boxed::Box;
use core::{
    future::Future,
    pin::Pin,
    sync::atomic::{AtomicU64, Ordering},
    task::{Context, Poll},
};

pub mod executor;
pub mod keyboard;

/// A unique identifier for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    fn new() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        TaskId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Task priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    /// Runs only when nothing else is ready.
    Idle = 0,
    /// Terminal readers and most other work.
    Normal = 1,
    /// Input dispatch.
    High = 2,
    /// Reserved for the kernel itself.
    Critical = 3,
}

impl Priority {
    /// Number of levels.
    pub const COUNT: usize = 4;
}

/// A future scheduled on the executor.
pub struct Task {
    id: TaskId,
    priority: Priority,
    future: Pin<Box<dyn Future<Output = ()>>>,
}

impl Task {
    /// Wraps a future at Normal priority.
    pub fn new(future: impl Future<Output = ()> + 'static) -> Task {
        Self::with_priority(future, Priority::Normal)
    }

    /// Wraps a future at the given priority.
    pub fn with_priority(future: impl Future<Output = ()> + 'static, priority: Priority) -> Task {
        Task {
            id: TaskId::new(),
            priority,
            future: Box::pin(future),
        }
    }

    /// This task's identifier.
    pub fn id(&self) -> TaskId {
        self.id
    }

    fn poll(&mut self, context: &mut Context) -> Poll<()> {
        self.future.as_mut().poll(context)
    }
}
