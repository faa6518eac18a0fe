//! A simple priority executor.

use super::{Priority, Task, TaskId};
use alloc::{collections::BTreeMap, sync::Arc};
use core::task::{Context, Poll, Waker};
use crossbeam_queue::ArrayQueue;
use futures_util::task::ArcWake;

/// Ready slots per priority level.
const QUEUE_DEPTH: usize = 100;

/// Runs tasks, highest priority first.
pub struct Executor {
    tasks: BTreeMap<TaskId, Task>,
    ready: [Arc<ArrayQueue<TaskId>>; Priority::COUNT],
    waker_cache: BTreeMap<TaskId, Waker>,
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor {
    /// Creates an executor with no tasks.
    pub fn new() -> Self {
        Executor {
            tasks: BTreeMap::new(),
            ready: core::array::from_fn(|_| Arc::new(ArrayQueue::new(QUEUE_DEPTH))),
            waker_cache: BTreeMap::new(),
        }
    }

    /// Adds a task and marks it ready.
    pub fn spawn(&mut self, task: Task) {
        let task_id = task.id;
        let priority = task.priority as usize;
        if self.tasks.insert(task_id, task).is_some() {
            panic!("task with same ID already in tasks");
        }
        self.ready[priority].push(task_id).expect("ready queue full");
    }

    /// Number of tasks that have not finished.
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Polls ready tasks until none are left ready.
    ///
    /// Tasks still waiting on a waker stay parked.
    pub fn run_until_idle(&mut self) {
        while !self.is_idle() {
            self.run_ready_tasks();
        }
    }

    /// Runs forever, halting the CPU whenever nothing is ready.
    pub fn run(&mut self) -> ! {
        loop {
            self.run_ready_tasks();
            self.sleep_if_idle();
        }
    }

    /// One scheduling pass: every task ready when its level is reached is
    /// polled once. Tasks woken during the pass wait for the next one.
    pub fn run_once(&mut self) {
        self.run_ready_tasks();
    }

    fn is_idle(&self) -> bool {
        self.ready.iter().all(|queue| queue.is_empty())
    }

    fn run_ready_tasks(&mut self) {
        for priority in (0..Priority::COUNT).rev() {
            let queue = &self.ready[priority];

            for _ in 0..queue.len() {
                let Some(task_id) = queue.pop() else { break };
                let task = match self.tasks.get_mut(&task_id) {
                    Some(task) => task,
                    None => continue, // finished earlier, stale wake
                };

                let waker = self
                    .waker_cache
                    .entry(task_id)
                    .or_insert_with(|| TaskWaker::new(task_id, queue.clone()));

                let mut context = Context::from_waker(waker);
                if let Poll::Ready(()) = task.poll(&mut context) {
                    self.tasks.remove(&task_id);
                    self.waker_cache.remove(&task_id);
                }
            }
        }
    }

    #[cfg(target_arch = "x86_64")]
    fn sleep_if_idle(&self) {
        use x86_64::instructions::interrupts;

        interrupts::disable();
        if self.is_idle() {
            interrupts::enable_and_hlt();
        } else {
            interrupts::enable();
        }
    }

    #[cfg(not(target_arch = "x86_64"))]
    fn sleep_if_idle(&self) {
        core::hint::spin_loop();
    }
}

struct TaskWaker {
    task_id: TaskId,
    queue: Arc<ArrayQueue<TaskId>>,
}

impl TaskWaker {
    #[allow(clippy::new_ret_no_self)]
    fn new(task_id: TaskId, queue: Arc<ArrayQueue<TaskId>>) -> Waker {
        futures_util::task::waker(Arc::new(TaskWaker { task_id, queue }))
    }
}

impl ArcWake for TaskWaker {
    fn wake_by_ref(arc_self: &Arc<Self>) {
        if arc_self.queue.push(arc_self.task_id).is_err() {
            log::warn!("executor: ready queue full, wake lost");
        }
    }
}
