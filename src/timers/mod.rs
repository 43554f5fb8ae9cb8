//! Cooperative timer queue
//!
//! A virtual-time macrotask queue providing the schedule-after-delay and
//! cancel-scheduled facility the function combinators are built on. All
//! execution is single-threaded: callbacks run strictly after the
//! synchronous call that advances time, never re-entrantly.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::trace;

/// Callback invoked when a timer fires
pub type TimerCallback = Rc<dyn Fn() -> Result<()>>;

/// A scheduled task
struct TimerTask {
    /// Unique timer ID
    id: u64,
    /// When the task should fire (virtual time in ms)
    fire_at: u64,
    /// Is this task cancelled?
    cancelled: bool,
    callback: TimerCallback,
}

/// Runtime statistics for the timer queue
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimerStats {
    /// Total timers scheduled
    pub scheduled: u64,
    /// Total timers fired
    pub fired: u64,
    /// Total timers cancelled before firing
    pub cancelled: u64,
}

struct TimerQueue {
    tasks: Vec<TimerTask>,
    /// Current virtual time in milliseconds
    virtual_time: u64,
    /// Next timer ID
    next_timer_id: u64,
    stats: TimerStats,
}

/// Cheaply cloneable handle to a timer queue
#[derive(Clone)]
pub struct Timers {
    queue: Rc<RefCell<TimerQueue>>,
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}

impl Timers {
    /// Create a new timer queue at virtual time 0
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(TimerQueue {
                tasks: Vec::new(),
                virtual_time: 0,
                next_timer_id: 1,
                stats: TimerStats::default(),
            })),
        }
    }

    /// Get current virtual time
    pub fn now(&self) -> u64 {
        self.queue.borrow().virtual_time
    }

    /// Schedule a callback to fire after `delay` milliseconds
    pub fn schedule(&self, delay: u64, callback: impl Fn() -> Result<()> + 'static) -> u64 {
        let mut queue = self.queue.borrow_mut();

        let id = queue.next_timer_id;
        queue.next_timer_id += 1;

        let fire_at = queue.virtual_time + delay;
        trace!(id, fire_at, "timer scheduled");

        queue.tasks.push(TimerTask {
            id,
            fire_at,
            cancelled: false,
            callback: Rc::new(callback),
        });
        queue.stats.scheduled += 1;

        id
    }

    /// Cancel a timer by ID; unknown or already-fired ids are a no-op
    pub fn cancel(&self, id: u64) {
        let mut queue = self.queue.borrow_mut();
        let queue = &mut *queue;

        for task in &mut queue.tasks {
            if task.id == id && !task.cancelled {
                task.cancelled = true;
                queue.stats.cancelled += 1;
                trace!(id, "timer cancelled");
                break;
            }
        }
    }

    /// Check if any non-cancelled task is scheduled
    pub fn has_pending(&self) -> bool {
        self.queue.borrow().tasks.iter().any(|t| !t.cancelled)
    }

    /// Fire time of the next scheduled task
    pub fn next_fire_time(&self) -> Option<u64> {
        self.queue
            .borrow()
            .tasks
            .iter()
            .filter(|t| !t.cancelled)
            .map(|t| t.fire_at)
            .min()
    }

    /// Runtime statistics snapshot
    pub fn stats(&self) -> TimerStats {
        self.queue.borrow().stats.clone()
    }

    /// Advance virtual time by `ms`, firing every task that comes due
    ///
    /// Tasks fire in (fire-time, schedule-order) order, and a fired task may
    /// schedule further tasks inside the advanced window; those fire too.
    /// The first callback error stops the advance and propagates; the
    /// remaining due tasks stay queued.
    pub fn advance_time(&self, ms: u64) -> Result<()> {
        let target = self.now() + ms;

        loop {
            let due = {
                let mut queue = self.queue.borrow_mut();

                let due_idx = queue
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| !t.cancelled && t.fire_at <= target)
                    .min_by_key(|(_, t)| t.fire_at)
                    .map(|(idx, _)| idx);

                match due_idx {
                    Some(idx) => {
                        let task = queue.tasks.remove(idx);
                        queue.virtual_time = queue.virtual_time.max(task.fire_at);
                        queue.stats.fired += 1;
                        Some(task)
                    }
                    None => {
                        queue.tasks.retain(|t| !t.cancelled);
                        queue.virtual_time = target;
                        None
                    }
                }
            };

            match due {
                Some(task) => {
                    trace!(id = task.id, at = task.fire_at, "timer fired");
                    (task.callback)()?;
                }
                None => return Ok(()),
            }
        }
    }

    /// Advance through all pending work until the queue is empty
    pub fn run_until_idle(&self) -> Result<()> {
        while let Some(fire_at) = self.next_fire_time() {
            let now = self.now();
            self.advance_time(fire_at.saturating_sub(now))?;
        }
        Ok(())
    }
}
