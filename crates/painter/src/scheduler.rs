//! Delayed one-shot tasks driven by a manual clock
//!
//! The host advances time every frame; tasks whose deadline has passed are
//! handed back in deadline order (ties keep scheduling order).

use tracing::debug;

/// Work the painter defers to a later frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PainterTask {
    /// Read back the canvas and swap the material texture
    Bake,
    /// End the bake cycle and let the cursor show again
    RestoreCursor,
}

#[derive(Debug, Clone, Copy)]
struct ScheduledTask {
    due: f64,
    seq: u64,
    task: PainterTask,
}

/// One-shot task queue with its own clock, in seconds
#[derive(Debug, Default)]
pub struct Scheduler {
    now: f64,
    next_seq: u64,
    pending: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock value in seconds
    #[inline]
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Run `task` once, `delay` seconds from now
    pub fn schedule(&mut self, delay: f32, task: PainterTask) {
        let due = self.now + f64::from(delay.max(0.0));
        debug!("Scheduler::schedule({:?}) at t={:.3}, due {:.3}", task, self.now, due);
        self.pending.push(ScheduledTask {
            due,
            seq: self.next_seq,
            task,
        });
        self.next_seq += 1;
    }

    /// Advance the clock and return every task that became due
    pub fn advance(&mut self, dt: f32) -> Vec<PainterTask> {
        self.now += f64::from(dt.max(0.0));
        self.take_due()
    }

    /// Tasks due at the current time, removed from the queue
    pub fn take_due(&mut self) -> Vec<PainterTask> {
        let now = self.now;
        let mut due: Vec<ScheduledTask> = Vec::new();
        self.pending.retain(|scheduled| {
            if scheduled.due <= now {
                due.push(*scheduled);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|scheduled| scheduled.task).collect()
    }

    /// Number of tasks still waiting
    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_scheduled(&self, task: PainterTask) -> bool {
        self.pending.iter().any(|scheduled| scheduled.task == task)
    }
}
