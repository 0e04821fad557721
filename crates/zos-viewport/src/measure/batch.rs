//! Frame-batched scheduler
//!
//! Keeps separate measure and mutate queues. A flush runs every queued
//! measure task, then every queued mutate task, so no write lands between
//! two reads of the same batch.

use std::cell::RefCell;
use std::mem;

use super::{MeasureScheduler, Task};

/// In-process measure/mutate scheduler
///
/// The host decides when to flush. In the browser that is once per
/// animation frame; the optional wakeup hook fires when the first task is
/// queued after a flush so the host can request that frame.
#[derive(Default)]
pub struct BatchScheduler {
    measures: RefCell<Vec<Task>>,
    mutates: RefCell<Vec<Task>>,
    wakeup: Option<Box<dyn Fn()>>,
}

impl BatchScheduler {
    /// Create a scheduler flushed manually
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scheduler that calls `wakeup` whenever it goes from idle to
    /// having work queued
    pub fn with_wakeup(wakeup: impl Fn() + 'static) -> Self {
        Self {
            wakeup: Some(Box::new(wakeup)),
            ..Self::default()
        }
    }

    /// Queue a read
    pub fn measure(&self, task: impl FnOnce() + 'static) {
        self.push(&self.measures, Box::new(task));
    }

    /// Queue a write
    pub fn mutate(&self, task: impl FnOnce() + 'static) {
        self.push(&self.mutates, Box::new(task));
    }

    /// Number of queued tasks
    pub fn pending(&self) -> usize {
        self.measures.borrow().len() + self.mutates.borrow().len()
    }

    /// Run every queued measure task, then every queued mutate task
    ///
    /// Tasks queued while flushing wait for the next flush. Returns the number
    /// of tasks run.
    pub fn flush(&self) -> usize {
        let measures = mem::take(&mut *self.measures.borrow_mut());
        let mutates = mem::take(&mut *self.mutates.borrow_mut());
        let ran = measures.len() + mutates.len();

        for task in measures {
            task();
        }
        for task in mutates {
            task();
        }
        ran
    }

    /// Drop every queued task without running it
    pub fn discard(&self) {
        self.measures.borrow_mut().clear();
        self.mutates.borrow_mut().clear();
    }

    fn push(&self, queue: &RefCell<Vec<Task>>, task: Task) {
        let was_idle = self.pending() == 0;
        queue.borrow_mut().push(task);
        if was_idle {
            if let Some(wakeup) = &self.wakeup {
                wakeup();
            }
        }
    }
}

impl MeasureScheduler for BatchScheduler {
    fn schedule_measure(&self, task: Task) {
        self.push(&self.measures, task);
    }
}
