//! Deferred measurement
//!
//! Synchronous DOM reads are expensive when interleaved with writes. The
//! scheduler collects reads into a single measure phase per frame and
//! [`measure_promise`] turns one such read into a future.
//!
//! - `MeasureScheduler`: the consumed primitive, anything that can run a
//!   read during its next measure phase
//! - `Measurement`: the future handed back to callers
//! - `BatchScheduler`: an in-process scheduler with measure and mutate queues

mod batch;

pub use batch::BatchScheduler;

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_channel::oneshot;

use crate::error::ViewportError;

/// A unit of work queued on a scheduler
pub type Task = Box<dyn FnOnce()>;

/// Runs reads during its next measure phase
pub trait MeasureScheduler {
    /// Queue `task` for the next measure phase
    ///
    /// All tasks queued before a phase starts observe the same DOM snapshot.
    /// A scheduler that drops `task` without running it cancels the
    /// corresponding [`Measurement`].
    fn schedule_measure(&self, task: Task);
}

/// Schedule `read` for the next measure phase and return its future result
pub fn measure_promise<T, F>(scheduler: &dyn MeasureScheduler, read: F) -> Measurement<T>
where
    T: 'static,
    F: FnOnce() -> T + 'static,
{
    let (tx, rx) = oneshot::channel();
    scheduler.schedule_measure(Box::new(move || {
        // The caller may have dropped the measurement; nothing to deliver then.
        let _ = tx.send(read());
    }));
    Measurement { rx }
}

/// Result of a deferred read
///
/// Resolves when the scheduler runs the read, or with
/// [`ViewportError::MeasureCanceled`] if the read is dropped unrun.
#[must_use = "measurements do nothing unless awaited"]
#[derive(Debug)]
pub struct Measurement<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> Measurement<T> {
    /// A measurement that is already resolved
    pub fn ready(value: T) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(value);
        Self { rx }
    }

    /// Take the value without waiting
    ///
    /// Returns `Ok(None)` while the read is still queued.
    pub fn try_take(&mut self) -> Result<Option<T>, ViewportError> {
        self.rx
            .try_recv()
            .map_err(|_| ViewportError::MeasureCanceled)
    }
}

impl<T> Future for Measurement<T> {
    type Output = Result<T, ViewportError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|result| result.map_err(|_| ViewportError::MeasureCanceled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_measurement_ready() {
        let m = Measurement::ready(5);
        assert_eq!(block_on(m), Ok(5));
    }

    #[test]
    fn test_measure_promise_resolves_on_flush() {
        let scheduler = BatchScheduler::new();
        let mut m = measure_promise(&scheduler, || 42);

        assert_eq!(m.try_take(), Ok(None));
        scheduler.flush();
        assert_eq!(m.try_take(), Ok(Some(42)));
    }

    #[test]
    fn test_measure_promise_reads_lazily() {
        let scheduler = BatchScheduler::new();
        let value = Rc::new(Cell::new(1));

        let v = Rc::clone(&value);
        let m = measure_promise(&scheduler, move || v.get());
        value.set(2);
        scheduler.flush();

        assert_eq!(block_on(m), Ok(2));
    }

    #[test]
    fn test_measure_promise_canceled_when_dropped() {
        let scheduler = BatchScheduler::new();
        let m = measure_promise(&scheduler, || 1);
        scheduler.discard();
        assert_eq!(block_on(m), Err(ViewportError::MeasureCanceled));
    }
}
