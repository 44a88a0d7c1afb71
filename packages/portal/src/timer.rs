use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::{Instant, MissedTickBehavior};

/// Callback fired on every tick of a repeating timer.
pub type Tick = Arc<dyn Fn() + Send + Sync>;

/// Starts repeating timers.
pub trait Scheduler: Send + Sync {
    /// Call `tick` every `period`, first after one full period.
    fn every(&self, period: Duration, tick: Tick) -> TimerHandle;
}

/// A running timer. Cancelled on [`TimerHandle::cancel`] or drop.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Runs each timer as a tokio task driven by [`tokio::time::interval`].
#[derive(Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Scheduler on the runtime the caller is running in, if any.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl Scheduler for TokioScheduler {
    fn every(&self, period: Duration, tick: Tick) -> TimerHandle {
        let task = self.handle.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                tick();
            }
        });

        TimerHandle::new(move || task.abort())
    }
}
