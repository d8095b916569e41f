//! Cancellable deferred tasks.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Deferred work run once its delay elapses.
pub type SettleTask = Box<dyn FnOnce() + Send + 'static>;

/// Handle to a scheduled task.
pub trait SettleHandle {
    /// Prevent the task from running. A no-op if it already ran.
    fn cancel(self);
}

/// Runs tasks after a delay.
pub trait SettleScheduler {
    type Handle: SettleHandle;

    /// Schedule `task` to run once, `delay` from now.
    fn schedule(&self, delay: Duration, task: SettleTask) -> Self::Handle;
}

/// Scheduler backed by the tokio timer.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    /// Use the given runtime.
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Use the runtime of the calling context, if there is one.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

/// Handle to a task spawned on the tokio runtime.
#[derive(Debug)]
pub struct TokioSettleHandle(JoinHandle<()>);

impl SettleHandle for TokioSettleHandle {
    fn cancel(self) {
        self.0.abort();
    }
}

impl SettleScheduler for TokioScheduler {
    type Handle = TokioSettleHandle;

    fn schedule(&self, delay: Duration, task: SettleTask) -> Self::Handle {
        TokioSettleHandle(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_current_outside_runtime() {
        assert!(TokioScheduler::current().is_none());
    }

    #[tokio::test]
    async fn test_tokio_task_runs() {
        let scheduler = TokioScheduler::current().unwrap();
        let ran = Arc::new(AtomicUsize::new(0));

        let counter = ran.clone();
        let _handle = scheduler.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_tokio_task_cancelled() {
        let scheduler = TokioScheduler::current().unwrap();
        let ran = Arc::new(AtomicUsize::new(0));

        let counter = ran.clone();
        let handle = scheduler.schedule(
            Duration::from_millis(50),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        handle.cancel();

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(ran.load(Ordering::SeqCst), 0);
    }
}
