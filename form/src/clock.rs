//! Manually advanced clock for deterministic scheduling.

use std::collections::BTreeMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;

use crate::scheduler::{SettleHandle, SettleScheduler, SettleTask};

type TaskKey = (Duration, u64);

#[derive(Default)]
struct ClockInner {
    now: Duration,
    next_id: u64,
    tasks: BTreeMap<TaskKey, SettleTask>,
}

/// Virtual time that only moves when [`VirtualClock::advance`] is called.
///
/// Clones share the same timeline. Tasks due at the same instant run in the
/// order they were scheduled.
#[derive(Clone, Default)]
pub struct VirtualClock {
    inner: Arc<Mutex<ClockInner>>,
}

impl VirtualClock {
    /// Start a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed virtual time.
    pub fn now(&self) -> Duration {
        self.inner.lock().now
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.inner.lock().tasks.len()
    }

    /// Move time forward, running every task that falls due.
    pub fn advance(&self, by: Duration) {
        let target = self.inner.lock().now + by;

        loop {
            let task = {
                let mut inner = self.inner.lock();
                let next_due = inner.tasks.first_key_value().map(|(&(due, _), _)| due);
                match next_due {
                    Some(due) if due <= target => {
                        inner.now = due;
                        inner.tasks.pop_first().map(|(_, task)| task)
                    }
                    _ => None,
                }
            };

            // Tasks run without the clock locked so they may schedule more work.
            match task {
                Some(task) => task(),
                None => break,
            }
        }

        self.inner.lock().now = target;
    }
}

impl std::fmt::Debug for VirtualClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("VirtualClock")
            .field("now", &inner.now)
            .field("pending", &inner.tasks.len())
            .finish()
    }
}

/// Handle to a task on a [`VirtualClock`].
#[derive(Debug)]
pub struct VirtualHandle {
    clock: Weak<Mutex<ClockInner>>,
    key: TaskKey,
}

impl SettleHandle for VirtualHandle {
    fn cancel(self) {
        if let Some(inner) = self.clock.upgrade() {
            inner.lock().tasks.remove(&self.key);
        }
    }
}

impl SettleScheduler for VirtualClock {
    type Handle = VirtualHandle;

    fn schedule(&self, delay: Duration, task: SettleTask) -> Self::Handle {
        let mut inner = self.inner.lock();
        let key = (inner.now + delay, inner.next_id);
        inner.next_id += 1;
        inner.tasks.insert(key, task);

        VirtualHandle {
            clock: Arc::downgrade(&self.inner),
            key,
        }
    }
}
