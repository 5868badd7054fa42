#![cfg(feature = "std")]

//! Deferred tasks for the opponent's "thinking" pause.
//!
//! The controller never sleeps on the caller's thread. It hands a task to a
//! [`Scheduler`] and keeps the returned handle so the task can be cancelled
//! when the match is reset.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Work to run once the delay has elapsed.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Cancels a scheduled task that has not started yet.
pub trait TaskHandle: Send + 'static {
    fn cancel(&self);
}

/// Runs tasks after a delay.
///
/// Implementations must not run `task` before `after` returns: the caller
/// may still hold locks the task needs.
pub trait Scheduler: Send + Sync + 'static {
    type Handle: TaskHandle;

    fn after(&self, delay: Duration, task: Task) -> Self::Handle;
}

/// Schedules onto a tokio runtime with `tokio::time::sleep`.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: tokio::runtime::Handle,
}

impl TokioScheduler {
    pub fn new(runtime: tokio::runtime::Handle) -> Self {
        Self { runtime }
    }

    /// Scheduler on the runtime the caller is running inside.
    pub fn current() -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| anyhow::anyhow!("no tokio runtime available: {}", e))?;
        Ok(Self::new(runtime))
    }
}

impl TaskHandle for tokio::task::JoinHandle<()> {
    fn cancel(&self) {
        self.abort();
    }
}

impl Scheduler for TokioScheduler {
    type Handle = tokio::task::JoinHandle<()>;

    fn after(&self, delay: Duration, task: Task) -> Self::Handle {
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        })
    }
}

struct Queued {
    delay: Duration,
    task: Task,
    cancelled: Arc<AtomicBool>,
}

/// Scheduler whose tasks run only when [`ManualScheduler::run_pending`] is
/// called. The delay is recorded but never waited for.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Arc<Mutex<Vec<Queued>>>,
}

/// Handle returned by [`ManualScheduler`].
#[derive(Debug, Clone)]
pub struct ManualHandle {
    cancelled: Arc<AtomicBool>,
}

impl TaskHandle for ManualHandle {
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every queued, uncancelled task in submission order. Tasks queued
    /// while running wait for the next call. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let due: Vec<Queued> = {
            let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
            queue.drain(..).collect()
        };
        let mut ran = 0;
        for queued in due {
            if !queued.cancelled.load(Ordering::SeqCst) {
                (queued.task)();
                ran += 1;
            }
        }
        ran
    }

    /// Number of queued tasks that have not been cancelled.
    pub fn pending(&self) -> usize {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|q| !q.cancelled.load(Ordering::SeqCst))
            .count()
    }

    /// Delays requested by the queued, uncancelled tasks.
    pub fn pending_delays(&self) -> Vec<Duration> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|q| !q.cancelled.load(Ordering::SeqCst))
            .map(|q| q.delay)
            .collect()
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn after(&self, delay: Duration, task: Task) -> ManualHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Queued {
                delay,
                task,
                cancelled: cancelled.clone(),
            });
        ManualHandle { cancelled }
    }
}
