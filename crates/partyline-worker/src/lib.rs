//! Single-lane sequential message processor.
//!
//! A [`Worker`] owns a bounded inbox and one [`Handler`]. Once started,
//! a dedicated Tokio task takes messages off the inbox one at a time and
//! hands them to the handler, so the handler's state needs no locking:
//! at most one `handle` call runs at any instant, in arrival order.
//!
//! # Lifecycle
//!
//! ```text
//! new() ──→ [Idle] ──start()──→ [Running] ──stop()──→ [Stopped]
//!              │                                          ▲
//!              └──────────────────stop()──────────────────┘
//! ```
//!
//! - [`Worker::send`] waits for inbox space (backpressure) but never
//!   blocks once the worker is stopped: late messages are dropped.
//! - [`Worker::stop`] lets the in-flight message finish, then returns
//!   only after the lane has exited. Nothing is handled afterwards.
//! - A handler that panics takes its lane down with it. The panic is
//!   logged at `error`, later sends are dropped, and `stop` still
//!   returns. The owner decides what to do with the dead lane.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{mpsc, watch};

/// Processes the messages of one worker lane.
///
/// `handle` is synchronous on purpose: a lane that awaits inside its
/// handler would stall every message queued behind it.
pub trait Handler<M>: Send + 'static {
    /// Handles one message. Called sequentially, never concurrently.
    fn handle(&mut self, msg: M);
}

/// Adapts a closure into a [`Handler`].
///
/// ```rust
/// use partyline_worker::{handler_fn, Worker};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let worker = Worker::spawn("echo", 8, handler_fn(|line: String| println!("{line}")));
/// worker.send("hello".to_string()).await;
/// worker.stop().await;
/// # }
/// ```
pub fn handler_fn<M, F>(f: F) -> FnHandler<F>
where
    F: FnMut(M) + Send + 'static,
{
    FnHandler(f)
}

/// A [`Handler`] backed by a closure. See [`handler_fn`].
pub struct FnHandler<F>(F);

impl<M, F> Handler<M> for FnHandler<F>
where
    F: FnMut(M) + Send + 'static,
{
    fn handle(&mut self, msg: M) {
        (self.0)(msg)
    }
}

/// Inbox and handler parked until [`Worker::start`] moves them into
/// the lane task.
struct Idle<M> {
    inbox: mpsc::Receiver<M>,
    handler: Box<dyn Handler<M>>,
}

struct Inner<M> {
    name: Arc<str>,
    inbox: mpsc::Sender<M>,
    stop: watch::Sender<bool>,
    /// Set by the lane (even while unwinding) once it will take no more
    /// messages.
    exited: Arc<watch::Sender<bool>>,
    idle: Mutex<Option<Idle<M>>>,
}

/// Handle to a single-lane message processor.
///
/// Cheap to clone: every clone talks to the same lane. When the last
/// handle is dropped the inbox closes and the lane exits on its own.
pub struct Worker<M> {
    inner: Arc<Inner<M>>,
}

impl<M> Clone for Worker<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<M: Send + 'static> Worker<M> {
    /// Creates an idle worker. Messages sent before [`start`](Self::start)
    /// queue up in the inbox (up to `capacity`).
    pub fn new(
        name: impl Into<String>,
        capacity: usize,
        handler: impl Handler<M>,
    ) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let (stop, _) = watch::channel(false);
        let (exited, _) = watch::channel(false);
        let name: Arc<str> = Arc::from(name.into());

        Self {
            inner: Arc::new(Inner {
                name,
                inbox: tx,
                stop,
                exited: Arc::new(exited),
                idle: Mutex::new(Some(Idle {
                    inbox: rx,
                    handler: Box::new(handler),
                })),
            }),
        }
    }

    /// Creates a worker and starts it immediately.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn spawn(
        name: impl Into<String>,
        capacity: usize,
        handler: impl Handler<M>,
    ) -> Self {
        let worker = Self::new(name, capacity, handler);
        worker.start();
        worker
    }

    /// Spawns the processing lane. Calling it again, or after
    /// [`stop`](Self::stop), does nothing.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn start(&self) {
        let Some(idle) = lock(&self.inner.idle).take() else {
            tracing::debug!(worker = %self.inner.name, "start ignored, lane already taken");
            return;
        };

        let stop = self.inner.stop.subscribe();
        let guard = LaneGuard {
            name: Arc::clone(&self.inner.name),
            exited: Arc::clone(&self.inner.exited),
        };
        tokio::spawn(run(idle, stop, guard));
    }

    /// Enqueues a message.
    ///
    /// Waits while the inbox is full. Returns immediately, dropping the
    /// message, once the worker is stopped or its lane is gone.
    pub async fn send(&self, msg: M) {
        let mut stop = self.inner.stop.subscribe();
        if *stop.borrow_and_update() {
            tracing::trace!(worker = %self.inner.name, "worker stopped, message dropped");
            return;
        }

        tokio::select! {
            biased;
            _ = stop.wait_for(|stopped| *stopped) => {
                tracing::trace!(worker = %self.inner.name, "worker stopped while waiting, message dropped");
            }
            sent = self.inner.inbox.send(msg) => {
                if sent.is_err() {
                    tracing::debug!(worker = %self.inner.name, "lane exited, message dropped");
                }
            }
        }
    }

    /// Enqueues a message without waiting.
    ///
    /// Returns `false`, dropping the message, if the inbox is full, the
    /// worker is stopped, or its lane is gone. For periodic messages where
    /// a missed one is harmless and a stalled caller is not.
    pub fn try_send(&self, msg: M) -> bool {
        if self.is_stopped() {
            tracing::trace!(worker = %self.inner.name, "worker stopped, message dropped");
            return false;
        }
        match self.inner.inbox.try_send(msg) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::debug!(worker = %self.inner.name, "inbox full, message dropped");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::debug!(worker = %self.inner.name, "lane exited, message dropped");
                false
            }
        }
    }

    /// Signals the lane to stop and waits until it has exited.
    ///
    /// The message being handled (if any) completes; queued messages are
    /// discarded. Safe to call more than once and from several tasks.
    pub async fn stop(&self) {
        self.inner.stop.send_replace(true);

        // Never started: nothing will ever run, discard the parked lane.
        if lock(&self.inner.idle).take().is_some() {
            self.inner.exited.send_replace(true);
            return;
        }

        let mut exited = self.inner.exited.subscribe();
        // Err means the sender is gone, which only happens once the lane
        // (and every handle) is gone too.
        let _ = exited.wait_for(|done| *done).await;
    }

    /// Returns `true` once [`stop`](Self::stop) has been called.
    pub fn is_stopped(&self) -> bool {
        *self.inner.stop.borrow()
    }

    /// Returns `true` while a started lane is still taking messages.
    pub fn is_running(&self) -> bool {
        lock(&self.inner.idle).is_none()
            && !*self.inner.exited.borrow()
            && !self.is_stopped()
    }

    /// The name given at construction, used in log fields.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns `true` if both handles drive the same lane.
    pub fn same_worker(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Marks the lane as exited when it ends, however it ends.
struct LaneGuard {
    name: Arc<str>,
    exited: Arc<watch::Sender<bool>>,
}

impl Drop for LaneGuard {
    fn drop(&mut self) {
        self.exited.send_replace(true);
    }
}

async fn run<M: Send + 'static>(
    idle: Idle<M>,
    mut stop: watch::Receiver<bool>,
    guard: LaneGuard,
) {
    let Idle {
        mut inbox,
        mut handler,
    } = idle;
    tracing::debug!(worker = %guard.name, "lane started");

    loop {
        tokio::select! {
            // Stop wins over a ready message so nothing runs after the
            // signal is observed.
            biased;
            _ = stop.wait_for(|stopped| *stopped) => break,
            next = inbox.recv() => match next {
                Some(msg) => {
                    // The handler's state is not trusted after a panic.
                    let handled = panic::catch_unwind(AssertUnwindSafe(|| handler.handle(msg)));
                    if handled.is_err() {
                        tracing::error!(worker = %guard.name, "handler panicked, lane terminated");
                        break;
                    }
                }
                None => break,
            },
        }
    }

    tracing::debug!(worker = %guard.name, "lane stopped");
    drop(inbox);
    drop(guard);
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
