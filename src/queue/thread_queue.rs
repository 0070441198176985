/*!
 * Thread Queue
 *
 * Monitor-style blocking FIFO queue: one lock guards all state, two
 * condition variables coordinate blocked producers and consumers.
 *
 * # State
 *
 * A queue starts open and becomes closed exactly once. A closed queue keeps
 * delivering the items it still holds; once it is closed and empty it is
 * "done", which is computed on demand and never signalled on its own.
 *
 * # Waiting
 *
 * Every blocking call re-checks its predicate after each wakeup, so spurious
 * wakeups and several waiters racing for one slot are handled. Capacity and
 * closed checks happen under the same lock as the mutation they guard.
 */

#[cfg(feature = "tokio")]
use super::async_bridge::AsyncSignals;
use super::config::{clamp_capacity, QueueConfig};
use super::stats::QueueStats;
use super::storage::QueueStorage;
use crate::core::time::{deadline_after, Deadline};
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::collections::VecDeque;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Queue shared between any number of producer and consumer threads
pub type SharedQueue<T, S = VecDeque<T>> = Arc<ThreadQueue<T, S>>;

/// Lock-protected queue state
pub(super) struct State<S> {
    pub items: S,
    pub capacity: usize,
    pub closed: bool,
    pub total_put: u64,
    pub total_get: u64,
}

/// How long a caller is willing to block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Wait {
    /// Check once, never block
    Never,
    /// Block until the instant passes
    Until(Instant),
    /// Block until the predicate holds
    Forever,
}

impl Wait {
    /// Bounded wait for a relative timeout
    pub fn after(timeout: Duration) -> Self {
        deadline_after(timeout).map_or(Wait::Forever, Wait::Until)
    }

    /// Bounded wait for an absolute deadline on either clock
    pub fn until<D: Deadline>(deadline: D) -> Self {
        deadline.to_instant().map_or(Wait::Forever, Wait::Until)
    }
}

/// Thread-safe blocking FIFO queue
///
/// Values are moved in and moved out; `T` never needs to be `Clone`, and no
/// copy of a removed value stays behind in the queue.
///
/// The default capacity is [`MAX_CAPACITY`](super::MAX_CAPACITY), which in
/// practice never blocks producers. Capacity can be changed at any time; if
/// it is lowered below the current length nothing is evicted, producers just
/// block until consumers bring the length back under it.
///
/// # Type Parameters
///
/// - `T`: Item type
/// - `S`: Backing container (see [`QueueStorage`]), `VecDeque<T>` by default
///
/// # Examples
///
/// ```
/// use thread_queue::ThreadQueue;
///
/// let queue = ThreadQueue::with_capacity(2);
/// queue.put(1).unwrap();
/// queue.put(2).unwrap();
/// assert!(!queue.try_put(3));
///
/// assert_eq!(queue.get(), Ok(1));
/// queue.close();
/// assert_eq!(queue.get(), Ok(2));
/// assert!(queue.get().is_err());
/// assert!(queue.is_done());
/// ```
pub struct ThreadQueue<T, S = VecDeque<T>> {
    pub(super) state: Mutex<State<S>>,
    /// Signalled when an item is added
    pub(super) not_empty: Condvar,
    /// Signalled when room is made
    pub(super) not_full: Condvar,
    #[cfg(feature = "tokio")]
    pub(super) signals: AsyncSignals,
    name: Option<String>,
    _item: PhantomData<fn(T) -> T>,
}

impl<T> ThreadQueue<T> {
    /// Create an effectively unbounded queue
    pub fn new() -> Self {
        Self::with_config(QueueConfig::unbounded())
    }

    /// Create a queue holding at most `capacity` items (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(QueueConfig::bounded(capacity))
    }
}

impl<T> Default for ThreadQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> ThreadQueue<T, S>
where
    S: QueueStorage<T>,
{
    /// Create a queue from a configuration and an empty container
    pub fn with_config(config: QueueConfig) -> Self
    where
        S: Default,
    {
        Self::with_storage(S::default(), config)
    }

    /// Create a queue over an existing container
    ///
    /// Items already in `storage` are delivered first, in container order.
    pub fn with_storage(storage: S, config: QueueConfig) -> Self {
        let capacity = config.effective_capacity();
        Self {
            state: Mutex::new(State {
                items: storage,
                capacity,
                closed: false,
                total_put: 0,
                total_get: 0,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            #[cfg(feature = "tokio")]
            signals: AsyncSignals::default(),
            name: config.name,
            _item: PhantomData,
        }
    }

    /// Create a queue ready to be shared across threads
    pub fn shared(config: QueueConfig) -> SharedQueue<T, S>
    where
        S: Default,
    {
        Arc::new(Self::with_config(config))
    }

    /// Name given at construction, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub(super) fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }

    /// Check if the queue holds no items
    pub fn is_empty(&self) -> bool {
        self.state.lock().items.is_empty()
    }

    /// Number of items in the queue
    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    /// Maximum number of items before producers block
    pub fn capacity(&self) -> usize {
        self.state.lock().capacity
    }

    /// Check if the queue has been closed
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Check if the queue is closed and empty
    ///
    /// Once true, stays true: nothing can be added and nothing is left.
    pub fn is_done(&self) -> bool {
        let state = self.state.lock();
        state.closed && state.items.is_empty()
    }

    /// Change the capacity (minimum 1)
    ///
    /// Lowering it below the current length evicts nothing; producers block
    /// until enough items have been removed. Raising it above the current
    /// length wakes every blocked producer to re-check for room.
    pub fn set_capacity(&self, capacity: usize) {
        let capacity = clamp_capacity(capacity);
        let mut state = self.state.lock();
        state.capacity = capacity;
        let len = state.items.len();
        if capacity > len {
            self.not_full.notify_all();
            self.wake_async_producers();
        }
        drop(state);

        debug!(queue = %self.label(), capacity, size = len, "queue capacity changed");
    }

    /// Close the queue
    ///
    /// Idempotent. Every blocked producer and consumer is woken: producers
    /// fail, consumers drain what is left and then fail.
    pub fn close(&self) {
        let mut state = self.state.lock();
        let was_closed = std::mem::replace(&mut state.closed, true);
        let len = state.items.len();
        self.not_full.notify_all();
        self.not_empty.notify_all();
        self.wake_async_producers();
        self.wake_async_consumers();
        drop(state);

        if !was_closed {
            debug!(queue = %self.label(), size = len, "queue closed");
        }
    }

    /// Discard every queued item, returning how many were dropped
    ///
    /// Allowed on a closed queue too. Blocked producers are woken since
    /// room is now available; consumers keep waiting.
    pub fn clear(&self) -> usize {
        let mut state = self.state.lock();
        let dropped = state.items.len();
        state.items.clear();
        self.not_full.notify_all();
        self.wake_async_producers();
        drop(state);

        debug!(queue = %self.label(), dropped, "queue cleared");
        dropped
    }

    /// Consistent snapshot of the queue
    pub fn stats(&self) -> QueueStats {
        let state = self.state.lock();
        let length = state.items.len();
        QueueStats {
            name: self.name.clone(),
            capacity: state.capacity,
            length,
            closed: state.closed,
            done: state.closed && length == 0,
            total_put: state.total_put,
            total_get: state.total_get,
        }
    }

    /// Producers may proceed: room available, or closed (and about to fail)
    #[inline]
    pub(super) fn can_put(state: &State<S>) -> bool {
        state.closed || state.items.len() < state.capacity
    }

    /// Consumers may proceed: an item available, or closed (and possibly done)
    #[inline]
    pub(super) fn can_get(state: &State<S>) -> bool {
        state.closed || !state.items.is_empty()
    }

    /// Wake async consumers parked in `get_async` (no-op without `tokio`)
    #[inline]
    pub(super) fn wake_async_consumers(&self) {
        #[cfg(feature = "tokio")]
        self.signals.items.notify_waiters();
    }

    /// Wake async producers parked in `put_async` (no-op without `tokio`)
    #[inline]
    pub(super) fn wake_async_producers(&self) {
        #[cfg(feature = "tokio")]
        self.signals.room.notify_waiters();
    }

    /// Block on `cond` until `ready` holds or the wait runs out
    ///
    /// Returns the final value of `ready`, evaluated under the lock.
    pub(super) fn block_on(
        &self,
        cond: &Condvar,
        state: &mut MutexGuard<'_, State<S>>,
        wait: Wait,
        ready: fn(&State<S>) -> bool,
    ) -> bool {
        if ready(state) {
            return true;
        }

        match wait {
            Wait::Never => false,
            Wait::Forever => {
                trace!(queue = %self.label(), "blocking without deadline");
                while !ready(state) {
                    cond.wait(state);
                }
                true
            }
            Wait::Until(deadline) => {
                trace!(queue = %self.label(), "blocking until deadline");
                while !ready(state) {
                    if cond.wait_until(state, deadline).timed_out() {
                        return ready(state);
                    }
                }
                true
            }
        }
    }
}

impl<T, S> fmt::Debug for ThreadQueue<T, S>
where
    S: QueueStorage<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ThreadQueue")
            .field("name", &self.name)
            .field("len", &state.items.len())
            .field("capacity", &state.capacity)
            .field("closed", &state.closed)
            .finish()
    }
}
