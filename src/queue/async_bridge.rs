/*!
 * Async Bridge
 *
 * Lets async code wait on a queue without tying up a runtime thread. Async
 * waiters park on a tokio `Notify` that fires alongside the condition
 * variables, then retry the non-blocking operation.
 *
 * # Cancellation
 *
 * Every method is cancel safe. An item enters or leaves the queue only
 * inside a poll of the returned future, so dropping it (a timeout, a losing
 * `select!` branch) leaves the queue exactly as it was.
 */

use super::storage::QueueStorage;
use super::thread_queue::ThreadQueue;
use crate::core::errors::{QueueClosed, QueueResult};
use std::pin::pin;
use std::time::Duration;
use tokio::sync::Notify;

/// Wakeups for async waiters
#[derive(Debug, Default)]
pub(super) struct AsyncSignals {
    /// Fired when an item is added or the queue closes
    pub items: Notify,
    /// Fired when room is made or the queue closes
    pub room: Notify,
}

impl<T, S> ThreadQueue<T, S>
where
    S: QueueStorage<T>,
{
    /// Async `get`: wait for an item without blocking the runtime
    ///
    /// Fails only once the queue is closed and empty.
    pub async fn get_async(&self) -> QueueResult<T> {
        loop {
            let mut notified = pin!(self.signals.items.notified());
            // Registered before the check, so a put racing it still wakes us
            notified.as_mut().enable();

            if let Some(value) = self.try_get() {
                return Ok(value);
            }
            if self.is_done() {
                return Err(QueueClosed);
            }
            notified.await;
        }
    }

    /// Async `try_get_for`: `None` on timeout or once the queue is done
    pub async fn try_get_for_async(&self, timeout: Duration) -> Option<T> {
        tokio::time::timeout(timeout, self.get_async()).await.ok()?.ok()
    }

    /// Async `put`: wait for room without blocking the runtime
    ///
    /// Fails once the queue is closed; the value is dropped in that case. If
    /// the future is dropped first, the value is dropped with it and never
    /// queued.
    pub async fn put_async(&self, value: T) -> QueueResult<()> {
        let mut value = value;
        loop {
            let mut notified = pin!(self.signals.room.notified());
            notified.as_mut().enable();

            match self.offer(value) {
                Ok(()) => return Ok(()),
                Err(_) if self.is_closed() => return Err(QueueClosed),
                Err(rejected) => value = rejected,
            }
            notified.await;
        }
    }
}
