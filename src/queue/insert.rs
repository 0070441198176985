/*!
 * Insertion Operations
 * Blocking, non-blocking and bounded-time puts
 */

use super::storage::QueueStorage;
use super::thread_queue::{ThreadQueue, Wait};
use crate::core::errors::{QueueClosed, QueueResult};
use crate::core::time::Deadline;
use std::time::Duration;
use tracing::trace;

impl<T, S> ThreadQueue<T, S>
where
    S: QueueStorage<T>,
{
    /// Put an item into the queue, blocking while it is full
    ///
    /// Fails once the queue is closed, including when it closes while this
    /// call is blocked; the value is not queued in that case.
    pub fn put(&self, value: T) -> QueueResult<()> {
        self.insert(value, Wait::Forever).map_err(|_| QueueClosed)
    }

    /// Put an item into the queue if there is room right now
    ///
    /// Returns `false` if the queue is full or closed; the value is dropped.
    /// Use [`offer`](Self::offer) to get it back instead.
    pub fn try_put(&self, value: T) -> bool {
        self.offer(value).is_ok()
    }

    /// Put an item, waiting at most `timeout` for room
    ///
    /// Returns `false` on timeout or if the queue is closed.
    pub fn try_put_for(&self, value: T, timeout: Duration) -> bool {
        self.offer_for(value, timeout).is_ok()
    }

    /// Put an item, waiting until `deadline` at most for room
    ///
    /// Returns `false` on timeout or if the queue is closed.
    pub fn try_put_until<D: Deadline>(&self, value: T, deadline: D) -> bool {
        self.offer_until(value, deadline).is_ok()
    }

    /// Non-blocking put that hands the value back on failure
    ///
    /// # Examples
    ///
    /// ```
    /// use thread_queue::ThreadQueue;
    ///
    /// let queue = ThreadQueue::with_capacity(1);
    /// assert!(queue.offer(String::from("first")).is_ok());
    ///
    /// let rejected = queue.offer(String::from("second")).unwrap_err();
    /// assert_eq!(rejected, "second");
    /// ```
    pub fn offer(&self, value: T) -> Result<(), T> {
        self.insert(value, Wait::Never)
    }

    /// Bounded-time put that hands the value back on failure
    pub fn offer_for(&self, value: T, timeout: Duration) -> Result<(), T> {
        self.insert(value, Wait::after(timeout))
    }

    /// Deadline-bounded put that hands the value back on failure
    pub fn offer_until<D: Deadline>(&self, value: T, deadline: D) -> Result<(), T> {
        self.insert(value, Wait::until(deadline))
    }

    /// Wait for room, then append at the tail and wake one consumer
    ///
    /// Ownership moves into the queue only at the append; every failure path
    /// returns the untouched value.
    fn insert(&self, value: T, wait: Wait) -> Result<(), T> {
        let mut state = self.state.lock();

        let ready = self.block_on(&self.not_full, &mut state, wait, Self::can_put);
        if !ready || state.closed {
            trace!(
                queue = %self.label(),
                closed = state.closed,
                size = state.items.len(),
                capacity = state.capacity,
                "put rejected"
            );
            return Err(value);
        }

        state.items.push_back(value);
        state.total_put += 1;
        self.not_empty.notify_one();
        self.wake_async_consumers();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_put_on_closed_fails() {
        let queue = ThreadQueue::new();
        queue.close();
        assert_eq!(queue.put(1), Err(QueueClosed));
        assert!(!queue.try_put(2));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_offer_returns_value_when_closed() {
        let queue = ThreadQueue::new();
        queue.close();
        assert_eq!(queue.offer(vec![1u8, 2, 3]), Err(vec![1u8, 2, 3]));
    }

    #[test]
    fn test_try_put_for_times_out_when_full() {
        let queue = ThreadQueue::with_capacity(1);
        queue.put(1).unwrap();

        let start = Instant::now();
        assert!(!queue.try_put_for(2, Duration::from_millis(50)));
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_try_put_until_past_deadline_acts_like_try_put() {
        let queue = ThreadQueue::with_capacity(1);
        let past = Instant::now();
        assert!(queue.try_put_until(1, past));
        assert!(!queue.try_put_until(2, past));
    }

    #[test]
    fn test_blocked_put_fails_on_close() {
        let queue = Arc::new(ThreadQueue::with_capacity(1));
        queue.put(0).unwrap();

        let producer = {
            let queue = queue.clone();
            thread::spawn(move || queue.put(1))
        };

        // Give the producer time to block
        thread::sleep(Duration::from_millis(50));
        queue.close();

        assert_eq!(producer.join().unwrap(), Err(QueueClosed));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_blocked_put_proceeds_after_get() {
        let queue = Arc::new(ThreadQueue::with_capacity(1));
        queue.put(0).unwrap();

        let producer = {
            let queue = queue.clone();
            thread::spawn(move || queue.put(1))
        };

        thread::sleep(Duration::from_millis(50));
        assert_eq!(queue.get(), Ok(0));

        assert_eq!(producer.join().unwrap(), Ok(()));
        assert_eq!(queue.get(), Ok(1));
    }
}
