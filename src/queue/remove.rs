/*!
 * Removal Operations
 * Blocking, non-blocking and bounded-time gets
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
    /// Remove the head item, blocking while the queue is empty
    ///
    /// Items queued before a close are still delivered; fails only once the
    /// queue is closed and empty.
    pub fn get(&self) -> QueueResult<T> {
        self.remove(Wait::Forever).ok_or(QueueClosed)
    }

    /// Remove the head item if one is available right now
    ///
    /// `None` whenever the queue is empty, closed or not.
    pub fn try_get(&self) -> Option<T> {
        self.remove(Wait::Never)
    }

    /// Remove the head item, waiting at most `timeout` for one
    pub fn try_get_for(&self, timeout: Duration) -> Option<T> {
        self.remove(Wait::after(timeout))
    }

    /// Remove the head item, waiting until `deadline` at most for one
    pub fn try_get_until<D: Deadline>(&self, deadline: D) -> Option<T> {
        self.remove(Wait::until(deadline))
    }

    /// Wait for an item, then take the head and wake one producer
    fn remove(&self, wait: Wait) -> Option<T> {
        let mut state = self.state.lock();

        // Timed out or closed: whatever is left is still handed out
        self.block_on(&self.not_empty, &mut state, wait, Self::can_get);

        match state.items.pop_front() {
            Some(value) => {
                state.total_get += 1;
                self.not_full.notify_one();
                self.wake_async_producers();
                Some(value)
            }
            None => {
                trace!(queue = %self.label(), closed = state.closed, "get found queue empty");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::{Instant, SystemTime};

    #[test]
    fn test_try_get_empty() {
        let queue = ThreadQueue::<u32>::new();
        assert_eq!(queue.try_get(), None);
        queue.close();
        assert_eq!(queue.try_get(), None);
    }

    #[test]
    fn test_get_drains_after_close() {
        let queue = ThreadQueue::new();
        queue.put('a').unwrap();
        queue.put('b').unwrap();
        queue.close();

        assert_eq!(queue.get(), Ok('a'));
        assert_eq!(queue.try_get(), Some('b'));
        assert_eq!(queue.get(), Err(QueueClosed));
    }

    #[test]
    fn test_try_get_for_times_out() {
        let queue = ThreadQueue::<u32>::new();
        let start = Instant::now();
        assert_eq!(queue.try_get_for(Duration::from_millis(50)), None);
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_try_get_until_wall_clock() {
        let queue = ThreadQueue::<u32>::new();
        let deadline = SystemTime::now() + Duration::from_millis(30);
        assert_eq!(queue.try_get_until(deadline), None);

        queue.put(7).unwrap();
        assert_eq!(queue.try_get_until(SystemTime::now()), Some(7));
    }

    #[test]
    fn test_blocked_get_wakes_on_put() {
        let queue = Arc::new(ThreadQueue::new());

        let consumer = {
            let queue = queue.clone();
            thread::spawn(move || queue.get())
        };

        thread::sleep(Duration::from_millis(50));
        queue.put(42).unwrap();

        assert_eq!(consumer.join().unwrap(), Ok(42));
    }

    #[test]
    fn test_blocked_get_fails_on_close() {
        let queue = Arc::new(ThreadQueue::<u32>::new());

        let consumer = {
            let queue = queue.clone();
            thread::spawn(move || queue.get())
        };

        thread::sleep(Duration::from_millis(50));
        queue.close();

        assert_eq!(consumer.join().unwrap(), Err(QueueClosed));
    }

    #[test]
    fn test_timed_get_returns_early_on_close() {
        let queue = Arc::new(ThreadQueue::<u32>::new());

        let consumer = {
            let queue = queue.clone();
            thread::spawn(move || {
                let start = Instant::now();
                (queue.try_get_for(Duration::from_secs(5)), start.elapsed())
            })
        };

        thread::sleep(Duration::from_millis(50));
        queue.close();

        let (result, elapsed) = consumer.join().unwrap();
        assert_eq!(result, None);
        assert!(elapsed < Duration::from_secs(5));
    }
}
