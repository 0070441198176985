/*!
 * Consumer Iterators
 * Drain a queue with a `for` loop
 */

use super::storage::QueueStorage;
use super::thread_queue::ThreadQueue;
use std::iter::FusedIterator;

/// Blocking iterator over a queue, ends once the queue is done
///
/// Created by [`ThreadQueue::iter`].
pub struct Iter<'a, T, S> {
    queue: &'a ThreadQueue<T, S>,
}

/// Non-blocking iterator over the items available right now
///
/// Created by [`ThreadQueue::try_iter`].
pub struct TryIter<'a, T, S> {
    queue: &'a ThreadQueue<T, S>,
}

impl<T, S> ThreadQueue<T, S>
where
    S: QueueStorage<T>,
{
    /// Iterate by blocking `get`, until the queue is closed and drained
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use std::thread;
    /// use thread_queue::ThreadQueue;
    ///
    /// let queue = Arc::new(ThreadQueue::new());
    /// let producer = {
    ///     let queue = queue.clone();
    ///     thread::spawn(move || {
    ///         for i in 0..3 {
    ///             queue.put(i).unwrap();
    ///         }
    ///         queue.close();
    ///     })
    /// };
    ///
    /// let received: Vec<i32> = queue.iter().collect();
    /// assert_eq!(received, vec![0, 1, 2]);
    /// producer.join().unwrap();
    /// ```
    pub fn iter(&self) -> Iter<'_, T, S> {
        Iter { queue: self }
    }

    /// Iterate by `try_get`, stopping at the first empty observation
    pub fn try_iter(&self) -> TryIter<'_, T, S> {
        TryIter { queue: self }
    }
}

impl<'a, T, S> Iterator for Iter<'a, T, S>
where
    S: QueueStorage<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.queue.get().ok()
    }
}

// A done queue stays done
impl<'a, T, S> FusedIterator for Iter<'a, T, S> where S: QueueStorage<T> {}

impl<'a, T, S> Iterator for TryIter<'a, T, S>
where
    S: QueueStorage<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.queue.try_get()
    }
}

impl<'a, T, S> IntoIterator for &'a ThreadQueue<T, S>
where
    S: QueueStorage<T>,
{
    type Item = T;
    type IntoIter = Iter<'a, T, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_iter_stops_when_empty() {
        let queue = ThreadQueue::new();
        for i in 0..4 {
            queue.put(i).unwrap();
        }

        let drained: Vec<_> = queue.try_iter().collect();
        assert_eq!(drained, vec![0, 1, 2, 3]);
        assert!(!queue.is_closed());
    }

    #[test]
    fn test_for_loop_over_closed_queue() {
        let queue = ThreadQueue::new();
        queue.put("x").unwrap();
        queue.put("y").unwrap();
        queue.close();

        let mut seen = Vec::new();
        for item in &queue {
            seen.push(item);
        }
        assert_eq!(seen, vec!["x", "y"]);
        assert!(queue.is_done());
    }
}
