/*!
 * Queue Storage
 *
 * The ordered container a queue keeps its items in.
 *
 * # Design
 *
 * The queue only ever appends at the tail, removes at the head
 * and asks for the length, so any sequence offering those operations can
 * back it. Storage is always accessed under the queue lock and needs no
 * synchronization of its own.
 */

use std::collections::{LinkedList, VecDeque};

/// FIFO container backing a [`ThreadQueue`](super::ThreadQueue)
pub trait QueueStorage<T> {
    /// Append an item at the tail
    fn push_back(&mut self, value: T);

    /// Remove and return the head item
    fn pop_front(&mut self) -> Option<T>;

    /// Number of stored items
    fn len(&self) -> usize;

    /// Check if no items are stored
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every stored item
    fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }
}

impl<T> QueueStorage<T> for VecDeque<T> {
    #[inline]
    fn push_back(&mut self, value: T) {
        VecDeque::push_back(self, value);
    }

    #[inline]
    fn pop_front(&mut self) -> Option<T> {
        VecDeque::pop_front(self)
    }

    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    #[inline]
    fn is_empty(&self) -> bool {
        VecDeque::is_empty(self)
    }

    fn clear(&mut self) {
        VecDeque::clear(self);
    }
}

impl<T> QueueStorage<T> for LinkedList<T> {
    #[inline]
    fn push_back(&mut self, value: T) {
        LinkedList::push_back(self, value);
    }

    #[inline]
    fn pop_front(&mut self) -> Option<T> {
        LinkedList::pop_front(self)
    }

    #[inline]
    fn len(&self) -> usize {
        LinkedList::len(self)
    }

    fn clear(&mut self) {
        LinkedList::clear(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise<S: QueueStorage<u32> + Default>() {
        let mut storage = S::default();
        assert!(storage.is_empty());

        storage.push_back(1);
        storage.push_back(2);
        storage.push_back(3);
        assert_eq!(storage.len(), 3);

        assert_eq!(storage.pop_front(), Some(1));
        assert_eq!(storage.len(), 2);

        storage.clear();
        assert!(storage.is_empty());
        assert_eq!(storage.pop_front(), None);
    }

    #[test]
    fn test_vec_deque_storage() {
        exercise::<VecDeque<u32>>();
    }

    #[test]
    fn test_linked_list_storage() {
        exercise::<LinkedList<u32>>();
    }
}
