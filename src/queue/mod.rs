/*!
 * Queue Module
 *
 * Thread-safe blocking FIFO queue for handing values between threads,
 * typically from a delivery callback on a transport thread to application
 * code waiting synchronously for the next item.
 *
 * # Operations
 *
 * - **Insertion**: `put` (blocking), `try_put` / `offer` (non-blocking),
 *   `try_put_for` / `try_put_until` and `offer_for` / `offer_until` (bounded)
 * - **Removal**: `get` (blocking), `try_get` (non-blocking),
 *   `try_get_for` / `try_get_until` (bounded)
 * - **Lifecycle**: `close`, `clear`, `set_capacity`
 *
 * # Concurrency
 *
 * Any number of producers and consumers may share one queue. All operations
 * are serialized by a single lock per queue; items leave in exactly the
 * order they were accepted.
 */

mod config;
mod insert;
mod iter;
mod remove;
mod stats;
mod storage;
mod thread_queue;

#[cfg(feature = "tokio")]
mod async_bridge;

// Re-export public API
pub use config::{QueueConfig, MAX_CAPACITY, MIN_CAPACITY};
pub use iter::{Iter, TryIter};
pub use stats::QueueStats;
pub use storage::QueueStorage;
pub use thread_queue::{SharedQueue, ThreadQueue};
