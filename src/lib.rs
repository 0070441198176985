/*!
 * Thread Queue Library
 * Blocking FIFO queue for handing values between producer and consumer threads
 */

pub mod core;
pub mod monitoring;
pub mod queue;

// Re-exports
pub use crate::core::{Deadline, QueueClosed, QueueResult};
pub use monitoring::init_tracing;
pub use queue::{
    QueueConfig, QueueStats, QueueStorage, SharedQueue, ThreadQueue, MAX_CAPACITY, MIN_CAPACITY,
};
