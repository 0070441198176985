/*!
 * Error Types
 * The single queue error, with thiserror, miette and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of a blocking queue operation
///
/// # Must Use
/// A failed `put` means the value was not queued; a failed `get` means
/// nothing will ever arrive again.
pub type QueueResult<T> = Result<T, QueueClosed>;

/// The queue was closed while the operation could not proceed.
///
/// Raised by `put` once the queue is closed, and by `get` once it is
/// closed and drained. A closed queue is a normal terminal state, not a
/// fault.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Diagnostic)]
#[error("queue is closed")]
#[diagnostic(
    code(queue::closed),
    help("The queue no longer accepts items and has nothing left to deliver. Stop producing or consuming.")
)]
pub struct QueueClosed;
