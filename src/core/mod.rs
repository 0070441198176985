/*!
 * Core Module
 * Error type and clock helpers shared by the queue
 */

pub mod errors;
pub mod time;

// Re-export for convenience
pub use errors::*;
pub use time::{deadline_after, Deadline};
