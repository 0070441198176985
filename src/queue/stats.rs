/*!
 * Queue Statistics
 * Point-in-time snapshot of a queue
 */

use serde::{Deserialize, Serialize};

/// Queue statistics
///
/// All fields are read under one lock acquisition, so they are mutually
/// consistent (`done == closed && length == 0`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    pub name: Option<String>,
    pub capacity: usize,
    pub length: usize,
    pub closed: bool,
    pub done: bool,
    /// Successful insertions since creation
    pub total_put: u64,
    /// Successful removals since creation (cleared items excluded)
    pub total_get: u64,
}

impl QueueStats {
    /// Free slots before producers block (0 if over capacity)
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.length)
    }
}
