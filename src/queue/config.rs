/*!
 * Queue Configuration
 *
 * Construction-time settings for a queue
 */

use serde::{Deserialize, Serialize};

/// Largest capacity a queue can have; the default, effectively unbounded
pub const MAX_CAPACITY: usize = usize::MAX;

/// Smallest capacity a queue can have; lower requests are clamped up
pub const MIN_CAPACITY: usize = 1;

/// Clamp a requested capacity into the valid range
#[inline]
pub(crate) fn clamp_capacity(capacity: usize) -> usize {
    capacity.max(MIN_CAPACITY)
}

/// Queue configuration
///
/// Deserializable so it can live inside an application's own config file:
///
/// ```
/// use thread_queue::QueueConfig;
///
/// let config: QueueConfig = serde_json::from_str(r#"{"capacity": 64, "name": "inbound"}"#).unwrap();
/// assert_eq!(config.effective_capacity(), 64);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Maximum number of queued items (`None` = unbounded)
    pub capacity: Option<usize>,
    /// Name used in tracing output and statistics
    pub name: Option<String>,
}

impl QueueConfig {
    /// Configuration for an effectively unbounded queue
    pub const fn unbounded() -> Self {
        Self {
            capacity: None,
            name: None,
        }
    }

    /// Configuration for a queue holding at most `capacity` items
    pub const fn bounded(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            name: None,
        }
    }

    /// Attach a name for tracing and statistics
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The capacity a queue built from this configuration starts with
    pub fn effective_capacity(&self) -> usize {
        self.capacity.map_or(MAX_CAPACITY, clamp_capacity)
    }
}
