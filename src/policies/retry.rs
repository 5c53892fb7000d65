//! # Retry budget of a task.
//!
//! [`RetryPolicy`] answers one question: after the task has consumed `n` retries,
//! may it retry again?
//!
//! The consumed counter lives on the task and is **never reset** between firings, so
//! the budget covers the whole lifetime of the task. Once exhausted, a recurring task
//! keeps firing on its schedule, but a failing firing is no longer retried.

/// Retry budget.
///
/// `max_retries = 0` disables retries entirely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries over the task lifetime.
    pub max_retries: u32,
}

impl RetryPolicy {
    /// Creates a policy allowing up to `max_retries` retries.
    pub const fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    /// Policy without retries.
    pub const fn none() -> Self {
        Self { max_retries: 0 }
    }

    /// Returns `true` if another retry is allowed once `consumed` retries
    /// (including the one about to run) have been counted.
    #[inline]
    pub fn allows(&self, consumed: u32) -> bool {
        self.max_retries > 0 && consumed <= self.max_retries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_budget_never_retries() {
        let policy = RetryPolicy::none();
        assert!(!policy.allows(0));
        assert!(!policy.allows(1));
    }

    #[test]
    fn budget_is_inclusive() {
        let policy = RetryPolicy::new(3);
        assert!(policy.allows(1));
        assert!(policy.allows(3));
        assert!(!policy.allows(4));
    }
}
