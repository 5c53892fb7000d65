//! # Task registry: name → task.
//!
//! ## Rules
//! - Insert (duplicate check, closed check, driver launch) happens under one write
//!   lock, so concurrent registrations of the same name yield exactly one success.
//! - Remove and token cancellation happen under the same write lock; readers never
//!   observe a cancelled task that is still registered by `cancel`.
//! - Task state locks are only taken after the registry lock is released.
//! - Once closed (shutdown), every insert fails with `ShuttingDown`. Entries stay in
//!   place for inspection.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::ConfigError;
use crate::tasks::Task;

#[derive(Default)]
struct Inner {
    tasks: HashMap<String, Arc<Task>>,
    closed: bool,
}

/// Registered tasks of one scheduler.
#[derive(Default)]
pub(crate) struct Registry {
    inner: RwLock<Inner>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers `task` and calls `launch` with it while still holding the write lock.
    pub(crate) async fn insert<F>(&self, task: Arc<Task>, launch: F) -> Result<(), ConfigError>
    where
        F: FnOnce(Arc<Task>),
    {
        let mut inner = self.inner.write().await;
        if inner.closed {
            return Err(ConfigError::ShuttingDown);
        }
        if inner.tasks.contains_key(task.name()) {
            return Err(ConfigError::Duplicate {
                task: task.name().to_string(),
            });
        }
        inner
            .tasks
            .insert(task.name().to_string(), Arc::clone(&task));
        launch(task);
        Ok(())
    }

    /// Removes the entry and cancels its token atomically.
    pub(crate) async fn remove(&self, name: &str) -> Option<Arc<Task>> {
        let mut inner = self.inner.write().await;
        let task = inner.tasks.remove(name)?;
        task.token().cancel();
        Some(task)
    }

    pub(crate) async fn get(&self, name: &str) -> Option<Arc<Task>> {
        self.inner.read().await.tasks.get(name).cloned()
    }

    /// Sorted names of registered tasks.
    pub(crate) async fn names(&self) -> Vec<String> {
        let inner = self.inner.read().await;
        let mut names: Vec<String> = inner.tasks.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    pub(crate) async fn len(&self) -> usize {
        self.inner.read().await.tasks.len()
    }

    /// Rejects further inserts. Returns `true` on the first call only.
    pub(crate) async fn close(&self) -> bool {
        let mut inner = self.inner.write().await;
        !std::mem::replace(&mut inner.closed, true)
    }

    /// Sorted names of tasks whose job is in flight.
    pub(crate) async fn executing(&self) -> Vec<String> {
        let tasks: Vec<Arc<Task>> = self.inner.read().await.tasks.values().cloned().collect();

        let mut stuck = Vec::new();
        for task in tasks {
            if task.is_executing().await {
                stuck.push(task.name().to_string());
            }
        }
        stuck.sort_unstable();
        stuck
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    use crate::error::JobError;
    use crate::tasks::{Admission, JobFn, TaskSpec};

    fn task(name: &str) -> Arc<Task> {
        let spec = TaskSpec::builder(name)
            .every(Duration::from_secs(1))
            .job(JobFn::arc(|| async { Ok::<_, JobError>(()) }))
            .build()
            .expect("valid spec");
        Arc::new(Task::new(spec, Duration::from_secs(1), CancellationToken::new()))
    }

    #[tokio::test]
    async fn duplicate_is_rejected_without_launch() {
        let reg = Registry::new();
        let mut launched = 0;
        reg.insert(task("a"), |_| launched += 1).await.expect("first insert");

        let err = reg.insert(task("a"), |_| launched += 1).await.unwrap_err();
        assert_eq!(err, ConfigError::Duplicate { task: "a".into() });
        assert_eq!(launched, 1);
        assert_eq!(reg.len().await, 1);
    }

    #[tokio::test]
    async fn remove_cancels_token() {
        let reg = Registry::new();
        let t = task("a");
        reg.insert(Arc::clone(&t), |_| {}).await.expect("insert");

        let removed = reg.remove("a").await.expect("present");
        assert!(removed.token().is_cancelled());
        assert!(reg.get("a").await.is_none());
        assert!(reg.remove("a").await.is_none());
    }

    #[tokio::test]
    async fn closed_registry_rejects_inserts() {
        let reg = Registry::new();
        reg.insert(task("a"), |_| {}).await.expect("insert");
        assert!(reg.close().await);
        assert!(!reg.close().await);

        let err = reg.insert(task("b"), |_| {}).await.unwrap_err();
        assert_eq!(err, ConfigError::ShuttingDown);
        assert_eq!(reg.names().await, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn executing_lists_in_flight_tasks() {
        let reg = Registry::new();
        for name in ["c", "a", "b"] {
            reg.insert(task(name), |_| {}).await.expect("insert");
        }
        for name in ["c", "a"] {
            let t = reg.get(name).await.expect("present");
            assert_eq!(t.begin().await, Admission::Admitted);
        }
        assert_eq!(reg.names().await, vec!["a", "b", "c"]);
        assert_eq!(reg.executing().await, vec!["a", "c"]);
    }
}
