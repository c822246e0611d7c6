//! Shared world state for task lifecycle BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskmill::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{OwnerId, Task},
    services::{TaskLifecycleError, TaskLifecycleService},
};
use uuid::Uuid;

/// Service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for task lifecycle behaviour tests.
pub struct TaskLifecycleWorld {
    pub service: TestTaskService,
    pub owner: OwnerId,
    pub task: Option<Task>,
    pub last_result: Option<Result<Task, TaskLifecycleError>>,
}

impl TaskLifecycleWorld {
    /// Creates a world with a fresh owner and no tasks.
    #[must_use]
    pub fn new() -> Self {
        let service = TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            owner: OwnerId::from_uuid(Uuid::new_v4()),
            task: None,
            last_result: None,
        }
    }

    /// Returns the task created by the scenario's setup.
    ///
    /// # Errors
    ///
    /// Returns an error when no task was created.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Stores an operation result, tracking the task when it succeeded.
    pub fn record(&mut self, result: Result<Task, TaskLifecycleError>) {
        if let Ok(ref updated) = result {
            self.task = Some(updated.clone());
        }
        self.last_result = Some(result);
    }
}

impl Default for TaskLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskLifecycleWorld {
    TaskLifecycleWorld::default()
}

/// Splits a comma-separated step argument into label names.
#[must_use]
pub fn split_labels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
