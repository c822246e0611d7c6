//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::{Clock, DefaultClock};
use rstest::fixture;
use taskmill::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{OwnerId, Task},
    services::{CreateTaskRequest, TaskLifecycleResult, TaskLifecycleService},
};
use uuid::Uuid;

/// Task service backed by the in-memory repository.
pub type TestService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Provides a fresh service for each test.
#[fixture]
pub fn service() -> TestService {
    TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    )
}

/// Clock frozen at a single instant, so every task shares its timestamps.
#[derive(Debug, Clone, Copy)]
pub struct FrozenClock(pub DateTime<Utc>);

impl Clock for FrozenClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Task service whose clock never advances.
pub type FrozenService = TaskLifecycleService<InMemoryTaskRepository, FrozenClock>;

/// Provides a service backed by a [`FrozenClock`].
#[fixture]
pub fn frozen_service() -> FrozenService {
    let instant = Utc
        .with_ymd_and_hms(2026, 1, 5, 9, 30, 0)
        .single()
        .unwrap_or_else(Utc::now);
    TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(FrozenClock(instant)),
    )
}

/// Provides a random owner.
#[fixture]
pub fn owner() -> OwnerId {
    OwnerId::from_uuid(Uuid::new_v4())
}

/// Creates a task with the given title and labels.
///
/// # Errors
///
/// Returns the service error when creation fails.
pub async fn seed(
    service: &TestService,
    owner: OwnerId,
    title: &str,
    labels: &[&str],
) -> TaskLifecycleResult<Task> {
    service
        .create(
            owner,
            CreateTaskRequest::new(title).with_labels(labels.iter().copied()),
        )
        .await
}

/// Returns the label names of `task` in order.
#[must_use]
pub fn label_names(task: &Task) -> Vec<String> {
    task.labels().names().map(str::to_owned).collect()
}

/// Returns the titles of `tasks` in order.
#[must_use]
pub fn titles(tasks: &[Task]) -> Vec<String> {
    tasks
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect()
}
