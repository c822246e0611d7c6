//! Service layer for owner-scoped task lifecycle operations.

use crate::task::{
    domain::{
        LabelSet, OwnerId, Pagination, Task, TaskDomainError, TaskDraft, TaskFilter, TaskId,
        TaskPage, TaskPatch, TaskQuery, TaskStatus, TaskTitle, parse_labels, validate_transition,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    status: Option<TaskStatus>,
    labels: Vec<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: None,
            labels: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status instead of [`TaskStatus::Open`].
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the initial labels. Duplicates are dropped on creation.
    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }
}

/// Request payload for a partial task update.
///
/// Fields left unset keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<Option<String>>,
    status: Option<TaskStatus>,
    labels: Option<Vec<String>>,
}

impl UpdateTaskRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Requests a status change.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the whole label set.
    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed, including rejected status transitions.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// No task has the given identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),
    /// The task belongs to a different owner.
    #[error("task {task_id} is not owned by {owner_id}")]
    Forbidden {
        /// Addressed task.
        task_id: TaskId,
        /// Acting owner that was refused.
        owner_id: OwnerId,
    },
}

/// Error kinds surfaced to callers of the task service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskErrorKind {
    /// No task with the given identifier exists.
    NotFound,
    /// The task exists but belongs to someone else.
    Forbidden,
    /// A status regression was requested.
    InvalidTransition,
    /// Input was malformed.
    Validation,
    /// Storage failed; propagated unchanged.
    Storage,
}

impl TaskLifecycleError {
    /// Returns the error's classification.
    #[must_use]
    pub const fn kind(&self) -> TaskErrorKind {
        match self {
            Self::NotFound(_) | Self::Repository(TaskRepositoryError::NotFound(_)) => {
                TaskErrorKind::NotFound
            }
            Self::Forbidden { .. } => TaskErrorKind::Forbidden,
            Self::Domain(TaskDomainError::InvalidTransition { .. }) => {
                TaskErrorKind::InvalidTransition
            }
            Self::Domain(_) => TaskErrorKind::Validation,
            Self::Repository(_) => TaskErrorKind::Storage,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Every operation takes the acting [`OwnerId`] explicitly. Operations that
/// address a task by ID fail with [`TaskLifecycleError::NotFound`] when it
/// does not exist and [`TaskLifecycleError::Forbidden`] when another owner
/// holds it.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    async fn find_owned_task(&self, id: TaskId, owner_id: OwnerId) -> TaskLifecycleResult<Task> {
        let task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))?;
        if !task.is_owned_by(owner_id) {
            tracing::warn!(task_id = %id, owner_id = %owner_id, "task access refused: owner mismatch");
            return Err(TaskLifecycleError::Forbidden {
                task_id: id,
                owner_id,
            });
        }
        Ok(task)
    }

    /// Lists the owner's tasks matching `filter`, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the query fails.
    pub async fn list(
        &self,
        owner_id: OwnerId,
        filter: TaskFilter,
        pagination: Pagination,
    ) -> TaskLifecycleResult<TaskPage> {
        let query = TaskQuery::new(owner_id, filter, pagination);
        let page = self.repository.query(&query).await?;
        tracing::debug!(
            owner_id = %owner_id,
            total = page.total,
            returned = page.items.len(),
            "listed tasks"
        );
        Ok(page)
    }

    /// Retrieves one of the owner's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`], [`TaskLifecycleError::Forbidden`]
    /// or repository errors.
    pub async fn get(&self, id: TaskId, owner_id: OwnerId) -> TaskLifecycleResult<Task> {
        let task = self.find_owned_task(id, owner_id).await?;
        tracing::debug!(task_id = %id, owner_id = %owner_id, "fetched task");
        Ok(task)
    }

    /// Creates a task owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for a blank title or label, or
    /// repository errors.
    pub async fn create(
        &self,
        owner_id: OwnerId,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let draft = TaskDraft {
            owner_id,
            title: TaskTitle::new(request.title)?,
            description: request.description,
            status: request.status.unwrap_or(TaskStatus::Open),
            labels: LabelSet::normalized(parse_labels(request.labels)?),
        };

        let task = Task::new(draft, &*self.clock);
        self.repository.store(&task).await?;
        tracing::info!(task_id = %task.id(), owner_id = %owner_id, "task created");
        Ok(task)
    }

    /// Applies a partial update to one of the owner's tasks.
    ///
    /// The status change is checked before anything else; a rejected
    /// transition aborts the whole request and nothing is persisted. A new
    /// label list replaces the current set after deduplication.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`], [`TaskLifecycleError::Forbidden`],
    /// [`TaskDomainError::InvalidTransition`] (wrapped in
    /// [`TaskLifecycleError::Domain`]), other validation errors, or
    /// repository errors.
    pub async fn update(
        &self,
        id: TaskId,
        owner_id: OwnerId,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let task = self.find_owned_task(id, owner_id).await?;

        if let Some(proposed) = request.status {
            validate_transition(id, task.status(), proposed).inspect_err(|_| {
                tracing::warn!(
                    task_id = %id,
                    from = %task.status(),
                    to = %proposed,
                    "task update rejected: status regression"
                );
            })?;
        }

        let patch = TaskPatch {
            title: request.title.map(TaskTitle::new).transpose()?,
            description: request.description,
            status: request.status,
            labels: request.labels.map(parse_labels).transpose()?,
        };
        let updated = task.apply(patch, &*self.clock)?;
        self.repository.update(&updated).await?;
        tracing::info!(task_id = %id, status = %updated.status(), "task updated");
        Ok(updated)
    }

    /// Deletes one of the owner's tasks together with its labels.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`], [`TaskLifecycleError::Forbidden`]
    /// or repository errors.
    pub async fn delete(&self, id: TaskId, owner_id: OwnerId) -> TaskLifecycleResult<()> {
        self.find_owned_task(id, owner_id).await?;
        self.repository.delete(id).await?;
        tracing::info!(task_id = %id, owner_id = %owner_id, "task deleted");
        Ok(())
    }

    /// Adds labels to one of the owner's tasks.
    ///
    /// Names already on the task, and repeats within `labels`, are skipped.
    /// Nothing is written when no new name remains, so repeating the call is
    /// harmless.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`], [`TaskLifecycleError::Forbidden`],
    /// [`TaskDomainError::EmptyLabelName`] or repository errors.
    pub async fn add_labels(
        &self,
        id: TaskId,
        owner_id: OwnerId,
        labels: Vec<String>,
    ) -> TaskLifecycleResult<Task> {
        let task = self.find_owned_task(id, owner_id).await?;
        let incoming = parse_labels(labels)?;

        let Some(updated) = task.with_added_labels(incoming, &*self.clock) else {
            tracing::debug!(task_id = %id, "no new labels to add");
            return Ok(task);
        };
        self.repository.update(&updated).await?;
        tracing::info!(task_id = %id, labels = updated.labels().len(), "task labels added");
        Ok(updated)
    }

    /// Removes the named labels from one of the owner's tasks.
    ///
    /// Names the task does not hold are ignored, so repeating the call is
    /// harmless.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`], [`TaskLifecycleError::Forbidden`]
    /// or repository errors.
    pub async fn remove_labels(
        &self,
        id: TaskId,
        owner_id: OwnerId,
        names: Vec<String>,
    ) -> TaskLifecycleResult<Task> {
        let task = self.find_owned_task(id, owner_id).await?;
        let updated = task.with_removed_labels(&names, &*self.clock);
        self.repository.update(&updated).await?;
        tracing::info!(task_id = %id, labels = updated.labels().len(), "task labels removed");
        Ok(updated)
    }
}
