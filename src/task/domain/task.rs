//! Task aggregate root and its validated partial update.

use super::{
    Label, LabelSet, OwnerId, TaskDomainError, TaskId, TaskStatus, TaskTitle, validate_transition,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    owner_id: OwnerId,
    title: TaskTitle,
    description: Option<String>,
    status: TaskStatus,
    labels: LabelSet,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Owning user; fixed for the lifetime of the task.
    pub owner_id: OwnerId,
    /// Validated title.
    pub title: TaskTitle,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Initial status, usually [`TaskStatus::Open`].
    pub status: TaskStatus,
    /// Initial labels, already normalized.
    pub labels: LabelSet,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner.
    pub owner_id: OwnerId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted labels in insertion order.
    pub labels: LabelSet,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial change set for an existing task.
///
/// Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// Requested status.
    pub status: Option<TaskStatus>,
    /// Replacement label set, possibly containing duplicates.
    pub labels: Option<Vec<Label>>,
}

impl Task {
    /// Creates a new task owned by `draft.owner_id`.
    #[must_use]
    pub fn new(draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            owner_id: draft.owner_id,
            title: draft.title,
            description: draft.description,
            status: draft.status,
            labels: draft.labels,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner_id: data.owner_id,
            title: data.title,
            description: data.description,
            status: data.status,
            labels: data.labels,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    /// Returns whether `owner_id` owns this task.
    #[must_use]
    pub fn is_owned_by(&self, owner_id: OwnerId) -> bool {
        self.owner_id == owner_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the label set.
    #[must_use]
    pub const fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns a copy of this task with `patch` applied.
    ///
    /// The status change is validated before anything else is considered,
    /// so a rejected patch leaves no trace. Replacement labels are
    /// normalized.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when the patch would
    /// move the status backwards.
    pub fn apply(&self, patch: TaskPatch, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        if let Some(proposed) = patch.status {
            validate_transition(self.id, self.status, proposed)?;
        }
        let TaskPatch {
            title,
            description,
            status,
            labels,
        } = patch;

        Ok(Self {
            id: self.id,
            owner_id: self.owner_id,
            title: title.unwrap_or_else(|| self.title.clone()),
            description: description.unwrap_or_else(|| self.description.clone()),
            status: status.unwrap_or(self.status),
            labels: labels.map_or_else(|| self.labels.clone(), LabelSet::normalized),
            created_at: self.created_at,
            updated_at: clock.utc(),
        })
    }

    /// Returns a copy with the incoming labels merged in, or `None` when
    /// every incoming name is already present.
    #[must_use]
    pub fn with_added_labels(
        &self,
        incoming: impl IntoIterator<Item = Label>,
        clock: &impl Clock,
    ) -> Option<Self> {
        let (labels, added) = self.labels.union(incoming);
        if added == 0 {
            return None;
        }
        Some(self.with_labels(labels, clock))
    }

    /// Returns a copy without any label named in `names`.
    #[must_use]
    pub fn with_removed_labels(&self, names: &[String], clock: &impl Clock) -> Self {
        self.with_labels(self.labels.without(names), clock)
    }

    fn with_labels(&self, labels: LabelSet, clock: &impl Clock) -> Self {
        Self {
            labels,
            updated_at: clock.utc(),
            ..self.clone()
        }
    }
}
