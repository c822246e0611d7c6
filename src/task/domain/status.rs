//! Task status and the linear lifecycle it follows.
//!
//! Statuses are totally ordered `open < in_progress < done`. A task may stay
//! where it is or move forward, never backwards.

use super::{ParseTaskStatusError, TaskDomainError, TaskId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not started.
    Open,
    /// Work is underway.
    InProgress,
    /// Work is finished.
    Done,
}

impl TaskStatus {
    /// Every status in rank order.
    pub const ALL: [Self; 3] = [Self::Open, Self::InProgress, Self::Done];

    /// Returns the position of this status in the lifecycle.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Open => 0,
            Self::InProgress => 1,
            Self::Done => 2,
        }
    }

    /// Returns whether moving from `self` to `target` is permitted.
    ///
    /// Staying at the same status is allowed and acts as a no-op.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        target.rank() >= self.rank()
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Returns whether `proposed` may follow `current`.
#[must_use]
pub const fn is_legal_transition(current: TaskStatus, proposed: TaskStatus) -> bool {
    current.can_transition_to(proposed)
}

/// Checks a status change for the given task.
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidTransition`] when `proposed` ranks below
/// `current`.
pub const fn validate_transition(
    task_id: TaskId,
    current: TaskStatus,
    proposed: TaskStatus,
) -> Result<(), TaskDomainError> {
    if is_legal_transition(current, proposed) {
        Ok(())
    } else {
        Err(TaskDomainError::InvalidTransition {
            task_id,
            from: current,
            to: proposed,
        })
    }
}
