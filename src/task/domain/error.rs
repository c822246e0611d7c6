//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or changing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title is longer than the stored column allows.
    #[error("task title is {length} characters long, expected at most {max}")]
    TitleTooLong {
        /// Length of the rejected title in characters.
        length: usize,
        /// Largest accepted length.
        max: usize,
    },

    /// A label name is empty after trimming.
    #[error("label name must not be empty")]
    EmptyLabelName,

    /// A label name is longer than the stored column allows.
    #[error("label name is {length} characters long, expected at most {max}")]
    LabelNameTooLong {
        /// Length of the rejected name in characters.
        length: usize,
        /// Largest accepted length.
        max: usize,
    },

    /// The requested status would move the task backwards.
    #[error("invalid status transition for task {task_id}: {from} -> {to}")]
    InvalidTransition {
        /// Task whose status change was rejected.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// The sort field is not in the sortable allow-list.
    #[error("unsupported sort field: {0}")]
    UnsupportedSortField(String),

    /// The sort direction is neither ascending nor descending.
    #[error("unsupported sort direction: {0}")]
    UnsupportedSortDirection(String),

    /// The pagination limit is zero or above the permitted maximum.
    #[error("invalid page limit {limit}, expected 1..={max}")]
    InvalidPageLimit {
        /// Requested limit.
        limit: u32,
        /// Largest accepted limit.
        max: u32,
    },
}

/// Error returned while parsing task statuses from input or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
