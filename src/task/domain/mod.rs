//! Domain model for owner-scoped task tracking.
//!
//! Tasks carry a linear status lifecycle and an ordered, duplicate-free set
//! of labels. All infrastructure concerns stay outside the domain boundary.

mod error;
mod ids;
mod label;
mod query;
mod status;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{OwnerId, TaskId, TaskTitle};
pub use label::{Label, LabelSet, normalize_labels, parse_labels};
pub use query::{
    Pagination, SortDirection, SortField, TaskFilter, TaskPage, TaskQuery, TaskSort,
};
pub use status::{TaskStatus, is_legal_transition, validate_transition};
pub use task::{PersistedTaskData, Task, TaskDraft, TaskPatch};
