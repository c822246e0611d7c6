//! Diesel row models for task persistence.

use super::schema::{task_labels, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
///
/// Ordering columns (`status_rank`, `position`) are only used in SQL.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records. `position` is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Lifecycle rank.
    pub status_rank: i16,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Label row, used for both reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_labels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskLabelRow {
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Label name.
    pub name: String,
    /// Position within the task's label set.
    pub ordinal: i32,
}
