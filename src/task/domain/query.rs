//! Owner-scoped task query composition.
//!
//! A [`TaskQuery`] bundles the owner scope with optional filters, a single
//! allow-listed sort key and a pagination window. Repositories execute it;
//! the matching and ordering rules here are the reference semantics every
//! adapter reproduces.

use super::{OwnerId, Task, TaskDomainError, TaskStatus};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Fields a caller may sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Creation timestamp.
    #[default]
    CreatedAt,
    /// Latest modification timestamp.
    UpdatedAt,
    /// Title text.
    Title,
    /// Status, ordered by lifecycle rank.
    Status,
}

impl SortField {
    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Title => "title",
            Self::Status => "status",
        }
    }
}

impl TryFrom<&str> for SortField {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "created_at" => Ok(Self::CreatedAt),
            "updated_at" => Ok(Self::UpdatedAt),
            "title" => Ok(Self::Title),
            "status" => Ok(Self::Status),
            _ => Err(TaskDomainError::UnsupportedSortField(value.to_owned())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

impl TryFrom<&str> for SortDirection {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(TaskDomainError::UnsupportedSortDirection(value.to_owned())),
        }
    }
}

/// Sort key and direction. Defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskSort {
    /// Field to order by.
    pub field: SortField,
    /// Direction to order in.
    pub direction: SortDirection,
}

impl TaskSort {
    /// Creates a sort specification.
    #[must_use]
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Parses caller-supplied field and direction strings.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnsupportedSortField`] or
    /// [`TaskDomainError::UnsupportedSortDirection`] for values outside the
    /// allow-list.
    pub fn parse(field: &str, direction: &str) -> Result<Self, TaskDomainError> {
        Ok(Self {
            field: SortField::try_from(field)?,
            direction: SortDirection::try_from(direction)?,
        })
    }

    /// Orders two tasks by this sort key alone.
    ///
    /// Equal keys compare as [`Ordering::Equal`]; adapters break the tie by
    /// insertion order.
    #[must_use]
    pub fn compare(&self, left: &Task, right: &Task) -> Ordering {
        let ordering = match self.field {
            SortField::CreatedAt => left.created_at().cmp(&right.created_at()),
            SortField::UpdatedAt => left.updated_at().cmp(&right.updated_at()),
            SortField::Title => left.title().as_str().cmp(right.title().as_str()),
            SortField::Status => left.status().rank().cmp(&right.status().rank()),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Optional predicates narrowing an owner's tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    status: Option<TaskStatus>,
    search: Option<String>,
    labels: Vec<String>,
    sort: TaskSort,
}

impl TaskFilter {
    /// Creates a filter that matches every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to one status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts results to tasks whose title or description contains the
    /// term, ignoring case. Blank terms are ignored.
    #[must_use]
    pub fn with_search(mut self, term: impl AsRef<str>) -> Self {
        let trimmed = term.as_ref().trim();
        self.search = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Restricts results to tasks holding at least one of the named labels.
    #[must_use]
    pub fn with_labels<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the sort key.
    #[must_use]
    pub const fn with_sort(mut self, sort: TaskSort) -> Self {
        self.sort = sort;
        self
    }

    /// Returns the status predicate.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the trimmed search term.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Returns the label names of the membership predicate.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the sort specification.
    #[must_use]
    pub const fn sort(&self) -> TaskSort {
        self.sort
    }

    /// Returns whether `task` satisfies every predicate.
    ///
    /// Owner scope is not part of the filter; see [`TaskQuery::matches`].
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let status_matches = self.status.is_none_or(|status| task.status() == status);
        let search_matches = self
            .search
            .as_deref()
            .is_none_or(|term| contains_ignoring_case(task, term));
        let labels_match = self.labels.is_empty() || task.labels().contains_any(&self.labels);
        status_matches && search_matches && labels_match
    }
}

fn contains_ignoring_case(task: &Task, term: &str) -> bool {
    let needle = term.to_lowercase();
    task.title().as_str().to_lowercase().contains(&needle)
        || task
            .description()
            .is_some_and(|description| description.to_lowercase().contains(&needle))
}

/// Zero-based offset and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    offset: u64,
    limit: u32,
}

impl Pagination {
    /// Page size used when the caller does not pick one.
    pub const DEFAULT_LIMIT: u32 = 10;
    /// Largest accepted page size.
    pub const MAX_LIMIT: u32 = 100;

    /// Creates a validated pagination window.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPageLimit`] when `limit` is zero or
    /// above [`Self::MAX_LIMIT`].
    pub const fn new(offset: u64, limit: u32) -> Result<Self, TaskDomainError> {
        if limit == 0 || limit > Self::MAX_LIMIT {
            return Err(TaskDomainError::InvalidPageLimit {
                limit,
                max: Self::MAX_LIMIT,
            });
        }
        Ok(Self { offset, limit })
    }

    /// Returns the number of rows skipped.
    #[must_use]
    pub const fn offset(self) -> u64 {
        self.offset
    }

    /// Returns the maximum number of rows returned.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// Executable, owner-scoped task query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    owner_id: OwnerId,
    filter: TaskFilter,
    pagination: Pagination,
}

impl TaskQuery {
    /// Composes a query over `owner_id`'s tasks.
    #[must_use]
    pub const fn new(owner_id: OwnerId, filter: TaskFilter, pagination: Pagination) -> Self {
        Self {
            owner_id,
            filter,
            pagination,
        }
    }

    /// Returns the owner every result must belong to.
    #[must_use]
    pub const fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    /// Returns the filter predicates.
    #[must_use]
    pub const fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    /// Returns the pagination window.
    #[must_use]
    pub const fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Returns whether `task` belongs to the owner and passes the filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        task.is_owned_by(self.owner_id) && self.filter.matches(task)
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPage {
    /// Tasks inside the pagination window, in sort order.
    pub items: Vec<Task>,
    /// Number of matching tasks before pagination.
    pub total: u64,
    /// Window the items were taken from.
    pub pagination: Pagination,
}
