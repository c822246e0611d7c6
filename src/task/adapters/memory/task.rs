//! In-memory repository for task tracking tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskId, TaskPage, TaskQuery},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Each write replaces the whole stored aggregate under a single write lock,
/// so readers never see a half-applied label set.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, StoredTask>,
    next_position: u64,
}

/// A task plus its insertion position, used to break sort ties.
#[derive(Debug, Clone)]
struct StoredTask {
    position: u64,
    task: Task,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn window<T>(rows: Vec<T>, offset: u64, limit: u32) -> Vec<T> {
    let skip = usize::try_from(offset).unwrap_or(usize::MAX);
    let take = usize::try_from(limit).unwrap_or(usize::MAX);
    rows.into_iter().skip(skip).take(take).collect()
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }

        let position = state.next_position;
        state.next_position += 1;
        state.tasks.insert(
            task.id(),
            StoredTask {
                position,
                task: task.clone(),
            },
        );
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        stored.task = task.clone();
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.get(&id).map(|stored| stored.task.clone()))
    }

    async fn query(&self, query: &TaskQuery) -> TaskRepositoryResult<TaskPage> {
        let state = self.state.read().map_err(lock_error)?;
        let sort = query.filter().sort();

        let mut matching: Vec<&StoredTask> = state
            .tasks
            .values()
            .filter(|stored| query.matches(&stored.task))
            .collect();
        matching.sort_by(|left, right| {
            sort.compare(&left.task, &right.task)
                .then(left.position.cmp(&right.position))
        });

        let total = u64::try_from(matching.len()).map_err(TaskRepositoryError::persistence)?;
        let pagination = query.pagination();
        let items = window(matching, pagination.offset(), pagination.limit())
            .into_iter()
            .map(|stored| stored.task.clone())
            .collect();

        Ok(TaskPage {
            items,
            total,
            pagination,
        })
    }
}
