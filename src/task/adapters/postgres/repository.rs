//! `PostgreSQL` repository implementation for task storage and queries.

use super::{
    models::{NewTaskRow, TaskLabelRow, TaskRow},
    schema::{task_labels, tasks},
};
use crate::config::PgPool;
use crate::task::{
    domain::{
        Label, LabelSet, OwnerId, PersistedTaskData, SortDirection, SortField, Task, TaskFilter,
        TaskId, TaskPage, TaskQuery, TaskSort, TaskStatus, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::HashMap;
use uuid::Uuid;


type BoxedTaskQuery = tasks::BoxedQuery<'static, Pg>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);
        let label_rows = to_label_rows(task)?;

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                diesel::insert_into(tasks::table)
                    .values(&new_row)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            TaskRepositoryError::DuplicateTask(task_id)
                        }
                        _ => TaskRepositoryError::persistence(err),
                    })?;
                insert_labels(tx, &label_rows)
            })
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_new_row(task);
        let label_rows = to_label_rows(task)?;

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let updated_count = diesel::update(tasks::table.filter(tasks::id.eq(row.id)))
                    .set((
                        tasks::title.eq(&row.title),
                        tasks::description.eq(&row.description),
                        tasks::status.eq(&row.status),
                        tasks::status_rank.eq(row.status_rank),
                        tasks::updated_at.eq(row.updated_at),
                    ))
                    .execute(tx)?;
                if updated_count == 0 {
                    return Err(TaskRepositoryError::NotFound(task_id));
                }

                diesel::delete(task_labels::table.filter(task_labels::task_id.eq(row.id)))
                    .execute(tx)?;
                insert_labels(tx, &label_rows)
            })
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            // Label rows go with the task through `ON DELETE CASCADE`.
            let deleted_count = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)?;
            if deleted_count == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            // Row and labels come from one snapshot.
            connection
                .build_transaction()
                .read_only()
                .repeatable_read()
                .run::<_, TaskRepositoryError, _>(|tx| {
                    let row = tasks::table
                        .filter(tasks::id.eq(id.into_inner()))
                        .select(TaskRow::as_select())
                        .first::<TaskRow>(tx)
                        .optional()?;
                    let Some(task_row) = row else {
                        return Ok(None);
                    };
                    let mut labels = load_labels(tx, vec![task_row.id])?;
                    let task_labels = labels.remove(&task_row.id).unwrap_or_default();
                    row_to_task(task_row, task_labels).map(Some)
                })
        })
        .await
    }

    async fn query(&self, query: &TaskQuery) -> TaskRepositoryResult<TaskPage> {
        let owned_query = query.clone();

        self.run_blocking(move |connection| {
            let pagination = owned_query.pagination();
            let offset =
                i64::try_from(pagination.offset()).map_err(TaskRepositoryError::persistence)?;
            let limit = i64::from(pagination.limit());

            // Count, page and labels come from one snapshot.
            connection
                .build_transaction()
                .read_only()
                .repeatable_read()
                .run::<_, TaskRepositoryError, _>(|tx| {
                    let total: i64 = filtered_tasks(owned_query.owner_id(), owned_query.filter())
                        .count()
                        .get_result(tx)?;
                    let rows = sorted_page(&owned_query, offset, limit)
                        .select(TaskRow::as_select())
                        .load::<TaskRow>(tx)?;

                    let ids = rows.iter().map(|row| row.id).collect();
                    let mut labels = load_labels(tx, ids)?;
                    let items = rows
                        .into_iter()
                        .map(|row| {
                            let task_labels = labels.remove(&row.id).unwrap_or_default();
                            row_to_task(row, task_labels)
                        })
                        .collect::<TaskRepositoryResult<Vec<_>>>()?;

                    Ok(TaskPage {
                        items,
                        total: u64::try_from(total).map_err(TaskRepositoryError::persistence)?,
                        pagination,
                    })
                })
        })
        .await
    }
}

/// Builds the owner-scoped, filtered task selection without ordering.
///
/// The owner predicate comes first and every optional predicate is joined
/// to it with `AND`; Diesel parenthesises the search `OR` group.
pub(super) fn filtered_tasks(owner_id: OwnerId, filter: &TaskFilter) -> BoxedTaskQuery {
    let mut statement = tasks::table
        .filter(tasks::owner_id.eq(owner_id.into_inner()))
        .into_boxed();

    if let Some(status) = filter.status() {
        statement = statement.filter(tasks::status.eq(status.as_str()));
    }

    if let Some(term) = filter.search() {
        let pattern = format!("%{}%", escape_like(term));
        statement = statement.filter(
            tasks::title
                .ilike(pattern.clone())
                .or(tasks::description.ilike(pattern)),
        );
    }

    if !filter.labels().is_empty() {
        let labelled_task_ids = task_labels::table
            .filter(task_labels::name.eq_any(filter.labels().to_vec()))
            .select(task_labels::task_id);
        statement = statement.filter(tasks::id.eq_any(labelled_task_ids));
    }

    statement
}

/// Applies the sort key, insertion-order tie-break and pagination window.
pub(super) fn sorted_page(query: &TaskQuery, offset: i64, limit: i64) -> BoxedTaskQuery {
    let statement = filtered_tasks(query.owner_id(), query.filter());
    order_by(statement, query.filter().sort())
        .then_order_by(tasks::position.asc())
        .offset(offset)
        .limit(limit)
}

fn order_by(statement: BoxedTaskQuery, sort: TaskSort) -> BoxedTaskQuery {
    match (sort.field, sort.direction) {
        (SortField::CreatedAt, SortDirection::Asc) => statement.order(tasks::created_at.asc()),
        (SortField::CreatedAt, SortDirection::Desc) => statement.order(tasks::created_at.desc()),
        (SortField::UpdatedAt, SortDirection::Asc) => statement.order(tasks::updated_at.asc()),
        (SortField::UpdatedAt, SortDirection::Desc) => statement.order(tasks::updated_at.desc()),
        (SortField::Title, SortDirection::Asc) => statement.order(tasks::title.asc()),
        (SortField::Title, SortDirection::Desc) => statement.order(tasks::title.desc()),
        (SortField::Status, SortDirection::Asc) => statement.order(tasks::status_rank.asc()),
        (SortField::Status, SortDirection::Desc) => statement.order(tasks::status_rank.desc()),
    }
}

/// Escapes `LIKE` metacharacters so the term matches literally.
pub(super) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn insert_labels(connection: &mut PgConnection, rows: &[TaskLabelRow]) -> TaskRepositoryResult<()> {
    if rows.is_empty() {
        return Ok(());
    }
    diesel::insert_into(task_labels::table)
        .values(rows)
        .execute(connection)?;
    Ok(())
}

fn load_labels(
    connection: &mut PgConnection,
    task_ids: Vec<Uuid>,
) -> TaskRepositoryResult<HashMap<Uuid, Vec<Label>>> {
    let rows = task_labels::table
        .filter(task_labels::task_id.eq_any(task_ids))
        .order((task_labels::task_id.asc(), task_labels::ordinal.asc()))
        .select(TaskLabelRow::as_select())
        .load::<TaskLabelRow>(connection)?;

    let mut grouped: HashMap<Uuid, Vec<Label>> = HashMap::new();
    for row in rows {
        let label = Label::new(row.name).map_err(TaskRepositoryError::persistence)?;
        grouped.entry(row.task_id).or_default().push(label);
    }
    Ok(grouped)
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        owner_id: task.owner_id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        status_rank: i16::from(task.status().rank()),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_label_rows(task: &Task) -> TaskRepositoryResult<Vec<TaskLabelRow>> {
    task.labels()
        .iter()
        .enumerate()
        .map(|(index, label)| {
            Ok(TaskLabelRow {
                task_id: task.id().into_inner(),
                name: label.name().to_owned(),
                ordinal: i32::try_from(index).map_err(TaskRepositoryError::persistence)?,
            })
        })
        .collect()
}

fn row_to_task(row: TaskRow, labels: Vec<Label>) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        owner_id,
        title: persisted_title,
        description,
        status: persisted_status,
        created_at,
        updated_at,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskRepositoryError::persistence)?;
    let status =
        TaskStatus::try_from(persisted_status.as_str()).map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        owner_id: OwnerId::from_uuid(owner_id),
        title,
        description,
        status,
        labels: LabelSet::normalized(labels),
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
