//! Diesel schema for task persistence.

diesel::table! {
    /// Task records, one row per task.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning user.
        owner_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Lifecycle status in canonical string form.
        #[max_length = 50]
        status -> Varchar,
        /// Lifecycle rank of `status`, used for status ordering.
        status_rank -> Int2,
        /// Insertion sequence, used to break sort ties.
        position -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Labels held by tasks, keyed by `(task_id, name)`.
    task_labels (task_id, name) {
        /// Owning task.
        task_id -> Uuid,
        /// Label name.
        #[max_length = 255]
        name -> Varchar,
        /// Position of the label within its task's set.
        ordinal -> Int4,
    }
}

diesel::joinable!(task_labels -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, task_labels);
