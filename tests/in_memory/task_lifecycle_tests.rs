//! In-memory integration tests for task lifecycle operations.

use super::helpers::{TestService, label_names, owner, seed, service};
use eyre::ensure;
use rstest::rstest;
use taskmill::task::{
    domain::{OwnerId, Pagination, TaskFilter, TaskStatus},
    services::{TaskErrorKind, UpdateTaskRequest},
};
use uuid::Uuid;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_walks_forward_through_lifecycle(
    service: TestService,
    owner: OwnerId,
) -> eyre::Result<()> {
    let task = seed(&service, owner, "Release 1.0", &["release"]).await?;

    let started = service
        .update(
            task.id(),
            owner,
            UpdateTaskRequest::new().with_status(TaskStatus::InProgress),
        )
        .await?;
    let finished = service
        .update(
            task.id(),
            owner,
            UpdateTaskRequest::new().with_status(TaskStatus::Done),
        )
        .await?;

    ensure!(started.status() == TaskStatus::InProgress);
    ensure!(finished.status() == TaskStatus::Done);
    ensure!(finished.created_at() == task.created_at());
    ensure!(finished.updated_at() >= started.updated_at());
    ensure!(service.get(task.id(), owner).await? == finished);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn done_task_cannot_be_reopened(service: TestService, owner: OwnerId) -> eyre::Result<()> {
    let task = seed(&service, owner, "Closed", &["x"]).await?;
    service
        .update(
            task.id(),
            owner,
            UpdateTaskRequest::new().with_status(TaskStatus::Done),
        )
        .await?;

    let result = service
        .update(
            task.id(),
            owner,
            UpdateTaskRequest::new()
                .with_status(TaskStatus::InProgress)
                .with_title("Reopened")
                .with_labels(["y"]),
        )
        .await;

    ensure!(
        result.as_ref().err().map(|err| err.kind()) == Some(TaskErrorKind::InvalidTransition),
        "expected invalid transition, got {result:?}"
    );
    let stored = service.get(task.id(), owner).await?;
    ensure!(stored.title().as_str() == "Closed");
    ensure!(label_names(&stored) == vec!["x"]);
    ensure!(stored.status() == TaskStatus::Done);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn another_owner_never_sees_or_changes_task(
    service: TestService,
    owner: OwnerId,
) -> eyre::Result<()> {
    let intruder = OwnerId::from_uuid(Uuid::new_v4());
    let task = seed(&service, owner, "Mine", &["private"]).await?;

    let listed = service
        .list(
            intruder,
            TaskFilter::new().with_search("Mine"),
            Pagination::default(),
        )
        .await?;
    ensure!(listed.total == 0);
    ensure!(listed.items.is_empty());

    let deleted = service.delete(task.id(), intruder).await;
    ensure!(
        deleted.as_ref().err().map(|err| err.kind()) == Some(TaskErrorKind::Forbidden),
        "expected forbidden, got {deleted:?}"
    );
    ensure!(service.get(task.id(), owner).await? == task);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn label_membership_round_trip(service: TestService, owner: OwnerId) -> eyre::Result<()> {
    let task = seed(&service, owner, "Labels", &["bug"]).await?;

    let added = service
        .add_labels(
            task.id(),
            owner,
            vec!["bug".to_owned(), "bug".to_owned(), "new".to_owned()],
        )
        .await?;
    ensure!(label_names(&added) == vec!["bug", "new"]);

    let repeated = service
        .add_labels(task.id(), owner, vec!["new".to_owned()])
        .await?;
    ensure!(repeated.updated_at() == added.updated_at());

    let removed = service
        .remove_labels(task.id(), owner, vec!["bug".to_owned()])
        .await?;
    let removed_again = service
        .remove_labels(task.id(), owner, vec!["bug".to_owned()])
        .await?;
    ensure!(label_names(&removed) == vec!["new"]);
    ensure!(label_names(&removed_again) == vec!["new"]);

    let stored = service.get(task.id(), owner).await?;
    ensure!(label_names(&stored) == vec!["new"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn labels_are_case_sensitive(service: TestService, owner: OwnerId) -> eyre::Result<()> {
    let task = seed(&service, owner, "Case", &["Bug"]).await?;

    let updated = service
        .add_labels(task.id(), owner, vec!["bug".to_owned()])
        .await?;

    ensure!(label_names(&updated) == vec!["Bug", "bug"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_drops_out_of_listing(
    service: TestService,
    owner: OwnerId,
) -> eyre::Result<()> {
    let keep = seed(&service, owner, "Keep", &["shared"]).await?;
    let drop = seed(&service, owner, "Drop", &["shared"]).await?;

    service.delete(drop.id(), owner).await?;

    let page = service
        .list(
            owner,
            TaskFilter::new().with_labels(["shared"]),
            Pagination::default(),
        )
        .await?;
    ensure!(page.total == 1);
    ensure!(page.items == vec![keep]);

    let again = service.delete(drop.id(), owner).await;
    ensure!(again.as_ref().err().map(|err| err.kind()) == Some(TaskErrorKind::NotFound));
    Ok(())
}
