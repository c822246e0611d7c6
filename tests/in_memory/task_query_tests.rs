//! In-memory integration tests for filtered, sorted and paginated listing.

use super::helpers::{FrozenService, TestService, frozen_service, owner, seed, service, titles};
use eyre::ensure;
use rstest::rstest;
use taskmill::task::{
    domain::{OwnerId, Pagination, SortDirection, SortField, TaskFilter, TaskSort, TaskStatus},
    services::{CreateTaskRequest, UpdateTaskRequest},
};

#[rstest]
#[case(SortDirection::Desc)]
#[case(SortDirection::Asc)]
#[tokio::test(flavor = "multi_thread")]
async fn equal_sort_keys_fall_back_to_insertion_order(
    frozen_service: FrozenService,
    owner: OwnerId,
    #[case] direction: SortDirection,
) -> eyre::Result<()> {
    for title in ["first", "second", "third"] {
        frozen_service
            .create(owner, CreateTaskRequest::new(title))
            .await?;
    }
    let filter = TaskFilter::new().with_sort(TaskSort::new(SortField::CreatedAt, direction));

    let whole = frozen_service
        .list(owner, filter.clone(), Pagination::default())
        .await?;
    let head = frozen_service
        .list(owner, filter.clone(), Pagination::new(0, 2)?)
        .await?;
    let tail = frozen_service
        .list(owner, filter, Pagination::new(2, 2)?)
        .await?;

    ensure!(titles(&whole.items) == vec!["first", "second", "third"]);
    ensure!(titles(&head.items) == vec!["first", "second"]);
    ensure!(titles(&tail.items) == vec!["third"]);
    ensure!(head.total == 3 && tail.total == 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn default_listing_is_newest_first(
    service: TestService,
    owner: OwnerId,
) -> eyre::Result<()> {
    for title in ["first", "second", "third"] {
        seed(&service, owner, title, &[]).await?;
    }

    let page = service
        .list(owner, TaskFilter::new(), Pagination::default())
        .await?;

    ensure!(page.total == 3);
    ensure!(
        page.items
            .windows(2)
            .all(|pair| matches!(pair, [newer, older] if newer.created_at() >= older.created_at()))
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn title_sort_orders_alphabetically(
    service: TestService,
    owner: OwnerId,
) -> eyre::Result<()> {
    for title in ["Charlie", "Alpha", "Bravo"] {
        seed(&service, owner, title, &[]).await?;
    }
    let filter = TaskFilter::new().with_sort(TaskSort::parse("title", "asc")?);

    let page = service.list(owner, filter, Pagination::default()).await?;

    ensure!(titles(&page.items) == vec!["Alpha", "Bravo", "Charlie"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_sort_uses_lifecycle_rank(
    service: TestService,
    owner: OwnerId,
) -> eyre::Result<()> {
    for (title, status) in [
        ("done", TaskStatus::Done),
        ("open", TaskStatus::Open),
        ("started", TaskStatus::InProgress),
    ] {
        service
            .create(owner, CreateTaskRequest::new(title).with_status(status))
            .await?;
    }
    let filter =
        TaskFilter::new().with_sort(TaskSort::new(SortField::Status, SortDirection::Desc));

    let page = service.list(owner, filter, Pagination::default()).await?;

    ensure!(titles(&page.items) == vec!["done", "started", "open"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn filters_combine_and_total_ignores_window(
    service: TestService,
    owner: OwnerId,
) -> eyre::Result<()> {
    for (index, label) in ["even", "odd"].into_iter().cycle().take(7).enumerate() {
        seed(&service, owner, &format!("Report {index}"), &[label]).await?;
    }
    seed(&service, owner, "Unrelated", &["even"]).await?;

    let filter = TaskFilter::new()
        .with_search("report")
        .with_labels(["even"])
        .with_sort(TaskSort::new(SortField::Title, SortDirection::Asc));
    let page = service
        .list(owner, filter, Pagination::new(1, 2)?)
        .await?;

    ensure!(page.total == 4);
    ensure!(titles(&page.items) == vec!["Report 2", "Report 4"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn offset_past_end_returns_empty_page_with_total(
    service: TestService,
    owner: OwnerId,
) -> eyre::Result<()> {
    seed(&service, owner, "Only", &[]).await?;

    let page = service
        .list(owner, TaskFilter::new(), Pagination::new(10, 5)?)
        .await?;

    ensure!(page.total == 1);
    ensure!(page.items.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_treats_wildcards_literally(
    service: TestService,
    owner: OwnerId,
) -> eyre::Result<()> {
    seed(&service, owner, "100% done", &[]).await?;
    seed(&service, owner, "100 percent", &[]).await?;

    let page = service
        .list(
            owner,
            TaskFilter::new().with_search("100%"),
            Pagination::default(),
        )
        .await?;

    ensure!(titles(&page.items) == vec!["100% done"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_filter_follows_updates(
    service: TestService,
    owner: OwnerId,
) -> eyre::Result<()> {
    let task = seed(&service, owner, "Moving", &[]).await?;
    seed(&service, owner, "Staying", &[]).await?;
    service
        .update(
            task.id(),
            owner,
            UpdateTaskRequest::new().with_status(TaskStatus::InProgress),
        )
        .await?;

    let page = service
        .list(
            owner,
            TaskFilter::new().with_status(TaskStatus::InProgress),
            Pagination::default(),
        )
        .await?;

    ensure!(titles(&page.items) == vec!["Moving"]);
    Ok(())
}
