//! Then steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async, split_labels};
use rstest_bdd_macros::then;
use taskmill::task::{
    domain::{Task, TaskStatus},
    services::TaskErrorKind,
};

fn label_names(task: &Task) -> Vec<String> {
    task.labels().names().map(str::to_owned).collect()
}

fn expect_error_kind(
    world: &TaskLifecycleWorld,
    expected: TaskErrorKind,
) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result"))?;

    match result {
        Err(err) if err.kind() == expected => Ok(()),
        other => Err(eyre::eyre!("expected {expected:?} error, got {other:?}")),
    }
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = world.task()?;

    eyre::ensure!(
        task.status() == expected,
        "expected status {expected}, found {}",
        task.status()
    );
    Ok(())
}

#[then(r#"the task labels are "{labels}""#)]
fn task_labels_are(world: &TaskLifecycleWorld, labels: String) -> Result<(), eyre::Report> {
    let task = world.task()?;
    let stored = run_async(world.service.get(task.id(), world.owner))?;

    eyre::ensure!(
        label_names(&stored) == split_labels(&labels),
        "expected labels {labels}, found {:?}",
        label_names(&stored)
    );
    Ok(())
}

#[then("the request fails with an invalid transition error")]
fn fails_with_invalid_transition(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    expect_error_kind(world, TaskErrorKind::InvalidTransition)
}

#[then("the request fails with a forbidden error")]
fn fails_with_forbidden(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    expect_error_kind(world, TaskErrorKind::Forbidden)
}

#[then(r#"the stored task has title "{title}", status "{status}" and labels "{labels}""#)]
fn stored_task_matches(
    world: &TaskLifecycleWorld,
    title: String,
    status: String,
    labels: String,
) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    let stored = run_async(world.service.get(id, world.owner))?;

    eyre::ensure!(stored.title().as_str() == title, "title changed");
    eyre::ensure!(stored.status().as_str() == status, "status changed");
    eyre::ensure!(
        label_names(&stored) == split_labels(&labels),
        "labels changed"
    );
    Ok(())
}
