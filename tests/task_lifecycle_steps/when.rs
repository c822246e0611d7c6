//! When steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async, split_labels};
use rstest_bdd_macros::when;
use taskmill::task::{
    domain::{OwnerId, TaskStatus},
    services::UpdateTaskRequest,
};
use uuid::Uuid;

fn parse_status(raw: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(raw).map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))
}

#[when(r#"the owner changes the status to "{status}""#)]
fn change_status(world: &mut TaskLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    let request = UpdateTaskRequest::new().with_status(parse_status(&status)?);

    let result = run_async(world.service.update(id, world.owner, request));
    world.record(result);
    Ok(())
}

#[when(r#"the owner updates the task with status "{status}", title "{title}" and labels "{labels}""#)]
fn update_task(
    world: &mut TaskLifecycleWorld,
    status: String,
    title: String,
    labels: String,
) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    let request = UpdateTaskRequest::new()
        .with_status(parse_status(&status)?)
        .with_title(title)
        .with_labels(split_labels(&labels));

    let result = run_async(world.service.update(id, world.owner, request));
    world.record(result);
    Ok(())
}

#[when(r#"the owner adds the labels "{labels}""#)]
fn add_labels(world: &mut TaskLifecycleWorld, labels: String) -> Result<(), eyre::Report> {
    let id = world.task()?.id();

    let result = run_async(
        world
            .service
            .add_labels(id, world.owner, split_labels(&labels)),
    );
    world.record(result);
    Ok(())
}

#[when(r#"the owner removes the labels "{labels}""#)]
fn remove_labels(world: &mut TaskLifecycleWorld, labels: String) -> Result<(), eyre::Report> {
    let id = world.task()?.id();

    let result = run_async(
        world
            .service
            .remove_labels(id, world.owner, split_labels(&labels)),
    );
    world.record(result);
    Ok(())
}

#[when("another user fetches the task")]
fn another_user_fetches(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    let stranger = OwnerId::from_uuid(Uuid::new_v4());

    let result = run_async(world.service.get(id, stranger));
    world.last_result = Some(result);
    Ok(())
}
