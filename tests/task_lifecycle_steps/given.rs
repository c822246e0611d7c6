//! Given steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async, split_labels};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskmill::task::{domain::TaskStatus, services::CreateTaskRequest};

#[given(r#"an owner has a task titled "{title}" with status "{status}" and labels "{labels}""#)]
fn owner_has_task(
    world: &mut TaskLifecycleWorld,
    title: String,
    status: String,
    labels: String,
) -> Result<(), eyre::Report> {
    let initial = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let request = CreateTaskRequest::new(title)
        .with_status(initial)
        .with_labels(split_labels(&labels));

    let created = run_async(world.service.create(world.owner, request))
        .wrap_err("create task for lifecycle scenario")?;
    world.task = Some(created);
    Ok(())
}
