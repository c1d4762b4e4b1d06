//! Given steps for connector diagnosis BDD scenarios.

use super::world::DoctorWorld;
use crate::test_helpers::seed_connector;
use connector_doctor::inventory::domain::Group;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use serde_json::json;

#[given(r#"a group "{id}" named "{name}""#)]
fn a_group_named(world: &mut DoctorWorld, id: String, name: String) -> Result<(), eyre::Report> {
    world
        .fetcher
        .insert_group(Group::new(id, name))
        .wrap_err("insert group for scenario")
}

#[given(r#"a failed connector "{id}" in group "{group}""#)]
fn a_failed_connector(
    world: &mut DoctorWorld,
    id: String,
    group: String,
) -> Result<(), eyre::Report> {
    seed_connector(
        &world.fetcher,
        &id,
        &group,
        false,
        json!({"setup_state": "connected", "sync_state": "failed"}),
    )
}

#[given(r#"a healthy connector "{id}" in group "{group}""#)]
fn a_healthy_connector(
    world: &mut DoctorWorld,
    id: String,
    group: String,
) -> Result<(), eyre::Report> {
    seed_connector(
        &world.fetcher,
        &id,
        &group,
        false,
        json!({"setup_state": "connected", "sync_state": "scheduled"}),
    )
}

#[given(r#"a paused connector "{id}" in group "{group}""#)]
fn a_paused_connector(
    world: &mut DoctorWorld,
    id: String,
    group: String,
) -> Result<(), eyre::Report> {
    seed_connector(
        &world.fetcher,
        &id,
        &group,
        true,
        json!({"setup_state": "connected", "sync_state": "syncing"}),
    )
}

#[given(r#"a connector "{id}" with broken setup in group "{group}""#)]
fn a_broken_connector(
    world: &mut DoctorWorld,
    id: String,
    group: String,
) -> Result<(), eyre::Report> {
    seed_connector(
        &world.fetcher,
        &id,
        &group,
        false,
        json!({"setup_state": "broken", "sync_state": "scheduled"}),
    )
}
