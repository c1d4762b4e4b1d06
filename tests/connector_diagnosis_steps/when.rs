//! When steps for connector diagnosis BDD scenarios.

use super::world::{DoctorWorld, run_async};
use connector_doctor::tools::{
    handlers,
    params::{ConnectorIdParams, ListParams},
};
use rstest_bdd_macros::when;

#[when(r#"connectors are listed with env "{env}" and status "{status}""#)]
fn connectors_are_listed(world: &mut DoctorWorld, env: String, status: String) {
    let params = ListParams {
        env: Some(env),
        status: Some(status),
    };
    world.last_envelope = Some(run_async(handlers::list_connectors(&world.service, params)));
}

#[when(r#"connector "{id}" is diagnosed"#)]
fn connector_is_diagnosed(world: &mut DoctorWorld, id: String) {
    let params = ConnectorIdParams {
        connector_id: Some(id),
    };
    let envelope = run_async(handlers::diagnose_connector(&world.service, params));
    world.last_envelope = Some(envelope);
}
