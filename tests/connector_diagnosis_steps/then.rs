//! Then steps for connector diagnosis BDD scenarios.

use super::world::DoctorWorld;
use rstest_bdd_macros::then;
use serde_json::Value;

fn field<'a>(envelope: &'a Value, pointer: &str) -> Result<&'a str, eyre::Report> {
    envelope
        .pointer(pointer)
        .and_then(Value::as_str)
        .ok_or_else(|| eyre::eyre!("envelope has no string at {pointer}: {envelope}"))
}

#[then(r#"the listed connectors are "{ids}""#)]
fn listed_connectors_are(world: &DoctorWorld, ids: String) -> Result<(), eyre::Report> {
    let envelope = world.envelope()?;
    let listed: Vec<&str> = envelope
        .get("connectors")
        .and_then(Value::as_array)
        .ok_or_else(|| eyre::eyre!("envelope has no connectors: {envelope}"))?
        .iter()
        .filter_map(|row| row.get("id").and_then(Value::as_str))
        .collect();
    let expected: Vec<&str> = ids.split(',').map(str::trim).collect();
    if listed != expected {
        return Err(eyre::eyre!("expected {expected:?}, listed {listed:?}"));
    }
    Ok(())
}

#[then(r#"the health state is "{state}""#)]
fn health_state_is(world: &DoctorWorld, state: String) -> Result<(), eyre::Report> {
    let actual = field(world.envelope()?, "/health_state")?;
    if actual != state {
        return Err(eyre::eyre!("expected health {state}, got {actual}"));
    }
    Ok(())
}

#[then(r#"the verdict is "{verdict}""#)]
fn verdict_is(world: &DoctorWorld, verdict: String) -> Result<(), eyre::Report> {
    let actual = field(world.envelope()?, "/verdict")?;
    if actual != verdict {
        return Err(eyre::eyre!("expected verdict {verdict}, got {actual}"));
    }
    Ok(())
}

#[then(r#"the first issue is a "{severity}" "{category}" issue"#)]
fn first_issue_is(
    world: &DoctorWorld,
    severity: String,
    category: String,
) -> Result<(), eyre::Report> {
    let envelope = world.envelope()?;
    let actual_severity = field(envelope, "/issues/0/severity")?;
    let actual_category = field(envelope, "/issues/0/category")?;
    if actual_severity != severity || actual_category != category {
        return Err(eyre::eyre!(
            "expected {severity} {category}, got {actual_severity} {actual_category}"
        ));
    }
    Ok(())
}

#[then(r#"the tool fails with "{message}""#)]
fn tool_fails_with(world: &DoctorWorld, message: String) -> Result<(), eyre::Report> {
    let envelope = world.envelope()?;
    let status = field(envelope, "/status")?;
    let error = field(envelope, "/error")?;
    if status != "error" || error != message {
        return Err(eyre::eyre!("expected error '{message}', got {envelope}"));
    }
    Ok(())
}
