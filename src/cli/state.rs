use serde_json::{json, Value};

use crate::api::client::DeltaApi;
use crate::auth::session::Session;
use crate::cli::output::print_json;
use crate::error::AppError;

/// Interpret the argument as a JSON scalar when possible, so numeric and
/// boolean state values are not sent to the API as strings.
fn parse_state_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

pub async fn handle(
    api: &DeltaApi,
    session: &mut Session,
    device: &str,
    state: &str,
    argument: &str,
) -> Result<(), AppError> {
    let command = json!({ state: parse_state_value(argument) });
    let response = api.send_command(session, device, command).await?;
    print_json(&response);
    Ok(())
}
