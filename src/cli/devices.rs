use serde::Deserialize;
use serde_json::Value;
use tabled::Tabled;

use crate::api::client::DeltaApi;
use crate::auth::session::Session;
use crate::cli::output::{print_json, print_table};
use crate::config::{OutputMode, RuntimeConfig};
use crate::error::AppError;

/// Subset of an appliance record used for table rendering. The full record
/// stays opaque JSON; unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplianceRecord {
    #[serde(alias = "name")]
    appliance_name: Option<String>,
    #[serde(alias = "model")]
    model_name: Option<String>,
    #[serde(alias = "applianceId", alias = "id")]
    pnc_id: Option<String>,
}

impl ApplianceRecord {
    fn from_json(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }
}

#[derive(Tabled)]
struct ApplianceRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "MODEL")]
    model: String,
    #[tabled(rename = "ID")]
    id: String,
}

fn appliance_row(value: &Value) -> ApplianceRow {
    let record = ApplianceRecord::from_json(value);
    ApplianceRow {
        name: record.appliance_name.unwrap_or_else(|| "-".into()),
        model: record.model_name.unwrap_or_else(|| "-".into()),
        id: record.pnc_id.unwrap_or_else(|| "-".into()),
    }
}

pub async fn handle_list(
    api: &DeltaApi,
    session: &mut Session,
    config: &RuntimeConfig,
) -> Result<(), AppError> {
    let appliances = api.get_appliances(session).await?;

    if config.output_mode == OutputMode::Table {
        let rows: Vec<ApplianceRow> = appliances
            .as_array()
            .map(|list| list.iter().map(appliance_row).collect())
            .unwrap_or_default();
        print_table(&rows);
    } else {
        print_json(&appliances);
    }

    Ok(())
}

pub async fn handle_info(
    api: &DeltaApi,
    session: &mut Session,
    device: &str,
) -> Result<(), AppError> {
    let appliance = api.get_appliance(session, device).await?;
    print_json(&appliance);
    Ok(())
}

pub async fn handle_data(
    api: &DeltaApi,
    session: &mut Session,
    device: &str,
) -> Result<(), AppError> {
    let appliance = api.get_appliance(session, device).await?;

    // Sensor readings live in the device twin; fall back to the full record
    // when the API returns a different shape.
    match appliance.pointer("/twin/properties/reported") {
        Some(reported) => print_json(reported),
        None => print_json(&appliance),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn row_prefers_vendor_field_names() {
        let record = json!({
            "applianceName": "Living room",
            "modelName": "PUREA9",
            "pncId": "950011538111111111",
        });
        let row = appliance_row(&record);
        assert_eq!(row.name, "Living room");
        assert_eq!(row.model, "PUREA9");
        assert_eq!(row.id, "950011538111111111");
    }

    #[test]
    fn row_accepts_alias_field_names() {
        let record = json!({
            "name": "Bedroom",
            "model": "PUREA9",
            "applianceId": "950011538122222222",
        });
        let row = appliance_row(&record);
        assert_eq!(row.name, "Bedroom");
        assert_eq!(row.model, "PUREA9");
        assert_eq!(row.id, "950011538122222222");
    }

    #[test]
    fn row_falls_back_to_dash_for_missing_fields() {
        let row = appliance_row(&json!({"pncId": "x"}));
        assert_eq!(row.name, "-");
        assert_eq!(row.model, "-");
        assert_eq!(row.id, "x");
    }
}
