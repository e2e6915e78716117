//! Table API CRUD walkthrough on the `incident` table
//!
//! Credentials come from the environment:
//! - SN_HOST
//! - SN_ACCESS_TOKEN, or SN_USERNAME and SN_PASSWORD
//!
//! Pass `--check` to run every mutation in check mode: nothing is written
//! and the printed records are local approximations.
//!
//! Run with: cargo run --example table_crud -- [--check]

use serde_json::json;
use snow_api::table::{find_user, Record};
use snow_api::{EncodedQuery, InstanceConfig, Query, ServiceNowClient, TableApi, TableClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing; RUST_LOG=snow_table=debug shows every page fetched
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let check_mode = std::env::args().any(|arg| arg == "--check");

    println!("=== ServiceNow Table API CRUD ===");
    println!("Check mode: {}\n", check_mode);

    let client = ServiceNowClient::from_config(InstanceConfig::from_env()?)?;
    let tables = TableClient::new(client);

    example_list(&tables).await?;
    let incident = example_create(&tables, check_mode).await?;
    let incident = example_update(&tables, &incident, check_mode).await?;
    example_delete(&tables, &incident, check_mode).await?;

    println!("\n✓ Done");
    Ok(())
}

async fn example_list<C: TableApi>(
    tables: &TableClient<C>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("List active P1/P2 incidents");
    println!("---------------------------");

    let filter = EncodedQuery::new()
        .eq("active", "true")?
        .in_list("priority", &["1", "2"])?
        .order_by_desc("sys_created_on")?;
    let query = Query::new()
        .encoded(&filter)
        .fields(&["number", "priority", "short_description"]);

    let incidents = tables.list_records("incident", &query).await?;
    println!("Found {} incidents", incidents.len());
    for incident in incidents.iter().take(5) {
        println!(
            "  {} [P{}] {}",
            field(incident, "number"),
            field(incident, "priority"),
            field(incident, "short_description")
        );
    }

    println!();
    Ok(())
}

async fn example_create<C: TableApi>(
    tables: &TableClient<C>,
    check_mode: bool,
) -> Result<Record, Box<dyn std::error::Error>> {
    println!("Create an incident");
    println!("------------------");

    let mut payload = Record::new();
    payload.insert("short_description".into(), json!("Printer on fire"));
    payload.insert("urgency".into(), json!("2"));

    match find_user(tables, "admin").await {
        Ok(caller) => {
            if let Some(sys_id) = caller.get("sys_id") {
                payload.insert("caller_id".into(), sys_id.clone());
            }
        }
        Err(e) => println!("  (no caller: {})", e),
    }

    let incident = tables
        .create_record("incident", payload, check_mode, &Query::new())
        .await?;

    match incident.get("number") {
        Some(number) => println!("  number: {}", number),
        None => println!("  number: <assigned by server>"),
    }
    println!();
    Ok(incident)
}

async fn example_update<C: TableApi>(
    tables: &TableClient<C>,
    incident: &Record,
    check_mode: bool,
) -> Result<Record, Box<dyn std::error::Error>> {
    println!("Update the incident");
    println!("-------------------");

    let mut payload = Record::new();
    payload.insert("work_notes".into(), json!("Extinguisher deployed"));
    payload.insert("state".into(), json!("2"));

    // A check-mode create has no sys_id, so a real update would fail.
    let updated = tables
        .update_record("incident", incident, payload, check_mode, &Query::new())
        .await?;

    println!("  state: {}", field(&updated, "state"));
    println!();
    Ok(updated)
}

async fn example_delete<C: TableApi>(
    tables: &TableClient<C>,
    incident: &Record,
    check_mode: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Delete the incident");
    println!("-------------------");

    tables.delete_record("incident", incident, check_mode).await?;

    println!("  deleted{}", if check_mode { " (check mode)" } else { "" });
    Ok(())
}

/// Display a field, or `-` when the record doesn't carry it.
fn field(record: &Record, name: &str) -> String {
    record
        .get(name)
        .map_or_else(|| "-".to_string(), |value| value.to_string())
}
