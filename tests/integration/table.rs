//! Table API integration tests using SN_* credentials.

use super::common::{table_client, unique_suffix};
use serde_json::json;
use snow_table::{EncodedQuery, Query, Record};

fn record(value: serde_json::Value) -> Record {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("not an object: {}", other),
    }
}

#[tokio::test]
#[ignore]
async fn test_list_records_paginates_past_batch_size() {
    let tables = table_client();

    // Batch size is 50; ask for more so at least two pages are needed.
    let query = Query::new()
        .encoded(&EncodedQuery::new().order_by("sys_created_on").unwrap())
        .fields(&["sys_id", "name"]);
    let records = tables
        .list_records("sys_db_object", &query)
        .await
        .expect("Listing should succeed");

    assert!(records.len() > tables.batch_size());
    assert!(records.iter().all(|r| r.contains_key("sys_id")));
}

#[tokio::test]
#[ignore]
async fn test_get_record_missing_is_none() {
    let tables = table_client();

    let query = Query::from([("number", format!("INC-NOPE-{}", unique_suffix()))]);
    let found = tables
        .get_record("incident", &query, false)
        .await
        .expect("Lookup should succeed");

    assert!(found.is_none());
}

#[tokio::test]
#[ignore]
async fn test_incident_lifecycle() {
    let tables = table_client();
    let description = format!("snow-api integration {}", unique_suffix());

    let payload = record(json!({ "short_description": description }));

    let dry_run = tables
        .create_record("incident", payload.clone(), true, &Query::new())
        .await
        .unwrap();
    assert_eq!(dry_run, payload);
    assert!(!dry_run.contains_key("sys_id"));

    let created = tables
        .create_record("incident", payload, false, &Query::new())
        .await
        .expect("Create should succeed");
    let sys_id = created["sys_id"].as_str().expect("sys_id").to_string();
    assert!(created.contains_key("number"));

    let fetched = tables
        .get_record_by_sys_id("incident", &sys_id)
        .await
        .expect("Fetch should succeed");
    assert_eq!(fetched["short_description"], json!(description));

    let updated = tables
        .update_record(
            "incident",
            &created,
            record(json!({ "urgency": "3" })),
            false,
            &Query::new(),
        )
        .await
        .expect("Update should succeed");
    assert_eq!(updated["urgency"], "3");

    tables
        .delete_record("incident", &updated, true)
        .await
        .unwrap();
    assert!(tables
        .get_record_by_sys_id("incident", &sys_id)
        .await
        .is_ok());

    tables
        .delete_record("incident", &updated, false)
        .await
        .expect("Delete should succeed");

    let err = tables
        .get_record_by_sys_id("incident", &sys_id)
        .await
        .unwrap_err();
    assert!(err.client_error().is_some_and(|e| e.is_not_found()));
}
