//! Lookup helper integration tests using SN_* credentials.

use super::common::{table_client, unique_suffix};
use snow_table::{find_problem, find_user, Query};

#[tokio::test]
#[ignore]
async fn test_find_user_admin() {
    let tables = table_client();

    let admin = find_user(&tables, "admin").await.expect("admin should exist");

    assert_eq!(admin["user_name"], "admin");
}

#[tokio::test]
#[ignore]
async fn test_find_problem_not_found() {
    let tables = table_client();

    let err = find_problem(&tables, &format!("PRB-NOPE-{}", unique_suffix()))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
#[ignore]
async fn test_get_record_multiple_matches() {
    let tables = table_client();

    let err = tables
        .get_record("sys_user", &Query::from([("active", "true")]), false)
        .await
        .unwrap_err();

    assert!(err.is_multiple_matches());
}
