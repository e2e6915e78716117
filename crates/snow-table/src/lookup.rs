//! Lookups for commonly referenced record types.
//!
//! Each helper fetches exactly one record by its natural key and fails when
//! nothing or more than one record matches.

use snow_client::TableApi;

use crate::client::{Record, TableClient};
use crate::error::{Error, ErrorKind, Result};
use crate::query::Query;

/// Find a user (`sys_user`) by `user_name`.
pub async fn find_user<C: TableApi>(client: &TableClient<C>, user_id: &str) -> Result<Record> {
    find_one(client, "sys_user", "user_name", user_id).await
}

/// Find an assignment group (`sys_user_group`) by name.
pub async fn find_assignment_group<C: TableApi>(
    client: &TableClient<C>,
    name: &str,
) -> Result<Record> {
    find_one(client, "sys_user_group", "name", name).await
}

/// Find a standard change template version (`std_change_producer_version`) by name.
pub async fn find_standard_change_template<C: TableApi>(
    client: &TableClient<C>,
    name: &str,
) -> Result<Record> {
    find_one(client, "std_change_producer_version", "name", name).await
}

/// Find a change request by number, e.g. `CHG0000001`.
pub async fn find_change_request<C: TableApi>(
    client: &TableClient<C>,
    number: &str,
) -> Result<Record> {
    find_one(client, "change_request", "number", number).await
}

/// Find a configuration item (`cmdb_ci`) by name.
pub async fn find_configuration_item<C: TableApi>(
    client: &TableClient<C>,
    name: &str,
) -> Result<Record> {
    find_one(client, "cmdb_ci", "name", name).await
}

/// Find a problem by number, e.g. `PRB0000001`.
pub async fn find_problem<C: TableApi>(client: &TableClient<C>, number: &str) -> Result<Record> {
    find_one(client, "problem", "number", number).await
}

async fn find_one<C: TableApi>(
    client: &TableClient<C>,
    table: &str,
    field: &str,
    value: &str,
) -> Result<Record> {
    let query = Query::from([(field, value)]);
    client
        .get_record(table, &query, true)
        .await?
        .ok_or_else(|| {
            Error::new(ErrorKind::NotFound {
                table: table.to_string(),
                query: query.to_string(),
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use snow_client::{Credentials, ServiceNowClient};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tables(server: &MockServer) -> TableClient<ServiceNowClient> {
        let client =
            ServiceNowClient::new(server.uri(), Credentials::basic("admin", "pass")).unwrap();
        TableClient::new(client)
    }

    async fn mount_matches(
        server: &MockServer,
        table: &str,
        field: &str,
        value: &str,
        records: Value,
    ) {
        let total = records.as_array().map_or(0, Vec::len);
        Mock::given(method("GET"))
            .and(path(format!("/api/now/table/{}", table)))
            .and(query_param(field, value))
            .and(query_param("sysparm_exclude_reference_link", "true"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("X-Total-Count", total.to_string())
                    .set_body_json(json!({ "result": records })),
            )
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_find_user_returns_record_unchanged() {
        let server = MockServer::start().await;
        let alice = json!({"sys_id": "1", "user_name": "alice"});
        mount_matches(&server, "sys_user", "user_name", "alice", json!([alice.clone()])).await;

        let user = find_user(&tables(&server), "alice").await.unwrap();

        assert_eq!(Value::Object(user), alice);
    }

    #[tokio::test]
    async fn test_find_assignment_group() {
        let server = MockServer::start().await;
        mount_matches(
            &server,
            "sys_user_group",
            "name",
            "Service Desk",
            json!([{"sys_id": "g1", "name": "Service Desk"}]),
        )
        .await;

        let group = find_assignment_group(&tables(&server), "Service Desk")
            .await
            .unwrap();

        assert_eq!(group["sys_id"], "g1");
    }

    #[tokio::test]
    async fn test_find_standard_change_template() {
        let server = MockServer::start().await;
        mount_matches(
            &server,
            "std_change_producer_version",
            "name",
            "Reboot server - 1",
            json!([{"sys_id": "t1", "name": "Reboot server - 1"}]),
        )
        .await;

        let template = find_standard_change_template(&tables(&server), "Reboot server - 1")
            .await
            .unwrap();

        assert_eq!(template["sys_id"], "t1");
    }

    #[tokio::test]
    async fn test_find_change_request() {
        let server = MockServer::start().await;
        mount_matches(
            &server,
            "change_request",
            "number",
            "CHG0000001",
            json!([{"sys_id": "c1", "number": "CHG0000001"}]),
        )
        .await;

        let change = find_change_request(&tables(&server), "CHG0000001")
            .await
            .unwrap();

        assert_eq!(change["sys_id"], "c1");
    }

    #[tokio::test]
    async fn test_find_configuration_item_multiple_matches() {
        let server = MockServer::start().await;
        mount_matches(
            &server,
            "cmdb_ci",
            "name",
            "web01",
            json!([{"sys_id": "a"}, {"sys_id": "b"}]),
        )
        .await;

        let err = find_configuration_item(&tables(&server), "web01")
            .await
            .unwrap_err();

        assert!(err.is_multiple_matches());
        assert_eq!(err.to_string(), "2 cmdb_ci records match the {name: web01} query");
    }

    #[tokio::test]
    async fn test_find_problem_not_found() {
        let server = MockServer::start().await;
        mount_matches(&server, "problem", "number", "PRB0000404", json!([])).await;

        let err = find_problem(&tables(&server), "PRB0000404").await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "No problem records match the {number: PRB0000404} query"
        );
    }
}
