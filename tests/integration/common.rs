use std::sync::Once;

use snow_client::{InstanceConfig, ServiceNowClient};
use snow_table::TableClient;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Table client for the instance described by the `SN_*` variables.
///
/// Panics with a pointer to the missing configuration instead of skipping,
/// so an unconfigured run of the ignored suite fails loudly.
pub fn table_client() -> TableClient<ServiceNowClient> {
    init_tracing();

    let config = match InstanceConfig::from_env() {
        Ok(config) => config,
        Err(e) => panic!(
            "ServiceNow integration tests need SN_HOST and either SN_ACCESS_TOKEN \
             or SN_USERNAME/SN_PASSWORD: {}",
            e
        ),
    };

    let client = ServiceNowClient::from_config(config).expect("Failed to create client");
    TableClient::with_batch_size(client, 50)
}

/// Unique suffix so concurrent runs don't trip over each other's records.
pub fn unique_suffix() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{}", nanos)
}
