mod harness;

use harness::config::{ConfigBuilder, client_from};
use harness::mock_backend::{MockBackend, Mode};

#[tokio::test]
async fn health_reports_status_and_version() {
    let mock = MockBackend::start(Mode::images(0)).await.unwrap();
    let mut config = ConfigBuilder::new(&mock.base_url()).build();
    let client = client_from(&mut config).unwrap();

    let health = client.health().await.unwrap();

    assert_eq!(health.status, "ok");
    assert_eq!(health.api_version.as_deref(), Some("1.0.0"));
    assert_eq!(mock.health_count(), 1);
    assert_eq!(mock.generate_count(), 0);
}

#[tokio::test]
async fn health_ignores_the_generate_endpoint_setting() {
    let mock = MockBackend::start(Mode::images(0)).await.unwrap();
    let mut config = ConfigBuilder::new(&mock.base_url()).build();
    config.client.endpoint = "/api/v2/generate".to_owned();
    let client = client_from(&mut config).unwrap();

    assert_eq!(client.health().await.unwrap().status, "ok");
}
