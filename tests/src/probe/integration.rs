use netprobe_common::models::ResolvedTarget;
use netprobe_core::network::tcp::{ConnectOutcome, Connector, TcpConnector};
use netprobe_core::probe::LivenessProbe;
use netprobe_core::TargetResolver;

use crate::util::{banner_server, closed_port, http_probe, http_server, TIMEOUT};

#[tokio::test]
async fn http_endpoint_is_live_with_its_status() {
    let addr = http_server(200).await.unwrap();
    let target = TargetResolver::system().try_resolve("127.0.0.1").await.unwrap();

    let result = http_probe().unwrap().probe(&target, addr.port(), TIMEOUT).await;
    assert!(result.live);
    assert_eq!(result.http_status, Some(200));
    assert_eq!(result.address.as_deref(), Some("127.0.0.1"));
}

#[tokio::test]
async fn server_error_is_not_live() {
    let addr = http_server(503).await.unwrap();
    let target = TargetResolver::system().try_resolve("127.0.0.1").await.unwrap();

    let result = http_probe().unwrap().probe(&target, addr.port(), TIMEOUT).await;
    assert!(!result.live);
    assert_eq!(result.http_status, Some(503));
}

#[tokio::test]
async fn non_http_service_is_live_through_tcp_fallback() {
    let addr = banner_server().await.unwrap();
    let target = TargetResolver::system().try_resolve("127.0.0.1").await.unwrap();

    let result = http_probe().unwrap().probe(&target, addr.port(), TIMEOUT).await;
    assert!(result.live);
    assert_eq!(result.http_status, None);
}

#[tokio::test]
async fn closed_port_is_down_twice() {
    let port = closed_port().await.unwrap();
    let target = ResolvedTarget::new("127.0.0.1", "127.0.0.1", "127.0.0.1".parse().unwrap());
    let probe = http_probe().unwrap();

    let first = probe.probe(&target, port, TIMEOUT).await;
    let second = probe.probe(&target, port, TIMEOUT).await;
    assert!(!first.live);
    assert_eq!(first, second);
}

#[tokio::test]
async fn url_targets_probe_their_host() {
    let addr = http_server(204).await.unwrap();
    let raw = format!("http://127.0.0.1:{}/health?full=1", addr.port());
    let target = TargetResolver::system().try_resolve(&raw).await.unwrap();

    assert_eq!(target.host, "127.0.0.1");
    let result = http_probe().unwrap().probe(&target, addr.port(), TIMEOUT).await;
    assert!(result.live);
}

#[tokio::test]
async fn connector_classifies_refused_connections() {
    let port = closed_port().await.unwrap();
    let connector = TcpConnector::new();

    assert_eq!(
        connector.attempt("127.0.0.1", port, TIMEOUT).await,
        ConnectOutcome::Refused
    );
    assert!(!connector.connect("127.0.0.1", port, TIMEOUT).await);
}
