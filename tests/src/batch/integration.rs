use std::sync::Arc;

use netprobe_common::config::Config;
use netprobe_core::network::http::ReqwestTransport;
use netprobe_core::network::tcp::TcpConnector;
use netprobe_core::{BatchOrchestrator, ProbeMode, TargetResolver};

use crate::util::{banner_server, http_server, NoDns, TIMEOUT};

fn orchestrator(mode: ProbeMode, resolver: TargetResolver) -> BatchOrchestrator {
    let transport = ReqwestTransport::new(&Config::default()).unwrap();
    BatchOrchestrator::for_mode(
        mode,
        Arc::new(resolver),
        Arc::new(TcpConnector::new()),
        Arc::new(transport),
    )
}

#[tokio::test]
async fn documentation_address_is_reported_down() {
    let batch = orchestrator(ProbeMode::Http, TargetResolver::system());
    let targets = vec!["127.0.0.1".to_string(), "198.51.100.1".to_string()];

    let results = batch.batch_probe(targets, 80, TIMEOUT, 10, None).await;
    assert_eq!(results.len(), 2);
    assert!(!results.get("198.51.100.1").unwrap().live);
}

#[tokio::test]
async fn mixed_batch_reports_every_target() {
    let web = http_server(200).await.unwrap();
    let banner = banner_server().await.unwrap();
    let batch = orchestrator(ProbeMode::Http, TargetResolver::system());

    let web_url = format!("http://127.0.0.1:{}/", web.port());
    let targets = vec![web_url.clone(), "127.0.0.1".to_string(), web_url.clone()];

    let results = batch.batch_probe(targets, web.port(), TIMEOUT, 4, Some(2)).await;
    assert_eq!(results.len(), 2);
    assert_eq!(results.get(&web_url).unwrap().http_status, Some(200));

    let banner_results = batch
        .batch_probe(vec!["127.0.0.1".to_string()], banner.port(), TIMEOUT, 4, None)
        .await;
    let entry = banner_results.get("127.0.0.1").unwrap();
    assert!(entry.live);
    assert_eq!(entry.http_status, None);
}

#[tokio::test]
async fn unresolvable_names_do_not_abort_the_batch() {
    let web = http_server(200).await.unwrap();
    let batch = orchestrator(ProbeMode::Tcp, TargetResolver::new(Arc::new(NoDns)));
    let targets = vec!["nope.invalid".to_string(), "127.0.0.1".to_string()];

    let results = batch.batch_probe(targets, web.port(), TIMEOUT, 2, None).await;
    let marker = results.get("nope.invalid").unwrap();
    assert!(!marker.live);
    assert_eq!(marker.address, None);
    assert!(results.get("127.0.0.1").unwrap().live);
}

#[tokio::test]
#[ignore = "needs the system resolver"]
async fn system_resolver_rejects_invalid_tld() {
    let batch = orchestrator(ProbeMode::Tcp, TargetResolver::system());
    let results = batch
        .batch_probe(vec!["nope.invalid".to_string()], 80, TIMEOUT, 1, None)
        .await;
    assert_eq!(results.get("nope.invalid").unwrap().address, None);
}
