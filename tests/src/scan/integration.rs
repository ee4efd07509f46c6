use std::sync::Arc;

use netprobe_common::models::ResolvedTarget;
use netprobe_core::network::tcp::TcpConnector;
use netprobe_core::PortScanner;
use tokio::net::TcpListener;

use crate::util::{closed_port, TIMEOUT};

fn scanner() -> PortScanner {
    PortScanner::new(Arc::new(TcpConnector::new()))
}

#[tokio::test]
async fn finds_listeners_on_loopback() {
    let first = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let second = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let a = first.local_addr().unwrap().port();
    let b = second.local_addr().unwrap().port();
    let (low, high) = (a.min(b), a.max(b));

    // other processes may listen in between, so only require ours
    let open = scanner()
        .scan_port_list("127.0.0.1", &[low, high], TIMEOUT, 8)
        .await
        .unwrap();
    assert_eq!(open, vec![low, high]);
}

#[tokio::test]
async fn range_scan_is_sorted_and_within_bounds() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let start = port.saturating_sub(20).max(1);
    let end = port.saturating_add(20);

    let open = scanner()
        .scan_ports("127.0.0.1", start, end, TIMEOUT, 16)
        .await
        .unwrap();
    assert!(open.contains(&port));
    assert!(open.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(open.iter().all(|p| (start..=end).contains(p)));
}

#[tokio::test]
async fn single_closed_port_yields_nothing() {
    let port = closed_port().await.unwrap();
    let open = scanner()
        .scan_ports("127.0.0.1", port, port, TIMEOUT, 50)
        .await
        .unwrap();
    assert!(open.is_empty());
}

#[tokio::test]
async fn inverted_range_is_rejected() {
    assert!(scanner()
        .scan_ports("127.0.0.1", 1024, 1, TIMEOUT, 50)
        .await
        .is_err());
}

#[tokio::test]
async fn host_check_sees_a_listener() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let closed = closed_port().await.unwrap();
    let target = ResolvedTarget::new("localhost", "localhost", "127.0.0.1".parse().unwrap());

    let check = scanner()
        .check_host(&target, &[closed, port], TIMEOUT, 4)
        .await
        .unwrap();
    assert!(check.alive);
    assert_eq!(check.open_ports, vec![port]);
}
