//! Integration tests for wol-topology
//!
//! These tests drive the public API from configuration to report.

use std::net::Ipv4Addr;
use std::sync::Arc;
use wol_topology::arp::{resolve_async, AddressResolver, ProcArpResolver, StaticResolver};
use wol_topology::config::{
    Config, OutputFormat, ENV_ARP_TABLE, ENV_NETMASK, ENV_NUDGE, ENV_SETTLE_MSEC, ENV_TARGET,
};
use wol_topology::models::{MacAddr, NetMask, Subnet};
use wol_topology::output::Report;
use wol_topology::{lookup_target, run};

const TEST_TABLE: &str = "src/tests/test_data/proc_net_arp.txt";

fn config(target: &str, mask: Option<&str>) -> Config {
    Config::from_lookup(|key| match key {
        ENV_TARGET => Some(target.to_string()),
        ENV_NETMASK => mask.map(str::to_string),
        ENV_ARP_TABLE => Some(TEST_TABLE.to_string()),
        ENV_NUDGE => Some("false".to_string()),
        _ => None,
    })
    .expect("Failed to build config")
}

#[tokio::test]
async fn test_full_workflow_with_table() {
    let config = config("192.168.1.20", Some("255.255.255.0"));
    assert_eq!(config.output, OutputFormat::Text);

    let report = run(&config).await;

    assert!(report.is_resolved(), "Expected 192.168.1.20 in test table");
    assert_eq!(report.mac, Some("3c:97:0e:11:22:33".parse().unwrap()));
    assert_eq!(report.subnet, Some(Subnet::new("192.168.1.20/24").unwrap()));
    assert_eq!(report.cidr, Some(24));
    assert_eq!(report.broadcast, Some(Ipv4Addr::new(192, 168, 1, 255)));
}

#[tokio::test]
async fn test_incomplete_entry_reports_error() {
    let config = config("192.168.1.99", None);

    let report = run(&config).await;

    assert!(!report.is_resolved());
    assert_eq!(report.netmask, None);
    let error = report.error.expect("Expected an error for incomplete entry");
    assert!(error.contains("192.168.1.99"), "{error}");
}

#[tokio::test]
async fn test_async_matches_sync() {
    let resolver = Arc::new(ProcArpResolver::new(TEST_TABLE).with_nudge(false));

    for target in [
        Ipv4Addr::new(192, 168, 1, 1),
        Ipv4Addr::new(10, 0, 0, 5),
        Ipv4Addr::new(192, 168, 1, 99),
        Ipv4Addr::new(203, 0, 113, 9),
    ] {
        let sync = resolver.resolve(target);
        let not_sync = resolve_async(resolver.clone(), target).await;
        assert_eq!(sync, not_sync, "lookup of {target}");
    }
}

#[tokio::test]
async fn test_static_resolver_as_trait_object() {
    let target = Ipv4Addr::new(10, 1, 2, 3);
    let mac = MacAddr::new([0x02, 0, 0, 0, 0, 0x01]);
    let resolver: Arc<dyn AddressResolver> =
        Arc::new([(target, mac)].into_iter().collect::<StaticResolver>());

    let report = lookup_target(resolver.clone(), target, Some(NetMask::from(-2048_i32))).await;
    assert_eq!(report.mac, Some(mac));
    assert_eq!(report.network, Some(Ipv4Addr::new(10, 1, 0, 0)));
    assert_eq!(report.broadcast, Some(Ipv4Addr::new(10, 1, 7, 255)));

    let miss = lookup_target(resolver, Ipv4Addr::new(10, 1, 2, 4), None).await;
    assert!(!miss.is_resolved());
}

#[test]
fn test_report_json() {
    let report = Report::new(
        Ipv4Addr::new(10, 0, 0, 5),
        Some(NetMask::new(255, 255, 255, 252)),
        &Ok(MacAddr::new([0xa4, 0x5e, 0x60, 0xc1, 0xd2, 0xe3])),
    );
    let json = serde_json::to_value(&report).expect("Failed to serialize report");
    assert_eq!(json["netmask"], "255.255.255.252");
    assert_eq!(json["cidr"], 30);
    assert_eq!(json["broadcast"], "10.0.0.7");
    assert_eq!(json["error"], serde_json::Value::Null);
    assert_eq!(json["error_code"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_nudged_lookups_report_os_failures() {
    let config = |target: &str| {
        Config::from_lookup(|key| match key {
            ENV_TARGET => Some(target.to_string()),
            ENV_ARP_TABLE => Some(TEST_TABLE.to_string()),
            ENV_SETTLE_MSEC => Some("0".to_string()),
            _ => None,
        })
        .expect("Failed to build config")
    };

    let refused = run(&config("255.255.255.255")).await;
    assert!(!refused.is_resolved());
    assert!(refused.error_code.is_some(), "{refused:?}");

    let missing = run(&config("127.0.0.1")).await;
    assert!(!missing.is_resolved());
    assert_eq!(missing.error_code, None);
    assert_eq!(missing.error.as_deref(), Some("no neighbour entry for 127.0.0.1"));
}
