//! IPv4 net masks and ARP lookups for waking hosts on the local network.
//!
//! - [`models`] - [`models::NetMask`], [`models::Subnet`], [`models::MacAddr`]
//! - [`arp`] - the [`arp::AddressResolver`] contract and its implementations
//! - [`config`] - environment driven settings
//! - [`output`] - report rendering

pub mod arp;
pub mod config;
pub mod models;
pub mod output;

use arp::{resolve_async, AddressResolver};
use config::Config;
use models::NetMask;
use output::Report;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// Resolve `target` off the async executor and summarise it with its mask.
pub async fn lookup_target<R>(
    resolver: Arc<R>,
    target: Ipv4Addr,
    netmask: Option<NetMask>,
) -> Report
where
    R: AddressResolver + ?Sized + 'static,
{
    log::info!("#Start lookup_target({target})");
    let lookup = resolve_async(resolver, target).await;
    match &lookup {
        Ok(mac) => log::info!("{target} is at {mac}"),
        Err(e) => log::warn!("{target} not resolved: {e}"),
    }
    Report::new(target, netmask, &lookup)
}

/// Look up the configured target through the kernel neighbour table.
pub async fn run(config: &Config) -> Report {
    lookup_target(Arc::new(config.resolver()), config.target, config.netmask).await
}
