//! Runtime settings.
//!
//! Values come from the environment, after `main` has loaded any `.env` file
//! with `dotenv`.

use crate::arp::ProcArpResolver;
use crate::models::NetMask;
use std::error::Error;
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Kernel neighbour table on Linux.
pub const DEFAULT_ARP_TABLE: &str = "/proc/net/arp";
/// UDP discard port, target of the datagram that makes the kernel ARP.
pub const DISCARD_PORT: u16 = 9;
/// Wait after nudging before reading the neighbour table again.
pub const SETTLE_MSEC: u64 = 200;

pub const ENV_TARGET: &str = "WOL_TARGET";
pub const ENV_NETMASK: &str = "WOL_NETMASK";
pub const ENV_ARP_TABLE: &str = "WOL_ARP_TABLE";
pub const ENV_NUDGE: &str = "WOL_NUDGE";
pub const ENV_SETTLE_MSEC: &str = "WOL_SETTLE_MSEC";
pub const ENV_OUTPUT: &str = "WOL_OUTPUT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format '{other}', expected text or json")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Host to resolve.
    pub target: Ipv4Addr,
    /// Mask of the target's network, if known.
    pub netmask: Option<NetMask>,
    pub arp_table: PathBuf,
    pub nudge: bool,
    pub settle: Duration,
    pub output: OutputFormat,
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Config, Box<dyn Error>> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `get`, which maps a variable name to its
    /// value.
    pub fn from_lookup<F>(get: F) -> Result<Config, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let target = get(ENV_TARGET).ok_or_else(|| format!("{ENV_TARGET} is not set"))?;
        let target: Ipv4Addr = target
            .trim()
            .parse()
            .map_err(|e| format!("Invalid {ENV_TARGET} '{target}': {e}"))?;

        let netmask = match get(ENV_NETMASK) {
            Some(mask) => Some(
                mask.parse::<NetMask>()
                    .map_err(|e| format!("Invalid {ENV_NETMASK} '{mask}': {e}"))?,
            ),
            None => None,
        };
        if let Some(mask) = netmask.filter(|m| !m.is_valid()) {
            log::warn!("{ENV_NETMASK} {mask} has holes, CIDR will only count the leading run");
        }

        let nudge = match get(ENV_NUDGE) {
            Some(v) => parse_bool(&v).ok_or_else(|| format!("Invalid {ENV_NUDGE} '{v}'"))?,
            None => true,
        };

        let settle = match get(ENV_SETTLE_MSEC) {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .map_err(|e| format!("Invalid {ENV_SETTLE_MSEC} '{v}': {e}"))?,
            None => SETTLE_MSEC,
        };

        let output = match get(ENV_OUTPUT) {
            Some(v) => v.parse()?,
            None => OutputFormat::default(),
        };

        let config = Config {
            target,
            netmask,
            arp_table: get(ENV_ARP_TABLE)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ARP_TABLE)),
            nudge,
            settle: Duration::from_millis(settle),
            output,
        };
        log::debug!("config={:?}", config);
        Ok(config)
    }

    /// Neighbour table resolver built from these settings.
    pub fn resolver(&self) -> ProcArpResolver {
        ProcArpResolver::new(&self.arp_table)
            .with_nudge(self.nudge)
            .with_settle(self.settle)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
