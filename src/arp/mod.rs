//! Hardware address resolution.
//!
//! - [`resolver`] - the [`AddressResolver`] contract and [`resolve_async`]
//! - [`proc_table`] - Linux neighbour table resolver
//! - [`static_table`] - fixed table resolver

mod proc_table;
mod resolver;
mod static_table;

// Re-export public types and functions
pub use proc_table::{parse_arp_table, NeighbourEntry, ProcArpResolver};
pub use resolver::{resolve_async, AddressResolver, ArpLookupResult, OsLookupFailure};
pub use static_table::StaticResolver;
