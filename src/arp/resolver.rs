//! The lookup contract between the topology code and the OS neighbour cache.

use crate::models::MacAddr;
use std::error::Error;
use std::fmt;
use std::io;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// Outcome of one hardware address lookup: the address, or why the OS could
/// not produce one.
pub type ArpLookupResult = Result<MacAddr, OsLookupFailure>;

/// Failure reported by the operating system while resolving an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsLookupFailure {
    code: Option<i32>,
    kind: io::ErrorKind,
    message: String,
}

impl OsLookupFailure {
    /// Raw OS error code, when the failure came from a system call.
    pub fn code(&self) -> Option<i32> {
        self.code
    }

    pub fn kind(&self) -> io::ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<io::Error> for OsLookupFailure {
    fn from(e: io::Error) -> Self {
        OsLookupFailure {
            code: e.raw_os_error(),
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

/// The message of an OS error already ends in `(os error N)`.
impl fmt::Display for OsLookupFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for OsLookupFailure {}

/// Resolves an IPv4 address to the hardware address of its owner.
///
/// One call is one lookup: implementations do not retry. The call may block
/// while the OS queries the network.
pub trait AddressResolver: Send + Sync {
    fn resolve(&self, destination: Ipv4Addr) -> ArpLookupResult;
}

/// Run [`AddressResolver::resolve`] on the blocking thread pool.
///
/// Results are identical to the synchronous call. Dropping the returned future
/// does not stop a lookup that already started.
pub async fn resolve_async<R>(resolver: Arc<R>, destination: Ipv4Addr) -> ArpLookupResult
where
    R: AddressResolver + ?Sized + 'static,
{
    log::trace!("resolve_async({destination}) moving to blocking pool");
    let lookup = tokio::task::spawn_blocking(move || resolver.resolve(destination));
    match lookup.await {
        Ok(result) => result,
        // the task is never aborted, so this is a panic inside the resolver
        Err(e) => std::panic::resume_unwind(e.into_panic()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl AddressResolver for Failing {
        fn resolve(&self, _destination: Ipv4Addr) -> ArpLookupResult {
            Err(io::Error::from_raw_os_error(113).into())
        }
    }

    #[test]
    fn test_failure_from_os_error() {
        let failure = Failing.resolve(Ipv4Addr::LOCALHOST).unwrap_err();
        assert_eq!(failure.code(), Some(113));
        assert!(failure.to_string().contains("(os error 113)"));
    }

    #[test]
    fn test_failure_without_code() {
        let failure: OsLookupFailure = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert_eq!(failure.code(), None);
        assert_eq!(failure.kind(), io::ErrorKind::NotFound);
        assert_eq!(failure.to_string(), "gone");
    }

    #[tokio::test]
    async fn test_resolve_async_keeps_failure() {
        let resolver: Arc<dyn AddressResolver> = Arc::new(Failing);
        let sync = resolver.resolve(Ipv4Addr::LOCALHOST);
        let not_sync = resolve_async(resolver, Ipv4Addr::LOCALHOST).await;
        assert_eq!(sync, not_sync);
    }

    #[tokio::test]
    #[should_panic(expected = "resolver blew up")]
    async fn test_resolve_async_propagates_panic() {
        struct Panicking;
        impl AddressResolver for Panicking {
            fn resolve(&self, _destination: Ipv4Addr) -> ArpLookupResult {
                panic!("resolver blew up")
            }
        }
        let _ = resolve_async(Arc::new(Panicking), Ipv4Addr::LOCALHOST).await;
    }
}
