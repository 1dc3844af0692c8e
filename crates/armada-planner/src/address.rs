//! Oracle endpoint addressing.

use std::fmt;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;
use std::str::FromStr;

use armada_core::errors::PlannerError;

/// Where the planning oracle listens.
///
/// Accepted forms: `tcp://host:port`, `unix://path`, a bare `host:port`,
/// or a bare filesystem path (Unix domain socket).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleAddress {
    Tcp(SocketAddr),
    #[cfg(unix)]
    Unix(PathBuf),
}

impl OracleAddress {
    fn resolve_tcp(raw: &str, host_port: &str) -> Result<Self, PlannerError> {
        if let Ok(addr) = host_port.parse::<SocketAddr>() {
            return Ok(Self::Tcp(addr));
        }
        let mut resolved = host_port.to_socket_addrs().map_err(|e| invalid(raw, e))?;
        resolved
            .next()
            .map(Self::Tcp)
            .ok_or_else(|| invalid(raw, "host resolved to no addresses"))
    }

    #[cfg(unix)]
    fn unix(_raw: &str, path: &str) -> Result<Self, PlannerError> {
        Ok(Self::Unix(PathBuf::from(path)))
    }

    #[cfg(not(unix))]
    fn unix(raw: &str, _path: &str) -> Result<Self, PlannerError> {
        Err(invalid(raw, "unix domain sockets are not available on this platform"))
    }
}

fn invalid(raw: &str, reason: impl fmt::Display) -> PlannerError {
    PlannerError::InvalidAddress {
        address: raw.to_string(),
        reason: reason.to_string(),
    }
}

/// `host:port` with a numeric port and no path separators.
fn looks_like_host_port(s: &str) -> bool {
    if s.contains('/') {
        return false;
    }
    match s.rsplit_once(':') {
        Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok(),
        None => false,
    }
}

impl FromStr for OracleAddress {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(invalid(s, "empty address"));
        }
        if let Some(rest) = s.strip_prefix("tcp://") {
            return Self::resolve_tcp(s, rest);
        }
        if let Some(rest) = s.strip_prefix("unix://") {
            if rest.is_empty() {
                return Err(invalid(s, "empty socket path"));
            }
            return Self::unix(s, rest);
        }
        if let Ok(addr) = s.parse::<SocketAddr>() {
            return Ok(Self::Tcp(addr));
        }
        if looks_like_host_port(s) {
            return Self::resolve_tcp(s, s);
        }
        Self::unix(s, s)
    }
}

impl fmt::Display for OracleAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp(addr) => write!(f, "tcp://{addr}"),
            #[cfg(unix)]
            Self::Unix(path) => write!(f, "unix://{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tcp_forms() {
        let expected = OracleAddress::Tcp("127.0.0.1:7000".parse().unwrap());
        assert_eq!("tcp://127.0.0.1:7000".parse::<OracleAddress>().unwrap(), expected);
        assert_eq!("127.0.0.1:7000".parse::<OracleAddress>().unwrap(), expected);
    }

    #[test]
    fn resolves_localhost() {
        let addr: OracleAddress = "localhost:7000".parse().unwrap();
        match addr {
            OracleAddress::Tcp(a) => assert_eq!(a.port(), 7000),
            #[cfg(unix)]
            other => panic!("expected tcp, got {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn parses_unix_forms() {
        let expected = OracleAddress::Unix(PathBuf::from("./socket_file"));
        assert_eq!("./socket_file".parse::<OracleAddress>().unwrap(), expected);
        assert_eq!("unix://./socket_file".parse::<OracleAddress>().unwrap(), expected);
        assert_eq!(
            "/tmp/oracle.sock".parse::<OracleAddress>().unwrap(),
            OracleAddress::Unix(PathBuf::from("/tmp/oracle.sock"))
        );
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            "  ".parse::<OracleAddress>(),
            Err(PlannerError::InvalidAddress { .. })
        ));
        assert!("unix://".parse::<OracleAddress>().is_err());
    }

    #[test]
    fn display_round_trips() {
        let addr: OracleAddress = "10.0.0.2:9".parse().unwrap();
        assert_eq!(addr.to_string().parse::<OracleAddress>().unwrap(), addr);
    }
}
