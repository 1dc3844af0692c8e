//! A blocking oracle connection that honours a deadline and a cancellation
//! token while waiting on the socket.
//!
//! The socket timeout is never longer than the poll interval, so a blocked
//! read or write wakes up regularly to check the token and the deadline.

use std::fmt;
use std::io::{self, ErrorKind, Read, Write};
use std::net::TcpStream;
#[cfg(unix)]
use std::os::unix::net::UnixStream;
use std::time::{Duration, Instant};

use armada_core::errors::PlannerError;
use armada_core::traits::{Cancellable, CancellationToken};

use crate::address::OracleAddress;

/// Smallest socket timeout handed to the OS; zero means "block forever".
const MIN_WAIT: Duration = Duration::from_millis(1);

/// Why the connection stopped waiting. Carried inside an `io::Error` so the
/// `Read`/`Write` contract is kept, then recovered by [`classify_io`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Halt {
    Cancelled,
    DeadlineExceeded,
}

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => f.write_str("cancelled"),
            Self::DeadlineExceeded => f.write_str("deadline exceeded"),
        }
    }
}

impl std::error::Error for Halt {}

enum Stream {
    Tcp(TcpStream),
    #[cfg(unix)]
    Unix(UnixStream),
}

impl Stream {
    fn set_read_timeout(&self, wait: Duration) -> io::Result<()> {
        match self {
            Self::Tcp(s) => s.set_read_timeout(Some(wait)),
            #[cfg(unix)]
            Self::Unix(s) => s.set_read_timeout(Some(wait)),
        }
    }

    fn set_write_timeout(&self, wait: Duration) -> io::Result<()> {
        match self {
            Self::Tcp(s) => s.set_write_timeout(Some(wait)),
            #[cfg(unix)]
            Self::Unix(s) => s.set_write_timeout(Some(wait)),
        }
    }
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(s) => s.read(buf),
            #[cfg(unix)]
            Self::Unix(s) => s.read(buf),
        }
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(s) => s.write(buf),
            #[cfg(unix)]
            Self::Unix(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Tcp(s) => s.flush(),
            #[cfg(unix)]
            Self::Unix(s) => s.flush(),
        }
    }
}

/// One request/response exchange with the oracle.
pub struct OracleConnection {
    stream: Stream,
    deadline: Instant,
    poll_interval: Duration,
    token: CancellationToken,
}

impl OracleConnection {
    /// Connect to `address`. The deadline starts counting now.
    pub fn open(
        address: &OracleAddress,
        connect_timeout: Duration,
        request_timeout: Duration,
        poll_interval: Duration,
        token: CancellationToken,
    ) -> Result<Self, PlannerError> {
        if token.is_cancelled() {
            return Err(PlannerError::Cancelled);
        }
        let started = Instant::now();
        let failure = |e: io::Error| PlannerError::ConnectionFailure {
            address: address.to_string(),
            reason: e.to_string(),
        };
        let stream = match address {
            OracleAddress::Tcp(addr) => {
                let s = TcpStream::connect_timeout(addr, connect_timeout.max(MIN_WAIT))
                    .map_err(failure)?;
                s.set_nodelay(true).map_err(failure)?;
                Stream::Tcp(s)
            }
            #[cfg(unix)]
            OracleAddress::Unix(path) => Stream::Unix(UnixStream::connect(path).map_err(failure)?),
        };
        Ok(Self {
            stream,
            deadline: started + request_timeout,
            poll_interval: poll_interval.max(MIN_WAIT),
            token,
        })
    }

    /// Socket timeout for the next wait, or the reason to stop waiting.
    fn next_wait(&self) -> io::Result<Duration> {
        if self.token.is_cancelled() {
            return Err(io::Error::other(Halt::Cancelled));
        }
        let remaining = self.deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(io::Error::other(Halt::DeadlineExceeded));
        }
        Ok(remaining.min(self.poll_interval).max(MIN_WAIT))
    }
}

fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut)
}

impl Read for OracleConnection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            let wait = self.next_wait()?;
            self.stream.set_read_timeout(wait)?;
            match self.stream.read(buf) {
                Err(e) if is_timeout(&e) => continue,
                other => return other,
            }
        }
    }
}

impl Write for OracleConnection {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        loop {
            let wait = self.next_wait()?;
            self.stream.set_write_timeout(wait)?;
            match self.stream.write(buf) {
                Err(e) if is_timeout(&e) => continue,
                other => return other,
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }
}

/// Map an I/O failure during the exchange onto the planner error kinds.
pub(crate) fn classify_io(e: io::Error, address: &OracleAddress, timeout: Duration) -> PlannerError {
    if let Some(halt) = e.get_ref().and_then(|inner| inner.downcast_ref::<Halt>()) {
        return match halt {
            Halt::Cancelled => PlannerError::Cancelled,
            Halt::DeadlineExceeded => PlannerError::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            },
        };
    }
    PlannerError::ConnectionFailure {
        address: address.to_string(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halt_survives_the_io_error_wrapper() {
        let addr: OracleAddress = "127.0.0.1:1".parse().unwrap();
        let timeout = Duration::from_millis(250);
        let cancelled = classify_io(io::Error::other(Halt::Cancelled), &addr, timeout);
        assert!(matches!(cancelled, PlannerError::Cancelled));
        let late = classify_io(io::Error::other(Halt::DeadlineExceeded), &addr, timeout);
        assert!(matches!(late, PlannerError::Timeout { timeout_ms: 250 }));
        let reset = classify_io(io::Error::from(ErrorKind::ConnectionReset), &addr, timeout);
        assert!(matches!(reset, PlannerError::ConnectionFailure { .. }));
    }

    #[test]
    fn cancelled_token_refuses_to_connect() {
        let token = CancellationToken::new();
        token.cancel();
        let addr: OracleAddress = "127.0.0.1:1".parse().unwrap();
        let result = OracleConnection::open(
            &addr,
            Duration::from_millis(10),
            Duration::from_millis(10),
            Duration::from_millis(10),
            token,
        );
        assert!(matches!(result, Err(PlannerError::Cancelled)));
    }
}
