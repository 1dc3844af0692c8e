use std::io::{BufReader, ErrorKind, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
#[cfg(unix)]
use std::os::unix::net::{UnixListener, UnixStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use armada_wire::{read_request, write_plan_responses, DecodedRequest};
use tempfile::TempDir;

use crate::oracle::{answer, Policy};

const ACCEPT_POLL: Duration = Duration::from_millis(5);

/// How the mock oracle treats each accepted connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerBehavior {
    /// Read the request and answer it per the policy.
    Respond,
    /// Answer, but close after the first `keep` response bytes.
    Truncate { keep: usize },
    /// Read the request, then hold the connection open without answering.
    Stall(Duration),
    /// Accept and close immediately.
    Hangup,
}

struct Shared {
    policy: Policy,
    behavior: ServerBehavior,
    requests: Mutex<Vec<DecodedRequest>>,
    shutdown: AtomicBool,
}

/// An oracle server on a background thread, stopped on drop.
pub struct MockOracle {
    address: String,
    shared: Arc<Shared>,
    handle: Option<JoinHandle<()>>,
    _socket_dir: Option<TempDir>,
}

impl MockOracle {
    /// Listen on `127.0.0.1` at an ephemeral port.
    pub fn tcp(policy: Policy) -> Self {
        Self::tcp_with(policy, ServerBehavior::Respond)
    }

    pub fn tcp_with(policy: Policy, behavior: ServerBehavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock oracle");
        listener.set_nonblocking(true).expect("nonblocking listener");
        let address = format!("tcp://{}", listener.local_addr().expect("local addr"));
        let shared = Self::shared(policy, behavior);
        let worker = Arc::clone(&shared);
        let handle = thread::spawn(move || {
            accept_loop(&worker, || match listener.accept() {
                Ok((stream, _)) => {
                    stream.set_nonblocking(false)?;
                    Ok(Some(Conn::Tcp(stream)))
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => Ok(None),
                Err(e) => Err(e),
            })
        });
        Self {
            address,
            shared,
            handle: Some(handle),
            _socket_dir: None,
        }
    }

    /// Listen on a Unix socket inside a fresh temporary directory.
    #[cfg(unix)]
    pub fn unix(policy: Policy) -> Self {
        Self::unix_with(policy, ServerBehavior::Respond)
    }

    #[cfg(unix)]
    pub fn unix_with(policy: Policy, behavior: ServerBehavior) -> Self {
        let dir = TempDir::new().expect("socket dir");
        let path = dir.path().join("oracle.sock");
        let listener = UnixListener::bind(&path).expect("bind mock oracle");
        listener.set_nonblocking(true).expect("nonblocking listener");
        let address = format!("unix://{}", path.display());
        let shared = Self::shared(policy, behavior);
        let worker = Arc::clone(&shared);
        let handle = thread::spawn(move || {
            accept_loop(&worker, || match listener.accept() {
                Ok((stream, _)) => {
                    stream.set_nonblocking(false)?;
                    Ok(Some(Conn::Unix(stream)))
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => Ok(None),
                Err(e) => Err(e),
            })
        });
        Self {
            address,
            shared,
            handle: Some(handle),
            _socket_dir: Some(dir),
        }
    }

    fn shared(policy: Policy, behavior: ServerBehavior) -> Arc<Shared> {
        Arc::new(Shared {
            policy,
            behavior,
            requests: Mutex::new(Vec::new()),
            shutdown: AtomicBool::new(false),
        })
    }

    /// `tcp://127.0.0.1:PORT` or `unix:///tmp/.../oracle.sock`.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Requests decoded so far, in arrival order.
    pub fn requests(&self) -> Vec<DecodedRequest> {
        self.shared.requests.lock().unwrap().clone()
    }
}

impl Drop for MockOracle {
    fn drop(&mut self) {
        self.shared.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

enum Conn {
    Tcp(TcpStream),
    #[cfg(unix)]
    Unix(UnixStream),
}

impl Conn {
    fn close(&self) {
        let _ = match self {
            Conn::Tcp(s) => s.shutdown(Shutdown::Both),
            #[cfg(unix)]
            Conn::Unix(s) => s.shutdown(Shutdown::Both),
        };
    }

    fn reader(&self) -> Box<dyn Read + '_> {
        match self {
            Conn::Tcp(s) => Box::new(s) as Box<dyn Read + '_>,
            #[cfg(unix)]
            Conn::Unix(s) => Box::new(s) as Box<dyn Read + '_>,
        }
    }

    fn writer(&self) -> Box<dyn Write + '_> {
        match self {
            Conn::Tcp(s) => Box::new(s) as Box<dyn Write + '_>,
            #[cfg(unix)]
            Conn::Unix(s) => Box::new(s) as Box<dyn Write + '_>,
        }
    }
}

fn accept_loop<F>(shared: &Shared, mut accept: F)
where
    F: FnMut() -> std::io::Result<Option<Conn>>,
{
    while !shared.shutdown.load(Ordering::Relaxed) {
        match accept() {
            Ok(Some(conn)) => serve(shared, &conn),
            Ok(None) => thread::sleep(ACCEPT_POLL),
            Err(_) => return,
        }
    }
}

fn serve(shared: &Shared, conn: &Conn) {
    if shared.behavior == ServerBehavior::Hangup {
        conn.close();
        return;
    }
    let Ok(request) = read_request(&mut BufReader::new(conn.reader())) else {
        conn.close();
        return;
    };

    let demos = request
        .demonstrations
        .iter()
        .map(|d| (d.trajectory_file.as_str(), d.score));
    let responses = answer(&shared.policy, &request.task_instances, demos);
    shared.requests.lock().unwrap().push(request);

    let mut bytes = Vec::new();
    if write_plan_responses(&mut bytes, &responses).is_err() {
        conn.close();
        return;
    }

    let mut writer = conn.writer();
    match shared.behavior {
        ServerBehavior::Respond => {
            let _ = writer.write_all(&bytes).and_then(|()| writer.flush());
        }
        ServerBehavior::Truncate { keep } => {
            let _ = writer.write_all(&bytes[..keep.min(bytes.len())]);
        }
        ServerBehavior::Stall(hold) => {
            let mut waited = Duration::ZERO;
            while waited < hold && !shared.shutdown.load(Ordering::Relaxed) {
                thread::sleep(ACCEPT_POLL);
                waited += ACCEPT_POLL;
            }
        }
        ServerBehavior::Hangup => {}
    }
    conn.close();
}
