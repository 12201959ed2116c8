//! Talk to ZooKeeper with four-letter words
//!
//! ZooKeeper answers short plaintext administrative commands (`mntr`, `srvr`,
//! `ruok`...) on its client port. A request is the command followed by CRLF,
//! the reply is newline-delimited text terminated by the server closing the
//! connection. There is no framing and no handshake.

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use regex::Regex;
use thiserror::Error;
use tracing::debug;

/// The `srvr` line that marks the ensemble leader
const LEADER_MODE: &str = "Mode: leader";

#[derive(Debug, Error)]
pub enum ZkError {
    #[error("couldn't run '{command}' against {host}:{port}: {source}")]
    Connection {
        host: String,
        port: u16,
        command: String,
        source: io::Error,
    },
    #[error("{metric} not found. If the metric is only present on leaders, run with --leader_only")]
    MetricNotFound { metric: String },
    #[error("invalid metric pattern '{metric}': {source}")]
    InvalidPattern {
        metric: String,
        source: regex::Error,
    },
}

impl ZkError {
    fn connection(host: &str, port: u16, command: &str, source: io::Error) -> ZkError {
        ZkError::Connection {
            host: host.to_owned(),
            port,
            command: command.to_owned(),
            source,
        }
    }
}

/// A metric value as it appeared in a response
#[derive(Debug, Clone, PartialEq)]
pub struct MetricValue {
    /// The digits exactly as the server sent them
    pub raw: String,
    pub value: f64,
}

/// Send `command` to `host:port` and return everything the server replies
///
/// `timeout` is a deadline for the whole exchange: connect, write and reading
/// the full reply. A server that keeps trickling bytes past it still fails
/// with `ErrorKind::TimedOut`. `None` blocks for as long as the OS allows.
///
/// Resolving `host` is not covered by the deadline, a stalled resolver blocks
/// for as long as the system resolver does.
pub fn execute_command(
    host: &str,
    port: u16,
    command: &str,
    timeout: Option<Duration>,
) -> Result<String, ZkError> {
    debug!(host, port, command, "sending four-letter word");
    let deadline = timeout.map(|timeout| Instant::now() + timeout);
    let response = exchange(host, port, command, deadline)
        .map_err(|e| ZkError::connection(host, port, command, e))?;
    debug!(command, bytes = response.len(), "read response");
    Ok(response)
}

fn exchange(host: &str, port: u16, command: &str, deadline: Option<Instant>) -> io::Result<String> {
    let mut stream = connect(host, port, deadline)?;

    stream.set_write_timeout(remaining(deadline)?)?;
    stream.write_all(format!("{}\r\n", command).as_bytes())?;
    stream.flush()?;
    stream.shutdown(Shutdown::Write)?;

    let mut buf = Vec::new();
    let mut chunk = [0; 4096];
    loop {
        stream.set_read_timeout(remaining(deadline)?)?;
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(ref e)
                if e.kind() == io::ErrorKind::WouldBlock || e.kind() == io::ErrorKind::TimedOut =>
            {
                return Err(timed_out());
            }
            Err(e) => return Err(e),
        }
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Time left until `deadline`, `None` if there is no deadline
///
/// Never returns a zero duration, which sockets reject as a timeout.
fn remaining(deadline: Option<Instant>) -> io::Result<Option<Duration>> {
    match deadline {
        None => Ok(None),
        Some(deadline) => {
            let now = Instant::now();
            if now >= deadline {
                Err(timed_out())
            } else {
                Ok(Some(deadline - now))
            }
        }
    }
}

fn timed_out() -> io::Error {
    io::Error::new(io::ErrorKind::TimedOut, "no complete response before the timeout")
}

/// Connect to the first address `host` resolves to that accepts us
fn connect(host: &str, port: u16, deadline: Option<Instant>) -> io::Result<TcpStream> {
    let mut last_err = None;
    for addr in (host, port).to_socket_addrs()? {
        let attempt = match remaining(deadline)? {
            Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
            None => TcpStream::connect(addr),
        };
        match attempt {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                debug!(%addr, error = %e, "connect failed");
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| {
        io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            format!("{} did not resolve to any address", host),
        )
    }))
}

/// Whether a `srvr` response comes from the ensemble leader
///
/// Standalone servers report `Mode: standalone` and are not leaders.
pub fn is_leader(srvr_response: &str) -> bool {
    srvr_response.lines().any(|line| line == LEADER_MODE)
}

/// Find the first line that looks like `<metric> <digits>`
///
/// `metric` is used as a regex fragment, it is not escaped: `zk_.*_count`
/// matches whichever counter comes first. Only whole-number values match.
pub fn find_metric(response: &str, metric: &str) -> Result<MetricValue, ZkError> {
    let re = Regex::new(&format!(r"^{}\s+([0-9]+)$", metric)).map_err(|source| {
        ZkError::InvalidPattern {
            metric: metric.to_owned(),
            source,
        }
    })?;

    response
        .lines()
        .filter_map(|line| re.captures(line))
        .filter_map(|caps| caps.get(1))
        .filter_map(|digits| {
            let raw = digits.as_str();
            raw.parse().ok().map(|value| MetricValue {
                raw: raw.to_owned(),
                value,
            })
        })
        .next()
        .map(|found| {
            debug!(metric, raw = %found.raw, "matched metric");
            found
        })
        .ok_or_else(|| ZkError::MetricNotFound {
            metric: metric.to_owned(),
        })
}
