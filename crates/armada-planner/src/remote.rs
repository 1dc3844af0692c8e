//! `PlanningOracle` backed by a remote oracle process.

use std::io::{BufReader, Write};
use std::time::{Duration, Instant};

use armada_core::config::OracleConfig;
use armada_core::errors::{PlannerError, WireError};
use armada_core::models::PlanResult;
use armada_core::traits::{CancellationToken, PlanRequest, PlanningOracle};
use armada_wire::{encode_request, read_plan_responses};
use tracing::{debug, info_span};

use crate::address::OracleAddress;
use crate::connection::{classify_io, OracleConnection};

/// Client for the planning oracle. Opens a fresh connection per request.
#[derive(Debug, Clone)]
pub struct RemotePlanner {
    address: OracleAddress,
    connect_timeout: Duration,
    request_timeout: Duration,
    poll_interval: Duration,
    token: CancellationToken,
}

impl RemotePlanner {
    pub fn new(address: OracleAddress) -> Self {
        let defaults = OracleConfig::default();
        Self {
            address,
            connect_timeout: defaults.effective_connect_timeout(),
            request_timeout: defaults.effective_request_timeout(),
            poll_interval: defaults.effective_poll_interval(),
            token: CancellationToken::new(),
        }
    }

    pub fn from_config(config: &OracleConfig) -> Result<Self, PlannerError> {
        let address: OracleAddress = config.effective_address().parse()?;
        Ok(Self::new(address)
            .with_connect_timeout(config.effective_connect_timeout())
            .with_request_timeout(config.effective_request_timeout())
            .with_poll_interval(config.effective_poll_interval()))
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Deadline for a whole exchange, from connect to the last response byte.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Share a cancellation token with the caller. Cancelling it aborts the
    /// in-flight request within one poll interval.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    pub fn address(&self) -> &OracleAddress {
        &self.address
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.token
    }

    fn wire_failure(&self, e: WireError) -> PlannerError {
        match e {
            WireError::Io(io) => classify_io(io, &self.address, self.request_timeout),
            other => PlannerError::Wire(other),
        }
    }
}

impl PlanningOracle for RemotePlanner {
    fn request_plans(&self, request: &PlanRequest<'_>) -> Result<Vec<Vec<PlanResult>>, PlannerError> {
        let instance_count = request.task_instances.len();
        let demo_count = request.demonstrations.len();
        if instance_count == 0 {
            return Ok(Vec::new());
        }
        if demo_count == 0 {
            return Err(PlannerError::Protocol {
                message: "request carries task instances but no demonstrations".to_string(),
            });
        }

        let span = info_span!(
            "armada.request",
            oracle = %self.address,
            instances = instance_count,
            demonstrations = demo_count,
        );
        let _guard = span.enter();
        let started = Instant::now();

        let payload = encode_request(request)?;
        let mut connection = OracleConnection::open(
            &self.address,
            self.connect_timeout,
            self.request_timeout,
            self.poll_interval,
            self.token.clone(),
        )?;
        connection
            .write_all(&payload)
            .and_then(|()| connection.flush())
            .map_err(|e| classify_io(e, &self.address, self.request_timeout))?;

        let mut reader = BufReader::new(connection);
        let responses = read_plan_responses(&mut reader, instance_count, demo_count)
            .map_err(|e| self.wire_failure(e))?;

        debug!(
            oracle_round_trip_ms = started.elapsed().as_millis() as u64,
            request_bytes = payload.len(),
            "oracle responded"
        );
        Ok(responses)
    }
}
