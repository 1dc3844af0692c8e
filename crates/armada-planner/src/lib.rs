//! # armada-planner
//!
//! Client side of the planning-oracle exchange. One connection per request,
//! over TCP or a Unix domain socket, bounded by a connect timeout and a
//! whole-request deadline, and abortable through a cancellation token.

pub mod address;
pub mod connection;
pub mod remote;

pub use address::OracleAddress;
pub use connection::OracleConnection;
pub use remote::RemotePlanner;
