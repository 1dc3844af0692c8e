//! # armada-wire
//!
//! Codec for the planning-oracle protocol: big-endian `int32`, IEEE-754
//! `float64`, length-prefixed UTF-8 strings, and single-byte booleans,
//! plus the request and response layouts built from them.
//!
//! Reads never return partial values. A stream that closes mid-field is an
//! [`IncompleteMessage`](armada_core::errors::WireError::IncompleteMessage).

pub mod codec;
pub mod protocol;

pub use codec::{WireRead, WireWrite};
pub use protocol::{
    encode_request, read_plan_responses, read_request, write_plan_responses, write_request,
    DecodedRequest, WireDemonstration,
};
