//! # Bridge Types Crate
//!
//! This crate contains the wire vocabulary exchanged between embedded web
//! content and the host container.
//!
//! ## Design Principles
//!
//! - **Tagged outbound envelopes**: `{ "action": ..., "data": ... }`, where the
//!   shape of `data` is fixed by `action`.
//! - **Tagged inbound outcomes**: `result` decides whether `data`, `error` or
//!   neither is carried. [`Outcome`] is a sum type so the three cases can never
//!   be mixed.
//! - **No correlation id on the wire**: replies are matched by their
//!   [`ResponseKind`] discriminant only.

pub mod actions;
pub mod catalog;
pub mod envelope;
pub mod payloads;

pub use actions::{ActionKind, ResponseKind, ResultKind};
pub use catalog::{ChainId, ContractStandard, TokenName};
pub use envelope::{
    BridgeResponse, ErrorInfo, OutboundEnvelope, Outcome, RawResponse, ResponseShapeError,
};
pub use payloads::*;
