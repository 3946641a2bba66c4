//! # Bridge Bus - Message Channel Binding
//!
//! Abstraction over the host container's transport. The bridge core only
//! ever touches two operations:
//!
//! ```text
//! ┌──────────────┐   dispatch(text)   ┌──────────────┐
//! │ Bridge core  │ ─────────────────▶ │     Host     │
//! │              │                    │  container   │
//! │              │ ◀───────────────── │              │
//! └──────────────┘   subscribe()      └──────────────┘
//!                    (broadcast of raw inbound text)
//! ```
//!
//! - Outbound is fire-and-forget: no acknowledgement, no reply address.
//! - Inbound is a broadcast: every live [`Subscription`] sees every event in
//!   the order the host emitted it, however far behind it is.
//! - Dropping a [`Subscription`] deregisters exactly that subscriber.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod channel;
pub mod in_memory;
pub mod subscriber;

// Re-export main types
pub use channel::{ChannelError, HostChannel};
pub use in_memory::{HostListener, InMemoryHostChannel};
pub use subscriber::{InboundHub, InboundStream, Subscription};

/// Dispatched messages buffered per host listener before it starts lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;
