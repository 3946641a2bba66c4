//! End-to-end flows through the public facade.

pub mod resilience;
pub mod scenarios;
