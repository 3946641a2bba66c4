//! Adapters for the driven ports.

pub mod environment;

pub use environment::{GlobalScope, GlobalScopeProbe, StaticEnvironment};
