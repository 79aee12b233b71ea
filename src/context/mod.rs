//! Context providers: where the response engine gets its health snapshot.
//!
//! The engine never reaches into ambient storage. Whoever owns the
//! conversation passes a provider in, and the snapshot is read once per turn.

pub mod health_log;

pub use health_log::{HealthLog, HealthLogError};

use crate::models::HealthContext;

/// Supplies a point-in-time `HealthContext`. Infallible and best-effort:
/// implementations return defaulted data rather than failing.
pub trait ContextProvider: Send + Sync {
    fn health_context(&self) -> HealthContext;
}

/// A fixed snapshot is its own provider.
impl ContextProvider for HealthContext {
    fn health_context(&self) -> HealthContext {
        self.clone()
    }
}
