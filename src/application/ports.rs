use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

// ============================================================================
// Application Ports - Collaborators Implemented by Infrastructure
// ============================================================================

/// Supplies the current instant. Injected instead of read directly so the
/// handlers stay deterministic under test.
pub trait Clock: Send + Sync {
    fn utc_now(&self) -> DateTime<Utc>;
}

/// Flushes pending changes, called once per request after the domain
/// mutations.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Returns the number of affected rows.
    async fn commit(&self) -> Result<u64>;
}
