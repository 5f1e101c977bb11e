use crate::{InsightError, SectionKind, SectionPayload};
use async_trait::async_trait;

/// Trait for per-section market data providers.
///
/// One read-only request per call, scoped to a ticker; no state is kept
/// between calls. Provider-side absence of a section is an `Err` and is
/// absorbed by the caller, never propagated to the user.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fetch_section(
        &self,
        ticker: &str,
        kind: SectionKind,
    ) -> Result<SectionPayload, InsightError>;
}
