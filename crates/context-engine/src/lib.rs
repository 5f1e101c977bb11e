//! Data-aggregation-and-grounding pipeline.
//!
//! Gathers all data sections for a ticker, serializes each into its
//! canonical text, assembles the labeled context, builds the prompt and
//! invokes the completion model. Per-section failures degrade to empty
//! placeholders; completion failures are absorbed at this boundary and
//! replaced with a user-facing advisory — there is no fatal failure mode.

pub mod context;
pub mod prompt;
pub mod serializer;


use futures_util::future::join_all;
use gemini_client::{CompletionError, CompletionModel};
use insight_core::{DataSection, MarketDataProvider, SectionKind, SerializedSection};
use std::sync::Arc;

/// Advisory returned when the completion endpoint reports a quota or
/// rate-limit condition.
pub const RATE_LIMIT_MESSAGE: &str = "API rate limit reached. Please try after 1 minute";

/// Advisory returned for any other completion failure.
pub const MODEL_FAILURE_MESSAGE: &str =
    "The analysis service could not produce an answer. Please try again later.";

pub struct InsightEngine {
    provider: Arc<dyn MarketDataProvider>,
    model: Arc<dyn CompletionModel>,
}

impl InsightEngine {
    pub fn new(provider: Arc<dyn MarketDataProvider>, model: Arc<dyn CompletionModel>) -> Self {
        Self { provider, model }
    }

    /// Fetch all sections for a ticker concurrently, in canonical order.
    ///
    /// The fetches are independent: each failure is logged and absorbed
    /// into an unavailable section, and can never abort the others.
    pub async fn gather(&self, ticker: &str) -> Vec<DataSection> {
        let fetches = SectionKind::ALL
            .iter()
            .map(|kind| self.fetch_section(ticker, *kind));
        join_all(fetches).await
    }

    async fn fetch_section(&self, ticker: &str, kind: SectionKind) -> DataSection {
        match self.provider.fetch_section(ticker, kind).await {
            Ok(payload) => DataSection::ready(kind, payload),
            Err(e) => {
                tracing::warn!("Section {} unavailable for {}: {}", kind.as_str(), ticker, e);
                DataSection::unavailable(kind)
            }
        }
    }

    /// Build the full grounding context for a ticker.
    pub async fn build_context(&self, ticker: &str) -> String {
        let sections = self.gather(ticker).await;
        let serialized: Vec<SerializedSection> =
            sections.iter().map(serializer::serialize).collect();
        context::assemble(&serialized)
    }

    /// Answer a user query grounded in the ticker's data.
    ///
    /// Never returns an error: a rate-limited completion yields the fixed
    /// rate-limit advisory, any other completion failure the generic one.
    pub async fn answer(&self, ticker: &str, query: &str) -> String {
        let context = self.build_context(ticker).await;
        let prompt = prompt::build(&context, query);
        tracing::info!(
            "Prompting {} with {} context bytes for {}",
            self.model.backend_name(),
            context.len(),
            ticker
        );

        match self.model.complete(&prompt).await {
            Ok(text) => text,
            Err(CompletionError::RateLimited) => {
                tracing::warn!("Completion rate limited for {}", ticker);
                RATE_LIMIT_MESSAGE.to_string()
            }
            Err(e) => {
                tracing::error!("Completion failed for {}: {}", ticker, e);
                MODEL_FAILURE_MESSAGE.to_string()
            }
        }
    }
}
