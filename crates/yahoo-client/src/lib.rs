use async_trait::async_trait;
use insight_core::{InsightError, MarketDataProvider, SectionKind, SectionPayload};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

mod convert;

const BASE_URL: &str = "https://query2.finance.yahoo.com";

// Yahoo rejects requests without a browser-style agent.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Read-only client for the Yahoo Finance quoteSummary and chart APIs.
///
/// One outbound request per section fetch; no state is retained between
/// calls. Requests carry only the client-level timeout — there is no
/// additional retry or deadline handling.
#[derive(Clone)]
pub struct YahooClient {
    client: Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> Self {
        let base_url =
            std::env::var("YAHOO_BASE_URL").unwrap_or_else(|_| BASE_URL.to_string());

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, base_url }
    }

    /// Fetch and normalize one data section for a ticker.
    ///
    /// Price history goes through the chart API (trailing 1-year window,
    /// daily interval, closing prices only); everything else is a
    /// quoteSummary module.
    pub async fn fetch_section(
        &self,
        symbol: &str,
        kind: SectionKind,
    ) -> Result<SectionPayload, InsightError> {
        tracing::debug!("Fetching {} for {}", kind.as_str(), symbol);
        match kind {
            SectionKind::PriceHistory => {
                let chart = self.chart_1y(symbol).await?;
                convert::close_history_table(&chart)
            }
            _ => {
                let module = convert::module_name(kind);
                let value = self.quote_summary_module(symbol, module).await?;
                convert::convert_module(kind, &value)
            }
        }
    }

    /// Fetch a single quoteSummary module as raw JSON.
    async fn quote_summary_module(
        &self,
        symbol: &str,
        module: &str,
    ) -> Result<Value, InsightError> {
        let url = format!("{}/v10/finance/quoteSummary/{}", self.base_url, symbol);

        let response = self
            .client
            .get(&url)
            .query(&[("modules", module)])
            .send()
            .await
            .map_err(|e| InsightError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            return Err(InsightError::Provider(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let envelope: QuoteSummaryEnvelope = response
            .json()
            .await
            .map_err(|e| InsightError::Provider(e.to_string()))?;

        if let Some(err) = envelope.quote_summary.error {
            return Err(InsightError::Provider(err.to_string()));
        }

        envelope
            .quote_summary
            .result
            .into_iter()
            .next()
            .and_then(|mut result| {
                result
                    .as_object_mut()
                    .and_then(|object| object.remove(module))
            })
            .ok_or_else(|| {
                InsightError::MissingData(format!("{} has no {} module", symbol, module))
            })
    }

    /// Fetch one year of daily candles as raw chart JSON.
    async fn chart_1y(&self, symbol: &str) -> Result<Value, InsightError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);

        let response = self
            .client
            .get(&url)
            .query(&[("range", "1y"), ("interval", "1d")])
            .send()
            .await
            .map_err(|e| InsightError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            return Err(InsightError::Provider(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let envelope: ChartEnvelope = response
            .json()
            .await
            .map_err(|e| InsightError::Provider(e.to_string()))?;

        if let Some(err) = envelope.chart.error {
            return Err(InsightError::Provider(err.to_string()));
        }

        envelope
            .chart
            .result
            .into_iter()
            .next()
            .ok_or_else(|| InsightError::MissingData(format!("{} has no chart data", symbol)))
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for YahooClient {
    async fn fetch_section(
        &self,
        ticker: &str,
        kind: SectionKind,
    ) -> Result<SectionPayload, InsightError> {
        YahooClient::fetch_section(self, ticker, kind).await
    }
}

// Response envelopes

#[derive(Debug, Deserialize)]
struct QuoteSummaryEnvelope {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryBody,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryBody {
    #[serde(default)]
    result: Vec<Value>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Vec<Value>,
    #[serde(default)]
    error: Option<Value>,
}
