//! Sector and industry profiles from Yahoo Finance.

use crate::error::{DataError, Result};
use crate::metadata::{SecurityProfile, UNKNOWN};
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::debug;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)";
const COOKIE_URL: &str = "https://fc.yahoo.com";
const CRUMB_URL: &str = "https://query1.finance.yahoo.com/v1/test/getcrumb";
const SUMMARY_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryResponse {
    quote_summary: QuoteSummary,
}

#[derive(Debug, Deserialize)]
struct QuoteSummary {
    #[serde(default)]
    result: Option<Vec<SummaryResult>>,
    #[serde(default)]
    error: Option<SummaryError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryResult {
    #[serde(default)]
    asset_profile: Option<AssetProfile>,
}

#[derive(Debug, Deserialize)]
struct AssetProfile {
    #[serde(default)]
    sector: Option<String>,
    #[serde(default)]
    industry: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SummaryError {
    #[serde(default)]
    description: Option<String>,
}

/// Parse a `quoteSummary?modules=assetProfile` response body.
///
/// A response without an asset profile, as for indices and funds, yields the
/// [`UNKNOWN`] placeholder.
///
/// # Errors
/// Returns an error if the body is not valid JSON or reports an API error.
pub fn parse_profile(body: &str) -> Result<SecurityProfile> {
    let response: SummaryResponse = serde_json::from_str(body)?;

    if let Some(error) = response.quote_summary.error {
        return Err(DataError::YahooApi(
            error.description.unwrap_or_else(|| "quoteSummary error".to_string()),
        ));
    }

    let profile = response
        .quote_summary
        .result
        .and_then(|results| results.into_iter().next())
        .and_then(|result| result.asset_profile);

    let non_empty = |value: Option<String>| {
        value
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string())
    };

    Ok(profile.map_or_else(SecurityProfile::unknown, |p| {
        SecurityProfile::new(non_empty(p.sector), non_empty(p.industry))
    }))
}

/// Yahoo Finance asset profile provider.
#[derive(Debug)]
pub struct YahooProfileProvider {
    client: reqwest::Client,
    crumb: Mutex<Option<String>>,
    rate_limit_delay: Duration,
}

impl YahooProfileProvider {
    /// Create a provider with the default delay of 250ms after each request.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_rate_limit(Duration::from_millis(250))
    }

    /// Create a provider with a custom delay after each request.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_rate_limit(rate_limit_delay: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            crumb: Mutex::new(None),
            rate_limit_delay,
        })
    }

    /// Session crumb required by the quoteSummary endpoint, fetched once.
    async fn crumb(&self) -> Result<String> {
        let mut crumb = self.crumb.lock().await;
        if let Some(value) = crumb.as_ref() {
            return Ok(value.clone());
        }

        // Sets the session cookie; the response status is irrelevant
        if let Err(e) = self.client.get(COOKIE_URL).send().await {
            debug!(error = %e, "session cookie request failed");
        }

        let response = self.client.get(CRUMB_URL).send().await?;
        if !response.status().is_success() {
            return Err(DataError::Http(format!(
                "Failed to fetch crumb: HTTP {}",
                response.status()
            )));
        }
        let value = response.text().await?.trim().to_string();
        if value.is_empty() {
            return Err(DataError::YahooApi("Empty crumb".to_string()));
        }

        *crumb = Some(value.clone());
        Ok(value)
    }

    /// Fetch the sector and industry of one symbol.
    pub async fn fetch_profile(&self, symbol: &str) -> Result<SecurityProfile> {
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let crumb = self.crumb().await?;
        let url = format!("{SUMMARY_URL}/{symbol}");
        let response = self
            .client
            .get(&url)
            .query(&[("modules", "assetProfile"), ("crumb", crumb.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        sleep(self.rate_limit_delay).await;

        if status == reqwest::StatusCode::NOT_FOUND {
            debug!(symbol, "no profile for symbol");
            return Ok(SecurityProfile::unknown());
        }
        if !status.is_success() {
            return Err(DataError::Http(format!(
                "Failed to fetch profile for {symbol}: HTTP {status}"
            )));
        }

        parse_profile(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_asset_profile() {
        let body = r#"{
            "quoteSummary": {
                "result": [{
                    "assetProfile": {
                        "sector": "Technology",
                        "industry": "Semiconductors",
                        "country": "United States"
                    }
                }],
                "error": null
            }
        }"#;
        let profile = parse_profile(body).unwrap();
        assert_eq!(profile, SecurityProfile::new("Technology", "Semiconductors"));
    }

    #[test]
    fn test_parse_missing_profile() {
        let body = r#"{"quoteSummary": {"result": [{}], "error": null}}"#;
        assert!(parse_profile(body).unwrap().is_unknown());

        let body = r#"{"quoteSummary": {"result": [{"assetProfile": {"sector": ""}}]}}"#;
        assert!(parse_profile(body).unwrap().is_unknown());
    }

    #[test]
    fn test_parse_api_error() {
        let body = r#"{"quoteSummary": {"result": null, "error": {"code": "Not Found", "description": "Quote not found for symbol: ZZZZ"}}}"#;
        assert!(matches!(parse_profile(body), Err(DataError::YahooApi(_))));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            parse_profile("<html>"),
            Err(DataError::Serialization(_))
        ));
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_fetch_profile() {
        let provider = YahooProfileProvider::new().unwrap();
        let profile = provider.fetch_profile("MSFT").await.unwrap();
        assert_eq!(profile.sector, "Technology");
    }
}
