//! Spot-price HTTP feed (secondary source).
//!
//! Reads the public Coinbase spot endpoint:
//! `GET /v2/prices/{symbol}-USD/spot` →
//! `{"data": {"amount": "2001.23", "base": "ETH", "currency": "USD"}}`

use anyhow::anyhow;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::{FeedError, PriceFeed};

const DEFAULT_BASE_URL: &str = "https://api.coinbase.com";

/// Spot-price feed over plain HTTP. Prices any symbol the upstream quotes
/// against USD.
#[derive(Debug, Clone)]
pub struct SpotFeed {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SpotResponse {
    data: SpotData,
}

#[derive(Debug, Deserialize)]
struct SpotData {
    amount: String,
    #[allow(dead_code)]
    base: String,
    #[allow(dead_code)]
    currency: String,
}

impl SpotFeed {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point at a different host (tests, mirrors).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn parse_amount(body: &SpotResponse) -> Result<f64, FeedError> {
        let price: f64 = body
            .data
            .amount
            .parse()
            .map_err(|_| FeedError::InvalidAnswer(format!("unparseable amount {:?}", body.data.amount)))?;
        if price <= 0.0 {
            return Err(FeedError::InvalidAnswer(format!(
                "non-positive spot price {price}"
            )));
        }
        Ok(price)
    }
}

impl Default for SpotFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceFeed for SpotFeed {
    async fn fetch_latest_price(&self, symbol: &str) -> Result<f64, FeedError> {
        let url = format!("{}/v2/prices/{}-USD/spot", self.base_url, symbol);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FeedError::Unavailable(anyhow!(e)))?
            .error_for_status()
            .map_err(|e| FeedError::Unavailable(anyhow!(e)))?;

        let body: SpotResponse = response
            .json()
            .await
            .map_err(|e| FeedError::Unavailable(anyhow!(e)))?;

        let price = Self::parse_amount(&body)?;
        debug!(symbol, price, "spot price fetched");
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spot_response() {
        let body: SpotResponse = serde_json::from_str(
            r#"{"data": {"amount": "2001.23", "base": "ETH", "currency": "USD"}}"#,
        )
        .unwrap();
        assert_eq!(SpotFeed::parse_amount(&body).unwrap(), 2001.23);
    }

    #[test]
    fn test_reject_bad_amounts() {
        for amount in ["-5.0", "0", "not-a-number"] {
            let body = SpotResponse {
                data: SpotData {
                    amount: amount.to_string(),
                    base: "ETH".to_string(),
                    currency: "USD".to_string(),
                },
            };
            assert!(matches!(
                SpotFeed::parse_amount(&body),
                Err(FeedError::InvalidAnswer(_))
            ));
        }
    }
}
