//! aviationweather.gov data API HTTP client.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Which serialization the data API should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadFormat {
    Json,
    Xml,
}

/// One fetch attempt's failure, classified for the control loop.
///
/// `Connect` means the link itself is down and the loop should fall back
/// to reconnecting; everything else is a bad exchange worth a quick retry.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("timed out waiting for data: {0}")]
    Timeout(String),
    #[error("request failed with status {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
}

impl FetchError {
    /// True when the failure indicates the link is down rather than a bad
    /// exchange.
    pub fn is_connect(&self) -> bool {
        matches!(self, FetchError::Connect(_))
    }
}

// Timeout is checked first: a timed-out connect attempt is a stall worth a
// quick retry, not a dead link. Only hard connect failures (refused, DNS)
// drop the loop back to reconnecting.
fn classify(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout(error.to_string())
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else {
        FetchError::Transport(error.to_string())
    }
}

/// HTTP client for the aviationweather.gov data API.
///
/// Carries the only two blocking points in the system: the connect timeout
/// and the per-read idle timeout, both explicit and bounded.
pub struct AwcClient {
    client: Client,
    base_url: String,
    format: PayloadFormat,
}

impl AwcClient {
    /// Create a new client for the given API base URL.
    pub fn new(
        base_url: impl Into<String>,
        format: PayloadFormat,
        connect_timeout: Duration,
        read_timeout: Duration,
    ) -> Self {
        Self {
            client: Client::builder()
                .connect_timeout(connect_timeout)
                .read_timeout(read_timeout)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            format,
        }
    }

    /// Cheap reachability check; any HTTP response from the host counts.
    pub async fn probe(&self) -> Result<(), FetchError> {
        self.client
            .get(&self.base_url)
            .send()
            .await
            .map_err(classify)?;
        Ok(())
    }

    /// Fetch current observations for the given stations in one request.
    ///
    /// Returns the raw payload body; parsing happens downstream so both
    /// formats flow through the same path.
    pub async fn fetch(&self, stations: &[String]) -> Result<String, FetchError> {
        let ids = stations.join(",");
        let request = match self.format {
            PayloadFormat::Json => self
                .client
                .get(format!("{}/api/data/metar", self.base_url))
                .query(&[("ids", ids.as_str()), ("format", "json")]),
            PayloadFormat::Xml => self
                .client
                .get(format!("{}/api/data/dataserver", self.base_url))
                .query(&[
                    ("requestType", "retrieve"),
                    ("dataSource", "metars"),
                    ("format", "xml"),
                    ("mostRecentForEachStation", "true"),
                    ("hoursBeforeNow", "3"),
                    ("stationString", ids.as_str()),
                ]),
        };

        let response = request.send().await.map_err(classify)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(classify)?;
        tracing::debug!("Fetched {} bytes for {} stations", body.len(), stations.len());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_connect_failures_drop_the_link() {
        assert!(FetchError::Connect("refused".to_string()).is_connect());
        assert!(!FetchError::Timeout("read stalled".to_string()).is_connect());
        assert!(!FetchError::Status(503).is_connect());
        assert!(!FetchError::Transport("reset".to_string()).is_connect());
    }

    #[test]
    fn payload_format_uses_lowercase_names() {
        assert_eq!(
            serde_json::from_str::<PayloadFormat>("\"json\"").unwrap(),
            PayloadFormat::Json
        );
        assert_eq!(
            serde_json::from_str::<PayloadFormat>("\"xml\"").unwrap(),
            PayloadFormat::Xml
        );
        assert!(serde_json::from_str::<PayloadFormat>("\"yaml\"").is_err());
    }
}
