//! Async HTTP fetch of the raw sample array.
//!
//! The source is a plain `GET` endpoint returning a JSON array of
//! `{"timestamp": "...", "value": n}` objects — no pagination, no auth. A
//! load either succeeds completely (every timestamp parses) or fails as a
//! unit; the caller logs the failure and keeps its previous state.

use tracing::debug;

use crate::aggregation::parse_timestamp;
use crate::error::Result;
use crate::types::Sample;

/// Fetch and validate the sample array from `url`.
pub async fn fetch_samples(url: &str) -> Result<Vec<Sample>> {
    debug!(url, "fetching samples");
    let response = reqwest::get(url).await?.error_for_status()?;
    let body = response.text().await?;
    let samples = parse_payload(&body)?;
    debug!(count = samples.len(), "samples loaded");
    Ok(samples)
}

/// Deserialize a JSON payload into samples and validate it.
pub fn parse_payload(body: &str) -> Result<Vec<Sample>> {
    let samples: Vec<Sample> = serde_json::from_str(body)?;
    validate_samples(&samples)?;
    Ok(samples)
}

/// Reject any sample whose timestamp does not parse.
///
/// Bucket key derivation on an unparsable date has no defined meaning, so
/// bad records are refused at ingestion instead of surfacing later as
/// nonsense bucket keys.
pub fn validate_samples(samples: &[Sample]) -> Result<()> {
    for sample in samples {
        parse_timestamp(&sample.timestamp)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChartError;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_well_formed_payload() {
        let body = r#"[
            {"timestamp": "2023-01-01", "value": 10},
            {"timestamp": "2023-06-15T08:30:00Z", "value": 2.5}
        ]"#;
        let samples = parse_payload(body).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].timestamp, "2023-01-01");
        assert_eq!(samples[1].value, 2.5);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_payload("not json"),
            Err(ChartError::Payload(_))
        ));
        assert!(matches!(
            parse_payload(r#"{"timestamp": "2023-01-01"}"#),
            Err(ChartError::Payload(_))
        ));
    }

    #[test]
    fn rejects_invalid_timestamp_at_ingestion() {
        let body = r#"[{"timestamp": "soon", "value": 1}]"#;
        match parse_payload(body) {
            Err(ChartError::InvalidTimestamp { timestamp }) => assert_eq!(timestamp, "soon"),
            other => panic!("expected InvalidTimestamp, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse_payload("[]").unwrap().is_empty());
    }
}
