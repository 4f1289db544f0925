use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::{AppError, Result};
use crate::fetch::client::JsonFetch;
use crate::utils::time::{date_from_epoch_seconds, format_iso, months_ago, today_utc};

/// One trading day of a listing's end-of-day series.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub date: NaiveDate,
    pub close: f64,
    pub low: f64,
    pub high: f64,
}

/// How far back the requested series starts, counted in whole months.
#[derive(Debug, Clone, Copy)]
pub struct HistoryWindow {
    pub months: u32,
}

impl HistoryWindow {
    pub fn range_token(&self) -> String {
        format!("M{}", self.months)
    }

    pub fn start_date(&self, from: NaiveDate) -> NaiveDate {
        months_ago(self.months, from)
    }
}

#[derive(Debug, Deserialize)]
struct EodHistoryResponse {
    #[serde(rename = "datetimeLast")]
    datetime_last: Vec<i64>,
    last: Vec<f64>,
    low: Vec<f64>,
    high: Vec<f64>,
}

/// Retrieves and normalizes the end-of-day series for one listing.
pub struct QuoteFetcher<'a> {
    fetcher: &'a dyn JsonFetch,
    config: &'a ApiConfig,
}

impl<'a> QuoteFetcher<'a> {
    pub fn new(fetcher: &'a dyn JsonFetch, config: &'a ApiConfig) -> Self {
        Self { fetcher, config }
    }

    pub async fn fetch(
        &self,
        instrument_id: &str,
        id_notation: i64,
        window: HistoryWindow,
    ) -> Result<Vec<Quote>> {
        let start = window.start_date(today_utc());
        let url = self.config.eod_history_url(
            instrument_id,
            id_notation,
            &window.range_token(),
            &format_iso(start),
        );
        let payload = self.fetcher.fetch_json(&url).await?;
        let quotes = parse_history(payload)?;
        log::info!("fetched {} quotes for notation {}", quotes.len(), id_notation);
        Ok(quotes)
    }
}

/// Zip the four parallel arrays into day records. All four lengths must
/// agree; the upstream ordering is kept as-is.
fn parse_history(payload: Value) -> Result<Vec<Quote>> {
    let response: EodHistoryResponse = serde_json::from_value(payload)
        .map_err(|e| AppError::MalformedResponse(format!("eod history: {}", e)))?;

    let len = response.datetime_last.len();
    if response.last.len() != len || response.low.len() != len || response.high.len() != len {
        return Err(AppError::MalformedResponse(format!(
            "parallel array lengths disagree: datetimeLast={}, last={}, low={}, high={}",
            len,
            response.last.len(),
            response.low.len(),
            response.high.len()
        )));
    }

    let mut quotes = Vec::with_capacity(len);
    for i in 0..len {
        quotes.push(Quote {
            date: date_from_epoch_seconds(response.datetime_last[i])?,
            close: response.last[i],
            low: response.low[i],
            high: response.high[i],
        });
    }

    Ok(quotes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zips_parallel_arrays_into_quotes() {
        let payload = json!({
            "datetimeLast": [1_700_000_000_i64, 1_700_086_400_i64],
            "last": [10.5, 10.7],
            "low": [9.8, 10.1],
            "high": [11.0, 11.2]
        });

        let quotes = parse_history(payload).unwrap();

        assert_eq!(quotes.len(), 2);
        assert_eq!(
            quotes[0].date,
            NaiveDate::from_ymd_opt(2023, 11, 14).unwrap()
        );
        assert!((quotes[0].close - 10.5).abs() < 1e-9);
        assert!((quotes[0].low - 9.8).abs() < 1e-9);
        assert!((quotes[0].high - 11.0).abs() < 1e-9);
        assert_eq!(
            quotes[1].date,
            NaiveDate::from_ymd_opt(2023, 11, 15).unwrap()
        );
    }

    #[test]
    fn keeps_upstream_order() {
        let payload = json!({
            "datetimeLast": [1_700_086_400_i64, 1_700_000_000_i64],
            "last": [10.7, 10.5],
            "low": [10.1, 9.8],
            "high": [11.2, 11.0]
        });

        let quotes = parse_history(payload).unwrap();

        assert!(quotes[0].date > quotes[1].date);
    }

    #[test]
    fn mismatched_array_lengths_fail() {
        let payload = json!({
            "datetimeLast": [1_700_000_000_i64, 1_700_086_400_i64],
            "last": [10.5, 10.7],
            "low": [9.8],
            "high": [11.0, 11.2]
        });

        let err = parse_history(payload).unwrap_err();

        match err {
            AppError::MalformedResponse(msg) => {
                assert!(msg.contains("low=1"), "message was: {msg}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_series_field_is_malformed() {
        let payload = json!({
            "datetimeLast": [1_700_000_000_i64],
            "last": [10.5],
            "low": [9.8]
        });

        assert!(matches!(
            parse_history(payload).unwrap_err(),
            AppError::MalformedResponse(_)
        ));
    }

    #[test]
    fn empty_series_is_valid() {
        let payload = json!({
            "datetimeLast": [],
            "last": [],
            "low": [],
            "high": []
        });

        assert!(parse_history(payload).unwrap().is_empty());
    }

    #[test]
    fn range_token_follows_window() {
        assert_eq!(HistoryWindow { months: 3 }.range_token(), "M3");
        assert_eq!(HistoryWindow { months: 1 }.range_token(), "M1");
    }
}
