use std::env;

pub const DEFAULT_BASE_URL: &str = "https://api.onvista.de/api/v1";

/// Upstream API endpoints and request defaults.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub search_limit: usize,
    pub user_agent: String,
}

impl ApiConfig {
    /// Built-in defaults. `QUOTE_API_BASE_URL` overrides the upstream host.
    pub fn builtin() -> Self {
        let base_url =
            env::var("QUOTE_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self {
            base_url,
            search_limit: 10,
            user_agent: concat!("quote-cli/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    pub fn search_url(&self, isin: &str) -> String {
        format!(
            "{}/instruments/query?limit={}&searchValue={}",
            self.base_url, self.search_limit, isin
        )
    }

    pub fn snapshot_url(&self, isin: &str) -> String {
        format!("{}/derivatives/ISIN:{}/snapshot", self.base_url, isin)
    }

    pub fn eod_history_url(
        &self,
        instrument_id: &str,
        id_notation: i64,
        range: &str,
        start_date: &str,
    ) -> String {
        format!(
            "{}/instruments/FUND/{}/eod_history?idNotation={}&range={}&startDate={}",
            self.base_url, instrument_id, id_notation, range, start_date
        )
    }
}
