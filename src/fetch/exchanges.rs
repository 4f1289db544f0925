use serde::Deserialize;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::{AppError, Result};
use crate::fetch::client::JsonFetch;
use crate::fetch::instruments::Instrument;

/// The only instrument kind with a known snapshot endpoint.
pub const KIND_DERIVATIVE: &str = "DERIVATIVE";

/// A venue+notation pairing at which an instrument trades. `id_notation` is
/// the upstream identifier required by the price-history endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub code_exchange: String,
    pub id_notation: i64,
}

#[derive(Debug, Deserialize)]
struct SnapshotResponse {
    #[serde(rename = "quoteList")]
    quote_list: SnapshotQuoteList,
}

#[derive(Debug, Deserialize)]
struct SnapshotQuoteList {
    #[serde(default)]
    list: Vec<SnapshotQuoteEntry>,
}

#[derive(Debug, Deserialize)]
struct SnapshotQuoteEntry {
    market: SnapshotMarket,
}

#[derive(Debug, Deserialize)]
struct SnapshotMarket {
    #[serde(rename = "codeExchange")]
    code_exchange: String,
    #[serde(rename = "idNotation")]
    id_notation: i64,
}

/// Maps an instrument plus an optional exchange-code hint to one concrete
/// listing out of the instrument's snapshot.
pub struct ExchangeResolver<'a> {
    fetcher: &'a dyn JsonFetch,
    config: &'a ApiConfig,
}

impl<'a> ExchangeResolver<'a> {
    pub fn new(fetcher: &'a dyn JsonFetch, config: &'a ApiConfig) -> Self {
        Self { fetcher, config }
    }

    pub async fn find_listing(
        &self,
        instrument: &Instrument,
        exchange_code: Option<&str>,
    ) -> Result<Listing> {
        if instrument.kind != KIND_DERIVATIVE {
            return Err(AppError::UnsupportedKind(instrument.kind.clone()));
        }

        let url = self.config.snapshot_url(&instrument.isin);
        let payload = self.fetcher.fetch_json(&url).await?;
        let listings = parse_listings(payload)?;
        let listing = select_listing(listings, exchange_code, &instrument.isin)?;
        log::info!(
            "selected listing {} (notation {}) for {}",
            listing.code_exchange,
            listing.id_notation,
            instrument.isin
        );
        Ok(listing)
    }
}

fn parse_listings(payload: Value) -> Result<Vec<Listing>> {
    let response: SnapshotResponse = serde_json::from_value(payload)
        .map_err(|e| AppError::MalformedResponse(format!("instrument snapshot: {}", e)))?;

    Ok(response
        .quote_list
        .list
        .into_iter()
        .map(|entry| Listing {
            code_exchange: entry.market.code_exchange,
            id_notation: entry.market.id_notation,
        })
        .collect())
}

/// With a hint, the first listing whose exchange code equals it exactly.
/// Without one, the first listing in response order wins; that order is
/// whatever the upstream returned and is not re-sorted here.
fn select_listing(
    mut listings: Vec<Listing>,
    exchange_code: Option<&str>,
    isin: &str,
) -> Result<Listing> {
    if listings.is_empty() {
        return Err(AppError::NoListings {
            isin: isin.to_string(),
        });
    }

    match exchange_code {
        None => Ok(listings.remove(0)),
        Some(code) => {
            let available: Vec<String> = listings
                .iter()
                .map(|listing| listing.code_exchange.clone())
                .collect();
            listings
                .into_iter()
                .find(|listing| listing.code_exchange == code)
                .ok_or(AppError::ExchangeNotFound {
                    requested: code.to_string(),
                    available,
                })
        }
    }
}
