use crate::config::ApiConfig;
use crate::error::{AppError, Result};
use crate::fetch::client::{HttpJsonClient, JsonFetch};
use crate::fetch::exchanges::{ExchangeResolver, Listing};
use crate::fetch::history::{HistoryWindow, Quote, QuoteFetcher};
use crate::fetch::instruments::{Instrument, InstrumentResolver};

/// Terminal outcome of one resolution request.
#[derive(Debug)]
pub enum Resolution {
    /// All three stages succeeded.
    Found {
        instrument: Instrument,
        listing: Listing,
        quotes: Vec<Quote>,
    },
    /// The ISIN, its listing set, or the requested venue does not exist
    /// upstream.
    NotFound { reason: AppError },
    /// Transport, upstream, or response-shape failure.
    Failed { cause: AppError },
}

/// Composes the three resolver stages. Each stage's output feeds the next;
/// the first failure short-circuits the request, and no state is shared
/// across requests.
pub struct QuotePipeline {
    fetcher: Box<dyn JsonFetch>,
    config: ApiConfig,
}

impl QuotePipeline {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let fetcher = HttpJsonClient::new(&config.user_agent)?;
        Ok(Self {
            fetcher: Box::new(fetcher),
            config,
        })
    }

    /// Swap in a canned transport; used by tests.
    pub fn with_fetcher(fetcher: Box<dyn JsonFetch>, config: ApiConfig) -> Self {
        Self { fetcher, config }
    }

    /// Resolve an ISIN plus an optional exchange-code hint to its end-of-day
    /// series. Never returns a raw error: every stage failure is logged here
    /// with its cause and folded into the terminal [`Resolution`].
    pub async fn resolve(
        &self,
        isin: &str,
        exchange_code: Option<&str>,
        window: HistoryWindow,
    ) -> Resolution {
        match self.run_stages(isin, exchange_code, window).await {
            Ok((instrument, listing, quotes)) => Resolution::Found {
                instrument,
                listing,
                quotes,
            },
            Err(reason) if reason.is_absence() => {
                log::warn!("{}: not found: {}", isin, reason);
                Resolution::NotFound { reason }
            }
            Err(cause) => {
                log::warn!("{}: resolution failed: {}", isin, cause);
                Resolution::Failed { cause }
            }
        }
    }

    async fn run_stages(
        &self,
        isin: &str,
        exchange_code: Option<&str>,
        window: HistoryWindow,
    ) -> Result<(Instrument, Listing, Vec<Quote>)> {
        if isin.is_empty() {
            return Err(AppError::message("ISIN must not be empty"));
        }

        let instrument = InstrumentResolver::new(self.fetcher.as_ref(), &self.config)
            .search(isin)
            .await?;
        let listing = ExchangeResolver::new(self.fetcher.as_ref(), &self.config)
            .find_listing(&instrument, exchange_code)
            .await?;
        let quotes = QuoteFetcher::new(self.fetcher.as_ref(), &self.config)
            .fetch(&instrument.id, listing.id_notation, window)
            .await?;

        Ok((instrument, listing, quotes))
    }
}
