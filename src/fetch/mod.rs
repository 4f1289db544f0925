pub mod client;
pub mod exchanges;
pub mod history;
pub mod instruments;

pub use client::{HttpJsonClient, JsonFetch};
pub use exchanges::{ExchangeResolver, Listing};
pub use history::{HistoryWindow, Quote, QuoteFetcher};
pub use instruments::{Instrument, InstrumentResolver};
