use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;
use ureq::Agent;

use crate::FetchError;
use crate::currency::WatchList;
use crate::model::{CurrencyQuote, DailyResult, DateKey};

pub const PRIVATBANK_BASE_URL: &str = "https://api.privatbank.ua/p24api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Where archived exchange rates come from. One call per date, no retries.
pub trait RateSource: Sync {
    fn exchange_rates(&self, date: DateKey) -> Result<ExchangeRatesResponse, FetchError>;
}

/// Blocking client for the PrivatBank archive endpoint.
pub struct PrivatBankClient {
    agent: Agent,
    base_url: String,
}

impl PrivatBankClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            // non-200 statuses are turned into FetchError::Status below
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/exchange_rates", self.base_url.trim_end_matches('/'))
    }
}

impl RateSource for PrivatBankClient {
    fn exchange_rates(&self, date: DateKey) -> Result<ExchangeRatesResponse, FetchError> {
        let url = self.endpoint();
        debug!(%url, %date, "requesting exchange rates");

        let mut resp = self
            .agent
            .get(url.as_str())
            .query("date", date.to_string())
            .call()
            .map_err(|source| FetchError::Transport { date, source })?;

        let status = resp.status().as_u16();
        if status != 200 {
            return Err(FetchError::Status { date, status });
        }

        resp.body_mut()
            .read_json::<ExchangeRatesResponse>()
            .map_err(|source| FetchError::Parse { date, source })
    }
}

/// Body of `GET /exchange_rates?date=DD.MM.YYYY`. Only the fields used here are kept.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRatesResponse {
    #[serde(default)]
    pub exchange_rate: Option<Vec<RateEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateEntry {
    /// Missing on the base currency entry
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub sale_rate: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub purchase_rate: Option<Decimal>,
}

/// Fetch one date and keep only the watched currencies.
pub fn fetch_rates_for_date<S: RateSource + ?Sized>(
    source: &S,
    date: DateKey,
    watchlist: &WatchList,
) -> Result<DailyResult, FetchError> {
    let response = source.exchange_rates(date)?;
    Ok(filter_rates(date, watchlist, response))
}

/// Overlay upstream entries onto an all-empty result. Later duplicates win.
fn filter_rates(date: DateKey, watchlist: &WatchList, response: ExchangeRatesResponse) -> DailyResult {
    let mut result = DailyResult::empty(date, watchlist);
    let entries = response.exchange_rate.unwrap_or_default();
    debug!(%date, entries = entries.len(), "received exchange rates");

    for entry in entries {
        // upstream codes must match exactly, "usd" is not USD
        let Some(code) = entry.currency.as_deref() else {
            continue;
        };
        if let Some(currency) = watchlist.iter().find(|c| c.code() == code) {
            result.set(
                currency,
                CurrencyQuote {
                    sale: entry.sale_rate,
                    purchase: entry.purchase_rate,
                },
            );
        }
    }

    result
}
