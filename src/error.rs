use thiserror::Error;

use crate::model::DateKey;

/// Anything that kept a date from producing a usable rate list.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("fetch failed for {date}: HTTP status {status}")]
    Status { date: DateKey, status: u16 },
    #[error("fetch failed for {date}: connection error: {source}")]
    Transport {
        date: DateKey,
        #[source]
        source: ureq::Error,
    },
    #[error("fetch failed for {date}: could not read response: {source}")]
    Parse {
        date: DateKey,
        #[source]
        source: ureq::Error,
    },
    #[error("fetch failed for {date}: worker panicked")]
    Panicked { date: DateKey },
}

/// Problems with what the user typed on the command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Unexpected argument. Please use a number between 1 and 10.")]
    NotANumber(String),
    #[error("Unexpected argument. Please use a number between 1 and 10.")]
    BelowMinimum(i64),
    #[error("The currency exchange rate can be shown for a maximum of the last 10 days.")]
    AboveMaximum(i64),
    #[error(
        "Unsupported currency: {0}. List of the supported currencies: {list}.",
        list = supported_list()
    )]
    UnsupportedCurrency(String),
}

fn supported_list() -> String {
    let codes: Vec<_> = crate::Currency::ALL
        .iter()
        .map(|c| format!("'{c}'"))
        .collect();
    format!("[{}]", codes.join(", "))
}
