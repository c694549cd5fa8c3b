mod currency;
mod error;
mod fetch;
mod model;
mod report;

use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use jiff::civil::Date;
use tracing::error;

pub use currency::{Currency, WatchList};
pub use error::{FetchError, InputError};
pub use fetch::{
    DEFAULT_TIMEOUT, ExchangeRatesResponse, PRIVATBANK_BASE_URL, PrivatBankClient, RateEntry,
    RateSource, fetch_rates_for_date,
};
pub use model::{CurrencyQuote, DailyResult, DateKey, DayCount, ReportSequence};
pub use report::{build_report, date_keys, render_json};

/// Get EUR and USD exchange rates from the PrivatBank archive for today and up to nine days back.
///
/// Prints one JSON entry per date, most recent first. A date that could not be fetched is `null`.
#[derive(Parser)]
pub struct Cli {
    /// Number of days to report, counting today (1 to 10)
    #[arg(value_name = "DAYS", allow_negative_numbers = true)]
    pub days: String,
    /// One more currency to report alongside EUR and USD (e.g. GBP, PLN)
    #[arg(value_name = "CURRENCY")]
    pub currency: Option<String>,

    /// Base URL of the exchange rate archive API
    #[arg(long, env = "PRIVATBANK_API_URL", default_value = PRIVATBANK_BASE_URL)]
    pub base_url: String,
    /// Seconds to wait for each date before giving up on it
    #[arg(long, env = "PRIVATBANK_TIMEOUT", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,
}

/// What the command line asked for, once validated.
#[derive(Debug, PartialEq, Eq)]
pub struct Request {
    pub num_days: DayCount,
    pub watchlist: WatchList,
    /// The extra currency that was given but not recognised, if any
    pub rejected_currency: Option<InputError>,
}

impl Cli {
    /// Validate the positional arguments.
    ///
    /// A bad day count stops everything. An unknown currency is dropped and reported back so the
    /// caller can warn about it.
    pub fn request(&self) -> Result<Request, InputError> {
        let num_days = self.days.parse::<DayCount>()?;

        let (extra, rejected_currency) = match self.currency.as_deref().map(str::parse::<Currency>) {
            None => (None, None),
            Some(Ok(currency)) => (Some(currency), None),
            Some(Err(err)) => (None, Some(err)),
        };

        Ok(Request {
            num_days,
            watchlist: WatchList::new(extra),
            rejected_currency,
        })
    }

    pub fn client(&self) -> PrivatBankClient {
        PrivatBankClient::new(self.base_url.as_str(), Duration::from_secs(self.timeout))
    }
}

impl Request {
    /// Lines printed before fetching: the heading, then any unsupported-currency notice.
    pub fn preamble(&self) -> Vec<String> {
        let mut lines = vec![heading(self.num_days)];
        if let Some(err) = &self.rejected_currency {
            lines.push(format!("{err}\n"));
        }
        lines
    }
}

/// The line printed before the report.
pub fn heading(num_days: DayCount) -> String {
    match num_days.get() {
        1 => "The currency exchange rate for today:".to_string(),
        n => format!("The currency exchange rate for the last {n} days:"),
    }
}

/// Validate the arguments, fetch the report and write it to `out` as JSON.
///
/// Guidance and the heading go to stderr. When the day count is rejected nothing is fetched and
/// nothing is written to `out`.
pub fn run(args: &Cli, source: &impl RateSource, today: Date, out: &mut impl Write) -> ExitCode {
    let request = match args.request() {
        Ok(request) => request,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::SUCCESS;
        }
    };

    for line in request.preamble() {
        eprintln!("{line}");
    }

    let report = build_report(source, today, request.num_days, &request.watchlist);
    let json = match render_json(&report) {
        Ok(json) => json,
        Err(err) => {
            error!("failed to serialize report: {err}");
            return ExitCode::FAILURE;
        }
    };
    match writeln!(out, "{json}") {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("failed to write report: {err}");
            ExitCode::FAILURE
        }
    }
}
