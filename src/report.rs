use std::thread;

use jiff::ToSpan;
use jiff::civil::Date;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, warn};

use crate::FetchError;
use crate::currency::WatchList;
use crate::fetch::{RateSource, fetch_rates_for_date};
use crate::model::{DateKey, DayCount, ReportSequence};

/// `today`, `today - 1`, ... going back `num_days - 1` days.
pub fn date_keys(today: Date, num_days: DayCount) -> Vec<DateKey> {
    (0..i64::from(num_days.get()))
        .map(|back| DateKey::new(today - back.days()))
        .collect()
}

/// Fetch every requested date at once and line the results up with the dates.
///
/// Each date gets its own scoped worker. A failed or panicked fetch is logged and leaves `None`
/// in its slot without disturbing the others. Slot `i` always belongs to `date_keys(..)[i]`.
pub fn build_report<S: RateSource + ?Sized>(
    source: &S,
    today: Date,
    num_days: DayCount,
    watchlist: &WatchList,
) -> ReportSequence {
    let dates = date_keys(today, num_days);
    debug!(days = dates.len(), currencies = watchlist.len(), "building report");

    thread::scope(|scope| {
        let workers: Vec<_> = dates
            .into_iter()
            .map(|date| {
                let worker = scope.spawn(move || fetch_rates_for_date(source, date, watchlist));
                (date, worker)
            })
            .collect();

        workers
            .into_iter()
            .map(|(date, worker)| {
                let outcome = worker
                    .join()
                    .unwrap_or_else(|_| Err(FetchError::Panicked { date }));
                match outcome {
                    Ok(daily) => Some(daily),
                    Err(err) => {
                        warn!("{err}");
                        None
                    }
                }
            })
            .collect()
    })
}

/// Pretty JSON with four-space indentation.
pub fn render_json(report: &ReportSequence) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    report.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
