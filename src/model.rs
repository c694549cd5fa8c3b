use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::InputError;
use crate::currency::{Currency, WatchList};

/// A calendar date, displayed and queried as `DD.MM.YYYY`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateKey(Date);

impl DateKey {
    pub fn new(date: Date) -> Self {
        Self(date)
    }

    pub fn date(self) -> Date {
        self.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%d.%m.%Y"))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Sale and purchase rate of one currency on one date, in UAH.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CurrencyQuote {
    #[serde(with = "rust_decimal::serde::float_option")]
    pub sale: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub purchase: Option<Decimal>,
}

/// Quotes for every watched currency on a single date.
///
/// Serializes as `{"DD.MM.YYYY": {"EUR": {...}, "USD": {...}}}`, currencies in watch-list order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailyResult {
    pub date: DateKey,
    quotes: Vec<(Currency, CurrencyQuote)>,
}

impl DailyResult {
    /// One empty quote per watched currency.
    pub fn empty(date: DateKey, watchlist: &WatchList) -> Self {
        Self {
            date,
            quotes: watchlist
                .iter()
                .map(|currency| (currency, CurrencyQuote::default()))
                .collect(),
        }
    }

    /// Replace the quote for `currency`. Currencies outside the watch list are ignored.
    pub fn set(&mut self, currency: Currency, quote: CurrencyQuote) {
        if let Some((_, slot)) = self.quotes.iter_mut().find(|(c, _)| *c == currency) {
            *slot = quote;
        }
    }

    pub fn quote(&self, currency: Currency) -> Option<&CurrencyQuote> {
        self.quotes
            .iter()
            .find(|(c, _)| *c == currency)
            .map(|(_, quote)| quote)
    }

    pub fn quotes(&self) -> &[(Currency, CurrencyQuote)] {
        &self.quotes
    }
}

struct Quotes<'a>(&'a [(Currency, CurrencyQuote)]);

impl Serialize for Quotes<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (currency, quote) in self.0 {
            map.serialize_entry(currency.code(), quote)?;
        }
        map.end()
    }
}

impl Serialize for DailyResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &Quotes(&self.quotes))?;
        map.end()
    }
}

/// How many days back to report, counting today. Always within `1..=10`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct DayCount(u8);

impl DayCount {
    pub const MAX: u8 = 10;

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for DayCount {
    type Error = InputError;

    fn try_from(days: i64) -> Result<Self, Self::Error> {
        match days {
            ..=0 => Err(InputError::BelowMinimum(days)),
            1..=10 => Ok(Self(days as u8)),
            _ => Err(InputError::AboveMaximum(days)),
        }
    }
}

impl FromStr for DayCount {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<i64>() {
            Ok(days) => Self::try_from(days),
            // still a whole number, just too long for i64
            Err(err) if *err.kind() == IntErrorKind::PosOverflow => {
                Err(InputError::AboveMaximum(i64::MAX))
            }
            Err(err) if *err.kind() == IntErrorKind::NegOverflow => {
                Err(InputError::BelowMinimum(i64::MIN))
            }
            Err(_) => Err(InputError::NotANumber(s.to_string())),
        }
    }
}

/// One slot per requested date, most recent first. `None` marks a failed fetch.
pub type ReportSequence = Vec<Option<DailyResult>>;

#[cfg(test)]
mod tests {
    use super::{CurrencyQuote, DailyResult, DateKey, DayCount};
    use crate::{Currency, InputError, WatchList};
    use jiff::civil::date;
    use rust_decimal::Decimal;
    use serde_json::json;

    #[test]
    fn test_date_key_format() {
        assert_eq!(DateKey::new(date(2026, 3, 7)).to_string(), "07.03.2026");
        assert_eq!(DateKey::new(date(1999, 12, 31)).to_string(), "31.12.1999");
    }

    #[test]
    fn test_daily_result_serialization() {
        let mut result = DailyResult::empty(
            DateKey::new(date(2026, 10, 16)),
            &WatchList::new(Some(Currency::GBP)),
        );
        result.set(
            Currency::USD,
            CurrencyQuote {
                sale: Some(Decimal::new(275, 1)),
                purchase: Some(Decimal::new(270, 1)),
            },
        );
        // not watched
        result.set(
            Currency::PLN,
            CurrencyQuote {
                sale: Some(Decimal::from(10)),
                purchase: Some(Decimal::from(9)),
            },
        );

        assert_eq!(result.quote(Currency::PLN), None);
        assert_eq!(
            result.quotes().iter().map(|(c, _)| *c).collect::<Vec<_>>(),
            vec![Currency::EUR, Currency::USD, Currency::GBP]
        );
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "16.10.2026": {
                    "EUR": {"sale": null, "purchase": null},
                    "USD": {"sale": 27.5, "purchase": 27.0},
                    "GBP": {"sale": null, "purchase": null},
                }
            })
        );
    }

    #[test]
    fn test_day_count_bounds() {
        assert_eq!("1".parse::<DayCount>().unwrap().get(), 1);
        assert_eq!(" 10\n".parse::<DayCount>().unwrap().get(), 10);
        assert_eq!("+3".parse::<DayCount>().unwrap().get(), 3);

        assert_eq!("0".parse::<DayCount>(), Err(InputError::BelowMinimum(0)));
        assert_eq!("-4".parse::<DayCount>(), Err(InputError::BelowMinimum(-4)));
        assert_eq!("11".parse::<DayCount>(), Err(InputError::AboveMaximum(11)));
        assert_eq!(
            "99999999999999999999".parse::<DayCount>(),
            Err(InputError::AboveMaximum(i64::MAX))
        );
        assert_eq!(
            "+99999999999999999999".parse::<DayCount>(),
            Err(InputError::AboveMaximum(i64::MAX))
        );
        assert_eq!(
            "-99999999999999999999".parse::<DayCount>(),
            Err(InputError::BelowMinimum(i64::MIN))
        );
        assert_eq!(
            "ten".parse::<DayCount>(),
            Err(InputError::NotANumber("ten".to_string()))
        );
        assert_eq!(
            "2.5".parse::<DayCount>(),
            Err(InputError::NotANumber("2.5".to_string()))
        );
    }
}
