use std::fmt;
use std::str::FromStr;

use crate::InputError;

/// Currencies the archive API reports and this tool accepts as an extra.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Currency {
    AUD,
    AZN,
    BYN,
    CAD,
    CHF,
    CNY,
    CZK,
    DKK,
    EUR,
    GBP,
    GEL,
    ILS,
    KZT,
    NOK,
    PLN,
    SEK,
    TMT,
    UAH,
    USD,
    UZS,
}

impl Currency {
    pub const ALL: [Currency; 20] = [
        Currency::AUD,
        Currency::AZN,
        Currency::BYN,
        Currency::CAD,
        Currency::CHF,
        Currency::CNY,
        Currency::CZK,
        Currency::DKK,
        Currency::EUR,
        Currency::GBP,
        Currency::GEL,
        Currency::ILS,
        Currency::KZT,
        Currency::NOK,
        Currency::PLN,
        Currency::SEK,
        Currency::TMT,
        Currency::UAH,
        Currency::USD,
        Currency::UZS,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Currency::AUD => "AUD",
            Currency::AZN => "AZN",
            Currency::BYN => "BYN",
            Currency::CAD => "CAD",
            Currency::CHF => "CHF",
            Currency::CNY => "CNY",
            Currency::CZK => "CZK",
            Currency::DKK => "DKK",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::GEL => "GEL",
            Currency::ILS => "ILS",
            Currency::KZT => "KZT",
            Currency::NOK => "NOK",
            Currency::PLN => "PLN",
            Currency::SEK => "SEK",
            Currency::TMT => "TMT",
            Currency::UAH => "UAH",
            Currency::USD => "USD",
            Currency::UZS => "UZS",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = InputError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or(InputError::UnsupportedCurrency(code))
    }
}

/// The currencies reported for every date: EUR and USD, plus at most one extra.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WatchList {
    extra: Option<Currency>,
}

impl WatchList {
    const DEFAULTS: [Currency; 2] = [Currency::EUR, Currency::USD];

    pub fn new(extra: Option<Currency>) -> Self {
        // EUR and USD are always present, asking for them again changes nothing
        let extra = extra.filter(|c| !Self::DEFAULTS.contains(c));
        Self { extra }
    }

    pub fn extra(&self) -> Option<Currency> {
        self.extra
    }

    /// Watched currencies in report order: EUR, USD, then the extra one.
    pub fn iter(&self) -> impl Iterator<Item = Currency> + '_ {
        Self::DEFAULTS.into_iter().chain(self.extra)
    }

    pub fn len(&self) -> usize {
        Self::DEFAULTS.len() + usize::from(self.extra.is_some())
    }

    pub fn contains(&self, currency: Currency) -> bool {
        self.iter().any(|c| c == currency)
    }
}

impl Default for WatchList {
    fn default() -> Self {
        Self::new(None)
    }
}
