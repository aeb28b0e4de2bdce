use crate::models::IntervalSet;
use crate::Error;
use std::str::FromStr;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Ordered, de-duplicated list of ticker symbols (e.g., "BTC,ETH,XRP")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbols(Vec<String>);

impl Symbols {
    /// Builds a symbol list, dropping blanks and repeats while keeping order.
    pub fn new<I, S>(symbols: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for symbol in symbols {
            let symbol = symbol.as_ref().trim();
            if symbol.is_empty() || out.iter().any(|s| s == symbol) {
                continue;
            }
            out.push(symbol.to_string());
        }

        if out.is_empty() {
            return Err(Error::Validation(
                "Tickers not provided, use a comma separated list such as BTC,ETH,XRP".to_string(),
            ));
        }

        Ok(Self(out))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl FromStr for Symbols {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbols::new(s.split(','))
    }
}

impl std::fmt::Display for Symbols {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

/// The two shapes of call made against the ticker endpoint.
///
/// Listing and conversion share an upstream path but not their
/// parameters, so each variant only carries what it sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickerRequest {
    /// `key, ids, page, interval, per_page`
    Listing {
        ids: Symbols,
        intervals: IntervalSet,
        page: u32,
        per_page: u32,
    },
    /// `key, ids, convert`
    Conversion { ids: Symbols, convert: String },
}

impl TickerRequest {
    pub fn listing(ids: Symbols, intervals: Option<IntervalSet>) -> Self {
        TickerRequest::Listing {
            ids,
            intervals: intervals.unwrap_or_default(),
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    pub fn conversion(ids: Symbols, convert: impl Into<String>) -> Self {
        TickerRequest::Conversion {
            ids,
            convert: convert.into(),
        }
    }
}

/// Raw result of one upstream call. The body is never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOutcome {
    Success { body: Vec<u8> },
    Failure { status: u16, body: Vec<u8> },
}

impl ApiOutcome {
    pub fn from_status(status: u16, body: Vec<u8>) -> Self {
        if (200..300).contains(&status) {
            ApiOutcome::Success { body }
        } else {
            ApiOutcome::Failure { status, body }
        }
    }

    /// Returns the success body, or turns a failure into `Error::Upstream`.
    pub fn into_body(self) -> crate::Result<Vec<u8>> {
        match self {
            ApiOutcome::Success { body } => Ok(body),
            ApiOutcome::Failure { status, body } => Err(Error::Upstream {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            }),
        }
    }
}
