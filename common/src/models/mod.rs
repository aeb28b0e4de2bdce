mod currency;
mod interval;
mod ticker;

pub use currency::{CurrencyRecord, ExchangeRate, FiatPrice};
pub use interval::{Interval, IntervalSet, INVALID_INTERVAL_MESSAGE};
pub use ticker::{ApiOutcome, Symbols, TickerRequest, DEFAULT_PAGE, DEFAULT_PER_PAGE};
