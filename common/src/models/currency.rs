use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Simplified view of one upstream ticker entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrencyRecord {
    /// Human-readable name (e.g., "Bitcoin")
    pub name: String,
    /// Ticker symbol (e.g., "BTC")
    pub symbol: String,
    /// Price as sent by the upstream, never reformatted
    pub price: String,
    pub circulating_supply: Option<String>,
    /// `None` for currencies without a supply cap; serialized as `null`
    pub max_supply: Option<String>,
}

/// Price of a crypto currency denominated in a fiat currency
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FiatPrice {
    pub currency: String,
    pub fiat_price: String,
}

/// How many units of `to_symbol` one unit of `from_symbol` buys.
///
/// Serializes as a single-entry object: `{"1 BTC": "14.67 ETH"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRate {
    pub from_symbol: String,
    pub to_symbol: String,
    /// Rate rounded to two decimals, fixed-point
    pub rate: String,
}

impl ExchangeRate {
    pub fn key(&self) -> String {
        format!("1 {}", self.from_symbol)
    }

    pub fn value(&self) -> String {
        format!("{} {}", self.rate, self.to_symbol)
    }
}

impl Serialize for ExchangeRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key(), &self.value())?;
        map.end()
    }
}
