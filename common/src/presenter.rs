//! Reshapes a raw ticker payload into [`CurrencyRecord`]s.

use crate::models::CurrencyRecord;
use crate::{Error, Result};
use serde::Deserialize;
use tracing::debug;

/// Upstream ticker entry. Only the fields we pass on are decoded.
#[derive(Debug, Deserialize)]
struct TickerEntry {
    name: String,
    currency: String,
    price: String,
    #[serde(default)]
    circulating_supply: Option<String>,
    #[serde(default)]
    max_supply: Option<String>,
}

impl From<TickerEntry> for CurrencyRecord {
    fn from(entry: TickerEntry) -> Self {
        CurrencyRecord {
            name: entry.name,
            symbol: entry.currency,
            price: entry.price,
            circulating_supply: entry.circulating_supply,
            max_supply: entry.max_supply,
        }
    }
}

/// Decodes a JSON array of ticker entries, keeping the upstream order.
pub fn present(raw: &[u8]) -> Result<Vec<CurrencyRecord>> {
    let entries: Vec<TickerEntry> = serde_json::from_slice(raw)
        .map_err(|e| Error::MalformedResponse(format!("Failed to parse ticker response: {}", e)))?;

    debug!("Presenting {} ticker entries", entries.len());

    Ok(entries.into_iter().map(CurrencyRecord::from).collect())
}
