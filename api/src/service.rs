use common::{
    models::{CurrencyRecord, ExchangeRate, FiatPrice, IntervalSet, Symbols, TickerRequest},
    presenter::present,
    ratio::calculate_ratio,
    Error, Result,
};
use connectors::PricingConnector;
use std::sync::Arc;
use tracing::debug;

/// Currency that calculations between two crypto currencies are priced in
pub const CALCULATION_CONVERT: &str = "USD";

/// Service for fetching and reshaping currency data from the pricing API
pub struct CurrencyService {
    connector: Arc<dyn PricingConnector>,
}

fn find_symbol<'a>(records: &'a [CurrencyRecord], symbol: &str) -> Result<&'a CurrencyRecord> {
    records
        .iter()
        .find(|record| record.symbol.eq_ignore_ascii_case(symbol))
        .ok_or_else(|| Error::NotFound(format!("currency {}", symbol)))
}

impl CurrencyService {
    pub fn new(connector: Arc<dyn PricingConnector>) -> Self {
        Self { connector }
    }

    async fn fetch_records(&self, request: TickerRequest) -> Result<Vec<CurrencyRecord>> {
        let body = self.connector.fetch(&request).await?.into_body()?;
        present(&body)
    }

    /// List tickers in the order the upstream ranks them
    pub async fn list_currencies(
        &self,
        tickers: Symbols,
        intervals: Option<IntervalSet>,
    ) -> Result<Vec<CurrencyRecord>> {
        debug!("Listing currencies for {}", tickers);
        self.fetch_records(TickerRequest::listing(tickers, intervals))
            .await
    }

    /// Price of `crypto_currency` in `fiat_currency`
    pub async fn fiat_price(&self, fiat_currency: &str, crypto_currency: &str) -> Result<FiatPrice> {
        debug!("Getting {} price in {}", crypto_currency, fiat_currency);

        let ids = Symbols::new([crypto_currency])?;
        let records = self
            .fetch_records(TickerRequest::conversion(ids, fiat_currency))
            .await?;
        let record = find_symbol(&records, crypto_currency)?;

        Ok(FiatPrice {
            currency: fiat_currency.to_string(),
            fiat_price: record.price.clone(),
        })
    }

    /// Value of one `from` expressed in `to`
    pub async fn calculate(&self, from: &str, to: &str) -> Result<ExchangeRate> {
        debug!("Calculating 1 {} in {}", from, to);

        let ids = Symbols::new([from, to])?;
        let records = self
            .fetch_records(TickerRequest::conversion(ids, CALCULATION_CONVERT))
            .await?;

        let from_record = find_symbol(&records, from)?;
        let to_record = find_symbol(&records, to)?;

        calculate_ratio(from_record, to_record)
    }
}
