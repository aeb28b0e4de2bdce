use crate::models::{CurrencyRecord, ExchangeRate};
use crate::{Error, Result};

fn parse_price(record: &CurrencyRecord) -> Result<f64> {
    let price = record.price.trim().parse::<f64>().map_err(|e| {
        Error::InvalidPrice(format!(
            "{} price {:?} is not a number: {}",
            record.symbol, record.price, e
        ))
    })?;

    if !price.is_finite() {
        return Err(Error::InvalidPrice(format!(
            "{} price {:?} is not a finite number",
            record.symbol, record.price
        )));
    }

    Ok(price)
}

/// Computes the value of one `from` in units of `to`, rounded to two decimals.
pub fn calculate_ratio(from: &CurrencyRecord, to: &CurrencyRecord) -> Result<ExchangeRate> {
    let from_price = parse_price(from)?;
    let to_price = parse_price(to)?;

    if to_price == 0.0 {
        return Err(Error::InvalidPrice(format!(
            "{} price is zero, cannot divide by it",
            to.symbol
        )));
    }

    let ratio = from_price / to_price;
    if !ratio.is_finite() {
        return Err(Error::InvalidPrice(format!(
            "{} / {} is not a finite number",
            from.symbol, to.symbol
        )));
    }

    Ok(ExchangeRate {
        from_symbol: from.symbol.clone(),
        to_symbol: to.symbol.clone(),
        rate: format!("{:.2}", ratio),
    })
}
