use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::{
    models::{CurrencyRecord, ExchangeRate, FiatPrice, IntervalSet, Symbols},
    Error as CommonError,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};

use crate::service::CurrencyService;

pub type SharedService = Arc<CurrencyService>;

// Create a wrapper for our common::Error type
pub struct ApiError(CommonError);

impl From<CommonError> for ApiError {
    fn from(err: CommonError) -> Self {
        ApiError(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(CommonError::Validation(rejection.body_text()))
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    errors: Vec<String>,
}

// Convert our API error wrapper to an Axum response
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CommonError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CommonError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            CommonError::NotFound(_) => StatusCode::NOT_FOUND,
            CommonError::MalformedResponse(_) | CommonError::Http(_) => StatusCode::BAD_GATEWAY,
            CommonError::InvalidPrice(_) | CommonError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Upstream bodies are forwarded verbatim, everything else uses its Display
        let message = match self.0 {
            CommonError::Upstream { body, .. } => body,
            other => other.to_string(),
        };

        if status.is_server_error() {
            error!("Request failed with {}: {}", status, message);
        } else {
            debug!("Request rejected with {}: {}", status, message);
        }

        (
            status,
            Json(ErrorResponse {
                errors: vec![message],
            }),
        )
            .into_response()
    }
}

fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(CommonError::Validation(format!("Missing required parameter: {}", name)).into()),
    }
}

#[derive(Debug, Deserialize)]
pub struct CurrenciesQuery {
    pub tickers: Option<String>,
    pub interval: Option<String>,
}

// List tickers with their prices and supply
pub async fn list_currencies(
    State(service): State<SharedService>,
    query: Result<Query<CurrenciesQuery>, QueryRejection>,
) -> Result<Json<Vec<CurrencyRecord>>, ApiError> {
    let Query(query) = query?;

    // Interval is checked first so a bad value never reaches the upstream
    let intervals = query
        .interval
        .as_deref()
        .map(str::parse::<IntervalSet>)
        .transpose()?;
    let tickers: Symbols = query.tickers.as_deref().unwrap_or_default().parse()?;

    let records = service.list_currencies(tickers, intervals).await?;
    Ok(Json(records))
}

#[derive(Debug, Deserialize)]
pub struct FiatQuery {
    pub fiat_currency: Option<String>,
    pub crypto_currency: Option<String>,
}

// Price of a crypto currency in a fiat currency
pub async fn get_fiat_price(
    State(service): State<SharedService>,
    query: Result<Query<FiatQuery>, QueryRejection>,
) -> Result<Json<FiatPrice>, ApiError> {
    let Query(query) = query?;
    let fiat_currency = required(query.fiat_currency, "fiat_currency")?;
    let crypto_currency = required(query.crypto_currency, "crypto_currency")?;

    let price = service.fiat_price(&fiat_currency, &crypto_currency).await?;
    Ok(Json(price))
}

#[derive(Debug, Deserialize)]
pub struct CalculateQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

// Exchange rate between two currencies
pub async fn calculate(
    State(service): State<SharedService>,
    query: Result<Query<CalculateQuery>, QueryRejection>,
) -> Result<Json<ExchangeRate>, ApiError> {
    let Query(query) = query?;
    let from = required(query.from, "from")?;
    let to = required(query.to, "to")?;

    let rate = service.calculate(&from, &to).await?;
    Ok(Json(rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use common::models::{ApiOutcome, TickerRequest};
    use connectors::PricingConnector;
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use tower::ServiceExt;

    const FIXTURE: &str = include_str!("../../fixtures/currencies_api_response.json");
    const AUTH_ERROR: &str = "Authentication failed. Check your API key and our documentation at docs.nomics.com for details. \nIf you don't have a key, you can get one at NomicsAPI.com\n";

    /// Answers every call with a canned status and body, remembering what was asked
    struct FixtureConnector {
        status: u16,
        body: String,
        requests: Mutex<Vec<TickerRequest>>,
    }

    impl FixtureConnector {
        fn new(status: u16, body: impl Into<String>) -> Arc<Self> {
            Arc::new(Self {
                status,
                body: body.into(),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<TickerRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PricingConnector for FixtureConnector {
        async fn fetch(&self, request: &TickerRequest) -> common::Result<ApiOutcome> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(ApiOutcome::from_status(
                self.status,
                self.body.clone().into_bytes(),
            ))
        }
    }

    /// Fails every call at the transport level, before any status is seen
    struct UnreachableConnector;

    #[async_trait]
    impl PricingConnector for UnreachableConnector {
        async fn fetch(&self, _request: &TickerRequest) -> common::Result<ApiOutcome> {
            let err = reqwest::Client::new()
                .get("not a url")
                .build()
                .unwrap_err();
            Err(err.into())
        }
    }

    async fn get(connector: Arc<dyn PricingConnector>, uri: &str) -> (StatusCode, Value) {
        let service = Arc::new(CurrencyService::new(connector));
        let app = crate::app(service);

        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        let status = response.status();
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn single_record_fixture() -> String {
        let all: Vec<Value> = serde_json::from_str(FIXTURE).unwrap();
        Value::Array(vec![all[0].clone()]).to_string()
    }

    #[tokio::test]
    async fn lists_currencies_in_upstream_order() {
        let connector = FixtureConnector::new(200, FIXTURE);
        let (status, body) = get(connector.clone(), "/api/currencies?tickers=BTC,ETH,XRP").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                {
                    "name": "Bitcoin",
                    "symbol": "BTC",
                    "price": "48135.84174593",
                    "circulating_supply": "18831712",
                    "max_supply": "21000000"
                },
                {
                    "name": "Ethereum",
                    "symbol": "ETH",
                    "price": "3281.22963113",
                    "circulating_supply": "117753964",
                    "max_supply": null
                },
                {
                    "name": "XRP",
                    "symbol": "XRP",
                    "price": "1.02691563",
                    "circulating_supply": "46750439262",
                    "max_supply": "100000000000"
                }
            ])
        );

        assert_eq!(
            connector.requests(),
            vec![TickerRequest::listing("BTC,ETH,XRP".parse().unwrap(), None)]
        );
    }

    #[tokio::test]
    async fn passes_requested_intervals_through() {
        let connector = FixtureConnector::new(200, FIXTURE);
        let (status, _) = get(connector.clone(), "/api/currencies?tickers=BTC&interval=1d,ytd").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            connector.requests(),
            vec![TickerRequest::listing(
                "BTC".parse().unwrap(),
                Some("1d,ytd".parse().unwrap())
            )]
        );
    }

    #[tokio::test]
    async fn invalid_interval_is_rejected_before_any_upstream_call() {
        let connector = FixtureConnector::new(200, FIXTURE);
        let (status, body) = get(
            connector.clone(),
            "/api/currencies?tickers=BTC,ETH,XRP&interval=1dd",
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body,
            json!({
                "errors": ["Interval not valid use either/all of these 1d,7d,30d,365d,ytd as accepted intervals"]
            })
        );
        assert!(connector.requests().is_empty());
    }

    #[tokio::test]
    async fn missing_tickers_is_unprocessable() {
        let connector = FixtureConnector::new(200, FIXTURE);
        let (status, body) = get(connector.clone(), "/api/currencies").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errors"].as_array().unwrap().len(), 1);
        assert!(connector.requests().is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_is_forwarded_with_its_status() {
        let connector = FixtureConnector::new(401, AUTH_ERROR);
        let (status, body) = get(connector, "/api/currencies?tickers=BTC,ETH,XRP").await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "errors": [AUTH_ERROR] }));
    }

    #[tokio::test]
    async fn malformed_upstream_body_is_a_bad_gateway() {
        let connector = FixtureConnector::new(200, "<html>maintenance</html>");
        let (status, body) = get(connector, "/api/currencies?tickers=BTC").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["errors"][0]
            .as_str()
            .unwrap()
            .starts_with("Malformed upstream response"));
    }

    #[tokio::test]
    async fn fiat_price_for_a_single_record() {
        let connector = FixtureConnector::new(200, single_record_fixture());
        let (status, body) = get(
            connector.clone(),
            "/api/currencies/fiat?fiat_currency=USD&crypto_currency=BTC",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "currency": "USD", "fiat_price": "48135.84174593" })
        );
        assert_eq!(
            connector.requests(),
            vec![TickerRequest::conversion("BTC".parse().unwrap(), "USD")]
        );
    }

    #[tokio::test]
    async fn fiat_price_requires_both_currencies() {
        let connector = FixtureConnector::new(200, single_record_fixture());
        let (status, body) = get(connector.clone(), "/api/currencies/fiat?fiat_currency=USD").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body,
            json!({ "errors": ["Missing required parameter: crypto_currency"] })
        );
        assert!(connector.requests().is_empty());
    }

    #[tokio::test]
    async fn fiat_price_for_an_unknown_currency_is_not_found() {
        let connector = FixtureConnector::new(200, "[]");
        let (status, _) = get(
            connector,
            "/api/currencies/fiat?fiat_currency=USD&crypto_currency=NOPE",
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn calculates_one_currency_in_another() {
        let connector = FixtureConnector::new(200, FIXTURE);
        let (status, body) = get(connector.clone(), "/api/currencies/calculate?from=BTC&to=ETH").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "1 BTC": "14.67 ETH" }));
        assert_eq!(
            connector.requests(),
            vec![TickerRequest::conversion("BTC,ETH".parse().unwrap(), "USD")]
        );
    }

    #[tokio::test]
    async fn calculate_forwards_upstream_failures() {
        let connector = FixtureConnector::new(401, AUTH_ERROR);
        let (status, body) = get(connector, "/api/currencies/calculate?from=BTC&to=ETH").await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "errors": [AUTH_ERROR] }));
    }

    #[tokio::test]
    async fn calculate_with_a_zero_price_is_a_server_error() {
        let body = json!([
            { "name": "Bitcoin", "currency": "BTC", "price": "48135.84174593" },
            { "name": "Dead Coin", "currency": "DEAD", "price": "0" }
        ])
        .to_string();
        let connector = FixtureConnector::new(200, body);
        let (status, body) = get(connector, "/api/currencies/calculate?from=BTC&to=DEAD").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["errors"][0].as_str().unwrap().starts_with("Invalid price"));
    }

    #[tokio::test]
    async fn calculate_with_a_missing_record_is_not_found() {
        let connector = FixtureConnector::new(200, single_record_fixture());
        let (status, body) = get(connector, "/api/currencies/calculate?from=BTC&to=ETH").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "errors": ["Not found: currency ETH"] }));
    }

    #[tokio::test]
    async fn transport_failure_is_a_bad_gateway() {
        let (status, body) = get(Arc::new(UnreachableConnector), "/api/currencies?tickers=BTC").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["errors"][0]
            .as_str()
            .unwrap()
            .starts_with("HTTP request error"));
    }

    #[tokio::test]
    async fn calculate_with_a_non_numeric_price_is_a_server_error() {
        let body = json!([
            { "name": "Bitcoin", "currency": "BTC", "price": "abc" },
            { "name": "Ethereum", "currency": "ETH", "price": "3281.22963113" }
        ])
        .to_string();
        let connector = FixtureConnector::new(200, body);
        let (status, body) = get(connector, "/api/currencies/calculate?from=BTC&to=ETH").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["errors"][0]
            .as_str()
            .unwrap()
            .starts_with("Invalid price: BTC price"));
    }
}
