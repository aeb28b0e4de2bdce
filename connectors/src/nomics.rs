use crate::{NomicsConfig, PricingConnector};
use async_trait::async_trait;
use common::{
    models::{ApiOutcome, Symbols, TickerRequest},
    Result,
};
use reqwest::header::ACCEPT;
use tracing::{debug, error};

const USER_AGENT: &str = concat!("tickerproxy/", env!("CARGO_PKG_VERSION"));
const TICKER_PATH: &str = "/currencies/ticker";

pub struct NomicsConnector {
    client: reqwest::Client,
    config: NomicsConfig,
}

impl NomicsConnector {
    pub fn new(config: NomicsConfig) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, config })
    }

    /// Full ticker URL, including the API key
    pub fn ticker_url(&self, request: &TickerRequest) -> String {
        format!(
            "{}{}?{}",
            self.config.base_url,
            TICKER_PATH,
            ticker_query(&urlencoding::encode(&self.config.api_key), request)
        )
    }

    fn redacted_url(&self, request: &TickerRequest) -> String {
        format!(
            "{}{}?{}",
            self.config.base_url,
            TICKER_PATH,
            ticker_query("[redacted]", request)
        )
    }
}

fn join_ids(ids: &Symbols) -> String {
    ids.as_slice()
        .iter()
        .map(|id| urlencoding::encode(id).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

// Parameter order is fixed per request shape. `key` must already be encoded.
fn ticker_query(key: &str, request: &TickerRequest) -> String {
    match request {
        TickerRequest::Listing {
            ids,
            intervals,
            page,
            per_page,
        } => format!(
            "key={}&ids={}&page={}&interval={}&per_page={}",
            key,
            join_ids(ids),
            page,
            intervals,
            per_page
        ),
        TickerRequest::Conversion { ids, convert } => format!(
            "key={}&ids={}&convert={}",
            key,
            join_ids(ids),
            urlencoding::encode(convert)
        ),
    }
}

#[async_trait]
impl PricingConnector for NomicsConnector {
    async fn fetch(&self, request: &TickerRequest) -> Result<ApiOutcome> {
        debug!("Fetching tickers from Nomics: {}", self.redacted_url(request));

        let response = self
            .client
            .get(self.ticker_url(request))
            .header(ACCEPT, "*/*")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        let outcome = ApiOutcome::from_status(status, body);
        if let ApiOutcome::Failure { status, body } = &outcome {
            error!(
                "Nomics API error: {} - {}",
                status,
                String::from_utf8_lossy(body).trim_end()
            );
        }

        Ok(outcome)
    }
}
