mod config;
pub mod nomics;

pub use config::NomicsConfig;

use async_trait::async_trait;
use common::{
    models::{ApiOutcome, TickerRequest},
    Result,
};

/// Trait defining the interface for pricing API clients
#[async_trait]
pub trait PricingConnector: Send + Sync {
    /// Issue one ticker call and hand back the upstream status and body as-is
    async fn fetch(&self, request: &TickerRequest) -> Result<ApiOutcome>;
}
