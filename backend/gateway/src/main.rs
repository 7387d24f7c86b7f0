use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use heuristics::{LiveRateClient, RateProvider, ResponsePipeline};
use snapsolve_config::{Config, Provider};
use snapsolve_gateway::{start_server, GatewayState};
use snapsolve_inference::{InferenceClient, VisionBackend};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    logging::init_logger(&config.log_level);
    info!(?config, "starting snapsolve");

    let backend = match config.provider {
        Provider::Gemini => VisionBackend::Gemini,
        Provider::OpenAi => VisionBackend::OpenAi,
    };
    let inference = Arc::new(InferenceClient::new(
        backend,
        &config.api_key,
        &config.model,
    ));
    let rates: Arc<dyn RateProvider> =
        Arc::new(LiveRateClient::new(&config.rates_base_url));
    let pipeline = Arc::new(ResponsePipeline::new(rates));

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .context("invalid bind address")?;
    start_server(addr, GatewayState { inference, pipeline }).await
}
