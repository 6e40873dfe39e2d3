use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use quotehub_core::prices::{PriceProviders, PriceService, PriceServiceTrait};
use quotehub_market_data::{
    CoinGeckoProvider, YahooClient, YahooCommodityProvider, YahooEquityProvider,
};
use quotehub_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, DbPool, PriceRepository,
};

pub struct AppState {
    pub price_service: Arc<dyn PriceServiceTrait>,
    pub pool: Arc<DbPool>,
}

pub fn init_tracing() {
    let log_format = std::env::var("QH_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Upstream providers built from configuration. Yahoo serves both the
/// equity and commodity classes through one shared client.
pub fn build_providers(config: &Config) -> anyhow::Result<PriceProviders> {
    let mut yahoo = YahooClient::with_timeout(config.provider_timeout)?;
    if let Some(base_url) = &config.yahoo_base_url {
        yahoo = yahoo.with_base_url(base_url.as_str());
    }
    let yahoo = Arc::new(yahoo);

    let mut coingecko =
        CoinGeckoProvider::with_timeout(config.coingecko_api_key.clone(), config.provider_timeout)?;
    if let Some(base_url) = &config.coingecko_base_url {
        coingecko = coingecko.with_base_url(base_url.as_str());
    }

    Ok(PriceProviders {
        equity: Arc::new(YahooEquityProvider::new(yahoo.clone())),
        crypto: Arc::new(coingecko),
        commodity: Arc::new(YahooCommodityProvider::new(yahoo)),
    })
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let providers = build_providers(config)?;
    build_state_with_providers(config, providers).await
}

pub async fn build_state_with_providers(
    config: &Config,
    providers: PriceProviders,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let repository = Arc::new(PriceRepository::new(pool.clone(), writer));
    let price_service = Arc::new(PriceService::new(providers, repository));

    Ok(Arc::new(AppState {
        price_service,
        pool,
    }))
}
