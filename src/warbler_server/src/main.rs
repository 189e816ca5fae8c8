use color_eyre::eyre::Result;
use reqwest::{Client as HttpClient, Url};
use tokio::net::TcpListener;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use warbler::{
    HttpObjectStore, PostgresAccountStore, PostgresProfileStore, RegistrationPipeline,
    RegistrationService, adapters::config::WarblerSetting, configure_postgresql,
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let config = WarblerSetting::build()?;

    // Connects and runs migrations
    let pg_pool = configure_postgresql(&config.postgres).await?;
    let account_store = PostgresAccountStore::new(pg_pool.clone());
    let profile_store = PostgresProfileStore::new(pg_pool);

    let http_client = HttpClient::builder()
        .timeout(config.object_store.timeout())
        .build()?;

    let object_store = HttpObjectStore::new(
        Url::parse(&config.object_store.base_url)?,
        Url::parse(&config.object_store.public_base_url)?,
        config.object_store.bucket.clone(),
        config.object_store.auth_token.clone(),
        config.object_store.chunk_size,
        http_client,
    );

    let pipeline = RegistrationPipeline::new(
        object_store,
        account_store,
        profile_store.clone(),
        config.registration.pipeline_config(),
    );

    let service = RegistrationService::new(pipeline, profile_store)
        .with_max_request_bytes(config.registration.max_request_bytes);

    let allowed_origins = config.application.allowed_origins.clone();
    let allowed_origins = (!allowed_origins.is_empty()).then_some(allowed_origins);

    let listener = TcpListener::bind(&config.application.address).await?;
    tracing::info!("Starting warbler registration service...");

    service.run_standalone(listener, allowed_origins).await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
