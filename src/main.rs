use genimage_relay::{
    logger::{self, LoggerConfig},
    server, ConfigProvider, EnvConfigProvider, ImageClient, ImageHandler, ServerConfig,
    UpstreamConfig,
};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    logger::init_with_config(LoggerConfig::from_env())?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let server_config = ServerConfig::from_env();
    logger::log_startup_info(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        &server_config.host,
        server_config.port,
    );

    let env_config = EnvConfigProvider::default();
    if env_config.load().api_key().is_some() {
        log::info!("🔑 Upstream API key found");
    } else {
        log::warn!(
            "⚠️  Neither {} nor {} is set; requests will fail until one is provided",
            env_config.primary_var,
            env_config.fallback_var
        );
    }

    let upstream = UpstreamConfig::default();
    log::info!(
        "🎨 Upstream: {} (timeout {}s)",
        upstream.endpoint,
        upstream.timeout.as_secs()
    );

    let client = match ImageClient::new(upstream) {
        Ok(client) => client,
        Err(e) => {
            log::error!("❌ Failed to build HTTP client: {}", e);
            return Err(e.into());
        }
    };

    let handler = ImageHandler::new(env_config, client);
    server::run(server_config, handler).await?;

    Ok(())
}
