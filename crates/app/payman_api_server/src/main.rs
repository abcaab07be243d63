//! Payman Relay server binary.
//!
//! Reads configuration from the environment (and `.env`), lets command-line
//! flags override it, then serves the relay until Ctrl-C.

use clap::Parser;
use payman_api::config::ApiConfig;
use payman_core::Environment;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info,payman_api=debug,payman_core=debug";

/// CLI arguments. Each flag overrides the matching environment variable.
#[derive(Parser, Debug)]
#[command(name = "payman_api_server", about = "Payman Relay server")]
struct Args {
    /// Interface to bind (overrides `HOST`).
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides `PORT`).
    #[arg(long)]
    port: Option<u16>,

    /// Payman deployment: `sandbox` or `live` (overrides `PAYMAN_ENVIRONMENT`).
    #[arg(long)]
    environment: Option<Environment>,

    /// Payman base URL (overrides `PAYMAN_BASE_URL`).
    #[arg(long)]
    base_url: Option<String>,
}

impl Args {
    fn apply(self, mut config: ApiConfig) -> ApiConfig {
        if self.host.is_some() || self.port.is_some() {
            let (env_host, env_port) = config
                .bind_addr
                .rsplit_once(':')
                .unwrap_or((config.bind_addr.as_str(), "8000"));
            let host = self.host.unwrap_or_else(|| env_host.to_string());
            let port = self
                .port
                .map(|p| p.to_string())
                .unwrap_or_else(|| env_port.to_string());
            config.bind_addr = format!("{host}:{port}");
        }
        if let Some(environment) = self.environment {
            config.environment = environment;
        }
        if self.base_url.is_some() {
            config.base_url = self.base_url;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let args = Args::parse();
    let config = args.apply(ApiConfig::from_env()?);

    info!(
        bind_addr = %config.bind_addr,
        environment = %config.environment,
        base_url = %config.base_url(),
        "starting payman_api_server"
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    let app = payman_api::router(payman_api::AppState::new(config));

    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> ApiConfig {
        ApiConfig {
            bind_addr: "0.0.0.0:8000".into(),
            client_id: "id".into(),
            client_secret: "secret".into(),
            environment: Environment::Sandbox,
            base_url: None,
        }
    }

    #[test]
    fn no_flags_keeps_env_config() {
        let args = Args::parse_from(["payman_api_server"]);
        let config = args.apply(base_config());
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.environment, Environment::Sandbox);
        assert_eq!(config.base_url, None);
    }

    #[test]
    fn port_flag_keeps_env_host() {
        let args = Args::parse_from(["payman_api_server", "--port", "9000"]);
        assert_eq!(args.apply(base_config()).bind_addr, "0.0.0.0:9000");
    }

    #[test]
    fn flags_override_everything() {
        let args = Args::parse_from([
            "payman_api_server",
            "--host",
            "127.0.0.1",
            "--environment",
            "live",
            "--base-url",
            "http://localhost:4000",
        ]);
        let config = args.apply(base_config());
        assert_eq!(config.bind_addr, "127.0.0.1:8000");
        assert_eq!(config.environment, Environment::Live);
        assert_eq!(config.base_url(), "http://localhost:4000");
    }
}
