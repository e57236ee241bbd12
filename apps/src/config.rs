use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::{anyhow, bail, Context, Result};
use axum::http::HeaderValue;
use clap::Parser;
use url::Url;

/// HTTP server settings. Every flag falls back to the environment (and `.env`).
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about = "Personal-message signature verification service", long_about = None)]
pub struct ServerConfig {
    /// Port to listen on.
    #[clap(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Interface to bind.
    #[clap(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Comma-separated browser origins allowed to call the API (with credentials).
    #[clap(
        long,
        env = "CORS_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub cors_allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Parse the configured origins into `Origin` header values, in serialized form.
    pub fn allowed_origins(&self) -> Result<Vec<HeaderValue>> {
        let origins = self
            .cors_allowed_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .map(parse_origin)
            .collect::<Result<Vec<_>>>()?;

        if origins.is_empty() {
            bail!("at least one CORS allowed origin is required");
        }
        Ok(origins)
    }
}

fn parse_origin(origin: &str) -> Result<HeaderValue> {
    let url = Url::parse(origin).with_context(|| format!("invalid CORS origin {origin:?}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("CORS origin {origin:?} must use http or https");
    }
    if origin.ends_with('/') || url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        bail!("CORS origin {origin:?} must not carry a path, query or fragment");
    }
    let serialized = url.origin().ascii_serialization();
    HeaderValue::from_str(&serialized).map_err(|e| anyhow!("CORS origin {origin:?}: {e}"))
}
