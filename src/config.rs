use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use crate::error::{AppError, Result};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

#[derive(Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub openai_api_key: String,
    pub model: String,
    pub api_base: String,
}

impl Config {
    /// Reads the process environment (and `.env`, if present).
    ///
    /// A missing `OPENAI_API_KEY` is a hard error so the server refuses to start
    /// instead of failing every provider call later.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let openai_api_key = env::var("OPENAI_API_KEY")
            .map_err(|e| AppError::ConfigError(format!("OPENAI_API_KEY: {}", e)))?;
        if openai_api_key.trim().is_empty() {
            return Err(AppError::ConfigError("OPENAI_API_KEY is empty".to_string()));
        }

        let model = env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let api_base = env::var("LLM_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
        let server_addr = parse_addr(&host, &port)?;

        Ok(Config {
            server_addr,
            openai_api_key,
            model,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }
}

fn parse_addr(host: &str, port: &str) -> Result<SocketAddr> {
    let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
    let ip = IpAddr::from_str(host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;
    Ok(SocketAddr::new(ip, port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_host_and_port() {
        let addr = parse_addr("0.0.0.0", "8080").unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn rejects_bad_port() {
        let err = parse_addr("127.0.0.1", "http").unwrap_err();
        assert!(matches!(err, AppError::ConfigError(msg) if msg.starts_with("Invalid port")));
    }

    #[test]
    fn rejects_bad_host() {
        assert!(matches!(parse_addr("localhost", "5000"), Err(AppError::ConfigError(_))));
    }
}
