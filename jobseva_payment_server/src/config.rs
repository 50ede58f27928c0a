use std::{env, time::Duration};

use jsp_common::Secret;
use log::*;
use razorpay_tools::RazorpayConfig;

use crate::errors::ServerError;

const DEFAULT_JSP_HOST: &str = "127.0.0.1";
const DEFAULT_JSP_PORT: u16 = 8360;
const DEFAULT_JSP_DATABASE_URL: &str = "sqlite://data/jobseva.db";
const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub razorpay: RazorpayServerConfig,
}

/// Gateway credentials and connection settings. The key pair has no defaults; the server refuses
/// to start without it.
#[derive(Clone, Debug)]
pub struct RazorpayServerConfig {
    pub key_id: String,
    pub key_secret: Secret<String>,
    pub api_url: Option<String>,
    pub timeout: Option<Duration>,
}

impl ServerConfig {
    /// Reads the server configuration from the environment once, at startup. Host, port and
    /// database url fall back to defaults with a logged warning; the gateway key pair is required
    /// and its absence is a hard error.
    pub fn try_from_env() -> Result<Self, ServerError> {
        let host = env::var("JSP_HOST").ok().unwrap_or_else(|| DEFAULT_JSP_HOST.into());
        let port = env::var("JSP_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for JSP_PORT. {e} Using the default, {DEFAULT_JSP_PORT}, instead."
                    );
                    DEFAULT_JSP_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_JSP_PORT);
        let database_url = env::var("JSP_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ JSP_DATABASE_URL is not set. Using the default, {DEFAULT_JSP_DATABASE_URL}, instead.");
            DEFAULT_JSP_DATABASE_URL.into()
        });
        let razorpay = RazorpayServerConfig::try_from_env()?;
        Ok(Self { host, port, database_url, razorpay })
    }
}

impl RazorpayServerConfig {
    pub fn try_from_env() -> Result<Self, ServerError> {
        let key_id = env::var("JSP_RAZORPAY_KEY_ID").map_err(|_| {
            ServerError::ConfigurationError(
                "JSP_RAZORPAY_KEY_ID is not set. The server cannot create orders without it.".into(),
            )
        })?;
        let key_secret = env::var("JSP_RAZORPAY_KEY_SECRET").map(Secret::new).map_err(|_| {
            ServerError::ConfigurationError(
                "JSP_RAZORPAY_KEY_SECRET is not set. The server cannot verify payments without it.".into(),
            )
        })?;
        let api_url = env::var("JSP_RAZORPAY_API_URL").ok();
        let timeout = env::var("JSP_GATEWAY_TIMEOUT_SECS")
            .ok()
            .map(|s| {
                s.parse::<u64>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid value for JSP_GATEWAY_TIMEOUT_SECS. {e} Using the default, \
                         {DEFAULT_GATEWAY_TIMEOUT_SECS}, instead."
                    );
                    DEFAULT_GATEWAY_TIMEOUT_SECS
                })
            })
            .map(Duration::from_secs);
        Ok(Self { key_id, key_secret, api_url, timeout })
    }

    pub fn api_config(&self) -> RazorpayConfig {
        let mut config = RazorpayConfig::new(self.key_id.clone(), self.key_secret.clone());
        if let Some(url) = &self.api_url {
            config = config.with_api_url(url);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        config
    }
}
