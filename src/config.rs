use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub api_token: String,
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    /// Fallback IANA zone for due-date writes that omit a `timezone` field.
    pub default_timezone: chrono_tz::Tz,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;
        let api_token = env_required("OPSDESK_API_TOKEN")?;

        let host: IpAddr = env_or("OPSDESK_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid OPSDESK_HOST: {e}"))?;

        let port: u16 = env_or("OPSDESK_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid OPSDESK_PORT: {e}"))?;

        let log_level = env_or("OPSDESK_LOG_LEVEL", "info");

        let default_timezone: chrono_tz::Tz = env_or("OPSDESK_TIMEZONE", "UTC")
            .parse()
            .map_err(|e| format!("Invalid OPSDESK_TIMEZONE: {e}"))?;

        Ok(Config {
            database_url,
            api_token,
            host,
            port,
            log_level,
            default_timezone,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
