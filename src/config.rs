use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub font_dir: PathBuf,
    pub log_level: String,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
    pub to: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("SHIPFORM_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid SHIPFORM_HOST: {e}"))?;

        let port: u16 = env_or("SHIPFORM_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid SHIPFORM_PORT: {e}"))?;

        // 10 MiB default; the photo upload is the only large field.
        let max_body_size: usize = env_or("SHIPFORM_MAX_BODY_SIZE", "10485760")
            .parse()
            .map_err(|e| format!("Invalid SHIPFORM_MAX_BODY_SIZE: {e}"))?;

        let font_dir = PathBuf::from(env_or("SHIPFORM_FONT_DIR", "assets/fonts"));

        let log_level = env_or("SHIPFORM_LOG_LEVEL", "info");

        // All-or-nothing: any missing variable, or an empty password, leaves
        // dispatch disabled rather than failing startup.
        let smtp = match (
            std::env::var("SHIPFORM_SMTP_HOST").ok(),
            std::env::var("SHIPFORM_SMTP_USER").ok(),
            std::env::var("SHIPFORM_SMTP_PASS")
                .ok()
                .filter(|p| !p.is_empty()),
            std::env::var("SHIPFORM_SMTP_FROM").ok(),
            std::env::var("SHIPFORM_REPORT_TO").ok(),
        ) {
            (Some(host), Some(user), Some(pass), Some(from), Some(to)) => Some(SmtpConfig {
                host,
                port: env_or("SHIPFORM_SMTP_PORT", "587")
                    .parse()
                    .map_err(|e| format!("Invalid SHIPFORM_SMTP_PORT: {e}"))?,
                user,
                pass,
                from,
                to,
            }),
            _ => None,
        };

        Ok(Config {
            host,
            port,
            max_body_size,
            font_dir,
            log_level,
            smtp,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
