use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

/// Placeholder JWT secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &["change-me-to-a-random-string", "dev-secret-change-me"];

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub jwt_secret: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("SNIPPETS_JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            bail!("SNIPPETS_JWT_SECRET is unset or still a placeholder");
        }

        let host = lookup("SNIPPETS_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("SNIPPETS_PORT")
            .unwrap_or_else(|| "8000".into())
            .parse()
            .context("SNIPPETS_PORT must be a port number")?;
        let db_path: PathBuf = lookup("SNIPPETS_DB_PATH")
            .unwrap_or_else(|| "snippets.db".into())
            .into();

        Ok(Self {
            host,
            port,
            db_path,
            jwt_secret,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let cfg = config(&[("SNIPPETS_JWT_SECRET", "s3cret")]).unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.db_path, PathBuf::from("snippets.db"));
        assert_eq!(cfg.addr().unwrap().port(), 8000);
    }

    #[test]
    fn missing_or_placeholder_secret_is_fatal() {
        assert!(config(&[]).is_err());
        assert!(config(&[("SNIPPETS_JWT_SECRET", "dev-secret-change-me")]).is_err());
    }

    #[test]
    fn overrides_are_read() {
        let cfg = config(&[
            ("SNIPPETS_JWT_SECRET", "s3cret"),
            ("SNIPPETS_HOST", "127.0.0.1"),
            ("SNIPPETS_PORT", "9000"),
            ("SNIPPETS_DB_PATH", "/tmp/s.db"),
        ])
        .unwrap();
        assert_eq!(cfg.addr().unwrap().to_string(), "127.0.0.1:9000");
        assert_eq!(cfg.db_path, PathBuf::from("/tmp/s.db"));

        assert!(config(&[("SNIPPETS_JWT_SECRET", "s"), ("SNIPPETS_PORT", "http")]).is_err());
    }
}
