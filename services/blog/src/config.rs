//! Service configuration read from the environment

use anyhow::{Result, bail};
use std::env;
use std::path::PathBuf;

/// Which record store backs the blog endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

/// HTTP and storage settings for the blog service
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store_backend: StoreBackend,
    /// Upload directory, also served statically at `/`
    pub public_dir: PathBuf,
    /// Fixed base for upload URLs; derived from the request when unset
    pub public_base_url: Option<String>,
    pub upload_max_bytes: usize,
    /// JSON file with the user directory entries
    pub users_file: Option<PathBuf>,
}

impl AppConfig {
    /// Create a new AppConfig from environment variables
    ///
    /// # Environment Variables
    /// - `HOST`: Bind address (default: "0.0.0.0")
    /// - `PORT`: Listening port (default: 8000)
    /// - `BLOG_STORE`: `postgres` or `memory` (default: "postgres")
    /// - `PUBLIC_DIR`: Upload directory (default: "public")
    /// - `PUBLIC_BASE_URL`: Base URL for uploaded files (optional)
    /// - `UPLOAD_MAX_BYTES`: Request body limit (default: 10 MiB)
    /// - `USERS_FILE`: JSON array of username/password pairs (optional)
    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8000);

        let store_backend = match env::var("BLOG_STORE")
            .unwrap_or_else(|_| "postgres".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "postgres" | "postgresql" => StoreBackend::Postgres,
            "memory" => StoreBackend::Memory,
            other => bail!("Unknown BLOG_STORE `{}`, expected `postgres` or `memory`", other),
        };

        let public_dir = env::var("PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("public"));

        let public_base_url = env::var("PUBLIC_BASE_URL").ok().filter(|s| !s.is_empty());

        let upload_max_bytes = env::var("UPLOAD_MAX_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10 * 1024 * 1024);

        let users_file = env::var("USERS_FILE")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Ok(AppConfig {
            host,
            port,
            store_backend,
            public_dir,
            public_base_url,
            upload_max_bytes,
            users_file,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 7] = [
        "HOST",
        "PORT",
        "BLOG_STORE",
        "PUBLIC_DIR",
        "PUBLIC_BASE_URL",
        "UPLOAD_MAX_BYTES",
        "USERS_FILE",
    ];

    fn clear_env() {
        for var in VARS {
            // SAFETY: every test touching these variables runs serially
            unsafe { env::remove_var(var) };
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = AppConfig::from_env().unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.store_backend, StoreBackend::Postgres);
        assert_eq!(config.public_dir, PathBuf::from("public"));
        assert!(config.public_base_url.is_none());
        assert_eq!(config.upload_max_bytes, 10 * 1024 * 1024);
        assert!(config.users_file.is_none());
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env();
        unsafe {
            env::set_var("PORT", "9100");
            env::set_var("BLOG_STORE", "Memory");
            env::set_var("PUBLIC_BASE_URL", "https://blog.example.com");
            env::set_var("USERS_FILE", "/etc/blog/users.json");
        }

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(
            config.public_base_url.as_deref(),
            Some("https://blog.example.com")
        );
        assert_eq!(config.users_file, Some(PathBuf::from("/etc/blog/users.json")));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_unknown_store_backend_is_rejected() {
        clear_env();
        unsafe { env::set_var("BLOG_STORE", "mongodb") };

        assert!(AppConfig::from_env().is_err());

        clear_env();
    }
}
