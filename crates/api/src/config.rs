use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory bulk uploads are spooled into while they are processed.
    pub upload_dir: PathBuf,
    /// Largest accepted request body, in bytes (default: 10 MiB).
    pub max_upload_bytes: usize,
    /// Operator account created at startup when a password is configured.
    pub default_admin_username: String,
    pub default_admin_password: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `HOST`                   | `0.0.0.0`                  |
    /// | `PORT`                   | `3000`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                       |
    /// | `UPLOAD_DIR`             | `uploads`                  |
    /// | `MAX_UPLOAD_BYTES`       | `10485760`                 |
    /// | `DEFAULT_ADMIN_USERNAME` | `admin`                    |
    /// | `DEFAULT_ADMIN_PASSWORD` | unset                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upload_dir = PathBuf::from(
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()),
        );

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| "10485760".into())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let default_admin_username =
            std::env::var("DEFAULT_ADMIN_USERNAME").unwrap_or_else(|_| "admin".into());

        let default_admin_password = std::env::var("DEFAULT_ADMIN_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upload_dir,
            max_upload_bytes,
            default_admin_username,
            default_admin_password,
        }
    }
}
