use crate::auth::jwt::JwtConfig;

/// Process-level configuration, read once at startup.
///
/// Defaults target local development; production overrides everything
/// through the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Origins allowed by CORS, from the comma-separated `CORS_ORIGINS` var.
    pub cors_origins: Vec<String>,
    /// Per-request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Token signing and expiry settings.
    pub jwt: JwtConfig,
    /// Upload storage selection and URLs.
    pub storage: StorageConfig,
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `CORS_ORIGINS`, and `REQUEST_TIMEOUT_SECS`, then
    /// delegate to [`JwtConfig::from_env`] and [`StorageConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics when a variable is present but does not parse.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_or("PORT", "8080")
                .parse()
                .expect("PORT must be a valid u16"),
            cors_origins: split_csv(&env_or("CORS_ORIGINS", "http://localhost:5173")),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", "30")
                .parse()
                .expect("REQUEST_TIMEOUT_SECS must be a valid u64"),
            jwt: JwtConfig::from_env(),
            storage: StorageConfig::from_env(),
        }
    }
}

/// Which storage backend serves uploaded files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Local,
    S3,
}

/// Upload storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Selected backend (default: local).
    pub backend: StorageBackend,
    /// Root directory for the local backend (default: `uploads`).
    pub upload_dir: String,
    /// External origin local files are served from (default: derived dev URL).
    pub public_base_url: String,
    /// Bucket name; required when the backend is `s3`.
    pub s3_bucket: Option<String>,
    /// Public URL prefix for bucket objects; required when the backend is `s3`.
    pub s3_public_url: Option<String>,
}

impl StorageConfig {
    /// Read `STORAGE_BACKEND` (`local` or `s3`), `UPLOAD_DIR`,
    /// `PUBLIC_BASE_URL`, `S3_BUCKET`, and `S3_PUBLIC_URL`.
    ///
    /// # Panics
    ///
    /// Panics if `STORAGE_BACKEND` names an unknown backend, or if the s3
    /// backend is selected without `S3_BUCKET` and `S3_PUBLIC_URL`.
    pub fn from_env() -> Self {
        let backend = match env_or("STORAGE_BACKEND", "local").as_str() {
            "local" => StorageBackend::Local,
            "s3" => StorageBackend::S3,
            other => panic!("STORAGE_BACKEND must be 'local' or 's3', got '{other}'"),
        };

        let s3_bucket = std::env::var("S3_BUCKET").ok();
        let s3_public_url = std::env::var("S3_PUBLIC_URL").ok();

        if backend == StorageBackend::S3 {
            assert!(
                s3_bucket.is_some(),
                "S3_BUCKET must be set when STORAGE_BACKEND=s3"
            );
            assert!(
                s3_public_url.is_some(),
                "S3_PUBLIC_URL must be set when STORAGE_BACKEND=s3"
            );
        }

        Self {
            backend,
            upload_dir: env_or("UPLOAD_DIR", "uploads"),
            public_base_url: env_or("PUBLIC_BASE_URL", "http://localhost:8080"),
            s3_bucket,
            s3_public_url,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
