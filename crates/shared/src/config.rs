//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// CAPTCHA verification for public letter submissions.
    #[serde(default)]
    pub captcha: CaptchaConfig,
    /// Letterhead printed on generated letters.
    #[serde(default)]
    pub desa: LetterheadConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT settings as read from configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    28_800 // one working day
}

/// CAPTCHA verification settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CaptchaConfig {
    /// Turn verification off for local development.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Site-verify endpoint of the CAPTCHA provider.
    #[serde(default = "default_verify_url")]
    pub verify_url: String,
    /// Server-side secret issued by the provider.
    #[serde(default)]
    pub secret: String,
    /// Request timeout in seconds.
    #[serde(default = "default_captcha_timeout")]
    pub timeout_secs: u64,
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            verify_url: default_verify_url(),
            secret: String::new(),
            timeout_secs: default_captcha_timeout(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_verify_url() -> String {
    "https://www.google.com/recaptcha/api/siteverify".to_string()
}

fn default_captcha_timeout() -> u64 {
    10
}

/// Village identity used on the letterhead of generated documents.
#[derive(Debug, Clone, Deserialize)]
pub struct LetterheadConfig {
    /// Village name, e.g. "Sukamaju".
    #[serde(default = "default_nama_desa")]
    pub nama_desa: String,
    /// District (kecamatan).
    #[serde(default)]
    pub kecamatan: String,
    /// Regency (kabupaten).
    #[serde(default)]
    pub kabupaten: String,
    /// Province.
    #[serde(default)]
    pub provinsi: String,
    /// Office address line.
    #[serde(default)]
    pub alamat: String,
    /// Name of the head of village who signs letters.
    #[serde(default)]
    pub kepala_desa: String,
    /// Title printed above the signature.
    #[serde(default = "default_jabatan")]
    pub jabatan: String,
}

impl Default for LetterheadConfig {
    fn default() -> Self {
        Self {
            nama_desa: default_nama_desa(),
            kecamatan: String::new(),
            kabupaten: String::new(),
            provinsi: String::new(),
            alamat: String::new(),
            kepala_desa: String::new(),
            jabatan: default_jabatan(),
        }
    }
}

fn default_nama_desa() -> String {
    "Desa".to_string()
}

fn default_jabatan() -> String {
    "Kepala Desa".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `DESA__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("DESA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
