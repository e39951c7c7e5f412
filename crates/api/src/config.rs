use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    /// Twilio messaging credentials
    #[serde(default)]
    pub twilio: TwilioConfig,
    /// PDF page layout
    #[serde(default)]
    pub pdf: PdfConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Twilio account used for outbound SMS.
#[derive(Debug, Clone, Deserialize)]
pub struct TwilioConfig {
    #[serde(default)]
    pub account_sid: String,

    #[serde(default)]
    pub auth_token: String,

    /// Sender number in E.164 format
    #[serde(default)]
    pub phone_number: String,

    #[serde(default = "default_twilio_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_twilio_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            phone_number: String::new(),
            api_base_url: default_twilio_base_url(),
            timeout_ms: default_twilio_timeout_ms(),
        }
    }
}

impl TwilioConfig {
    /// True when all three credentials are present.
    pub fn is_configured(&self) -> bool {
        !self.account_sid.is_empty() && !self.auth_token.is_empty() && !self.phone_number.is_empty()
    }

    fn is_partially_configured(&self) -> bool {
        let set = [&self.account_sid, &self.auth_token, &self.phone_number]
            .iter()
            .filter(|v| !v.is_empty())
            .count();
        set > 0 && set < 3
    }
}

/// Page geometry and typography for rendered documents.
#[derive(Debug, Clone, Deserialize)]
pub struct PdfConfig {
    #[serde(default = "default_page_width")]
    pub page_width_mm: f32,

    #[serde(default = "default_page_height")]
    pub page_height_mm: f32,

    #[serde(default = "default_margin")]
    pub margin_mm: f32,

    /// Body text size in points; headings scale from it
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    #[serde(default = "default_pdf_title")]
    pub title: String,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            page_width_mm: default_page_width(),
            page_height_mm: default_page_height(),
            margin_mm: default_margin(),
            font_size: default_font_size(),
            title: default_pdf_title(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_twilio_base_url() -> String {
    "https://api.twilio.com".to_string()
}
fn default_twilio_timeout_ms() -> u64 {
    10_000
}
fn default_page_width() -> f32 {
    210.0 // A4
}
fn default_page_height() -> f32 {
    297.0
}
fn default_margin() -> f32 {
    20.0
}
fn default_font_size() -> f32 {
    11.0
}
fn default_pdf_title() -> String {
    "Document".to_string()
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with PC__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("PC").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration from embedded defaults plus overrides.
    ///
    /// Does not touch the file system, so tests can call it from any directory.
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [server]
            host = "127.0.0.1"
            port = 8080
            request_timeout_secs = 30
            cors_origins = []

            [logging]
            level = "info"
            format = "pretty"

            [twilio]
            account_sid = ""
            auth_token = ""
            phone_number = ""
            api_base_url = "https://api.twilio.com"
            timeout_ms = 10000

            [pdf]
            page_width_mm = 210.0
            page_height_mm = 297.0
            margin_mm = 20.0
            font_size = 11.0
            title = "Test Document"
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Server port cannot be 0".to_string(),
            ));
        }

        if self.twilio.is_partially_configured() {
            return Err(ConfigValidationError::MissingRequired(
                "PC__TWILIO__ACCOUNT_SID, PC__TWILIO__AUTH_TOKEN and PC__TWILIO__PHONE_NUMBER must be set together"
                    .to_string(),
            ));
        }

        let pdf = &self.pdf;
        if pdf.page_width_mm <= 0.0 || pdf.page_height_mm <= 0.0 || pdf.font_size <= 0.0 {
            return Err(ConfigValidationError::InvalidValue(
                "PDF page size and font size must be positive".to_string(),
            ));
        }
        if pdf.margin_mm < 0.0
            || pdf.margin_mm * 2.0 >= pdf.page_width_mm
            || pdf.margin_mm * 2.0 >= pdf.page_height_mm
        {
            return Err(ConfigValidationError::InvalidValue(
                "PDF margin must leave a printable area".to_string(),
            ));
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }
}
