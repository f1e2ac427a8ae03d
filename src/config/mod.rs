use crate::utils::error::{Result, WhatsappError};
use crate::utils::validation::{
    validate_aws_region, validate_non_empty_string, validate_s3_bucket_name, validate_url,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the Dispatcher delivers a PDF when the template asks for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentMode {
    /// Base64 data URL posted straight to the gateway's file endpoint.
    Inline,
    /// Upload to S3, send a time-limited presigned link in the message body.
    PresignedLink,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub gateway: Option<GatewayConfig>,
    pub whatsapp: WhatsappConfig,
    pub s3: Option<S3Config>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the host site (PDF endpoint lives under it).
    pub site_url: String,
    /// API token sent to the internal PDF endpoint. Explicit, not ambient
    /// session state.
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatsappConfig {
    /// Country name used to pick the default calling code (defaults to India).
    pub default_country: Option<String>,
    pub attachment_mode: AttachmentMode,
    pub link_expiry_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    pub region: String,
    pub folder: Option<String>,
    /// Override for S3-compatible stores; the regional AWS endpoint otherwise.
    pub endpoint_url: Option<String>,
}

pub const DEFAULT_LINK_EXPIRY_SECONDS: u64 = 12 * 60 * 60;

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(WhatsappError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，支援 ${VAR} 環境變數替換
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| WhatsappError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    /// Gateway base URL: explicit override, then WHATSAPP_SERVER_URL, then the
    /// site's own URL. Trailing slashes trimmed.
    pub fn gateway_url(&self) -> String {
        if let Some(url) = self.gateway.as_ref().and_then(|g| g.url.as_deref()) {
            if !url.trim().is_empty() {
                return url.trim_end_matches('/').to_string();
            }
        }

        if let Ok(env_url) = std::env::var("WHATSAPP_SERVER_URL") {
            if !env_url.trim().is_empty() {
                return env_url.trim_end_matches('/').to_string();
            }
        }

        self.service.site_url.trim_end_matches('/').to_string()
    }

    pub fn link_expiry_seconds(&self) -> u64 {
        self.whatsapp
            .link_expiry_seconds
            .unwrap_or(DEFAULT_LINK_EXPIRY_SECONDS)
    }

    /// S3 settings, field-validated. Called at the start of every upload path
    /// so bad credentials fail before any remote call.
    pub fn s3(&self) -> Result<&S3Config> {
        let s3 = self.s3.as_ref().ok_or_else(|| WhatsappError::ConfigError {
            message: "Missing S3 configuration. Please set access key, secret, and bucket."
                .to_string(),
        })?;

        validate_non_empty_string("s3.access_key_id", &s3.access_key_id)?;
        validate_non_empty_string("s3.secret_access_key", &s3.secret_access_key)?;
        validate_s3_bucket_name("s3.bucket", &s3.bucket)?;
        validate_aws_region("s3.region", &s3.region)?;

        Ok(s3)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("service.site_url", &self.service.site_url)?;

        if let Some(url) = self.gateway.as_ref().and_then(|g| g.url.as_deref()) {
            validate_url("gateway.url", url)?;
        }

        if self.whatsapp.attachment_mode == AttachmentMode::PresignedLink {
            self.s3()?;
        }

        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}
