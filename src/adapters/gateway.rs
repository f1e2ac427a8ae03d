use crate::utils::error::Result;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

const TEXT_TIMEOUT: Duration = Duration::from_secs(30);
const FILE_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the WhatsApp gateway HTTP API.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    base_url: String,
    client: Client,
}

impl GatewayClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST {base}/sendText with the gateway's args envelope.
    pub async fn send_text(&self, phone: &str, content: &str) -> Result<serde_json::Value> {
        let payload = json!({
            "args": {
                "to": format!("{}@c.us", phone),
                "content": content,
            }
        });

        tracing::debug!("Sending text message to {}", phone);

        let response = self
            .client
            .post(format!("{}/sendText", self.base_url))
            .json(&payload)
            .timeout(TEXT_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// POST {base}/sendFile with an inline data-URL attachment.
    pub async fn send_file(
        &self,
        phone: &str,
        file_data_url: &str,
        filename: &str,
        caption: &str,
    ) -> Result<serde_json::Value> {
        let payload = json!({
            "args": {
                "to": format!("{}@c.us", phone),
                "file": file_data_url,
                "filename": filename,
                "caption": caption,
            }
        });

        tracing::debug!("Sending file {} to {}", filename, phone);

        let response = self
            .client
            .post(format!("{}/sendFile", self.base_url))
            .json(&payload)
            .timeout(FILE_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}
