use crate::utils::error::{Result, WhatsappError};
use reqwest::Client;
use std::time::Duration;

const PDF_TIMEOUT: Duration = Duration::from_secs(30);
const DOWNLOAD_PDF_PATH: &str = "/api/method/frappe.utils.print_format.download_pdf";

pub const DEFAULT_PRINT_FORMAT: &str = "Standard";

/// Client for the host site's print endpoint. Authenticates with an explicit
/// API token instead of an ambient session cookie.
#[derive(Debug, Clone)]
pub struct PdfClient {
    site_url: String,
    auth_token: Option<String>,
    client: Client,
}

impl PdfClient {
    pub fn new(site_url: String, auth_token: Option<String>) -> Self {
        Self {
            site_url: site_url.trim_end_matches('/').to_string(),
            auth_token,
            client: Client::new(),
        }
    }

    /// Rendered PDF bytes for a document. Empty content counts as a failure.
    pub async fn fetch_pdf(
        &self,
        doctype: &str,
        docname: &str,
        print_format: &str,
    ) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.site_url, DOWNLOAD_PDF_PATH);

        let mut request = self
            .client
            .get(&url)
            .query(&[
                ("doctype", doctype),
                ("name", docname),
                ("format", print_format),
                ("no_letterhead", "0"),
            ])
            .timeout(PDF_TIMEOUT);

        if let Some(token) = &self.auth_token {
            request = request.header("Authorization", format!("token {}", token));
        }

        let response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                tracing::error!("PDF download failed: {}", e);
                WhatsappError::PdfGenerationError {
                    message: format!("Failed to download PDF: {}", e),
                }
            })?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| WhatsappError::PdfGenerationError {
                message: format!("Failed to read PDF body: {}", e),
            })?;

        if bytes.is_empty() {
            return Err(WhatsappError::PdfGenerationError {
                message: "Failed to generate PDF - empty content returned".to_string(),
            });
        }

        Ok(bytes.to_vec())
    }
}
