use crate::adapters::pdf::DEFAULT_PRINT_FORMAT;
use crate::domain::model::{DocMeta, MessageTemplate};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

/// Inline attachments travel as a data URL in the gateway's file endpoint.
pub fn build_data_url(pdf_bytes: &[u8]) -> String {
    format!("data:application/pdf;base64,{}", BASE64.encode(pdf_bytes))
}

pub fn attachment_filename(doctype: &str, docname: &str) -> String {
    format!("{}_{}.pdf", doctype.replace(' ', "_"), docname)
}

/// Message body for presigned-link delivery: caption, download link, expiry
/// notice. Sub-hour expiries round up so the notice never claims zero hours.
pub fn build_link_message(caption: &str, url: &str, expiry_seconds: u64) -> String {
    let hours = expiry_seconds.div_ceil(3600).max(1);
    let unit = if hours == 1 { "hour" } else { "hours" };
    format!(
        "{}\n\nDownload PDF: {}\nThis link will expire in {} {}.",
        caption, url, hours, unit
    )
}

/// Print format priority: template override, then the doctype's default, then
/// "Standard".
pub fn resolve_print_format(template: &MessageTemplate, meta: &DocMeta) -> String {
    template
        .print_format
        .clone()
        .or_else(|| meta.default_print_format.clone())
        .unwrap_or_else(|| DEFAULT_PRINT_FORMAT.to_string())
}
