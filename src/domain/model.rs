use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Field descriptor from the document store's schema metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocField {
    pub fieldname: String,
    pub label: Option<String>,
    pub fieldtype: String,
    pub description: Option<String>,
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocMeta {
    pub doctype: String,
    pub fields: Vec<DocField>,
    pub default_print_format: Option<String>,
}

/// A business document: identified by (doctype, name), fields read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub doctype: String,
    pub name: String,
    pub fields: HashMap<String, serde_json::Value>,
}

impl Document {
    pub fn field_str(&self, fieldname: &str) -> Option<&str> {
        self.fields.get(fieldname).and_then(|v| v.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneEntry {
    pub phone: String,
    #[serde(default)]
    pub is_whatsapp_enabled: bool,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_nos: Vec<PhoneEntry>,
}

/// Per-doctype message template configuration. At most one enabled template
/// per doctype is consulted (first match).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub name: String,
    pub reference_doctype: String,
    pub enabled: bool,
    pub response: String,
    pub response_html: Option<String>,
    #[serde(default)]
    pub use_html: bool,
    #[serde(default)]
    pub send_attachment: bool,
    pub print_format: Option<String>,
}

/// Entry returned by the Field Lister for template authoring UIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub fieldname: String,
    pub label: String,
    pub fieldtype: String,
    pub description: String,
}

/// One selectable recipient produced by the Contact Resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactEntry {
    pub contact_name: String,
    pub contact_display: String,
    pub phone: String,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedMessage {
    pub message: String,
    pub is_html: bool,
}

/// Result of a presigned-link preparation: full message body plus the raw URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresignedMessage {
    pub message: String,
    pub presigned_url: String,
    pub is_html: bool,
}

/// Timeline comment appended to a document after a successful send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineComment {
    pub reference_doctype: String,
    pub reference_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOutcome {
    pub success: bool,
    pub recipient: String,
    pub gateway_response: serde_json::Value,
}
