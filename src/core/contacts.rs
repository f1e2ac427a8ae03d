use crate::domain::model::{Contact, ContactEntry, Document};
use crate::domain::ports::DocumentStore;
use crate::utils::error::{Result, WhatsappError};

/// Declared customer-field resolution: the document's customer is read from the
/// first candidate field that carries a value, in order. No attribute probing.
#[derive(Debug, Clone)]
pub struct CustomerFieldResolver {
    candidates: Vec<String>,
}

impl Default for CustomerFieldResolver {
    fn default() -> Self {
        Self {
            candidates: vec!["customer".to_string(), "party_name".to_string()],
        }
    }
}

impl CustomerFieldResolver {
    pub fn new(candidates: Vec<String>) -> Self {
        Self { candidates }
    }

    pub fn resolve(&self, doc: &Document) -> Result<String> {
        for candidate in &self.candidates {
            if let Some(value) = doc.field_str(candidate) {
                if !value.is_empty() {
                    return Ok(value.to_string());
                }
            }
        }

        Err(WhatsappError::ConfigError {
            message: "No customer field found in this document".to_string(),
        })
    }
}

fn display_name(contact: &Contact) -> String {
    let mut display = match contact.first_name.as_deref() {
        Some(first) if !first.is_empty() => first.to_string(),
        _ => return contact.name.clone(),
    };

    if let Some(last) = contact.last_name.as_deref() {
        if !last.is_empty() {
            display.push(' ');
            display.push_str(last);
        }
    }

    display
}

/// WhatsApp-enabled recipients for a document's customer. Per-contact fetch
/// failures are logged and skipped; an empty result is not an error.
pub async fn whatsapp_contacts<S: DocumentStore>(
    store: &S,
    resolver: &CustomerFieldResolver,
    doctype: &str,
    docname: &str,
) -> Result<Vec<ContactEntry>> {
    let doc = store.get_doc(doctype, docname).await?;
    let customer = resolver.resolve(&doc)?;

    let contact_names = store.linked_contacts(&customer).await?;
    let mut entries = Vec::new();

    for contact_name in contact_names {
        let contact = match store.get_contact(&contact_name).await {
            Ok(contact) => contact,
            Err(e) => {
                tracing::warn!("Error fetching contact {}: {}", contact_name, e);
                continue;
            }
        };

        for phone in &contact.phone_nos {
            if phone.is_whatsapp_enabled && !phone.phone.is_empty() {
                entries.push(ContactEntry {
                    contact_name: contact.name.clone(),
                    contact_display: display_name(&contact),
                    phone: phone.phone.clone(),
                    is_primary: phone.is_primary,
                });
            }
        }
    }

    if entries.is_empty() {
        tracing::warn!(
            "No WhatsApp-enabled phone numbers found for customer {}",
            customer
        );
    }

    Ok(entries)
}
