use crate::domain::model::{Contact, DocMeta, Document, MessageTemplate, TimelineComment};
use crate::domain::ports::DocumentStore;
use crate::utils::error::{Result, WhatsappError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory document store. Stands in for the host framework's ORM in tests
/// and local experiments; the real store lives outside this crate.
#[derive(Debug, Default)]
pub struct MemoryStore {
    metas: Mutex<HashMap<String, DocMeta>>,
    docs: Mutex<HashMap<(String, String), Document>>,
    contacts: Mutex<HashMap<String, Contact>>,
    links: Mutex<HashMap<String, Vec<String>>>,
    templates: Mutex<Vec<MessageTemplate>>,
    comments: Mutex<Vec<TimelineComment>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_meta(&self, meta: DocMeta) {
        self.metas
            .lock()
            .unwrap()
            .insert(meta.doctype.clone(), meta);
    }

    /// Insert a document from a JSON object of field values.
    pub fn insert_doc(&self, doctype: &str, name: &str, fields: serde_json::Value) {
        let fields = fields
            .as_object()
            .map(|obj| obj.clone().into_iter().collect())
            .unwrap_or_default();

        self.docs.lock().unwrap().insert(
            (doctype.to_string(), name.to_string()),
            Document {
                doctype: doctype.to_string(),
                name: name.to_string(),
                fields,
            },
        );
    }

    /// Insert a contact and link it to a customer.
    pub fn insert_contact(&self, contact: Contact, customer: &str) {
        self.links
            .lock()
            .unwrap()
            .entry(customer.to_string())
            .or_default()
            .push(contact.name.clone());
        self.contacts
            .lock()
            .unwrap()
            .insert(contact.name.clone(), contact);
    }

    /// Link a contact id without storing the record, so fetching it fails.
    pub fn insert_dangling_link(&self, customer: &str, contact_name: &str) {
        self.links
            .lock()
            .unwrap()
            .entry(customer.to_string())
            .or_default()
            .push(contact_name.to_string());
    }

    pub fn insert_template(&self, template: MessageTemplate) {
        self.templates.lock().unwrap().push(template);
    }

    pub fn comments(&self) -> Vec<TimelineComment> {
        self.comments.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_meta(&self, doctype: &str) -> Result<DocMeta> {
        self.metas
            .lock()
            .unwrap()
            .get(doctype)
            .cloned()
            .ok_or_else(|| WhatsappError::NotFoundError {
                message: format!("DocType {} not found", doctype),
            })
    }

    async fn get_doc(&self, doctype: &str, name: &str) -> Result<Document> {
        self.docs
            .lock()
            .unwrap()
            .get(&(doctype.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| WhatsappError::NotFoundError {
                message: format!("{} {} not found", doctype, name),
            })
    }

    async fn linked_contacts(&self, customer: &str) -> Result<Vec<String>> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .get(customer)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_contact(&self, name: &str) -> Result<Contact> {
        self.contacts
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| WhatsappError::NotFoundError {
                message: format!("Contact {} not found", name),
            })
    }

    async fn find_template(&self, doctype: &str) -> Result<Option<MessageTemplate>> {
        Ok(self
            .templates
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.reference_doctype == doctype && t.enabled)
            .cloned())
    }

    async fn add_comment(&self, comment: TimelineComment) -> Result<()> {
        self.comments.lock().unwrap().push(comment);
        Ok(())
    }
}
