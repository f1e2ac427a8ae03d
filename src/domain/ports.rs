use crate::domain::model::{Contact, DocMeta, Document, MessageTemplate, TimelineComment};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Port onto the host document/metadata store. The store itself is an external
/// collaborator; this crate only reads documents and appends timeline comments.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_meta(&self, doctype: &str) -> Result<DocMeta>;

    async fn get_doc(&self, doctype: &str, name: &str) -> Result<Document>;

    /// Contact ids linked to the given customer via the store's generic link table.
    async fn linked_contacts(&self, customer: &str) -> Result<Vec<String>>;

    async fn get_contact(&self, name: &str) -> Result<Contact>;

    /// First enabled message template configured for the doctype, if any.
    async fn find_template(&self, doctype: &str) -> Result<Option<MessageTemplate>>;

    async fn add_comment(&self, comment: TimelineComment) -> Result<()>;
}
