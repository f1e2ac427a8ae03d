use crate::adapters::gateway::GatewayClient;
use crate::adapters::pdf::{PdfClient, DEFAULT_PRINT_FORMAT};
use crate::adapters::s3;
use crate::config::{AppConfig, AttachmentMode};
use crate::core::attachment::{
    attachment_filename, build_data_url, build_link_message, resolve_print_format,
};
use crate::core::contacts::{self, CustomerFieldResolver};
use crate::core::fields::list_template_fields;
use crate::core::phone::normalize_phone;
use crate::core::template::{self, find_template, render_template};
use crate::domain::model::{
    ContactEntry, Document, FieldInfo, MessageTemplate, PresignedMessage, RenderedMessage,
    SendOutcome, TimelineComment,
};
use crate::domain::ports::DocumentStore;
use crate::utils::error::Result;
use chrono::Utc;

/// The remote-callable surface: each public method maps to one endpoint the UI
/// layer invokes. One linear attempt per call; nothing is retried or queued.
pub struct WhatsappService<S: DocumentStore> {
    store: S,
    config: AppConfig,
    gateway: GatewayClient,
    pdf: PdfClient,
    resolver: CustomerFieldResolver,
}

impl<S: DocumentStore> WhatsappService<S> {
    pub fn new(store: S, config: AppConfig) -> Self {
        let gateway = GatewayClient::new(config.gateway_url());
        let pdf = PdfClient::new(
            config.service.site_url.clone(),
            config.service.auth_token.clone(),
        );

        Self {
            store,
            config,
            gateway,
            pdf,
            resolver: CustomerFieldResolver::default(),
        }
    }

    pub fn with_customer_resolver(mut self, resolver: CustomerFieldResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fields of a doctype usable in templates, ordered for display.
    pub async fn list_template_fields(&self, doctype: &str) -> Result<Vec<FieldInfo>> {
        let meta = self.store.get_meta(doctype).await?;
        Ok(list_template_fields(&meta))
    }

    /// WhatsApp-enabled recipients for the document's customer.
    pub async fn whatsapp_contacts(
        &self,
        doctype: &str,
        docname: &str,
    ) -> Result<Vec<ContactEntry>> {
        contacts::whatsapp_contacts(&self.store, &self.resolver, doctype, docname).await
    }

    /// Rendered message preview for the doctype's enabled template.
    pub async fn render_message(&self, doctype: &str, docname: &str) -> Result<RenderedMessage> {
        template::render_message(&self.store, doctype, docname).await
    }

    /// Render, generate the PDF, upload it, and return the message body with a
    /// presigned link. No gateway call; the UI sends separately.
    pub async fn prepare_presigned_message(
        &self,
        doctype: &str,
        docname: &str,
    ) -> Result<PresignedMessage> {
        let doc = self.store.get_doc(doctype, docname).await?;
        let template = find_template(&self.store, doctype).await?;
        let rendered = render_template(&template, &doc)?;

        let url = self.upload_pdf(&doc, &template).await?;
        let message = build_link_message(&rendered.message, &url, self.config.link_expiry_seconds());

        Ok(PresignedMessage {
            message,
            presigned_url: url,
            is_html: rendered.is_html,
        })
    }

    /// Send the templated message for a document to one phone number, then log
    /// a timeline comment on the document.
    pub async fn send_message(
        &self,
        doctype: &str,
        docname: &str,
        phone: &str,
        contact_name: Option<&str>,
    ) -> Result<SendOutcome> {
        let doc = self.store.get_doc(doctype, docname).await?;
        let template = find_template(&self.store, doctype).await?;
        let rendered = render_template(&template, &doc)?;

        let phone = normalize_phone(phone, self.config.whatsapp.default_country.as_deref())?;

        let gateway_response = if template.send_attachment {
            self.send_with_attachment(&doc, &template, &phone, &rendered.message)
                .await?
        } else {
            self.gateway.send_text(&phone, &rendered.message).await?
        };

        let recipient = contact_name.unwrap_or(&phone).to_string();
        self.store
            .add_comment(TimelineComment {
                reference_doctype: doctype.to_string(),
                reference_name: docname.to_string(),
                content: format!("WhatsApp message sent to {}", recipient),
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!("WhatsApp message sent to {} for {} {}", recipient, doctype, docname);

        Ok(SendOutcome {
            success: true,
            recipient: phone,
            gateway_response,
        })
    }

    async fn send_with_attachment(
        &self,
        doc: &Document,
        template: &MessageTemplate,
        phone: &str,
        caption: &str,
    ) -> Result<serde_json::Value> {
        match self.config.whatsapp.attachment_mode {
            AttachmentMode::Inline => {
                let pdf_bytes = self.fetch_pdf(doc, template).await?;
                let data_url = build_data_url(&pdf_bytes);
                let filename = attachment_filename(&doc.doctype, &doc.name);
                self.gateway
                    .send_file(phone, &data_url, &filename, caption)
                    .await
            }
            AttachmentMode::PresignedLink => {
                let url = self.upload_pdf(doc, template).await?;
                let message =
                    build_link_message(caption, &url, self.config.link_expiry_seconds());
                self.gateway.send_text(phone, &message).await
            }
        }
    }

    async fn fetch_pdf(&self, doc: &Document, template: &MessageTemplate) -> Result<Vec<u8>> {
        // Meta lookup is best-effort; a missing meta just means the standard
        // print format.
        let print_format = match self.store.get_meta(&doc.doctype).await {
            Ok(meta) => resolve_print_format(template, &meta),
            Err(_) => template
                .print_format
                .clone()
                .unwrap_or_else(|| DEFAULT_PRINT_FORMAT.to_string()),
        };

        self.pdf
            .fetch_pdf(&doc.doctype, &doc.name, &print_format)
            .await
    }

    async fn upload_pdf(&self, doc: &Document, template: &MessageTemplate) -> Result<String> {
        let s3_config = self.config.s3()?;
        let pdf_bytes = self.fetch_pdf(doc, template).await?;
        let key = s3::object_key(&doc.doctype, &doc.name, s3_config.folder.as_deref());

        s3::upload_pdf_and_presign(
            s3_config,
            &key,
            pdf_bytes,
            self.config.link_expiry_seconds(),
        )
        .await
    }
}
