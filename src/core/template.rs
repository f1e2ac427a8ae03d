use crate::domain::model::{Document, MessageTemplate, RenderedMessage};
use crate::domain::ports::DocumentStore;
use crate::utils::error::{Result, WhatsappError};
use handlebars::Handlebars;
use serde_json::json;

/// First enabled template for the doctype, or NotFound.
pub async fn find_template<S: DocumentStore>(
    store: &S,
    doctype: &str,
) -> Result<MessageTemplate> {
    store
        .find_template(doctype)
        .await?
        .ok_or_else(|| WhatsappError::NotFoundError {
            message: format!("No WhatsApp template found for {}", doctype),
        })
}

/// Render the template body against the document's fields. The body is chosen
/// by the template's HTML flag; fields are exposed under `doc` so bodies read
/// `{{doc.customer}}`. Strict mode, so a missing field is a render error.
pub fn render_template(template: &MessageTemplate, doc: &Document) -> Result<RenderedMessage> {
    let body = if template.use_html {
        template.response_html.as_deref().unwrap_or_default()
    } else {
        template.response.as_str()
    };

    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);

    let mut fields = doc.fields.clone();
    fields.insert("name".to_string(), json!(doc.name));

    let message = handlebars
        .render_template(body, &json!({ "doc": fields }))
        .map_err(|e| {
            tracing::error!("Template rendering failed: {}", e);
            WhatsappError::RenderError {
                message: e.to_string(),
            }
        })?;

    Ok(RenderedMessage {
        message,
        is_html: template.use_html,
    })
}

/// Lookup plus render in one step, as the UI-facing endpoint does.
pub async fn render_message<S: DocumentStore>(
    store: &S,
    doctype: &str,
    docname: &str,
) -> Result<RenderedMessage> {
    let doc = store.get_doc(doctype, docname).await?;
    let template = find_template(store, doctype).await?;
    render_template(&template, &doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use serde_json::json;
    use std::collections::HashMap;

    fn invoice_doc() -> Document {
        let mut fields = HashMap::new();
        fields.insert("customer".to_string(), json!("ACME Corp"));
        fields.insert("grand_total".to_string(), json!(1500));
        Document {
            doctype: "Sales Invoice".to_string(),
            name: "SINV-0001".to_string(),
            fields,
        }
    }

    fn template(body: &str) -> MessageTemplate {
        MessageTemplate {
            name: "WT-1".to_string(),
            reference_doctype: "Sales Invoice".to_string(),
            enabled: true,
            response: body.to_string(),
            response_html: None,
            use_html: false,
            send_attachment: false,
            print_format: None,
        }
    }

    #[test]
    fn test_render_fills_fields() {
        let rendered = render_template(
            &template("Invoice {{doc.name}} for {{doc.customer}}: {{doc.grand_total}}"),
            &invoice_doc(),
        )
        .unwrap();

        assert_eq!(rendered.message, "Invoice SINV-0001 for ACME Corp: 1500");
        assert!(!rendered.is_html);
    }

    #[test]
    fn test_render_is_idempotent() {
        let tpl = template("Hi {{doc.customer}}");
        let doc = invoice_doc();

        let first = render_template(&tpl, &doc).unwrap();
        let second = render_template(&tpl, &doc).unwrap();
        assert_eq!(first.message, second.message);
    }

    #[test]
    fn test_missing_field_is_render_error() {
        let err = render_template(&template("{{doc.no_such_field}}"), &invoice_doc()).unwrap_err();
        assert!(matches!(err, WhatsappError::RenderError { .. }));
    }

    #[test]
    fn test_bad_syntax_is_render_error() {
        let err = render_template(&template("{{doc.customer"), &invoice_doc()).unwrap_err();
        assert!(matches!(err, WhatsappError::RenderError { .. }));
    }

    #[test]
    fn test_html_flag_selects_html_body() {
        let mut tpl = template("plain body");
        tpl.use_html = true;
        tpl.response_html = Some("<b>{{doc.customer}}</b>".to_string());

        let rendered = render_template(&tpl, &invoice_doc()).unwrap();
        assert_eq!(rendered.message, "<b>ACME Corp</b>");
        assert!(rendered.is_html);
    }

    #[tokio::test]
    async fn test_missing_template_is_not_found() {
        let store = MemoryStore::new();
        store.insert_doc("Sales Invoice", "SINV-0001", json!({"customer": "ACME"}));

        let err = render_message(&store, "Sales Invoice", "SINV-0001")
            .await
            .unwrap_err();
        assert!(matches!(err, WhatsappError::NotFoundError { .. }));
    }
}
