use anyhow::Result;
use httpmock::prelude::*;
use serde_json::json;
use whatsapp_dispatch::domain::model::MessageTemplate;
use whatsapp_dispatch::{AppConfig, MemoryStore, WhatsappService};

/// Config with presigned-link delivery, pointing both the site and the
/// S3-compatible endpoint at the mock server.
fn presigned_config(server_url: &str) -> AppConfig {
    let toml = format!(
        r#"
[service]
site_url = "{url}"

[gateway]
url = "{url}"

[whatsapp]
attachment_mode = "presigned_link"

[s3]
access_key_id = "AKIATEST"
secret_access_key = "testsecret"
bucket = "invoices-bucket"
region = "ap-southeast-2"
folder = "whatsapp"
endpoint_url = "{url}"
"#,
        url = server_url,
    );
    AppConfig::from_toml_str(&toml).unwrap()
}

fn store_with_invoice_and_template() -> MemoryStore {
    let store = MemoryStore::new();
    store.insert_doc(
        "Sales Invoice",
        "SINV-0001",
        json!({"customer": "ACME Corp"}),
    );
    store.insert_template(MessageTemplate {
        name: "WT-1".to_string(),
        reference_doctype: "Sales Invoice".to_string(),
        enabled: true,
        response: "Invoice {{doc.name}} is ready".to_string(),
        response_html: None,
        use_html: false,
        send_attachment: true,
        print_format: None,
    });
    store
}

#[tokio::test]
async fn test_presigned_dispatch_uploads_and_sends_link() -> Result<()> {
    let server = MockServer::start();

    let pdf_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/method/frappe.utils.print_format.download_pdf");
        then.status(200).body("%PDF-1.4 fake invoice");
    });

    // path-style put: /{bucket}/{folder}/{key}
    let upload_mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/invoices-bucket/whatsapp/Sales_Invoice_SINV-0001.pdf")
            .header("content-type", "application/pdf");
        then.status(200);
    });

    let send_text_mock = server.mock(|when, then| {
        when.method(POST).path("/sendText");
        then.status(200).json_body(json!({"status": "ok"}));
    });

    let store = store_with_invoice_and_template();
    let service = WhatsappService::new(store, presigned_config(&server.base_url()));

    let outcome = service
        .send_message("Sales Invoice", "SINV-0001", "9876543210", Some("Asha"))
        .await?;

    pdf_mock.assert();
    upload_mock.assert();
    send_text_mock.assert();
    assert!(outcome.success);
    assert_eq!(service.store().comments().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_prepare_presigned_message_builds_link_body() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET)
            .path("/api/method/frappe.utils.print_format.download_pdf");
        then.status(200).body("%PDF-1.4 fake invoice");
    });

    server.mock(|when, then| {
        when.method(PUT)
            .path("/invoices-bucket/whatsapp/Sales_Invoice_SINV-0001.pdf");
        then.status(200);
    });

    let store = store_with_invoice_and_template();
    let service = WhatsappService::new(store, presigned_config(&server.base_url()));

    let prepared = service
        .prepare_presigned_message("Sales Invoice", "SINV-0001")
        .await?;

    assert!(prepared.message.starts_with("Invoice SINV-0001 is ready\n\n"));
    assert!(prepared.message.contains("Download PDF: "));
    assert!(prepared.message.contains("This link will expire in 12 hours."));
    assert!(prepared
        .presigned_url
        .contains("Sales_Invoice_SINV-0001.pdf"));
    assert!(!prepared.is_html);

    // 沒有呼叫 gateway，只準備訊息
    assert!(service.store().comments().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_empty_s3_credentials_fail_before_any_remote_call() {
    let server = MockServer::start();

    let pdf_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/method/frappe.utils.print_format.download_pdf");
        then.status(200).body("%PDF-1.4 fake invoice");
    });

    let toml = format!(
        r#"
[service]
site_url = "{url}"

[gateway]
url = "{url}"

[whatsapp]
attachment_mode = "presigned_link"

[s3]
access_key_id = ""
secret_access_key = ""
bucket = "invoices-bucket"
region = "ap-southeast-2"
"#,
        url = server.base_url(),
    );
    let config = AppConfig::from_toml_str(&toml).unwrap();

    let store = store_with_invoice_and_template();
    let service = WhatsappService::new(store, config);

    let err = service
        .send_message("Sales Invoice", "SINV-0001", "9876543210", None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        whatsapp_dispatch::WhatsappError::InvalidConfigValueError { .. }
    ));
    // 憑證檢查要在任何遠端呼叫之前
    assert_eq!(pdf_mock.hits(), 0);
    assert!(service.store().comments().is_empty());
}

#[tokio::test]
async fn test_upload_failure_is_upload_error() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET)
            .path("/api/method/frappe.utils.print_format.download_pdf");
        then.status(200).body("%PDF-1.4 fake invoice");
    });

    server.mock(|when, then| {
        when.method(PUT)
            .path("/invoices-bucket/whatsapp/Sales_Invoice_SINV-0001.pdf");
        then.status(403).body("access denied");
    });

    let store = store_with_invoice_and_template();
    let service = WhatsappService::new(store, presigned_config(&server.base_url()));

    let err = service
        .prepare_presigned_message("Sales Invoice", "SINV-0001")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        whatsapp_dispatch::WhatsappError::UploadError { .. }
    ));
}
