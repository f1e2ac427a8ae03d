use crate::domain::model::{DocField, DocMeta, FieldInfo};

/// Structural field kinds that make no sense inside a message template.
const EXCLUDED_FIELDTYPES: &[&str] = &[
    "Table",
    "Table MultiSelect",
    "HTML",
    "HTML Editor",
    "Button",
    "Section Break",
    "Column Break",
    "Tab Break",
    "Heading",
    "Code",
    "Password",
    "Attach",
    "Attach Image",
    "Signature",
    "Geolocation",
    "Duration",
    "Rating",
    "Color",
    "Icon",
    "Barcode",
    "Image",
];

/// System bookkeeping fields the store maintains on every record.
const EXCLUDED_FIELDNAMES: &[&str] = &[
    "modified",
    "modified_by",
    "creation",
    "owner",
    "docstatus",
    "idx",
    "parent",
    "parenttype",
    "parentfield",
    "_user_tags",
    "_comments",
    "_assign",
    "_liked_by",
    "workflow_state",
    "amended_from",
    "print_language",
];

const AMOUNT_KEYWORDS: &[&str] = &["total", "amount", "price", "grand", "net", "tax", "discount"];
const IDENTIFIER_KEYWORDS: &[&str] = &["customer", "party", "name", "title", "subject"];

const NUMERIC_FIELDTYPES: &[&str] = &["Currency", "Float", "Int", "Percent"];
const DATE_FIELDTYPES: &[&str] = &["Date", "Datetime", "Time"];
const TEXT_FIELDTYPES: &[&str] = &["Text", "Small Text", "Long Text", "Text Editor"];

/// Fields of a doctype usable in templates, categorized and ordered for display:
/// identifiers first, then amounts, dates, other structured fields, and
/// free-text fields last. A synthetic "Document ID" entry leads the list.
pub fn list_template_fields(meta: &DocMeta) -> Vec<FieldInfo> {
    let mut important_fields = Vec::new();
    let mut amount_fields = Vec::new();
    let mut date_fields = Vec::new();
    let mut text_fields = Vec::new();
    let mut other_fields = Vec::new();

    for field in &meta.fields {
        if EXCLUDED_FIELDTYPES.contains(&field.fieldtype.as_str())
            || EXCLUDED_FIELDNAMES.contains(&field.fieldname.as_str())
            || field.hidden
            || field.fieldname.starts_with('_')
        {
            continue;
        }

        let info = to_field_info(field);
        let lower_name = field.fieldname.to_lowercase();

        if NUMERIC_FIELDTYPES.contains(&field.fieldtype.as_str()) {
            if AMOUNT_KEYWORDS.iter().any(|kw| lower_name.contains(kw)) {
                amount_fields.push(info);
            } else {
                other_fields.push(info);
            }
        } else if DATE_FIELDTYPES.contains(&field.fieldtype.as_str()) {
            date_fields.push(info);
        } else if IDENTIFIER_KEYWORDS.iter().any(|kw| lower_name.contains(kw)) {
            important_fields.push(info);
        } else if TEXT_FIELDTYPES.contains(&field.fieldtype.as_str()) {
            text_fields.push(info);
        } else {
            other_fields.push(info);
        }
    }

    important_fields.insert(
        0,
        FieldInfo {
            fieldname: "name".to_string(),
            label: "Document ID".to_string(),
            fieldtype: "Data".to_string(),
            description: "Unique document identifier".to_string(),
        },
    );

    important_fields
        .into_iter()
        .chain(amount_fields)
        .chain(date_fields)
        .chain(other_fields)
        .chain(text_fields)
        .collect()
}

fn to_field_info(field: &DocField) -> FieldInfo {
    let label = match &field.label {
        Some(label) if !label.is_empty() => label.clone(),
        _ => title_case(&field.fieldname),
    };

    FieldInfo {
        fieldname: field.fieldname.clone(),
        label,
        fieldtype: field.fieldtype.clone(),
        description: field.description.clone().unwrap_or_default(),
    }
}

/// "grand_total" -> "Grand Total"
fn title_case(fieldname: &str) -> String {
    fieldname
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(fieldname: &str, fieldtype: &str) -> DocField {
        DocField {
            fieldname: fieldname.to_string(),
            label: None,
            fieldtype: fieldtype.to_string(),
            description: None,
            hidden: false,
        }
    }

    fn meta(fields: Vec<DocField>) -> DocMeta {
        DocMeta {
            doctype: "Sales Invoice".to_string(),
            fields,
            default_print_format: None,
        }
    }

    #[test]
    fn test_category_ordering() {
        let meta = meta(vec![
            field("description", "Text"),
            field("posting_date", "Date"),
            field("grand_total", "Currency"),
            field("customer", "Link"),
        ]);

        let names: Vec<String> = list_template_fields(&meta)
            .into_iter()
            .map(|f| f.fieldname)
            .collect();

        assert_eq!(
            names,
            vec!["name", "customer", "grand_total", "posting_date", "description"]
        );
    }

    #[test]
    fn test_document_id_leads() {
        let result = list_template_fields(&meta(vec![]));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].fieldname, "name");
        assert_eq!(result[0].label, "Document ID");
    }

    #[test]
    fn test_excludes_structural_and_system_fields() {
        let mut hidden = field("internal_note", "Data");
        hidden.hidden = true;

        let meta = meta(vec![
            field("items", "Table"),
            field("modified_by", "Link"),
            field("_private", "Data"),
            hidden,
            field("status", "Select"),
        ]);

        let names: Vec<String> = list_template_fields(&meta)
            .into_iter()
            .map(|f| f.fieldname)
            .collect();

        assert_eq!(names, vec!["name", "status"]);
    }

    #[test]
    fn test_numeric_without_amount_keyword_is_other() {
        let meta = meta(vec![
            field("conversion_rate", "Float"),
            field("net_total", "Currency"),
        ]);

        let names: Vec<String> = list_template_fields(&meta)
            .into_iter()
            .map(|f| f.fieldname)
            .collect();

        // net_total matches the amount keyword list, conversion_rate does not
        assert_eq!(names, vec!["name", "net_total", "conversion_rate"]);
    }

    #[test]
    fn test_label_fallback_title_case() {
        let meta = meta(vec![field("grand_total", "Currency")]);
        let result = list_template_fields(&meta);
        assert_eq!(result[1].label, "Grand Total");
    }
}
