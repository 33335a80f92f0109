//! CSV Export
//!
//! Serializes the currently filtered client collection to a
//! semicolon-separated file (every field quoted, embedded quotes
//! doubled, UTF-8 BOM) and triggers a browser download. The separator
//! and BOM follow the regional spreadsheet convention.

use wasm_bindgen::JsCast;

use crate::api::ClientRecord;
use crate::format::or_na;

/// Fixed download name, no timestamp.
pub const EXPORT_FILENAME: &str = "clientes_filtrados.csv";

/// Byte-order mark so regional spreadsheet tools detect UTF-8.
const BOM: &str = "\u{feff}";

const SEPARATOR: char = ';';

const HEADERS: [&str; 16] = [
    "Nome",
    "Email",
    "WhatsApp",
    "CNPJ",
    "Cidade",
    "Estado",
    "Vendedor",
    "Nível",
    "Risco",
    "Status",
    "Score Final",
    "Prioridade",
    "Frequência",
    "Intervalo Médio (dias)",
    "Receita",
    "Dias Última Compra",
];

/// Quote one field, doubling embedded quotes: `O'Brien "Paper" Co.` ->
/// `"O'Brien ""Paper"" Co."`.
pub fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn csv_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(&SEPARATOR.to_string())
}

fn number_field(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            if v.fract() == 0.0 {
                format!("{:.0}", v)
            } else {
                // Comma decimal for the regional spreadsheet convention
                format!("{:.2}", v).replace('.', ",")
            }
        }
        _ => "N/A".to_string(),
    }
}

fn record_row(record: &ClientRecord) -> String {
    let fields = vec![
        or_na(record.name.as_deref()),
        or_na(record.email.as_deref()),
        or_na(record.phone.as_deref()),
        or_na(record.tax_id.as_deref()),
        or_na(record.city.as_deref()),
        or_na(record.state.as_deref()),
        or_na(record.seller_code.as_deref()),
        or_na(record.level.as_deref()),
        or_na(record.risk_tier.as_deref()),
        or_na(record.churn_status.as_deref()),
        number_field(record.final_score),
        number_field(record.priority_score),
        number_field(record.frequency),
        number_field(record.avg_interval_days),
        or_na(record.revenue.as_deref()),
        number_field(record.days_since_last_purchase),
    ];
    csv_row(&fields)
}

/// Build the full CSV document for a filtered collection (all pages,
/// not just the visible one).
pub fn clients_csv(records: &[ClientRecord]) -> String {
    let mut out = String::from(BOM);
    out.push_str(&csv_row(
        &HEADERS.iter().map(|h| h.to_string()).collect::<Vec<_>>(),
    ));
    out.push_str("\r\n");

    for record in records {
        out.push_str(&record_row(record));
        out.push_str("\r\n");
    }

    out
}

/// Trigger a client-side download of the CSV content.
pub fn download_csv(content: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("window unavailable")?;
    let document = window.document().ok_or("document unavailable")?;

    let parts = js_sys::Array::of1(&content.into());
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/csv;charset=utf-8");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|_| "blob creation failed")?;

    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|_| "object URL failed")?;

    let anchor = document
        .create_element("a")
        .map_err(|_| "anchor creation failed")?;
    let _ = anchor.set_attribute("href", &url);
    let _ = anchor.set_attribute("download", EXPORT_FILENAME);
    anchor
        .dyn_ref::<web_sys::HtmlElement>()
        .ok_or("anchor cast failed")?
        .click();
    let _ = web_sys::Url::revoke_object_url(&url);

    Ok(())
}
