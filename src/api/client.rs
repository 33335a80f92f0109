//! HTTP API Client
//!
//! Functions for communicating with the Painel REST API. Responses are
//! deserialized into typed DTOs once at this boundary so the rendering
//! code can assume presence; every endpoint is a single attempt with no
//! retry policy (recovery is the user's refresh action).

use std::collections::HashMap;

use chrono::NaiveDate;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;

use crate::format::parse_decimal_flexible;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "/api";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item("painel_api_url") {
                url
            } else {
                DEFAULT_API_BASE.to_string()
            }
        } else {
            DEFAULT_API_BASE.to_string()
        }
    } else {
        DEFAULT_API_BASE.to_string()
    };
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Failure taxonomy for API calls.
///
/// `Network` is a rejected request, `Http` a non-2xx status, `Payload`
/// a malformed body or an envelope whose status marker is not "success".
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("falha de rede: {0}")]
    Network(String),
    #[error("erro HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("resposta inválida: {0}")]
    Payload(String),
}

// ============ Response Types ============

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ExecutiveData {
    #[serde(default)]
    pub status: String,
    pub kpis: Kpis,
    #[serde(default)]
    pub distributions: Distributions,
    #[serde(default)]
    pub satisfaction: Satisfaction,
    #[serde(default)]
    pub critical_analysis: CriticalAnalysis,
    #[serde(default)]
    pub latest_update: Option<String>,
}

/// A pre-formatted KPI entry: the backend ships display text plus the
/// raw number and an optional semantic color.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct KpiEntry {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub raw: Option<f64>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub color_class: Option<String>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Kpis {
    #[serde(default)]
    pub total_clientes: Option<KpiEntry>,
    #[serde(default)]
    pub taxa_retencao: Option<KpiEntry>,
    #[serde(default)]
    pub taxa_criticos: Option<KpiEntry>,
    #[serde(default)]
    pub receita_total: Option<KpiEntry>,
}

/// Category label -> count breakdowns for the distribution donuts.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Distributions {
    #[serde(default)]
    pub nivel: HashMap<String, u64>,
    #[serde(default)]
    pub churn: HashMap<String, u64>,
    #[serde(default)]
    pub risco: HashMap<String, u64>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Satisfaction {
    #[serde(default)]
    pub nps: Option<SatisfactionMetric>,
    #[serde(default)]
    pub atendimento: Option<SatisfactionMetric>,
    #[serde(default)]
    pub produto: Option<SatisfactionMetric>,
    #[serde(default)]
    pub prazo: Option<SatisfactionMetric>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct SatisfactionMetric {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub trend: Option<String>,
    #[serde(default)]
    pub color_class: Option<String>,
    #[serde(default)]
    pub details: Option<NpsDetails>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct NpsDetails {
    #[serde(default)]
    pub promotores: u64,
    #[serde(default)]
    pub neutros: u64,
    #[serde(default)]
    pub detratores: u64,
    #[serde(default)]
    pub total_validas: u64,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct CriticalAnalysis {
    #[serde(default)]
    pub premium_em_risco: u64,
    #[serde(default)]
    pub total_premium: u64,
    #[serde(default)]
    pub receita_em_risco: f64,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct RecurrenceData {
    #[serde(default)]
    pub metrics: RecurrenceMetrics,
    #[serde(default, alias = "charts_data")]
    pub charts: RecurrenceCharts,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct RecurrenceMetrics {
    #[serde(default)]
    pub pedidos_primeira: u64,
    #[serde(default)]
    pub pedidos_recompra: u64,
    #[serde(default)]
    pub taxa_conversao: f64,
    #[serde(default)]
    pub ticket_primeira: f64,
    #[serde(default)]
    pub ticket_recompra: f64,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct RecurrenceCharts {
    #[serde(default)]
    pub pie_recurrence: Option<ChartSeries>,
    #[serde(default)]
    pub bar_tickets: Option<ChartSeries>,
}

/// A labeled series as shipped by the backend chart payloads.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ChartSeries {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub values: Vec<f64>,
}

#[derive(Debug, serde::Deserialize)]
struct ClientsResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    clients: Vec<ClientRecord>,
}

/// One row of the client base snapshot. Wire names are the backend's
/// Portuguese sheet columns; everything is optional and rendered with
/// "N/A" fallbacks. Comparable so memoized views over the snapshot can
/// diff cheaply.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
pub struct ClientRecord {
    #[serde(default, rename = "nome")]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "whatsapp")]
    pub phone: Option<String>,
    #[serde(default, rename = "cnpj")]
    pub tax_id: Option<String>,
    #[serde(default, rename = "cidade")]
    pub city: Option<String>,
    #[serde(default, rename = "estado")]
    pub state: Option<String>,
    #[serde(default, rename = "codigo_vendedor")]
    pub seller_code: Option<String>,
    #[serde(default, rename = "nivel_cliente")]
    pub level: Option<String>,
    #[serde(default, rename = "risco_recencia")]
    pub risk_tier: Option<String>,
    #[serde(default, rename = "status_churn")]
    pub churn_status: Option<String>,
    #[serde(default, rename = "score_final")]
    pub final_score: Option<f64>,
    #[serde(default)]
    pub priority_score: Option<f64>,
    #[serde(default, rename = "frequencia")]
    pub frequency: Option<f64>,
    #[serde(default, rename = "intervalo_medio_dias")]
    pub avg_interval_days: Option<f64>,
    #[serde(default, rename = "receita")]
    pub revenue: Option<String>,
    #[serde(default, rename = "dias_ultima_compra")]
    pub days_since_last_purchase: Option<f64>,
}

impl ClientRecord {
    /// Revenue as a number; comma decimals are normalized, unparseable
    /// values count as zero (the backend's own coercion).
    pub fn revenue_value(&self) -> f64 {
        self.revenue
            .as_deref()
            .and_then(parse_decimal_flexible)
            .unwrap_or(0.0)
    }
}

// ============ API Functions ============

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::Http {
            status: response.status(),
            message: response.status_text(),
        });
    }

    response
        .json()
        .await
        .map_err(|e| ApiError::Payload(e.to_string()))
}

fn check_envelope(status: &str) -> Result<(), ApiError> {
    if status == "success" {
        Ok(())
    } else {
        Err(ApiError::Payload(format!(
            "status \"{}\" em vez de \"success\"",
            status
        )))
    }
}

/// Fetch the executive dashboard payload.
pub async fn fetch_executive_data() -> Result<ExecutiveData, ApiError> {
    let data: ExecutiveData = get_json(&format!("{}/executive-data", get_api_base())).await?;
    check_envelope(&data.status)?;
    Ok(data)
}

/// Fetch recurrence metrics for a date window (ISO `YYYY-MM-DD` bounds).
pub async fn fetch_recurrence_data(
    start: NaiveDate,
    end: NaiveDate,
) -> Result<RecurrenceData, ApiError> {
    let url = format!(
        "{}/recurrence-data?data_inicio={}&data_fim={}",
        get_api_base(),
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d"),
    );
    get_json(&url).await
}

/// Fetch the full client base snapshot.
pub async fn fetch_clients() -> Result<Vec<ClientRecord>, ApiError> {
    let data: ClientsResponse = get_json(&format!("{}/clients-data", get_api_base())).await?;
    check_envelope(&data.status)?;
    Ok(data.clients)
}

/// Ask the backend to drop its data cache before the next load.
pub async fn refresh_server_cache() -> Result<(), ApiError> {
    let _: serde_json::Value = get_json(&format!("{}/refresh-data", get_api_base())).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revenue_value_lenient() {
        let record = ClientRecord {
            revenue: Some("1.234,56".to_string()),
            ..Default::default()
        };
        assert_eq!(record.revenue_value(), 1234.56);

        let broken = ClientRecord {
            revenue: Some("sem receita".to_string()),
            ..Default::default()
        };
        assert_eq!(broken.revenue_value(), 0.0);

        assert_eq!(ClientRecord::default().revenue_value(), 0.0);
    }

    #[test]
    fn test_client_record_wire_names() {
        let record: ClientRecord = serde_json::from_str(
            r#"{
                "nome": "Papelaria Central",
                "email": "contato@central.com.br",
                "nivel_cliente": "Gold",
                "status_churn": "Ativo",
                "receita": "987,50",
                "priority_score": 185.0
            }"#,
        )
        .unwrap();

        assert_eq!(record.name.as_deref(), Some("Papelaria Central"));
        assert_eq!(record.level.as_deref(), Some("Gold"));
        assert_eq!(record.revenue_value(), 987.5);
        assert!(record.phone.is_none());
    }

    #[test]
    fn test_client_snapshot_is_comparable() {
        let record = ClientRecord {
            name: Some("Papelaria Central".to_string()),
            revenue: Some("1.234,56".to_string()),
            ..Default::default()
        };

        let snapshot = std::rc::Rc::new(vec![record.clone()]);
        assert_eq!(snapshot, std::rc::Rc::new(vec![record.clone()]));

        let changed = ClientRecord {
            revenue: Some("99,00".to_string()),
            ..record
        };
        assert_ne!(snapshot, std::rc::Rc::new(vec![changed]));
    }

    #[test]
    fn test_recurrence_charts_data_alias() {
        let data: RecurrenceData = serde_json::from_str(
            r#"{
                "metrics": {"pedidos_primeira": 10, "pedidos_recompra": 4},
                "charts_data": {
                    "pie_recurrence": {"labels": ["Primeira Compra", "Recompra"], "values": [10, 4]}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(data.metrics.pedidos_primeira, 10);
        let pie = data.charts.pie_recurrence.unwrap();
        assert_eq!(pie.labels.len(), pie.values.len());
    }
}
