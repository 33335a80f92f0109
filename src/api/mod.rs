//! HTTP API Client
//!
//! Typed access to the Painel REST API.

pub mod client;

pub use client::{
    fetch_clients, fetch_executive_data, fetch_recurrence_data, refresh_server_cache, ClientRecord,
    CriticalAnalysis, Distributions, ExecutiveData, KpiEntry, Kpis, RecurrenceMetrics, Satisfaction,
};
