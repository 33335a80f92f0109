//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod nav;
pub mod chart;
pub mod metric_card;
pub mod client_card;
pub mod loading;
pub mod toast;

pub use nav::Nav;
pub use chart::{BarChart, DonutChart};
pub use metric_card::MetricCard;
pub use client_card::ClientCard;
pub use loading::Loading;
pub use toast::Toast;
