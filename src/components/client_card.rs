//! Client Card Component
//!
//! One card per client record on the clients page. Absent fields render
//! "N/A"; currency and day counts use the shared pt-BR formatter.

use leptos::*;

use crate::api::ClientRecord;
use crate::format::{format_currency, format_days, or_na};

/// Single client card
#[component]
pub fn ClientCard(record: ClientRecord) -> impl IntoView {
    let level = or_na(record.level.as_deref());
    let level_color = match level.as_str() {
        "Premium" => "bg-purple-500",
        "Gold" => "bg-yellow-500",
        "Silver" => "bg-gray-500",
        "Bronze" => "bg-red-500",
        _ => "bg-gray-600",
    };

    let status = or_na(record.churn_status.as_deref());
    let status_color = if status == "Ativo" {
        "text-green-400"
    } else if status == "Inativo" {
        "text-red-400"
    } else if status.contains("Dormant") {
        "text-yellow-400"
    } else {
        "text-gray-400"
    };

    let location = match (record.city.as_deref(), record.state.as_deref()) {
        (Some(city), Some(uf)) if !city.trim().is_empty() && !uf.trim().is_empty() => {
            format!("{} - {}", city.trim(), uf.trim())
        }
        _ => "N/A".to_string(),
    };

    view! {
        <div class="bg-gray-800 rounded-xl p-4 border border-gray-700 hover:border-gray-600 transition-colors">
            <div class="flex items-start justify-between">
                <div>
                    <div class="flex items-center space-x-2">
                        <h3 class="font-semibold">{or_na(record.name.as_deref())}</h3>
                        <span class=format!("{} text-xs px-2 py-0.5 rounded-full text-white", level_color)>
                            {level}
                        </span>
                    </div>
                    <p class="text-gray-400 text-sm mt-1">{or_na(record.email.as_deref())}</p>
                </div>

                <span class=format!("text-sm font-medium {}", status_color)>{status}</span>
            </div>

            <div class="grid grid-cols-2 gap-x-4 gap-y-1 mt-4 text-sm text-gray-400">
                <span>"WhatsApp: "{or_na(record.phone.as_deref())}</span>
                <span>"CNPJ: "{or_na(record.tax_id.as_deref())}</span>
                <span>{location}</span>
                <span>"Vendedor: "{or_na(record.seller_code.as_deref())}</span>
                <span>"Risco: "{or_na(record.risk_tier.as_deref())}</span>
                <span>
                    "Score: "
                    {record
                        .final_score
                        .map(|s| format!("{:.0}", s))
                        .unwrap_or_else(|| "N/A".to_string())}
                </span>
            </div>

            <div class="flex items-center justify-between mt-4 pt-3 border-t border-gray-700 text-sm">
                <span class="font-semibold text-white">
                    {format_currency(record.revenue_value())}
                </span>
                <span class="text-gray-400">
                    "Última compra: "{format_days(record.days_since_last_purchase)}
                </span>
            </div>
        </div>
    }
}
