//! Metric Card Component
//!
//! Displays one card slot: value, trend text and semantic accent.

use leptos::*;

use crate::state::cards::{CardState, VALUE_PLACEHOLDER};
use crate::state::use_dashboard_state;

/// Metric card bound to a registry slot
#[component]
pub fn MetricCard(
    /// Slot id this card renders
    slot_id: &'static str,
    /// Card title
    title: &'static str,
) -> impl IntoView {
    let state = use_dashboard_state();
    state.register_card(slot_id);

    let card = create_memo(move |_| {
        state.cards_version.track();
        state.cards.get(slot_id).unwrap_or_default()
    });

    view! {
        <div id=slot_id class="bg-gray-800 rounded-lg p-4 border border-gray-700 hover:border-gray-600 transition">
            <div class="text-gray-400 text-sm">{title}</div>

            // Current value
            <div class=move || value_class(&card.get())>
                {move || card.get().value}
            </div>

            // Trend text
            <div class="text-gray-400 text-sm mt-2 min-h-5">
                {move || card.get().trend}
            </div>
        </div>
    }
}

fn value_class(card: &CardState) -> String {
    let size = if card.compact { "text-xl" } else { "text-3xl" };
    let color = card.color.map(|c| c.css_class()).unwrap_or("text-white");
    let pending = if card.pending || card.value == VALUE_PLACEHOLDER {
        " opacity-50"
    } else {
        ""
    };
    format!("{} font-bold mt-2 {}{}", size, color, pending)
}
