//! Executive Page
//!
//! The executive overview: KPI cards, churn/level/risk distributions,
//! satisfaction block, critical-client panel and the recurrence section
//! with its date window. The load cycle is: mark cards pending, fetch,
//! patch cards, replace chart datasets, then run the recurrence
//! sub-pipeline for the current window.

use leptos::*;

use crate::api::{
    self, CriticalAnalysis, Distributions, ExecutiveData, KpiEntry, Kpis, RecurrenceMetrics,
    Satisfaction,
};
use crate::components::chart::{ChartKind, Palette};
use crate::components::{BarChart, DonutChart, MetricCard};
use crate::format::{format_count, format_currency, format_percent};
use crate::state::session::DEBOUNCE_MS;
use crate::state::{
    period::parse_iso_date, use_dashboard_state, Accent, CardPatch, DashboardState, Debouncer,
    Period,
};

/// Executive page component
#[component]
pub fn Executive() -> impl IntoView {
    let state = use_dashboard_state();
    let period = create_rw_signal(Period::default());
    let exec_data = create_rw_signal(None::<ExecutiveData>);

    // Initial load on mount
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let state = state_for_effect.clone();
        let window = period.get_untracked();
        spawn_local(async move {
            load_executive(&state, exec_data).await;
            load_recurrence(&state, window).await;
        });
    });

    let debouncer = Debouncer::new();

    let state_for_dates = state.clone();
    let debouncer_for_dates = debouncer.clone();
    let on_date_change = move |start_value: String, end_value: String| {
        let state = state_for_dates.clone();
        match (parse_iso_date(&start_value), parse_iso_date(&end_value)) {
            (Some(start), Some(end)) => match Period::new(start, end) {
                Some(window) => {
                    period.set(window.clone());
                    let state_for_fetch = state.clone();
                    debouncer_for_dates.schedule(DEBOUNCE_MS, move || {
                        spawn_local(async move {
                            load_recurrence(&state_for_fetch, window).await;
                        });
                    });
                }
                None => state.show_warning("Data final anterior à inicial"),
            },
            _ => state.show_warning("Período inválido"),
        }
    };
    let on_date_change = store_value(on_date_change);

    let state_for_preset = state.clone();
    let debouncer_for_preset = debouncer.clone();
    let on_preset = move |days: i64| {
        // A preset click overrides any pending debounced input
        debouncer_for_preset.cancel();
        let window = Period::last_days(days);
        period.set(window.clone());
        let state = state_for_preset.clone();
        spawn_local(async move {
            load_recurrence(&state, window).await;
        });
    };
    let on_preset = store_value(on_preset);

    let state_for_refresh = state.clone();
    let on_refresh = move |_| {
        let state = state_for_refresh.clone();
        let window = period.get_untracked();
        spawn_local(async move {
            state.loading.set(true);
            match api::refresh_server_cache().await {
                Ok(()) => {
                    state.show_success("Dados atualizados");
                    load_executive(&state, exec_data).await;
                    load_recurrence(&state, window).await;
                }
                Err(e) => state.show_error(&format!("Falha ao atualizar: {}", e)),
            }
            state.loading.set(false);
        });
    };

    view! {
        <div class="space-y-8">
            // Page header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Visão Executiva"</h1>
                    <p class="text-gray-400 mt-1">"Retenção, satisfação e receita da base"</p>
                </div>

                <button
                    on:click=on_refresh
                    class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm transition-colors"
                >
                    "↻ Atualizar dados"
                </button>
            </div>

            // KPI row
            <section>
                <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                    <MetricCard slot_id="card-total-clientes" title="Total de Clientes" />
                    <MetricCard slot_id="card-retencao" title="Taxa de Retenção" />
                    <MetricCard slot_id="card-criticos" title="Clientes Críticos" />
                    <MetricCard slot_id="card-receita" title="Receita Total" />
                </div>
            </section>

            // Status breakdown cards
            <section>
                <h2 class="text-lg font-semibold mb-4">"Status da Base"</h2>
                <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                    <MetricCard slot_id="card-base-total" title="Base Total" />
                    <MetricCard slot_id="card-ativos" title="Ativos" />
                    <MetricCard slot_id="card-inativos" title="Inativos" />
                    <MetricCard slot_id="card-dormant" title="Dormentes" />
                </div>
            </section>

            // Distribution charts
            <div class="grid md:grid-cols-3 gap-6">
                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-lg font-semibold mb-4">"Nível de Cliente"</h2>
                    <DonutChart slot_id="chart-nivel" />
                </section>
                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-lg font-semibold mb-4">"Status de Churn"</h2>
                    <DonutChart slot_id="chart-churn" />
                </section>
                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-lg font-semibold mb-4">"Risco de Recência"</h2>
                    <DonutChart slot_id="chart-risco" />
                </section>
            </div>

            // Satisfaction block
            <section>
                <h2 class="text-lg font-semibold mb-4">"Satisfação"</h2>
                <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                    <MetricCard slot_id="card-nps" title="NPS" />
                    <MetricCard slot_id="card-atendimento" title="Atendimento" />
                    <MetricCard slot_id="card-produto" title="Produto" />
                    <MetricCard slot_id="card-prazo" title="Prazo de Entrega" />
                </div>
            </section>

            // Derived executive summary
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-lg font-semibold mb-4">"Resumo Executivo"</h2>
                <p class="text-gray-300">
                    {move || {
                        exec_data
                            .get()
                            .map(|data| executive_summary(&data))
                            .unwrap_or_else(|| "---".to_string())
                    }}
                </p>
            </section>

            // Critical clients and attention panel
            <div class="grid md:grid-cols-2 gap-6">
                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-lg font-semibold mb-4">"Clientes Premium em Risco"</h2>
                    <p class="text-gray-300">
                        {move || {
                            exec_data
                                .get()
                                .map(|data| critical_summary(&data.critical_analysis))
                                .unwrap_or_else(|| "---".to_string())
                        }}
                    </p>
                </section>

                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-lg font-semibold mb-4">"Pontos de Atenção"</h2>
                    {move || {
                        let issues = exec_data
                            .get()
                            .map(|data| attention_issues(&data))
                            .unwrap_or_default();
                        if issues.is_empty() {
                            view! {
                                <p class="text-green-400 text-sm">
                                    "Nenhum ponto de atenção no momento"
                                </p>
                            }
                            .into_view()
                        } else {
                            issues
                                .into_iter()
                                .map(|issue| {
                                    view! {
                                        <p class="text-yellow-400 text-sm py-1">"⚠ " {issue}</p>
                                    }
                                })
                                .collect_view()
                        }
                    }}
                </section>
            </div>

            // Recurrence section
            <section class="bg-gray-800 rounded-xl p-6 space-y-6">
                <div class="flex flex-wrap items-center justify-between gap-4">
                    <div>
                        <h2 class="text-xl font-semibold">"Recorrência de Compra"</h2>
                        <p class="text-gray-400 text-sm mt-1">
                            {move || period.get().label()}
                        </p>
                    </div>

                    <div class="flex items-center space-x-2">
                        <input
                            type="date"
                            prop:value=move || period.get().start_iso()
                            on:change=move |ev| {
                                let start = event_target_value(&ev);
                                let end = period.get_untracked().end_iso();
                                on_date_change.with_value(|f| f(start, end));
                            }
                            class="bg-gray-700 rounded-lg px-3 py-2 text-sm"
                        />
                        <span class="text-gray-400">"a"</span>
                        <input
                            type="date"
                            prop:value=move || period.get().end_iso()
                            on:change=move |ev| {
                                let start = period.get_untracked().start_iso();
                                let end = event_target_value(&ev);
                                on_date_change.with_value(|f| f(start, end));
                            }
                            class="bg-gray-700 rounded-lg px-3 py-2 text-sm"
                        />
                    </div>

                    // Quick window presets
                    <div class="flex items-center space-x-1">
                        {[30_i64, 90, 180, 365]
                            .into_iter()
                            .map(|days| {
                                view! {
                                    <button
                                        on:click=move |_| on_preset.with_value(|f| f(days))
                                        class="px-3 py-1.5 rounded-lg text-sm bg-gray-700 hover:bg-gray-600 transition-colors"
                                    >
                                        {format!("{}d", days)}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>

                <div class="grid grid-cols-2 md:grid-cols-5 gap-4">
                    <MetricCard slot_id="card-pedidos-primeira" title="Primeiras Compras" />
                    <MetricCard slot_id="card-pedidos-recompra" title="Recompras" />
                    <MetricCard slot_id="card-conversao" title="Conversão p/ Recompra" />
                    <MetricCard slot_id="card-ticket-primeira" title="Ticket 1ª Compra" />
                    <MetricCard slot_id="card-ticket-recompra" title="Ticket Recompra" />
                </div>

                <div class="grid md:grid-cols-2 gap-6">
                    <div>
                        <h3 class="text-sm text-gray-400 mb-2">"Primeira Compra vs Recompra"</h3>
                        <DonutChart slot_id="chart-recorrencia" />
                    </div>
                    <div>
                        <h3 class="text-sm text-gray-400 mb-2">"Ticket Médio"</h3>
                        <BarChart slot_id="chart-tickets" />
                    </div>
                </div>
            </section>
        </div>
    }
}

/// Fetch and apply the executive payload.
async fn load_executive(state: &DashboardState, exec_data: RwSignal<Option<ExecutiveData>>) {
    state.loading.set(true);
    state.mark_cards_pending();

    match api::fetch_executive_data().await {
        Ok(data) => {
            let mut patches = kpi_patches(&data.kpis);
            patches.extend(status_patches(&data.distributions));
            patches.extend(satisfaction_patches(&data.satisfaction));
            state.apply_cards(patches);

            state.last_update.set(data.latest_update.clone());
            let distributions = data.distributions.clone();
            exec_data.set(Some(data));
            render_distribution_charts(state, &distributions);
        }
        Err(e) => state.show_error(&format!("Falha ao carregar dados: {}", e)),
    }

    state.loading.set(false);
}

/// Fetch and apply a recurrence window. Responses that lost the race to
/// a newer request are discarded.
async fn load_recurrence(state: &DashboardState, window: Period) {
    let generation = state.begin_recurrence_fetch();

    match api::fetch_recurrence_data(window.start(), window.end()).await {
        Ok(data) => {
            if !state.recurrence_fetch_is_current(generation) {
                return;
            }
            state.apply_cards(recurrence_patches(&data.metrics));

            if let Some(pie) = data.charts.pie_recurrence {
                render_or_warn(
                    state,
                    "chart-recorrencia",
                    ChartKind::Donut,
                    pie.labels,
                    pie.values,
                    Palette::Ordered,
                );
            }
            if let Some(bars) = data.charts.bar_tickets {
                render_or_warn(
                    state,
                    "chart-tickets",
                    ChartKind::Bar,
                    bars.labels,
                    bars.values,
                    Palette::Ordered,
                );
            }
        }
        // Secondary feature: failures are logged, not surfaced as toasts
        Err(e) => {
            web_sys::console::warn_1(&format!("recorrência indisponível: {}", e).into());
        }
    }
}

fn render_distribution_charts(state: &DashboardState, distributions: &Distributions) {
    let (labels, values) = ordered_breakdown(&distributions.nivel, LEVEL_ORDER);
    render_or_warn(state, "chart-nivel", ChartKind::Donut, labels, values, Palette::Level);

    let (labels, values) = ordered_breakdown(&distributions.churn, CHURN_ORDER);
    render_or_warn(state, "chart-churn", ChartKind::Donut, labels, values, Palette::Churn);

    let (labels, values) = ordered_breakdown(&distributions.risco, RISK_ORDER);
    render_or_warn(state, "chart-risco", ChartKind::Donut, labels, values, Palette::Risk);
}

/// A chart that fails to build never takes the page down; the card data
/// is already applied, so the failure is downgraded to a warning.
fn render_or_warn(
    state: &DashboardState,
    slot: &str,
    kind: ChartKind,
    labels: Vec<String>,
    values: Vec<f64>,
    palette: Palette,
) {
    if let Err(e) = state.render_chart(slot, kind, labels, values, palette) {
        state.show_warning(&format!("Gráfico indisponível: {}", e));
    }
}

const LEVEL_ORDER: &[&str] = &["Premium", "Gold", "Silver", "Bronze"];
const CHURN_ORDER: &[&str] = &["Ativo", "Inativo"];
const RISK_ORDER: &[&str] = &["Alto Risco", "Médio Risco", "Baixo Risco"];

/// Flatten a label->count map into parallel vectors with a stable order:
/// the preferred labels first, remaining labels alphabetically after.
fn ordered_breakdown(
    map: &std::collections::HashMap<String, u64>,
    preferred: &[&str],
) -> (Vec<String>, Vec<f64>) {
    let mut labels: Vec<String> = Vec::with_capacity(map.len());

    for label in preferred {
        if map.contains_key(*label) {
            labels.push(label.to_string());
        }
    }

    let mut rest: Vec<String> = map
        .keys()
        .filter(|k| !preferred.contains(&k.as_str()))
        .cloned()
        .collect();
    rest.sort();
    labels.extend(rest);

    let values = labels.iter().map(|l| map[l] as f64).collect();
    (labels, values)
}

/// Card patches for the KPI row. Absent entries are skipped so their
/// cards keep the pending placeholder.
fn kpi_patches(kpis: &Kpis) -> Vec<(&'static str, CardPatch)> {
    let mut patches = Vec::new();

    let entries = [
        ("card-total-clientes", &kpis.total_clientes, Accent::Info),
        ("card-retencao", &kpis.taxa_retencao, Accent::Success),
        ("card-criticos", &kpis.taxa_criticos, Accent::Danger),
        ("card-receita", &kpis.receita_total, Accent::Info),
    ];

    for (slot, entry, default_accent) in entries {
        if let Some(kpi) = entry {
            let mut patch = CardPatch::value(&kpi.value)
                .with_color(Accent::from_wire(kpi.color_class.as_deref(), default_accent));
            if let Some(subtitle) = &kpi.subtitle {
                patch = patch.with_trend(subtitle);
            }
            patches.push((slot, patch));
        }
    }

    patches
}

/// Card patches for the status breakdown. Every `Dormant_*` bucket is
/// summed into the single dormant card; trends carry the share of the
/// base as "80.0% da base".
fn status_patches(distributions: &Distributions) -> Vec<(&'static str, CardPatch)> {
    let churn = &distributions.churn;
    let total: u64 = churn.values().sum();

    let active = churn.get("Ativo").copied().unwrap_or(0);
    let inactive = churn.get("Inativo").copied().unwrap_or(0);
    let dormant: u64 = churn
        .iter()
        .filter(|(label, _)| label.contains("Dormant"))
        .map(|(_, count)| count)
        .sum();

    let share = |count: u64| -> String {
        let pct = if total == 0 {
            0.0
        } else {
            count as f64 / total as f64 * 100.0
        };
        format!("{} da base", format_percent(pct))
    };

    vec![
        (
            "card-base-total",
            CardPatch::value(format_count(total)).with_color(Accent::Info),
        ),
        (
            "card-ativos",
            CardPatch::value(format_count(active))
                .with_trend(share(active))
                .with_color(Accent::Success),
        ),
        (
            "card-inativos",
            CardPatch::value(format_count(inactive))
                .with_trend(share(inactive))
                .with_color(Accent::Danger),
        ),
        (
            "card-dormant",
            CardPatch::value(format_count(dormant))
                .with_trend(share(dormant))
                .with_color(Accent::Warning),
        ),
    ]
}

/// Derived summary paragraph from the pre-formatted KPI values.
fn executive_summary(data: &ExecutiveData) -> String {
    let kpi = |entry: &Option<KpiEntry>| {
        entry
            .as_ref()
            .map(|k| k.value.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "---".to_string())
    };

    format!(
        "Base de {} clientes com retenção de {} e receita total de {}. \
         Clientes críticos representam {} da base.",
        kpi(&data.kpis.total_clientes),
        kpi(&data.kpis.taxa_retencao),
        kpi(&data.kpis.receita_total),
        kpi(&data.kpis.taxa_criticos),
    )
}

/// Card patches for the satisfaction block. The NPS trend prefers the
/// promoter/detractor breakdown over the backend's free-form trend.
fn satisfaction_patches(satisfaction: &Satisfaction) -> Vec<(&'static str, CardPatch)> {
    let mut patches = Vec::new();

    if let Some(nps) = &satisfaction.nps {
        let mut patch = CardPatch::value(&nps.value)
            .with_color(Accent::from_wire(nps.color_class.as_deref(), Accent::Info));
        if let Some(details) = &nps.details {
            patch = patch.with_trend(format!(
                "{} promotores · {} detratores ({} respostas)",
                format_count(details.promotores),
                format_count(details.detratores),
                format_count(details.total_validas),
            ));
        } else if let Some(trend) = &nps.trend {
            patch = patch.with_trend(trend);
        }
        patches.push(("card-nps", patch));
    }

    let entries = [
        ("card-atendimento", &satisfaction.atendimento),
        ("card-produto", &satisfaction.produto),
        ("card-prazo", &satisfaction.prazo),
    ];
    for (slot, entry) in entries {
        if let Some(metric) = entry {
            let mut patch = CardPatch::value(&metric.value)
                .with_color(Accent::from_wire(metric.color_class.as_deref(), Accent::Info));
            if let Some(trend) = &metric.trend {
                patch = patch.with_trend(trend);
            }
            patches.push((slot, patch));
        }
    }

    patches
}

/// Card patches for the recurrence metrics. The repurchase ticket card
/// carries its delta against the first-purchase ticket as a signed
/// percentage, green when repurchases spend more.
fn recurrence_patches(metrics: &RecurrenceMetrics) -> Vec<(&'static str, CardPatch)> {
    let mut patches = vec![
        (
            "card-pedidos-primeira",
            CardPatch::value(format_count(metrics.pedidos_primeira)),
        ),
        (
            "card-pedidos-recompra",
            CardPatch::value(format_count(metrics.pedidos_recompra)),
        ),
        (
            "card-conversao",
            CardPatch::value(format_percent(metrics.taxa_conversao)).with_color(
                if metrics.taxa_conversao >= 50.0 {
                    Accent::Success
                } else {
                    Accent::Warning
                },
            ),
        ),
        (
            "card-ticket-primeira",
            CardPatch::value(format_currency(metrics.ticket_primeira)),
        ),
    ];

    let mut ticket = CardPatch::value(format_currency(metrics.ticket_recompra));
    if let Some((delta, accent)) = ticket_delta(metrics.ticket_primeira, metrics.ticket_recompra) {
        ticket = ticket.with_trend(delta).with_color(accent);
    }
    patches.push(("card-ticket-recompra", ticket));

    patches
}

/// Signed percentage change of the repurchase ticket over the first
/// ticket: 100 -> 120 is "+20.0%" with a success accent. Undefined when
/// the first ticket is zero.
fn ticket_delta(first: f64, repurchase: f64) -> Option<(String, Accent)> {
    if first <= 0.0 || !first.is_finite() || !repurchase.is_finite() {
        return None;
    }
    let pct = (repurchase - first) / first * 100.0;
    let accent = if pct >= 0.0 {
        Accent::Success
    } else {
        Accent::Danger
    };
    let sign = if pct >= 0.0 { "+" } else { "" };
    Some((format!("{}{}", sign, format_percent(pct)), accent))
}

/// One-line summary for the critical panel.
fn critical_summary(analysis: &CriticalAnalysis) -> String {
    format!(
        "{} de {} clientes Premium em risco, {} de receita em risco",
        format_count(analysis.premium_em_risco),
        format_count(analysis.total_premium),
        format_currency(analysis.receita_em_risco),
    )
}

const RETENTION_FLOOR: f64 = 70.0;
const NPS_FLOOR: f64 = 50.0;
const CRITICAL_CEILING: f64 = 15.0;

/// Attention issues derived from the payload's raw values: retention
/// below 70%, NPS below 50, criticals above 15% of the base.
fn attention_issues(data: &ExecutiveData) -> Vec<String> {
    let mut issues = Vec::new();

    if let Some(raw) = data.kpis.taxa_retencao.as_ref().and_then(|k| k.raw) {
        if raw < RETENTION_FLOOR {
            issues.push(format!(
                "Taxa de retenção em {} (abaixo de {})",
                format_percent(raw),
                format_percent(RETENTION_FLOOR),
            ));
        }
    }

    if let Some(nps) = data
        .satisfaction
        .nps
        .as_ref()
        .and_then(|m| crate::format::parse_decimal_flexible(&m.value))
    {
        if nps < NPS_FLOOR {
            issues.push(format!("NPS em {:.0} (abaixo de {:.0})", nps, NPS_FLOOR));
        }
    }

    if let Some(raw) = data.kpis.taxa_criticos.as_ref().and_then(|k| k.raw) {
        if raw > CRITICAL_CEILING {
            issues.push(format!(
                "Clientes críticos em {} (acima de {})",
                format_percent(raw),
                format_percent(CRITICAL_CEILING),
            ));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::{NpsDetails, SatisfactionMetric};
    use std::collections::HashMap;

    fn churn_map(entries: &[(&str, u64)]) -> HashMap<String, u64> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    fn patch_for<'a>(
        patches: &'a [(&'static str, CardPatch)],
        slot: &str,
    ) -> &'a CardPatch {
        &patches.iter().find(|(s, _)| *s == slot).unwrap().1
    }

    #[test]
    fn test_status_patches_share_of_base() {
        let distributions = Distributions {
            churn: churn_map(&[("Ativo", 80), ("Inativo", 15), ("Dormant_Gold", 5)]),
            ..Default::default()
        };
        let patches = status_patches(&distributions);

        assert_eq!(patch_for(&patches, "card-base-total").value, "100");

        let active = patch_for(&patches, "card-ativos");
        assert_eq!(active.value, "80");
        assert_eq!(active.trend.as_deref(), Some("80.0% da base"));
        assert_eq!(active.color, Some(Accent::Success));

        let inactive = patch_for(&patches, "card-inativos");
        assert_eq!(inactive.value, "15");
        assert_eq!(inactive.trend.as_deref(), Some("15.0% da base"));

        let dormant = patch_for(&patches, "card-dormant");
        assert_eq!(dormant.value, "5");
        assert_eq!(dormant.trend.as_deref(), Some("5.0% da base"));
    }

    #[test]
    fn test_status_patches_sum_all_dormant_buckets() {
        let distributions = Distributions {
            churn: churn_map(&[
                ("Ativo", 50),
                ("Dormant_Gold", 12),
                ("Dormant_Silver", 8),
                ("Dormant_Bronze", 30),
            ]),
            ..Default::default()
        };
        let patches = status_patches(&distributions);
        assert_eq!(patch_for(&patches, "card-base-total").value, "100");
        assert_eq!(patch_for(&patches, "card-dormant").value, "50");
        assert_eq!(patch_for(&patches, "card-inativos").value, "0");
    }

    #[test]
    fn test_status_patches_empty_base() {
        let patches = status_patches(&Distributions::default());
        let active = patch_for(&patches, "card-ativos");
        assert_eq!(active.value, "0");
        assert_eq!(active.trend.as_deref(), Some("0.0% da base"));
    }

    #[test]
    fn test_kpi_patches_skip_absent_entries() {
        let kpis = Kpis {
            taxa_retencao: Some(KpiEntry {
                value: "78.3%".to_string(),
                raw: Some(78.3),
                subtitle: Some("812 clientes ativos".to_string()),
                color_class: Some("warning".to_string()),
            }),
            ..Default::default()
        };
        let patches = kpi_patches(&kpis);
        assert_eq!(patches.len(), 1);

        let retention = patch_for(&patches, "card-retencao");
        assert_eq!(retention.value, "78.3%");
        assert_eq!(retention.trend.as_deref(), Some("812 clientes ativos"));
        assert_eq!(retention.color, Some(Accent::Warning));
    }

    #[test]
    fn test_ticket_delta_signed_percent() {
        let (delta, accent) = ticket_delta(100.0, 120.0).unwrap();
        assert_eq!(delta, "+20.0%");
        assert_eq!(accent, Accent::Success);

        let (delta, accent) = ticket_delta(200.0, 150.0).unwrap();
        assert_eq!(delta, "-25.0%");
        assert_eq!(accent, Accent::Danger);

        assert!(ticket_delta(0.0, 120.0).is_none());
    }

    #[test]
    fn test_recurrence_patches() {
        let metrics = RecurrenceMetrics {
            pedidos_primeira: 1400,
            pedidos_recompra: 830,
            taxa_conversao: 59.3,
            ticket_primeira: 100.0,
            ticket_recompra: 120.0,
        };
        let patches = recurrence_patches(&metrics);

        assert_eq!(patch_for(&patches, "card-pedidos-primeira").value, "1.400");
        assert_eq!(patch_for(&patches, "card-conversao").value, "59.3%");
        assert_eq!(
            patch_for(&patches, "card-conversao").color,
            Some(Accent::Success)
        );

        let ticket = patch_for(&patches, "card-ticket-recompra");
        assert_eq!(ticket.value, "R$ 120,00");
        assert_eq!(ticket.trend.as_deref(), Some("+20.0%"));
    }

    #[test]
    fn test_ordered_breakdown_stable_order() {
        let map = churn_map(&[
            ("Dormant_Silver", 3),
            ("Ativo", 10),
            ("Dormant_Gold", 4),
            ("Inativo", 2),
        ]);
        let (labels, values) = ordered_breakdown(&map, CHURN_ORDER);
        assert_eq!(labels, vec!["Ativo", "Inativo", "Dormant_Gold", "Dormant_Silver"]);
        assert_eq!(values, vec![10.0, 2.0, 4.0, 3.0]);
    }

    #[test]
    fn test_attention_issues_thresholds() {
        let data = ExecutiveData {
            status: "success".to_string(),
            kpis: Kpis {
                taxa_retencao: Some(KpiEntry {
                    raw: Some(65.2),
                    ..Default::default()
                }),
                taxa_criticos: Some(KpiEntry {
                    raw: Some(18.4),
                    ..Default::default()
                }),
                ..Default::default()
            },
            satisfaction: Satisfaction {
                nps: Some(SatisfactionMetric {
                    value: "42".to_string(),
                    ..Default::default()
                }),
                ..Default::default()
            },
            distributions: Distributions::default(),
            critical_analysis: CriticalAnalysis::default(),
            latest_update: None,
        };

        let issues = attention_issues(&data);
        assert_eq!(issues.len(), 3);
        assert!(issues[0].contains("retenção"));
        assert!(issues[1].contains("NPS"));
        assert!(issues[2].contains("críticos"));
    }

    #[test]
    fn test_attention_issues_healthy_base() {
        let data = ExecutiveData {
            status: "success".to_string(),
            kpis: Kpis {
                taxa_retencao: Some(KpiEntry {
                    raw: Some(82.0),
                    ..Default::default()
                }),
                taxa_criticos: Some(KpiEntry {
                    raw: Some(9.0),
                    ..Default::default()
                }),
                ..Default::default()
            },
            satisfaction: Satisfaction {
                nps: Some(SatisfactionMetric {
                    value: "63".to_string(),
                    ..Default::default()
                }),
                ..Default::default()
            },
            distributions: Distributions::default(),
            critical_analysis: CriticalAnalysis::default(),
            latest_update: None,
        };
        assert!(attention_issues(&data).is_empty());
    }

    #[test]
    fn test_satisfaction_patches_nps_breakdown_trend() {
        let satisfaction = Satisfaction {
            nps: Some(SatisfactionMetric {
                value: "62".to_string(),
                trend: Some("+4 vs trimestre".to_string()),
                color_class: Some("success".to_string()),
                details: Some(NpsDetails {
                    promotores: 710,
                    neutros: 120,
                    detratores: 90,
                    total_validas: 920,
                }),
            }),
            atendimento: Some(SatisfactionMetric {
                value: "4.6".to_string(),
                trend: None,
                color_class: None,
                details: None,
            }),
            ..Default::default()
        };
        let patches = satisfaction_patches(&satisfaction);

        let nps = patch_for(&patches, "card-nps");
        assert_eq!(nps.value, "62");
        assert_eq!(
            nps.trend.as_deref(),
            Some("710 promotores · 90 detratores (920 respostas)")
        );
        assert_eq!(nps.color, Some(Accent::Success));

        let service = patch_for(&patches, "card-atendimento");
        assert_eq!(service.value, "4.6");
        assert!(service.trend.is_none());
    }

    #[test]
    fn test_executive_summary_paragraph() {
        let data = ExecutiveData {
            status: "success".to_string(),
            kpis: Kpis {
                total_clientes: Some(KpiEntry {
                    value: "1.015".to_string(),
                    ..Default::default()
                }),
                taxa_retencao: Some(KpiEntry {
                    value: "78.3%".to_string(),
                    ..Default::default()
                }),
                receita_total: Some(KpiEntry {
                    value: "R$ 2.1M".to_string(),
                    ..Default::default()
                }),
                taxa_criticos: None,
            },
            distributions: Distributions::default(),
            satisfaction: Satisfaction::default(),
            critical_analysis: CriticalAnalysis::default(),
            latest_update: None,
        };

        assert_eq!(
            executive_summary(&data),
            "Base de 1.015 clientes com retenção de 78.3% e receita total de R$ 2.1M. \
             Clientes críticos representam --- da base."
        );
    }

    #[test]
    fn test_critical_summary() {
        let analysis = CriticalAnalysis {
            premium_em_risco: 14,
            total_premium: 120,
            receita_em_risco: 84210.5,
        };
        assert_eq!(
            critical_summary(&analysis),
            "14 de 120 clientes Premium em risco, R$ 84.210,50 de receita em risco"
        );
    }
}
