//! Clients Page
//!
//! Paginated view of the client base with search, category chips and
//! revenue bounds. The snapshot is fetched once on mount; everything
//! after that (filter, sort, paginate, export) runs in memory.

use std::collections::HashSet;
use std::rc::Rc;

use leptos::*;

use crate::api::{self, ClientRecord};
use crate::components::{ClientCard, Loading};
use crate::export::{clients_csv, download_csv};
use crate::format::format_count;
use crate::state::filters::{apply_filters, clamp_page, commit_change, page_count, page_slice};
use crate::state::session::DEBOUNCE_MS;
use crate::state::{use_dashboard_state, Debouncer, FilterState};

const LEVEL_OPTIONS: &[&str] = &["Premium", "Gold", "Silver", "Bronze"];
const RISK_OPTIONS: &[&str] = &["Alto Risco", "Médio Risco", "Baixo Risco"];
const STATUS_OPTIONS: &[&str] = &["Ativo", "Inativo", "Dormant_Gold", "Dormant_Silver", "Dormant_Bronze"];
const PAGE_SIZES: &[usize] = &[12, 24, 48];

/// Clients page component
#[component]
pub fn Clients() -> impl IntoView {
    let state = use_dashboard_state();
    let clients = create_rw_signal(Rc::new(Vec::<ClientRecord>::new()));
    let loaded = create_rw_signal(false);
    let filters = create_rw_signal(FilterState::default());

    // One snapshot per visit
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let state = state_for_effect.clone();
        spawn_local(async move {
            state.loading.set(true);
            match api::fetch_clients().await {
                Ok(records) => clients.set(Rc::new(records)),
                Err(e) => state.show_error(&format!("Falha ao carregar clientes: {}", e)),
            }
            loaded.set(true);
            state.loading.set(false);
        });
    });

    // Filtered view recomputed from the immutable snapshot
    let filtered = create_memo(move |_| {
        Rc::new(apply_filters(&clients.get(), &filters.get()))
    });

    // One debouncer per text input; the delta is applied to the state
    // as it stands when the timer fires, so chip toggles or edits to
    // other fields landing inside the window are never clobbered.
    let search_debounce = Debouncer::new();
    let min_revenue_debounce = Debouncer::new();
    let max_revenue_debounce = Debouncer::new();

    let immediate_update = move |update: Box<dyn FnOnce(&mut FilterState)>| {
        filters.update(|f| commit_change(f, update));
    };
    let immediate_update = store_value(immediate_update);

    let toggle = move |set: fn(&mut FilterState) -> &mut HashSet<String>, option: &str| {
        let option = option.to_string();
        immediate_update.with_value(|f| {
            f(Box::new(move |filters| {
                let selected = set(filters);
                if !selected.remove(&option) {
                    selected.insert(option);
                }
            }))
        });
    };
    let toggle = store_value(toggle);

    let state_for_export = state.clone();
    let on_export = move |_| {
        let view = filtered.get_untracked();
        if view.is_empty() {
            state_for_export.show_warning("Nenhum cliente para exportar");
            return;
        }
        match download_csv(&clients_csv(&view)) {
            Ok(()) => state_for_export.show_success(&format!(
                "{} clientes exportados",
                format_count(view.len() as u64)
            )),
            Err(e) => state_for_export.show_error(&format!("Falha na exportação: {}", e)),
        }
    };

    let go_to_page = move |page: usize| {
        filters.update(|f| {
            f.page = clamp_page(page, filtered.get_untracked().len(), f.page_size);
        });
    };
    let go_to_page = store_value(go_to_page);

    view! {
        <div class="space-y-6">
            // Page header with export
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Clientes"</h1>
                    <p class="text-gray-400 mt-1">
                        {move || {
                            format!(
                                "{} de {} clientes",
                                format_count(filtered.get().len() as u64),
                                format_count(clients.get().len() as u64),
                            )
                        }}
                    </p>
                </div>

                <button
                    on:click=on_export
                    class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm transition-colors"
                >
                    "⬇ Exportar CSV"
                </button>
            </div>

            // Filter bar
            <section class="bg-gray-800 rounded-xl p-4 space-y-4">
                <div class="grid md:grid-cols-3 gap-4">
                    <input
                        type="text"
                        placeholder="Buscar por nome ou email..."
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            search_debounce.schedule(DEBOUNCE_MS, move || {
                                filters.update(|f| commit_change(f, |f| f.search = value));
                            });
                        }
                        class="bg-gray-700 rounded-lg px-3 py-2 text-sm w-full"
                    />
                    <input
                        type="text"
                        placeholder="Receita mínima (R$)"
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            min_revenue_debounce.schedule(DEBOUNCE_MS, move || {
                                filters.update(|f| commit_change(f, |f| f.min_revenue = value));
                            });
                        }
                        class="bg-gray-700 rounded-lg px-3 py-2 text-sm w-full"
                    />
                    <input
                        type="text"
                        placeholder="Receita máxima (R$)"
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            max_revenue_debounce.schedule(DEBOUNCE_MS, move || {
                                filters.update(|f| commit_change(f, |f| f.max_revenue = value));
                            });
                        }
                        class="bg-gray-700 rounded-lg px-3 py-2 text-sm w-full"
                    />
                </div>

                <FilterChips
                    label="Nível"
                    options=LEVEL_OPTIONS
                    selected=Signal::derive(move || filters.get().levels)
                    on_toggle=move |option: &str| {
                        toggle.with_value(|t| t(|f| &mut f.levels, option))
                    }
                />
                <FilterChips
                    label="Risco"
                    options=RISK_OPTIONS
                    selected=Signal::derive(move || filters.get().risks)
                    on_toggle=move |option: &str| {
                        toggle.with_value(|t| t(|f| &mut f.risks, option))
                    }
                />
                <FilterChips
                    label="Status"
                    options=STATUS_OPTIONS
                    selected=Signal::derive(move || filters.get().statuses)
                    on_toggle=move |option: &str| {
                        toggle.with_value(|t| t(|f| &mut f.statuses, option))
                    }
                />

                // Page size selector
                <div class="flex items-center space-x-2 text-sm">
                    <span class="text-gray-400">"Por página:"</span>
                    <select
                        on:change=move |ev| {
                            let size = event_target_value(&ev).parse().unwrap_or(12);
                            immediate_update.with_value(|f| {
                                f(Box::new(move |filters| filters.page_size = size))
                            });
                        }
                        class="bg-gray-700 rounded-lg px-2 py-1"
                    >
                        {PAGE_SIZES
                            .iter()
                            .map(|size| {
                                view! {
                                    <option value=size.to_string()>{size.to_string()}</option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>
            </section>

            // Results grid
            {move || {
                if !loaded.get() {
                    return view! { <Loading /> }.into_view();
                }

                let view_data = filtered.get();
                let current = filters.get();
                if view_data.is_empty() {
                    return view! {
                        <div class="bg-gray-800 rounded-xl p-12 text-center text-gray-400">
                            "Nenhum cliente encontrado com os filtros atuais"
                        </div>
                    }
                    .into_view();
                }

                let page_records: Vec<ClientRecord> =
                    page_slice(&view_data, current.page, current.page_size).to_vec();

                view! {
                    <div class="grid md:grid-cols-2 xl:grid-cols-3 gap-4">
                        {page_records
                            .into_iter()
                            .map(|record| view! { <ClientCard record=record /> })
                            .collect_view()}
                    </div>
                }
                .into_view()
            }}

            // Pagination
            {move || {
                let total = filtered.get().len();
                let current = filters.get();
                let pages = page_count(total, current.page_size);
                if pages <= 1 {
                    return ().into_view();
                }
                let page = clamp_page(current.page, total, current.page_size);

                view! {
                    <div class="flex items-center justify-center space-x-4 text-sm">
                        <button
                            disabled={page == 1}
                            on:click=move |_| go_to_page.with_value(|f| f(page - 1))
                            class="px-3 py-1.5 rounded-lg bg-gray-700 hover:bg-gray-600 disabled:opacity-40 transition-colors"
                        >
                            "← Anterior"
                        </button>
                        <span class="text-gray-400">
                            {format!("Página {} de {}", page, pages)}
                        </span>
                        <button
                            disabled={page == pages}
                            on:click=move |_| go_to_page.with_value(|f| f(page + 1))
                            class="px-3 py-1.5 rounded-lg bg-gray-700 hover:bg-gray-600 disabled:opacity-40 transition-colors"
                        >
                            "Próxima →"
                        </button>
                    </div>
                }
                .into_view()
            }}
        </div>
    }
}

/// Toggleable chip row for one category filter.
#[component]
fn FilterChips(
    label: &'static str,
    options: &'static [&'static str],
    #[prop(into)]
    selected: Signal<HashSet<String>>,
    on_toggle: impl Fn(&str) + Copy + 'static,
) -> impl IntoView {
    view! {
        <div class="flex flex-wrap items-center gap-2 text-sm">
            <span class="text-gray-400 w-14">{label}</span>
            {options
                .iter()
                .map(|option| {
                    let option = *option;
                    let active = move || selected.get().contains(option);
                    view! {
                        <button
                            on:click=move |_| on_toggle(option)
                            class=move || {
                                if active() {
                                    "px-3 py-1 rounded-full bg-green-700 text-white transition-colors"
                                } else {
                                    "px-3 py-1 rounded-full bg-gray-700 text-gray-300 hover:bg-gray-600 transition-colors"
                                }
                            }
                        >
                            {option}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
