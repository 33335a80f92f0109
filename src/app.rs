//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::components::{Nav, Toast};
use crate::pages::{Clients, Executive};
use crate::state::{provide_dashboard_state, use_dashboard_state};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide session state to all components
    provide_dashboard_state();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                // Navigation header
                <Nav />

                // Main content area
                <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                    <Routes>
                        <Route path="/" view=Executive />
                        <Route path="/clients" view=Clients />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                // Footer with update stamp
                <Footer />

                // Toast notifications
                <Toast />
            </div>
        </Router>
    }
}

/// Footer showing the data update stamp and load activity
#[component]
fn Footer() -> impl IntoView {
    let state = use_dashboard_state();

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                // Data update stamp
                <div class="text-gray-400">
                    {move || {
                        state
                            .last_update
                            .get()
                            .map(|stamp| format!("Dados atualizados em {}", stamp))
                            .unwrap_or_else(|| "Sem dados carregados".to_string())
                    }}
                </div>

                // Loading indicator
                {move || {
                    if state.loading.get() {
                        view! {
                            <div class="flex items-center space-x-2 text-primary-400">
                                <div class="loading-spinner w-4 h-4" />
                                <span>"Carregando..."</span>
                            </div>
                        }.into_view()
                    } else {
                        view! {}.into_view()
                    }
                }}
            </div>
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Página não encontrada"</h1>
            <p class="text-gray-400 mb-6">"O endereço acessado não existe."</p>
            <A
                href="/"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Ir para a Visão Executiva"
            </A>
        </div>
    }
}
