//! Painel
//!
//! Executive dashboard for customer retention, satisfaction and revenue
//! built with Leptos (WASM).
//!
//! # Features
//!
//! - Executive KPIs with churn/level/risk distributions
//! - Purchase recurrence analysis over a selectable date window
//! - Filterable client base with CSV export
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It communicates with the Painel API via HTTP; all filtering
//! and pagination of the client snapshot happens in the browser.

use leptos::*;

mod api;
mod app;
mod components;
mod export;
mod format;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
