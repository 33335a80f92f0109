//! Toast Notification Component
//!
//! Shows success, warning and error messages. Messages auto-expire via
//! the session timers and can be dismissed by click.

use leptos::*;

use crate::state::use_dashboard_state;

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_dashboard_state();

    view! {
        <div class="fixed bottom-20 right-4 z-50 space-y-2">
            // Success toast
            {move || {
                state.success.get().map(|msg| {
                    let signal = state.success;
                    view! {
                        <ToastMessage
                            message=msg
                            variant=ToastVariant::Success
                            on_dismiss=move || signal.set(None)
                        />
                    }
                })
            }}

            // Warning toast
            {move || {
                state.warning.get().map(|msg| {
                    let signal = state.warning;
                    view! {
                        <ToastMessage
                            message=msg
                            variant=ToastVariant::Warning
                            on_dismiss=move || signal.set(None)
                        />
                    }
                })
            }}

            // Error toast
            {move || {
                state.error.get().map(|msg| {
                    let signal = state.error;
                    view! {
                        <ToastMessage
                            message=msg
                            variant=ToastVariant::Danger
                            on_dismiss=move || signal.set(None)
                        />
                    }
                })
            }}
        </div>
    }
}

#[derive(Clone, Copy)]
enum ToastVariant {
    Success,
    Warning,
    Danger,
}

#[component]
fn ToastMessage(
    #[prop(into)]
    message: String,
    variant: ToastVariant,
    on_dismiss: impl Fn() + 'static,
) -> impl IntoView {
    let (icon, bg_class) = match variant {
        ToastVariant::Success => ("✓", "bg-green-600"),
        ToastVariant::Warning => ("⚠", "bg-yellow-600"),
        ToastVariant::Danger => ("✕", "bg-red-600"),
    };

    view! {
        <div
            on:click=move |_| on_dismiss()
            class=format!(
                "flex items-center space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg \
                 cursor-pointer transform transition-all duration-300 ease-out animate-slide-in",
                bg_class
            )
        >
            <span class="text-lg">{icon}</span>
            <span class="text-sm font-medium">{message}</span>
        </div>
    }
}
