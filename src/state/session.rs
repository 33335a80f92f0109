//! Dashboard Session State
//!
//! Reactive state for one dashboard instance, provided through Leptos
//! context. Everything that used to be ambient page state (card slots,
//! chart handles, notification timers) lives on this object.

use std::cell::Cell;
use std::cell::RefCell;
use std::rc::Rc;

use leptos::*;

use crate::components::chart::{ChartError, ChartKind, ChartRegistry, Palette};
use crate::state::cards::{CardPatch, CardRegistry};

/// Session state provided to all components.
#[derive(Clone)]
pub struct DashboardState {
    /// Global loading indicator
    pub loading: RwSignal<bool>,
    /// Danger-level notification
    pub error: RwSignal<Option<String>>,
    /// Warning-level notification (downgraded render failures)
    pub warning: RwSignal<Option<String>>,
    /// Success/info notification
    pub success: RwSignal<Option<String>>,
    /// Last data update stamp shown in the footer
    pub last_update: RwSignal<Option<String>>,
    /// Metric card slots for the current page
    pub cards: CardRegistry,
    /// Bumped whenever card state changes
    pub cards_version: RwSignal<u64>,
    /// Live chart handles, one per slot
    pub charts: ChartRegistry,
    /// Bumped whenever a chart dataset is replaced
    pub charts_version: RwSignal<u64>,
    /// Request generation for the recurrence sub-pipeline; stale
    /// responses are discarded instead of racing last-response-wins.
    recurrence_generation: Rc<Cell<u64>>,
}

/// Provide session state to the component tree
pub fn provide_dashboard_state() {
    let state = DashboardState {
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        warning: create_rw_signal(None),
        success: create_rw_signal(None),
        last_update: create_rw_signal(None),
        cards: CardRegistry::new(),
        cards_version: create_rw_signal(0),
        charts: ChartRegistry::new(),
        charts_version: create_rw_signal(0),
        recurrence_generation: Rc::new(Cell::new(0)),
    };

    provide_context(state);
}

/// Fetch the session state from context.
pub fn use_dashboard_state() -> DashboardState {
    use_context::<DashboardState>().expect("DashboardState not found")
}

impl DashboardState {
    /// Register a card slot for this page.
    pub fn register_card(&self, slot: &str) {
        self.cards.register(slot);
        self.cards_version.update(|v| *v += 1);
    }

    /// Apply a batch of card patches and notify subscribers once.
    pub fn apply_cards(&self, patches: Vec<(&'static str, CardPatch)>) {
        for (slot, patch) in &patches {
            self.cards.apply(slot, patch);
        }
        self.cards_version.update(|v| *v += 1);
    }

    /// Mark every card pending while fresh data loads.
    pub fn mark_cards_pending(&self) {
        self.cards.mark_all_pending();
        self.cards_version.update(|v| *v += 1);
    }

    /// Replace the chart dataset for a slot (destroying the previous
    /// handle) and trigger a redraw.
    pub fn render_chart(
        &self,
        slot: &str,
        kind: ChartKind,
        labels: Vec<String>,
        values: Vec<f64>,
        palette: Palette,
    ) -> Result<(), ChartError> {
        self.charts.render(slot, kind, labels, values, palette)?;
        self.charts_version.update(|v| *v += 1);
        Ok(())
    }

    /// Start a new recurrence fetch; returns its generation token.
    pub fn begin_recurrence_fetch(&self) -> u64 {
        let next = self.recurrence_generation.get() + 1;
        self.recurrence_generation.set(next);
        next
    }

    /// True while the given generation is still the newest request.
    pub fn recurrence_fetch_is_current(&self, generation: u64) -> bool {
        self.recurrence_generation.get() == generation
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show a warning message (auto-clears after timeout)
    pub fn show_warning(&self, message: &str) {
        self.warning.set(Some(message.to_string()));

        let warning_signal = self.warning;
        gloo_timers::callback::Timeout::new(4000, move || {
            warning_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}

/// Cancel-and-reschedule timer for bursty inputs: scheduling a new
/// action drops any pending one, collapsing keystroke bursts into a
/// single invocation.
#[derive(Clone, Default)]
pub struct Debouncer {
    pending: Rc<RefCell<Option<gloo_timers::callback::Timeout>>>,
}

/// Quiescence window for search and date inputs.
pub const DEBOUNCE_MS: u32 = 350;

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&self, delay_ms: u32, action: impl FnOnce() + 'static) {
        let timeout = gloo_timers::callback::Timeout::new(delay_ms, move || {
            action();
        });
        // Dropping the previous Timeout cancels it
        *self.pending.borrow_mut() = Some(timeout);
    }

    pub fn cancel(&self) {
        self.pending.borrow_mut().take();
    }
}
