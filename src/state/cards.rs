//! Metric Card State
//!
//! Slot-addressed card registry. Pages register the slots they display;
//! the dashboard controller applies partial updates (patches) to them.
//! Updates are last-write-wins with no history.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Placeholder shown when a card has no value yet.
pub const VALUE_PLACEHOLDER: &str = "---";

/// Values longer than this get the compact-font styling flag so they do
/// not overflow the fixed-width card slots.
const COMPACT_THRESHOLD: usize = 10;

/// Mutually exclusive semantic color for a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Success,
    Warning,
    Danger,
    Info,
}

impl Accent {
    pub fn css_class(self) -> &'static str {
        match self {
            Accent::Success => "text-green-400",
            Accent::Warning => "text-yellow-400",
            Accent::Danger => "text-red-400",
            Accent::Info => "text-blue-400",
        }
    }

    /// Map the backend's `color_class` strings, defaulting to the given
    /// accent for anything unrecognized.
    pub fn from_wire(value: Option<&str>, default: Accent) -> Accent {
        match value {
            Some("success") => Accent::Success,
            Some("warning") => Accent::Warning,
            Some("danger") => Accent::Danger,
            Some("info") => Accent::Info,
            _ => default,
        }
    }
}

/// Rendered state of one card slot.
#[derive(Debug, Clone, PartialEq)]
pub struct CardState {
    pub value: String,
    pub trend: String,
    pub color: Option<Accent>,
    pub compact: bool,
    pub pending: bool,
}

impl Default for CardState {
    fn default() -> Self {
        Self {
            value: VALUE_PLACEHOLDER.to_string(),
            trend: String::new(),
            color: None,
            compact: false,
            pending: true,
        }
    }
}

/// Partial update for a card slot.
///
/// `trend: None` and `color: None` leave the previous values untouched;
/// an empty `value` falls back to the placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct CardPatch {
    pub value: String,
    pub trend: Option<String>,
    pub color: Option<Accent>,
}

impl CardPatch {
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            trend: None,
            color: None,
        }
    }

    pub fn with_trend(mut self, trend: impl Into<String>) -> Self {
        self.trend = Some(trend.into());
        self
    }

    pub fn with_color(mut self, color: Accent) -> Self {
        self.color = Some(color);
        self
    }
}

impl CardState {
    fn apply(&mut self, patch: &CardPatch) {
        self.value = if patch.value.trim().is_empty() {
            VALUE_PLACEHOLDER.to_string()
        } else {
            patch.value.clone()
        };
        self.compact = self.value.chars().count() > COMPACT_THRESHOLD;

        if let Some(trend) = &patch.trend {
            self.trend = trend.clone();
        }
        if let Some(color) = patch.color {
            self.color = Some(color);
        }
        self.pending = false;
    }
}

/// Registry of card slots for the current page.
///
/// Plain shared state; reactivity is driven by the session's card
/// version signal so the contract stays testable off the DOM.
#[derive(Clone, Default)]
pub struct CardRegistry {
    slots: Rc<RefCell<HashMap<String, CardState>>>,
}

impl CardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a slot with default (pending) state. Re-registering an
    /// existing slot keeps its current state.
    pub fn register(&self, slot: &str) {
        self.slots
            .borrow_mut()
            .entry(slot.to_string())
            .or_default();
    }

    /// Apply a patch to a slot. Unregistered slots are a no-op, not an
    /// error: not all slots exist on all pages.
    pub fn apply(&self, slot: &str, patch: &CardPatch) {
        if let Some(state) = self.slots.borrow_mut().get_mut(slot) {
            state.apply(patch);
        }
    }

    /// Mark every registered slot as pending (stale values during a load).
    pub fn mark_all_pending(&self) {
        for state in self.slots.borrow_mut().values_mut() {
            state.pending = true;
        }
    }

    pub fn get(&self, slot: &str) -> Option<CardState> {
        self.slots.borrow().get(slot).cloned()
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}
