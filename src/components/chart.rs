//! Chart Components
//!
//! Donut and bar charts drawn on HTML5 Canvas. Datasets are validated
//! and registered per slot; re-rendering a slot replaces the previous
//! dataset so exactly one live handle exists per slot.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::format::{format_compact, format_count, format_currency, format_percent};
use crate::state::use_dashboard_state;

/// Brand colors
const COLOR_PRIMARY: &str = "#96CA00";
const COLOR_SECONDARY: &str = "#84A802";
const COLOR_SUCCESS: &str = "#96CA00";
const COLOR_WARNING: &str = "#f59e0b";
const COLOR_DANGER: &str = "#ef4444";
const COLOR_INFO: &str = "#3b82f6";
const COLOR_PREMIUM: &str = "#8b5cf6";
const COLOR_GOLD: &str = "#f59e0b";
const COLOR_SILVER: &str = "#6b7280";
const COLOR_BRONZE: &str = "#dc2626";

/// Fixed ordered palette for series without a domain mapping
const SERIES_COLORS: [&str; 6] = [
    COLOR_PRIMARY,
    COLOR_WARNING,
    COLOR_INFO,
    COLOR_PREMIUM,
    COLOR_DANGER,
    "#00BCD4",
];

/// How labels resolve to colors for a chart's domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    /// Client levels: Premium/Gold/Silver/Bronze brand colors
    Level,
    /// Churn statuses: Ativo/Inativo/Dormant_* traffic colors
    Churn,
    /// Grouped risk tiers
    Risk,
    /// Fixed ordered fallback palette
    Ordered,
}

impl Palette {
    /// Resolve one label; unmapped labels fall back to the info color.
    fn resolve(self, label: &str, index: usize) -> &'static str {
        match self {
            Palette::Level => match label {
                "Premium" => COLOR_PREMIUM,
                "Gold" => COLOR_GOLD,
                "Silver" => COLOR_SILVER,
                "Bronze" => COLOR_BRONZE,
                _ => COLOR_INFO,
            },
            Palette::Churn => {
                if label == "Ativo" {
                    COLOR_SUCCESS
                } else if label == "Inativo" {
                    COLOR_DANGER
                } else if label.contains("Dormant") {
                    COLOR_WARNING
                } else {
                    COLOR_INFO
                }
            }
            Palette::Risk => match label {
                "Alto Risco" => COLOR_DANGER,
                "Médio Risco" => COLOR_WARNING,
                "Baixo Risco" => COLOR_SUCCESS,
                _ => COLOR_INFO,
            },
            Palette::Ordered => SERIES_COLORS[index % SERIES_COLORS.len()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Donut,
    Bar,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ChartError {
    #[error("chart {slot}: {labels} labels for {values} values")]
    LengthMismatch {
        slot: String,
        labels: usize,
        values: usize,
    },
    #[error("canvas {0}: 2d context unavailable")]
    Canvas(String),
}

/// A validated, color-resolved dataset — the live handle for one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDataset {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<&'static str>,
}

impl ChartDataset {
    /// Build a dataset, rejecting label/value length mismatches and
    /// resolving one color per label through the palette.
    pub fn build(
        slot: &str,
        kind: ChartKind,
        labels: Vec<String>,
        values: Vec<f64>,
        palette: Palette,
    ) -> Result<Self, ChartError> {
        if labels.len() != values.len() {
            return Err(ChartError::LengthMismatch {
                slot: slot.to_string(),
                labels: labels.len(),
                values: values.len(),
            });
        }

        let colors = labels
            .iter()
            .enumerate()
            .map(|(i, label)| palette.resolve(label, i))
            .collect();

        Ok(Self {
            kind,
            labels,
            values,
            colors,
        })
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// A zero-sum dataset renders the "no data" placeholder.
    pub fn is_empty_total(&self) -> bool {
        self.total() <= 0.0
    }

    /// Percentage of total for one segment, `value/sum*100`.
    pub fn percentage(&self, index: usize) -> f64 {
        let total = self.total();
        if total <= 0.0 {
            0.0
        } else {
            self.values[index] / total * 100.0
        }
    }

    /// Legend/tooltip text: "Ativo: 812 (80.0%)".
    pub fn legend_entry(&self, index: usize) -> String {
        format!(
            "{}: {} ({})",
            self.labels[index],
            format_count(self.values[index].round().max(0.0) as u64),
            format_percent(self.percentage(index)),
        )
    }
}

/// Slot id -> live dataset. Inserting a dataset for a slot drops the
/// previous one: destroy-before-replace, never two handles per slot.
#[derive(Clone, Default)]
pub struct ChartRegistry {
    slots: Rc<RefCell<HashMap<String, ChartDataset>>>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &self,
        slot: &str,
        kind: ChartKind,
        labels: Vec<String>,
        values: Vec<f64>,
        palette: Palette,
    ) -> Result<(), ChartError> {
        let dataset = ChartDataset::build(slot, kind, labels, values, palette)?;
        self.slots.borrow_mut().insert(slot.to_string(), dataset);
        Ok(())
    }

    pub fn dataset(&self, slot: &str) -> Option<ChartDataset> {
        self.slots.borrow().get(slot).cloned()
    }

    /// Live handles for a slot: 1 after any number of renders, 0 before.
    pub fn handle_count(&self, slot: &str) -> usize {
        usize::from(self.slots.borrow().contains_key(slot))
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

/// Donut chart bound to a chart slot.
#[component]
pub fn DonutChart(
    /// Slot id this canvas renders
    slot_id: &'static str,
) -> impl IntoView {
    let state = use_dashboard_state();
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Redraw whenever a dataset is replaced
    create_effect(move |_| {
        state.charts_version.track();
        if let Some(canvas) = canvas_ref.get() {
            if let Some(dataset) = state.charts.dataset(slot_id) {
                if let Err(e) = draw_donut(&canvas, &dataset) {
                    web_sys::console::warn_1(&e.to_string().into());
                }
            }
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            id=slot_id
            width="420"
            height="260"
            class="w-full rounded-lg"
        />
    }
}

/// Bar chart bound to a chart slot.
#[component]
pub fn BarChart(
    /// Slot id this canvas renders
    slot_id: &'static str,
) -> impl IntoView {
    let state = use_dashboard_state();
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        state.charts_version.track();
        if let Some(canvas) = canvas_ref.get() {
            if let Some(dataset) = state.charts.dataset(slot_id) {
                if let Err(e) = draw_bar(&canvas, &dataset) {
                    web_sys::console::warn_1(&e.to_string().into());
                }
            }
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            id=slot_id
            width="420"
            height="260"
            class="w-full rounded-lg"
        />
    }
}

fn context_2d(canvas: &HtmlCanvasElement, slot: &str) -> Result<CanvasRenderingContext2d, ChartError> {
    match canvas.get_context("2d") {
        Ok(Some(ctx)) => ctx
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ChartError::Canvas(slot.to_string())),
        _ => Err(ChartError::Canvas(slot.to_string())),
    }
}

fn clear_surface(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);
}

fn draw_no_data(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
    ctx.set_fill_style(&"#6b7280".into());
    ctx.set_font("16px sans-serif");
    let _ = ctx.fill_text("Sem dados no período", width / 2.0 - 80.0, height / 2.0);
}

/// Draw a donut with a legend column on the right.
fn draw_donut(canvas: &HtmlCanvasElement, dataset: &ChartDataset) -> Result<(), ChartError> {
    let ctx = context_2d(canvas, canvas.id().as_str())?;

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    clear_surface(&ctx, width, height);

    if dataset.is_empty_total() {
        draw_no_data(&ctx, width, height);
        return Ok(());
    }

    let cx = height / 2.0;
    let cy = height / 2.0;
    let outer = height / 2.0 - 16.0;
    let inner = outer * 0.55;
    let total = dataset.total();

    let mut angle = -std::f64::consts::FRAC_PI_2;
    for (i, value) in dataset.values.iter().enumerate() {
        if *value <= 0.0 {
            continue;
        }
        let sweep = value / total * std::f64::consts::TAU;

        ctx.begin_path();
        let _ = ctx.arc(cx, cy, outer, angle, angle + sweep);
        let _ = ctx.arc_with_anticlockwise(cx, cy, inner, angle + sweep, angle, true);
        ctx.close_path();
        ctx.set_fill_style(&dataset.colors[i].into());
        ctx.fill();

        // Segment separator
        ctx.set_stroke_style(&"#1f2937".into());
        ctx.set_line_width(2.0);
        ctx.stroke();

        angle += sweep;
    }

    // Legend with count and percentage-of-total per entry
    let legend_x = height + 16.0;
    let mut legend_y = 28.0;
    ctx.set_font("13px sans-serif");
    for i in 0..dataset.labels.len() {
        ctx.set_fill_style(&dataset.colors[i].into());
        ctx.fill_rect(legend_x, legend_y - 9.0, 10.0, 10.0);

        ctx.set_fill_style(&"#d1d5db".into()); // gray-300
        let _ = ctx.fill_text(&dataset.legend_entry(i), legend_x + 16.0, legend_y);
        legend_y += 20.0;
    }

    Ok(())
}

/// Draw vertical bars with a currency axis.
fn draw_bar(canvas: &HtmlCanvasElement, dataset: &ChartDataset) -> Result<(), ChartError> {
    let ctx = context_2d(canvas, canvas.id().as_str())?;

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    clear_surface(&ctx, width, height);

    if dataset.is_empty_total() {
        draw_no_data(&ctx, width, height);
        return Ok(());
    }

    let margin_left = 70.0;
    let margin_right = 20.0;
    let margin_top = 24.0;
    let margin_bottom = 40.0;
    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    let max_value = dataset.values.iter().cloned().fold(0.0_f64, f64::max);
    let y_max = if max_value > 0.0 { max_value * 1.1 } else { 1.0 };

    // Horizontal grid lines with axis labels
    ctx.set_line_width(1.0);
    ctx.set_font("11px sans-serif");
    for i in 0..=4 {
        let y = margin_top + (i as f64 / 4.0) * chart_height;
        ctx.set_stroke_style(&"#374151".into()); // gray-700
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = y_max - (i as f64 / 4.0) * y_max;
        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        let _ = ctx.fill_text(&format_compact(value, "R$ "), 4.0, y + 4.0);
    }

    // Bars with currency captions
    let n = dataset.values.len() as f64;
    let slot_width = chart_width / n;
    let bar_width = slot_width * 0.5;

    ctx.set_font("12px sans-serif");
    for (i, value) in dataset.values.iter().enumerate() {
        let x = margin_left + i as f64 * slot_width + (slot_width - bar_width) / 2.0;
        let bar_height = (value / y_max) * chart_height;
        let y = margin_top + chart_height - bar_height;

        ctx.set_fill_style(&dataset.colors[i].into());
        ctx.fill_rect(x, y, bar_width, bar_height);
        ctx.set_stroke_style(&COLOR_SECONDARY.into());
        ctx.set_line_width(1.0);
        ctx.stroke_rect(x, y, bar_width, bar_height);

        ctx.set_fill_style(&"#d1d5db".into());
        let _ = ctx.fill_text(&format_currency(*value), x - 6.0, y - 6.0);

        // X-axis label
        ctx.set_fill_style(&"#9ca3af".into());
        let _ = ctx.fill_text(&dataset.labels[i], x, height - 14.0);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn churn_dataset() -> ChartDataset {
        ChartDataset::build(
            "chart-churn",
            ChartKind::Donut,
            vec![
                "Ativo".to_string(),
                "Inativo".to_string(),
                "Dormant_Gold".to_string(),
            ],
            vec![80.0, 15.0, 5.0],
            Palette::Churn,
        )
        .unwrap()
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = ChartDataset::build(
            "chart-nivel",
            ChartKind::Donut,
            vec!["Premium".to_string()],
            vec![1.0, 2.0],
            Palette::Level,
        )
        .unwrap_err();
        assert!(matches!(err, ChartError::LengthMismatch { .. }));
    }

    #[test]
    fn test_palette_mapping_with_fallback() {
        let dataset = ChartDataset::build(
            "chart-nivel",
            ChartKind::Donut,
            vec![
                "Premium".to_string(),
                "Gold".to_string(),
                "Sem Classificação".to_string(),
            ],
            vec![3.0, 2.0, 1.0],
            Palette::Level,
        )
        .unwrap();
        assert_eq!(dataset.colors, vec![COLOR_PREMIUM, COLOR_GOLD, COLOR_INFO]);

        let churn = churn_dataset();
        assert_eq!(churn.colors, vec![COLOR_SUCCESS, COLOR_DANGER, COLOR_WARNING]);
    }

    #[test]
    fn test_ordered_palette_cycles() {
        let labels: Vec<String> = (0..8).map(|i| format!("s{}", i)).collect();
        let dataset = ChartDataset::build(
            "chart-series",
            ChartKind::Bar,
            labels,
            vec![1.0; 8],
            Palette::Ordered,
        )
        .unwrap();
        assert_eq!(dataset.colors[0], dataset.colors[6]);
        assert_eq!(dataset.colors[1], dataset.colors[7]);
    }

    #[test]
    fn test_percentages_sum_to_100() {
        let dataset = churn_dataset();
        let sum: f64 = (0..dataset.values.len())
            .map(|i| dataset.percentage(i))
            .sum();
        assert!((sum - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_legend_entry_format() {
        let dataset = churn_dataset();
        assert_eq!(dataset.legend_entry(0), "Ativo: 80 (80.0%)");
        assert_eq!(dataset.legend_entry(2), "Dormant_Gold: 5 (5.0%)");
    }

    #[test]
    fn test_zero_sum_flags_placeholder() {
        let dataset = ChartDataset::build(
            "chart-risco",
            ChartKind::Donut,
            vec!["Alto Risco".to_string(), "Baixo Risco".to_string()],
            vec![0.0, 0.0],
            Palette::Risk,
        )
        .unwrap();
        assert!(dataset.is_empty_total());
        assert_eq!(dataset.percentage(0), 0.0);
    }

    #[test]
    fn test_registry_keeps_one_handle_per_slot() {
        let registry = ChartRegistry::new();
        for i in 0..10 {
            registry
                .render(
                    "chart-nivel",
                    ChartKind::Donut,
                    vec!["Premium".to_string()],
                    vec![i as f64 + 1.0],
                    Palette::Level,
                )
                .unwrap();
        }
        assert_eq!(registry.handle_count("chart-nivel"), 1);
        assert_eq!(registry.len(), 1);
        // The surviving handle is the most recent render
        assert_eq!(registry.dataset("chart-nivel").unwrap().values, vec![10.0]);
    }

    #[test]
    fn test_registry_failed_render_keeps_previous_handle() {
        let registry = ChartRegistry::new();
        registry
            .render(
                "chart-risco",
                ChartKind::Donut,
                vec!["Alto Risco".to_string()],
                vec![7.0],
                Palette::Risk,
            )
            .unwrap();

        let result = registry.render(
            "chart-risco",
            ChartKind::Donut,
            vec!["Alto Risco".to_string(), "Baixo Risco".to_string()],
            vec![7.0],
            Palette::Risk,
        );
        assert!(result.is_err());
        assert_eq!(registry.dataset("chart-risco").unwrap().values, vec![7.0]);
    }
}
