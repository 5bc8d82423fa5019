use super::Severity;
use crate::config::Thresholds;
use crate::widget::{Geometry, WidgetMap, WidgetRecord};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// Which arrangement a suggestion was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "pattern", rename_all = "snake_case")]
pub enum LayoutPattern {
    Grid { rows: usize, cols: usize },
    VerticalStack,
    HorizontalRow,
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutSuggestion {
    #[serde(flatten)]
    pub pattern: LayoutPattern,
    pub severity: Severity,
    pub category: &'static str,
    pub message: String,
    pub widgets: Vec<String>,
    pub recommendation: String,
    pub benefit: String,
}

/// Recognizes manual positioning that a layout manager could replace.
pub fn suggest_layouts(widgets: &WidgetMap, thresholds: &Thresholds) -> Vec<LayoutSuggestion> {
    let placed = widgets.with_geometry();
    let mut suggestions = Vec::new();
    if placed.is_empty() {
        return suggestions;
    }

    if placed.len() >= 3 {
        if let Some((rows, cols)) = detect_grid(&placed, thresholds.grid_fill_ratio) {
            suggestions.push(LayoutSuggestion {
                pattern: LayoutPattern::Grid { rows, cols },
                severity: Severity::Info,
                category: "layout",
                message: format!("Grid pattern detected: {}x{}", rows, cols),
                widgets: names(&placed),
                recommendation: "Consider using QGridLayout instead of manual positioning"
                    .to_string(),
                benefit: "Automatic responsive layout and easier maintenance".to_string(),
            });
        }

        let mut by_y = placed.clone();
        by_y.sort_by_key(|(_, g)| g.y);
        if within(&by_y, |g| g.x, thresholds.stack_tolerance) {
            suggestions.push(LayoutSuggestion {
                pattern: LayoutPattern::VerticalStack,
                severity: Severity::Info,
                category: "layout",
                message: format!("{} widgets are vertically stacked", by_y.len()),
                widgets: names(&by_y),
                recommendation: "Use QVBoxLayout for vertical stacking".to_string(),
                benefit: "Automatic spacing and responsive behavior".to_string(),
            });
        }

        let mut by_x = placed.clone();
        by_x.sort_by_key(|(_, g)| g.x);
        if within(&by_x, |g| g.y, thresholds.stack_tolerance) {
            suggestions.push(LayoutSuggestion {
                pattern: LayoutPattern::HorizontalRow,
                severity: Severity::Info,
                category: "layout",
                message: format!("{} widgets are horizontally arranged", by_x.len()),
                widgets: names(&by_x),
                recommendation: "Use QHBoxLayout for horizontal arrangement".to_string(),
                benefit: "Automatic spacing and responsive behavior".to_string(),
            });
        }
    }

    let with_layout = widgets.iter().filter(|w| w.layout.is_some()).count();
    let manual = widgets
        .iter()
        .filter(|w| w.layout.is_none() && w.geometry.is_some())
        .count();
    if with_layout > 0 && manual > 0 {
        suggestions.push(LayoutSuggestion {
            pattern: LayoutPattern::Mixed,
            severity: Severity::Warning,
            category: "layout",
            message: format!(
                "Mixed layout approach: {} widgets use layouts, {} use manual positioning",
                with_layout, manual
            ),
            widgets: Vec::new(),
            recommendation: "Use consistent layout approach throughout the UI".to_string(),
            benefit: "Better maintainability and responsive behavior".to_string(),
        });
    }

    suggestions
}

fn names(placed: &[(&WidgetRecord, Geometry)]) -> Vec<String> {
    placed.iter().map(|(w, _)| w.name.clone()).collect()
}

/// Returns `(rows, cols)` when the widget origins fill more than
/// `fill_ratio` of the grid spanned by their distinct coordinates.
///
/// Three widgets in an L shape already fill three of four cells, so the
/// caller's three-widget minimum is the only size requirement.
fn detect_grid(placed: &[(&WidgetRecord, Geometry)], fill_ratio: f64) -> Option<(usize, usize)> {
    let xs: BTreeSet<i64> = placed.iter().map(|(_, g)| g.x).collect();
    let ys: BTreeSet<i64> = placed.iter().map(|(_, g)| g.y).collect();
    if xs.len() < 2 || ys.len() < 2 {
        return None;
    }

    let origins: HashSet<(i64, i64)> = placed.iter().map(|(_, g)| (g.x, g.y)).collect();
    let occupied = xs
        .iter()
        .flat_map(|x| ys.iter().map(move |y| (*x, *y)))
        .filter(|cell| origins.contains(cell))
        .count();
    let total = xs.len() * ys.len();

    if occupied as f64 / total as f64 > fill_ratio {
        Some((ys.len(), xs.len()))
    } else {
        None
    }
}

/// True when the spread of `coord` across at least three widgets stays
/// under `tolerance`.
fn within(
    placed: &[(&WidgetRecord, Geometry)],
    coord: impl Fn(&Geometry) -> i64,
    tolerance: i64,
) -> bool {
    if placed.len() < 3 {
        return false;
    }
    let values = placed.iter().map(|(_, g)| coord(g));
    let min = values.clone().min().unwrap_or_default();
    let max = values.max().unwrap_or_default();
    max.saturating_sub(min) < tolerance
}
