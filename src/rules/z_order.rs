use super::Severity;
use crate::config::Thresholds;
use crate::widget::WidgetMap;
use serde::Serialize;

/// One overlapping pair. The widget constructed later in the source is
/// painted last and therefore considered on top.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OcclusionReport {
    pub top_widget: String,
    pub bottom_widget: String,
    pub overlap_area: i64,
    /// Share of the top widget's own area covered by the bottom one.
    pub top_covered_percent: f64,
    /// Share of the bottom widget's own area covered by the top one.
    pub bottom_covered_percent: f64,
    pub severity: Severity,
    pub message: String,
    pub recommendation: String,
}

fn covered_percent(overlap: i64, area: i64) -> f64 {
    if area > 0 {
        overlap as f64 / area as f64 * 100.0
    } else {
        0.0
    }
}

/// Reports every pair of placed widgets whose rectangles intersect with a
/// positive area. Pairs come out in map order; a pair where either side
/// covers more than `occlusion_warning_percent` of the other is a warning.
pub fn analyze_z_order(widgets: &WidgetMap, thresholds: &Thresholds) -> Vec<OcclusionReport> {
    let placed = widgets.with_geometry();
    let mut reports = Vec::new();

    for (i, (first, g1)) in placed.iter().enumerate() {
        for (second, g2) in &placed[i + 1..] {
            if !g1.overlaps(g2) {
                continue;
            }
            let overlap_area = g1.overlap_area(g2);
            let first_pct = covered_percent(overlap_area, g1.area());
            let second_pct = covered_percent(overlap_area, g2.area());

            let second_on_top = second.line > first.line;
            let (top, bottom, top_pct, bottom_pct) = if second_on_top {
                (second, first, second_pct, first_pct)
            } else {
                (first, second, first_pct, second_pct)
            };

            let heavy = first_pct.max(second_pct) > thresholds.occlusion_warning_percent;
            reports.push(OcclusionReport {
                top_widget: top.name.clone(),
                bottom_widget: bottom.name.clone(),
                overlap_area,
                top_covered_percent: top_pct,
                bottom_covered_percent: bottom_pct,
                severity: if heavy {
                    Severity::Warning
                } else {
                    Severity::Info
                },
                message: format!(
                    "{} (line {}) will cover {} (line {})",
                    top.name, top.line, bottom.name, bottom.line
                ),
                recommendation: if heavy {
                    "Review z-order or adjust positions to avoid occlusion".to_string()
                } else {
                    "Minor overlap detected".to_string()
                },
            });
        }
    }

    reports
}
