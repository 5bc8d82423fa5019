use crate::config::Thresholds;
use crate::widget::{Geometry, WidgetMap, WidgetRecord};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Spacing,
    Alignment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlignmentSuggestion {
    pub kind: SuggestionKind,
    pub message: String,
    pub widgets: Vec<String>,
    pub recommendation: String,
}

/// Distinct positive gaps measured along one axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpacingReport {
    pub spacings: Vec<i64>,
    pub consistent: bool,
}

/// Absent axes had no positive gap to measure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpacingAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<SpacingReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical: Option<SpacingReport>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlignmentAnalysis {
    /// x coordinate → widgets sharing it (clusters of two or more).
    pub x_groups: BTreeMap<i64, Vec<String>>,
    pub y_groups: BTreeMap<i64, Vec<String>>,
    pub spacing: SpacingAnalysis,
    pub suggestions: Vec<AlignmentSuggestion>,
}

/// Groups widgets by exact coordinates and measures the gaps between them.
pub fn analyze_alignment(widgets: &WidgetMap, thresholds: &Thresholds) -> AlignmentAnalysis {
    let placed = widgets.with_geometry();
    if placed.is_empty() {
        return AlignmentAnalysis::default();
    }

    let mut x_groups: BTreeMap<i64, Vec<String>> = BTreeMap::new();
    let mut y_groups: BTreeMap<i64, Vec<String>> = BTreeMap::new();
    for (widget, g) in &placed {
        x_groups.entry(g.x).or_default().push(widget.name.clone());
        y_groups.entry(g.y).or_default().push(widget.name.clone());
    }

    let horizontal = horizontal_gaps(&placed, thresholds.row_tolerance);
    let vertical = vertical_gaps(&placed);

    let mut suggestions = Vec::new();
    let spacing = SpacingAnalysis {
        horizontal: spacing_report(&horizontal, "horizontal", &mut suggestions),
        vertical: spacing_report(&vertical, "vertical", &mut suggestions),
    };

    for (x, names) in x_groups.iter().filter(|(_, n)| n.len() >= 3) {
        suggestions.push(AlignmentSuggestion {
            kind: SuggestionKind::Alignment,
            message: format!("{} widgets aligned at x={}", names.len(), x),
            widgets: names.clone(),
            recommendation: "Consider using QVBoxLayout for vertical stacking".to_string(),
        });
    }
    for (y, names) in y_groups.iter().filter(|(_, n)| n.len() >= 3) {
        suggestions.push(AlignmentSuggestion {
            kind: SuggestionKind::Alignment,
            message: format!("{} widgets aligned at y={}", names.len(), y),
            widgets: names.clone(),
            recommendation: "Consider using QHBoxLayout for horizontal arrangement".to_string(),
        });
    }

    x_groups.retain(|_, names| names.len() > 1);
    y_groups.retain(|_, names| names.len() > 1);

    AlignmentAnalysis {
        x_groups,
        y_groups,
        spacing,
        suggestions,
    }
}

/// Gaps between left-to-right neighbours on the same row.
///
/// Widgets are bucketed into rows first: sorted by `y`, each row is anchored
/// on its topmost widget and takes every widget less than `row_tolerance`
/// below it. Each row is then ordered by `x`, so a widget sitting a few
/// pixels lower than its left neighbour does not flip the pair.
fn horizontal_gaps(placed: &[(&WidgetRecord, Geometry)], row_tolerance: i64) -> Vec<i64> {
    let mut sorted: Vec<Geometry> = placed.iter().map(|(_, g)| *g).collect();
    sorted.sort_by_key(|g| (g.y, g.x));

    let mut rows: Vec<Vec<Geometry>> = Vec::new();
    for g in sorted {
        match rows.last_mut() {
            Some(row) if g.y.saturating_sub(row[0].y) < row_tolerance => row.push(g),
            _ => rows.push(vec![g]),
        }
    }

    let mut gaps = Vec::new();
    for mut row in rows {
        row.sort_by_key(|g| g.x);
        gaps.extend(
            row.windows(2)
                .map(|pair| pair[1].x.saturating_sub(pair[0].right()))
                .filter(|gap| *gap > 0),
        );
    }
    gaps
}

/// Gaps between consecutive widgets ordered top-to-bottom, across rows.
fn vertical_gaps(placed: &[(&WidgetRecord, Geometry)]) -> Vec<i64> {
    let mut sorted: Vec<Geometry> = placed.iter().map(|(_, g)| *g).collect();
    sorted.sort_by_key(|g| g.y);
    sorted
        .windows(2)
        .map(|pair| pair[1].y.saturating_sub(pair[0].bottom()))
        .filter(|gap| *gap > 0)
        .collect()
}

/// Deduplicates the gaps and, when they disagree, suggests the most
/// common one.
fn spacing_report(
    gaps: &[i64],
    axis: &str,
    suggestions: &mut Vec<AlignmentSuggestion>,
) -> Option<SpacingReport> {
    if gaps.is_empty() {
        return None;
    }
    let unique: BTreeSet<i64> = gaps.iter().copied().collect();
    let spacings: Vec<i64> = unique.into_iter().collect();

    if spacings.len() > 1 {
        let standard = most_common(gaps);
        suggestions.push(AlignmentSuggestion {
            kind: SuggestionKind::Spacing,
            message: format!("Inconsistent {} spacing detected: {:?}", axis, spacings),
            widgets: Vec::new(),
            recommendation: format!("Consider using consistent spacing of {}px", standard),
        });
    }

    Some(SpacingReport {
        consistent: spacings.len() == 1,
        spacings,
    })
}

/// Most frequent value; ties go to the smallest.
fn most_common(values: &[i64]) -> i64 {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(*v).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        .map(|(value, _)| value)
        .unwrap_or_default()
}
