use crate::analyzer::{AnalysisResult, Statistics};
use crate::rules::best_practices::{grouped, BestPractices};
use crate::rules::{Issue, Severity};
use crate::tree::ROOT;
use colored::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

const RULE: &str = "────────────────────────────────────────────────────────────────────────────────";
const BANNER: &str = "================================================================================";

/// Lists in the text report are cut after this many entries.
const SHOWN: usize = 5;

/// Per-widget entry of the JSON output.
#[derive(Serialize)]
pub struct WidgetSummary<'a> {
    /// Declared class, serialized as `type`.
    #[serde(rename = "type")]
    pub widget_type: &'a str,
    pub line: usize,
    pub parent: Option<&'a str>,
    pub children: &'a [String],
    /// Short notes attached by the issue detector.
    pub issues: &'a [String],
}

/// Machine-readable form of an [`AnalysisResult`].
///
/// Only the structural part of the result is exported; the spatial
/// findings appear in the text report.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub file_path: String,
    pub timestamp: &'a str,
    pub statistics: &'a Statistics,
    /// Keyed by widget name, sorted.
    pub widgets: BTreeMap<&'a str, WidgetSummary<'a>>,
    pub issues: &'a [Issue],
    pub best_practices: &'a BestPractices,
}

impl<'a> JsonReport<'a> {
    pub fn new(result: &'a AnalysisResult) -> Self {
        let widgets = result
            .widgets
            .iter()
            .map(|w| {
                (
                    w.name.as_str(),
                    WidgetSummary {
                        widget_type: &w.widget_type,
                        line: w.line,
                        parent: w.parent.as_deref(),
                        children: &w.children,
                        issues: &w.issues,
                    },
                )
            })
            .collect();

        Self {
            file_path: result.file_path.display().to_string(),
            timestamp: &result.timestamp,
            statistics: &result.statistics,
            widgets,
            issues: &result.issues,
            best_practices: &result.best_practices,
        }
    }
}

/// Pretty-printed JSON for `--json`.
pub fn render_json(result: &AnalysisResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport::new(result))
}

/// Bold section title followed by a horizontal rule.
fn header(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "\n{}", title.bold())?;
    writeln!(out, "{}", RULE)
}

fn check_mark(passed: bool) -> ColoredString {
    if passed {
        "[x]".green()
    } else {
        "[ ]".red()
    }
}

/// Writes the full console report.
///
/// Section order: statistics, widget tree, widget details, issues,
/// best practices, type histogram, then the spatial sections (each only
/// when it has findings) and the improvement summary.
pub fn render_text(out: &mut impl Write, result: &AnalysisResult) -> io::Result<()> {
    writeln!(out, "{}", BANNER)?;
    writeln!(out, "{}", "GUI CODE ANALYSIS REPORT".bold())?;
    writeln!(out, "{}", BANNER)?;
    writeln!(out, "File: {}", result.file_path.display())?;
    writeln!(out, "Timestamp: {}", result.timestamp)?;
    writeln!(out, "{}", BANNER)?;

    render_statistics(out, &result.statistics)?;
    render_tree(out, result)?;
    render_widgets(out, result)?;
    render_issues(out, &result.issues)?;
    render_best_practices(out, &result.best_practices)?;
    render_histogram(out, &result.statistics)?;
    render_alignment(out, result)?;
    render_layout_suggestions(out, result)?;
    render_z_order(out, result)?;

    let total = result.improvement_count();
    if total > 0 {
        header(out, "IMPROVEMENT SUMMARY")?;
        writeln!(out, "Total Improvement Opportunities: {}", total)?;
        writeln!(
            out,
            "  * Alignment & Spacing: {}",
            result.alignment.suggestions.len()
        )?;
        writeln!(
            out,
            "  * Layout Optimization: {}",
            result.layout_suggestions.len()
        )?;
        writeln!(out, "  * Z-Order Issues: {}", result.z_order.len())?;
    }

    writeln!(out, "\n{}", BANNER)?;
    writeln!(out, "{}", "ANALYSIS COMPLETE".bold())?;
    writeln!(out, "{}", BANNER)
}

fn render_statistics(out: &mut impl Write, stats: &Statistics) -> io::Result<()> {
    header(out, "STATISTICS")?;
    writeln!(out, "Total Widgets: {}", stats.total_widgets)?;
    writeln!(out, "Total Issues: {}", stats.total_issues)?;
    writeln!(out, "  * Errors: {}", stats.issues_by_severity.error)?;
    writeln!(out, "  * Warnings: {}", stats.issues_by_severity.warning)?;
    writeln!(out, "  * Info: {}", stats.issues_by_severity.info)?;
    writeln!(out, "Lines of Code: {}", stats.lines_of_code)
}

/// Indented tree under `ROOT`. Widgets carrying notes get an issue count.
fn render_tree(out: &mut impl Write, result: &AnalysisResult) -> io::Result<()> {
    header(out, "WIDGET TREE")?;
    writeln!(out, "├─ {}", ROOT)?;
    for (depth, name) in result.tree.walk() {
        let indent = "  ".repeat(depth + 1);
        match result.widgets.get(&name) {
            Some(widget) => {
                let marker = if widget.issues.is_empty() {
                    String::new()
                } else {
                    format!(" ({} issues)", widget.issues.len())
                        .yellow()
                        .to_string()
                };
                writeln!(
                    out,
                    "{}├─ [{}] {}{}",
                    indent, widget.widget_type, name, marker
                )?;
            }
            None => writeln!(out, "{}├─ {}", indent, name)?,
        }
    }
    Ok(())
}

/// One block per widget in map order. Absent attributes are skipped.
fn render_widgets(out: &mut impl Write, result: &AnalysisResult) -> io::Result<()> {
    header(out, "WIDGET DETAILS")?;
    for widget in result.widgets.iter() {
        writeln!(out, "\n[{}] {}", widget.widget_type, widget.name.bold())?;
        writeln!(out, "  Line: {}", widget.line)?;
        if let Some(parent) = &widget.parent {
            writeln!(out, "  Parent: {}", parent)?;
        }
        if !widget.children.is_empty() {
            writeln!(out, "  Children: {}", widget.children.join(", "))?;
        }
        if let Some(g) = widget.geometry {
            writeln!(
                out,
                "  Geometry: x={}, y={}, width={}, height={}",
                g.x, g.y, g.width, g.height
            )?;
        }
        if let Some(size) = widget.properties.min_size {
            writeln!(out, "  Min Size: ({}, {})", size.width, size.height)?;
        }
        if let Some(size) = widget.properties.max_size {
            writeln!(out, "  Max Size: ({}, {})", size.width, size.height)?;
        }
        if let Some(layout) = &widget.layout {
            writeln!(out, "  Layout: {}", layout.label())?;
        }
        writeln!(out, "  Visible: {}", widget.visible)?;
        writeln!(out, "  Enabled: {}", widget.enabled)?;
        if let Some(style) = &widget.stylesheet {
            // first 100 characters only
            let snippet: String = style.chars().take(100).collect();
            writeln!(out, "  Stylesheet: {}...", snippet.trim())?;
        }
        if !widget.issues.is_empty() {
            writeln!(
                out,
                "  {} {}",
                "Issues:".yellow(),
                widget.issues.join(", ")
            )?;
        }
    }
    Ok(())
}

/// Issues grouped by severity, errors first. Empty groups are omitted.
fn render_issues(out: &mut impl Write, issues: &[Issue]) -> io::Result<()> {
    if issues.is_empty() {
        return writeln!(out, "\n{}", "NO ISSUES DETECTED".green().bold());
    }
    header(out, &format!("DETECTED ISSUES ({})", issues.len()))?;

    for (severity, title) in [
        (Severity::Error, "ERRORS"),
        (Severity::Warning, "WARNINGS"),
        (Severity::Info, "INFO"),
    ] {
        let group: Vec<&Issue> = issues.iter().filter(|i| i.severity == severity).collect();
        if group.is_empty() {
            continue;
        }
        let title = format!("{} ({}):", title, group.len());
        let title = match severity {
            Severity::Error => title.red().bold(),
            Severity::Warning => title.yellow().bold(),
            Severity::Info => title.blue().bold(),
        };
        writeln!(out, "\n{}", title)?;
        for issue in group {
            writeln!(
                out,
                "\n  * [{}] {}",
                issue.category.as_str().to_uppercase(),
                issue.widget
            )?;
            writeln!(out, "    {}", issue.message)?;
            writeln!(out, "    Line {}", issue.line)?;
        }
    }
    Ok(())
}

fn render_best_practices(out: &mut impl Write, bp: &BestPractices) -> io::Result<()> {
    header(out, "BEST PRACTICES & DESIGN PRINCIPLES")?;
    for (group, items) in grouped(bp) {
        writeln!(out, "\n{}:", group)?;
        for item in items {
            writeln!(out, "  {} {}", check_mark(item.passed), item.label)?;
        }
        if group == "Theme System" && !bp.hardcoded_colors_found.is_empty() {
            let shown: Vec<&str> = bp
                .hardcoded_colors_found
                .iter()
                .take(SHOWN)
                .map(String::as_str)
                .collect();
            writeln!(out, "      Found: {}", shown.join(", "))?;
        }
    }
    Ok(())
}

fn render_histogram(out: &mut impl Write, stats: &Statistics) -> io::Result<()> {
    header(out, "WIDGET TYPE DISTRIBUTION")?;
    let mut types: Vec<(&String, &usize)> = stats.widget_types.iter().collect();
    // by count, descending; names break ties
    types.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
    for (widget_type, count) in types {
        writeln!(
            out,
            "{:30} {:3} {}",
            widget_type,
            count,
            "█".repeat(*count)
        )?;
    }
    Ok(())
}

/// Spacing summary per axis plus every alignment suggestion.
fn render_alignment(out: &mut impl Write, result: &AnalysisResult) -> io::Result<()> {
    let alignment = &result.alignment;
    if alignment.suggestions.is_empty() {
        return Ok(());
    }
    header(out, "ALIGNMENT & SPACING ANALYSIS")?;

    for (axis, report) in [
        ("Horizontal", &alignment.spacing.horizontal),
        ("Vertical", &alignment.spacing.vertical),
    ] {
        let Some(report) = report else {
            continue;
        };
        if report.consistent {
            writeln!(out, "\n{} Spacing: {}", axis, "consistent".green())?;
            writeln!(out, "  Consistent spacing of {}px", report.spacings[0])?;
        } else {
            writeln!(out, "\n{} Spacing: {}", axis, "inconsistent".yellow())?;
            writeln!(out, "  Inconsistent: {:?}", report.spacings)?;
        }
    }

    writeln!(out, "\nSuggestions:")?;
    for suggestion in &alignment.suggestions {
        writeln!(out, "  * {}", suggestion.message)?;
        writeln!(out, "    -> {}", suggestion.recommendation)?;
    }
    Ok(())
}

fn render_layout_suggestions(out: &mut impl Write, result: &AnalysisResult) -> io::Result<()> {
    if result.layout_suggestions.is_empty() {
        return Ok(());
    }
    header(out, "LAYOUT OPTIMIZATION SUGGESTIONS")?;
    for suggestion in &result.layout_suggestions {
        writeln!(
            out,
            "\n[{}] {}",
            suggestion.severity.as_str().to_uppercase(),
            suggestion.message
        )?;
        if !suggestion.widgets.is_empty() {
            let shown: Vec<&str> = suggestion
                .widgets
                .iter()
                .take(SHOWN)
                .map(String::as_str)
                .collect();
            writeln!(out, "  Widgets: {}", shown.join(", "))?;
            if suggestion.widgets.len() > SHOWN {
                writeln!(
                    out,
                    "           ... and {} more",
                    suggestion.widgets.len() - SHOWN
                )?;
            }
        }
        writeln!(out, "  -> {}", suggestion.recommendation)?;
        writeln!(out, "  Benefit: {}", suggestion.benefit)?;
    }
    Ok(())
}

/// The first few occlusion pairs; the rest are only counted.
fn render_z_order(out: &mut impl Write, result: &AnalysisResult) -> io::Result<()> {
    if result.z_order.is_empty() {
        return Ok(());
    }
    header(out, "Z-ORDER & OCCLUSION ANALYSIS")?;
    writeln!(
        out,
        "Found {} overlapping widget pairs:\n",
        result.z_order.len()
    )?;

    for report in result.z_order.iter().take(SHOWN) {
        writeln!(
            out,
            "[{}] {}",
            report.severity.as_str().to_uppercase(),
            report.message
        )?;
        writeln!(
            out,
            "  Overlap area: {}px² ({:.1}% of bottom widget, {:.1}% of top widget)",
            report.overlap_area, report.bottom_covered_percent, report.top_covered_percent
        )?;
        writeln!(out, "  -> {}\n", report.recommendation)?;
    }
    if result.z_order.len() > SHOWN {
        writeln!(
            out,
            "... and {} more overlapping pairs",
            result.z_order.len() - SHOWN
        )?;
    }
    Ok(())
}
