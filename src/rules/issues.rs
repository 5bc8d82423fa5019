use super::{Category, Issue, Severity};
use crate::config::AnalyzerConfig;
use crate::widget::{WidgetMap, WidgetRecord};

/// Runs the five structural passes over a widget map.
///
/// The map is never touched; notes meant for individual widgets are
/// collected in `notes` and attached by the caller once all passes ran.
pub struct IssueDetector<'a> {
    /// Collected issues, in pass order.
    pub issues: Vec<Issue>,
    /// `(widget name, note)` pairs for the per-widget issue lists.
    pub notes: Vec<(String, String)>,
    config: &'a AnalyzerConfig,
}

impl<'a> IssueDetector<'a> {
    pub fn new(config: &'a AnalyzerConfig) -> Self {
        Self {
            issues: Vec::new(),
            notes: Vec::new(),
            config,
        }
    }

    /// Runs every pass in a fixed order.
    pub fn run(mut self, widgets: &WidgetMap) -> Self {
        self.check_size(widgets);
        self.check_visibility(widgets);
        self.check_overlap(widgets);
        self.check_parenting(widgets);
        self.check_naming(widgets);
        self
    }

    fn add_issue(
        &mut self,
        severity: Severity,
        category: Category,
        widget: &WidgetRecord,
        message: String,
        note: &str,
    ) {
        self.issues.push(Issue {
            severity,
            category,
            widget: widget.name.clone(),
            widgets: vec![widget.name.clone()],
            message,
            line: widget.line,
        });
        self.notes.push((widget.name.clone(), note.to_string()));
    }

    /// Tiny geometry (either side under `min_widget_size`) is a warning;
    /// a minimum size larger than the maximum on either axis is an error.
    pub fn check_size(&mut self, widgets: &WidgetMap) {
        let min = self.config.thresholds.min_widget_size;
        for widget in widgets.iter() {
            if let Some(g) = widget.geometry {
                if g.width < min || g.height < min {
                    self.add_issue(
                        Severity::Warning,
                        Category::Size,
                        widget,
                        format!(
                            "Widget is very small ({}x{}px), may be invisible",
                            g.width, g.height
                        ),
                        "Very small size",
                    );
                }
            }

            if let (Some(lo), Some(hi)) = (widget.properties.min_size, widget.properties.max_size)
            {
                if lo.width > hi.width || lo.height > hi.height {
                    self.add_issue(
                        Severity::Error,
                        Category::Size,
                        widget,
                        format!(
                            "Min size ({}x{}) exceeds max size ({}x{})",
                            lo.width, lo.height, hi.width, hi.height
                        ),
                        "Min/Max size conflict",
                    );
                }
            }
        }
    }

    /// Hidden widgets, as an informational reminder.
    pub fn check_visibility(&mut self, widgets: &WidgetMap) {
        for widget in widgets.iter().filter(|w| !w.visible) {
            self.add_issue(
                Severity::Info,
                Category::Visibility,
                widget,
                "Widget is explicitly hidden".to_string(),
                "Hidden by setVisible(False)",
            );
        }
    }

    /// Every unordered pair with geometry; both widgets get a note.
    pub fn check_overlap(&mut self, widgets: &WidgetMap) {
        let placed = widgets.with_geometry();
        for (i, (first, g1)) in placed.iter().enumerate() {
            for (second, g2) in &placed[i + 1..] {
                if !g1.overlaps(g2) {
                    continue;
                }
                self.issues.push(Issue {
                    severity: Severity::Warning,
                    category: Category::Overlap,
                    widget: format!("{} & {}", first.name, second.name),
                    widgets: vec![first.name.clone(), second.name.clone()],
                    message: format!("Widgets may overlap: {} and {}", first.name, second.name),
                    line: first.line,
                });
                self.notes
                    .push((first.name.clone(), format!("May overlap with {}", second.name)));
                self.notes
                    .push((second.name.clone(), format!("May overlap with {}", first.name)));
            }
        }
    }

    /// Top-level window types are exempt.
    pub fn check_parenting(&mut self, widgets: &WidgetMap) {
        for widget in widgets.iter() {
            if widget.parent.is_none() && !self.config.is_top_level_type(&widget.widget_type) {
                self.add_issue(
                    Severity::Warning,
                    Category::Layout,
                    widget,
                    "Widget has no parent (may cause memory leak)".to_string(),
                    "No parent widget",
                );
            }
        }
    }

    /// Generic `widget*` / `var*` names.
    pub fn check_naming(&mut self, widgets: &WidgetMap) {
        for widget in widgets.iter() {
            if widget.name.starts_with("widget") || widget.name.starts_with("var") {
                self.add_issue(
                    Severity::Info,
                    Category::Naming,
                    widget,
                    format!(
                        "Consider using a more descriptive name than '{}'",
                        widget.name
                    ),
                    "Generic name",
                );
            }
        }
    }
}
