use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::parser::{parse_file, parse_source, ParsedSource};
use crate::rules::alignment::{analyze_alignment, AlignmentAnalysis};
use crate::rules::best_practices::{check_best_practices, BestPractices};
use crate::rules::issues::IssueDetector;
use crate::rules::layout::{suggest_layouts, LayoutSuggestion};
use crate::rules::z_order::{analyze_z_order, OcclusionReport};
use crate::rules::{Issue, Severity};
use crate::tree::WidgetTree;
use crate::visitor::WidgetVisitor;
use crate::widget::WidgetMap;
use chrono::Local;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Issue counts per severity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub error: usize,
    pub warning: usize,
    pub info: usize,
}

/// Summary statistics for one analyzed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total_widgets: usize,
    /// Declared class → number of widgets.
    pub widget_types: BTreeMap<String, usize>,
    pub total_issues: usize,
    pub issues_by_severity: SeverityCounts,
    /// Newline-separated segments of the source, blank lines included.
    pub lines_of_code: usize,
}

impl Statistics {
    fn collect(widgets: &WidgetMap, issues: &[Issue], lines_of_code: usize) -> Self {
        let count = |s: Severity| issues.iter().filter(|i| i.severity == s).count();
        Self {
            total_widgets: widgets.len(),
            widget_types: widgets.type_histogram(),
            total_issues: issues.len(),
            issues_by_severity: SeverityCounts {
                error: count(Severity::Error),
                warning: count(Severity::Warning),
                info: count(Severity::Info),
            },
            lines_of_code,
        }
    }
}

/// Everything learned about one file. Read-only once built.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub file_path: PathBuf,
    /// ISO-8601 time of the run.
    pub timestamp: String,
    pub widgets: WidgetMap,
    pub tree: WidgetTree,
    /// In detection order: size, visibility, overlap, parenting, naming.
    pub issues: Vec<Issue>,
    pub statistics: Statistics,
    pub best_practices: BestPractices,
    pub alignment: AlignmentAnalysis,
    pub layout_suggestions: Vec<LayoutSuggestion>,
    pub z_order: Vec<OcclusionReport>,
}

impl AnalysisResult {
    /// Alignment, layout and z-order findings combined.
    pub fn improvement_count(&self) -> usize {
        self.alignment.suggestions.len() + self.layout_suggestions.len() + self.z_order.len()
    }
}

/// The analyzer. Holds the configuration shared by every run.
pub struct GuiAnalyzer {
    pub config: AnalyzerConfig,
}

impl GuiAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Parses and analyzes a Python UI file.
    pub fn analyze(&self, path: &Path) -> Result<AnalysisResult, AnalyzerError> {
        info!(path = %path.display(), "analyzing");
        let parsed = parse_file(path)?;
        Ok(self.analyze_parsed(&parsed))
    }

    /// Analyzes in-memory source; `path` only labels the result.
    pub fn analyze_source(&self, source: &str, path: &Path) -> Result<AnalysisResult, AnalyzerError> {
        let parsed = parse_source(source.to_string(), path)?;
        Ok(self.analyze_parsed(&parsed))
    }

    /// Runs extraction, then every independent pass.
    ///
    /// The passes only read the widget map, so they run through `rayon::join`;
    /// each returns its own output and results are assembled in a fixed order.
    pub fn analyze_parsed(&self, parsed: &ParsedSource) -> AnalysisResult {
        let mut widgets =
            WidgetVisitor::new(&self.config, &parsed.line_index).extract(&parsed.body);
        let thresholds = &self.config.thresholds;

        let ((tree, detector), (best_practices, (alignment, (layout_suggestions, z_order)))) =
            rayon::join(
                || {
                    (
                        WidgetTree::build(&widgets),
                        IssueDetector::new(&self.config).run(&widgets),
                    )
                },
                || {
                    rayon::join(
                        || check_best_practices(&parsed.source),
                        || {
                            rayon::join(
                                || analyze_alignment(&widgets, thresholds),
                                || {
                                    (
                                        suggest_layouts(&widgets, thresholds),
                                        analyze_z_order(&widgets, thresholds),
                                    )
                                },
                            )
                        },
                    )
                },
            );

        for (name, note) in &detector.notes {
            widgets.annotate(name, note);
        }
        let issues = detector.issues;
        let statistics = Statistics::collect(&widgets, &issues, parsed.line_count());

        info!(
            widgets = widgets.len(),
            issues = issues.len(),
            "analysis complete"
        );

        AnalysisResult {
            file_path: parsed.path.clone(),
            timestamp: Local::now().to_rfc3339(),
            widgets,
            tree,
            issues,
            statistics,
            best_practices,
            alignment,
            layout_suggestions,
            z_order,
        }
    }
}

impl Default for GuiAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}
