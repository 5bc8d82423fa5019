use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::tempdir;
use widgetscope::analyzer::GuiAnalyzer;
use widgetscope::error::AnalyzerError;
use widgetscope::rules::layout::LayoutPattern;
use widgetscope::rules::{Category, Severity};
use widgetscope::tree::ROOT;
use widgetscope::widget::{Geometry, LayoutKind};

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/settings_window.py")
}

#[test]
fn test_analyze_fixture_widgets() {
    let result = GuiAnalyzer::default().analyze(&fixture()).unwrap();

    let names: Vec<&str> = result.widgets.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "central",
            "main_layout",
            "title_label",
            "name_input",
            "save_button",
            "cancel_button",
            "help_button",
            "badge",
            "debug_panel",
            "widget_area",
        ]
    );

    // addWidget runs after the constructor keyword and takes over the parent
    let title = result.widgets.get("title_label").unwrap();
    assert_eq!(title.parent.as_deref(), Some("main_layout"));
    assert_eq!(
        title.stylesheet.as_deref(),
        Some("color: #3ECF8E; font-size: 18px;")
    );

    let layout = result.widgets.get("main_layout").unwrap();
    assert_eq!(
        layout.children,
        vec!["title_label", "name_input", "debug_panel"]
    );
    assert_eq!(
        result.widgets.get("central").unwrap().layout,
        Some(LayoutKind::Resolved("QVBoxLayout".to_string()))
    );
    assert_eq!(
        result.widgets.get("widget_area").unwrap().parent.as_deref(),
        Some("central")
    );
    assert_eq!(
        result.widgets.get("badge").unwrap().geometry,
        Some(Geometry::new(330, 195, 8, 8))
    );
}

#[test]
fn test_analyze_fixture_issues() {
    let result = GuiAnalyzer::default().analyze(&fixture()).unwrap();

    let stats = &result.statistics;
    assert_eq!(stats.total_widgets, 10);
    assert_eq!(stats.total_issues, 11);
    assert_eq!(stats.issues_by_severity.error, 1);
    assert_eq!(stats.issues_by_severity.warning, 8);
    assert_eq!(stats.issues_by_severity.info, 2);
    assert_eq!(stats.widget_types["QPushButton"], 3);
    assert_eq!(stats.widget_types["QWidget"], 3);
    assert!(stats.lines_of_code >= 51);

    let orphans: Vec<&str> = result
        .issues
        .iter()
        .filter(|i| i.category == Category::Layout)
        .map(|i| i.widget.as_str())
        .collect();
    assert_eq!(
        orphans,
        vec![
            "central",
            "main_layout",
            "save_button",
            "cancel_button",
            "help_button",
            "badge"
        ]
    );

    let overlap = result
        .issues
        .iter()
        .find(|i| i.category == Category::Overlap)
        .unwrap();
    assert_eq!(overlap.widget, "help_button & badge");

    let conflict = result
        .issues
        .iter()
        .find(|i| i.severity == Severity::Error)
        .unwrap();
    assert_eq!(conflict.widget, "widget_area");
    assert_eq!(conflict.line, 41);

    let badge = result.widgets.get("badge").unwrap();
    assert_eq!(
        badge.issues,
        vec![
            "Very small size",
            "May overlap with help_button",
            "No parent widget"
        ]
    );
}

#[test]
fn test_analyze_fixture_tree() {
    let result = GuiAnalyzer::default().analyze(&fixture()).unwrap();

    assert_eq!(result.tree.entry_count(), result.widgets.len());
    assert_eq!(
        result.tree.children_of(ROOT),
        [
            "central",
            "main_layout",
            "save_button",
            "cancel_button",
            "help_button",
            "badge"
        ]
    );
    assert_eq!(result.tree.children_of("central"), ["widget_area"]);
    assert_eq!(result.tree.walk().len(), 10);
}

#[test]
fn test_analyze_fixture_spatial() {
    let result = GuiAnalyzer::default().analyze(&fixture()).unwrap();

    assert_eq!(
        result.alignment.y_groups[&200],
        vec!["save_button", "cancel_button", "help_button"]
    );
    assert_eq!(result.alignment.suggestions.len(), 1);
    assert_eq!(
        result.alignment.suggestions[0].message,
        "3 widgets aligned at y=200"
    );
    let horizontal = result.alignment.spacing.horizontal.as_ref().unwrap();
    assert_eq!(horizontal.spacings, vec![10]);
    assert!(result.alignment.spacing.vertical.is_none());

    let patterns: Vec<LayoutPattern> = result
        .layout_suggestions
        .iter()
        .map(|s| s.pattern)
        .collect();
    assert_eq!(
        patterns,
        vec![LayoutPattern::HorizontalRow, LayoutPattern::Mixed]
    );

    assert_eq!(result.z_order.len(), 1);
    assert_eq!(result.z_order[0].top_widget, "badge");
    assert_eq!(result.z_order[0].bottom_widget, "help_button");
    assert_eq!(result.z_order[0].overlap_area, 24);
    assert_eq!(result.z_order[0].severity, Severity::Info);

    assert_eq!(result.improvement_count(), 4);
}

#[test]
fn test_analyze_fixture_best_practices() {
    let result = GuiAnalyzer::default().analyze(&fixture()).unwrap();
    let bp = &result.best_practices;

    assert!(!bp.no_hardcoded_colors);
    assert_eq!(bp.hardcoded_colors_found, vec!["#3ECF8E"]);
    assert!(bp.uses_pyside6);
    assert!(bp.has_cleanup);
    assert!(bp.uses_signals);
    assert!(bp.uses_layouts);
    assert!(bp.sets_parent);
    assert!(bp.has_docstrings);
    assert!(!bp.avoids_manual_positioning);
}

#[test]
fn test_repeated_runs_are_identical() {
    let analyzer = GuiAnalyzer::default();
    let first = analyzer.analyze(&fixture()).unwrap();
    let second = analyzer.analyze(&fixture()).unwrap();

    assert_eq!(first.widgets, second.widgets);
    assert_eq!(first.issues, second.issues);
    assert_eq!(first.statistics, second.statistics);
    assert_eq!(first.tree, second.tree);
    assert_eq!(first.z_order, second.z_order);
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.py");

    let err = GuiAnalyzer::default().analyze(&missing).unwrap_err();
    assert!(matches!(err, AnalyzerError::FileNotFound(ref p) if p == &missing));
}

#[test]
fn test_syntax_error_reports_line() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("broken.py");
    let mut file = File::create(&file_path).unwrap();
    write!(
        file,
        "class Broken(QWidget):\n    def __init__(self):\n        self.label = QLabel(\n"
    )
    .unwrap();

    let err = GuiAnalyzer::default().analyze(&file_path).unwrap_err();
    match err {
        AnalyzerError::Parse { path, line, .. } => {
            assert_eq!(path, file_path);
            assert!(line >= 3);
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_file_without_ui_classes() {
    let result = GuiAnalyzer::default()
        .analyze_source("def helper():\n    return 1\n", Path::new("helpers.py"))
        .unwrap();

    assert!(result.widgets.is_empty());
    assert!(result.issues.is_empty());
    assert_eq!(result.tree.entry_count(), 0);
    assert_eq!(result.improvement_count(), 0);
    assert_eq!(result.statistics.lines_of_code, 3);
}

#[test]
fn test_huge_geometry_literals() {
    let code = r#"
class Window(QMainWindow):
    def __init__(self):
        self.a = QLabel("a")
        self.b = QLabel("b")
        self.a.setGeometry(0, 0, 4000000000, 4000000000)
        self.b.setGeometry(0, 0, 4000000000, 4000000000)
"#;
    let result = GuiAnalyzer::default()
        .analyze_source(code, Path::new("huge.py"))
        .unwrap();

    assert_eq!(result.z_order.len(), 1);
    assert_eq!(result.z_order[0].overlap_area, i64::MAX);
    assert_eq!(
        result
            .issues
            .iter()
            .filter(|i| i.category == Category::Overlap)
            .count(),
        1
    );
}
