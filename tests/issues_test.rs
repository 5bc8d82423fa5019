use std::path::Path;
use widgetscope::analyzer::GuiAnalyzer;
use widgetscope::config::AnalyzerConfig;
use widgetscope::rules::issues::IssueDetector;
use widgetscope::rules::{Category, Issue, Severity};
use widgetscope::widget::{Geometry, SizeHint, WidgetMap, WidgetRecord};

fn widget(name: &str, widget_type: &str, line: usize) -> WidgetRecord {
    let mut w = WidgetRecord::new(name, widget_type, "Window", line);
    w.parent = Some("central".to_string());
    w
}

fn placed(name: &str, line: usize, g: Geometry) -> WidgetRecord {
    let mut w = widget(name, "QLabel", line);
    w.geometry = Some(g);
    w
}

struct Findings {
    issues: Vec<Issue>,
    notes: Vec<(String, String)>,
}

fn run(widgets: &WidgetMap) -> Findings {
    let config = AnalyzerConfig::default();
    let detector = IssueDetector::new(&config).run(widgets);
    Findings {
        issues: detector.issues,
        notes: detector.notes,
    }
}

#[test]
fn test_small_widget_warning() {
    let mut widgets = WidgetMap::new();
    widgets.insert(placed("dot", 3, Geometry::new(0, 0, 5, 5)));
    widgets.insert(placed("card", 4, Geometry::new(100, 100, 50, 50)));

    let detector = run(&widgets);
    let size: Vec<_> = detector
        .issues
        .iter()
        .filter(|i| i.category == Category::Size)
        .collect();

    assert_eq!(size.len(), 1);
    assert_eq!(size[0].severity, Severity::Warning);
    assert_eq!(size[0].widget, "dot");
    assert_eq!(size[0].line, 3);
    assert!(size[0].message.contains("5x5"));
}

#[test]
fn test_min_exceeds_max_is_single_error() {
    let mut w = widget("panel", "QFrame", 7);
    w.properties.min_size = Some(SizeHint {
        width: 100,
        height: 100,
    });
    w.properties.max_size = Some(SizeHint {
        width: 50,
        height: 50,
    });
    let mut widgets = WidgetMap::new();
    widgets.insert(w);

    let detector = run(&widgets);
    assert_eq!(detector.issues.len(), 1);
    assert_eq!(detector.issues[0].severity, Severity::Error);
    assert_eq!(detector.issues[0].category, Category::Size);
    assert_eq!(
        detector.notes,
        vec![("panel".to_string(), "Min/Max size conflict".to_string())]
    );
}

#[test]
fn test_hidden_widget_is_info() {
    let mut w = widget("debug_panel", "QFrame", 9);
    w.visible = false;
    let mut widgets = WidgetMap::new();
    widgets.insert(w);

    let detector = run(&widgets);
    assert_eq!(detector.issues.len(), 1);
    assert_eq!(detector.issues[0].severity, Severity::Info);
    assert_eq!(detector.issues[0].category, Category::Visibility);
}

#[test]
fn test_overlap_reported_once_and_noted_on_both() {
    let code = r#"
class Window(QMainWindow):
    def __init__(self):
        self.central = QWidget()
        self.left = QLabel("a", parent=self.central)
        self.right = QLabel("b", parent=self.central)
        self.far = QLabel("c", parent=self.central)
        self.left.setGeometry(0, 0, 100, 40)
        self.right.setGeometry(50, 20, 100, 40)
        self.far.setGeometry(500, 500, 20, 20)
"#;
    let result = GuiAnalyzer::default()
        .analyze_source(code, Path::new("window.py"))
        .unwrap();

    let overlaps: Vec<_> = result
        .issues
        .iter()
        .filter(|i| i.category == Category::Overlap)
        .collect();
    assert_eq!(overlaps.len(), 1);
    assert_eq!(overlaps[0].widget, "left & right");
    assert_eq!(overlaps[0].widgets, vec!["left", "right"]);
    assert_eq!(overlaps[0].line, 5);

    assert!(result
        .widgets
        .get("left")
        .unwrap()
        .issues
        .contains(&"May overlap with right".to_string()));
    assert!(result
        .widgets
        .get("right")
        .unwrap()
        .issues
        .contains(&"May overlap with left".to_string()));
    assert!(result.widgets.get("far").unwrap().issues.is_empty());
}

#[test]
fn test_touching_edges_count_as_overlap() {
    let mut widgets = WidgetMap::new();
    widgets.insert(placed("a", 1, Geometry::new(0, 0, 10, 10)));
    widgets.insert(placed("b", 2, Geometry::new(10, 0, 10, 10)));

    let detector = run(&widgets);
    assert_eq!(
        detector
            .issues
            .iter()
            .filter(|i| i.category == Category::Overlap)
            .count(),
        1
    );
}

#[test]
fn test_missing_parent_skips_top_level_types() {
    let mut widgets = WidgetMap::new();
    widgets.insert(WidgetRecord::new("window", "QMainWindow", "App", 2));
    widgets.insert(WidgetRecord::new("dialog", "QDialog", "App", 3));
    widgets.insert(WidgetRecord::new("orphan", "QPushButton", "App", 4));

    let detector = run(&widgets);
    assert_eq!(detector.issues.len(), 1);
    let issue = &detector.issues[0];
    assert_eq!(issue.category, Category::Layout);
    assert_eq!(issue.severity, Severity::Warning);
    assert_eq!(issue.widget, "orphan");
}

#[test]
fn test_generic_names() {
    let mut widgets = WidgetMap::new();
    widgets.insert(widget("widget_1", "QLabel", 1));
    widgets.insert(widget("variable", "QLabel", 2));
    widgets.insert(widget("my_widget", "QLabel", 3));

    let detector = run(&widgets);
    let flagged: Vec<_> = detector
        .issues
        .iter()
        .filter(|i| i.category == Category::Naming)
        .map(|i| i.widget.as_str())
        .collect();
    assert_eq!(flagged, vec!["widget_1", "variable"]);
    assert!(detector.issues.iter().all(|i| i.severity == Severity::Info));
}

#[test]
fn test_pass_order_is_fixed() {
    let mut w = widget("widget_box", "QFrame", 1);
    w.parent = None;
    w.visible = false;
    w.geometry = Some(Geometry::new(0, 0, 2, 2));
    let mut widgets = WidgetMap::new();
    widgets.insert(w);

    let categories: Vec<_> = run(&widgets).issues.iter().map(|i| i.category).collect();
    assert_eq!(
        categories,
        vec![
            Category::Size,
            Category::Visibility,
            Category::Layout,
            Category::Naming
        ]
    );
}

#[test]
fn test_untracked_parent_keyword_is_flagged() {
    let code = r#"
class Window(QMainWindow):
    def __init__(self):
        self.title = QLabel("x", parent=self.central)
"#;
    let result = GuiAnalyzer::default()
        .analyze_source(code, Path::new("window.py"))
        .unwrap();

    let title = result.widgets.get("title").unwrap();
    assert!(title.parent.is_none());
    assert_eq!(title.issues, vec!["No parent widget"]);

    let layout: Vec<_> = result
        .issues
        .iter()
        .filter(|i| i.category == Category::Layout)
        .collect();
    assert_eq!(layout.len(), 1);
    assert_eq!(layout[0].widget, "title");
}
