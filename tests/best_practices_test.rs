use widgetscope::rules::best_practices::{check_best_practices, grouped};

#[test]
fn test_themed_pyside_source() {
    let code = r#"
from PySide6.QtWidgets import QWidget, QVBoxLayout
from functools import partial
from theme import get_theme, ThemedCard

class Dashboard(QWidget):
    """Dashboard view."""

    def __init__(self, parent=None):
        super().__init__(parent)
        theme = get_theme()
        self.setObjectName("dashboard")
        layout = QVBoxLayout(self)
        layout.addStretch()
        self.card = ThemedCard("Stats", self)
        self.card.clicked.connect(partial(self.open, 1))
        self.worker = QThread()

    def closeEvent(self, event):
        self.worker.quit()
"#;
    let bp = check_best_practices(code);

    assert!(bp.uses_theme_manager);
    assert!(bp.uses_themed_components);
    assert!(bp.no_hardcoded_colors);
    assert!(bp.hardcoded_colors_found.is_empty());
    assert!(bp.uses_object_names);
    assert!(bp.has_docstrings);
    assert!(bp.uses_signals);
    assert!(bp.uses_threading);
    assert!(bp.uses_layouts);
    assert!(bp.avoids_manual_positioning);
    assert!(bp.uses_spacers);
    assert!(bp.has_cleanup);
    assert!(bp.sets_parent);
    assert!(bp.uses_pyside6);
    assert!(bp.uses_partial);
    assert!(bp.avoids_blocking_ui);
    assert!(!bp.uses_lambda_slots);
    assert!(!bp.uses_mvvm_mvc);
    assert!(!bp.uses_qt_resources);
}

#[test]
fn test_hardcoded_colors_in_order() {
    let code = r##"
label.setStyleSheet("color: #FF0000; background: #00ff00;")
other.setStyleSheet("border: 1px solid #abc;")
"##;
    let bp = check_best_practices(code);

    assert!(!bp.no_hardcoded_colors);
    // three-digit shorthand is not matched
    assert_eq!(bp.hardcoded_colors_found, vec!["#FF0000", "#00ff00"]);
}

#[test]
fn test_mixed_bindings_are_not_pyside_only() {
    let code = "from PySide6.QtCore import Qt\nfrom PyQt6.QtWidgets import QLabel\n";
    assert!(!check_best_practices(code).uses_pyside6);

    let code = "import PyQt6\n";
    assert!(!check_best_practices(code).uses_pyside6);
}

#[test]
fn test_blocking_calls_and_manual_positioning() {
    let code = r#"
import time
import requests

def refresh(self):
    time.sleep(1)
    data = requests.get(URL)
    self.button.setGeometry(0, 0, 10, 10)
    self.button.clicked.connect(lambda: self.go())
"#;
    let bp = check_best_practices(code);

    assert!(!bp.avoids_blocking_ui);
    assert!(!bp.avoids_manual_positioning);
    assert!(bp.uses_lambda_slots);
    assert!(!bp.has_docstrings);
}

#[test]
fn test_architecture_and_resources() {
    let code = r#"
class MainController:
    icon = QIcon(":/icons/app.png")
"#;
    let bp = check_best_practices(code);
    assert!(bp.uses_mvvm_mvc);
    assert!(bp.uses_qt_resources);
}

#[test]
fn test_checklist_groups() {
    let bp = check_best_practices("");
    let groups = grouped(&bp);

    let titles: Vec<&str> = groups.iter().map(|(title, _)| *title).collect();
    assert_eq!(
        titles,
        vec![
            "Theme System",
            "Code Quality",
            "Architecture Patterns",
            "Layout Management",
            "Resource Management",
            "Framework & Best Practices",
        ]
    );
    let total: usize = groups.iter().map(|(_, items)| items.len()).sum();
    assert_eq!(total, 18);

    // empty source has no colors, no blocking calls and no setGeometry
    let passed: Vec<&str> = groups
        .iter()
        .flat_map(|(_, items)| items.iter())
        .filter(|item| item.passed)
        .map(|item| item.label)
        .collect();
    assert_eq!(
        passed,
        vec![
            "No Hardcoded Colors",
            "Avoids Manual Positioning (setGeometry)",
            "Avoids Blocking UI Thread",
        ]
    );
}
