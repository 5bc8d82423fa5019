use regex::Regex;
use serde::Serialize;

lazy_static::lazy_static! {
    /// Six-digit hex color literal such as `#3498db`.
    static ref HEX_COLOR: Regex = Regex::new(r"#[0-9A-Fa-f]{6}").unwrap();
}

const THEMED_COMPONENTS: &[&str] = &["ThemedCard", "ThemedLabel", "ThemedButton"];
const LAYOUT_CLASSES: &[&str] = &[
    "QVBoxLayout",
    "QHBoxLayout",
    "QGridLayout",
    "QFormLayout",
    "QStackedLayout",
];
const BLOCKING_CALLS: &[&str] = &["time.sleep", "requests.get", "urllib.request"];

/// Checklist of framework conventions, each an independent substring test
/// over the raw source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BestPractices {
    // Theme system
    pub uses_theme_manager: bool,
    pub uses_themed_components: bool,
    pub no_hardcoded_colors: bool,
    pub hardcoded_colors_found: Vec<String>,
    // Code quality
    pub uses_object_names: bool,
    pub has_docstrings: bool,
    // Architecture
    pub uses_signals: bool,
    pub uses_threading: bool,
    pub uses_mvvm_mvc: bool,
    // Layout management
    pub uses_layouts: bool,
    pub avoids_manual_positioning: bool,
    pub uses_spacers: bool,
    // Resource management
    pub has_cleanup: bool,
    pub sets_parent: bool,
    // Framework
    pub uses_pyside6: bool,
    pub uses_lambda_slots: bool,
    pub uses_partial: bool,
    pub avoids_blocking_ui: bool,
    pub uses_qt_resources: bool,
}

fn contains_any(source: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| source.contains(n))
}

/// Substring and regex checks over the raw source text. The widget map is
/// not consulted, so comments and strings count too.
pub fn check_best_practices(source: &str) -> BestPractices {
    let hardcoded_colors_found: Vec<String> = HEX_COLOR
        .find_iter(source)
        .map(|m| m.as_str().to_string())
        .collect();
    let lowered = source.to_lowercase();

    let has_pyside = contains_any(source, &["from PySide6", "import PySide6"]);
    let has_pyqt = contains_any(source, &["from PyQt6", "import PyQt6"]);

    BestPractices {
        uses_theme_manager: source.contains("get_theme()"),
        uses_themed_components: contains_any(source, THEMED_COMPONENTS),
        no_hardcoded_colors: hardcoded_colors_found.is_empty(),
        hardcoded_colors_found,
        uses_object_names: source.contains("setObjectName"),
        has_docstrings: contains_any(source, &["\"\"\"", "'''"]),
        uses_signals: contains_any(source, &["Signal(", "@Slot", ".connect("]),
        uses_threading: contains_any(source, &["QThread", "Worker("]),
        uses_mvvm_mvc: source.contains("ViewModel")
            || lowered.contains("viewmodel")
            || lowered.contains("controller"),
        uses_layouts: contains_any(source, LAYOUT_CLASSES),
        avoids_manual_positioning: !source.contains("setGeometry"),
        uses_spacers: contains_any(source, &["addStretch", "QSpacerItem"]),
        has_cleanup: source.contains("closeEvent"),
        sets_parent: contains_any(source, &["parent=", ", self)"]),
        uses_pyside6: has_pyside && !has_pyqt,
        uses_lambda_slots: contains_any(source, &["lambda:", "lambda "]),
        uses_partial: contains_any(source, &["from functools import partial", "partial("]),
        avoids_blocking_ui: !contains_any(source, BLOCKING_CALLS),
        uses_qt_resources: source.contains(":/") && source.contains("QIcon"),
    }
}

/// A labelled checklist entry used by the text report.
pub struct CheckItem {
    pub label: &'static str,
    pub passed: bool,
}

/// Checklist entries grouped the way the report prints them.
pub fn grouped(bp: &BestPractices) -> Vec<(&'static str, Vec<CheckItem>)> {
    let item = |label, passed| CheckItem { label, passed };
    vec![
        (
            "Theme System",
            vec![
                item("Uses Theme Manager (get_theme())", bp.uses_theme_manager),
                item("Uses Themed Components", bp.uses_themed_components),
                item("No Hardcoded Colors", bp.no_hardcoded_colors),
            ],
        ),
        (
            "Code Quality",
            vec![
                item("Uses Object Names (setObjectName)", bp.uses_object_names),
                item("Has Docstrings", bp.has_docstrings),
            ],
        ),
        (
            "Architecture Patterns",
            vec![
                item("Uses Signal/Slot Pattern", bp.uses_signals),
                item("Uses MVVM/MVC Pattern", bp.uses_mvvm_mvc),
                item("Uses Threading (Responsive UI)", bp.uses_threading),
            ],
        ),
        (
            "Layout Management",
            vec![
                item("Uses Layout Managers", bp.uses_layouts),
                item(
                    "Avoids Manual Positioning (setGeometry)",
                    bp.avoids_manual_positioning,
                ),
                item("Uses Spacers/Stretches", bp.uses_spacers),
            ],
        ),
        (
            "Resource Management",
            vec![
                item("Has Cleanup (closeEvent)", bp.has_cleanup),
                item("Sets Widget Parents", bp.sets_parent),
            ],
        ),
        (
            "Framework & Best Practices",
            vec![
                item("Uses PySide6 (Preferred)", bp.uses_pyside6),
                item("Uses Lambda for Slots", bp.uses_lambda_slots),
                item("Uses functools.partial", bp.uses_partial),
                item("Avoids Blocking UI Thread", bp.avoids_blocking_ui),
                item("Uses Qt Resource System", bp.uses_qt_resources),
            ],
        ),
    ]
}
