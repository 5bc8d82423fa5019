use crate::error::AnalyzerError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

lazy_static::lazy_static! {
    /// Qt classes recognized both as base types and as constructors.
    static ref QT_WIDGET_TYPES: HashSet<&'static str> = {
        let mut s = HashSet::new();
        for name in [
            "QMainWindow", "QWidget", "QDialog", "QLabel", "QPushButton",
            "QLineEdit", "QTextEdit", "QComboBox", "QCheckBox", "QRadioButton",
            "QSpinBox", "QDoubleSpinBox", "QSlider", "QProgressBar",
            "QListWidget", "QTreeWidget", "QTableWidget", "QTabWidget",
            "QGroupBox", "QFrame", "QScrollArea", "QSplitter",
            "QMenuBar", "QToolBar", "QStatusBar", "QDockWidget",
        ] {
            s.insert(name);
        }
        s.extend(LAYOUT_TYPES.iter());
        s
    };

    /// Layout managers. Widgets of these types govern their children.
    pub static ref LAYOUT_TYPES: HashSet<&'static str> = {
        let mut s = HashSet::new();
        s.insert("QVBoxLayout");
        s.insert("QHBoxLayout");
        s.insert("QGridLayout");
        s.insert("QFormLayout");
        s.insert("QStackedLayout");
        s
    };

    /// Components shipped by the themed component library.
    static ref THEMED_COMPONENT_TYPES: HashSet<&'static str> = {
        let mut s = HashSet::new();
        s.insert("ThemedCard");
        s.insert("ThemedLabel");
        s.insert("ThemedButton");
        s.insert("InfoCard");
        s.insert("StatusIndicator");
        s.insert("StatBadge");
        s.insert("LotDisplayCard");
        s.insert("StatsCard");
        s
    };
}

/// Numeric cut-offs used by the detectors and the spatial analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Width or height (px) below which a widget is reported as very small.
    pub min_widget_size: i64,
    /// Maximum y difference for two widgets to share a row when measuring gaps.
    pub row_tolerance: i64,
    /// Maximum coordinate spread for a vertical stack or horizontal row.
    pub stack_tolerance: i64,
    /// Share of grid cells that must be occupied to call it a grid.
    pub grid_fill_ratio: f64,
    /// Coverage percentage above which an occlusion becomes a warning.
    pub occlusion_warning_percent: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_widget_size: 10,
            row_tolerance: 10,
            stack_tolerance: 20,
            grid_fill_ratio: 0.7,
            occlusion_warning_percent: 50.0,
        }
    }
}

/// Analyzer configuration. Passed explicitly into every run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Additional widget class names (custom or themed components).
    pub extra_widget_types: Vec<String>,
    /// Types that are allowed to exist without a parent.
    pub top_level_types: Vec<String>,
    pub thresholds: Thresholds,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            extra_widget_types: Vec::new(),
            top_level_types: vec!["QMainWindow".into(), "QDialog".into()],
            thresholds: Thresholds::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Loads a YAML configuration file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, AnalyzerError> {
        if !path.exists() {
            return Err(AnalyzerError::FileNotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(|source| AnalyzerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&text).map_err(|e| AnalyzerError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Adds widget types given on the command line.
    pub fn with_widget_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_widget_types
            .extend(types.into_iter().map(Into::into));
        self
    }

    /// Whether `name` is a recognized widget or layout class.
    pub fn is_widget_type(&self, name: &str) -> bool {
        QT_WIDGET_TYPES.contains(name)
            || THEMED_COMPONENT_TYPES.contains(name)
            || self.extra_widget_types.iter().any(|t| t == name)
    }

    pub fn is_layout_type(&self, name: &str) -> bool {
        LAYOUT_TYPES.contains(name)
    }

    pub fn is_top_level_type(&self, name: &str) -> bool {
        self.top_level_types.iter().any(|t| t == name)
    }
}
